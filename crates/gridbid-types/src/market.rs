// Copyright (c) 2025 SOLARE S.R.O.
//
// This file is part of GridBid.
//
// Licensed under the Creative Commons Attribution-NonCommercial-NoDerivatives 4.0 International
// (CC BY-NC-ND 4.0). You may use and share this file for non-commercial purposes only and you may not
// create derivatives. See <https://creativecommons.org/licenses/by-nc-nd/4.0/>.
//
// This software is provided "AS IS", without warranty of any kind.
//
// For commercial licensing, please contact: info@solare.cz

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

// ============= Market Mechanisms =============

/// Electricity market mechanisms a curve can be generated for
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum MarketType {
    /// Day-Ahead Market, hourly blocks cleared one day before delivery
    #[serde(rename = "DAM")]
    Dam,
    /// Real-Time Market, 5-minute blocks cleared close to delivery
    #[serde(rename = "RTM")]
    Rtm,
    /// System/ancillary operations (balancing and regulation)
    #[serde(rename = "SO")]
    So,
    /// Green Term-Ahead Market for renewable energy
    #[serde(rename = "GTAM")]
    Gtam,
}

impl MarketType {
    /// Short code used on the wire and in reports
    pub fn code(&self) -> &'static str {
        match self {
            Self::Dam => "DAM",
            Self::Rtm => "RTM",
            Self::So => "SO",
            Self::Gtam => "GTAM",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Dam => "Day-Ahead",
            Self::Rtm => "Real-Time",
            Self::So => "System/Ancillary",
            Self::Gtam => "Green Term-Ahead",
        }
    }

    pub fn all() -> &'static [MarketType] {
        &[Self::Dam, Self::Rtm, Self::So, Self::Gtam]
    }
}

impl fmt::Display for MarketType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

// ============= Curves =============

/// One observation on one market curve
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketDataPoint {
    /// Start of the block this price applies to
    pub timestamp: DateTime<Utc>,

    /// Market clearing price
    pub price: f64,

    /// Traded volume (MWh)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volume: Option<u32>,

    /// Bid price after the optimizer ran
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub optimized_price: Option<f64>,

    /// Observed price when the point came from the uploaded dataset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actual_price: Option<f64>,

    /// Day-ahead reference price for the same hour (RTM points)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dam_price: Option<f64>,

    /// Upward regulation capacity offered (SO points, MW)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub up_regulation: Option<u32>,

    /// Downward regulation capacity offered (SO points, MW)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub down_regulation: Option<u32>,
}

impl MarketDataPoint {
    /// Bare point with only a timestamp and price set
    pub fn new(timestamp: DateTime<Utc>, price: f64) -> Self {
        Self {
            timestamp,
            price,
            volume: None,
            optimized_price: None,
            actual_price: None,
            dam_price: None,
            up_regulation: None,
            down_regulation: None,
        }
    }
}

/// The four generated curves of one evaluation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketCurves {
    pub dam_data: Vec<MarketDataPoint>,
    pub rtm_data: Vec<MarketDataPoint>,
    pub so_data: Vec<MarketDataPoint>,
    pub gtam_data: Vec<MarketDataPoint>,
}

impl MarketCurves {
    pub fn curve(&self, market: MarketType) -> &[MarketDataPoint] {
        match market {
            MarketType::Dam => &self.dam_data,
            MarketType::Rtm => &self.rtm_data,
            MarketType::So => &self.so_data,
            MarketType::Gtam => &self.gtam_data,
        }
    }

    pub fn curve_mut(&mut self, market: MarketType) -> &mut Vec<MarketDataPoint> {
        match market {
            MarketType::Dam => &mut self.dam_data,
            MarketType::Rtm => &mut self.rtm_data,
            MarketType::So => &mut self.so_data,
            MarketType::Gtam => &mut self.gtam_data,
        }
    }

    pub fn is_empty(&self) -> bool {
        MarketType::all().iter().all(|m| self.curve(*m).is_empty())
    }
}
