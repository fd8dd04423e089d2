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

//! Tunable constants of the curve generators, metrics and recommendation rules.
//!
//! Defaults reproduce the reference behavior; deployments can override any of
//! them through the `[market]` table of the settings file.

use crate::error::{EvaluationError, Result};
use serde::{Deserialize, Serialize};

/// Half-open integer range `[min, max)` used for random volumes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VolumeRange {
    pub min: u32,
    pub max: u32,
}

impl VolumeRange {
    pub const fn new(min: u32, max: u32) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, value: u32) -> bool {
        (self.min..self.max).contains(&value)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketParameters {
    /// Share of revenue assumed to be cost
    #[serde(default = "default_cost_ratio")]
    pub cost_ratio: f64,

    /// SO price premium over the DAM baseline
    #[serde(default = "default_so_premium")]
    pub so_premium: f64,

    /// GTAM price premium over the DAM baseline
    #[serde(default = "default_gtam_premium")]
    pub gtam_premium: f64,

    /// Optimal bid as a fraction of the average DAM price
    #[serde(default = "default_bid_discount")]
    pub bid_discount: f64,

    /// Max relative jitter applied to baseline-sourced DAM prices
    #[serde(default = "default_dam_jitter")]
    pub dam_jitter: f64,

    /// Max relative deviation of RTM prices from the hourly reference
    #[serde(default = "default_rtm_jitter")]
    pub rtm_jitter: f64,

    #[serde(default = "default_dam_volume")]
    pub dam_volume: VolumeRange,

    #[serde(default = "default_rtm_volume")]
    pub rtm_volume: VolumeRange,

    #[serde(default = "default_gtam_volume")]
    pub gtam_volume: VolumeRange,

    #[serde(default = "default_so_up_regulation")]
    pub so_up_regulation: VolumeRange,

    #[serde(default = "default_so_down_regulation")]
    pub so_down_regulation: VolumeRange,

    /// Coefficient-of-variation cut points (%), strictly increasing
    #[serde(default = "default_risk_cv_thresholds")]
    pub risk_cv_thresholds: [f64; 3],

    /// Risk scores for CV below each threshold, plus the score above the last one
    #[serde(default = "default_risk_scores")]
    pub risk_scores: [f64; 4],

    #[serde(default = "default_confidence_base")]
    pub confidence_base: f64,

    /// Width of the random confidence band added to the base
    #[serde(default = "default_confidence_span")]
    pub confidence_span: f64,

    /// DAM-RTM spread above which a bid strategy recommendation fires
    #[serde(default = "default_spread_alert")]
    pub spread_alert_threshold: f64,

    /// Risk score above which a risk management recommendation fires
    #[serde(default = "default_risk_alert")]
    pub risk_alert_threshold: f64,
}

fn default_cost_ratio() -> f64 {
    0.85
}

fn default_so_premium() -> f64 {
    1.2
}

fn default_gtam_premium() -> f64 {
    1.1
}

fn default_bid_discount() -> f64 {
    0.95
}

fn default_dam_jitter() -> f64 {
    0.20
}

fn default_rtm_jitter() -> f64 {
    0.15
}

fn default_dam_volume() -> VolumeRange {
    VolumeRange::new(500, 2000)
}

fn default_rtm_volume() -> VolumeRange {
    VolumeRange::new(100, 600)
}

fn default_gtam_volume() -> VolumeRange {
    VolumeRange::new(200, 1000)
}

fn default_so_up_regulation() -> VolumeRange {
    VolumeRange::new(50, 250)
}

fn default_so_down_regulation() -> VolumeRange {
    VolumeRange::new(30, 180)
}

fn default_risk_cv_thresholds() -> [f64; 3] {
    [10.0, 20.0, 30.0]
}

fn default_risk_scores() -> [f64; 4] {
    [20.0, 40.0, 60.0, 80.0]
}

fn default_confidence_base() -> f64 {
    85.0
}

fn default_confidence_span() -> f64 {
    10.0
}

fn default_spread_alert() -> f64 {
    0.5
}

fn default_risk_alert() -> f64 {
    50.0
}

impl Default for MarketParameters {
    fn default() -> Self {
        Self {
            cost_ratio: default_cost_ratio(),
            so_premium: default_so_premium(),
            gtam_premium: default_gtam_premium(),
            bid_discount: default_bid_discount(),
            dam_jitter: default_dam_jitter(),
            rtm_jitter: default_rtm_jitter(),
            dam_volume: default_dam_volume(),
            rtm_volume: default_rtm_volume(),
            gtam_volume: default_gtam_volume(),
            so_up_regulation: default_so_up_regulation(),
            so_down_regulation: default_so_down_regulation(),
            risk_cv_thresholds: default_risk_cv_thresholds(),
            risk_scores: default_risk_scores(),
            confidence_base: default_confidence_base(),
            confidence_span: default_confidence_span(),
            spread_alert_threshold: default_spread_alert(),
            risk_alert_threshold: default_risk_alert(),
        }
    }
}

impl MarketParameters {
    pub fn validate(&self) -> Result<()> {
        positive_factor("cost_ratio", self.cost_ratio)?;
        positive_factor("so_premium", self.so_premium)?;
        positive_factor("gtam_premium", self.gtam_premium)?;
        positive_factor("bid_discount", self.bid_discount)?;
        jitter("dam_jitter", self.dam_jitter)?;
        jitter("rtm_jitter", self.rtm_jitter)?;

        volume_range("dam_volume", self.dam_volume)?;
        volume_range("rtm_volume", self.rtm_volume)?;
        volume_range("gtam_volume", self.gtam_volume)?;
        volume_range("so_up_regulation", self.so_up_regulation)?;
        volume_range("so_down_regulation", self.so_down_regulation)?;

        let thresholds = &self.risk_cv_thresholds;
        if thresholds.iter().any(|t| !t.is_finite()) || thresholds.windows(2).any(|w| w[0] >= w[1])
        {
            return Err(EvaluationError::InvalidParameter {
                name: "risk_cv_thresholds",
                reason: format!("must be finite and strictly increasing, got {thresholds:?}"),
            });
        }
        if self.risk_scores.iter().any(|s| !s.is_finite()) {
            return Err(EvaluationError::InvalidParameter {
                name: "risk_scores",
                reason: format!("must be finite, got {:?}", self.risk_scores),
            });
        }

        finite("confidence_base", self.confidence_base)?;
        positive_factor("confidence_span", self.confidence_span)?;
        finite("spread_alert_threshold", self.spread_alert_threshold)?;
        finite("risk_alert_threshold", self.risk_alert_threshold)?;

        Ok(())
    }
}

fn finite(name: &'static str, value: f64) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(EvaluationError::InvalidParameter {
            name,
            reason: format!("must be finite, got {value}"),
        })
    }
}

fn positive_factor(name: &'static str, value: f64) -> Result<()> {
    finite(name, value)?;
    if value > 0.0 {
        Ok(())
    } else {
        Err(EvaluationError::InvalidParameter {
            name,
            reason: format!("must be positive, got {value}"),
        })
    }
}

fn jitter(name: &'static str, value: f64) -> Result<()> {
    finite(name, value)?;
    if (0.0..1.0).contains(&value) {
        Ok(())
    } else {
        Err(EvaluationError::InvalidParameter {
            name,
            reason: format!("must be within [0, 1), got {value}"),
        })
    }
}

fn volume_range(name: &'static str, range: VolumeRange) -> Result<()> {
    if range.min < range.max {
        Ok(())
    } else {
        Err(EvaluationError::InvalidParameter {
            name,
            reason: format!("empty range [{}, {})", range.min, range.max),
        })
    }
}
