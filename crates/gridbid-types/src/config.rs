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

use crate::market::MarketType;
use serde::{Deserialize, Serialize};
use std::fmt;

/// What the bid optimizer is trying to achieve
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Objective {
    MaximizeRevenue,
    MinimizeCost,
    #[default]
    MaximizeProfit,
    MinimizeRisk,
    /// No objective-specific adjustment
    Custom,
}

impl Objective {
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::MaximizeRevenue => "Maximize revenue",
            Self::MinimizeCost => "Minimize cost",
            Self::MaximizeProfit => "Maximize profit",
            Self::MinimizeRisk => "Minimize risk",
            Self::Custom => "Custom",
        }
    }

    pub fn all() -> &'static [Objective] {
        &[
            Self::MaximizeRevenue,
            Self::MinimizeCost,
            Self::MaximizeProfit,
            Self::MinimizeRisk,
            Self::Custom,
        ]
    }
}

impl fmt::Display for Objective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RiskTolerance {
    Low,
    #[default]
    Medium,
    High,
}

impl fmt::Display for RiskTolerance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Low => f.write_str("low"),
            Self::Medium => f.write_str("medium"),
            Self::High => f.write_str("high"),
        }
    }
}

/// User-declared constraint. Accepted and echoed, never enforced by the optimizer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Constraint {
    #[serde(rename = "type")]
    pub constraint_type: String,
    pub value: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Per-evaluation optimization settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimizationConfig {
    /// Free-form model label chosen by the user (e.g. "ensemble")
    #[serde(default = "default_model_type")]
    pub model_type: String,

    #[serde(default)]
    pub objective: Objective,

    /// Markets the user intends to trade in
    #[serde(default = "default_market_types")]
    pub market_types: Vec<MarketType>,

    /// Free-form horizon label (e.g. "day_ahead", "week")
    #[serde(default = "default_time_horizon")]
    pub time_horizon: String,

    #[serde(default)]
    pub risk_tolerance: RiskTolerance,

    #[serde(default)]
    pub constraints: Vec<Constraint>,

    /// Request a narrative summary from the text-generation service
    #[serde(rename = "useAI", default)]
    pub use_ai: bool,

    /// Seed for curve jitter and confidence scoring. `None` seeds from entropy.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

fn default_model_type() -> String {
    "ensemble".to_owned()
}

fn default_market_types() -> Vec<MarketType> {
    MarketType::all().to_vec()
}

fn default_time_horizon() -> String {
    "day_ahead".to_owned()
}

impl Default for OptimizationConfig {
    fn default() -> Self {
        Self {
            model_type: default_model_type(),
            objective: Objective::default(),
            market_types: default_market_types(),
            time_horizon: default_time_horizon(),
            risk_tolerance: RiskTolerance::default(),
            constraints: Vec::new(),
            use_ai: false,
            seed: None,
        }
    }
}
