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

pub mod config;
pub mod dataset;
pub mod market;
pub mod results;

// Re-export common types for convenience
pub use config::{Constraint, Objective, OptimizationConfig, RiskTolerance};
pub use dataset::{CanonicalField, CanonicalRow, CellValue, ColumnMapping, DatasetRow};
pub use market::{MarketCurves, MarketDataPoint, MarketType};
pub use results::{
    EvaluationMetrics, EvaluationResults, EvaluationStatus, MarketSummary, Priority,
    Recommendation, RecommendationType,
};
