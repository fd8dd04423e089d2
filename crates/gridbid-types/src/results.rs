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

use crate::config::OptimizationConfig;
use crate::market::{MarketCurves, MarketType};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Aggregate financial and risk figures of one evaluation.
/// `Default` is the all-zero record reported for failed evaluations.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EvaluationMetrics {
    #[serde(rename = "totalRevenue")]
    pub total_revenue: f64,
    #[serde(rename = "totalCost")]
    pub total_cost: f64,
    pub profit: f64,
    /// Profit as a percentage of revenue
    #[serde(rename = "profitMargin")]
    pub profit_margin: f64,
    #[serde(rename = "avgDAMPrice")]
    pub avg_dam_price: f64,
    #[serde(rename = "avgRTMPrice")]
    pub avg_rtm_price: f64,
    /// Average RTM price minus average DAM price
    #[serde(rename = "damRTMSpread")]
    pub dam_rtm_spread: f64,
    #[serde(rename = "optimalBidPrice")]
    pub optimal_bid_price: f64,
    /// Step-mapped volatility score (20, 40, 60 or 80)
    #[serde(rename = "riskScore")]
    pub risk_score: f64,
    /// Confidence in the evaluation (85-95%)
    #[serde(rename = "confidenceLevel")]
    pub confidence_level: f64,
    /// Sum of DAM volumes (MWh)
    #[serde(rename = "totalVolume")]
    pub total_volume: f64,
}

/// Per-market price statistics, including the optimized bid for that market
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketSummary {
    pub market: MarketType,
    /// Whether the market is part of the configured market selection
    pub selected: bool,
    pub points: usize,
    pub avg_price: f64,
    /// Average optimized price, the suggested bid for this market
    pub avg_optimized_price: f64,
    pub min_price: f64,
    pub max_price: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationType {
    BidStrategy,
    Timing,
    MarketSelection,
    RiskManagement,
}

impl fmt::Display for RecommendationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::BidStrategy => "bid strategy",
            Self::Timing => "timing",
            Self::MarketSelection => "market selection",
            Self::RiskManagement => "risk management",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::High => f.write_str("high"),
            Self::Medium => f.write_str("medium"),
            Self::Low => f.write_str("low"),
        }
    }
}

/// One actionable recommendation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    #[serde(rename = "type")]
    pub recommendation_type: RecommendationType,
    pub priority: Priority,
    pub title: String,
    pub description: String,
    pub expected_impact: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EvaluationStatus {
    Running,
    Completed,
    Failed,
}

impl EvaluationStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Failed)
    }
}

/// Terminal artifact of one evaluation request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluationResults {
    pub id: Uuid,
    pub status: EvaluationStatus,
    pub created_at: DateTime<Utc>,
    /// Set only for completed evaluations
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<u64>,
    pub config: OptimizationConfig,
    #[serde(flatten)]
    pub curves: MarketCurves,
    pub metrics: EvaluationMetrics,
    #[serde(default)]
    pub market_summaries: Vec<MarketSummary>,
    pub recommendations: Vec<Recommendation>,
    /// Narrative summary, present only when requested
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ai_insights: Option<String>,
    /// Diagnostic message of a failed evaluation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl EvaluationResults {
    /// Well-formed failed result: empty curves, all-zero metrics, no recommendations
    pub fn failed(
        id: Uuid,
        created_at: DateTime<Utc>,
        config: OptimizationConfig,
        error: impl Into<String>,
    ) -> Self {
        Self {
            id,
            status: EvaluationStatus::Failed,
            created_at,
            completed_at: None,
            duration_ms: None,
            config,
            curves: MarketCurves::default(),
            metrics: EvaluationMetrics::default(),
            market_summaries: Vec::new(),
            recommendations: Vec::new(),
            ai_insights: None,
            error: Some(error.into()),
        }
    }

    pub fn is_completed(&self) -> bool {
        self.status == EvaluationStatus::Completed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_wire_names() {
        let json = serde_json::to_value(EvaluationMetrics::default()).unwrap();
        for key in [
            "totalRevenue",
            "totalCost",
            "profit",
            "profitMargin",
            "avgDAMPrice",
            "avgRTMPrice",
            "damRTMSpread",
            "optimalBidPrice",
            "riskScore",
            "confidenceLevel",
            "totalVolume",
        ] {
            assert_eq!(json[key], 0.0, "missing or non-zero {key}");
        }
    }

    #[test]
    fn test_failed_result_shape() {
        let results = EvaluationResults::failed(
            Uuid::new_v4(),
            Utc::now(),
            OptimizationConfig::default(),
            "boom",
        );

        assert_eq!(results.status, EvaluationStatus::Failed);
        assert!(results.status.is_terminal());
        assert!(results.curves.is_empty());
        assert_eq!(results.metrics, EvaluationMetrics::default());
        assert!(results.completed_at.is_none());

        let json = serde_json::to_value(&results).unwrap();
        assert_eq!(json["status"], "failed");
        assert_eq!(json["damData"].as_array().map(Vec::len), Some(0));
        assert_eq!(json["rtmData"].as_array().map(Vec::len), Some(0));
        assert_eq!(json["error"], "boom");
    }

    #[test]
    fn test_recommendation_type_field() {
        let rec = Recommendation {
            recommendation_type: RecommendationType::MarketSelection,
            priority: Priority::Low,
            title: "t".to_owned(),
            description: "d".to_owned(),
            expected_impact: "i".to_owned(),
        };
        let json = serde_json::to_value(&rec).unwrap();
        assert_eq!(json["type"], "market_selection");
        assert_eq!(json["priority"], "low");
        assert_eq!(json["expectedImpact"], "i");
    }
}
