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

//! End-to-end evaluation runs through the public orchestrator API

use async_trait::async_trait;
use gridbid_core::{
    Evaluator, MarketParameters, NARRATIVE_FAILED, NARRATIVE_UNAVAILABLE, NarrativeError,
    NarrativeSummarizer, TextGenerator,
};
use gridbid_types::{
    CanonicalField, ColumnMapping, DatasetRow, EvaluationMetrics, EvaluationStatus, MarketType,
    Objective, OptimizationConfig, Priority, RecommendationType, RiskTolerance,
};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

struct CountingGenerator {
    calls: AtomicUsize,
}

#[async_trait]
impl TextGenerator for CountingGenerator {
    async fn generate(&self, prompt: &str, _model: &str) -> Result<String, NarrativeError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        assert!(prompt.contains("Recommendations:"));
        Ok("Evening peak dominates the day.".to_owned())
    }
}

struct BrokenGenerator;

#[async_trait]
impl TextGenerator for BrokenGenerator {
    async fn generate(&self, _prompt: &str, _model: &str) -> Result<String, NarrativeError> {
        Err(NarrativeError::Request("connection refused".to_owned()))
    }
}

fn seeded(seed: u64) -> OptimizationConfig {
    OptimizationConfig {
        seed: Some(seed),
        ..Default::default()
    }
}

fn hourly_dataset(price: f64) -> (Vec<DatasetRow>, Vec<ColumnMapping>) {
    let rows = (0..24)
        .map(|hour| {
            DatasetRow::new()
                .with("Hour", f64::from(hour))
                .with("MCP", price)
        })
        .collect();
    let mappings = vec![
        ColumnMapping::new("Hour", CanonicalField::Hour),
        ColumnMapping::new("MCP", CanonicalField::DamPrice),
    ];
    (rows, mappings)
}

#[tokio::test]
async fn test_empty_dataset_uses_baseline() {
    let results = Evaluator::default().evaluate(&[], &[], &seeded(1)).await;

    assert_eq!(results.status, EvaluationStatus::Completed);
    assert!(results.error.is_none());
    assert_eq!(results.curves.dam_data.len(), 24);
    assert_eq!(results.curves.rtm_data.len(), 288);
    assert_eq!(results.curves.so_data.len(), 24);
    assert_eq!(results.curves.gtam_data.len(), 24);
    assert!(results.duration_ms.is_some());

    for market in MarketType::all() {
        assert!(
            results
                .curves
                .curve(*market)
                .iter()
                .all(|p| p.optimized_price.is_some())
        );
    }

    let metrics = &results.metrics;
    assert!(metrics.avg_dam_price > 0.0);
    assert!((metrics.total_cost - metrics.total_revenue * 0.85).abs() < 0.001);
    assert!((85.0..95.0).contains(&metrics.confidence_level));
    assert!(
        results
            .recommendations
            .iter()
            .any(|r| r.recommendation_type == RecommendationType::Timing)
    );
}

#[tokio::test]
async fn test_supplied_prices_drive_metrics() {
    let (rows, mappings) = hourly_dataset(5.0);
    let config = OptimizationConfig {
        objective: Objective::MaximizeRevenue,
        risk_tolerance: RiskTolerance::High,
        ..seeded(2)
    };

    let results = Evaluator::default().evaluate(&rows, &mappings, &config).await;

    assert_eq!(results.status, EvaluationStatus::Completed);
    let metrics = &results.metrics;
    assert!((metrics.avg_dam_price - 5.0).abs() < 1e-9);
    assert!((metrics.optimal_bid_price - 4.75).abs() < 1e-9);
    assert!((metrics.risk_score - 20.0).abs() < f64::EPSILON);
    assert!((metrics.profit_margin - 15.0).abs() < 0.001);

    let dam = &results.curves.dam_data;
    assert!(dam.iter().all(|p| p.actual_price == Some(5.0)));
    let expected_bid = 5.0 * 0.98 * 1.05;
    assert!((dam[0].optimized_price.unwrap() - expected_bid).abs() < 1e-9);
}

#[tokio::test]
async fn test_non_finite_premium_fails() {
    let evaluator = Evaluator::new(
        MarketParameters {
            so_premium: f64::NAN,
            ..Default::default()
        },
        NarrativeSummarizer::disabled(),
    );

    let results = evaluator.evaluate(&[], &[], &seeded(3)).await;

    assert_eq!(results.status, EvaluationStatus::Failed);
    assert_eq!(results.metrics, EvaluationMetrics::default());
    assert!(results.curves.is_empty());
    assert!(results.recommendations.is_empty());
    assert!(results.completed_at.is_none());
    assert!(results.error.unwrap().contains("so_premium"));
}

#[tokio::test]
async fn test_non_numeric_price_fails() {
    let rows = vec![DatasetRow::new().with("MCP", "n/a")];
    let mappings = vec![ColumnMapping::new("MCP", CanonicalField::DamPrice)];

    let results = Evaluator::default()
        .evaluate(&rows, &mappings, &seeded(4))
        .await;

    assert_eq!(results.status, EvaluationStatus::Failed);
    assert_eq!(results.metrics, EvaluationMetrics::default());
    assert!(results.market_summaries.is_empty());
}

#[tokio::test]
async fn test_same_seed_reproduces_run() {
    let evaluator = Evaluator::default();
    let a = evaluator.evaluate(&[], &[], &seeded(42)).await;
    let b = evaluator.evaluate(&[], &[], &seeded(42)).await;

    assert_ne!(a.id, b.id);
    assert_eq!(a.metrics, b.metrics);

    let prices = |r: &gridbid_types::EvaluationResults| -> Vec<f64> {
        r.curves.rtm_data.iter().map(|p| p.price).collect()
    };
    assert_eq!(prices(&a), prices(&b));
}

#[tokio::test]
async fn test_narrative_only_when_requested() {
    let generator = Arc::new(CountingGenerator {
        calls: AtomicUsize::new(0),
    });
    let evaluator = Evaluator::new(
        MarketParameters::default(),
        NarrativeSummarizer::new(generator.clone(), "test-model"),
    );

    let without = evaluator.evaluate(&[], &[], &seeded(5)).await;
    assert!(without.ai_insights.is_none());
    assert_eq!(generator.calls.load(Ordering::SeqCst), 0);

    let config = OptimizationConfig {
        use_ai: true,
        ..seeded(5)
    };
    let with = evaluator.evaluate(&[], &[], &config).await;
    assert_eq!(
        with.ai_insights.as_deref(),
        Some("Evening peak dominates the day.")
    );
    assert_eq!(generator.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_narrative_unavailable_without_generator() {
    let config = OptimizationConfig {
        use_ai: true,
        ..seeded(6)
    };
    let results = Evaluator::default().evaluate(&[], &[], &config).await;

    assert_eq!(results.status, EvaluationStatus::Completed);
    assert_eq!(results.ai_insights.as_deref(), Some(NARRATIVE_UNAVAILABLE));
}

#[tokio::test]
async fn test_narrative_failure_keeps_completed_status() {
    let evaluator = Evaluator::new(
        MarketParameters::default(),
        NarrativeSummarizer::new(Arc::new(BrokenGenerator), "test-model"),
    );
    let config = OptimizationConfig {
        use_ai: true,
        ..seeded(7)
    };

    let results = evaluator.evaluate(&[], &[], &config).await;

    assert_eq!(results.status, EvaluationStatus::Completed);
    assert_eq!(results.ai_insights.as_deref(), Some(NARRATIVE_FAILED));
    assert!(results.error.is_none());
}

#[tokio::test]
async fn test_dam_only_profit_medium_run() {
    let config = OptimizationConfig {
        market_types: vec![MarketType::Dam],
        objective: Objective::MaximizeProfit,
        risk_tolerance: RiskTolerance::Medium,
        ..seeded(12)
    };
    let results = Evaluator::default().evaluate(&[], &[], &config).await;

    assert_eq!(results.status, EvaluationStatus::Completed);
    assert!(results.error.is_none());

    let dam = &results.curves.dam_data;
    assert_eq!(dam.len(), 24);
    for point in dam {
        assert!((point.optimized_price.unwrap() - point.price * 0.95).abs() < 1e-9);
    }

    let selected: Vec<MarketType> = results
        .market_summaries
        .iter()
        .filter(|s| s.selected)
        .map(|s| s.market)
        .collect();
    assert_eq!(selected, vec![MarketType::Dam]);

    let last = results.recommendations.last().unwrap();
    assert_eq!(last.recommendation_type, RecommendationType::MarketSelection);
    assert_eq!(last.priority, Priority::Low);
    assert!(last.description.contains("RTM, SO, GTAM"));
    assert!(
        results
            .recommendations
            .iter()
            .any(|r| r.recommendation_type == RecommendationType::Timing)
    );
}

#[tokio::test]
async fn test_two_markets_get_selection_hint() {
    let config = OptimizationConfig {
        market_types: vec![MarketType::Dam, MarketType::Rtm],
        ..seeded(8)
    };
    let results = Evaluator::default().evaluate(&[], &[], &config).await;

    let summaries: Vec<(MarketType, bool)> = results
        .market_summaries
        .iter()
        .map(|s| (s.market, s.selected))
        .collect();
    assert_eq!(
        summaries,
        vec![
            (MarketType::Dam, true),
            (MarketType::Rtm, true),
            (MarketType::So, false),
            (MarketType::Gtam, false),
        ]
    );
    assert!(
        results
            .recommendations
            .iter()
            .any(|r| r.recommendation_type == RecommendationType::MarketSelection)
    );
}

#[tokio::test]
async fn test_results_serialize_with_wire_names() {
    let results = Evaluator::default().evaluate(&[], &[], &seeded(9)).await;
    let json = serde_json::to_value(&results).unwrap();

    assert_eq!(json["status"], "completed");
    assert_eq!(json["damData"].as_array().unwrap().len(), 24);
    assert_eq!(json["rtmData"].as_array().unwrap().len(), 288);
    assert!(json["metrics"]["avgDAMPrice"].is_number());
    assert!(json["config"]["useAI"].is_boolean());
}
