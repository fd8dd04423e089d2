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

//! Rule-based recommendations.
//!
//! Rules are evaluated in a fixed order and every rule that fires appends one
//! recommendation. The output is never re-sorted or deduplicated.

use crate::parameters::MarketParameters;
use gridbid_types::{
    EvaluationMetrics, MarketType, OptimizationConfig, Priority, Recommendation,
    RecommendationType,
};

/// Below this many selected markets a diversification hint is emitted
const MIN_DIVERSIFIED_MARKETS: usize = 3;

pub fn generate_recommendations(
    metrics: &EvaluationMetrics,
    config: &OptimizationConfig,
    params: &MarketParameters,
) -> Vec<Recommendation> {
    let mut recommendations = Vec::new();

    if metrics.dam_rtm_spread > params.spread_alert_threshold {
        recommendations.push(spread_arbitrage(metrics));
    }

    recommendations.push(peak_timing());

    if metrics.risk_score > params.risk_alert_threshold {
        recommendations.push(risk_hedging(metrics));
    }

    if config.market_types.len() < MIN_DIVERSIFIED_MARKETS {
        recommendations.push(market_diversification(&config.market_types));
    }

    recommendations
}

fn spread_arbitrage(metrics: &EvaluationMetrics) -> Recommendation {
    let spread_pct = if metrics.avg_dam_price.abs() < f64::MIN_POSITIVE {
        0.0
    } else {
        metrics.dam_rtm_spread / metrics.avg_dam_price * 100.0
    };

    Recommendation {
        recommendation_type: RecommendationType::BidStrategy,
        priority: Priority::High,
        title: "Exploit DAM-RTM price spread".to_owned(),
        description: format!(
            "Real-time prices average {:.2} Rs/kWh above day-ahead. Shift flexible \
             volume from DAM into RTM to capture the difference.",
            metrics.dam_rtm_spread
        ),
        expected_impact: format!("{spread_pct:.1}% higher realized price on shifted volume"),
    }
}

fn peak_timing() -> Recommendation {
    Recommendation {
        recommendation_type: RecommendationType::Timing,
        priority: Priority::Medium,
        title: "Concentrate bids in peak windows".to_owned(),
        description: "Prices peak between 08:00-10:00 and 18:00-21:00. Schedule \
                      dispatchable capacity for these windows."
            .to_owned(),
        expected_impact: "Higher average clearing price on peak volume".to_owned(),
    }
}

fn risk_hedging(metrics: &EvaluationMetrics) -> Recommendation {
    Recommendation {
        recommendation_type: RecommendationType::RiskManagement,
        priority: Priority::High,
        title: "Hedge against price volatility".to_owned(),
        description: format!(
            "Risk score {:.0} indicates volatile day-ahead prices. Lock part of the \
             volume in term-ahead contracts and cap exposure in real time.",
            metrics.risk_score
        ),
        expected_impact: "Lower revenue variance".to_owned(),
    }
}

fn market_diversification(selected: &[MarketType]) -> Recommendation {
    let unused: Vec<&str> = MarketType::all()
        .iter()
        .filter(|market| !selected.contains(market))
        .map(MarketType::code)
        .collect();

    Recommendation {
        recommendation_type: RecommendationType::MarketSelection,
        priority: Priority::Low,
        title: "Diversify across markets".to_owned(),
        description: format!(
            "Only {} market(s) selected. Consider adding {}.",
            selected.len(),
            unused.join(", ")
        ),
        expected_impact: "Reduced concentration risk and more bidding opportunities".to_owned(),
    }
}
