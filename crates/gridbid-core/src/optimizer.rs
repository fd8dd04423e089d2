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

//! Objective and risk driven bid price adjustment.
//!
//! The optimized price is `price x objective multiplier x risk multiplier`.
//! Everything here is pure, so curves can be optimized in any order.

use gridbid_types::{
    MarketCurves, MarketDataPoint, MarketType, Objective, OptimizationConfig, RiskTolerance,
};

/// Objective adjustment.
///
/// Sellers bid slightly under market to raise fill probability; the
/// cost-minimizing buyer bids slightly over.
pub fn objective_multiplier(objective: Objective) -> f64 {
    match objective {
        Objective::MaximizeRevenue => 0.98,
        Objective::MinimizeCost => 1.02,
        Objective::MaximizeProfit => 0.95,
        Objective::MinimizeRisk => 0.92,
        Objective::Custom => 1.0,
    }
}

pub fn risk_multiplier(risk_tolerance: RiskTolerance) -> f64 {
    match risk_tolerance {
        RiskTolerance::Low => 0.95,
        RiskTolerance::Medium => 1.0,
        RiskTolerance::High => 1.05,
    }
}

/// Optimized bid for a single raw price.
///
/// `_market` is accepted so per-market rules can be added without changing
/// call sites; it does not currently affect the result.
pub fn optimize_price(price: f64, config: &OptimizationConfig, _market: MarketType) -> f64 {
    price * objective_multiplier(config.objective) * risk_multiplier(config.risk_tolerance)
}

/// Populate `optimized_price` on every point of one curve
pub fn optimize_curve(
    curve: &mut [MarketDataPoint],
    config: &OptimizationConfig,
    market: MarketType,
) {
    for point in curve {
        point.optimized_price = Some(optimize_price(point.price, config, market));
    }
}

pub fn optimize_curves(curves: &mut MarketCurves, config: &OptimizationConfig) {
    for &market in MarketType::all() {
        optimize_curve(curves.curve_mut(market), config, market);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn config(objective: Objective, risk_tolerance: RiskTolerance) -> OptimizationConfig {
        OptimizationConfig {
            objective,
            risk_tolerance,
            ..Default::default()
        }
    }

    #[test]
    fn test_objective_table_at_medium_risk() {
        let expected = [
            (Objective::MaximizeRevenue, 0.98),
            (Objective::MinimizeCost, 1.02),
            (Objective::MaximizeProfit, 0.95),
            (Objective::MinimizeRisk, 0.92),
            (Objective::Custom, 1.0),
        ];

        for (objective, multiplier) in expected {
            let cfg = config(objective, RiskTolerance::Medium);
            for market in MarketType::all() {
                let optimized = optimize_price(5.0, &cfg, *market);
                assert!(
                    (optimized - 5.0 * multiplier).abs() < 1e-12,
                    "{objective:?} on {market}"
                );
            }
        }
    }

    #[test]
    fn test_risk_tolerance_composes() {
        let low_cfg = config(Objective::MaximizeProfit, RiskTolerance::Low);
        let high_cfg = config(Objective::MaximizeProfit, RiskTolerance::High);

        let low = optimize_price(10.0, &low_cfg, MarketType::Dam);
        let high = optimize_price(10.0, &high_cfg, MarketType::Dam);

        assert!((low - 10.0 * 0.95 * 0.95).abs() < 1e-12);
        assert!((high - 10.0 * 0.95 * 1.05).abs() < 1e-12);
    }

    #[test]
    fn test_custom_medium_is_identity() {
        let cfg = config(Objective::Custom, RiskTolerance::Medium);
        assert!((optimize_price(3.3, &cfg, MarketType::Gtam) - 3.3).abs() < f64::EPSILON);
    }

    #[test]
    fn test_optimize_curves_fills_every_point() {
        let now = Utc::now();
        let mut curves = MarketCurves {
            dam_data: vec![MarketDataPoint::new(now, 4.0)],
            rtm_data: vec![MarketDataPoint::new(now, 4.4); 3],
            so_data: vec![MarketDataPoint::new(now, 4.8)],
            gtam_data: vec![],
        };
        let cfg = config(Objective::MinimizeRisk, RiskTolerance::Low);

        optimize_curves(&mut curves, &cfg);

        for market in MarketType::all() {
            for point in curves.curve(*market) {
                let expected = point.price * 0.92 * 0.95;
                assert!((point.optimized_price.unwrap() - expected).abs() < 1e-12);
            }
        }
        // raw prices untouched
        assert!((curves.dam_data[0].price - 4.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_reoptimizing_is_stable() {
        let mut curve = vec![MarketDataPoint::new(Utc::now(), 6.0)];
        let cfg = config(Objective::MaximizeRevenue, RiskTolerance::High);

        optimize_curve(&mut curve, &cfg, MarketType::Dam);
        let first = curve[0].optimized_price;
        optimize_curve(&mut curve, &cfg, MarketType::Dam);

        assert_eq!(curve[0].optimized_price, first);
    }
}
