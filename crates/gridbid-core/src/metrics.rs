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

//! Aggregate financial and risk metrics over generated curves.
//!
//! Revenue, cost and the optimal bid are derived from the DAM curve only;
//! RTM contributes the average used for the DAM-RTM spread. Per-market
//! summaries cover all four curves.

use crate::error::{EvaluationError, Result};
use crate::parameters::MarketParameters;
use gridbid_types::{
    EvaluationMetrics, MarketCurves, MarketDataPoint, MarketSummary, MarketType,
    OptimizationConfig,
};
use rand::Rng;

/// Arithmetic mean, `0.0` for an empty slice
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Population standard deviation (divides by N)
pub fn std_dev(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let avg = mean(values);
    let variance = values.iter().map(|v| (v - avg).powi(2)).sum::<f64>() / values.len() as f64;
    variance.sqrt()
}

/// Coefficient of variation in percent.
///
/// Returns `0.0` when the mean is zero instead of dividing by it. Tiny but
/// non-zero means are divided normally.
pub fn coefficient_of_variation(values: &[f64]) -> f64 {
    let avg = mean(values);
    if avg.abs() < f64::MIN_POSITIVE {
        return 0.0;
    }
    std_dev(values) / avg * 100.0
}

/// Map a coefficient of variation onto the stepped risk score.
///
/// With default parameters: CV < 10 -> 20, < 20 -> 40, < 30 -> 60, else 80.
pub fn risk_score_for_cv(cv: f64, params: &MarketParameters) -> f64 {
    params
        .risk_cv_thresholds
        .iter()
        .position(|threshold| cv < *threshold)
        .map_or(params.risk_scores[3], |band| params.risk_scores[band])
}

fn prices(curve: &[MarketDataPoint]) -> Vec<f64> {
    curve.iter().map(|p| p.price).collect()
}

fn non_empty(curve: &[MarketDataPoint], market: MarketType) -> Result<&[MarketDataPoint]> {
    if curve.is_empty() {
        Err(EvaluationError::EmptyCurve(market))
    } else {
        Ok(curve)
    }
}

/// Derive the evaluation metrics.
///
/// `rng` supplies the random part of the confidence level, which lies in
/// `[confidence_base, confidence_base + confidence_span)`.
pub fn calculate_metrics<R: Rng + ?Sized>(
    curves: &MarketCurves,
    params: &MarketParameters,
    rng: &mut R,
) -> Result<EvaluationMetrics> {
    let dam = non_empty(&curves.dam_data, MarketType::Dam)?;
    let rtm = non_empty(&curves.rtm_data, MarketType::Rtm)?;

    let dam_prices = prices(dam);
    let avg_dam_price = mean(&dam_prices);
    let avg_rtm_price = mean(&prices(rtm));

    let total_volume: f64 = dam.iter().map(|p| f64::from(p.volume.unwrap_or(0))).sum();
    let total_revenue = total_volume * avg_dam_price;
    let total_cost = total_revenue * params.cost_ratio;
    let profit = total_revenue - total_cost;

    let profit_margin = if total_revenue.abs() < f64::MIN_POSITIVE {
        0.0
    } else {
        profit / total_revenue * 100.0
    };

    let cv = coefficient_of_variation(&dam_prices);
    let confidence_level = params.confidence_base + rng.gen_range(0.0..params.confidence_span);

    Ok(EvaluationMetrics {
        total_revenue,
        total_cost,
        profit,
        profit_margin,
        avg_dam_price,
        avg_rtm_price,
        dam_rtm_spread: avg_rtm_price - avg_dam_price,
        optimal_bid_price: avg_dam_price * params.bid_discount,
        risk_score: risk_score_for_cv(cv, params),
        confidence_level,
        total_volume,
    })
}

/// One summary per market in canonical order.
///
/// `avg_optimized_price` is the optimized bid for that market; points without
/// an optimized price fall back to their raw price.
pub fn summarize_markets(
    curves: &MarketCurves,
    config: &OptimizationConfig,
) -> Vec<MarketSummary> {
    MarketType::all()
        .iter()
        .map(|&market| {
            let curve = curves.curve(market);
            let raw = prices(curve);
            let optimized: Vec<f64> = curve
                .iter()
                .map(|p| p.optimized_price.unwrap_or(p.price))
                .collect();

            let (min_price, max_price) = if raw.is_empty() {
                (0.0, 0.0)
            } else {
                raw.iter()
                    .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &p| {
                        (lo.min(p), hi.max(p))
                    })
            };

            MarketSummary {
                market,
                selected: config.market_types.contains(&market),
                points: curve.len(),
                avg_price: mean(&raw),
                avg_optimized_price: mean(&optimized),
                min_price,
                max_price,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn point(price: f64, volume: Option<u32>) -> MarketDataPoint {
        let mut p = MarketDataPoint::new(Utc::now(), price);
        p.volume = volume;
        p
    }

    fn flat_curves(dam_price: f64, rtm_price: f64) -> MarketCurves {
        MarketCurves {
            dam_data: vec![point(dam_price, Some(100)); 4],
            rtm_data: vec![point(rtm_price, Some(50)); 8],
            so_data: vec![],
            gtam_data: vec![],
        }
    }

    #[test]
    fn test_basic_statistics() {
        let values = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert!((mean(&values) - 5.0).abs() < 0.001);
        assert!((std_dev(&values) - 2.0).abs() < 0.001);
        assert!((coefficient_of_variation(&values) - 40.0).abs() < 0.001);
        assert!(mean(&[]).abs() < f64::EPSILON);
    }

    #[test]
    fn test_cv_zero_when_mean_zero() {
        assert!(coefficient_of_variation(&[-1.0, 1.0]).abs() < f64::EPSILON);
        assert!(coefficient_of_variation(&[0.0, 0.0]).abs() < f64::EPSILON);
    }

    #[test]
    fn test_risk_score_steps() {
        let params = MarketParameters::default();
        let cases = [
            (5.0, 20.0),
            (9.999, 20.0),
            (10.0, 40.0),
            (15.0, 40.0),
            (19.999, 40.0),
            (20.0, 60.0),
            (25.0, 60.0),
            (29.999, 60.0),
            (30.0, 80.0),
            (35.0, 80.0),
        ];
        for (cv, expected) in cases {
            assert!(
                (risk_score_for_cv(cv, &params) - expected).abs() < f64::EPSILON,
                "cv {cv}"
            );
        }
    }

    #[test]
    fn test_financial_identities() {
        let params = MarketParameters::default();
        let mut rng = StdRng::seed_from_u64(1);
        let metrics = calculate_metrics(&flat_curves(5.0, 5.5), &params, &mut rng).unwrap();

        assert!((metrics.total_volume - 400.0).abs() < 0.001);
        assert!((metrics.total_revenue - 2000.0).abs() < 0.001);
        assert!((metrics.total_cost - metrics.total_revenue * 0.85).abs() < 0.001);
        assert!((metrics.profit - (metrics.total_revenue - metrics.total_cost)).abs() < 0.001);
        assert!((metrics.profit_margin - 15.0).abs() < 0.001);
        assert!((metrics.dam_rtm_spread - 0.5).abs() < 0.001);
        assert!((metrics.optimal_bid_price - 4.75).abs() < 0.001);
        // flat prices have no dispersion
        assert!((metrics.risk_score - 20.0).abs() < f64::EPSILON);
        assert!((85.0..95.0).contains(&metrics.confidence_level));
    }

    #[test]
    fn test_zero_revenue_margin() {
        let mut curves = flat_curves(5.0, 5.0);
        for p in &mut curves.dam_data {
            p.volume = None;
        }
        let mut rng = StdRng::seed_from_u64(1);
        let metrics = calculate_metrics(&curves, &MarketParameters::default(), &mut rng).unwrap();

        assert!(metrics.total_revenue.abs() < f64::EPSILON);
        assert!(metrics.profit_margin.abs() < f64::EPSILON);
        assert!(metrics.profit_margin.is_finite());
    }

    #[test]
    fn test_tiny_prices_keep_their_dispersion() {
        let mut curves = flat_curves(1e-19, 1e-19);
        curves.dam_data = vec![point(1e-19, Some(100)), point(3e-19, Some(100))];

        assert!((coefficient_of_variation(&[1e-19, 3e-19]) - 50.0).abs() < 1e-9);

        let mut rng = StdRng::seed_from_u64(1);
        let metrics = calculate_metrics(&curves, &MarketParameters::default(), &mut rng).unwrap();
        assert!((metrics.risk_score - 80.0).abs() < f64::EPSILON);
        assert!((metrics.profit_margin - 15.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty_curves_rejected() {
        let params = MarketParameters::default();
        let mut rng = StdRng::seed_from_u64(1);

        let mut no_dam = flat_curves(5.0, 5.0);
        no_dam.dam_data.clear();
        assert!(matches!(
            calculate_metrics(&no_dam, &params, &mut rng),
            Err(EvaluationError::EmptyCurve(MarketType::Dam))
        ));

        let mut no_rtm = flat_curves(5.0, 5.0);
        no_rtm.rtm_data.clear();
        assert!(matches!(
            calculate_metrics(&no_rtm, &params, &mut rng),
            Err(EvaluationError::EmptyCurve(MarketType::Rtm))
        ));
    }

    #[test]
    fn test_metrics_are_idempotent_with_fixed_seed() {
        let curves = flat_curves(4.2, 4.9);
        let params = MarketParameters::default();

        let a = calculate_metrics(&curves, &params, &mut StdRng::seed_from_u64(9)).unwrap();
        let b = calculate_metrics(&curves, &params, &mut StdRng::seed_from_u64(9)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_summaries_cover_every_market() {
        let mut curves = flat_curves(4.0, 6.0);
        curves.dam_data[0].price = 2.0;
        curves.dam_data[0].optimized_price = Some(1.9);
        let config = OptimizationConfig {
            market_types: vec![MarketType::Dam, MarketType::Rtm],
            ..Default::default()
        };

        let summaries = summarize_markets(&curves, &config);

        assert_eq!(summaries.len(), 4);
        let dam = &summaries[0];
        assert_eq!(dam.market, MarketType::Dam);
        assert!(dam.selected);
        assert_eq!(dam.points, 4);
        assert!((dam.min_price - 2.0).abs() < f64::EPSILON);
        assert!((dam.max_price - 4.0).abs() < f64::EPSILON);
        assert!((dam.avg_optimized_price - (1.9 + 12.0) / 4.0).abs() < 0.001);

        let so = &summaries[2];
        assert!(!so.selected);
        assert_eq!(so.points, 0);
        assert!(so.avg_price.abs() < f64::EPSILON);
    }
}
