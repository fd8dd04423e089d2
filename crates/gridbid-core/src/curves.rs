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

//! Synthetic price curve generation for the four market mechanisms.
//!
//! All curves cover one day starting at midnight UTC and are keyed off the
//! same hourly DAM baseline:
//!
//! - **DAM**: 24 hourly points, dataset prices where supplied, jittered baseline otherwise
//! - **RTM**: 288 five-minute points around the baseline of their hour
//! - **SO**: 24 hourly points at a premium, with regulation capacities
//! - **GTAM**: 24 hourly points at a smaller premium

use crate::error::{EvaluationError, Result};
use crate::parameters::{MarketParameters, VolumeRange};
use chrono::{DateTime, Duration, NaiveDate, NaiveTime, TimeZone, Utc};
use gridbid_types::{CanonicalField, CanonicalRow, MarketCurves, MarketDataPoint, MarketType};
use rand::Rng;
use tracing::debug;

/// Hourly points per day for DAM, SO and GTAM
pub const HOURLY_POINTS: usize = 24;

/// Five-minute RTM blocks per day
pub const RTM_POINTS: usize = 288;

pub const RTM_BLOCK_MINUTES: usize = 5;

const RTM_BLOCKS_PER_HOUR: usize = 12;

/// Hourly DAM baseline (Rs/kWh).
///
/// Pattern:
/// - 00:00-05:00: ~2.9 (overnight low)
/// - 07:00-10:00: rising to the morning peak at 09:00
/// - 12:00-15:00: midday trough (solar surplus)
/// - 18:00-21:00: evening peak, highest of the day
/// - 22:00-23:00: late evening decline
pub const BASELINE_DAM_PRICES: [f64; HOURLY_POINTS] = [
    3.20, 3.00, 2.90, 2.80, 2.90, 3.30, // 00-05
    4.10, 5.20, 6.40, 6.90, 6.50, 5.60, // 06-11
    4.80, 4.50, 4.60, 5.00, 5.70, 6.60, // 12-17
    7.60, 8.20, 7.90, 6.80, 5.20, 4.00, // 18-23
];

/// Baseline DAM price for an hour of the day (wraps past 23)
pub fn baseline_price(hour: usize) -> f64 {
    BASELINE_DAM_PRICES[hour % HOURLY_POINTS]
}

fn day_start(day: NaiveDate) -> DateTime<Utc> {
    Utc.from_utc_datetime(&day.and_time(NaiveTime::MIN))
}

fn random_volume<R: Rng + ?Sized>(rng: &mut R, range: VolumeRange) -> u32 {
    rng.gen_range(range.min..range.max)
}

fn ensure_finite(market: MarketType, index: usize, price: f64) -> Result<f64> {
    if price.is_finite() {
        Ok(price)
    } else {
        Err(EvaluationError::NonFinitePrice { market, index })
    }
}

/// Dataset-supplied DAM price for an hour, if the row at that index carries one
fn supplied_dam_price(rows: &[CanonicalRow], hour: usize) -> Result<Option<f64>> {
    let Some(cell) = rows.get(hour).and_then(|row| row.get(CanonicalField::DamPrice)) else {
        return Ok(None);
    };

    cell.as_f64()
        .map(Some)
        .ok_or_else(|| EvaluationError::NonNumericValue {
            field: CanonicalField::DamPrice,
            row: hour,
            value: cell.to_string(),
        })
}

/// Generate the 24-point Day-Ahead curve.
///
/// Row `hour` of the mapped dataset supplies that hour's price when it has a
/// `dam_price`; such prices are used as-is and recorded as `actual_price`.
/// Otherwise the baseline is jittered by up to `dam_jitter` in either direction.
pub fn generate_dam<R: Rng + ?Sized>(
    rows: &[CanonicalRow],
    day: NaiveDate,
    params: &MarketParameters,
    rng: &mut R,
) -> Result<Vec<MarketDataPoint>> {
    let base_dt = day_start(day);
    let jitter = params.dam_jitter;

    (0..HOURLY_POINTS)
        .map(|hour| -> Result<MarketDataPoint> {
            let supplied = supplied_dam_price(rows, hour)?;
            let price = match supplied {
                Some(price) => price,
                None => baseline_price(hour) * (1.0 + rng.gen_range(-jitter..=jitter)),
            };

            let mut point = MarketDataPoint::new(
                base_dt + Duration::hours(hour as i64),
                ensure_finite(MarketType::Dam, hour, price)?,
            );
            point.actual_price = supplied;
            point.volume = Some(random_volume(rng, params.dam_volume));
            Ok(point)
        })
        .collect()
}

/// Generate the 288-point Real-Time curve.
///
/// Each 5-minute block deviates by up to `rtm_jitter` from the baseline of
/// its hour, which is also recorded as the block's `dam_price`.
pub fn generate_rtm<R: Rng + ?Sized>(
    day: NaiveDate,
    params: &MarketParameters,
    rng: &mut R,
) -> Result<Vec<MarketDataPoint>> {
    let base_dt = day_start(day);
    let jitter = params.rtm_jitter;

    (0..RTM_POINTS)
        .map(|block| -> Result<MarketDataPoint> {
            #[expect(clippy::integer_division)]
            let reference = baseline_price(block / RTM_BLOCKS_PER_HOUR);
            let price = reference * (1.0 + rng.gen_range(-jitter..=jitter));

            let mut point = MarketDataPoint::new(
                base_dt + Duration::minutes((block * RTM_BLOCK_MINUTES) as i64),
                ensure_finite(MarketType::Rtm, block, price)?,
            );
            point.dam_price = Some(reference);
            point.volume = Some(random_volume(rng, params.rtm_volume));
            Ok(point)
        })
        .collect()
}

/// Generate the 24-point System/Ancillary curve (baseline x `so_premium`).
pub fn generate_so<R: Rng + ?Sized>(
    day: NaiveDate,
    params: &MarketParameters,
    rng: &mut R,
) -> Result<Vec<MarketDataPoint>> {
    let base_dt = day_start(day);

    (0..HOURLY_POINTS)
        .map(|hour| -> Result<MarketDataPoint> {
            let price = baseline_price(hour) * params.so_premium;

            let mut point = MarketDataPoint::new(
                base_dt + Duration::hours(hour as i64),
                ensure_finite(MarketType::So, hour, price)?,
            );
            point.up_regulation = Some(random_volume(rng, params.so_up_regulation));
            point.down_regulation = Some(random_volume(rng, params.so_down_regulation));
            Ok(point)
        })
        .collect()
}

/// Generate the 24-point Green Term-Ahead curve (baseline x `gtam_premium`).
pub fn generate_gtam<R: Rng + ?Sized>(
    day: NaiveDate,
    params: &MarketParameters,
    rng: &mut R,
) -> Result<Vec<MarketDataPoint>> {
    let base_dt = day_start(day);

    (0..HOURLY_POINTS)
        .map(|hour| -> Result<MarketDataPoint> {
            let price = baseline_price(hour) * params.gtam_premium;

            let mut point = MarketDataPoint::new(
                base_dt + Duration::hours(hour as i64),
                ensure_finite(MarketType::Gtam, hour, price)?,
            );
            point.volume = Some(random_volume(rng, params.gtam_volume));
            Ok(point)
        })
        .collect()
}

/// Generate all four curves for `day`
pub fn generate_curves<R: Rng + ?Sized>(
    rows: &[CanonicalRow],
    day: NaiveDate,
    params: &MarketParameters,
    rng: &mut R,
) -> Result<MarketCurves> {
    let curves = MarketCurves {
        dam_data: generate_dam(rows, day, params, rng)?,
        rtm_data: generate_rtm(day, params, rng)?,
        so_data: generate_so(day, params, rng)?,
        gtam_data: generate_gtam(day, params, rng)?,
    };

    debug!(
        "Generated curves for {day}: DAM={} RTM={} SO={} GTAM={} (dataset rows: {})",
        curves.dam_data.len(),
        curves.rtm_data.len(),
        curves.so_data.len(),
        curves.gtam_data.len(),
        rows.len()
    );

    Ok(curves)
}
