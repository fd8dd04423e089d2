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

//! Output formatters for evaluation results.

use anyhow::{Context, Result};
use comfy_table::{Attribute, Cell, Color, Table, presets::UTF8_FULL};
use gridbid_core::MarketParameters;
use gridbid_core::curves::{BASELINE_DAM_PRICES, HOURLY_POINTS};
use gridbid_types::{EvaluationResults, EvaluationStatus, MarketType, Priority};
use std::fmt::Write as _;
use std::path::Path;

/// Formatter for pretty terminal tables
#[derive(Debug)]
pub struct TableFormatter;

/// Formatter for CSV export of curve points
#[derive(Debug)]
pub struct CsvFormatter;

fn header(labels: &[&str]) -> Vec<Cell> {
    labels
        .iter()
        .map(|label| Cell::new(label).add_attribute(Attribute::Bold))
        .collect()
}

fn new_table() -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table
}

impl TableFormatter {
    /// Metrics, per-market summaries, recommendations and the narrative
    pub fn format_results(results: &EvaluationResults) -> String {
        let mut output = String::new();
        let _ = writeln!(
            output,
            "Evaluation {} | {} | objective {} | risk {}",
            results.id,
            status_label(results.status),
            results.config.objective.display_name(),
            results.config.risk_tolerance
        );

        if let Some(error) = &results.error {
            let _ = writeln!(output, "Error: {error}");
            return output;
        }

        let m = &results.metrics;
        let mut metrics = new_table();
        metrics.set_header(header(&["Metric", "Value"]));
        let rows = [
            ("Total revenue", format!("{:.2}", m.total_revenue)),
            ("Total cost", format!("{:.2}", m.total_cost)),
            ("Profit", format!("{:.2}", m.profit)),
            ("Profit margin", format!("{:.1}%", m.profit_margin)),
            ("Avg DAM price", format!("{:.3}", m.avg_dam_price)),
            ("Avg RTM price", format!("{:.3}", m.avg_rtm_price)),
            ("DAM-RTM spread", format!("{:+.3}", m.dam_rtm_spread)),
            ("Optimal bid price", format!("{:.3}", m.optimal_bid_price)),
            ("Risk score", format!("{:.0}", m.risk_score)),
            ("Confidence", format!("{:.1}%", m.confidence_level)),
            ("Total volume (MWh)", format!("{:.0}", m.total_volume)),
        ];
        for (label, value) in rows {
            metrics.add_row(vec![Cell::new(label), Cell::new(value)]);
        }
        output.push_str(&metrics.to_string());
        output.push('\n');

        let mut markets = new_table();
        markets.set_header(header(&[
            "Market",
            "Selected",
            "Points",
            "Avg Price",
            "Optimized Bid",
            "Min",
            "Max",
        ]));
        for summary in &results.market_summaries {
            let name = Cell::new(format!(
                "{} ({})",
                summary.market.display_name(),
                summary.market.code()
            ));
            let name = if summary.selected {
                name.fg(Color::Green).add_attribute(Attribute::Bold)
            } else {
                name
            };
            markets.add_row(vec![
                name,
                Cell::new(if summary.selected { "yes" } else { "no" }),
                Cell::new(summary.points),
                Cell::new(format!("{:.3}", summary.avg_price)),
                Cell::new(format!("{:.3}", summary.avg_optimized_price)),
                Cell::new(format!("{:.3}", summary.min_price)),
                Cell::new(format!("{:.3}", summary.max_price)),
            ]);
        }
        output.push_str(&markets.to_string());
        output.push('\n');

        let mut recommendations = new_table();
        recommendations.set_header(header(&["Priority", "Type", "Recommendation", "Impact"]));
        for rec in &results.recommendations {
            let priority = Cell::new(rec.priority).fg(priority_color(rec.priority));
            recommendations.add_row(vec![
                priority,
                Cell::new(rec.recommendation_type),
                Cell::new(format!("{}\n{}", rec.title, rec.description)),
                Cell::new(&rec.expected_impact),
            ]);
        }
        output.push_str(&recommendations.to_string());
        output.push('\n');

        if let Some(insights) = &results.ai_insights {
            let _ = writeln!(output, "\nAI insights:\n{insights}");
        }
        if let Some(duration_ms) = results.duration_ms {
            let _ = writeln!(output, "Completed in {duration_ms} ms");
        }

        output
    }

    /// Hourly baseline with the SO and GTAM prices derived from it
    pub fn format_baseline(params: &MarketParameters) -> String {
        let mut table = new_table();
        table.set_header(header(&["Hour", "DAM", "SO", "GTAM"]));

        for (hour, price) in BASELINE_DAM_PRICES.iter().enumerate() {
            table.add_row(vec![
                Cell::new(format!("{hour:02}:00")),
                Cell::new(format!("{price:.2}")),
                Cell::new(format!("{:.2}", price * params.so_premium)),
                Cell::new(format!("{:.2}", price * params.gtam_premium)),
            ]);
        }

        let mean = BASELINE_DAM_PRICES.iter().sum::<f64>() / HOURLY_POINTS as f64;
        format!(
            "{table}\nBaseline mean: {mean:.2} Rs/kWh | SO premium x{:.2} | GTAM premium x{:.2}\n",
            params.so_premium, params.gtam_premium
        )
    }
}

impl CsvFormatter {
    /// Export every curve point of a completed evaluation
    pub fn write_curves(results: &EvaluationResults, path: &Path) -> Result<()> {
        let mut writer = csv::Writer::from_path(path)
            .with_context(|| format!("Failed to create {}", path.display()))?;

        writer.write_record([
            "market",
            "timestamp",
            "price",
            "optimized_price",
            "actual_price",
            "dam_price",
            "volume",
            "up_regulation",
            "down_regulation",
        ])?;

        for &market in MarketType::all() {
            for point in results.curves.curve(market) {
                writer.write_record([
                    market.code().to_owned(),
                    point.timestamp.to_rfc3339(),
                    format!("{:.4}", point.price),
                    optional(point.optimized_price.map(|v| format!("{v:.4}"))),
                    optional(point.actual_price.map(|v| format!("{v:.4}"))),
                    optional(point.dam_price.map(|v| format!("{v:.4}"))),
                    optional(point.volume.map(|v| v.to_string())),
                    optional(point.up_regulation.map(|v| v.to_string())),
                    optional(point.down_regulation.map(|v| v.to_string())),
                ])?;
            }
        }

        writer
            .flush()
            .with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(())
    }
}

fn optional(value: Option<String>) -> String {
    value.unwrap_or_default()
}

fn status_label(status: EvaluationStatus) -> &'static str {
    match status {
        EvaluationStatus::Running => "running",
        EvaluationStatus::Completed => "completed",
        EvaluationStatus::Failed => "FAILED",
    }
}

fn priority_color(priority: Priority) -> Color {
    match priority {
        Priority::High => Color::Red,
        Priority::Medium => Color::Yellow,
        Priority::Low => Color::Grey,
    }
}
