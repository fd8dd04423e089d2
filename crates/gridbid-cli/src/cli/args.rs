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

//! CLI argument definitions using clap.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "gridbid")]
#[command(author, version, about = "GridBid market bid optimization CLI")]
#[command(
    long_about = "Evaluate bidding strategies across the Day-Ahead (DAM), Real-Time (RTM),\n\
    System/Ancillary (SO) and Green Term-Ahead (GTAM) markets.\n\
    \nExamples:\n  \
    gridbid baseline                                # Show the hourly reference profile\n  \
    gridbid evaluate --data prices.csv              # Evaluate with default settings\n  \
    gridbid evaluate --data prices.csv --mappings map.json --config run.toml --output json"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run one evaluation over an uploaded dataset
    #[command(
        long_about = "Load a dataset, map its columns, generate and optimize market curves,\n\
        and report metrics, per-market summaries and recommendations.\n\
        \nInputs:\n  \
        - Dataset: CSV with a header row, or a JSON array of objects\n  \
        - Mappings: JSON array of {sourceColumn, targetField, confidence}\n  \
        - Config: TOML or JSON optimization config (camelCase keys)\n\
        \nExamples:\n  \
        gridbid evaluate --data iex_dam.csv --mappings map.json\n  \
        gridbid evaluate --data iex_dam.csv --seed 7 --csv-path curves.csv"
    )]
    Evaluate(EvaluateArgs),

    /// Print the 24-hour DAM baseline with the SO and GTAM premiums applied
    Baseline(BaselineArgs),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}

#[derive(Debug, Parser)]
pub struct EvaluateArgs {
    /// Dataset file (.csv or .json)
    #[arg(long, value_name = "PATH")]
    pub data: PathBuf,

    /// Column mappings JSON file
    #[arg(
        long,
        value_name = "PATH",
        long_help = "JSON array of column mappings, e.g.\n  \
          [{\"sourceColumn\": \"MCP (Rs/kWh)\", \"targetField\": \"dam_price\", \"confidence\": 0.9}]\n\
          \nWithout mappings every curve uses the built-in baseline."
    )]
    pub mappings: Option<PathBuf>,

    /// Optimization config file (.toml or .json)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Settings file with [market] and [llm] tables
    #[arg(long, value_name = "PATH", default_value = "gridbid.toml")]
    pub settings: PathBuf,

    /// Seed for reproducible runs (overrides the config file)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Request an AI narrative (overrides the config file)
    #[arg(long, default_value_t = false)]
    pub ai: bool,

    /// How to display results
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub output: OutputFormat,

    /// Also write every generated curve point to this CSV file
    #[arg(long, value_name = "PATH")]
    pub csv_path: Option<PathBuf>,
}

#[derive(Debug, Parser)]
pub struct BaselineArgs {
    /// Settings file providing the SO and GTAM premiums
    #[arg(long, value_name = "PATH", default_value = "gridbid.toml")]
    pub settings: PathBuf,
}
