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

//! CLI entry point for GridBid

use anyhow::{Context, Result};
use clap::Parser;
use gridbid_cli::cli::{
    BaselineArgs, Cli, Commands, CsvFormatter, EvaluateArgs, OutputFormat, TableFormatter,
    dataset_loader, load_config, load_mappings,
};
use gridbid_core::{Evaluator, GridBidSettings};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr so JSON output stays parseable
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Evaluate(args) => evaluate_command(args).await,
        Commands::Baseline(args) => baseline_command(&args),
    }
}

async fn evaluate_command(args: EvaluateArgs) -> Result<()> {
    let settings = GridBidSettings::load(Some(args.settings.as_path()))?;

    let data = dataset_loader(&args.data)?.load()?;
    let mappings = load_mappings(args.mappings.as_deref())?;
    let mut config = load_config(args.config.as_deref())?;
    if args.seed.is_some() {
        config.seed = args.seed;
    }
    if args.ai {
        config.use_ai = true;
    }

    info!(
        "Loaded {} rows and {} mappings from {}",
        data.len(),
        mappings.len(),
        args.data.display()
    );

    let evaluator = Evaluator::from_settings(&settings);
    let results = evaluator.evaluate(&data, &mappings, &config).await;

    match args.output {
        OutputFormat::Table => print!("{}", TableFormatter::format_results(&results)),
        OutputFormat::Json => println!(
            "{}",
            serde_json::to_string_pretty(&results).context("Failed to serialize results")?
        ),
    }

    if let Some(path) = &args.csv_path
        && results.is_completed()
    {
        CsvFormatter::write_curves(&results, path)?;
        info!("Curves written to {}", path.display());
    }

    if let Some(error) = &results.error {
        anyhow::bail!("Evaluation {} failed: {error}", results.id);
    }

    Ok(())
}

fn baseline_command(args: &BaselineArgs) -> Result<()> {
    let settings = GridBidSettings::load(Some(args.settings.as_path()))?;
    print!("{}", TableFormatter::format_baseline(&settings.market));
    Ok(())
}
