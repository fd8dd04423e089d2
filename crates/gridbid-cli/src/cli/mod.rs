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

//! Command-line interface for running evaluations.

pub mod args;
pub mod formatters;
pub mod loaders;

pub use args::{BaselineArgs, Cli, Commands, EvaluateArgs, OutputFormat};
pub use formatters::{CsvFormatter, TableFormatter};
pub use loaders::{
    CsvDatasetLoader, DatasetLoader, JsonDatasetLoader, dataset_loader, load_config, load_mappings,
};
