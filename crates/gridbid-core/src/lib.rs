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

//! GridBid core - market bid optimization and evaluation pipeline
//!
//! One evaluation maps an uploaded dataset onto canonical fields, generates
//! DAM/RTM/SO/GTAM price curves for a day, optimizes bid prices for the chosen
//! objective and risk tolerance, derives financial and risk metrics, and
//! synthesizes recommendations. An optional narrative summary is produced by
//! an external text-generation service.

pub mod curves;
pub mod error;
pub mod evaluator;
pub mod llm;
pub mod mapper;
pub mod metrics;
pub mod narrative;
pub mod optimizer;
pub mod parameters;
pub mod recommendations;
pub mod settings;

pub use error::{EvaluationError, NarrativeError, Result};
pub use evaluator::Evaluator;
pub use llm::{LlmSettings, OpenAiClient};
pub use narrative::{NARRATIVE_FAILED, NARRATIVE_UNAVAILABLE, NarrativeSummarizer, TextGenerator};
pub use parameters::{MarketParameters, VolumeRange};
pub use settings::GridBidSettings;
