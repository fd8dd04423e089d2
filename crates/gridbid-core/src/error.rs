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

//! Error types for the evaluation pipeline and the narrative collaborator

use gridbid_types::{CanonicalField, MarketType};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EvaluationError {
    #[error("invalid market parameter {name}: {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    #[error("non-numeric {field} in dataset row {row}: {value}")]
    NonNumericValue {
        field: CanonicalField,
        row: usize,
        value: String,
    },

    #[error("non-finite {market} price at point {index}")]
    NonFinitePrice { market: MarketType, index: usize },

    #[error("{0} curve is empty")]
    EmptyCurve(MarketType),
}

pub type Result<T> = std::result::Result<T, EvaluationError>;

/// Failures of the external text-generation service
#[derive(Debug, Error)]
pub enum NarrativeError {
    #[error("no API credential configured")]
    MissingCredential,

    #[error("request failed: {0}")]
    Request(String),

    #[error("API error {status}: {body}")]
    Api { status: u16, body: String },

    #[error("response contained no text")]
    EmptyResponse,

    #[error("timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },
}
