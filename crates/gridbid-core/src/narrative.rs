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

//! Optional natural-language summary of an evaluation.
//!
//! The text-generation service sits behind [`TextGenerator`]. Whatever happens
//! on that side, [`NarrativeSummarizer::summarize`] returns a string: the
//! generated text, or one of the two fixed fallback messages.

use crate::error::NarrativeError;
use async_trait::async_trait;
use gridbid_types::{EvaluationMetrics, OptimizationConfig, Recommendation};
use std::fmt;
use std::fmt::Write as _;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Returned when no text generator is configured
pub const NARRATIVE_UNAVAILABLE: &str =
    "AI insights are not available: no text-generation service is configured.";

/// Returned when the text generator fails or times out
pub const NARRATIVE_FAILED: &str = "AI insights could not be generated for this evaluation.";

pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// "Generate text from a prompt" capability of an external service
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str, model: &str) -> Result<String, NarrativeError>;
}

/// Render the fixed prompt template.
///
/// Constraints are listed for context only; nothing upstream enforces them.
pub fn build_prompt(
    metrics: &EvaluationMetrics,
    recommendations: &[Recommendation],
    config: &OptimizationConfig,
) -> String {
    let markets: Vec<&str> = config.market_types.iter().map(|m| m.code()).collect();

    let mut prompt = String::from(
        "You are an energy market analyst. Summarize the following bid optimization \
         evaluation for a power trader in three short paragraphs: market conditions, \
         recommended bidding approach, and key risks.\n\n",
    );

    let _ = writeln!(prompt, "Objective: {}", config.objective.display_name());
    let _ = writeln!(prompt, "Risk tolerance: {}", config.risk_tolerance);
    let _ = writeln!(prompt, "Markets: {}", markets.join(", "));
    let _ = writeln!(prompt, "Time horizon: {}", config.time_horizon);
    let _ = writeln!(prompt, "Model: {}", config.model_type);

    prompt.push_str("\nMetrics:\n");
    let _ = writeln!(prompt, "- Total revenue: {:.2}", metrics.total_revenue);
    let _ = writeln!(prompt, "- Profit: {:.2}", metrics.profit);
    let _ = writeln!(prompt, "- Profit margin: {:.1}%", metrics.profit_margin);
    let _ = writeln!(prompt, "- Average DAM price: {:.2}", metrics.avg_dam_price);
    let _ = writeln!(prompt, "- Average RTM price: {:.2}", metrics.avg_rtm_price);
    let _ = writeln!(prompt, "- DAM-RTM spread: {:.2}", metrics.dam_rtm_spread);
    let _ = writeln!(prompt, "- Optimal bid price: {:.2}", metrics.optimal_bid_price);
    let _ = writeln!(prompt, "- Risk score: {:.0}", metrics.risk_score);
    let _ = writeln!(prompt, "- Confidence: {:.1}%", metrics.confidence_level);
    let _ = writeln!(prompt, "- Total volume: {:.0} MWh", metrics.total_volume);

    if !config.constraints.is_empty() {
        prompt.push_str("\nConstraints:\n");
        for constraint in &config.constraints {
            let _ = write!(
                prompt,
                "- {}: {}",
                constraint.constraint_type, constraint.value
            );
            if let Some(unit) = &constraint.unit {
                let _ = write!(prompt, " {unit}");
            }
            if let Some(description) = &constraint.description {
                let _ = write!(prompt, " ({description})");
            }
            prompt.push('\n');
        }
    }

    prompt.push_str("\nRecommendations:\n");
    for rec in recommendations {
        let _ = writeln!(
            prompt,
            "- [{}/{}] {}: {}",
            rec.recommendation_type, rec.priority, rec.title, rec.description
        );
    }

    prompt
}

#[derive(Clone)]
pub struct NarrativeSummarizer {
    generator: Option<Arc<dyn TextGenerator>>,
    model: String,
    timeout: Duration,
}

impl fmt::Debug for NarrativeSummarizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NarrativeSummarizer")
            .field("configured", &self.generator.is_some())
            .field("model", &self.model)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl Default for NarrativeSummarizer {
    fn default() -> Self {
        Self::disabled()
    }
}

impl NarrativeSummarizer {
    pub fn new(generator: Arc<dyn TextGenerator>, model: impl Into<String>) -> Self {
        Self {
            generator: Some(generator),
            model: model.into(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Summarizer without a generator; always yields [`NARRATIVE_UNAVAILABLE`]
    pub fn disabled() -> Self {
        Self {
            generator: None,
            model: DEFAULT_MODEL.to_owned(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn is_configured(&self) -> bool {
        self.generator.is_some()
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Produce the narrative. Never fails.
    pub async fn summarize(
        &self,
        metrics: &EvaluationMetrics,
        recommendations: &[Recommendation],
        config: &OptimizationConfig,
    ) -> String {
        let Some(generator) = &self.generator else {
            debug!("No text generator configured, skipping narrative");
            return NARRATIVE_UNAVAILABLE.to_owned();
        };

        let prompt = build_prompt(metrics, recommendations, config);

        let outcome = tokio::time::timeout(self.timeout, generator.generate(&prompt, &self.model))
            .await
            .unwrap_or_else(|_| {
                Err(NarrativeError::Timeout {
                    timeout_secs: self.timeout.as_secs(),
                })
            });

        match outcome {
            Ok(text) if !text.trim().is_empty() => text,
            Ok(_) => {
                warn!("Narrative generation failed: {}", NarrativeError::EmptyResponse);
                NARRATIVE_FAILED.to_owned()
            }
            Err(e) => {
                warn!("Narrative generation failed: {e}");
                NARRATIVE_FAILED.to_owned()
            }
        }
    }
}
