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

//! Evaluation orchestrator.
//!
//! Runs mapping, curve generation, optimization, metrics and recommendations
//! as one fallible pass. A failure anywhere in that pass yields a `failed`
//! result; the optional narrative runs afterwards and can never fail the
//! evaluation.

use crate::curves::generate_curves;
use crate::error::Result;
use crate::llm::OpenAiClient;
use crate::mapper::map_columns;
use crate::metrics::{calculate_metrics, summarize_markets};
use crate::narrative::NarrativeSummarizer;
use crate::optimizer::optimize_curves;
use crate::parameters::MarketParameters;
use crate::recommendations::generate_recommendations;
use crate::settings::GridBidSettings;
use chrono::{DateTime, Utc};
use gridbid_types::{
    ColumnMapping, DatasetRow, EvaluationMetrics, EvaluationResults, EvaluationStatus,
    MarketCurves, MarketSummary, OptimizationConfig, Recommendation,
};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::sync::Arc;
use std::time::Instant;
use tracing::{Instrument, debug, error, info, info_span, warn};
use uuid::Uuid;

/// Output of the fallible part of an evaluation
struct PipelineOutput {
    curves: MarketCurves,
    metrics: EvaluationMetrics,
    market_summaries: Vec<MarketSummary>,
    recommendations: Vec<Recommendation>,
}

#[derive(Debug, Clone, Default)]
pub struct Evaluator {
    params: MarketParameters,
    summarizer: NarrativeSummarizer,
}

impl Evaluator {
    pub fn new(params: MarketParameters, summarizer: NarrativeSummarizer) -> Self {
        Self { params, summarizer }
    }

    /// Build an evaluator from loaded settings.
    ///
    /// Without an API key the narrative summarizer stays disabled.
    pub fn from_settings(settings: &GridBidSettings) -> Self {
        let summarizer = match OpenAiClient::new(&settings.llm) {
            Ok(client) => NarrativeSummarizer::new(Arc::new(client), settings.llm.model.clone())
                .with_timeout(settings.llm.timeout()),
            Err(e) => {
                info!("Narrative summaries disabled: {e}");
                NarrativeSummarizer::disabled()
            }
        };

        Self::new(settings.market.clone(), summarizer)
    }

    pub fn params(&self) -> &MarketParameters {
        &self.params
    }

    pub fn summarizer(&self) -> &NarrativeSummarizer {
        &self.summarizer
    }

    /// Run one evaluation. Always returns a terminal result.
    pub async fn evaluate(
        &self,
        data: &[DatasetRow],
        mappings: &[ColumnMapping],
        config: &OptimizationConfig,
    ) -> EvaluationResults {
        let id = Uuid::new_v4();
        let created_at = Utc::now();
        let started = Instant::now();

        let span = info_span!("evaluation", %id);
        async move {
            info!(
                "Starting evaluation: {} rows, {} mappings, objective {}, risk {}",
                data.len(),
                mappings.len(),
                config.objective.display_name(),
                config.risk_tolerance
            );

            let output = match self.run_pipeline(data, mappings, config, created_at) {
                Ok(output) => output,
                Err(e) => {
                    error!("Evaluation failed: {e}");
                    return EvaluationResults::failed(id, created_at, config.clone(), e.to_string());
                }
            };

            let ai_insights = if config.use_ai {
                Some(
                    self.summarizer
                        .summarize(&output.metrics, &output.recommendations, config)
                        .await,
                )
            } else {
                None
            };

            let duration_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
            info!(
                "Evaluation completed in {duration_ms} ms: profit {:.2}, risk score {:.0}, {} recommendations",
                output.metrics.profit,
                output.metrics.risk_score,
                output.recommendations.len()
            );

            EvaluationResults {
                id,
                status: EvaluationStatus::Completed,
                created_at,
                completed_at: Some(Utc::now()),
                duration_ms: Some(duration_ms),
                config: config.clone(),
                curves: output.curves,
                metrics: output.metrics,
                market_summaries: output.market_summaries,
                recommendations: output.recommendations,
                ai_insights,
                error: None,
            }
        }
        .instrument(span)
        .await
    }

    fn run_pipeline(
        &self,
        data: &[DatasetRow],
        mappings: &[ColumnMapping],
        config: &OptimizationConfig,
        created_at: DateTime<Utc>,
    ) -> Result<PipelineOutput> {
        self.params.validate()?;

        if !config.constraints.is_empty() {
            warn!(
                "{} constraint(s) supplied; they are reported but not enforced",
                config.constraints.len()
            );
        }

        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let rows = map_columns(data, mappings);
        debug!("Mapped {} rows", rows.len());

        let mut curves = generate_curves(&rows, created_at.date_naive(), &self.params, &mut rng)?;
        optimize_curves(&mut curves, config);

        let metrics = calculate_metrics(&curves, &self.params, &mut rng)?;
        let market_summaries = summarize_markets(&curves, config);
        let recommendations = generate_recommendations(&metrics, config, &self.params);

        Ok(PipelineOutput {
            curves,
            metrics,
            market_summaries,
            recommendations,
        })
    }
}
