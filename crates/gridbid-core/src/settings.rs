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

//! Deployment settings: market parameters and the text-generation service.
//!
//! Sources, later wins:
//! 1. Built-in defaults
//! 2. TOML settings file (`[market]` and `[llm]` tables), when present
//! 3. `GRIDBID_LLM_*` environment variables

use crate::llm::LlmSettings;
use crate::parameters::MarketParameters;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{info, warn};

pub const ENV_API_KEY: &str = "GRIDBID_LLM_API_KEY";
pub const ENV_BASE_URL: &str = "GRIDBID_LLM_BASE_URL";
pub const ENV_MODEL: &str = "GRIDBID_LLM_MODEL";
pub const ENV_TIMEOUT_SECS: &str = "GRIDBID_LLM_TIMEOUT_SECS";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GridBidSettings {
    #[serde(default)]
    pub market: MarketParameters,

    #[serde(default)]
    pub llm: LlmSettings,
}

impl GridBidSettings {
    /// Load settings from `path` (if given and present) plus the process environment
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::load_with(path, |key| std::env::var(key).ok())
    }

    /// Same as [`Self::load`] with an explicit environment lookup
    pub fn load_with<F>(path: Option<&Path>, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut settings = match path {
            Some(path) if path.exists() => {
                let content = std::fs::read_to_string(path)
                    .with_context(|| format!("Failed to read {}", path.display()))?;
                let settings: Self = toml::from_str(&content)
                    .with_context(|| format!("Failed to parse {}", path.display()))?;
                info!("Loaded settings from {}", path.display());
                settings
            }
            Some(path) => {
                warn!("Settings file {} not found, using defaults", path.display());
                Self::default()
            }
            None => Self::default(),
        };

        settings.apply_env(lookup);
        settings.validate()?;
        Ok(settings)
    }

    /// Apply `GRIDBID_LLM_*` overrides. Blank values are ignored.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        if let Some(key) = var(ENV_API_KEY) {
            self.llm.api_key = Some(key);
        }
        if let Some(url) = var(ENV_BASE_URL) {
            self.llm.base_url = url;
        }
        if let Some(model) = var(ENV_MODEL) {
            self.llm.model = model;
        }
        if let Some(raw) = var(ENV_TIMEOUT_SECS) {
            match raw.trim().parse::<u64>() {
                Ok(secs) => self.llm.timeout_secs = secs,
                Err(_) => warn!("Ignoring {ENV_TIMEOUT_SECS}={raw}: not a whole number of seconds"),
            }
        }
    }

    pub fn validate(&self) -> Result<()> {
        self.market
            .validate()
            .context("Invalid [market] settings")?;

        if self.llm.base_url.trim().is_empty() {
            anyhow::bail!("llm.base_url must not be empty");
        }
        if self.llm.model.trim().is_empty() {
            anyhow::bail!("llm.model must not be empty");
        }
        if self.llm.timeout_secs == 0 {
            anyhow::bail!("llm.timeout_secs must be at least 1");
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_without_file() {
        let settings = GridBidSettings::load_with(None, env(&[])).unwrap();
        assert_eq!(settings, GridBidSettings::default());
        assert_eq!(settings.llm.model, "gpt-4o-mini");
        assert!(settings.llm.api_key.is_none());
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let settings =
            GridBidSettings::load_with(Some(Path::new("/nonexistent/gridbid.toml")), env(&[]))
                .unwrap();
        assert_eq!(settings, GridBidSettings::default());
    }

    #[test]
    fn test_file_then_env() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
[market]
cost_ratio = 0.8

[llm]
model = "from-file"
timeout_secs = 5
"#
        )
        .unwrap();

        let settings = GridBidSettings::load_with(
            Some(file.path()),
            env(&[(ENV_MODEL, "from-env"), (ENV_API_KEY, "sk-123")]),
        )
        .unwrap();

        assert!((settings.market.cost_ratio - 0.8).abs() < f64::EPSILON);
        assert_eq!(settings.llm.model, "from-env");
        assert_eq!(settings.llm.api_key.as_deref(), Some("sk-123"));
        assert_eq!(settings.llm.timeout_secs, 5);
        assert_eq!(settings.llm.base_url, "https://api.openai.com/v1");
    }

    #[test]
    fn test_bad_timeout_env_ignored() {
        let settings =
            GridBidSettings::load_with(None, env(&[(ENV_TIMEOUT_SECS, "soon")])).unwrap();
        assert_eq!(settings.llm.timeout_secs, 30);

        let settings = GridBidSettings::load_with(None, env(&[(ENV_TIMEOUT_SECS, "12")])).unwrap();
        assert_eq!(settings.llm.timeout_secs, 12);
    }

    #[test]
    fn test_blank_env_ignored() {
        let settings = GridBidSettings::load_with(None, env(&[(ENV_API_KEY, "  ")])).unwrap();
        assert!(settings.llm.api_key.is_none());
    }

    #[test]
    fn test_invalid_market_rejected() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[market]\nrisk_cv_thresholds = [30.0, 20.0, 10.0]").unwrap();

        let err = GridBidSettings::load_with(Some(file.path()), env(&[])).unwrap_err();
        assert!(err.to_string().contains("Invalid [market] settings"));
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let err =
            GridBidSettings::load_with(None, env(&[(ENV_TIMEOUT_SECS, "0")])).unwrap_err();
        assert!(err.to_string().contains("timeout_secs"));
    }

    #[test]
    fn test_malformed_file_is_error() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[market\ncost_ratio = ").unwrap();
        assert!(GridBidSettings::load_with(Some(file.path()), env(&[])).is_err());
    }
}
