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

//! Loaders turning files on disk into evaluation inputs.

use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};
use gridbid_types::{CellValue, ColumnMapping, DatasetRow, OptimizationConfig};
use std::fs;
use std::path::{Path, PathBuf};

/// Source of uploaded dataset rows
pub trait DatasetLoader {
    fn load(&self) -> Result<Vec<DatasetRow>>;
}

/// CSV with a header row; every record becomes one dataset row
#[derive(Debug)]
pub struct CsvDatasetLoader {
    path: PathBuf,
}

impl CsvDatasetLoader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl DatasetLoader for CsvDatasetLoader {
    fn load(&self) -> Result<Vec<DatasetRow>> {
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_path(&self.path)
            .with_context(|| format!("Failed to open {}", self.path.display()))?;

        let headers = reader
            .headers()
            .with_context(|| format!("Failed to read CSV header of {}", self.path.display()))?
            .clone();

        let mut rows = Vec::new();
        for (idx, record) in reader.records().enumerate() {
            let record = record.with_context(|| {
                format!("Malformed CSV record {} in {}", idx + 1, self.path.display())
            })?;

            let row: DatasetRow = headers
                .iter()
                .zip(record.iter())
                .filter_map(|(column, raw)| parse_cell(raw).map(|cell| (column.to_owned(), cell)))
                .collect();
            rows.push(row);
        }

        Ok(rows)
    }
}

/// JSON array of flat objects
#[derive(Debug)]
pub struct JsonDatasetLoader {
    path: PathBuf,
}

impl JsonDatasetLoader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl DatasetLoader for JsonDatasetLoader {
    fn load(&self) -> Result<Vec<DatasetRow>> {
        let content = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read {}", self.path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse dataset {}", self.path.display()))
    }
}

/// Pick a dataset loader from the file extension
pub fn dataset_loader(path: &Path) -> Result<Box<dyn DatasetLoader>> {
    match extension(path).as_deref() {
        Some("csv") => Ok(Box::new(CsvDatasetLoader::new(path))),
        Some("json") => Ok(Box::new(JsonDatasetLoader::new(path))),
        _ => anyhow::bail!(
            "Unsupported dataset format: {}\n\nExpected a .csv or .json file.",
            path.display()
        ),
    }
}

/// Interpret one CSV cell. Empty cells yield `None`.
pub fn parse_cell(raw: &str) -> Option<CellValue> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(number) = raw.parse::<f64>()
        && number.is_finite()
    {
        return Some(CellValue::Number(number));
    }

    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(CellValue::Date(ts.with_timezone(&Utc)));
    }

    if let Ok(day) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(CellValue::Date(
            Utc.from_utc_datetime(&day.and_time(NaiveTime::MIN)),
        ));
    }

    Some(CellValue::Text(raw.to_owned()))
}

/// Load column mappings; `None` means no mappings
pub fn load_mappings(path: Option<&Path>) -> Result<Vec<ColumnMapping>> {
    let Some(path) = path else {
        return Ok(Vec::new());
    };

    let content =
        fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse column mappings {}", path.display()))
}

/// Load an optimization config from TOML or JSON; `None` means defaults
pub fn load_config(path: Option<&Path>) -> Result<OptimizationConfig> {
    let Some(path) = path else {
        return Ok(OptimizationConfig::default());
    };

    let content =
        fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;

    match extension(path).as_deref() {
        Some("toml") => toml::from_str(&content)
            .with_context(|| format!("Failed to parse config {}", path.display())),
        Some("json") => serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config {}", path.display())),
        _ => anyhow::bail!(
            "Unsupported config format: {}\n\nExpected a .toml or .json file.",
            path.display()
        ),
    }
}

fn extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
}
