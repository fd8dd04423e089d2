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

//! Raw dataset rows and the canonical shape they are mapped into.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// A single scalar cell of an uploaded dataset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Number(f64),
    Date(DateTime<Utc>),
    Text(String),
}

impl CellValue {
    /// Numeric view of the cell. Text is parsed leniently (surrounding whitespace ignored).
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Text(s) => s.trim().parse::<f64>().ok(),
            Self::Date(_) => None,
        }
    }

    pub fn as_date(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::Date(d) => Some(*d),
            Self::Text(s) => s.parse::<DateTime<Utc>>().ok(),
            Self::Number(_) => None,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Date(d) => write!(f, "{}", d.to_rfc3339()),
            Self::Text(s) => write!(f, "{s}"),
        }
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<DateTime<Utc>> for CellValue {
    fn from(value: DateTime<Utc>) -> Self {
        Self::Date(value)
    }
}

/// One raw input observation: column name -> scalar value.
///
/// Columns are kept sorted by name. Rows are produced by the dataset loader
/// and only ever read by the column mapper.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DatasetRow(BTreeMap<String, CellValue>);

impl DatasetRow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert, handy for fixtures
    #[must_use]
    pub fn with(mut self, column: impl Into<String>, value: impl Into<CellValue>) -> Self {
        self.0.insert(column.into(), value.into());
        self
    }

    pub fn insert(&mut self, column: impl Into<String>, value: CellValue) {
        self.0.insert(column.into(), value);
    }

    pub fn get(&self, column: &str) -> Option<&CellValue> {
        self.0.get(column)
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, CellValue)> for DatasetRow {
    fn from_iter<I: IntoIterator<Item = (String, CellValue)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Canonical fields a dataset column can be mapped onto
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CanonicalField {
    Timestamp,
    Hour,
    DamPrice,
    RtmPrice,
    SoPrice,
    GtamPrice,
    Volume,
    UpRegulation,
    DownRegulation,
}

impl CanonicalField {
    /// Wire name of the field (snake_case)
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Timestamp => "timestamp",
            Self::Hour => "hour",
            Self::DamPrice => "dam_price",
            Self::RtmPrice => "rtm_price",
            Self::SoPrice => "so_price",
            Self::GtamPrice => "gtam_price",
            Self::Volume => "volume",
            Self::UpRegulation => "up_regulation",
            Self::DownRegulation => "down_regulation",
        }
    }

    pub fn all() -> &'static [CanonicalField] {
        &[
            Self::Timestamp,
            Self::Hour,
            Self::DamPrice,
            Self::RtmPrice,
            Self::SoPrice,
            Self::GtamPrice,
            Self::Volume,
            Self::UpRegulation,
            Self::DownRegulation,
        ]
    }
}

impl fmt::Display for CanonicalField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Declares how one raw column feeds one canonical field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnMapping {
    /// Column name in the uploaded dataset
    pub source_column: String,

    /// Canonical field this column populates
    pub target_field: CanonicalField,

    /// Mapping confidence (0.0 - 1.0), informational only
    #[serde(default)]
    pub confidence: f32,
}

impl ColumnMapping {
    pub fn new(source_column: impl Into<String>, target_field: CanonicalField) -> Self {
        Self {
            source_column: source_column.into(),
            target_field,
            confidence: 1.0,
        }
    }
}

/// A row after column mapping, holding only the mapped canonical fields
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CanonicalRow(BTreeMap<CanonicalField, CellValue>);

impl CanonicalRow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: CanonicalField, value: CellValue) {
        self.0.insert(field, value);
    }

    pub fn get(&self, field: CanonicalField) -> Option<&CellValue> {
        self.0.get(&field)
    }

    pub fn contains(&self, field: CanonicalField) -> bool {
        self.0.contains_key(&field)
    }

    pub fn fields(&self) -> impl Iterator<Item = CanonicalField> + '_ {
        self.0.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
