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

//! Column mapping from uploaded dataset rows to canonical rows.

use gridbid_types::{CanonicalRow, ColumnMapping, DatasetRow};

/// Map every dataset row onto the canonical fields named in `mappings`.
///
/// Produces exactly one output row per input row. A mapping whose source
/// column is missing on a row simply leaves that field out of the output
/// row. Mapping confidence is not consulted here.
#[must_use]
pub fn map_columns(data: &[DatasetRow], mappings: &[ColumnMapping]) -> Vec<CanonicalRow> {
    data.iter()
        .map(|row| {
            let mut canonical = CanonicalRow::new();
            for mapping in mappings {
                if let Some(value) = row.get(&mapping.source_column) {
                    canonical.insert(mapping.target_field, value.clone());
                }
            }
            canonical
        })
        .collect()
}
