//! Input URL list
//!
//! The run's work list comes from a tabular source with a `url` column, read
//! once at startup. Its order is load-bearing: it defines both processing
//! order and resume semantics, so rows are never reordered or dropped -
//! a malformed URL is kept (and warned about) rather than silently removed.

use crate::{Result, WindwardError};
use std::path::Path;
use url::Url;

/// Reads the ordered URL list from the input CSV
///
/// A missing file or a missing `url` column is a setup fault and fatal to
/// the run, unlike any per-URL failure later on.
pub fn read_url_list(path: &Path) -> Result<Vec<String>> {
    let mut reader = csv::Reader::from_path(path)?;

    let headers = reader.headers()?.clone();
    let url_index = headers
        .iter()
        .position(|header| header == "url")
        .ok_or_else(|| WindwardError::MissingColumn {
            path: path.display().to_string(),
            column: "url".to_string(),
        })?;

    let mut urls = Vec::new();
    for row in reader.records() {
        let row = row?;
        let Some(value) = row.get(url_index) else {
            continue;
        };
        let value = value.trim();
        if value.is_empty() {
            continue;
        }
        if Url::parse(value).is_err() {
            tracing::warn!("input row {} is not a valid URL: {value}", urls.len() + 1);
        }
        urls.push(value.to_string());
    }

    tracing::info!("loaded {} URLs from {}", urls.len(), path.display());
    Ok(urls)
}
