//! Resume offset computation
//!
//! A restarted run continues from the row after the last one durably written.
//! Resume matches strictly on the dedicated `origin` column - never on "some
//! non-null column" - and fails open: an unreadable, corrupt, or unrelated
//! output table restarts from the beginning, favoring re-processing over
//! silent gaps.

use std::path::Path;

/// Computes the index into `urls` from which processing should continue
///
/// Reads the last record of the existing output and locates its `origin` URL
/// in the input list; the offset is that position plus one. Missing file,
/// unreadable CSV, missing `origin` header, or an origin not present in the
/// list all yield 0.
pub fn compute_start_offset(urls: &[String], output_path: &Path) -> usize {
    if !output_path.exists() {
        return 0;
    }

    let Ok(mut reader) = csv::Reader::from_path(output_path) else {
        tracing::warn!("could not open existing output, starting fresh");
        return 0;
    };

    let Ok(headers) = reader.headers() else {
        tracing::warn!("could not read output header, starting fresh");
        return 0;
    };
    let Some(origin_index) = headers.iter().position(|header| header == "origin") else {
        tracing::warn!("existing output has no 'origin' column, starting fresh");
        return 0;
    };

    let mut last_origin = None;
    for row in reader.records() {
        match row {
            Ok(row) => last_origin = row.get(origin_index).map(str::to_string),
            Err(e) => {
                tracing::warn!("existing output is corrupt ({e}), starting fresh");
                return 0;
            }
        }
    }

    let Some(last_origin) = last_origin else {
        // Header only, nothing written yet
        return 0;
    };

    match urls.iter().position(|url| *url == last_origin) {
        Some(position) => {
            tracing::info!(
                "resuming after {last_origin} (position {} of {})",
                position + 1,
                urls.len()
            );
            position + 1
        }
        None => {
            tracing::warn!("last written origin not found in input list, starting fresh");
            0
        }
    }
}
