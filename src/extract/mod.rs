//! Extraction engine: fixed-schema records from listing pages
//!
//! This module contains:
//! - The canonical six-group column schema and the `Record` type
//! - The label-to-column dictionaries driving section extraction
//! - A minimal DOM capability layer over the HTML parser
//! - The extractor itself: category gate, field mapping, gallery walk

mod dom;
mod extractor;
pub mod schema;

pub use extractor::{ExtractOutcome, Extractor, SkipReason};
pub use schema::{Record, ALL_COLUMNS, NULL_SENTINEL};
