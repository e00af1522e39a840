//! Output table: durable appends and resume
//!
//! This module handles:
//! - The append-only CSV sink with per-row durability flushes
//! - Computing the resume offset from previously-written output

mod resume;
mod sink;

pub use resume::compute_start_offset;
pub use sink::RecordSink;
