//! Durable record sink
//!
//! Appends one validated record at a time to the output CSV. The header row
//! is written only when the table is newly created; every append is followed
//! by a flush so an interrupted run leaves no buffered rows behind. Column
//! order is the canonical schema order, fixed for the life of the process.

use crate::extract::schema::ALL_COLUMNS;
use crate::extract::Record;
use crate::{Result, WindwardError};
use std::fs::{File, OpenOptions};
use std::path::Path;

/// Append-only writer for the output table
pub struct RecordSink {
    writer: csv::Writer<File>,
}

impl RecordSink {
    /// Opens the output table
    ///
    /// With `fresh` the file is truncated and the canonical header written;
    /// otherwise rows are appended to whatever is already there. A resumed
    /// run must open non-fresh so the existing rows survive.
    pub fn open(path: &Path, fresh: bool) -> Result<Self> {
        let file = if fresh {
            File::create(path)?
        } else {
            OpenOptions::new().append(true).create(true).open(path)?
        };

        let mut sink = Self {
            writer: csv::Writer::from_writer(file),
        };
        if fresh {
            sink.writer.write_record(ALL_COLUMNS.iter())?;
            sink.writer.flush()?;
        }
        Ok(sink)
    }

    /// Appends one schema-complete record and flushes it to disk
    ///
    /// A record is written whole or not at all; a width mismatch against the
    /// schema is rejected before anything reaches the file.
    pub fn append(&mut self, record: &Record) -> Result<()> {
        if record.len() != ALL_COLUMNS.len() {
            let column = ALL_COLUMNS
                .get(record.len())
                .cloned()
                .unwrap_or_else(|| "unknown".to_string());
            return Err(WindwardError::IncompleteRecord { column });
        }

        self.writer.write_record(record.values())?;
        self.writer.flush()?;
        Ok(())
    }
}
