//! Persistence of screening results

pub mod csv;

use chrono::{DateTime, FixedOffset};
use std::path::PathBuf;
use thiserror::Error;

use crate::models::ScreeningResult;

pub use self::csv::CsvResultSink;

#[derive(Debug, Error)]
pub enum SinkError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV encoding failed: {0}")]
    Csv(#[from] ::csv::Error),
}

/// Destination for the symbols that passed a screening run
pub trait ResultSink: Send + Sync {
    /// Persist the passing entries of `results`. Returns where they were
    /// written, or `None` when nothing passed.
    fn write(
        &self,
        results: &[ScreeningResult],
        screened_at: DateTime<FixedOffset>,
    ) -> Result<Option<PathBuf>, SinkError>;
}
