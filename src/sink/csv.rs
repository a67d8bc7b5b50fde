//! CSV export of passing symbols.

use chrono::{DateTime, FixedOffset};
use std::path::{Path, PathBuf};
use tracing::info;

use super::{ResultSink, SinkError};
use crate::models::{ScreeningResult, Timeframe};

pub const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Writes `screened_symbols_<unix>.csv` files into a directory
pub struct CsvResultSink {
    output_dir: PathBuf,
    timeframes: Vec<Timeframe>,
}

impl CsvResultSink {
    pub fn new<P: AsRef<Path>>(output_dir: P) -> Self {
        Self {
            output_dir: output_dir.as_ref().to_path_buf(),
            timeframes: Timeframe::all().to_vec(),
        }
    }

    /// Restrict the verdict columns to `timeframes`
    pub fn with_timeframes(mut self, timeframes: Vec<Timeframe>) -> Self {
        self.timeframes = timeframes;
        self
    }

    pub fn file_name(screened_at: DateTime<FixedOffset>) -> String {
        format!("screened_symbols_{}.csv", screened_at.timestamp())
    }

    fn header(&self) -> Vec<String> {
        let mut header = Vec::with_capacity(self.timeframes.len() + 3);
        header.push("symbol".to_string());
        header.extend(self.timeframes.iter().map(|tf| tf.label().to_string()));
        header.push("satisfied".to_string());
        header.push("beijing_time".to_string());
        header
    }

    fn record(&self, result: &ScreeningResult, time: &str) -> Vec<String> {
        let mut record = Vec::with_capacity(self.timeframes.len() + 3);
        record.push(result.symbol.clone());
        for &timeframe in &self.timeframes {
            let cell = match result.verdict(timeframe).and_then(|v| v.as_option()) {
                Some(true) => "true",
                Some(false) => "false",
                None => "",
            };
            record.push(cell.to_string());
        }
        record.push(result.satisfied_count.to_string());
        record.push(time.to_string());
        record
    }

    fn write_rows<W: std::io::Write>(
        &self,
        writer: &mut ::csv::Writer<W>,
        results: &[ScreeningResult],
        screened_at: DateTime<FixedOffset>,
    ) -> Result<usize, SinkError> {
        let time = screened_at.format(TIME_FORMAT).to_string();
        writer.write_record(self.header())?;
        let mut rows = 0;
        for result in results.iter().filter(|r| r.passed) {
            writer.write_record(self.record(result, &time))?;
            rows += 1;
        }
        writer.flush().map_err(|source| SinkError::Io {
            path: self.output_dir.clone(),
            source,
        })?;
        Ok(rows)
    }

    /// Render the passing entries of `results` as CSV text (header included)
    pub fn render(
        &self,
        results: &[ScreeningResult],
        screened_at: DateTime<FixedOffset>,
    ) -> Result<String, SinkError> {
        let mut writer = ::csv::Writer::from_writer(Vec::new());
        self.write_rows(&mut writer, results, screened_at)?;
        let bytes = writer
            .into_inner()
            .map_err(|e| SinkError::Csv(e.into_error().into()))?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}

impl ResultSink for CsvResultSink {
    fn write(
        &self,
        results: &[ScreeningResult],
        screened_at: DateTime<FixedOffset>,
    ) -> Result<Option<PathBuf>, SinkError> {
        if !results.iter().any(|r| r.passed) {
            return Ok(None);
        }

        std::fs::create_dir_all(&self.output_dir).map_err(|source| SinkError::Io {
            path: self.output_dir.clone(),
            source,
        })?;

        let path = self.output_dir.join(Self::file_name(screened_at));
        let mut writer = ::csv::Writer::from_path(&path)?;
        let rows = self.write_rows(&mut writer, results, screened_at)?;

        info!(
            path = %path.display(),
            rows,
            "CsvResultSink: wrote {} symbols to {}",
            rows,
            path.display()
        );
        Ok(Some(path))
    }
}
