//! Error taxonomy of the screening pipeline.
//!
//! Every error here is local to one (symbol, timeframe) evaluation and is
//! degraded to an unavailable verdict at the aggregator boundary.

use thiserror::Error;

pub use crate::indicators::error::IndicatorError;
use crate::models::{FailureKind, IndicatorColumn};

/// Failures originating in the market data source.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DataError {
    #[error("request failed: {0}")]
    Request(String),

    #[error("unexpected HTTP status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("exchange rejected request with code {code}: {msg}")]
    Exchange { code: String, msg: String },

    #[error("failed to decode response: {0}")]
    Decode(String),

    #[error("fetch timed out after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    #[error("data source unavailable: {0}")]
    Unavailable(String),
}

impl DataError {
    /// Whether retrying the same request may succeed
    pub fn is_transient(&self) -> bool {
        match self {
            DataError::Request(_) | DataError::Timeout { .. } => true,
            DataError::Status { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }
}

impl From<reqwest::Error> for DataError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_decode() {
            DataError::Decode(error.to_string())
        } else {
            DataError::Request(error.to_string())
        }
    }
}

/// Raw candle series rejected before indicator computation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("insufficient data: {actual} candles, {required} required")]
    InsufficientData { required: usize, actual: usize },

    #[error("stale data: last candle is {age_ms}ms old, limit {max_staleness_ms}ms")]
    StaleData { age_ms: i64, max_staleness_ms: i64 },

    #[error("invalid {field} at row {index}: {reason}")]
    InvalidValue {
        index: usize,
        field: &'static str,
        reason: String,
    },
}

/// Rule predicate could not be evaluated on the final row.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RuleEvaluationError {
    #[error("cannot evaluate rules on an empty series")]
    EmptySeries,

    #[error("missing rule input {0}")]
    MissingInput(IndicatorColumn),

    #[error("non-finite rule input {operand} = {value}")]
    NonFinite { operand: String, value: f64 },
}

/// Any failure of the fetch → validate → compute → evaluate sequence.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScreenError {
    #[error(transparent)]
    Data(#[from] DataError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Indicator(#[from] IndicatorError),

    #[error(transparent)]
    Rule(#[from] RuleEvaluationError),
}

impl ScreenError {
    pub fn kind(&self) -> FailureKind {
        match self {
            ScreenError::Data(_) => FailureKind::Data,
            ScreenError::Validation(ValidationError::InsufficientData { .. }) => {
                FailureKind::InsufficientData
            }
            ScreenError::Validation(ValidationError::StaleData { .. }) => FailureKind::StaleData,
            ScreenError::Validation(ValidationError::InvalidValue { .. }) => {
                FailureKind::InvalidValue
            }
            ScreenError::Indicator(_) => FailureKind::IndicatorComputation,
            ScreenError::Rule(_) => FailureKind::RuleEvaluation,
        }
    }
}
