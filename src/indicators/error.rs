use thiserror::Error;

use crate::models::{IndicatorColumn, Timeframe};

/// Indicator computation could not produce a fully populated window.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IndicatorError {
    #[error("only {available} fully populated rows after warm-up, window needs {required}")]
    InsufficientRows { required: usize, available: usize },

    #[error("required indicator {column} was not computed for {timeframe}")]
    MissingIndicator {
        column: IndicatorColumn,
        timeframe: Timeframe,
    },
}
