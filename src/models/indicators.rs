use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::indicators::momentum::macd::{MACD_SIGNAL_PERIOD, MACD_SLOW_PERIOD};

/// Named indicator column attached to a candle series
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum IndicatorColumn {
    MacdLine,
    MacdSignal,
    MacdHistogram,
    Rsi { period: usize },
    Sma { period: usize },
    /// SMA value one period earlier
    SmaPrev { period: usize },
}

impl IndicatorColumn {
    /// Number of leading rows for which this column has no value
    pub fn warmup(&self) -> usize {
        match self {
            IndicatorColumn::MacdLine => MACD_SLOW_PERIOD - 1,
            IndicatorColumn::MacdSignal | IndicatorColumn::MacdHistogram => {
                MACD_SLOW_PERIOD + MACD_SIGNAL_PERIOD - 2
            }
            IndicatorColumn::Rsi { period } => *period,
            IndicatorColumn::Sma { period } => period.saturating_sub(1),
            IndicatorColumn::SmaPrev { period } => *period,
        }
    }
}

impl fmt::Display for IndicatorColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndicatorColumn::MacdLine => write!(f, "MACD"),
            IndicatorColumn::MacdSignal => write!(f, "MACD_signal"),
            IndicatorColumn::MacdHistogram => write!(f, "MACD_hist"),
            IndicatorColumn::Rsi { period } => write!(f, "RSI_{}", period),
            IndicatorColumn::Sma { period } => write!(f, "MA{}", period),
            IndicatorColumn::SmaPrev { period } => write!(f, "MA{}_prev", period),
        }
    }
}

/// Indicator values at the most recent row of an enriched series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorSnapshot {
    pub timestamp: i64,
    pub close: f64,
    pub values: BTreeMap<IndicatorColumn, f64>,
}

impl IndicatorSnapshot {
    pub fn new(timestamp: i64, close: f64) -> Self {
        Self {
            timestamp,
            close,
            values: BTreeMap::new(),
        }
    }

    pub fn with(mut self, column: IndicatorColumn, value: f64) -> Self {
        self.values.insert(column, value);
        self
    }

    pub fn get(&self, column: IndicatorColumn) -> Option<f64> {
        self.values.get(&column).copied()
    }
}
