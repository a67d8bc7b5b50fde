//! Timeframe profiles: staleness bound, indicator set and rule predicate per interval.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::indicators::IndicatorColumn;
use super::strategy::{Condition, Operand};
use crate::indicators::momentum::rsi::RSI_PERIOD;

const MINUTE_MS: i64 = 60 * 1000;
const HOUR_MS: i64 = 60 * MINUTE_MS;

/// RSI must sit strictly above this on every timeframe
pub const RSI_LOWER_BOUND: f64 = 50.0;
/// Upper RSI bound on the slower timeframes (`1d`, `4h`)
pub const RSI_UPPER_BOUND_SLOW: f64 = 70.0;
/// Upper RSI bound on the faster timeframes (`1h`, `15m`)
pub const RSI_UPPER_BOUND_FAST: f64 = 75.0;

/// Candle interval screened by the pipeline.
///
/// Ordering follows the default evaluation order, slowest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Timeframe {
    #[serde(rename = "1d")]
    Day1,
    #[serde(rename = "4h")]
    Hour4,
    #[serde(rename = "1h")]
    Hour1,
    #[serde(rename = "15m")]
    Min15,
}

impl Timeframe {
    /// Returns all screened timeframes in default order.
    pub fn all() -> &'static [Timeframe] {
        &[
            Timeframe::Day1,
            Timeframe::Hour4,
            Timeframe::Hour1,
            Timeframe::Min15,
        ]
    }

    pub fn label(&self) -> &'static str {
        match self {
            Timeframe::Day1 => "1d",
            Timeframe::Hour4 => "4h",
            Timeframe::Hour1 => "1h",
            Timeframe::Min15 => "15m",
        }
    }

    /// Length of one candle period in milliseconds
    pub fn duration_ms(&self) -> i64 {
        match self {
            Timeframe::Day1 => 24 * HOUR_MS,
            Timeframe::Hour4 => 4 * HOUR_MS,
            Timeframe::Hour1 => HOUR_MS,
            Timeframe::Min15 => 15 * MINUTE_MS,
        }
    }

    /// Maximum accepted age of the last candle
    pub fn max_staleness_ms(&self) -> i64 {
        self.duration_ms()
    }

    /// SMA periods computed for this timeframe
    pub fn sma_periods(&self) -> &'static [usize] {
        match self {
            Timeframe::Day1 => &[5, 20, 50],
            Timeframe::Hour4 => &[5, 20],
            Timeframe::Hour1 | Timeframe::Min15 => &[5, 10],
        }
    }

    /// SMA periods whose previous-period value is attached for slope checks
    pub fn slope_periods(&self) -> &'static [usize] {
        match self {
            Timeframe::Day1 | Timeframe::Hour4 => &[5, 20],
            Timeframe::Hour1 | Timeframe::Min15 => &[5, 10],
        }
    }

    /// Exclusive RSI band `(lower, upper)`
    pub fn rsi_band(&self) -> (f64, f64) {
        match self {
            Timeframe::Day1 | Timeframe::Hour4 => (RSI_LOWER_BOUND, RSI_UPPER_BOUND_SLOW),
            Timeframe::Hour1 | Timeframe::Min15 => (RSI_LOWER_BOUND, RSI_UPPER_BOUND_FAST),
        }
    }

    /// Every indicator column that must be populated on an evaluated row
    pub fn required_columns(&self) -> Vec<IndicatorColumn> {
        let mut columns = vec![
            IndicatorColumn::MacdLine,
            IndicatorColumn::MacdSignal,
            IndicatorColumn::MacdHistogram,
            IndicatorColumn::Rsi { period: RSI_PERIOD },
        ];
        columns.extend(
            self.sma_periods()
                .iter()
                .map(|&period| IndicatorColumn::Sma { period }),
        );
        columns.extend(
            self.slope_periods()
                .iter()
                .map(|&period| IndicatorColumn::SmaPrev { period }),
        );
        columns
    }

    /// Leading rows dropped before any row has every required column
    pub fn warmup(&self) -> usize {
        self.required_columns()
            .iter()
            .map(IndicatorColumn::warmup)
            .max()
            .unwrap_or(0)
    }

    /// Rule predicate; every condition must hold on the final row
    pub fn rules(&self) -> Vec<Condition> {
        let sma = |period| Operand::Indicator(IndicatorColumn::Sma { period });
        let histogram = Operand::Indicator(IndicatorColumn::MacdHistogram);
        let rsi = Operand::Indicator(IndicatorColumn::Rsi { period: RSI_PERIOD });
        let (rsi_lower, rsi_upper) = self.rsi_band();

        let mut rules = match self {
            Timeframe::Day1 | Timeframe::Hour4 => {
                let mut rules = vec![
                    Condition::greater(Operand::Close, sma(5)),
                    Condition::greater(Operand::Close, sma(20)),
                ];
                if *self == Timeframe::Day1 {
                    rules.push(Condition::greater(Operand::Close, sma(50)));
                }
                rules
            }
            Timeframe::Hour1 | Timeframe::Min15 => vec![Condition::greater(sma(5), sma(10))],
        };

        rules.push(Condition::greater(histogram, Operand::Constant(0.0)));
        rules.push(Condition::greater(rsi, Operand::Constant(rsi_lower)));
        rules.push(Condition::less(rsi, Operand::Constant(rsi_upper)));
        rules.extend(self.slope_periods().iter().map(|&p| Condition::rising(p)));
        rules
    }
}

impl fmt::Display for Timeframe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Timeframe {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "1d" => Ok(Timeframe::Day1),
            "4h" => Ok(Timeframe::Hour4),
            "1h" => Ok(Timeframe::Hour1),
            "15m" => Ok(Timeframe::Min15),
            other => Err(format!("unsupported timeframe '{}'", other)),
        }
    }
}
