//! EMA (Exponential Moving Average) indicator

use crate::common::math;

/// Calculate the EMA column for a specific period
pub fn calculate_ema(closes: &[f64], period: usize) -> Vec<Option<f64>> {
    math::ema_series(closes, period)
}
