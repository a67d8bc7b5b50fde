//! SMA (Simple Moving Average) indicator

use crate::common::math;

/// SMA column together with its previous-period column
#[derive(Debug, Clone, PartialEq)]
pub struct SmaColumns {
    pub current: Vec<Option<f64>>,
    pub previous: Vec<Option<f64>>,
}

/// Calculate the SMA column for a specific period
pub fn calculate_sma(closes: &[f64], period: usize) -> Vec<Option<f64>> {
    math::sma_series(closes, period)
}

/// Calculate SMA plus its value one period earlier, used for slope checks
pub fn calculate_sma_with_previous(closes: &[f64], period: usize) -> SmaColumns {
    let current = calculate_sma(closes, period);
    let previous = math::shift(&current);
    SmaColumns { current, previous }
}
