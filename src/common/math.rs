//! Column-wise moving-average math.
//!
//! Every function returns a column aligned with its input: `None` marks the
//! warm-up rows where the value cannot be computed yet.

/// Arithmetic mean of a slice
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Next EMA value given the previous one
pub fn ema_from_previous(value: f64, previous: f64, period: usize) -> f64 {
    let alpha = 2.0 / (period as f64 + 1.0);
    alpha * value + (1.0 - alpha) * previous
}

/// Rolling simple moving average, first value at index `period - 1`
pub fn sma_series(values: &[f64], period: usize) -> Vec<Option<f64>> {
    let mut out = vec![None; values.len()];
    if period == 0 || values.len() < period {
        return out;
    }

    // Each window is summed from scratch so results do not depend on
    // accumulated rounding from earlier rows.
    for end in period..=values.len() {
        out[end - 1] = mean(&values[end - period..end]);
    }
    out
}

/// Exponential moving average seeded with the SMA of the first `period` values
pub fn ema_series(values: &[f64], period: usize) -> Vec<Option<f64>> {
    let mut out = vec![None; values.len()];
    if period == 0 || values.len() < period {
        return out;
    }

    let Some(seed) = mean(&values[..period]) else {
        return out;
    };
    out[period - 1] = Some(seed);

    let mut previous = seed;
    for i in period..values.len() {
        previous = ema_from_previous(values[i], previous, period);
        out[i] = Some(previous);
    }
    out
}

/// EMA over a column that itself has a warm-up prefix.
///
/// The EMA starts at the first populated row; the populated part must be
/// contiguous, which holds for every column produced in this crate.
pub fn ema_of_column(column: &[Option<f64>], period: usize) -> Vec<Option<f64>> {
    let Some(start) = column.iter().position(Option::is_some) else {
        return vec![None; column.len()];
    };

    let tail: Vec<f64> = column[start..].iter().map_while(|v| *v).collect();
    let mut out = vec![None; start];
    out.extend(ema_series(&tail, period));
    out.resize(column.len(), None);
    out
}

/// Shift a column down by one row (the previous-period value)
pub fn shift(column: &[Option<f64>]) -> Vec<Option<f64>> {
    if column.is_empty() {
        return Vec::new();
    }
    let mut out = Vec::with_capacity(column.len());
    out.push(None);
    out.extend_from_slice(&column[..column.len() - 1]);
    out
}

/// Row-wise difference of two columns
pub fn subtract(lhs: &[Option<f64>], rhs: &[Option<f64>]) -> Vec<Option<f64>> {
    lhs.iter()
        .zip(rhs)
        .map(|(a, b)| match (a, b) {
            (Some(a), Some(b)) => Some(a - b),
            _ => None,
        })
        .collect()
}
