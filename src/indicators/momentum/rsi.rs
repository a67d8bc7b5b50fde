//! RSI (Relative Strength Index) indicator

pub const RSI_PERIOD: usize = 7;

/// Calculate RSI with Wilder smoothing
///
/// RSI = 100 - (100 / (1 + RS))
/// RS = Average Gain / Average Loss
///
/// Averages are seeded with the mean of the first `period` changes, so the
/// first value lands at index `period`.
pub fn calculate_rsi(closes: &[f64], period: usize) -> Vec<Option<f64>> {
    let mut out = vec![None; closes.len()];
    if period == 0 || closes.len() < period + 1 {
        return out;
    }

    let changes: Vec<f64> = closes.windows(2).map(|w| w[1] - w[0]).collect();
    let gain = |change: f64| change.max(0.0);
    let loss = |change: f64| (-change).max(0.0);

    let mut avg_gain = changes[..period].iter().copied().map(gain).sum::<f64>() / period as f64;
    let mut avg_loss = changes[..period].iter().copied().map(loss).sum::<f64>() / period as f64;
    out[period] = Some(rsi_value(avg_gain, avg_loss));

    let smoothing = (period - 1) as f64;
    for (offset, &change) in changes[period..].iter().enumerate() {
        avg_gain = (avg_gain * smoothing + gain(change)) / period as f64;
        avg_loss = (avg_loss * smoothing + loss(change)) / period as f64;
        out[period + offset + 1] = Some(rsi_value(avg_gain, avg_loss));
    }
    out
}

/// Calculate RSI with the screener's default period (7)
pub fn calculate_rsi_default(closes: &[f64]) -> Vec<Option<f64>> {
    calculate_rsi(closes, RSI_PERIOD)
}

fn rsi_value(avg_gain: f64, avg_loss: f64) -> f64 {
    if avg_loss == 0.0 {
        // flat series: no momentum either way
        return if avg_gain == 0.0 { 50.0 } else { 100.0 };
    }
    let rs = avg_gain / avg_loss;
    (100.0 - (100.0 / (1.0 + rs))).clamp(0.0, 100.0)
}
