//! Unit tests for MACD indicator

use perpscan::indicators::momentum::{
    calculate_macd, calculate_macd_default, MACD_SIGNAL_PERIOD, MACD_SLOW_PERIOD,
};

use crate::test_utils::{bullish_closes, linear_closes};

#[test]
fn test_macd_insufficient_data() {
    let closes = linear_closes(20, 100.0, 1.0);
    let macd = calculate_macd_default(&closes);
    assert_eq!(macd.line.len(), 20);
    assert!(macd.line.iter().all(Option::is_none));
    assert!(macd.histogram.iter().all(Option::is_none));
}

#[test]
fn test_macd_warmup_offsets() {
    let closes = linear_closes(60, 100.0, 0.5);
    let macd = calculate_macd_default(&closes);

    let first_line = macd.line.iter().position(Option::is_some);
    let first_signal = macd.signal.iter().position(Option::is_some);
    let first_hist = macd.histogram.iter().position(Option::is_some);

    assert_eq!(first_line, Some(MACD_SLOW_PERIOD - 1));
    assert_eq!(first_signal, Some(MACD_SLOW_PERIOD + MACD_SIGNAL_PERIOD - 2));
    assert_eq!(first_hist, first_signal);
}

#[test]
fn test_macd_flat_series_is_zero() {
    let closes = vec![50.0; 60];
    let macd = calculate_macd_default(&closes);
    let last = macd.histogram.last().copied().flatten().unwrap();
    assert!(last.abs() < 1e-12);
    assert!(macd.line.last().copied().flatten().unwrap().abs() < 1e-12);
}

#[test]
fn test_macd_uptrend_line_positive() {
    let closes = linear_closes(80, 100.0, 1.0);
    let macd = calculate_macd_default(&closes);
    let line = macd.line.last().copied().flatten().unwrap();
    assert!(line > 0.0, "fast EMA should lead slow EMA in an uptrend");
}

#[test]
fn test_macd_histogram_is_line_minus_signal() {
    let closes = bullish_closes(120);
    let macd = calculate_macd(&closes, 12, 26, 9);
    for i in 0..closes.len() {
        if let (Some(line), Some(signal), Some(hist)) =
            (macd.line[i], macd.signal[i], macd.histogram[i])
        {
            assert!((hist - (line - signal)).abs() < 1e-12);
        }
    }
    assert!(macd.histogram.last().copied().flatten().unwrap() > 0.0);
}
