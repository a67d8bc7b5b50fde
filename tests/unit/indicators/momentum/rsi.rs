//! Unit tests for RSI indicator

use perpscan::indicators::momentum::{calculate_rsi, calculate_rsi_default, RSI_PERIOD};

use crate::test_utils::{bearish_closes, bullish_closes, linear_closes};

#[test]
fn test_rsi_insufficient_data() {
    let closes = linear_closes(RSI_PERIOD, 100.0, 1.0);
    assert!(calculate_rsi_default(&closes).iter().all(Option::is_none));
}

#[test]
fn test_rsi_first_value_at_period() {
    let closes = linear_closes(20, 100.0, 1.0);
    let rsi = calculate_rsi(&closes, 7);
    assert_eq!(rsi.iter().position(Option::is_some), Some(7));
}

#[test]
fn test_rsi_seed_value() {
    // four gains and three losses of equal size: RS = 4/3
    let closes = vec![10.0, 11.0, 10.0, 11.0, 10.0, 11.0, 10.0, 11.0];
    let rsi = calculate_rsi(&closes, 7);
    let value = rsi[7].unwrap();
    assert!((value - 400.0 / 7.0).abs() < 1e-9, "got {}", value);
}

#[test]
fn test_rsi_wilder_smoothing_step() {
    let closes = vec![10.0, 11.0, 10.0, 11.0, 10.0, 11.0, 10.0, 11.0, 12.0];
    let rsi = calculate_rsi(&closes, 7);
    // avg_gain = (4/7 * 6 + 1) / 7, avg_loss = (3/7 * 6) / 7
    let avg_gain = (4.0 / 7.0 * 6.0 + 1.0) / 7.0;
    let avg_loss = (3.0 / 7.0 * 6.0) / 7.0;
    let expected = 100.0 - 100.0 / (1.0 + avg_gain / avg_loss);
    assert!((rsi[8].unwrap() - expected).abs() < 1e-9);
}

#[test]
fn test_rsi_only_gains_is_100() {
    let rsi = calculate_rsi_default(&linear_closes(30, 100.0, 1.0));
    assert_eq!(rsi.last().copied().flatten(), Some(100.0));
}

#[test]
fn test_rsi_only_losses_is_0() {
    let rsi = calculate_rsi_default(&linear_closes(30, 100.0, -1.0));
    assert_eq!(rsi.last().copied().flatten(), Some(0.0));
}

#[test]
fn test_rsi_flat_series_is_neutral() {
    let rsi = calculate_rsi_default(&[42.0; 30]);
    assert_eq!(rsi.last().copied().flatten(), Some(50.0));
}

#[test]
fn test_rsi_bounds() {
    for closes in [bullish_closes(150), bearish_closes(150)] {
        for value in calculate_rsi_default(&closes).into_iter().flatten() {
            assert!((0.0..=100.0).contains(&value));
        }
    }
}

#[test]
fn test_rsi_alternating_series_settles() {
    let bullish = calculate_rsi_default(&bullish_closes(150));
    let value = bullish.last().copied().flatten().unwrap();
    assert!(value > 60.0 && value < 70.0, "got {}", value);

    let bearish = calculate_rsi_default(&bearish_closes(150));
    let value = bearish.last().copied().flatten().unwrap();
    assert!(value > 30.0 && value < 40.0, "got {}", value);
}
