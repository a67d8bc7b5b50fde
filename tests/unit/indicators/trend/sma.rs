//! Unit tests for SMA indicator

use perpscan::indicators::trend::{calculate_ema, calculate_sma, calculate_sma_with_previous};

use crate::test_utils::linear_closes;

#[test]
fn test_sma_insufficient_data() {
    let closes = linear_closes(4, 100.0, 1.0);
    assert!(calculate_sma(&closes, 5).iter().all(Option::is_none));
}

#[test]
fn test_sma_value() {
    let closes = linear_closes(10, 1.0, 1.0);
    let sma = calculate_sma(&closes, 5);
    assert_eq!(sma[4], Some(3.0));
    assert_eq!(sma[9], Some(8.0));
}

#[test]
fn test_sma_previous_is_shifted_current() {
    let closes = linear_closes(30, 100.0, 0.5);
    let columns = calculate_sma_with_previous(&closes, 5);
    assert_eq!(columns.previous[0], None);
    for i in 1..closes.len() {
        assert_eq!(columns.previous[i], columns.current[i - 1]);
    }
}

#[test]
fn test_sma_rising_in_uptrend() {
    let closes = linear_closes(30, 100.0, 1.0);
    let columns = calculate_sma_with_previous(&closes, 20);
    let current = columns.current.last().copied().flatten().unwrap();
    let previous = columns.previous.last().copied().flatten().unwrap();
    assert!(current > previous);
}

#[test]
fn test_ema_tracks_uptrend_below_price() {
    let closes = linear_closes(50, 100.0, 1.0);
    let ema = calculate_ema(&closes, 12);
    let last = ema.last().copied().flatten().unwrap();
    assert!(last < *closes.last().unwrap());
    assert!(last.is_finite());
}
