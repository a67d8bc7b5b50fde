//! Unit tests for the indicator engine

use std::collections::BTreeSet;

use perpscan::indicators::{DataFreshnessValidator, IndicatorEngine, IndicatorError};
use perpscan::models::{IndicatorColumn, Timeframe, ValidatedSeries};

use crate::test_utils::{bullish_closes, raw_series, NOW_MS};

const WINDOW: usize = 100;

fn validated(timeframe: Timeframe, count: usize) -> ValidatedSeries {
    let raw = raw_series(&bullish_closes(count), timeframe, NOW_MS);
    DataFreshnessValidator::validate(&raw, timeframe, NOW_MS, WINDOW).expect("valid series")
}

#[test]
fn test_compute_is_idempotent() {
    for &timeframe in Timeframe::all() {
        let series = validated(timeframe, 180);
        let first = IndicatorEngine::compute(&series, timeframe).unwrap();
        let second = IndicatorEngine::compute(&series, timeframe).unwrap();

        assert_eq!(first, second);
        for column in first.columns() {
            let a: Vec<u64> = first.column(column).unwrap().iter().map(|v| v.to_bits()).collect();
            let b: Vec<u64> = second.column(column).unwrap().iter().map(|v| v.to_bits()).collect();
            assert_eq!(a, b, "{} differs between runs", column);
        }
    }
}

#[test]
fn test_compute_returns_exactly_window_rows() {
    for &timeframe in Timeframe::all() {
        for count in [WINDOW + timeframe.warmup(), 180, 300] {
            let series = validated(timeframe, count);
            let enriched = IndicatorEngine::compute(&series, timeframe).unwrap();

            assert_eq!(enriched.len(), WINDOW);
            assert_eq!(enriched.timeframe(), timeframe);

            let columns: BTreeSet<IndicatorColumn> = enriched.columns().collect();
            let required: BTreeSet<IndicatorColumn> =
                timeframe.required_columns().into_iter().collect();
            assert_eq!(columns, required);

            for column in required {
                let values = enriched.column(column).unwrap();
                assert_eq!(values.len(), WINDOW);
                assert!(values.iter().all(|v| v.is_finite()), "{} has gaps", column);
            }
        }
    }
}

#[test]
fn test_compute_keeps_trailing_rows() {
    let series = validated(Timeframe::Hour4, 180);
    let enriched = IndicatorEngine::compute(&series, Timeframe::Hour4).unwrap();
    assert_eq!(enriched.candles(), &series.candles()[80..]);
}

#[test]
fn test_compute_fails_without_enough_populated_rows() {
    // long enough for the 15m warm-up, too short for the 50-period daily SMA
    let series = validated(Timeframe::Min15, WINDOW + 33);
    let result = IndicatorEngine::compute(&series, Timeframe::Day1);
    assert_eq!(
        result.unwrap_err(),
        IndicatorError::InsufficientRows {
            required: WINDOW,
            available: WINDOW + 33 - 49,
        }
    );
}

#[test]
fn test_snapshot_reflects_final_row() {
    let series = validated(Timeframe::Day1, 200);
    let enriched = IndicatorEngine::compute(&series, Timeframe::Day1).unwrap();
    let snapshot = enriched.snapshot().unwrap();

    let last = series.candles().last().unwrap();
    assert_eq!(snapshot.timestamp, last.timestamp);
    assert_eq!(snapshot.close, last.close);

    let ma5 = enriched.column(IndicatorColumn::Sma { period: 5 }).unwrap();
    assert_eq!(snapshot.get(IndicatorColumn::Sma { period: 5 }), ma5.last().copied());

    let prev = enriched.column(IndicatorColumn::SmaPrev { period: 5 }).unwrap();
    assert_eq!(prev[WINDOW - 1], ma5[WINDOW - 2]);
}
