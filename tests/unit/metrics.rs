//! Unit tests for Prometheus metrics

use perpscan::metrics::Metrics;
use perpscan::models::{FailureKind, Timeframe, TimeframeVerdict};

#[test]
fn test_metrics_registry_is_isolated() {
    // each instance owns its registry, so several can coexist
    let first = Metrics::new().unwrap();
    let second = Metrics::new().unwrap();
    first.symbols_screened_total.inc();
    assert_eq!(first.symbols_screened_total.get(), 1);
    assert_eq!(second.symbols_screened_total.get(), 0);
}

#[test]
fn test_encode_exposes_screening_metrics() {
    let metrics = Metrics::new().unwrap();
    metrics.record_verdict(Timeframe::Day1, &TimeframeVerdict::Satisfied);
    metrics.record_verdict(
        Timeframe::Min15,
        &TimeframeVerdict::Unavailable(FailureKind::StaleData),
    );
    metrics.symbols_passed_total.inc();
    metrics.screening_duration_seconds.observe(1.5);

    let text = metrics.encode().unwrap();
    assert!(text.contains("perpscan_timeframe_evaluations_total"));
    assert!(text.contains("outcome=\"stale_data\""));
    assert!(text.contains("timeframe=\"15m\""));
    assert!(text.contains("perpscan_symbols_passed_total 1"));
    assert!(text.contains("perpscan_screening_duration_seconds_count 1"));
}
