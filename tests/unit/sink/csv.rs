//! Unit tests for CSV result export

use std::collections::BTreeMap;

use chrono::{FixedOffset, TimeZone};
use perpscan::models::{FailureKind, ScreeningResult, Timeframe, TimeframeVerdict};
use perpscan::sink::{CsvResultSink, ResultSink};
use tempfile::tempdir;

fn result(symbol: &str, verdicts: [TimeframeVerdict; 4]) -> ScreeningResult {
    let map: BTreeMap<Timeframe, TimeframeVerdict> =
        Timeframe::all().iter().copied().zip(verdicts).collect();
    ScreeningResult::new(symbol, map, 3)
}

fn screened_at() -> chrono::DateTime<FixedOffset> {
    FixedOffset::east_opt(8 * 3600)
        .unwrap()
        .with_ymd_and_hms(2025, 10, 9, 17, 20, 0)
        .unwrap()
}

fn sample_results() -> Vec<ScreeningResult> {
    use TimeframeVerdict::*;
    vec![
        result("BTC-USDT-SWAP", [Satisfied, Satisfied, Satisfied, NotSatisfied]),
        result("ETH-USDT-SWAP", [Satisfied, NotSatisfied, NotSatisfied, NotSatisfied]),
        result(
            "SOL-USDT-SWAP",
            [Satisfied, Unavailable(FailureKind::Data), Satisfied, Satisfied],
        ),
    ]
}

#[test]
fn test_render_only_passing_symbols() {
    let sink = CsvResultSink::new(".");
    let text = sink.render(&sample_results(), screened_at()).unwrap();
    let lines: Vec<&str> = text.lines().collect();

    assert_eq!(
        lines,
        vec![
            "symbol,1d,4h,1h,15m,satisfied,beijing_time",
            "BTC-USDT-SWAP,true,true,true,false,3,2025-10-09 17:20:00",
            "SOL-USDT-SWAP,true,,true,true,3,2025-10-09 17:20:00",
        ]
    );
}

#[test]
fn test_render_restricted_timeframes() {
    let sink = CsvResultSink::new(".").with_timeframes(vec![Timeframe::Day1, Timeframe::Min15]);
    let text = sink.render(&sample_results(), screened_at()).unwrap();
    assert_eq!(text.lines().next(), Some("symbol,1d,15m,satisfied,beijing_time"));
}

#[test]
fn test_write_creates_timestamped_file() {
    let dir = tempdir().unwrap();
    let output = dir.path().join("results");
    let sink = CsvResultSink::new(&output);

    let path = sink
        .write(&sample_results(), screened_at())
        .unwrap()
        .expect("a file should be written");

    assert_eq!(
        path.file_name().unwrap().to_str().unwrap(),
        format!("screened_symbols_{}.csv", screened_at().timestamp())
    );
    let contents = std::fs::read_to_string(&path).unwrap();
    assert_eq!(contents.lines().count(), 3);
    assert!(contents.contains("SOL-USDT-SWAP"));
    assert!(!contents.contains("ETH-USDT-SWAP"));
}

#[test]
fn test_write_skips_when_nothing_passed() {
    use TimeframeVerdict::*;
    let dir = tempdir().unwrap();
    let sink = CsvResultSink::new(dir.path());
    let results = vec![result(
        "ETH-USDT-SWAP",
        [Satisfied, NotSatisfied, NotSatisfied, NotSatisfied],
    )];

    assert_eq!(sink.write(&results, screened_at()).unwrap(), None);
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}
