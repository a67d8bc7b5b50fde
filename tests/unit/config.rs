//! Unit tests for environment configuration

use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

use perpscan::config::{ConfigError, ScreenerConfig};
use perpscan::models::Timeframe;

fn from_pairs(pairs: &[(&str, &str)]) -> Result<ScreenerConfig, ConfigError> {
    let vars: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    ScreenerConfig::from_lookup(|key| vars.get(key).cloned())
}

#[test]
fn test_defaults() {
    let config = from_pairs(&[]).unwrap();
    assert_eq!(config, ScreenerConfig::default());
    assert_eq!(config.screening.window, 100);
    assert_eq!(config.screening.quorum, 3);
    assert_eq!(config.screening.timeframes, Timeframe::all());
    assert_eq!(config.top_n, 30);
    assert_eq!(config.quote_currency, "USDT");
    assert_eq!(config.okx_base_url, "https://www.okx.com");
    assert_eq!(config.okx_url().unwrap().as_str(), "https://www.okx.com/");
    assert!(config.schedule.is_none());
}

#[test]
fn test_overrides() {
    let config = from_pairs(&[
        ("SCREEN_WINDOW", "120"),
        ("SCREEN_TIMEFRAMES", "1h, 15m, 1h"),
        ("SCREEN_QUORUM", "2"),
        ("SCREEN_FETCH_TIMEOUT_MS", "2500"),
        ("SCREEN_CONCURRENCY", "8"),
        ("SCREEN_TOP_N", "10"),
        ("SCREEN_QUOTE_CCY", "USDC"),
        ("OKX_BASE_URL", "http://localhost:9000"),
        ("SCREEN_OUTPUT_DIR", "/tmp/perpscan"),
        ("SCREEN_SCHEDULE", "0 */15 * * * *"),
    ])
    .unwrap();

    assert_eq!(config.screening.window, 120);
    assert_eq!(
        config.screening.timeframes,
        vec![Timeframe::Hour1, Timeframe::Min15]
    );
    assert_eq!(config.screening.quorum, 2);
    assert_eq!(config.screening.fetch_timeout, Duration::from_millis(2500));
    assert_eq!(config.concurrency, 8);
    assert_eq!(config.top_n, 10);
    assert_eq!(config.quote_currency, "USDC");
    assert_eq!(config.okx_url().unwrap().host_str(), Some("localhost"));
    assert_eq!(config.output_dir, PathBuf::from("/tmp/perpscan"));
    assert_eq!(config.schedule.as_deref(), Some("0 */15 * * * *"));
}

#[test]
fn test_blank_schedule_means_run_once() {
    let config = from_pairs(&[("SCREEN_SCHEDULE", "  ")]).unwrap();
    assert!(config.schedule.is_none());
}

#[test]
fn test_quorum_must_fit_timeframes() {
    let err = from_pairs(&[("SCREEN_TIMEFRAMES", "1d,4h"), ("SCREEN_QUORUM", "3")]).unwrap_err();
    assert!(matches!(err, ConfigError::Invalid { key: "SCREEN_QUORUM", .. }));

    let err = from_pairs(&[("SCREEN_QUORUM", "0")]).unwrap_err();
    assert!(matches!(err, ConfigError::Invalid { key: "SCREEN_QUORUM", .. }));
}

#[test]
fn test_rejects_bad_values() {
    for (key, value) in [
        ("SCREEN_WINDOW", "0"),
        ("SCREEN_WINDOW", "many"),
        ("SCREEN_TIMEFRAMES", "1d,5m"),
        ("SCREEN_TIMEFRAMES", ","),
        ("SCREEN_CONCURRENCY", "0"),
        ("OKX_BASE_URL", "not a url"),
    ] {
        let err = from_pairs(&[(key, value)]).unwrap_err();
        match err {
            ConfigError::Invalid { key: reported, .. } => assert_eq!(reported, key),
        }
    }
}

#[test]
fn test_window_must_fit_candle_limit() {
    // 1d needs 49 warm-up rows on top of the window
    assert!(from_pairs(&[("SCREEN_WINDOW", "251")]).is_ok());

    let err = from_pairs(&[("SCREEN_WINDOW", "260")]).unwrap_err();
    assert!(matches!(err, ConfigError::Invalid { key: "SCREEN_WINDOW", .. }));

    // without 1d the largest warm-up is 33
    let config = from_pairs(&[("SCREEN_WINDOW", "260"), ("SCREEN_TIMEFRAMES", "4h,1h,15m")])
        .unwrap();
    assert_eq!(config.screening.window, 260);

    let err = from_pairs(&[("SCREEN_WINDOW", "268"), ("SCREEN_TIMEFRAMES", "15m")]).unwrap_err();
    assert!(matches!(err, ConfigError::Invalid { key: "SCREEN_WINDOW", .. }));
}
