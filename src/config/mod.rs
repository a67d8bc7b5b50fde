//! Environment-driven configuration.
//!
//! Values are read from the process environment; the binary loads `.env`
//! through `dotenvy` before calling [`ScreenerConfig::from_env`].

use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;
use url::Url;

use crate::models::Timeframe;
use crate::services::okx::MAX_CANDLE_LIMIT;

pub const DEFAULT_WINDOW: usize = 100;
pub const DEFAULT_QUORUM: usize = 3;
pub const DEFAULT_FETCH_MARGIN: usize = 50;
pub const DEFAULT_FETCH_TIMEOUT_MS: u64 = 10_000;
pub const DEFAULT_CONCURRENCY: usize = 4;
pub const DEFAULT_TOP_N: usize = 30;
pub const DEFAULT_QUOTE_CCY: &str = "USDT";
pub const DEFAULT_OKX_BASE_URL: &str = "https://www.okx.com";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {key}: '{value}' ({reason})")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

/// Deployment environment (`APP_ENV`), defaults to `sandbox`
pub fn get_environment() -> String {
    env::var("APP_ENV").unwrap_or_else(|_| "sandbox".to_string())
}

/// Parameters of the screening core
#[derive(Debug, Clone, PartialEq)]
pub struct ScreeningConfig {
    /// Rows evaluated per timeframe after warm-up removal
    pub window: usize,
    pub timeframes: Vec<Timeframe>,
    /// Satisfied timeframes required for a symbol to pass
    pub quorum: usize,
    /// Extra candles requested beyond `window`
    pub fetch_margin: usize,
    pub fetch_timeout: Duration,
}

impl ScreeningConfig {
    /// Candles requested from the data source for one timeframe
    pub fn fetch_limit(&self, timeframe: Timeframe) -> usize {
        (self.window + self.fetch_margin).max(self.window + timeframe.warmup())
    }
}

impl Default for ScreeningConfig {
    fn default() -> Self {
        Self {
            window: DEFAULT_WINDOW,
            timeframes: Timeframe::all().to_vec(),
            quorum: DEFAULT_QUORUM,
            fetch_margin: DEFAULT_FETCH_MARGIN,
            fetch_timeout: Duration::from_millis(DEFAULT_FETCH_TIMEOUT_MS),
        }
    }
}

/// Full application configuration
#[derive(Debug, Clone, PartialEq)]
pub struct ScreenerConfig {
    pub screening: ScreeningConfig,
    /// Symbols screened concurrently
    pub concurrency: usize,
    pub top_n: usize,
    pub quote_currency: String,
    pub okx_base_url: String,
    pub output_dir: PathBuf,
    /// Cron expression; when absent the screener runs once
    pub schedule: Option<String>,
}

impl Default for ScreenerConfig {
    fn default() -> Self {
        Self {
            screening: ScreeningConfig::default(),
            concurrency: DEFAULT_CONCURRENCY,
            top_n: DEFAULT_TOP_N,
            quote_currency: DEFAULT_QUOTE_CCY.to_string(),
            okx_base_url: DEFAULT_OKX_BASE_URL.to_string(),
            output_dir: PathBuf::from("."),
            schedule: None,
        }
    }
}

impl ScreenerConfig {
    /// OKX REST base URL
    pub fn okx_url(&self) -> Result<Url, ConfigError> {
        parse_url(&self.okx_base_url)
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary key lookup; unset keys keep their defaults
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let window = parse_or(&lookup, "SCREEN_WINDOW", defaults.screening.window)?;
        if window == 0 {
            return Err(invalid("SCREEN_WINDOW", "0", "window must be positive"));
        }

        let timeframes = match lookup("SCREEN_TIMEFRAMES") {
            Some(raw) => parse_timeframes(&raw)?,
            None => defaults.screening.timeframes,
        };

        // Every timeframe must fit `window + warmup` candles in one OKX page
        let max_warmup = timeframes.iter().map(Timeframe::warmup).max().unwrap_or(0);
        if window + max_warmup > MAX_CANDLE_LIMIT {
            return Err(invalid(
                "SCREEN_WINDOW",
                &window.to_string(),
                &format!(
                    "window plus warm-up ({}) exceeds the {} candle fetch limit",
                    max_warmup, MAX_CANDLE_LIMIT
                ),
            ));
        }

        let quorum = parse_or(&lookup, "SCREEN_QUORUM", defaults.screening.quorum)?;
        if quorum == 0 || quorum > timeframes.len() {
            return Err(invalid(
                "SCREEN_QUORUM",
                &quorum.to_string(),
                &format!("must be between 1 and {}", timeframes.len()),
            ));
        }

        let fetch_margin = parse_or(&lookup, "SCREEN_FETCH_MARGIN", defaults.screening.fetch_margin)?;
        let fetch_timeout_ms =
            parse_or(&lookup, "SCREEN_FETCH_TIMEOUT_MS", DEFAULT_FETCH_TIMEOUT_MS)?;

        let concurrency = parse_or(&lookup, "SCREEN_CONCURRENCY", defaults.concurrency)?;
        if concurrency == 0 {
            return Err(invalid("SCREEN_CONCURRENCY", "0", "concurrency must be positive"));
        }

        let top_n = parse_or(&lookup, "SCREEN_TOP_N", defaults.top_n)?;
        let quote_currency = lookup("SCREEN_QUOTE_CCY").unwrap_or(defaults.quote_currency);

        let okx_base_url = lookup("OKX_BASE_URL").unwrap_or(defaults.okx_base_url);
        parse_url(&okx_base_url)?;

        let output_dir = lookup("SCREEN_OUTPUT_DIR")
            .map(PathBuf::from)
            .unwrap_or(defaults.output_dir);
        let schedule = lookup("SCREEN_SCHEDULE").filter(|s| !s.trim().is_empty());

        Ok(Self {
            screening: ScreeningConfig {
                window,
                timeframes,
                quorum,
                fetch_margin,
                fetch_timeout: Duration::from_millis(fetch_timeout_ms),
            },
            concurrency,
            top_n,
            quote_currency,
            okx_base_url,
            output_dir,
            schedule,
        })
    }
}

fn parse_or<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e: T::Err| invalid(key, &raw, &e.to_string())),
        None => Ok(default),
    }
}

fn parse_url(raw: &str) -> Result<Url, ConfigError> {
    Url::parse(raw).map_err(|e| invalid("OKX_BASE_URL", raw, &e.to_string()))
}

fn parse_timeframes(raw: &str) -> Result<Vec<Timeframe>, ConfigError> {
    let mut timeframes = Vec::new();
    for part in raw.split(',').filter(|p| !p.trim().is_empty()) {
        let timeframe = part
            .parse::<Timeframe>()
            .map_err(|e| invalid("SCREEN_TIMEFRAMES", raw, &e))?;
        if !timeframes.contains(&timeframe) {
            timeframes.push(timeframe);
        }
    }
    if timeframes.is_empty() {
        return Err(invalid("SCREEN_TIMEFRAMES", raw, "no timeframes given"));
    }
    Ok(timeframes)
}

fn invalid(key: &'static str, value: &str, reason: &str) -> ConfigError {
    ConfigError::Invalid {
        key,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}
