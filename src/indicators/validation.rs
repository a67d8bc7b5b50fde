//! Pre-computation checks on raw candle series.

use crate::error::ValidationError;
use crate::models::{Candle, RawCandle, Timeframe, ValidatedSeries};

/// Checks sufficiency, value sanity, ordering and freshness of a raw series.
pub struct DataFreshnessValidator;

impl DataFreshnessValidator {
    /// Validate `raw` for `timeframe` at instant `now_ms`.
    ///
    /// The series must hold at least `window + warmup(timeframe)` candles so
    /// that `window` fully populated rows survive indicator warm-up.
    pub fn validate(
        raw: &[RawCandle],
        timeframe: Timeframe,
        now_ms: i64,
        window: usize,
    ) -> Result<ValidatedSeries, ValidationError> {
        let required = window + timeframe.warmup();
        if raw.len() < required {
            return Err(ValidationError::InsufficientData {
                required,
                actual: raw.len(),
            });
        }

        let candles = raw
            .iter()
            .enumerate()
            .map(|(index, candle)| parse_candle(index, candle))
            .collect::<Result<Vec<_>, _>>()?;

        check_ordering(&candles)?;

        if let Some(last) = candles.last() {
            let age_ms = now_ms.saturating_sub(last.timestamp);
            let max_staleness_ms = timeframe.max_staleness_ms();
            if age_ms > max_staleness_ms {
                return Err(ValidationError::StaleData {
                    age_ms,
                    max_staleness_ms,
                });
            }
        }

        Ok(ValidatedSeries::new(timeframe, window, candles))
    }
}

fn parse_candle(index: usize, raw: &RawCandle) -> Result<Candle, ValidationError> {
    let timestamp = raw
        .timestamp
        .trim()
        .parse::<i64>()
        .map_err(|_| invalid(index, "timestamp", format!("not an integer: '{}'", raw.timestamp)))?;

    Ok(Candle::new(
        parse_value(index, "open", &raw.open)?,
        parse_value(index, "high", &raw.high)?,
        parse_value(index, "low", &raw.low)?,
        parse_value(index, "close", &raw.close)?,
        parse_value(index, "volume", &raw.volume)?,
        timestamp,
    ))
}

fn parse_value(index: usize, field: &'static str, value: &str) -> Result<f64, ValidationError> {
    let parsed = value
        .trim()
        .parse::<f64>()
        .map_err(|_| invalid(index, field, format!("not numeric: '{}'", value)))?;

    if !parsed.is_finite() {
        return Err(invalid(index, field, format!("non-finite: '{}'", value)));
    }
    Ok(parsed)
}

fn check_ordering(candles: &[Candle]) -> Result<(), ValidationError> {
    for (offset, pair) in candles.windows(2).enumerate() {
        let (previous, current) = (pair[0].timestamp, pair[1].timestamp);
        if current == previous {
            return Err(invalid(
                offset + 1,
                "timestamp",
                format!("duplicate timestamp {}", current),
            ));
        }
        if current < previous {
            return Err(invalid(
                offset + 1,
                "timestamp",
                format!("{} is not after {}", current, previous),
            ));
        }
    }
    Ok(())
}

fn invalid(index: usize, field: &'static str, reason: String) -> ValidationError {
    ValidationError::InvalidValue {
        index,
        field,
        reason,
    }
}
