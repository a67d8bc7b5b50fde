//! Timeframe-aware indicator computation over validated candle series.

use std::collections::BTreeMap;

use super::error::IndicatorError;
use super::momentum::{calculate_macd_default, calculate_rsi_default, RSI_PERIOD};
use super::trend::calculate_sma_with_previous;
use crate::models::{EnrichedSeries, IndicatorColumn, Timeframe, ValidatedSeries};

type Column = Vec<Option<f64>>;

pub struct IndicatorEngine;

impl IndicatorEngine {
    /// Attach the indicator columns `timeframe` requires, drop warm-up rows
    /// and keep exactly the trailing `series.window()` rows.
    pub fn compute(
        series: &ValidatedSeries,
        timeframe: Timeframe,
    ) -> Result<EnrichedSeries, IndicatorError> {
        let columns = Self::compute_columns(series, timeframe);
        let required = timeframe.required_columns();

        let mut selected: Vec<(IndicatorColumn, &Column)> = Vec::with_capacity(required.len());
        for column in required {
            let values = columns
                .get(&column)
                .ok_or(IndicatorError::MissingIndicator { column, timeframe })?;
            selected.push((column, values));
        }

        // A row is usable only when every required column holds a finite value
        let populated: Vec<usize> = (0..series.len())
            .filter(|&row| {
                selected
                    .iter()
                    .all(|(_, values)| matches!(values.get(row), Some(Some(v)) if v.is_finite()))
            })
            .collect();

        let window = series.window();
        if populated.len() < window {
            return Err(IndicatorError::InsufficientRows {
                required: window,
                available: populated.len(),
            });
        }
        let rows = &populated[populated.len() - window..];

        let candles = rows.iter().map(|&row| series.candles()[row]).collect();
        let enriched = selected
            .into_iter()
            .map(|(column, values)| {
                let kept: Vec<f64> = rows.iter().filter_map(|&row| values[row]).collect();
                (column, kept)
            })
            .collect();

        Ok(EnrichedSeries::new(timeframe, candles, enriched))
    }

    fn compute_columns(
        series: &ValidatedSeries,
        timeframe: Timeframe,
    ) -> BTreeMap<IndicatorColumn, Column> {
        let closes = series.closes();
        let mut columns = BTreeMap::new();

        let macd = calculate_macd_default(&closes);
        columns.insert(IndicatorColumn::MacdLine, macd.line);
        columns.insert(IndicatorColumn::MacdSignal, macd.signal);
        columns.insert(IndicatorColumn::MacdHistogram, macd.histogram);

        columns.insert(
            IndicatorColumn::Rsi { period: RSI_PERIOD },
            calculate_rsi_default(&closes),
        );

        for &period in timeframe.sma_periods() {
            let sma = calculate_sma_with_previous(&closes, period);
            columns.insert(IndicatorColumn::Sma { period }, sma.current);
            if timeframe.slope_periods().contains(&period) {
                columns.insert(IndicatorColumn::SmaPrev { period }, sma.previous);
            }
        }

        columns
    }
}
