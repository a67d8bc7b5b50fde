use std::collections::BTreeMap;

use super::candle::Candle;
use super::indicators::{IndicatorColumn, IndicatorSnapshot};
use super::timeframe::Timeframe;

/// Candle series that passed sufficiency, ordering, value and freshness checks
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedSeries {
    timeframe: Timeframe,
    window: usize,
    candles: Vec<Candle>,
}

impl ValidatedSeries {
    pub(crate) fn new(timeframe: Timeframe, window: usize, candles: Vec<Candle>) -> Self {
        Self {
            timeframe,
            window,
            candles,
        }
    }

    pub fn timeframe(&self) -> Timeframe {
        self.timeframe
    }

    /// Number of rows the indicator engine must retain
    pub fn window(&self) -> usize {
        self.window
    }

    pub fn candles(&self) -> &[Candle] {
        &self.candles
    }

    pub fn closes(&self) -> Vec<f64> {
        self.candles.iter().map(|c| c.close).collect()
    }

    pub fn len(&self) -> usize {
        self.candles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candles.is_empty()
    }
}

/// Trailing window of candles with every required indicator column populated
#[derive(Debug, Clone, PartialEq)]
pub struct EnrichedSeries {
    timeframe: Timeframe,
    candles: Vec<Candle>,
    columns: BTreeMap<IndicatorColumn, Vec<f64>>,
}

impl EnrichedSeries {
    pub(crate) fn new(
        timeframe: Timeframe,
        candles: Vec<Candle>,
        columns: BTreeMap<IndicatorColumn, Vec<f64>>,
    ) -> Self {
        debug_assert!(columns.values().all(|c| c.len() == candles.len()));
        Self {
            timeframe,
            candles,
            columns,
        }
    }

    pub fn timeframe(&self) -> Timeframe {
        self.timeframe
    }

    pub fn candles(&self) -> &[Candle] {
        &self.candles
    }

    pub fn column(&self, column: IndicatorColumn) -> Option<&[f64]> {
        self.columns.get(&column).map(Vec::as_slice)
    }

    pub fn columns(&self) -> impl Iterator<Item = IndicatorColumn> + '_ {
        self.columns.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.candles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candles.is_empty()
    }

    /// Close and indicator values of the final row
    pub fn snapshot(&self) -> Option<IndicatorSnapshot> {
        let last = self.candles.last()?;
        let index = self.candles.len() - 1;
        let snapshot = self
            .columns
            .iter()
            .filter_map(|(column, values)| values.get(index).map(|v| (*column, *v)))
            .fold(IndicatorSnapshot::new(last.timestamp, last.close), |s, (c, v)| {
                s.with(c, v)
            });
        Some(snapshot)
    }
}
