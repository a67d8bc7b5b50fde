//! Screening runtime: fans symbols out over a bounded task set

use chrono::{DateTime, FixedOffset, Offset, Utc};
use futures_util::stream::{self, StreamExt};
use std::sync::Arc;
use std::time::Instant;
use tracing::{error, info};

use crate::config::DEFAULT_CONCURRENCY;
use crate::error::DataError;
use crate::metrics::Metrics;
use crate::models::ScreeningResult;
use crate::services::universe::{select_universe, RankedSymbol};
use crate::signals::ScreeningAggregator;

const BEIJING_OFFSET_SECONDS: i32 = 8 * 3600;

/// Beijing time (UTC+8) for a millisecond timestamp
pub fn beijing_time(timestamp_ms: i64) -> DateTime<FixedOffset> {
    let offset = FixedOffset::east_opt(BEIJING_OFFSET_SECONDS).unwrap_or_else(|| Utc.fix());
    DateTime::from_timestamp_millis(timestamp_ms)
        .unwrap_or_default()
        .with_timezone(&offset)
}

/// Outcome of one complete run over the selected universe
#[derive(Debug, Clone)]
pub struct ScreeningRun {
    pub screened_at: DateTime<FixedOffset>,
    pub universe: Vec<RankedSymbol>,
    pub results: Vec<ScreeningResult>,
}

impl ScreeningRun {
    pub fn passed(&self) -> impl Iterator<Item = &ScreeningResult> {
        self.results.iter().filter(|result| result.passed)
    }
}

pub struct ScreeningRuntime {
    aggregator: Arc<ScreeningAggregator>,
    concurrency: usize,
    metrics: Option<Arc<Metrics>>,
}

impl ScreeningRuntime {
    pub fn new(aggregator: Arc<ScreeningAggregator>) -> Self {
        Self {
            aggregator,
            concurrency: DEFAULT_CONCURRENCY,
            metrics: None,
        }
    }

    /// Set how many symbols are screened at once (sized to the data source's rate limit)
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    pub fn with_metrics(mut self, metrics: Arc<Metrics>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    /// Screen `symbols`, returning results in input order.
    ///
    /// Each symbol runs in its own task; a symbol whose task panics is logged
    /// and left out of the results while the remaining symbols carry on.
    pub async fn run(&self, symbols: &[String]) -> Vec<ScreeningResult> {
        let start = Instant::now();

        let tasks = symbols.iter().cloned().enumerate().map(|(index, symbol)| {
            let aggregator = self.aggregator.clone();
            let task_symbol = symbol.clone();
            async move {
                let handle = tokio::spawn(async move { aggregator.screen(&task_symbol).await });
                (index, symbol, handle.await)
            }
        });

        let mut outcomes: Vec<_> = stream::iter(tasks)
            .buffer_unordered(self.concurrency)
            .collect()
            .await;
        outcomes.sort_by_key(|(index, _, _)| *index);

        let mut results = Vec::with_capacity(outcomes.len());
        for (_, symbol, outcome) in outcomes {
            match outcome {
                Ok(result) => {
                    if let Some(ref metrics) = self.metrics {
                        metrics.symbols_screened_total.inc();
                        if result.passed {
                            metrics.symbols_passed_total.inc();
                        }
                    }
                    results.push(result);
                }
                Err(join_error) => {
                    error!(
                        symbol = %symbol,
                        error = %join_error,
                        "ScreeningRuntime: excluding {} after unexpected failure: {}",
                        symbol,
                        join_error
                    );
                    if let Some(ref metrics) = self.metrics {
                        metrics.symbols_failed_total.inc();
                    }
                }
            }
        }

        let elapsed = start.elapsed();
        if let Some(ref metrics) = self.metrics {
            metrics.screening_duration_seconds.observe(elapsed.as_secs_f64());
        }
        info!(
            requested = symbols.len(),
            screened = results.len(),
            passed = results.iter().filter(|r| r.passed).count(),
            elapsed_ms = elapsed.as_millis() as u64,
            "ScreeningRuntime: screened {} of {} symbols in {:?}",
            results.len(),
            symbols.len(),
            elapsed
        );
        results
    }

    /// Select the top `top_n` perpetuals quoted in `quote_currency` and screen them
    pub async fn run_universe(
        &self,
        quote_currency: &str,
        top_n: usize,
    ) -> Result<ScreeningRun, DataError> {
        let screened_at = beijing_time(self.aggregator.clock().now_ms());
        let universe =
            select_universe(self.aggregator.provider().as_ref(), quote_currency, top_n).await?;

        let symbols: Vec<String> = universe.iter().map(|entry| entry.symbol.clone()).collect();
        let results = self.run(&symbols).await;

        Ok(ScreeningRun {
            screened_at,
            universe,
            results,
        })
    }
}
