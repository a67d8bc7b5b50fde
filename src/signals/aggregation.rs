//! Per-symbol orchestration: fetch → validate → compute → evaluate for every
//! configured timeframe, then the quorum rule.

use futures_util::future::join_all;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, info, Level};

use crate::common::{Clock, SystemClock};
use crate::config::ScreeningConfig;
use crate::error::{DataError, ScreenError};
use crate::indicators::{DataFreshnessValidator, IndicatorEngine};
use crate::metrics::Metrics;
use crate::models::{ScreeningResult, Timeframe, TimeframeVerdict};
use crate::services::market_data::MarketDataProvider;
use crate::strategies::ConditionEvaluator;

pub struct ScreeningAggregator {
    provider: Arc<dyn MarketDataProvider>,
    config: ScreeningConfig,
    clock: Arc<dyn Clock>,
    metrics: Option<Arc<Metrics>>,
}

impl ScreeningAggregator {
    pub fn new(provider: Arc<dyn MarketDataProvider>, config: ScreeningConfig) -> Self {
        Self {
            provider,
            config,
            clock: Arc::new(SystemClock),
            metrics: None,
        }
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_metrics(mut self, metrics: Arc<Metrics>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    pub fn config(&self) -> &ScreeningConfig {
        &self.config
    }

    pub fn provider(&self) -> &Arc<dyn MarketDataProvider> {
        &self.provider
    }

    pub fn clock(&self) -> &Arc<dyn Clock> {
        &self.clock
    }

    /// Screen one symbol across all configured timeframes.
    ///
    /// Timeframes are evaluated concurrently. A failing timeframe is recorded
    /// as unavailable and counts as unsatisfied; it never aborts the symbol.
    pub async fn screen(&self, symbol: &str) -> ScreeningResult {
        let evaluations = self.config.timeframes.iter().map(|&timeframe| async move {
            (timeframe, self.screen_timeframe(symbol, timeframe).await)
        });

        let mut verdicts = BTreeMap::new();
        for (timeframe, outcome) in join_all(evaluations).await {
            let verdict = match outcome {
                Ok(satisfied) => TimeframeVerdict::from_bool(satisfied),
                Err(error) => {
                    debug!(
                        symbol = %symbol,
                        timeframe = %timeframe,
                        reason = %error.kind(),
                        error = %error,
                        "Screening: {} {} unavailable: {}",
                        symbol,
                        timeframe,
                        error
                    );
                    TimeframeVerdict::Unavailable(error.kind())
                }
            };
            if let Some(ref metrics) = self.metrics {
                metrics.record_verdict(timeframe, &verdict);
            }
            verdicts.insert(timeframe, verdict);
        }

        let result = ScreeningResult::new(symbol, verdicts, self.config.quorum);
        if result.any_satisfied() {
            let summary: Vec<String> = result
                .verdicts
                .iter()
                .map(|(timeframe, verdict)| {
                    let label = if verdict.is_satisfied() { "ok" } else { "no" };
                    format!("{}={}", timeframe, label)
                })
                .collect();
            info!(
                symbol = %symbol,
                satisfied = result.satisfied_count,
                passed = result.passed,
                "Screening: {} [{}]",
                symbol,
                summary.join(" ")
            );
        }
        result
    }

    /// Run the full pipeline for one (symbol, timeframe) pair
    pub async fn screen_timeframe(
        &self,
        symbol: &str,
        timeframe: Timeframe,
    ) -> Result<bool, ScreenError> {
        let limit = self.config.fetch_limit(timeframe);
        let fetch = self.provider.fetch_candles(symbol, timeframe, limit);
        let raw = tokio::time::timeout(self.config.fetch_timeout, fetch)
            .await
            .map_err(|_| DataError::Timeout {
                timeout_ms: self.config.fetch_timeout.as_millis() as u64,
            })??;

        let validated = DataFreshnessValidator::validate(
            &raw,
            timeframe,
            self.clock.now_ms(),
            self.config.window,
        )?;
        let enriched = IndicatorEngine::compute(&validated, timeframe)?;
        let satisfied = ConditionEvaluator::evaluate(&enriched, timeframe)?;

        if !satisfied && tracing::enabled!(Level::DEBUG) {
            if let Some(snapshot) = enriched.snapshot() {
                let failed: Vec<String> = ConditionEvaluator::explain(&snapshot, timeframe)?
                    .into_iter()
                    .filter(|outcome| !outcome.passed)
                    .map(|outcome| {
                        format!("{} ({:.4} vs {:.4})", outcome.condition, outcome.lhs, outcome.rhs)
                    })
                    .collect();
                debug!(
                    symbol = %symbol,
                    timeframe = %timeframe,
                    "Screening: {} {} failed: {}",
                    symbol,
                    timeframe,
                    failed.join(", ")
                );
            }
        }

        Ok(satisfied)
    }
}
