//! Prometheus counters describing screening runs

use prometheus::{
    Encoder, Histogram, HistogramOpts, IntCounter, IntCounterVec, Opts, Registry, TextEncoder,
};

use crate::models::{Timeframe, TimeframeVerdict};

pub struct Metrics {
    registry: Registry,
    pub timeframe_evaluations_total: IntCounterVec,
    pub symbols_screened_total: IntCounter,
    pub symbols_passed_total: IntCounter,
    pub symbols_failed_total: IntCounter,
    pub screening_duration_seconds: Histogram,
}

impl Metrics {
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();

        let timeframe_evaluations_total = IntCounterVec::new(
            Opts::new(
                "perpscan_timeframe_evaluations_total",
                "Timeframe evaluations by outcome",
            ),
            &["timeframe", "outcome"],
        )?;
        let symbols_screened_total = IntCounter::new(
            "perpscan_symbols_screened_total",
            "Symbols that completed screening",
        )?;
        let symbols_passed_total = IntCounter::new(
            "perpscan_symbols_passed_total",
            "Symbols that reached the timeframe quorum",
        )?;
        let symbols_failed_total = IntCounter::new(
            "perpscan_symbols_failed_total",
            "Symbols excluded after an unexpected failure",
        )?;
        let screening_duration_seconds = Histogram::with_opts(HistogramOpts::new(
            "perpscan_screening_duration_seconds",
            "Wall time of a full screening run",
        ))?;

        registry.register(Box::new(timeframe_evaluations_total.clone()))?;
        registry.register(Box::new(symbols_screened_total.clone()))?;
        registry.register(Box::new(symbols_passed_total.clone()))?;
        registry.register(Box::new(symbols_failed_total.clone()))?;
        registry.register(Box::new(screening_duration_seconds.clone()))?;

        Ok(Self {
            registry,
            timeframe_evaluations_total,
            symbols_screened_total,
            symbols_passed_total,
            symbols_failed_total,
            screening_duration_seconds,
        })
    }

    pub fn record_verdict(&self, timeframe: Timeframe, verdict: &TimeframeVerdict) {
        self.timeframe_evaluations_total
            .with_label_values(&[timeframe.label(), verdict.outcome_label()])
            .inc();
    }

    /// Render all metrics in the Prometheus text format
    pub fn encode(&self) -> Result<String, prometheus::Error> {
        let mut buffer = Vec::new();
        TextEncoder::new().encode(&self.registry.gather(), &mut buffer)?;
        String::from_utf8(buffer).map_err(|e| prometheus::Error::Msg(e.to_string()))
    }
}
