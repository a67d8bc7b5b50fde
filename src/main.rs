//! Perpscan
//!
//! Ranks the most liquid OKX perpetual swaps, screens each one for bullish
//! alignment across 1d/4h/1h/15m, and exports the passing symbols to CSV.
//! Runs once, or on a cron schedule when `SCREEN_SCHEDULE` is set.

use dotenvy::dotenv;
use perpscan::config::{get_environment, ScreenerConfig};
use perpscan::core::{ScreeningRuntime, ScreeningScheduler};
use perpscan::logging;
use perpscan::metrics::Metrics;
use perpscan::services::market_data::MarketDataProvider;
use perpscan::services::okx::OkxMarketDataProvider;
use perpscan::signals::ScreeningAggregator;
use perpscan::sink::{CsvResultSink, ResultSink};
use std::sync::Arc;
use tokio::signal;
use tracing::{debug, error, info, warn};

struct App {
    runtime: ScreeningRuntime,
    sink: CsvResultSink,
    metrics: Arc<Metrics>,
    quote_currency: String,
    top_n: usize,
}

impl App {
    async fn run_once(&self) {
        let run = match self
            .runtime
            .run_universe(&self.quote_currency, self.top_n)
            .await
        {
            Ok(run) => run,
            Err(e) => {
                error!(error = %e, "Failed to select screening universe: {}", e);
                return;
            }
        };

        let passed: Vec<&str> = run.passed().map(|r| r.symbol.as_str()).collect();
        if passed.is_empty() {
            info!(
                screened = run.results.len(),
                "No symbols satisfied the timeframe quorum"
            );
        } else {
            info!(
                passed = passed.len(),
                symbols = ?passed,
                "Symbols passing screen: {}",
                passed.join(", ")
            );
        }

        match self.sink.write(&run.results, run.screened_at) {
            Ok(Some(path)) => info!(path = %path.display(), "Results saved"),
            Ok(None) => debug!("Nothing to export"),
            Err(e) => error!(error = %e, "Failed to export results: {}", e),
        }

        match self.metrics.encode() {
            Ok(text) => debug!("Metrics:\n{}", text),
            Err(e) => warn!(error = %e, "Failed to encode metrics"),
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();
    logging::init_logging();

    let env = get_environment();
    info!("Starting Perpscan");
    info!(environment = %env, "Environment");

    let config = ScreenerConfig::from_env()?;
    info!(
        window = config.screening.window,
        quorum = config.screening.quorum,
        timeframes = ?config.screening.timeframes,
        concurrency = config.concurrency,
        top_n = config.top_n,
        quote = %config.quote_currency,
        "Screening configuration loaded"
    );

    let metrics = Arc::new(Metrics::new()?);

    let provider: Arc<dyn MarketDataProvider> = Arc::new(OkxMarketDataProvider::new(
        config.okx_url()?,
        config.screening.fetch_timeout,
    )?);

    let aggregator = Arc::new(
        ScreeningAggregator::new(provider, config.screening.clone()).with_metrics(metrics.clone()),
    );
    let runtime = ScreeningRuntime::new(aggregator)
        .with_concurrency(config.concurrency)
        .with_metrics(metrics.clone());
    let sink = CsvResultSink::new(&config.output_dir)
        .with_timeframes(config.screening.timeframes.clone());

    let app = Arc::new(App {
        runtime,
        sink,
        metrics,
        quote_currency: config.quote_currency.clone(),
        top_n: config.top_n,
    });

    let Some(cron_expr) = config.schedule.as_deref() else {
        app.run_once().await;
        return Ok(());
    };

    let scheduler = ScreeningScheduler::new(cron_expr)
        .map_err(|e| format!("Failed to create scheduler: {}", e))?;
    if let Some(next) = scheduler.next_tick() {
        info!(next = %next, "First screening run at {}", next);
    }

    let job_app = app.clone();
    scheduler
        .start(move || {
            let app = job_app.clone();
            async move { app.run_once().await }
        })
        .await;

    info!("Scheduler started, waiting for shutdown signal...");
    signal::ctrl_c().await?;
    info!("Shutting down...");
    scheduler.stop().await;
    info!("Perpscan stopped");

    Ok(())
}
