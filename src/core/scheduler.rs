//! Cron-based scheduler that re-runs the screening job on every tick

use chrono::{DateTime, Utc};
use cron::Schedule;
use std::future::Future;
use std::str::FromStr;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info};

/// Runs a job each time a cron schedule fires
pub struct ScreeningScheduler {
    cron_expr: String,
    schedule: Schedule,
    handle: Arc<RwLock<Option<tokio::task::JoinHandle<()>>>>,
}

impl ScreeningScheduler {
    /// Create a scheduler from a six-field cron expression
    /// (`second minute hour day month weekday`), e.g. `0 */15 * * * *`.
    pub fn new(cron_expr: &str) -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        let schedule = Schedule::from_str(cron_expr).map_err(|e| {
            Box::new(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("Invalid cron expression '{}': {}", cron_expr, e),
            )) as Box<dyn std::error::Error + Send + Sync>
        })?;

        info!(
            cron = %cron_expr,
            "ScreeningScheduler: created (cron: {})",
            cron_expr
        );

        Ok(Self {
            cron_expr: cron_expr.to_string(),
            schedule,
            handle: Arc::new(RwLock::new(None)),
        })
    }

    pub fn cron_expr(&self) -> &str {
        &self.cron_expr
    }

    /// Next time the schedule fires after now
    pub fn next_tick(&self) -> Option<DateTime<Utc>> {
        self.schedule.upcoming(Utc).next()
    }

    /// Start running `job` on every tick. Ticks that arrive while a run is
    /// still in progress are skipped.
    pub async fn start<F, Fut>(&self, job: F)
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let schedule = self.schedule.clone();

        let handle = tokio::spawn(async move {
            info!("ScreeningScheduler: started, waiting for cron schedule...");

            loop {
                let mut upcoming = schedule.upcoming(Utc);
                match upcoming.next() {
                    Some(next_tick) => {
                        let now = Utc::now();
                        if next_tick > now {
                            debug!(next = %next_tick, "ScreeningScheduler: next run at {}", next_tick);
                            let duration = (next_tick - now).to_std().unwrap_or_default();
                            tokio::time::sleep(duration).await;
                        }
                    }
                    None => {
                        tokio::time::sleep(tokio::time::Duration::from_secs(60)).await;
                        continue;
                    }
                }

                info!("ScreeningScheduler: cron tick, starting screening run");
                job().await;
            }
        });

        let mut slot = self.handle.write().await;
        if let Some(previous) = slot.replace(handle) {
            previous.abort();
        }
        info!("ScreeningScheduler: started successfully");
    }

    pub async fn stop(&self) {
        let mut handle = self.handle.write().await;
        if let Some(h) = handle.take() {
            h.abort();
            info!("ScreeningScheduler: stopped");
        }
    }

    pub async fn is_running(&self) -> bool {
        let handle = self.handle.read().await;
        handle.as_ref().is_some_and(|h| !h.is_finished())
    }
}
