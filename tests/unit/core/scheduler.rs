//! Unit tests for the cron scheduler

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use perpscan::core::ScreeningScheduler;

#[test]
fn test_rejects_invalid_cron() {
    assert!(ScreeningScheduler::new("every fifteen minutes").is_err());
}

#[test]
fn test_next_tick_is_in_the_future() {
    let scheduler = ScreeningScheduler::new("0 */15 * * * *").unwrap();
    assert_eq!(scheduler.cron_expr(), "0 */15 * * * *");
    let next = scheduler.next_tick().unwrap();
    assert!(next > Utc::now());
    assert_eq!(next.timestamp() % 900, 0);
}

#[tokio::test]
async fn test_runs_job_until_stopped() {
    let scheduler = ScreeningScheduler::new("* * * * * *").unwrap();
    assert!(!scheduler.is_running().await);

    let runs = Arc::new(AtomicUsize::new(0));
    let counter = runs.clone();
    scheduler
        .start(move || {
            let counter = counter.clone();
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
            }
        })
        .await;
    assert!(scheduler.is_running().await);

    tokio::time::timeout(Duration::from_secs(5), async {
        while runs.load(Ordering::SeqCst) == 0 {
            tokio::time::sleep(Duration::from_millis(50)).await;
        }
    })
    .await
    .expect("job should run within a few ticks");

    scheduler.stop().await;
    assert!(!scheduler.is_running().await);
}
