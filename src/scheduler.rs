//! Daily scheduling helper for the price ingestion flow.
//!
//! The scheduler is purely a caller: it invokes the same orchestrator entry
//! point an on-demand command would, at a fixed UTC time once per day, and
//! logs the outcome. Retry and backoff on failure stay with the caller; the
//! next attempt is simply the next day's tick.

use std::future::Future;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tracing::{error, info};

use crate::error::Result;
use crate::ingest::{run_outcome, RunOutcome, RunReport};

/// Run `task` once per day at `hour:minute` UTC, forever.
pub async fn run_daily_at<F, Fut>(hour: u32, minute: u32, mut task: F)
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<RunReport>>,
{
    loop {
        let wait = until_next(hour, minute, Utc::now());
        info!("next scheduled ingestion in {}s", wait.as_secs());
        tokio::time::sleep(wait).await;
        let result = task().await;
        match run_outcome(&result) {
            RunOutcome::Failed(reason) => error!("scheduled ingestion failed: {}", reason),
            outcome => info!("scheduled ingestion finished: {:?}", outcome),
        }
    }
}

/// Duration from `now` until the next occurrence of `hour:minute` UTC.
fn until_next(hour: u32, minute: u32, now: DateTime<Utc>) -> Duration {
    // out-of-range input clamps to the last valid tick of the day
    let today = now
        .date_naive()
        .and_hms_opt(hour.min(23), minute.min(59), 0)
        .unwrap_or_else(|| now.date_naive().and_hms_opt(0, 0, 0).unwrap())
        .and_utc();
    let target = if today > now {
        today
    } else {
        today + chrono::Duration::days(1)
    };
    (target - now).to_std().unwrap_or(Duration::ZERO)
}
