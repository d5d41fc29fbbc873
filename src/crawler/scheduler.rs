//! Daily schedule for unattended scrapes
//!
//! This module handles:
//! - Computing when the next daily run is due
//! - Polling for due runs on a coarse interval
//! - Running a full default-range scrape once per calendar day
//! - Stopping cleanly on an explicit signal

use crate::config::ScheduleConfig;
use crate::crawler::Scraper;
use crate::ConfigError;
use chrono::{Duration as ChronoDuration, Local, NaiveDateTime, NaiveTime};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

/// When and how often to check for the daily run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DailySchedule {
    /// Local wall-clock time of the run
    pub at: NaiveTime,

    /// Interval between checks for a due run
    pub poll_interval: Duration,
}

impl DailySchedule {
    /// Builds a schedule from configuration
    pub fn from_config(config: &ScheduleConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            at: config.daily_time()?,
            poll_interval: config.poll_interval(),
        })
    }
}

/// Handle to a running daily schedule
pub struct ScheduleHandle {
    stop_tx: watch::Sender<bool>,
    task: JoinHandle<()>,
}

impl ScheduleHandle {
    /// Signals the schedule to stop and waits for it to finish
    ///
    /// A scrape already in progress is abandoned at its next await point and
    /// nothing from it is persisted.
    pub async fn stop(self) {
        let _ = self.stop_tx.send(true);
        if let Err(e) = self.task.await {
            tracing::error!("Scheduler task ended abnormally: {}", e);
        }
    }

    /// Whether the scheduling task has exited
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

/// Returns the first instant at `at` strictly after `now`
///
/// That is today at `at` if it is still ahead, otherwise tomorrow at `at`.
pub fn next_occurrence(now: NaiveDateTime, at: NaiveTime) -> NaiveDateTime {
    let today = now.date().and_time(at);
    if today > now {
        today
    } else {
        today + ChronoDuration::days(1)
    }
}

/// Starts the daily schedule on a background task
///
/// Every `poll_interval` the task checks the local clock; once the next due
/// time has passed it runs a full scrape with persistence and schedules the
/// following day. A failed run is logged and does not stop the schedule.
/// A stop signal ends the task even while a scrape is running.
pub fn spawn_daily(scraper: Arc<Scraper>, schedule: DailySchedule) -> ScheduleHandle {
    let (stop_tx, mut stop_rx) = watch::channel(false);

    let task = tokio::spawn(async move {
        let mut next_due = next_occurrence(Local::now().naive_local(), schedule.at);
        tracing::info!("Scheduler started, next run at {}", next_due);

        let mut ticker = tokio::time::interval(schedule.poll_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    let now = Local::now().naive_local();
                    if now < next_due {
                        continue;
                    }

                    tracing::info!("Starting scheduled scrape");
                    tokio::select! {
                        result = scraper.scrape(true, None, None) => match result {
                            Ok(records) => {
                                tracing::info!("Scheduled scrape collected {} records", records.len());
                            }
                            Err(e) => tracing::error!("Scheduled scrape failed: {}", e),
                        },
                        _ = stop_rx.changed() => {
                            tracing::warn!("Scheduled scrape interrupted");
                            break;
                        }
                    }

                    next_due = next_occurrence(Local::now().naive_local(), schedule.at);
                    tracing::info!("Next run at {}", next_due);
                }
                changed = stop_rx.changed() => {
                    if changed.is_err() || *stop_rx.borrow() {
                        break;
                    }
                }
            }
        }

        tracing::info!("Scheduler stopped");
    });

    ScheduleHandle { stop_tx, task }
}
