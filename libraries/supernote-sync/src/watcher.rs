//! The watch loop: a scheduled sync task with an explicit shutdown flag.

use crate::error::SyncError;
use crate::runner::SyncRunner;
use std::time::Duration;
use supernote_core::SyncTrigger;
use tokio::sync::watch;
use tokio::time::MissedTickBehavior;
use tracing::{error, info};

/// Repeatedly runs a [`SyncRunner`] on an interval until shut down.
///
/// The first cycle runs immediately; later cycles wait for the interval.
/// Any cycle failure is logged and the loop continues — only the shutdown
/// flag (or cancellation observed inside a pass) stops it.
pub struct Watcher {
    interval: Duration,
}

impl Watcher {
    pub fn new(interval: Duration) -> Self {
        Self { interval }
    }

    /// Drive the runner until `shutdown` flips to true.
    pub async fn run<R: SyncRunner>(&self, runner: R, mut shutdown: watch::Receiver<bool>) {
        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    match runner.run_cycle(SyncTrigger::Scheduled, &shutdown).await {
                        Ok(report) => {
                            info!(
                                downloaded = report.downloaded(),
                                skipped = report.skipped(),
                                failed = report.failed(),
                                "Watch cycle complete"
                            );
                        }
                        Err(SyncError::Cancelled) => {
                            info!("Sync cancelled, stopping watch loop");
                            return;
                        }
                        Err(SyncError::DeviceNotFound) => {
                            info!("No device found, will retry next interval");
                        }
                        Err(e) => {
                            error!(error = %e, "Sync cycle failed, will retry next interval");
                        }
                    }
                }
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        info!("Shutdown requested, stopping watch loop");
                        return;
                    }
                }
            }
        }
    }
}
