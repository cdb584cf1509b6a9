//! Periodic health run task
//!
//! Drives [`HealthCheckService::run`] on a fixed cadence with the same
//! owned-task lifecycle as the cache sweeper. The loop awaits each run
//! before waiting for the next tick, so consecutive scheduled runs never
//! overlap in-process. On-demand runs through the service remain
//! independent of the schedule.
//!
//! A failed scheduled run (tenant configuration unavailable) is logged and
//! the schedule continues; background operations never interrupt the
//! process.

use crate::logging::log_health_run;
use epb_application::HealthCheckService;
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Notify;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

/// Owned periodic task around the health check service
pub struct HealthCheckRunner {
    service: Arc<HealthCheckService>,
    interval: Duration,
    shutdown: Arc<Notify>,
    handle: Mutex<Option<JoinHandle<()>>>,
}

impl HealthCheckRunner {
    /// Create a runner for the given service and cadence
    pub fn new(service: Arc<HealthCheckService>, interval: Duration) -> Self {
        Self {
            service,
            interval,
            shutdown: Arc::new(Notify::new()),
            handle: Mutex::new(None),
        }
    }

    /// Spawn the periodic run task
    ///
    /// Starting an already-running runner is a logged no-op.
    pub fn start(&self) {
        let mut handle = self.handle.lock();
        if handle.is_some() {
            warn!("Health check runner already running");
            return;
        }

        let service = Arc::clone(&self.service);
        let shutdown = Arc::clone(&self.shutdown);
        let period = self.interval;
        *handle = Some(tokio::spawn(async move {
            let mut ticker = tokio::time::interval_at(tokio::time::Instant::now() + period, period);
            loop {
                tokio::select! {
                    _ = shutdown.notified() => break,
                    _ = ticker.tick() => {
                        match service.run().await {
                            Ok(summary) => log_health_run(&summary),
                            Err(error) => {
                                error!(error = %error, "Scheduled ERP health run failed");
                            }
                        }
                    }
                }
            }
            debug!("Health check runner stopped");
        }));

        info!(
            interval_secs = self.interval.as_secs(),
            "Health check runner started"
        );
    }

    /// Signal the task to stop and wait for it to finish
    pub async fn stop(&self) {
        let handle = self.handle.lock().take();
        if let Some(handle) = handle {
            self.shutdown.notify_one();
            if let Err(error) = handle.await {
                warn!(error = %error, "Health check runner task did not shut down cleanly");
            }
        }
    }

    /// Whether the periodic task is currently running
    pub fn is_running(&self) -> bool {
        self.handle.lock().is_some()
    }
}
