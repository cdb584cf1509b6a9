//! Background cache sweep task
//!
//! An explicitly owned tokio task that calls
//! [`PriceCache::sweep_expired`] on a fixed cadence. The task holds a
//! cancellation signal and its join handle, so it is always stopped on
//! service shutdown instead of lingering as an untracked timer. Manual
//! sweeps stay safe at any time; they share the cache's own critical
//! section with the periodic one.

use epb_application::PriceCache;
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Notify;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// Owned background sweep task for the price cache
///
/// # Example
///
/// ```ignore
/// use epb_infrastructure::CacheSweeper;
///
/// let sweeper = CacheSweeper::new(cache, Duration::from_secs(300));
/// sweeper.start();
/// // ...
/// sweeper.stop().await;
/// ```
pub struct CacheSweeper {
    cache: Arc<PriceCache>,
    interval: Duration,
    shutdown: Arc<Notify>,
    handle: Mutex<Option<JoinHandle<()>>>,
}

impl CacheSweeper {
    /// Create a sweeper for the given cache and cadence
    pub fn new(cache: Arc<PriceCache>, interval: Duration) -> Self {
        Self {
            cache,
            interval,
            shutdown: Arc::new(Notify::new()),
            handle: Mutex::new(None),
        }
    }

    /// Spawn the periodic sweep task
    ///
    /// Starting an already-running sweeper is a logged no-op.
    pub fn start(&self) {
        let mut handle = self.handle.lock();
        if handle.is_some() {
            warn!("Cache sweeper already running");
            return;
        }

        let cache = Arc::clone(&self.cache);
        let shutdown = Arc::clone(&self.shutdown);
        let period = self.interval;
        *handle = Some(tokio::spawn(async move {
            // First tick fires one full period after start, not immediately.
            let mut ticker = tokio::time::interval_at(tokio::time::Instant::now() + period, period);
            loop {
                tokio::select! {
                    _ = shutdown.notified() => break,
                    _ = ticker.tick() => {
                        let removed = cache.sweep_expired();
                        if removed > 0 {
                            debug!(removed, "Swept expired price cache entries");
                        }
                    }
                }
            }
            debug!("Cache sweeper stopped");
        }));

        info!(
            interval_secs = self.interval.as_secs(),
            "Cache sweeper started"
        );
    }

    /// Signal the task to stop and wait for it to finish
    ///
    /// Stopping a sweeper that was never started is a no-op.
    pub async fn stop(&self) {
        let handle = self.handle.lock().take();
        if let Some(handle) = handle {
            self.shutdown.notify_one();
            if let Err(error) = handle.await {
                warn!(error = %error, "Cache sweeper task did not shut down cleanly");
            }
        }
    }

    /// Whether the periodic task is currently running
    pub fn is_running(&self) -> bool {
        self.handle.lock().is_some()
    }
}
