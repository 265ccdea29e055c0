//! Periodic idle sweeping

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{info, warn};

use crate::registry::ManagedRegistry;
use crate::settings::MIN_IDLE_TIMEOUT;

/// Handle to the background task that periodically sweeps a registry.
///
/// Dropping the handle leaves the task running; call [`IdleSweeper::stop`]
/// or [`IdleSweeper::shutdown`] to end it. Stopping never interrupts a
/// sweep pass already in progress: only the wait between ticks is raced
/// against the shutdown signal.
pub struct IdleSweeper {
    shutdown: watch::Sender<bool>,
    handle: JoinHandle<()>,
}

impl IdleSweeper {
    /// Spawn the sweep task. Sub-second intervals are clamped up to the
    /// floor with a warning.
    pub fn spawn<A>(registry: Arc<ManagedRegistry<A>>, interval: Duration) -> Self
    where
        A: Send + Sync + 'static,
    {
        let interval = if interval < MIN_IDLE_TIMEOUT {
            warn!(
                "Sweep interval {:?} is below the {:?} floor, clamping",
                interval, MIN_IDLE_TIMEOUT
            );
            MIN_IDLE_TIMEOUT
        } else {
            interval
        };

        info!("Starting idle sweep task (interval: {:?})", interval);

        let (shutdown, mut stopped) = watch::channel(false);
        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);

            // Skip the first tick (which fires immediately)
            ticker.tick().await;

            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        let evicted = registry.sweep().await;
                        if evicted > 0 {
                            info!("Scheduled sweep evicted {} idle artifacts", evicted);
                        }
                    }
                    _ = stopped.changed() => break,
                }
            }
        });

        Self { shutdown, handle }
    }

    /// Ask the task to stop once any in-flight sweep completes. Safe to
    /// call repeatedly, and after the task has already exited.
    pub fn stop(&self) {
        let _ = self.shutdown.send(true);
    }

    /// Stop the task and wait for it to exit.
    pub async fn shutdown(self) {
        self.stop();
        let _ = self.handle.await;
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}
