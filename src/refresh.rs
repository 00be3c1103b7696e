//! Auto-refresh timer.
//!
//! At most one repeating timer exists. Starting it again aborts the running
//! task before spawning a new one, so the period always restarts from the
//! latest analysis.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// Owns the single background refresh task.
#[derive(Debug)]
pub struct RefreshTimer {
    period: Duration,
    handle: Option<JoinHandle<()>>,
}

impl RefreshTimer {
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            handle: None,
        }
    }

    /// (Re)starts the timer. `make_message` builds what is sent on each tick.
    ///
    /// The first tick fires one full period after the call. The task ends
    /// on its own once the receiver is dropped. A period too long to
    /// schedule leaves the timer stopped.
    pub fn restart<M, F>(&mut self, tx: mpsc::UnboundedSender<M>, make_message: F)
    where
        M: Send + 'static,
        F: Fn() -> M + Send + 'static,
    {
        self.stop();

        let period = self.period;
        let Some(start) = tokio::time::Instant::now().checked_add(period) else {
            warn!(
                period_secs = period.as_secs(),
                "Refresh period too long, auto-refresh disabled"
            );
            return;
        };
        self.handle = Some(tokio::spawn(async move {
            let mut interval = tokio::time::interval_at(start, period);
            loop {
                interval.tick().await;
                if tx.send(make_message()).is_err() {
                    break;
                }
            }
        }));
        debug!(period_secs = period.as_secs(), "Refresh timer restarted");
    }

    /// Cancels the running timer, if any.
    pub fn stop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }

    /// Whether a timer task is currently alive.
    pub fn is_active(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }
}

impl Drop for RefreshTimer {
    fn drop(&mut self) {
        self.stop();
    }
}
