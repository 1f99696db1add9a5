use std::sync::mpsc::{channel, RecvTimeoutError, Sender};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use chrono::{DateTime, Utc};
use tracing::{debug, error, warn};

use crate::session::SessionManager;
use crate::store::SessionStore;

/// Running totals across sweep cycles.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SweepStats {
    pub cycles: usize,
    pub evicted: usize,
    pub failed_deletions: usize,
    /// Cycles that could not list the session table at all.
    pub failed_cycles: usize,
}

/// Run one sweep cycle at `now` and fold its outcome into `stats`.
///
/// This is what the sweeper thread calls on each tick; a bootstrap with its
/// own scheduler can call it directly.
pub fn sweep_once<S: SessionStore>(
    manager: &SessionManager<S>,
    now: DateTime<Utc>,
    stats: &mut SweepStats,
) {
    stats.cycles += 1;
    match manager.sweep(now) {
        Ok(report) => {
            stats.evicted += report.evicted;
            stats.failed_deletions += report.failed;
            if let Some(err) = report.first_error {
                warn!(
                    error = %err,
                    failed = report.failed,
                    "session sweep finished with failed deletions"
                );
            }
        }
        Err(err) => {
            stats.failed_cycles += 1;
            error!(error = %err, "session sweep failed");
        }
    }
}

/// Handle to the background sweep thread. Dropping it stops the thread.
pub struct SessionSweeper {
    stop_tx: Sender<()>,
    handle: Option<JoinHandle<SweepStats>>,
}

impl SessionSweeper {
    /// Start sweeping `manager` every `interval`. The first cycle runs one
    /// interval after spawn.
    pub fn spawn<S>(manager: Arc<SessionManager<S>>, interval: Duration) -> Self
    where
        S: SessionStore + 'static,
    {
        let (stop_tx, stop_rx) = channel();

        let handle = thread::spawn(move || {
            let mut stats = SweepStats::default();
            debug!(?interval, "session sweeper started");

            loop {
                match stop_rx.recv_timeout(interval) {
                    Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                    Err(RecvTimeoutError::Timeout) => {}
                }
                sweep_once(&manager, Utc::now(), &mut stats);
            }

            debug!(cycles = stats.cycles, evicted = stats.evicted, "session sweeper stopped");
            stats
        });

        Self {
            stop_tx,
            handle: Some(handle),
        }
    }

    /// Signal the thread to stop, wait for it, and return its totals.
    pub fn stop(mut self) -> SweepStats {
        self.shutdown()
    }

    fn shutdown(&mut self) -> SweepStats {
        let _ = self.stop_tx.send(());
        match self.handle.take() {
            Some(handle) => handle.join().unwrap_or_default(),
            None => SweepStats::default(),
        }
    }
}

impl Drop for SessionSweeper {
    fn drop(&mut self) {
        if self.handle.is_some() {
            self.shutdown();
        }
    }
}
