//! Deduplication Ledger
//!
//! Best-effort, time-windowed set of recently admitted message ids. Entries
//! are keyed by insertion instant; `admit` treats expired entries as absent
//! and `sweep` drops them from memory. Nothing survives a restart.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::{Duration, Instant};

/// Default dedup window.
pub const DEFAULT_WINDOW: Duration = Duration::from_secs(60);

/// Source of "now" for expiry decisions.
pub trait Clock: Send + Sync {
    fn now(&self) -> Instant;
}

/// Clock backed by tokio's time driver, so paused-time tests also apply.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioClock;

impl Clock for TokioClock {
    fn now(&self) -> Instant {
        tokio::time::Instant::now().into_std()
    }
}

pub trait DedupLedger: Send + Sync {
    /// Returns `true` and records `id` unless it was admitted within the window.
    fn admit(&self, id: &str) -> bool;
}

/// Expiring map from message id to the instant it was admitted.
pub struct ExpiringLedger<C: Clock = TokioClock> {
    entries: Mutex<HashMap<String, Instant>>,
    window: Duration,
    clock: C,
}

impl ExpiringLedger<TokioClock> {
    pub fn new(window: Duration) -> Self {
        Self::with_clock(window, TokioClock)
    }
}

impl Default for ExpiringLedger<TokioClock> {
    fn default() -> Self {
        Self::new(DEFAULT_WINDOW)
    }
}

impl<C: Clock> ExpiringLedger<C> {
    pub fn with_clock(window: Duration, clock: C) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            window,
            clock,
        }
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    /// Number of entries held, expired or not.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Remove expired entries. Returns how many were dropped.
    pub fn sweep(&self) -> usize {
        let now = self.clock.now();
        let mut entries = self.lock();
        let before = entries.len();
        entries.retain(|_, admitted| now.duration_since(*admitted) < self.window);
        let removed = before - entries.len();
        if removed > 0 {
            tracing::debug!("Dedup: swept {} expired message id(s)", removed);
        }
        removed
    }

    // Poisoning is ignored: entries are plain values, never left half-written.
    fn lock(&self) -> MutexGuard<'_, HashMap<String, Instant>> {
        self.entries.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl<C: Clock> DedupLedger for ExpiringLedger<C> {
    fn admit(&self, id: &str) -> bool {
        let now = self.clock.now();
        let mut entries = self.lock();
        if let Some(admitted) = entries.get(id)
            && now.duration_since(*admitted) < self.window
        {
            return false;
        }
        entries.insert(id.to_string(), now);
        true
    }
}

/// Run `sweep` every `period` on a detached task. The task lives until the
/// runtime shuts down; nothing cancels it.
pub fn spawn_sweeper<C>(ledger: Arc<ExpiringLedger<C>>, period: Duration) -> tokio::task::JoinHandle<()>
where
    C: Clock + 'static,
{
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(period);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        loop {
            ticker.tick().await;
            ledger.sweep();
        }
    })
}
