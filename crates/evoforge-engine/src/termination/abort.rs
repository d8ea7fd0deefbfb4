//! User abort via a shared, resettable latch.

use std::fmt::Debug;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use super::Termination;
use crate::population::PopulationData;

/// Terminates once an external actor has requested an abort.
///
/// A sticky latch: after [`trigger`](Self::trigger) the signal reports
/// `true` on every thread until [`reset`](Self::reset) is called. Cloning
/// yields another handle to the same latch, so the engine observes live
/// triggers rather than a snapshot.
///
/// `trigger` publishes with `Release` and `poll` reads with `Acquire`: a
/// `trigger` that completes before a `poll` begins is always observed.
///
/// # Example
///
/// ```
/// use evoforge_engine::termination::AbortSignal;
///
/// let signal = AbortSignal::new();
/// let handle = signal.clone();
///
/// assert!(!signal.poll());
/// handle.trigger();
/// assert!(signal.poll());
///
/// signal.reset();
/// assert!(!handle.poll());
/// ```
#[derive(Debug, Clone, Default)]
pub struct AbortSignal {
    inner: Arc<AbortState>,
}

#[derive(Debug, Default)]
struct AbortState {
    triggered: AtomicBool,
    active_runs: AtomicUsize,
}

impl AbortSignal {
    /// Creates an untriggered signal.
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests termination. Idempotent, wait-free and callable from any thread.
    pub fn trigger(&self) {
        self.inner.triggered.store(true, Ordering::Release);
    }

    /// Returns true if an abort has been requested since the last reset.
    pub fn poll(&self) -> bool {
        self.inner.triggered.load(Ordering::Acquire)
    }

    /// Alias for [`poll`](Self::poll).
    pub fn is_aborted(&self) -> bool {
        self.poll()
    }

    /// Clears the latch for the next run.
    ///
    /// Must only be called between runs: no engine may be polling this
    /// signal while it is reset. Resetting mid-run is a contract violation
    /// whose outcome is unspecified.
    pub fn reset(&self) {
        self.inner.triggered.store(false, Ordering::Release);
    }

    /// Number of engine runs currently polling this signal.
    pub fn active_runs(&self) -> usize {
        self.inner.active_runs.load(Ordering::Acquire)
    }

    /// Returns true if `other` is a handle to the same latch.
    pub fn same_latch(&self, other: &AbortSignal) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl<C> Termination<C> for AbortSignal {
    fn should_terminate(&self, _data: &PopulationData<C>) -> bool {
        self.poll()
    }

    fn name(&self) -> &str {
        "UserAbort"
    }

    fn on_run_started(&self) {
        self.inner.active_runs.fetch_add(1, Ordering::AcqRel);
    }

    fn on_run_ended(&self) {
        self.inner.active_runs.fetch_sub(1, Ordering::AcqRel);
    }
}
