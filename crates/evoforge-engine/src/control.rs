//! Abort control binding an external trigger source to an [`AbortSignal`].
//!
//! The control is the piece a presentation layer (a button, a signal
//! handler, a supervising service) talks to. It owns the abort signal, hands
//! the engine a live handle to it, and tracks whether the trigger is armed so
//! the same control can be offered across repeated runs.
//!
//! # Lifecycle
//!
//! ```text
//! Armed --on_triggered_event()--> Triggered --reset()--> Armed
//! ```
//!
//! `reset` must be called before each run, including the first, and never
//! while a run driven by this control's signal is still polling it.
//!
//! # Example
//!
//! ```
//! use evoforge_engine::control::{AbortControl, ControlState};
//!
//! let control = AbortControl::new();
//! control.reset();
//! let condition = control.termination_condition();
//!
//! assert!(control.on_triggered_event());
//! assert_eq!(control.state(), ControlState::Triggered);
//! assert!(condition.poll());
//!
//! // A second event for the same run is ignored.
//! assert!(!control.on_triggered_event());
//!
//! control.reset();
//! assert!(control.is_armed());
//! assert!(!condition.poll());
//! ```

use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;

use tracing::{debug, info};

use crate::termination::AbortSignal;

/// Whether the control will currently accept a trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlState {
    /// Ready; the next trigger event aborts the run.
    Armed,
    /// An abort has been requested for the current run.
    Triggered,
}

impl ControlState {
    fn from_u8(value: u8) -> Self {
        match value {
            ARMED => ControlState::Armed,
            _ => ControlState::Triggered,
        }
    }
}

const ARMED: u8 = 0;
const TRIGGERED: u8 = 1;

/// Couples an external trigger to an [`AbortSignal`].
///
/// Clones share state: a clone handed to a UI thread and the original held
/// by the code driving runs see the same armed flag and the same signal.
#[derive(Debug, Clone)]
pub struct AbortControl {
    signal: AbortSignal,
    state: Arc<AtomicU8>,
}

impl AbortControl {
    /// Creates an armed control with an untriggered signal.
    pub fn new() -> Self {
        Self {
            signal: AbortSignal::new(),
            state: Arc::new(AtomicU8::new(ARMED)),
        }
    }

    /// Handles one trigger event from the external source.
    ///
    /// Disarms the control and triggers the signal. Returns true if this
    /// call performed the Armed to Triggered transition, false if the
    /// control was already triggered for this run. Never blocks.
    pub fn on_triggered_event(&self) -> bool {
        let fired = self
            .state
            .compare_exchange(ARMED, TRIGGERED, Ordering::AcqRel, Ordering::Acquire)
            .is_ok();
        if fired {
            self.signal.trigger();
            info!(event = "abort_requested");
        }
        fired
    }

    /// Re-arms the control and clears its signal for the next run.
    ///
    /// Call before every run and never while a run polling this control's
    /// signal is still active. Debug builds assert on that precondition.
    pub fn reset(&self) {
        debug_assert_eq!(
            self.signal.active_runs(),
            0,
            "AbortControl::reset called while a run is polling its signal"
        );
        self.signal.reset();
        self.state.store(ARMED, Ordering::Release);
        debug!(event = "abort_reset");
    }

    /// Returns a live handle to the owned signal for registration with an
    /// engine.
    pub fn termination_condition(&self) -> AbortSignal {
        self.signal.clone()
    }

    pub fn state(&self) -> ControlState {
        ControlState::from_u8(self.state.load(Ordering::Acquire))
    }

    /// True when a trigger event would abort the run; a presentation layer
    /// mirrors this as its enabled state.
    pub fn is_armed(&self) -> bool {
        self.state() == ControlState::Armed
    }

    /// Returns a trigger-only handle for an external source.
    pub fn trigger_handle(&self) -> AbortTrigger {
        AbortTrigger {
            control: self.clone(),
        }
    }
}

impl Default for AbortControl {
    fn default() -> Self {
        Self::new()
    }
}

/// Trigger-only view of an [`AbortControl`].
///
/// Given to sources that may request an abort but must not reset the
/// control, such as a Ctrl-C handler or a watchdog thread.
#[derive(Debug, Clone)]
pub struct AbortTrigger {
    control: AbortControl,
}

impl AbortTrigger {
    /// Requests an abort. Returns true if this call disarmed the control.
    pub fn fire(&self) -> bool {
        self.control.on_triggered_event()
    }

    pub fn is_armed(&self) -> bool {
        self.control.is_armed()
    }
}

#[cfg(test)]
#[path = "control_tests.rs"]
mod tests;
