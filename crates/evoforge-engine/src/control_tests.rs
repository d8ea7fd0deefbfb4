//! Tests for the abort control.

use std::sync::{Arc, Barrier};
use std::thread;

use super::*;
use crate::termination::Termination;

#[test]
fn test_control_starts_armed() {
    let control = AbortControl::new();
    assert_eq!(control.state(), ControlState::Armed);
    assert!(control.is_armed());
    assert!(!control.termination_condition().poll());
}

#[test]
fn test_trigger_disarms_and_sets_signal() {
    let control = AbortControl::new();
    control.reset();
    let condition = control.termination_condition();

    assert!(control.on_triggered_event());
    assert!(!control.is_armed());
    assert!(condition.poll());
}

#[test]
fn test_second_trigger_is_ignored() {
    let control = AbortControl::new();
    assert!(control.on_triggered_event());
    assert!(!control.on_triggered_event());
    assert_eq!(control.state(), ControlState::Triggered);
    assert!(control.termination_condition().poll());
}

#[test]
fn test_reset_rearms_and_clears() {
    let control = AbortControl::new();
    let condition = control.termination_condition();
    control.on_triggered_event();

    control.reset();
    assert!(control.is_armed());
    assert!(!condition.poll());

    assert!(control.on_triggered_event());
    assert!(condition.poll());
}

#[test]
fn test_termination_condition_is_live_handle() {
    let control = AbortControl::new();
    let before = control.termination_condition();
    control.on_triggered_event();
    let after = control.termination_condition();

    assert!(before.same_latch(&after));
    assert!(before.poll());
}

#[test]
fn test_clones_share_state() {
    let control = AbortControl::new();
    let ui = control.clone();

    assert!(ui.on_triggered_event());
    assert!(!control.is_armed());
    assert!(control.termination_condition().poll());

    control.reset();
    assert!(ui.is_armed());
}

#[test]
fn test_trigger_handle_fires_once() {
    let control = AbortControl::new();
    let trigger = control.trigger_handle();

    assert!(trigger.is_armed());
    assert!(trigger.fire());
    assert!(!trigger.fire());
    assert!(!trigger.is_armed());
    assert!(control.termination_condition().poll());
}

#[test]
fn test_concurrent_triggers_fire_exactly_once() {
    let control = AbortControl::new();
    let threads = 8;
    let barrier = Arc::new(Barrier::new(threads));

    let handles: Vec<_> = (0..threads)
        .map(|_| {
            let trigger = control.trigger_handle();
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                trigger.fire()
            })
        })
        .collect();

    let fired = handles
        .into_iter()
        .map(|h| h.join().unwrap())
        .filter(|&fired| fired)
        .count();

    assert_eq!(fired, 1);
    assert!(control.termination_condition().poll());
}

#[test]
#[cfg(debug_assertions)]
#[should_panic(expected = "reset called while a run is polling")]
fn test_reset_during_run_panics_in_debug() {
    let control = AbortControl::new();
    let condition = control.termination_condition();
    Termination::<u32>::on_run_started(&condition);
    control.reset();
}
