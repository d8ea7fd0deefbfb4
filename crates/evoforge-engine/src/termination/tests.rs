//! Tests for termination conditions.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Barrier};
use std::thread;
use std::time::{Duration, Instant};

use super::*;
use crate::test_utils::{population_data, population_data_at};

#[test]
fn test_abort_signal_initially_clear() {
    let signal = AbortSignal::new();
    assert!(!signal.poll());
    assert!(!signal.should_terminate(&population_data(0, 0.0)));
}

#[test]
fn test_abort_signal_lifecycle() {
    let signal = AbortSignal::new();
    assert!(!signal.poll());

    signal.trigger();
    assert!(signal.poll());
    assert!(signal.poll());
    assert!(signal.is_aborted());

    signal.reset();
    assert!(!signal.poll());
}

#[test]
fn test_abort_signal_trigger_is_idempotent() {
    let once = AbortSignal::new();
    once.trigger();

    let many = AbortSignal::new();
    for _ in 0..10 {
        many.trigger();
    }

    assert_eq!(once.poll(), many.poll());
    many.reset();
    assert!(!many.poll());
}

#[test]
fn test_abort_signal_reset_clears_any_history() {
    let signal = AbortSignal::new();
    signal.reset();
    assert!(!signal.poll());

    for _ in 0..3 {
        signal.trigger();
        signal.trigger();
        signal.reset();
        assert!(!signal.poll());
    }
}

#[test]
fn test_abort_signal_clones_share_latch() {
    let signal = AbortSignal::new();
    let handle = signal.clone();
    assert!(signal.same_latch(&handle));
    assert!(!signal.same_latch(&AbortSignal::new()));

    handle.trigger();
    assert!(signal.poll());

    signal.reset();
    assert!(!handle.poll());
}

#[test]
fn test_abort_signal_counts_active_runs() {
    let signal = AbortSignal::new();
    assert_eq!(signal.active_runs(), 0);

    Termination::<u32>::on_run_started(&signal);
    assert_eq!(signal.active_runs(), 1);
    Termination::<u32>::on_run_ended(&signal);
    assert_eq!(signal.active_runs(), 0);
}

#[test]
fn test_abort_signal_is_sticky_across_threads() {
    let signal = AbortSignal::new();
    let triggers: Vec<_> = (0..4)
        .map(|_| {
            let s = signal.clone();
            thread::spawn(move || {
                for _ in 0..100 {
                    s.trigger();
                }
            })
        })
        .collect();
    for t in triggers {
        t.join().unwrap();
    }

    // Every trigger completed before these polls began.
    let pollers: Vec<_> = (0..4)
        .map(|_| {
            let s = signal.clone();
            thread::spawn(move || (0..1000).all(|_| s.poll()))
        })
        .collect();
    for p in pollers {
        assert!(p.join().unwrap());
    }
}

#[test]
fn test_abort_signal_observed_by_polling_thread() {
    let signal = AbortSignal::new();
    let barrier = Arc::new(Barrier::new(2));

    let poller = {
        let signal = signal.clone();
        let barrier = Arc::clone(&barrier);
        thread::spawn(move || {
            barrier.wait();
            let deadline = Instant::now() + Duration::from_secs(10);
            let mut iterations: u64 = 0;
            while !signal.poll() {
                iterations += 1;
                assert!(Instant::now() < deadline, "trigger never observed");
                std::hint::spin_loop();
            }
            // Once seen, the latch never regresses.
            assert!((0..10_000).all(|_| signal.poll()));
            iterations
        })
    };

    let trigger = {
        let signal = signal.clone();
        let barrier = Arc::clone(&barrier);
        thread::spawn(move || {
            barrier.wait();
            thread::sleep(Duration::from_millis(20));
            signal.trigger();
        })
    };

    trigger.join().unwrap();
    poller.join().unwrap();
    assert!(signal.poll());
}

#[test]
fn test_abort_signal_publishes_prior_writes() {
    // Release/acquire pairing: data written before trigger is visible after poll.
    let signal = AbortSignal::new();
    let payload = Arc::new(AtomicBool::new(false));

    let writer = {
        let signal = signal.clone();
        let payload = Arc::clone(&payload);
        thread::spawn(move || {
            payload.store(true, Ordering::Relaxed);
            signal.trigger();
        })
    };

    while !signal.poll() {
        std::hint::spin_loop();
    }
    assert!(payload.load(Ordering::Relaxed));
    writer.join().unwrap();
}

#[test]
fn test_generation_count_termination() {
    let term = GenerationCountTermination::new(3).unwrap();

    assert!(!term.should_terminate(&population_data(0, 0.0)));
    assert!(!term.should_terminate(&population_data(1, 0.0)));
    assert!(term.should_terminate(&population_data(2, 0.0)));
    assert!(term.should_terminate(&population_data(3, 0.0)));
}

#[test]
fn test_generation_count_rejects_zero() {
    assert!(matches!(
        GenerationCountTermination::new(0),
        Err(crate::error::EngineError::InvalidCondition(_))
    ));
}

#[test]
fn test_target_fitness_natural() {
    let term = TargetFitnessTermination::new(10.0, true).unwrap();

    assert!(!term.should_terminate(&population_data(0, 9.5)));
    assert!(term.should_terminate(&population_data(0, 10.0)));
    assert!(term.should_terminate(&population_data(0, 12.0)));
}

#[test]
fn test_target_fitness_non_natural() {
    let term = TargetFitnessTermination::new(0.5, false).unwrap();

    assert!(!term.should_terminate(&population_data(0, 0.6)));
    assert!(term.should_terminate(&population_data(0, 0.5)));
    assert!(term.should_terminate(&population_data(0, 0.1)));
}

#[test]
fn test_target_fitness_rejects_nan() {
    let result = TargetFitnessTermination::new(f64::NAN, true);
    assert!(matches!(result, Err(crate::error::EngineError::InvalidCondition(_))));

    // Infinite targets are reachable bounds, not errors.
    assert!(TargetFitnessTermination::new(f64::NEG_INFINITY, true).is_ok());
}

#[test]
fn test_elapsed_time_termination() {
    let term = ElapsedTimeTermination::millis(100).unwrap();

    assert!(!term.should_terminate(&population_data_at(0, 0.0, Duration::from_millis(99))));
    assert!(term.should_terminate(&population_data_at(0, 0.0, Duration::from_millis(100))));
    assert!(ElapsedTimeTermination::seconds(0).is_err());
}

#[test]
fn test_stagnation_termination() {
    let term = StagnationTermination::new(2, true).unwrap();

    assert!(!term.should_terminate(&population_data(0, 1.0)));
    assert!(!term.should_terminate(&population_data(1, 1.0)));
    assert!(term.should_terminate(&population_data(2, 1.0)));
}

#[test]
fn test_stagnation_resets_on_improvement() {
    let term = StagnationTermination::new(2, true).unwrap();

    assert!(!term.should_terminate(&population_data(0, 1.0)));
    assert!(!term.should_terminate(&population_data(1, 1.0)));
    assert!(!term.should_terminate(&population_data(2, 2.0)));
    assert!(!term.should_terminate(&population_data(3, 2.0)));
    assert!(term.should_terminate(&population_data(4, 2.0)));
}

#[test]
fn test_stagnation_non_natural_treats_lower_as_better() {
    let term = StagnationTermination::new(1, false).unwrap();

    assert!(!term.should_terminate(&population_data(0, 5.0)));
    assert!(!term.should_terminate(&population_data(1, 4.0)));
    assert!(term.should_terminate(&population_data(2, 4.5)));
}

#[test]
fn test_stagnation_verdict_stable_within_generation() {
    let term = StagnationTermination::new(1, true).unwrap();
    let gen0 = population_data(0, 3.0);
    let gen1 = population_data(1, 3.0);

    assert!(!term.should_terminate(&gen0));
    assert!(!term.should_terminate(&gen0));
    assert!(term.should_terminate(&gen1));
    assert!(term.should_terminate(&gen1));
}

#[test]
fn test_stagnation_state_cleared_at_run_start() {
    let term = StagnationTermination::new(1, true).unwrap();
    assert!(!term.should_terminate(&population_data(0, 9.0)));
    assert!(term.should_terminate(&population_data(1, 9.0)));

    Termination::<u32>::on_run_started(&term);
    assert!(!term.should_terminate(&population_data(0, 1.0)));
}

#[test]
fn test_stagnation_population_average() {
    let term = StagnationTermination::new(1, true)
        .unwrap()
        .using_population_average();

    let mut gen0 = population_data(0, 5.0);
    gen0.mean_fitness = 2.0;
    let mut gen1 = population_data(1, 5.0);
    gen1.mean_fitness = 3.0;
    let mut gen2 = population_data(2, 5.0);
    gen2.mean_fitness = 3.0;

    assert!(!term.should_terminate(&gen0));
    assert!(!term.should_terminate(&gen1));
    assert!(term.should_terminate(&gen2));
}

#[test]
fn test_or_termination() {
    let abort = AbortSignal::new();
    let term = OrTermination::new((GenerationCountTermination::new(10).unwrap(), abort.clone()));

    assert!(!term.should_terminate(&population_data(0, 0.0)));
    abort.trigger();
    assert!(term.should_terminate(&population_data(0, 0.0)));
    abort.reset();
    assert!(term.should_terminate(&population_data(9, 0.0)));
    assert_eq!(Termination::<u32>::name(&term), "Or");
}

#[test]
fn test_and_termination() {
    let term = AndTermination::new((
        GenerationCountTermination::new(5).unwrap(),
        TargetFitnessTermination::new(1.0, true).unwrap(),
    ));

    assert!(!term.should_terminate(&population_data(10, 0.0)));
    assert!(!term.should_terminate(&population_data(0, 2.0)));
    assert!(term.should_terminate(&population_data(10, 2.0)));
}

#[test]
fn test_or_termination_evaluates_every_child() {
    // A stagnation child must see generations even when an earlier child fires.
    let abort = AbortSignal::new();
    abort.trigger();
    let term = OrTermination::new((abort, StagnationTermination::new(1, true).unwrap()));

    assert!(term.should_terminate(&population_data(0, 1.0)));
    let (abort, stagnation) = &term.0;
    abort.reset();
    assert!(stagnation.should_terminate(&population_data(1, 1.0)));
}

#[test]
fn test_composite_forwards_run_hooks() {
    let abort = AbortSignal::new();
    let term = OrTermination::new((abort.clone(), AndTermination::new((abort.clone(),))));

    Termination::<u32>::on_run_started(&term);
    assert_eq!(abort.active_runs(), 2);
    Termination::<u32>::on_run_ended(&term);
    assert_eq!(abort.active_runs(), 0);
}

#[test]
fn test_set_reports_every_satisfied_condition() {
    let mut set = TerminationSet::<u32>::new();
    let abort = AbortSignal::new();
    let abort_id = set.add(abort.clone());
    let limit_id = set.add(GenerationCountTermination::new(3).unwrap());
    let target_id = set.add(TargetFitnessTermination::new(100.0, true).unwrap());

    assert!(set.evaluate(&population_data(0, 0.0)).is_empty());

    abort.trigger();
    let satisfied = set.evaluate(&population_data(2, 0.0));
    assert_eq!(satisfied, vec![abort_id, limit_id]);
    assert!(!satisfied.contains(&target_id));
}

#[test]
fn test_set_remove_and_ids_never_reused() {
    let mut set = TerminationSet::<u32>::new();
    let first = set.add(AbortSignal::new());
    assert!(set.remove(first).is_some());
    assert!(set.remove(first).is_none());
    assert!(set.is_empty());

    let second = set.add(AbortSignal::new());
    assert_ne!(first, second);
    assert!(set.get(second).is_some());
    assert!(set.get(first).is_none());
}
