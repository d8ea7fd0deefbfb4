//! Composite termination conditions (AND/OR).
//!
//! Uses macro-generated tuple implementations for zero type erasure.
//! Children are always evaluated in full (no short circuit) so that
//! stateful conditions such as stagnation see every generation.

use std::fmt::Debug;

use super::Termination;
use crate::population::PopulationData;

/// Combines multiple terminations with OR logic (any must terminate).
///
/// # Examples
///
/// ```
/// use evoforge_engine::termination::{
///     AbortSignal, GenerationCountTermination, OrTermination,
/// };
///
/// // Stop after 500 generations OR when the user aborts
/// let abort = AbortSignal::new();
/// let termination = OrTermination::new((
///     GenerationCountTermination::new(500).unwrap(),
///     abort.clone(),
/// ));
/// ```
#[derive(Debug)]
pub struct OrTermination<T>(pub T);

impl<T> OrTermination<T> {
    /// Creates a new OR termination from a tuple of terminations.
    pub fn new(terminations: T) -> Self {
        Self(terminations)
    }
}

/// Combines multiple terminations with AND logic (all must terminate).
///
/// # Examples
///
/// ```
/// use evoforge_engine::termination::{
///     AndTermination, GenerationCountTermination, TargetFitnessTermination,
/// };
///
/// // Stop only when BOTH 100 generations passed AND fitness reached 0.9
/// let termination = AndTermination::new((
///     GenerationCountTermination::new(100).unwrap(),
///     TargetFitnessTermination::new(0.9, true).unwrap(),
/// ));
/// ```
#[derive(Debug)]
pub struct AndTermination<T>(pub T);

impl<T> AndTermination<T> {
    /// Creates a new AND termination from a tuple of terminations.
    pub fn new(terminations: T) -> Self {
        Self(terminations)
    }
}

/// Generates `Termination` implementations for a composite over tuples.
macro_rules! impl_composite_termination {
    ($Composite:ident, $name:literal, $init:literal, $op:tt; $($idx:tt: $T:ident),+) => {
        impl<C, $($T),+> Termination<C> for $Composite<($($T,)+)>
        where
            $($T: Termination<C>,)+
        {
            fn should_terminate(&self, data: &PopulationData<C>) -> bool {
                $init $($op (self.0).$idx.should_terminate(data))+
            }

            fn name(&self) -> &str {
                $name
            }

            fn on_run_started(&self) {
                $((self.0).$idx.on_run_started();)+
            }

            fn on_run_ended(&self) {
                $((self.0).$idx.on_run_ended();)+
            }
        }
    };
}

macro_rules! impl_or_and {
    ($($idx:tt: $T:ident),+) => {
        impl_composite_termination!(OrTermination, "Or", false, |; $($idx: $T),+);
        impl_composite_termination!(AndTermination, "And", true, &; $($idx: $T),+);
    };
}

impl_or_and!(0: T0);
impl_or_and!(0: T0, 1: T1);
impl_or_and!(0: T0, 1: T1, 2: T2);
impl_or_and!(0: T0, 1: T1, 2: T2, 3: T3);
impl_or_and!(0: T0, 1: T1, 2: T2, 3: T3, 4: T4);
impl_or_and!(0: T0, 1: T1, 2: T2, 3: T3, 4: T4, 5: T5);
impl_or_and!(0: T0, 1: T1, 2: T2, 3: T3, 4: T4, 5: T5, 6: T6);
impl_or_and!(0: T0, 1: T1, 2: T2, 3: T3, 4: T4, 5: T5, 6: T6, 7: T7);
