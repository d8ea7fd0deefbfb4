//! Ordered registry of the conditions active in an engine.

use std::fmt;

use super::Termination;
use crate::population::PopulationData;

/// Handle identifying a condition registered in a [`TerminationSet`].
///
/// Ids are never reused within a set, so an id kept from a previous run
/// cannot alias a condition registered later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TerminationId(u64);

impl fmt::Display for TerminationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Conditions evaluated together after each generation.
///
/// Unlike [`OrTermination`](super::OrTermination), the set reports every
/// satisfied condition, not just whether any was satisfied.
///
/// # Example
///
/// ```
/// use evoforge_engine::termination::{AbortSignal, GenerationCountTermination, TerminationSet};
///
/// let mut set = TerminationSet::<u32>::new();
/// let abort = AbortSignal::new();
/// let abort_id = set.add(abort.clone());
/// let limit_id = set.add(GenerationCountTermination::new(10).unwrap());
///
/// assert_eq!(set.len(), 2);
/// assert!(set.remove(limit_id).is_some());
/// assert_eq!(set.names(), vec!["UserAbort"]);
/// # let _ = abort_id;
/// ```
pub struct TerminationSet<C> {
    entries: Vec<(TerminationId, Box<dyn Termination<C>>)>,
    next_id: u64,
}

impl<C> TerminationSet<C> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            next_id: 0,
        }
    }

    /// Registers a condition and returns its id.
    pub fn add<T: Termination<C> + 'static>(&mut self, condition: T) -> TerminationId {
        self.add_boxed(Box::new(condition))
    }

    /// Registers an already boxed condition.
    pub fn add_boxed(&mut self, condition: Box<dyn Termination<C>>) -> TerminationId {
        let id = TerminationId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, condition));
        id
    }

    /// Unregisters a condition, returning it if it was present.
    pub fn remove(&mut self, id: TerminationId) -> Option<Box<dyn Termination<C>>> {
        let index = self.entries.iter().position(|(entry_id, _)| *entry_id == id)?;
        Some(self.entries.remove(index).1)
    }

    pub fn get(&self, id: TerminationId) -> Option<&dyn Termination<C>> {
        self.entries
            .iter()
            .find(|(entry_id, _)| *entry_id == id)
            .map(|(_, condition)| condition.as_ref())
    }

    /// Evaluates every condition and returns the satisfied ones in
    /// registration order.
    pub fn evaluate(&self, data: &PopulationData<C>) -> Vec<TerminationId> {
        self.entries
            .iter()
            .filter(|(_, condition)| condition.should_terminate(data))
            .map(|(id, _)| *id)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn names(&self) -> Vec<&str> {
        self.entries
            .iter()
            .map(|(_, condition)| condition.name())
            .collect()
    }

    pub fn ids(&self) -> impl Iterator<Item = TerminationId> + '_ {
        self.entries.iter().map(|(id, _)| *id)
    }

    pub(crate) fn notify_run_started(&self) {
        for (_, condition) in &self.entries {
            condition.on_run_started();
        }
    }

    pub(crate) fn notify_run_ended(&self) {
        for (_, condition) in &self.entries {
            condition.on_run_ended();
        }
    }
}

impl<C> Default for TerminationSet<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> fmt::Debug for TerminationSet<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(
                self.entries
                    .iter()
                    .map(|(id, condition)| (id, condition.name())),
            )
            .finish()
    }
}
