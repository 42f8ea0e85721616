//! Reusable rule fixtures.
//!
//! - [`CountingRule`]: placeholder recursion that counts `rule()` calls.
//! - [`FailingRule`]: fails deterministically after N calls.
//! - [`DropProbe`]: counts how many times it has been dropped.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use falc_core::{Real, RelationError, RelationSet};
use falc_rule::RecursiveRule;

/// Placeholder recursion (`slot 0 + 1`) that records every `rule()` call.
///
/// Useful for asserting how often and at which index a driver evaluates a
/// rule.
pub struct CountingRule<T> {
    pub x0: T,
    calls: AtomicUsize,
    last_index: AtomicUsize,
}

impl<T> CountingRule<T> {
    pub fn new(x0: T) -> Self {
        Self {
            x0,
            calls: AtomicUsize::new(0),
            last_index: AtomicUsize::new(usize::MAX),
        }
    }

    /// How many times `rule()` has been called.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::Relaxed)
    }

    /// Index passed to the most recent `rule()` call, if any.
    pub fn last_index(&self) -> Option<usize> {
        match self.last_index.load(Ordering::Relaxed) {
            usize::MAX => None,
            i => Some(i),
        }
    }
}

impl<T: Real> RecursiveRule<T> for CountingRule<T> {
    fn init_value(&self) -> T {
        self.x0
    }

    fn rule(&self, relations: &dyn RelationSet<T>, index: usize) -> Result<T, RelationError> {
        self.calls.fetch_add(1, Ordering::Relaxed);
        self.last_index.store(index, Ordering::Relaxed);
        Ok(self.next(relations.image_elem(0, index)?))
    }

    fn name(&self) -> &str {
        "counting"
    }
}

/// Succeeds `succeed_count` times, then fails every call.
///
/// On success it writes `index + 1` so output is easy to trace.
pub struct FailingRule {
    pub succeed_count: usize,
    call_count: AtomicUsize,
}

impl FailingRule {
    pub fn new(succeed_count: usize) -> Self {
        Self {
            succeed_count,
            call_count: AtomicUsize::new(0),
        }
    }

    /// How many times `rule()` has been called.
    pub fn calls(&self) -> usize {
        self.call_count.load(Ordering::Relaxed)
    }
}

impl<T: Real> RecursiveRule<T> for FailingRule {
    fn init_value(&self) -> T {
        T::zero()
    }

    fn rule(&self, _relations: &dyn RelationSet<T>, index: usize) -> Result<T, RelationError> {
        let n = self.call_count.fetch_add(1, Ordering::Relaxed);
        if n >= self.succeed_count {
            return Err(RelationError::invalid_state(
                "rule",
                format!("deliberate failure after {} successful calls", self.succeed_count),
            ));
        }
        Ok(T::from_index(index + 1))
    }

    fn name(&self) -> &str {
        "failing"
    }
}

/// Rule that increments a shared counter when dropped.
///
/// Hand out [`DropProbe::counter`] before moving the probe into a manager,
/// then assert on the count after the manager is gone.
pub struct DropProbe {
    pub x0: f64,
    drops: Arc<AtomicUsize>,
}

impl DropProbe {
    pub fn new(x0: f64) -> Self {
        Self {
            x0,
            drops: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Shared drop counter for this probe.
    pub fn counter(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.drops)
    }
}

impl Drop for DropProbe {
    fn drop(&mut self) {
        self.drops.fetch_add(1, Ordering::Relaxed);
    }
}

impl RecursiveRule<f64> for DropProbe {
    fn init_value(&self) -> f64 {
        self.x0
    }

    fn name(&self) -> &str {
        "drop_probe"
    }
}
