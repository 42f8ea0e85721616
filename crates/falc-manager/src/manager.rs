//! One sampled relation driven by one recursive rule.
//!
//! A [`RecursiveManager`] is the unit a driver steps. It owns its
//! [`SampledRelation`] outright and holds its rule as `R`, which is either
//! an owned rule or a borrowed `&R`/`Arc<R>` (see the forwarding impls in
//! `falc-rule`). Dropping the manager drops exactly what it owns.
//!
//! # Lifecycle
//!
//! ```text
//! Uninitialized ──init_domain_and_x0 / init_x0──▶ DomainReady
//!                                                   │
//!                             modify_from_prev / modify_from_last
//!                                                   ▼
//!                  ◀──────────── init_x0 ────────  Stepping
//! ```
//!
//! Stepping in `Uninitialized` is refused with
//! [`RelationError::InvalidState`].

use falc_arena::SharedDomain;
use falc_core::{ImageReader, Real, RelationError, RelationSet, Shape};
use falc_relation::SampledRelation;
use falc_rule::RecursiveRule;

/// Where a manager is in its lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ManagerState {
    /// Image not seeded yet; stepping is refused.
    Uninitialized,
    /// `image[0]` holds the rule's seed.
    DomainReady,
    /// At least one step has been written since the last seeding.
    Stepping,
}

/// A sampled relation paired with the recursive rule that advances it.
pub struct RecursiveManager<T, R> {
    relation: SampledRelation<T>,
    rule: R,
    state: ManagerState,
}

impl<T: Real, R: RecursiveRule<T>> RecursiveManager<T, R> {
    /// Adopt an existing relation and a rule.
    ///
    /// A relation whose image has already been written counts as seeded.
    pub fn from_parts(relation: SampledRelation<T>, rule: R) -> Self {
        let state = if relation.is_image_assigned() {
            ManagerState::DomainReady
        } else {
            ManagerState::Uninitialized
        };
        Self {
            relation,
            rule,
            state,
        }
    }

    /// A manager over a fresh relation that owns its domain.
    pub fn new(shape: Shape, rule: R) -> Result<Self, RelationError> {
        Ok(Self::from_parts(SampledRelation::new(shape)?, rule))
    }

    /// A manager over a fresh relation that borrows `domain`.
    ///
    /// # Errors
    ///
    /// [`RelationError::ShapeMismatch`] if `domain` has a different shape,
    /// [`RelationError::InvalidState`] if it has not been populated.
    pub fn with_shared_domain(
        shape: Shape,
        domain: SharedDomain<T>,
        rule: R,
    ) -> Result<Self, RelationError> {
        Ok(Self::from_parts(
            SampledRelation::with_shared_domain(shape, domain)?,
            rule,
        ))
    }

    /// Populate the owned domain uniformly over `[x0, x1]` and seed
    /// `image[0]` with the rule's initial value.
    ///
    /// # Errors
    ///
    /// [`RelationError::InvalidState`] if the domain is borrowed, already
    /// shared or already populated.
    pub fn init_domain_and_x0(&mut self, x0: T, x1: T) -> Result<(), RelationError> {
        self.relation.populate_domain_from_interval(x0, x1)?;
        self.init_x0()
    }

    /// Seed `image[0]` with the rule's initial value.
    ///
    /// May be called again at any time to restart from the seed.
    pub fn init_x0(&mut self) -> Result<(), RelationError> {
        let x0 = self.rule.init_value();
        self.relation.set_image_elem(0, x0)?;
        self.state = ManagerState::DomainReady;
        tracing::trace!(rule = self.rule.name(), "seeded image[0]");
        Ok(())
    }

    /// Advance `image[index]` from `relations` read at `index - 1`.
    ///
    /// `relations` cannot contain this manager (it is borrowed mutably
    /// here). To step a relation that reads itself, use a
    /// [`CoupledSystem`](crate::CoupledSystem).
    pub fn modify_from_prev(
        &mut self,
        index: usize,
        relations: &dyn RelationSet<T>,
    ) -> Result<(), RelationError> {
        let value = self.next_from_prev(index, relations)?;
        self.commit(index, value)
    }

    /// Overwrite `image[index]` from `relations` read at the last index.
    pub fn modify_from_last(
        &mut self,
        index: usize,
        relations: &dyn RelationSet<T>,
    ) -> Result<(), RelationError> {
        let value = self.next_from_last(index, relations)?;
        self.commit(index, value)
    }

    /// The value [`modify_from_prev`](Self::modify_from_prev) would write,
    /// without writing it.
    pub fn next_from_prev(
        &self,
        index: usize,
        relations: &dyn RelationSet<T>,
    ) -> Result<T, RelationError> {
        self.require_seeded("modify_from_prev")?;
        self.relation.next_from_prev(&self.rule, index, relations)
    }

    /// The value [`modify_from_last`](Self::modify_from_last) would write,
    /// without writing it.
    pub fn next_from_last(
        &self,
        index: usize,
        relations: &dyn RelationSet<T>,
    ) -> Result<T, RelationError> {
        self.require_seeded("modify_from_last")?;
        self.relation.next_from_last(&self.rule, index, relations)
    }

    /// Write a value produced by `next_from_prev`/`next_from_last`.
    pub fn commit(&mut self, index: usize, value: T) -> Result<(), RelationError> {
        self.require_seeded("commit")?;
        self.relation.set_image_elem(index, value)?;
        self.state = ManagerState::Stepping;
        Ok(())
    }

    /// The rule's initial value.
    pub fn x0(&self) -> T {
        self.rule.init_value()
    }

    /// The managed relation.
    pub fn relation(&self) -> &SampledRelation<T> {
        &self.relation
    }

    /// The rule advancing the relation.
    pub fn rule(&self) -> &R {
        &self.rule
    }

    /// Current lifecycle state.
    pub fn state(&self) -> ManagerState {
        self.state
    }

    /// Shape of the managed relation.
    pub fn shape(&self) -> Shape {
        self.relation.shape()
    }

    /// Total number of samples.
    pub fn len(&self) -> usize {
        self.relation.len()
    }

    /// Always `false`: shapes have at least one sample.
    pub fn is_empty(&self) -> bool {
        self.relation.is_empty()
    }

    /// Share the populated domain with sibling managers.
    ///
    /// Once shared, this manager can no longer write its domain.
    pub fn share_domain(&self) -> Result<SharedDomain<T>, RelationError> {
        self.relation.share_domain()
    }

    /// Take the relation and the rule back out of the manager.
    pub fn into_parts(self) -> (SampledRelation<T>, R) {
        (self.relation, self.rule)
    }

    fn require_seeded(&self, operation: &'static str) -> Result<(), RelationError> {
        match self.state {
            ManagerState::Uninitialized => Err(RelationError::invalid_state(
                operation,
                "image[0] has not been seeded; call init_x0 or init_domain_and_x0 first",
            )),
            ManagerState::DomainReady | ManagerState::Stepping => Ok(()),
        }
    }
}

impl<T: Real, R: RecursiveRule<T>> ImageReader<T> for RecursiveManager<T, R> {
    fn image_elem(&self, index: usize) -> Result<T, RelationError> {
        self.relation.image_elem(index)
    }

    fn image_len(&self) -> usize {
        self.relation.len()
    }
}
