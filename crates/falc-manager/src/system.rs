//! Lock-step stepping of coupled recursive managers.
//!
//! [`CoupledSystem`] owns every manager of one coupled system, in slot
//! order, and is itself the [`RelationSet`] their rules read. Each member's
//! next value is computed against an immutable view of the whole system
//! (the member included) and only then written back, so a rule may read
//! its own relation as well as its siblings'.
//!
//! A step computes every member's value before writing any of them, so a
//! failing member leaves the whole row at its previous contents.

use indexmap::IndexMap;
use smallvec::SmallVec;

use falc_core::{ImageReader, Real, RelationError, RelationSet, Shape};
use falc_rule::RecursiveRule;

use crate::manager::{ManagerState, RecursiveManager};

/// One sample of every member, in slot order.
pub type Row<T> = SmallVec<[T; 4]>;

// ── CoupledMember ───────────────────────────────────────────────

/// Object-safe view of a [`RecursiveManager`] used by [`CoupledSystem`].
///
/// Erases the rule type so that managers with different rules can live in
/// one system.
pub trait CoupledMember<T: Real>: ImageReader<T> {
    /// Name of the member's rule.
    fn rule_name(&self) -> &str;

    /// Shape of the member's relation.
    fn shape(&self) -> Shape;

    /// The member's lifecycle state.
    fn state(&self) -> ManagerState;

    /// See [`RecursiveManager::next_from_prev`].
    fn next_from_prev(&self, index: usize, relations: &dyn RelationSet<T>)
        -> Result<T, RelationError>;

    /// See [`RecursiveManager::next_from_last`].
    fn next_from_last(&self, index: usize, relations: &dyn RelationSet<T>)
        -> Result<T, RelationError>;

    /// See [`RecursiveManager::commit`].
    fn commit(&mut self, index: usize, value: T) -> Result<(), RelationError>;
}

impl<T: Real, R: RecursiveRule<T>> CoupledMember<T> for RecursiveManager<T, R> {
    fn rule_name(&self) -> &str {
        self.rule().name()
    }

    fn shape(&self) -> Shape {
        RecursiveManager::shape(self)
    }

    fn state(&self) -> ManagerState {
        RecursiveManager::state(self)
    }

    fn next_from_prev(
        &self,
        index: usize,
        relations: &dyn RelationSet<T>,
    ) -> Result<T, RelationError> {
        RecursiveManager::next_from_prev(self, index, relations)
    }

    fn next_from_last(
        &self,
        index: usize,
        relations: &dyn RelationSet<T>,
    ) -> Result<T, RelationError> {
        RecursiveManager::next_from_last(self, index, relations)
    }

    fn commit(&mut self, index: usize, value: T) -> Result<(), RelationError> {
        RecursiveManager::commit(self, index, value)
    }
}

impl<T: Real, R: RecursiveRule<T>> RecursiveManager<T, R> {
    /// Box this manager for [`CoupledSystem::new`].
    pub fn boxed<'r>(self) -> Box<dyn CoupledMember<T> + 'r>
    where
        Self: 'r,
    {
        Box::new(self)
    }
}

// ── CoupledSystem ───────────────────────────────────────────────

/// The managers of one coupled system, advanced in lock-step.
///
/// Slot `k` of the system is the `k`-th member passed to
/// [`new()`](CoupledSystem::new). Rules address their couplings by slot.
///
/// # Example
///
/// ```ignore
/// let mut system = CoupledSystem::new([
///     ("x", x.boxed()),
///     ("y", y.boxed()),
///     ("z", z.boxed()),
/// ])?;
/// system.run()?;
/// let last = system.row(system.len() - 1)?;
/// ```
pub struct CoupledSystem<'r, T> {
    members: IndexMap<String, Box<dyn CoupledMember<T> + 'r>>,
    shape: Shape,
    check_finite: bool,
}

impl<'r, T: Real> CoupledSystem<'r, T> {
    /// Build a system from named members in slot order.
    ///
    /// # Errors
    ///
    /// [`RelationError::InvalidState`] for an empty member list or a
    /// repeated name, [`RelationError::ShapeMismatch`] if the members do not
    /// all have the same shape.
    pub fn new<I, S>(members: I) -> Result<Self, RelationError>
    where
        I: IntoIterator<Item = (S, Box<dyn CoupledMember<T> + 'r>)>,
        S: Into<String>,
    {
        let mut map: IndexMap<String, Box<dyn CoupledMember<T> + 'r>> = IndexMap::new();
        let mut shape: Option<Shape> = None;
        for (name, member) in members {
            let name = name.into();
            match shape {
                None => shape = Some(member.shape()),
                Some(expected) if expected != member.shape() => {
                    return Err(RelationError::ShapeMismatch {
                        expected,
                        found: member.shape(),
                    });
                }
                Some(_) => {}
            }
            if map.contains_key(&name) {
                return Err(RelationError::invalid_state(
                    "CoupledSystem::new",
                    format!("duplicate member '{name}'"),
                ));
            }
            map.insert(name, member);
        }
        let shape = shape.ok_or_else(|| {
            RelationError::invalid_state("CoupledSystem::new", "a system needs at least one member")
        })?;
        tracing::debug!(members = map.len(), %shape, "built coupled system");
        Ok(Self {
            members: map,
            shape,
            check_finite: false,
        })
    }

    /// Reject NaN and infinite samples as they are written.
    pub fn with_divergence_check(mut self, enabled: bool) -> Self {
        self.check_finite = enabled;
        self
    }

    /// Shape shared by every member.
    pub fn shape(&self) -> Shape {
        self.shape
    }

    /// Samples per member.
    pub fn len(&self) -> usize {
        self.shape.len()
    }

    /// Always `false`: shapes have at least one sample.
    pub fn is_empty(&self) -> bool {
        self.shape.is_empty()
    }

    /// Number of members.
    pub fn member_count(&self) -> usize {
        self.members.len()
    }

    /// Member names in slot order.
    pub fn member_names(&self) -> impl Iterator<Item = &str> {
        self.members.keys().map(String::as_str)
    }

    /// Slot of the member called `name`.
    pub fn slot_of(&self, name: &str) -> Option<usize> {
        self.members.get_index_of(name)
    }

    /// The member called `name`.
    pub fn member(&self, name: &str) -> Option<&(dyn CoupledMember<T> + 'r)> {
        self.members.get(name).map(|m| m.as_ref())
    }

    /// Every member's image at `index`, in slot order.
    pub fn row(&self, index: usize) -> Result<Row<T>, RelationError> {
        self.members
            .values()
            .map(|member| member.image_elem(index))
            .collect()
    }

    /// Advance every member's `image[index]` from the system at
    /// `index - 1`.
    ///
    /// The whole row is computed before any member is written: on error no
    /// member has advanced.
    pub fn step(&mut self, index: usize) -> Result<(), RelationError> {
        let next: Row<T> = self
            .members
            .values()
            .map(|member| member.next_from_prev(index, &*self))
            .collect::<Result<_, _>>()?;
        self.commit_row(index, next)
    }

    /// Overwrite every member's `image[0]` from the system at the last
    /// index, so a full buffer can be stepped again from index 1.
    ///
    /// Like [`step()`](CoupledSystem::step), all or nothing.
    pub fn wrap(&mut self) -> Result<(), RelationError> {
        let next: Row<T> = self
            .members
            .values()
            .map(|member| member.next_from_last(0, &*self))
            .collect::<Result<_, _>>()?;
        self.commit_row(0, next)?;
        tracing::debug!(len = self.len(), "wrapped coupled system");
        Ok(())
    }

    /// Step every index from 1 to the end.
    pub fn run(&mut self) -> Result<(), RelationError> {
        for index in 1..self.len() {
            self.step(index)?;
        }
        Ok(())
    }

    /// Run the buffer once, then `rounds` more times after wrapping, calling
    /// `sink` with every row as it is produced.
    ///
    /// Memory stays at one buffer per member however many rounds are run.
    pub fn run_rounds<F>(&mut self, rounds: usize, mut sink: F) -> Result<(), RelationError>
    where
        F: FnMut(&[T]),
    {
        self.run()?;
        for index in 0..self.len() {
            sink(self.row(index)?.as_slice());
        }
        for round in 0..rounds {
            tracing::trace!(round, "starting round");
            self.wrap()?;
            sink(self.row(0)?.as_slice());
            for index in 1..self.len() {
                self.step(index)?;
                sink(self.row(index)?.as_slice());
            }
        }
        Ok(())
    }

    fn slot(&self, slot: usize) -> Result<&(dyn CoupledMember<T> + 'r), RelationError> {
        self.members
            .get_index(slot)
            .map(|(_, member)| member.as_ref())
            .ok_or(RelationError::UnknownRelation {
                slot,
                count: self.members.len(),
            })
    }

    fn commit_row(&mut self, index: usize, row: Row<T>) -> Result<(), RelationError> {
        if self.check_finite {
            if let Some((name, _)) = self
                .members
                .keys()
                .zip(&row)
                .find(|(_, value)| !value.is_finite())
            {
                tracing::warn!(member = %name, index, "non-finite sample");
                return Err(RelationError::NonFinite {
                    relation: name.clone(),
                    index,
                });
            }
        }
        for (member, value) in self.members.values_mut().zip(row) {
            member.commit(index, value)?;
        }
        Ok(())
    }
}

impl<T: Real> RelationSet<T> for CoupledSystem<'_, T> {
    fn relation_count(&self) -> usize {
        self.members.len()
    }

    fn image_elem(&self, slot: usize, index: usize) -> Result<T, RelationError> {
        self.slot(slot)?.image_elem(index)
    }
}
