//! Domain buffers and their shared, read-only form.
//!
//! A [`Domain`] is written once by the relation that allocated it, then
//! frozen into a [`SharedDomain`] (`Arc<Domain>`) so coupled relations can
//! sample the same abscissae without copying them.

use std::sync::Arc;

use falc_core::{Real, RelationError, Shape};

use crate::block::BlockList;

/// Evenly or arbitrarily spaced input samples of a relation.
#[derive(Clone, Debug)]
pub struct Domain<T> {
    samples: BlockList<T>,
    dx: T,
    assigned: bool,
}

/// Shared handle for borrowing a populated domain across relations.
pub type SharedDomain<T> = Arc<Domain<T>>;

impl<T: Real> Domain<T> {
    /// Allocate a zeroed, unassigned domain of the given shape.
    ///
    /// # Errors
    ///
    /// [`RelationError::AllocationFailed`] if the blocks cannot be reserved.
    pub fn zeroed(shape: Shape) -> Result<Self, RelationError> {
        Ok(Self {
            samples: BlockList::zeroed(shape)?,
            dx: T::zero(),
            assigned: false,
        })
    }

    /// Write `len` evenly spaced samples starting at `x0` and ending at `x1`.
    ///
    /// Sets `dx = (x1 - x0) / (len - 1)` and `domain[k] = x0 + k * dx`, so the
    /// last sample equals `x1` up to rounding. A single-sample domain gets
    /// `dx = 0` and holds only `x0`. Returns the spacing.
    ///
    /// # Errors
    ///
    /// [`RelationError::InvalidState`] if the domain was already assigned.
    pub fn populate_from_interval(&mut self, x0: T, x1: T) -> Result<T, RelationError> {
        if self.assigned {
            return Err(RelationError::invalid_state(
                "populate_domain_from_interval",
                "domain is already assigned",
            ));
        }
        let last = self.samples.shape().last_index();
        let dx = if last == 0 {
            T::zero()
        } else {
            (x1 - x0) / T::from_index(last)
        };
        self.samples.fill_with(|k| x0 + T::from_index(k) * dx);
        self.dx = dx;
        self.assigned = true;
        tracing::debug!(
            shape = %self.samples.shape(),
            x0 = %x0,
            x1 = %x1,
            dx = %dx,
            "populated domain from interval"
        );
        Ok(dx)
    }

    /// Overwrite a single sample and mark the domain assigned.
    ///
    /// # Errors
    ///
    /// [`RelationError::IndexOutOfRange`] if `index` is past the end.
    pub fn set(&mut self, index: usize, value: T) -> Result<(), RelationError> {
        self.samples.set(index, value)?;
        self.assigned = true;
        Ok(())
    }

    /// Sample at linear index `index`.
    ///
    /// # Errors
    ///
    /// [`RelationError::IndexOutOfRange`] if `index` is past the end.
    pub fn get(&self, index: usize) -> Result<T, RelationError> {
        self.samples.get(index)
    }

    /// Spacing between consecutive samples; zero until populated from an
    /// interval.
    pub fn dx(&self) -> T {
        self.dx
    }

    /// Whether any sample has been written.
    pub fn is_assigned(&self) -> bool {
        self.assigned
    }

    /// The layout of this domain.
    pub fn shape(&self) -> Shape {
        self.samples.shape()
    }

    /// The underlying block list.
    pub fn samples(&self) -> &BlockList<T> {
        &self.samples
    }

    /// Freeze this domain for sharing.
    pub fn into_shared(self) -> SharedDomain<T> {
        Arc::new(self)
    }
}
