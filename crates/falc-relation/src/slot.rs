//! Owned vs. borrowed domain storage.

use std::sync::Arc;

use falc_arena::{Domain, SharedDomain};
use falc_core::{Real, RelationError};

/// Where a relation's domain lives.
///
/// Both variants hold an `Arc`, so a borrowed domain can never be freed
/// while a borrower exists. Only the `Owned` variant may write, and only
/// while no borrower holds a clone.
#[derive(Clone, Debug)]
pub enum DomainSlot<T> {
    /// Allocated by this relation.
    Owned(SharedDomain<T>),
    /// Published by another relation and read-only here.
    Borrowed(SharedDomain<T>),
}

impl<T: Real> DomainSlot<T> {
    /// Read access to the domain regardless of ownership.
    pub fn get(&self) -> &Domain<T> {
        match self {
            Self::Owned(d) | Self::Borrowed(d) => d,
        }
    }

    /// Whether this relation allocated the domain.
    pub fn is_owned(&self) -> bool {
        matches!(self, Self::Owned(_))
    }

    /// Write access for the owner, refused once the domain is shared.
    pub(crate) fn get_mut(
        &mut self,
        operation: &'static str,
    ) -> Result<&mut Domain<T>, RelationError> {
        match self {
            Self::Owned(d) => Arc::get_mut(d).ok_or_else(|| {
                RelationError::invalid_state(
                    operation,
                    "domain is shared with borrowing relations",
                )
            }),
            Self::Borrowed(_) => Err(RelationError::invalid_state(
                operation,
                "borrowed domain is read-only",
            )),
        }
    }

    /// A new handle to the same domain.
    pub(crate) fn share(&self) -> SharedDomain<T> {
        match self {
            Self::Owned(d) | Self::Borrowed(d) => Arc::clone(d),
        }
    }
}
