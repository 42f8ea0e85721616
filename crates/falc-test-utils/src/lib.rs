//! Test utilities and mock types for falc development.
//!
//! Provides mock implementations of the core read traits
//! ([`ImageReader`], [`RelationSet`]) and reusable fixture rules in
//! [`fixtures`].

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

pub use fixtures::{CountingRule, DropProbe, FailingRule};

use falc_core::{ImageReader, RelationError, RelationSet};

/// Mock implementation of [`ImageReader`] backed by a `Vec<T>`.
pub struct MockImage<T> {
    values: Vec<T>,
}

impl<T> MockImage<T> {
    pub fn new(values: Vec<T>) -> Self {
        Self { values }
    }
}

impl<T: Copy> ImageReader<T> for MockImage<T> {
    fn image_elem(&self, index: usize) -> Result<T, RelationError> {
        self.values
            .get(index)
            .copied()
            .ok_or(RelationError::IndexOutOfRange {
                index,
                len: self.values.len(),
            })
    }

    fn image_len(&self) -> usize {
        self.values.len()
    }
}

/// Mock implementation of [`RelationSet`].
///
/// Each slot is a plain `Vec<T>`. Pre-populate slots with
/// [`push_relation`](MockRelationSet::push_relation) before passing to code
/// under test.
pub struct MockRelationSet<T> {
    relations: Vec<MockImage<T>>,
}

impl<T> MockRelationSet<T> {
    pub fn new() -> Self {
        Self {
            relations: Vec::new(),
        }
    }

    /// Build a set whose slot `s` holds `relations[s]`.
    pub fn from_relations(relations: Vec<Vec<T>>) -> Self {
        Self {
            relations: relations.into_iter().map(MockImage::new).collect(),
        }
    }

    /// Append a relation in the next free slot and return that slot.
    pub fn push_relation(&mut self, values: Vec<T>) -> usize {
        self.relations.push(MockImage::new(values));
        self.relations.len() - 1
    }

    /// Overwrite one sample of one slot.
    pub fn set(&mut self, slot: usize, index: usize, value: T) {
        self.relations[slot].values[index] = value;
    }
}

impl<T> Default for MockRelationSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Copy> RelationSet<T> for MockRelationSet<T> {
    fn relation_count(&self) -> usize {
        self.relations.len()
    }

    fn image_elem(&self, slot: usize, index: usize) -> Result<T, RelationError> {
        self.relations
            .get(slot)
            .ok_or(RelationError::UnknownRelation {
                slot,
                count: self.relations.len(),
            })?
            .image_elem(index)
    }
}
