//! Error types for falc relations and configuration.
//!
//! [`RelationError`] covers everything that can go wrong while storing,
//! populating or stepping a relation. [`ConfigError`] covers construction
//! parameters that fail validation before any storage exists.

use std::error::Error;
use std::fmt;

use crate::shape::Shape;

/// Errors from relation storage, population and stepping.
#[derive(Clone, Debug, PartialEq)]
pub enum RelationError {
    /// Backing storage for a domain or image could not be reserved.
    AllocationFailed {
        /// Number of samples requested.
        requested: usize,
    },
    /// An operation was invoked in a state that does not permit it
    /// (e.g. populating a domain twice, or stepping before seeding).
    InvalidState {
        /// The refused operation.
        operation: &'static str,
        /// Why it was refused.
        reason: String,
    },
    /// A linear index fell outside `[0, len)`.
    IndexOutOfRange {
        /// The offending index.
        index: usize,
        /// Number of samples in the relation.
        len: usize,
    },
    /// Two relations that must agree on shape do not.
    ShapeMismatch {
        /// The shape required by the receiver.
        expected: Shape,
        /// The shape that was supplied.
        found: Shape,
    },
    /// A rule read a relation slot that the relation set does not contain.
    UnknownRelation {
        /// The slot that was requested.
        slot: usize,
        /// Number of relations in the set.
        count: usize,
    },
    /// A freshly written sample is NaN or infinite.
    NonFinite {
        /// Name of the relation holding the sample.
        relation: String,
        /// Index of the sample.
        index: usize,
    },
}

impl RelationError {
    /// Shorthand for [`RelationError::InvalidState`].
    pub fn invalid_state(operation: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidState {
            operation,
            reason: reason.into(),
        }
    }
}

impl fmt::Display for RelationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AllocationFailed { requested } => {
                write!(f, "allocation failed: could not reserve {requested} samples")
            }
            Self::InvalidState { operation, reason } => {
                write!(f, "invalid state for {operation}: {reason}")
            }
            Self::IndexOutOfRange { index, len } => {
                write!(f, "index {index} out of range for relation of length {len}")
            }
            Self::ShapeMismatch { expected, found } => {
                write!(f, "shape mismatch: expected {expected}, found {found}")
            }
            Self::UnknownRelation { slot, count } => {
                write!(f, "relation slot {slot} not present in a set of {count}")
            }
            Self::NonFinite { relation, index } => {
                write!(f, "non-finite sample in relation '{relation}' at index {index}")
            }
        }
    }
}

impl Error for RelationError {}

/// Errors detected while validating construction parameters.
#[derive(Clone, Debug, PartialEq)]
pub enum ConfigError {
    /// A shape with zero blocks or zero samples per block.
    EmptyShape {
        /// Requested number of blocks (`I`).
        blocks: usize,
        /// Requested samples per block (`J`).
        block_len: usize,
    },
    /// `blocks * block_len` does not fit in `usize`.
    ShapeOverflow {
        /// Requested number of blocks (`I`).
        blocks: usize,
        /// Requested samples per block (`J`).
        block_len: usize,
    },
    /// A scalar parameter is NaN, infinite, or outside its allowed range.
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// The rejected value.
        value: f64,
    },
    /// Building storage from a validated configuration failed.
    Relation(RelationError),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyShape { blocks, block_len } => {
                write!(f, "shape {blocks}x{block_len} holds no samples")
            }
            Self::ShapeOverflow { blocks, block_len } => {
                write!(f, "shape {blocks}x{block_len} overflows usize")
            }
            Self::InvalidParameter { name, value } => {
                write!(f, "invalid parameter {name}: {value}")
            }
            Self::Relation(e) => write!(f, "relation: {e}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Relation(e) => Some(e),
            _ => None,
        }
    }
}

impl From<RelationError> for ConfigError {
    fn from(e: RelationError) -> Self {
        Self::Relation(e)
    }
}
