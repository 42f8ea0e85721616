//! The fixed `I × J` jagged layout of a relation.

use std::fmt;

use crate::error::{ConfigError, RelationError};

/// Layout of a domain or image: `blocks` chunks of `block_len` samples.
///
/// A linear index `i` lives in block `i / block_len` at offset
/// `i % block_len`. The shape is fixed for the lifetime of a relation and is
/// always non-empty.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Shape {
    blocks: usize,
    block_len: usize,
}

impl Shape {
    /// Validate and create a shape of `blocks` blocks with `block_len`
    /// samples each.
    ///
    /// # Errors
    ///
    /// [`ConfigError::EmptyShape`] if either dimension is zero,
    /// [`ConfigError::ShapeOverflow`] if the total does not fit in `usize`.
    pub fn new(blocks: usize, block_len: usize) -> Result<Self, ConfigError> {
        if blocks == 0 || block_len == 0 {
            return Err(ConfigError::EmptyShape { blocks, block_len });
        }
        if blocks.checked_mul(block_len).is_none() {
            return Err(ConfigError::ShapeOverflow { blocks, block_len });
        }
        Ok(Self { blocks, block_len })
    }

    /// Number of blocks (`I`).
    pub fn blocks(&self) -> usize {
        self.blocks
    }

    /// Samples per block (`J`).
    pub fn block_len(&self) -> usize {
        self.block_len
    }

    /// Total number of samples (`I * J`).
    pub fn len(&self) -> usize {
        self.blocks * self.block_len
    }

    /// Always `false`; shapes are validated non-empty.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Index of the last sample (`I * J - 1`).
    pub fn last_index(&self) -> usize {
        self.len() - 1
    }

    /// Map a linear index to `(block, offset)`.
    ///
    /// # Errors
    ///
    /// [`RelationError::IndexOutOfRange`] if `index >= len()`.
    pub fn locate(&self, index: usize) -> Result<(usize, usize), RelationError> {
        if index >= self.len() {
            return Err(RelationError::IndexOutOfRange {
                index,
                len: self.len(),
            });
        }
        Ok((index / self.block_len, index % self.block_len))
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.blocks, self.block_len)
    }
}
