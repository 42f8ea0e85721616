//! Fixed-size sample blocks and the jagged block list built from them.
//!
//! A [`Block`] is one contiguous `Vec<T>` of `J` samples. A [`BlockList`]
//! holds `I` blocks and resolves linear indices through its [`Shape`].

use falc_core::{Real, RelationError, Shape};

/// A single contiguous run of samples.
///
/// Blocks are allocated to full length at creation and never grow or shrink.
#[derive(Clone, Debug)]
pub struct Block<T> {
    data: Vec<T>,
}

impl<T: Real> Block<T> {
    /// Allocate a zero-filled block of `len` samples.
    ///
    /// # Errors
    ///
    /// [`RelationError::AllocationFailed`] if the memory cannot be reserved.
    pub fn zeroed(len: usize) -> Result<Self, RelationError> {
        let mut data = Vec::new();
        data.try_reserve_exact(len)
            .map_err(|_| RelationError::AllocationFailed { requested: len })?;
        data.resize(len, T::zero());
        Ok(Self { data })
    }

    /// Shared view of the block's samples.
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Mutable view of the block's samples.
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Number of samples in the block.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the block holds no samples.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Memory used by the samples in bytes.
    pub fn memory_bytes(&self) -> usize {
        self.data.len() * std::mem::size_of::<T>()
    }
}

/// `I` blocks of `J` samples addressed by a single linear index.
#[derive(Clone, Debug)]
pub struct BlockList<T> {
    blocks: Vec<Block<T>>,
    shape: Shape,
}

impl<T: Real> BlockList<T> {
    /// Allocate `shape.blocks()` zero-filled blocks.
    ///
    /// # Errors
    ///
    /// [`RelationError::AllocationFailed`] if any block cannot be reserved.
    pub fn zeroed(shape: Shape) -> Result<Self, RelationError> {
        let mut blocks = Vec::new();
        blocks
            .try_reserve_exact(shape.blocks())
            .map_err(|_| RelationError::AllocationFailed {
                requested: shape.len(),
            })?;
        for _ in 0..shape.blocks() {
            blocks.push(Block::zeroed(shape.block_len())?);
        }
        tracing::trace!(%shape, "allocated block list");
        Ok(Self { blocks, shape })
    }

    /// The layout of this list.
    pub fn shape(&self) -> Shape {
        self.shape
    }

    /// Total number of samples.
    pub fn len(&self) -> usize {
        self.shape.len()
    }

    /// Always `false`; shapes are non-empty.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Sample at linear index `index`.
    ///
    /// # Errors
    ///
    /// [`RelationError::IndexOutOfRange`] if `index >= len()`.
    pub fn get(&self, index: usize) -> Result<T, RelationError> {
        let (block, offset) = self.shape.locate(index)?;
        Ok(self.blocks[block].as_slice()[offset])
    }

    /// Overwrite the sample at linear index `index`.
    ///
    /// # Errors
    ///
    /// [`RelationError::IndexOutOfRange`] if `index >= len()`.
    pub fn set(&mut self, index: usize, value: T) -> Result<(), RelationError> {
        let (block, offset) = self.shape.locate(index)?;
        self.blocks[block].as_mut_slice()[offset] = value;
        Ok(())
    }

    /// Overwrite every sample with `f(k)` for its linear index `k`, block by
    /// block.
    pub fn fill_with(&mut self, mut f: impl FnMut(usize) -> T) {
        let block_len = self.shape.block_len();
        for (b, block) in self.blocks.iter_mut().enumerate() {
            for (o, slot) in block.as_mut_slice().iter_mut().enumerate() {
                *slot = f(b * block_len + o);
            }
        }
    }

    /// Overwrite every sample with `f(source[k])`, block by block.
    ///
    /// # Errors
    ///
    /// [`RelationError::ShapeMismatch`] if `source` has another shape.
    pub fn fill_from(
        &mut self,
        source: &BlockList<T>,
        mut f: impl FnMut(T) -> T,
    ) -> Result<(), RelationError> {
        if source.shape != self.shape {
            return Err(RelationError::ShapeMismatch {
                expected: self.shape,
                found: source.shape,
            });
        }
        for (dst, src) in self.blocks.iter_mut().zip(&source.blocks) {
            for (d, &s) in dst.as_mut_slice().iter_mut().zip(src.as_slice()) {
                *d = f(s);
            }
        }
        Ok(())
    }

    /// The underlying blocks, in order.
    pub fn blocks(&self) -> &[Block<T>] {
        &self.blocks
    }

    /// Iterate over all samples in linear order.
    pub fn iter(&self) -> impl Iterator<Item = T> + '_ {
        self.blocks.iter().flat_map(|b| b.as_slice().iter().copied())
    }

    /// Copy all samples into one contiguous vector.
    pub fn to_vec(&self) -> Vec<T> {
        self.iter().collect()
    }

    /// Memory used by all blocks in bytes.
    pub fn memory_bytes(&self) -> usize {
        self.blocks.iter().map(|b| b.memory_bytes()).sum()
    }
}
