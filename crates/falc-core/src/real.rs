//! The numeric capability shared by every sample type.

use std::fmt::{Debug, Display};

use num_traits::{Float, FromPrimitive};

/// A real scalar that can be stored in a domain or image.
///
/// Blanket-implemented for every type with floating-point arithmetic and
/// primitive conversions, so `f32` and `f64` both qualify.
pub trait Real: Float + FromPrimitive + Debug + Display + 'static {
    /// Convert a linear sample index into a scalar.
    ///
    /// Indices beyond the exactly representable range of the type round to
    /// the nearest value. Never fails for `f32`/`f64`.
    fn from_index(index: usize) -> Self {
        Self::from_usize(index).unwrap_or_else(Self::infinity)
    }
}

impl<T: Float + FromPrimitive + Debug + Display + 'static> Real for T {}
