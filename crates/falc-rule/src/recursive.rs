//! The [`RecursiveRule`] trait and the [`SelfRecursive`] adapter.
//!
//! Recursive rules describe a sequence by its seed and a step. The step
//! either recurses on a scalar ([`RecursiveRule::next`]) or reads a set of
//! coupled relations ([`RecursiveRule::rule`]); the second form is how one
//! variable of a differential system reads the others.

use std::sync::Arc;

use falc_core::{Real, RelationError, RelationSet};

use crate::simple::SimpleRule;

/// A seeded recursion, optionally coupled to other relations.
///
/// # Contract
///
/// - `rule(relations, i)` returns the value to store *after* index `i`; the
///   caller decides which image slot receives it. Managers stepping index
///   `k` pass `i = k - 1`.
/// - `rule` must be deterministic: same relation state, same output.
/// - `&self`: rules hold parameters, not per-step state.
///
/// # Examples
///
/// One explicit Euler step of `dx/dt = -x`, reading its own relation in
/// slot 0:
///
/// ```
/// use falc_core::{RelationError, RelationSet};
/// use falc_rule::RecursiveRule;
///
/// struct Decay {
///     x0: f64,
///     dt: f64,
/// }
///
/// impl RecursiveRule<f64> for Decay {
///     fn init_value(&self) -> f64 {
///         self.x0
///     }
///
///     fn rule(&self, relations: &dyn RelationSet<f64>, i: usize) -> Result<f64, RelationError> {
///         let x = relations.image_elem(0, i)?;
///         Ok(x - self.dt * x)
///     }
/// }
///
/// let decay = Decay { x0: 1.0, dt: 0.5 };
/// assert_eq!(decay.init_value(), 1.0);
/// assert_eq!(decay.next(1.0), 2.0); // placeholder self-recursion
/// ```
pub trait RecursiveRule<T: Real> {
    /// Seed value written to image index 0.
    fn init_value(&self) -> T;

    /// Scalar self-recursion.
    ///
    /// Default: `x + 1`.
    fn next(&self, x: T) -> T {
        x + T::one()
    }

    /// Coupled recursion: the value following index `index`, computed from
    /// the relations in `relations`.
    ///
    /// Default: applies [`next`](RecursiveRule::next) to slot 0's image at
    /// `index`, i.e. `relations[0][index] + 1` for the placeholder `next`.
    ///
    /// # Errors
    ///
    /// Propagates missing-slot and out-of-range reads.
    fn rule(&self, relations: &dyn RelationSet<T>, index: usize) -> Result<T, RelationError> {
        Ok(self.next(relations.image_elem(0, index)?))
    }

    /// Apply `next` `floor(x / dx)` times starting from the seed.
    ///
    /// Evaluates the uncoupled sequence at abscissa `x` on a grid of spacing
    /// `dx`. A ratio that is negative, non-finite or too large for a
    /// `usize` step count yields the seed.
    fn evaluate(&self, x: T, dx: T) -> T {
        let steps = (x / dx).floor().to_usize().unwrap_or(0);
        (0..steps).fold(self.init_value(), |f, _| self.next(f))
    }

    /// Human-readable name for logging and error reporting.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}

impl<T: Real, R: RecursiveRule<T> + ?Sized> RecursiveRule<T> for &R {
    fn init_value(&self) -> T {
        (**self).init_value()
    }

    fn next(&self, x: T) -> T {
        (**self).next(x)
    }

    fn rule(&self, relations: &dyn RelationSet<T>, index: usize) -> Result<T, RelationError> {
        (**self).rule(relations, index)
    }

    fn evaluate(&self, x: T, dx: T) -> T {
        (**self).evaluate(x, dx)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

impl<T: Real, R: RecursiveRule<T> + ?Sized> RecursiveRule<T> for Box<R> {
    fn init_value(&self) -> T {
        (**self).init_value()
    }

    fn next(&self, x: T) -> T {
        (**self).next(x)
    }

    fn rule(&self, relations: &dyn RelationSet<T>, index: usize) -> Result<T, RelationError> {
        (**self).rule(relations, index)
    }

    fn evaluate(&self, x: T, dx: T) -> T {
        (**self).evaluate(x, dx)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

impl<T: Real, R: RecursiveRule<T> + ?Sized> RecursiveRule<T> for Arc<R> {
    fn init_value(&self) -> T {
        (**self).init_value()
    }

    fn next(&self, x: T) -> T {
        (**self).next(x)
    }

    fn rule(&self, relations: &dyn RelationSet<T>, index: usize) -> Result<T, RelationError> {
        (**self).rule(relations, index)
    }

    fn evaluate(&self, x: T, dx: T) -> T {
        (**self).evaluate(x, dx)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

/// Presents a recursive rule's uncoupled evaluation as a [`SimpleRule`].
///
/// `SelfRecursive(rule).evaluate(x, dx) == rule.evaluate(x, dx)`.
#[derive(Clone, Copy, Debug)]
pub struct SelfRecursive<R>(pub R);

impl<T: Real, R: RecursiveRule<T>> SimpleRule<T> for SelfRecursive<R> {
    fn evaluate(&self, x: T, dx: T) -> T {
        RecursiveRule::evaluate(&self.0, x, dx)
    }
}
