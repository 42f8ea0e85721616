//! Explicit Euler steps of the Lorenz system.
//!
//! ```text
//! x' = x + dt * sigma * (y - x)
//! y' = y + dt * (x * (rho - z) - y)
//! z' = z + dt * (x * y - beta * z)
//! ```
//!
//! Each coordinate is its own relation. All three rules read the relation
//! set in the same slot order, [`X`], [`Y`], [`Z`].

use falc_core::{Real, RelationError, RelationSet};
use falc_rule::RecursiveRule;

/// Slot of the `x` relation.
pub const X: usize = 0;
/// Slot of the `y` relation.
pub const Y: usize = 1;
/// Slot of the `z` relation.
pub const Z: usize = 2;

/// The `x` coordinate.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LorenzX<T> {
    /// Initial `x`.
    pub x0: T,
    /// Time step.
    pub dt: T,
    /// Prandtl number.
    pub sigma: T,
}

/// The `y` coordinate.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LorenzY<T> {
    /// Initial `y`.
    pub x0: T,
    /// Time step.
    pub dt: T,
    /// Rayleigh number.
    pub rho: T,
}

/// The `z` coordinate.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LorenzZ<T> {
    /// Initial `z`.
    pub x0: T,
    /// Time step.
    pub dt: T,
    /// Geometric factor.
    pub beta: T,
}

impl<T: Real> RecursiveRule<T> for LorenzX<T> {
    fn init_value(&self) -> T {
        self.x0
    }

    fn rule(&self, relations: &dyn RelationSet<T>, index: usize) -> Result<T, RelationError> {
        let x = relations.image_elem(X, index)?;
        let y = relations.image_elem(Y, index)?;
        Ok(x + self.dt * self.sigma * (y - x))
    }

    fn name(&self) -> &str {
        "lorenz_x"
    }
}

impl<T: Real> RecursiveRule<T> for LorenzY<T> {
    fn init_value(&self) -> T {
        self.x0
    }

    fn rule(&self, relations: &dyn RelationSet<T>, index: usize) -> Result<T, RelationError> {
        let x = relations.image_elem(X, index)?;
        let y = relations.image_elem(Y, index)?;
        let z = relations.image_elem(Z, index)?;
        Ok(y + self.dt * (x * (self.rho - z) - y))
    }

    fn name(&self) -> &str {
        "lorenz_y"
    }
}

impl<T: Real> RecursiveRule<T> for LorenzZ<T> {
    fn init_value(&self) -> T {
        self.x0
    }

    fn rule(&self, relations: &dyn RelationSet<T>, index: usize) -> Result<T, RelationError> {
        let x = relations.image_elem(X, index)?;
        let y = relations.image_elem(Y, index)?;
        let z = relations.image_elem(Z, index)?;
        Ok(z + self.dt * (x * y - self.beta * z))
    }

    fn name(&self) -> &str {
        "lorenz_z"
    }
}
