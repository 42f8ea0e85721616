//! Placeholder recursion: each sample is the previous one plus one.

use falc_core::Real;
use falc_rule::RecursiveRule;

/// `image[i] = image[i - 1] + 1`, seeded at `x0`.
///
/// Reads slot 0, so it is normally stepped as the only member of a system
/// or through [`SelfRecursive`](falc_rule::SelfRecursive).
///
/// ```
/// use falc_rule::RecursiveRule;
/// use falc_rules::Increment;
///
/// let rule = Increment::new(0.0_f64);
/// assert_eq!(rule.evaluate(4.0, 1.0), 4.0);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Increment<T> {
    /// Seed written to `image[0]`.
    pub x0: T,
}

impl<T> Increment<T> {
    /// Create an increment seeded at `x0`.
    pub fn new(x0: T) -> Self {
        Self { x0 }
    }
}

impl<T: Real> RecursiveRule<T> for Increment<T> {
    fn init_value(&self) -> T {
        self.x0
    }

    fn name(&self) -> &str {
        "increment"
    }
}
