//! Per-sample rules with no coupling.

/// Maps one domain sample (and the domain spacing) to one image sample.
///
/// Any `Fn(T, T) -> T` closure is a simple rule:
///
/// ```
/// use falc_rule::SimpleRule;
///
/// let square = |x: f64, _dx: f64| x * x;
/// assert_eq!(square.evaluate(3.0, 0.1), 9.0);
/// ```
pub trait SimpleRule<T> {
    /// Image value for domain value `x` on a grid of spacing `dx`.
    fn evaluate(&self, x: T, dx: T) -> T;
}

impl<T, F> SimpleRule<T> for F
where
    F: Fn(T, T) -> T,
{
    fn evaluate(&self, x: T, dx: T) -> T {
        self(x, dx)
    }
}
