//! The [`SampledRelation`] storage type.

use falc_arena::{BlockList, Domain, SharedDomain};
use falc_core::{ImageReader, Real, RelationError, RelationSet, Shape};
use falc_rule::{RecursiveRule, SimpleRule};

use crate::slot::DomainSlot;
use crate::view::WithSelf;

/// A domain of `I * J` input samples paired with an image of the same shape.
///
/// # Ownership
///
/// - [`new`](SampledRelation::new) allocates the domain; this relation may
///   populate it once and then publish it with
///   [`share_domain`](SampledRelation::share_domain).
/// - [`with_shared_domain`](SampledRelation::with_shared_domain) borrows a
///   published domain. Borrowers can read it but never write it.
/// - The image always belongs to this relation.
///
/// # Indexing
///
/// Linear index `i` maps to block `i / J`, offset `i % J`. Every accessor is
/// bounds-checked and reports [`RelationError::IndexOutOfRange`].
#[derive(Clone, Debug)]
pub struct SampledRelation<T> {
    domain: DomainSlot<T>,
    image: BlockList<T>,
    image_assigned: bool,
}

impl<T: Real> SampledRelation<T> {
    /// Allocate a zeroed domain and image of the given shape.
    ///
    /// # Errors
    ///
    /// [`RelationError::AllocationFailed`] if storage cannot be reserved.
    pub fn new(shape: Shape) -> Result<Self, RelationError> {
        let domain = Domain::zeroed(shape)?.into_shared();
        let image = BlockList::zeroed(shape)?;
        tracing::debug!(%shape, "allocated relation with owned domain");
        Ok(Self {
            domain: DomainSlot::Owned(domain),
            image,
            image_assigned: false,
        })
    }

    /// Allocate an image of the given shape over a borrowed domain.
    ///
    /// # Errors
    ///
    /// - [`RelationError::ShapeMismatch`] if the domain has another shape.
    /// - [`RelationError::InvalidState`] if the domain was never populated.
    /// - [`RelationError::AllocationFailed`] if the image cannot be reserved.
    pub fn with_shared_domain(shape: Shape, domain: SharedDomain<T>) -> Result<Self, RelationError> {
        if domain.shape() != shape {
            return Err(RelationError::ShapeMismatch {
                expected: shape,
                found: domain.shape(),
            });
        }
        if !domain.is_assigned() {
            return Err(RelationError::invalid_state(
                "with_shared_domain",
                "borrowed domain has not been populated",
            ));
        }
        let image = BlockList::zeroed(shape)?;
        tracing::debug!(%shape, "allocated relation over borrowed domain");
        Ok(Self {
            domain: DomainSlot::Borrowed(domain),
            image,
            image_assigned: false,
        })
    }

    /// The jagged layout shared by domain and image.
    pub fn shape(&self) -> Shape {
        self.image.shape()
    }

    /// Total number of samples (`I * J`).
    pub fn len(&self) -> usize {
        self.image.len()
    }

    /// Always `false`; shapes are non-empty.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Spacing of the domain; zero until populated from an interval.
    pub fn dx(&self) -> T {
        self.domain.get().dx()
    }

    /// Whether domain samples have been written.
    pub fn is_domain_assigned(&self) -> bool {
        self.domain.get().is_assigned()
    }

    /// Whether this relation allocated its domain.
    pub fn is_domain_owned(&self) -> bool {
        self.domain.is_owned()
    }

    /// Whether at least one image sample has been written.
    pub fn is_image_assigned(&self) -> bool {
        self.image_assigned
    }

    /// Read access to the domain.
    pub fn domain(&self) -> &Domain<T> {
        self.domain.get()
    }

    /// Read access to the image blocks.
    pub fn image(&self) -> &BlockList<T> {
        &self.image
    }

    /// Publish the domain so other relations can borrow it.
    ///
    /// # Errors
    ///
    /// [`RelationError::InvalidState`] if the domain has not been populated.
    pub fn share_domain(&self) -> Result<SharedDomain<T>, RelationError> {
        if !self.is_domain_assigned() {
            return Err(RelationError::invalid_state(
                "share_domain",
                "domain has not been populated",
            ));
        }
        Ok(self.domain.share())
    }

    /// Domain sample at `index`.
    pub fn domain_elem(&self, index: usize) -> Result<T, RelationError> {
        self.domain.get().get(index)
    }

    /// Image sample at `index`.
    pub fn image_elem(&self, index: usize) -> Result<T, RelationError> {
        self.image.get(index)
    }

    /// Overwrite one domain sample. Only the owner may write, and only
    /// before the domain is shared.
    pub fn set_domain_elem(&mut self, index: usize, value: T) -> Result<(), RelationError> {
        self.domain.get_mut("set_domain_elem")?.set(index, value)
    }

    /// Overwrite one image sample.
    pub fn set_image_elem(&mut self, index: usize, value: T) -> Result<(), RelationError> {
        self.image.set(index, value)?;
        self.image_assigned = true;
        Ok(())
    }

    /// Fill the owned domain with evenly spaced samples over `[x0, x1]`.
    ///
    /// `dx = (x1 - x0) / (I*J - 1)` and `domain[k] = x0 + k * dx`.
    ///
    /// # Errors
    ///
    /// [`RelationError::InvalidState`] if the domain is borrowed, already
    /// shared, or already populated.
    pub fn populate_domain_from_interval(&mut self, x0: T, x1: T) -> Result<(), RelationError> {
        self.domain
            .get_mut("populate_domain_from_interval")?
            .populate_from_interval(x0, x1)?;
        Ok(())
    }

    /// Set `image[k] = rule(domain[k], dx)` for every `k`.
    ///
    /// # Errors
    ///
    /// [`RelationError::InvalidState`] if the domain is not populated.
    pub fn populate_image_from_simple_func<R>(&mut self, rule: &R) -> Result<(), RelationError>
    where
        R: SimpleRule<T> + ?Sized,
    {
        self.require_domain("populate_image_from_simple_func")?;
        let domain = self.domain.get();
        let dx = domain.dx();
        self.image
            .fill_from(domain.samples(), |x| rule.evaluate(x, dx))?;
        self.image_assigned = true;
        Ok(())
    }

    /// Fill the whole image by recursion: `image[0] = rule.init_value()`,
    /// then `image[k] = rule.rule(view, k - 1)`.
    ///
    /// `view` presents this relation in slot 0 and `siblings` in slots
    /// `1..`. Pass [`NoRelations`](falc_core::NoRelations) for pure
    /// self-recursion.
    ///
    /// The relation is always slot 0 here. A coupled rule that expects to
    /// find itself in another slot (a `y` equation reading slot 1, say)
    /// reads a sibling instead; step such rules through a coupled system.
    ///
    /// # Errors
    ///
    /// Whatever the rule returns for a failed read; the image is left
    /// partially written.
    pub fn populate_image_from_single_recursive_func<R>(
        &mut self,
        rule: &R,
        siblings: &dyn RelationSet<T>,
    ) -> Result<(), RelationError>
    where
        R: RecursiveRule<T> + ?Sized,
    {
        self.set_image_elem(0, rule.init_value())?;
        for k in 1..self.len() {
            let value = rule.rule(
                &WithSelf {
                    own: &self.image,
                    siblings,
                },
                k - 1,
            )?;
            self.image.set(k, value)?;
        }
        tracing::trace!(rule = rule.name(), len = self.len(), "populated image by recursion");
        Ok(())
    }

    /// Recompute `image[index] = rule(domain[index], dx)` only.
    ///
    /// # Errors
    ///
    /// [`RelationError::InvalidState`] if the domain is not populated, or an
    /// index error.
    pub fn modify_from_simple_func<R>(&mut self, rule: &R, index: usize) -> Result<(), RelationError>
    where
        R: SimpleRule<T> + ?Sized,
    {
        self.require_domain("modify_from_simple_func")?;
        let x = self.domain_elem(index)?;
        let value = rule.evaluate(x, self.dx());
        self.set_image_elem(index, value)
    }

    /// The value `modify_from_prev_recursive_func` would write at `index`:
    /// `rule.rule(relations, index - 1)`.
    ///
    /// # Errors
    ///
    /// [`RelationError::InvalidState`] for `index == 0` (index 0 is seeded,
    /// never stepped); index errors for `index >= len`.
    pub fn next_from_prev<R>(
        &self,
        rule: &R,
        index: usize,
        relations: &dyn RelationSet<T>,
    ) -> Result<T, RelationError>
    where
        R: RecursiveRule<T> + ?Sized,
    {
        if index == 0 {
            return Err(RelationError::invalid_state(
                "modify_from_prev",
                "index 0 is seeded by init; stepping starts at 1",
            ));
        }
        self.shape().locate(index)?;
        rule.rule(relations, index - 1)
    }

    /// The value `modify_from_last_recursive_func` would write at `index`:
    /// `rule.rule(relations, I*J - 1)`.
    ///
    /// # Errors
    ///
    /// Index errors for `index >= len`, or failed reads.
    pub fn next_from_last<R>(
        &self,
        rule: &R,
        index: usize,
        relations: &dyn RelationSet<T>,
    ) -> Result<T, RelationError>
    where
        R: RecursiveRule<T> + ?Sized,
    {
        self.shape().locate(index)?;
        rule.rule(relations, self.shape().last_index())
    }

    /// Write `image[index]` from the coupled rule evaluated at `index - 1`.
    ///
    /// This is one explicit step of a lock-step simulation: every coupled
    /// relation is read at the previous index, so the order in which
    /// siblings are advanced within a step does not change the result.
    pub fn modify_from_prev_recursive_func<R>(
        &mut self,
        rule: &R,
        index: usize,
        relations: &dyn RelationSet<T>,
    ) -> Result<(), RelationError>
    where
        R: RecursiveRule<T> + ?Sized,
    {
        let value = self.next_from_prev(rule, index, relations)?;
        self.set_image_elem(index, value)
    }

    /// Write `image[index]` from the coupled rule evaluated at the last
    /// index.
    ///
    /// Used with `index == 0` to wrap a full buffer around and keep
    /// simulating in fixed memory.
    pub fn modify_from_last_recursive_func<R>(
        &mut self,
        rule: &R,
        index: usize,
        relations: &dyn RelationSet<T>,
    ) -> Result<(), RelationError>
    where
        R: RecursiveRule<T> + ?Sized,
    {
        let value = self.next_from_last(rule, index, relations)?;
        self.set_image_elem(index, value)
    }

    fn require_domain(&self, operation: &'static str) -> Result<(), RelationError> {
        if self.is_domain_assigned() {
            Ok(())
        } else {
            Err(RelationError::invalid_state(
                operation,
                "domain has not been populated",
            ))
        }
    }
}

impl<T: Real> ImageReader<T> for SampledRelation<T> {
    fn image_elem(&self, index: usize) -> Result<T, RelationError> {
        self.image.get(index)
    }

    fn image_len(&self) -> usize {
        self.image.len()
    }
}
