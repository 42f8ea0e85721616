//! Read access to relation images, as seen by recursive rules.

use crate::error::RelationError;

/// Read-only, bounds-checked access to a single relation's image.
///
/// Implemented by sampled relations and managers so that rules can read any
/// coupled relation without knowing its concrete type.
pub trait ImageReader<T> {
    /// Image value at linear index `index`.
    ///
    /// # Errors
    ///
    /// [`RelationError::IndexOutOfRange`] if `index` is past the end.
    fn image_elem(&self, index: usize) -> Result<T, RelationError>;

    /// Number of samples in the image.
    fn image_len(&self) -> usize;
}

/// An ordered set of coupled relations addressed by slot.
///
/// A rule's `rule(relations, i)` reads `relations.image_elem(slot, i)` for
/// every variable it couples to. Slot order is fixed by whoever builds the
/// set (for a Lorenz system: 0 = x, 1 = y, 2 = z).
pub trait RelationSet<T> {
    /// Number of relations in the set.
    fn relation_count(&self) -> usize;

    /// Image value of the relation in `slot` at linear index `index`.
    ///
    /// # Errors
    ///
    /// [`RelationError::UnknownRelation`] for a missing slot, or whatever the
    /// relation's own read returns.
    fn image_elem(&self, slot: usize, index: usize) -> Result<T, RelationError>;
}

/// A relation set with no members.
///
/// Passed where a rule recurses on its own relation only.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoRelations;

impl<T> RelationSet<T> for NoRelations {
    fn relation_count(&self) -> usize {
        0
    }

    fn image_elem(&self, slot: usize, _index: usize) -> Result<T, RelationError> {
        Err(RelationError::UnknownRelation { slot, count: 0 })
    }
}

impl<'a, T, R, const N: usize> RelationSet<T> for [&'a R; N]
where
    R: ImageReader<T> + ?Sized,
{
    fn relation_count(&self) -> usize {
        N
    }

    fn image_elem(&self, slot: usize, index: usize) -> Result<T, RelationError> {
        self.get(slot)
            .ok_or(RelationError::UnknownRelation { slot, count: N })?
            .image_elem(index)
    }
}

impl<'a, T, R> RelationSet<T> for Vec<&'a R>
where
    R: ImageReader<T> + ?Sized,
{
    fn relation_count(&self) -> usize {
        self.len()
    }

    fn image_elem(&self, slot: usize, index: usize) -> Result<T, RelationError> {
        self.get(slot)
            .ok_or(RelationError::UnknownRelation {
                slot,
                count: self.len(),
            })?
            .image_elem(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Ramp(usize);

    impl ImageReader<f64> for Ramp {
        fn image_elem(&self, index: usize) -> Result<f64, RelationError> {
            if index >= self.0 {
                return Err(RelationError::IndexOutOfRange { index, len: self.0 });
            }
            Ok(index as f64)
        }

        fn image_len(&self) -> usize {
            self.0
        }
    }

    #[test]
    fn array_set_reads_by_slot() {
        let a = Ramp(4);
        let b = Ramp(2);
        let set = [&a, &b];
        assert_eq!(set.relation_count(), 2);
        assert_eq!(set.image_elem(0, 3), Ok(3.0));
        assert_eq!(
            set.image_elem(1, 3),
            Err(RelationError::IndexOutOfRange { index: 3, len: 2 })
        );
    }

    #[test]
    fn no_relations_has_no_slots() {
        assert_eq!(RelationSet::<f32>::relation_count(&NoRelations), 0);
        assert_eq!(
            RelationSet::<f32>::image_elem(&NoRelations, 0, 0),
            Err(RelationError::UnknownRelation { slot: 0, count: 0 })
        );
    }

    #[test]
    fn missing_slot_is_unknown_relation() {
        let a = Ramp(4);
        let set: Vec<&dyn ImageReader<f64>> = vec![&a];
        assert_eq!(
            set.image_elem(2, 0),
            Err(RelationError::UnknownRelation { slot: 2, count: 1 })
        );
    }
}
