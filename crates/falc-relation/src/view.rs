//! A relation set that places one relation's own image in slot 0.

use falc_arena::BlockList;
use falc_core::{Real, RelationError, RelationSet};

/// Slot 0 reads `own`; slots `1..` read `siblings[0..]`.
pub(crate) struct WithSelf<'a, T> {
    pub(crate) own: &'a BlockList<T>,
    pub(crate) siblings: &'a dyn RelationSet<T>,
}

impl<T: Real> RelationSet<T> for WithSelf<'_, T> {
    fn relation_count(&self) -> usize {
        1 + self.siblings.relation_count()
    }

    fn image_elem(&self, slot: usize, index: usize) -> Result<T, RelationError> {
        match slot {
            0 => self.own.get(index),
            s if s <= self.siblings.relation_count() => self.siblings.image_elem(s - 1, index),
            _ => Err(RelationError::UnknownRelation {
                slot,
                count: self.relation_count(),
            }),
        }
    }
}
