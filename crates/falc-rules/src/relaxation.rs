//! First-order relaxation of one relation toward another.

use falc_core::{Real, RelationError, RelationSet};
use falc_rule::RecursiveRule;

/// `A[i] = A[i-1] + rate * (B[i-1] - A[i-1])`.
///
/// `A` is the relation in slot `own`, `B` the one in slot `target`. With
/// `rate = 0.5`, `A = 0` and `B = 10` the first step lands on `5`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LinearRelaxation<T> {
    /// Seed written to `image[0]`.
    pub x0: T,
    /// Fraction of the gap closed per step.
    pub rate: T,
    /// Slot of the relaxing relation.
    pub own: usize,
    /// Slot of the relation being approached.
    pub target: usize,
}

impl<T: Real> RecursiveRule<T> for LinearRelaxation<T> {
    fn init_value(&self) -> T {
        self.x0
    }

    fn rule(&self, relations: &dyn RelationSet<T>, index: usize) -> Result<T, RelationError> {
        let a = relations.image_elem(self.own, index)?;
        let b = relations.image_elem(self.target, index)?;
        Ok(a + self.rate * (b - a))
    }

    fn name(&self) -> &str {
        "linear_relaxation"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use falc_test_utils::MockRelationSet;

    fn halfway(own: usize, target: usize) -> LinearRelaxation<f64> {
        LinearRelaxation {
            x0: 0.0,
            rate: 0.5,
            own,
            target,
        }
    }

    #[test]
    fn closes_half_the_gap() {
        let relations = MockRelationSet::from_relations(vec![vec![0.0], vec![10.0]]);
        assert_eq!(halfway(0, 1).rule(&relations, 0).unwrap(), 5.0);
    }

    #[test]
    fn slots_are_configurable() {
        let relations = MockRelationSet::from_relations(vec![vec![10.0], vec![0.0]]);
        assert_eq!(halfway(1, 0).rule(&relations, 0).unwrap(), 5.0);
    }

    #[test]
    fn missing_target_is_reported() {
        let relations = MockRelationSet::from_relations(vec![vec![0.0]]);
        assert_eq!(
            halfway(0, 1).rule(&relations, 0),
            Err(RelationError::UnknownRelation { slot: 1, count: 1 })
        );
    }
}
