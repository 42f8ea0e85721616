//! Integration tests: managers and coupled systems end to end.
//!
//! Covers interval population, placeholder recursion, a two-relation
//! relaxation, domain sharing rules, rule ownership and rolling-window
//! continuation.

use std::sync::atomic::Ordering;
use std::sync::Arc;

use falc_arena::Domain;
use falc_core::{ImageReader, RelationError, RelationSet, Shape};
use falc_manager::{CoupledSystem, ManagerState, RecursiveManager};
use falc_rules::{Increment, LinearRelaxation};
use falc_test_utils::DropProbe;
use proptest::prelude::*;

fn shape(blocks: usize, block_len: usize) -> Shape {
    Shape::new(blocks, block_len).unwrap()
}

fn image_of(system: &CoupledSystem<'_, f64>, slot: usize) -> Vec<f64> {
    (0..system.len())
        .map(|i| system.image_elem(slot, i).unwrap())
        .collect()
}

// ── Population ──────────────────────────────────────────────────

#[test]
fn unit_interval_over_five_samples() {
    let mut m = RecursiveManager::new(shape(1, 5), Increment::new(0.0)).unwrap();
    m.init_domain_and_x0(0.0, 4.0).unwrap();
    let domain: Vec<f64> = (0..5).map(|i| m.relation().domain_elem(i).unwrap()).collect();
    assert_eq!(domain, [0.0, 1.0, 2.0, 3.0, 4.0]);
    assert_eq!(m.relation().dx(), 1.0);
}

#[test]
fn placeholder_recursion_counts_up() {
    let mut m = RecursiveManager::new(shape(1, 5), Increment::new(0.0)).unwrap();
    m.init_domain_and_x0(0.0, 4.0).unwrap();
    let mut system = CoupledSystem::new([("n", m.boxed())]).unwrap();
    system.run().unwrap();
    assert_eq!(image_of(&system, 0), [0.0, 1.0, 2.0, 3.0, 4.0]);
}

#[test]
fn placeholder_recursion_crosses_block_boundaries() {
    let mut m = RecursiveManager::new(shape(3, 2), Increment::new(10.0)).unwrap();
    m.init_x0().unwrap();
    let mut system = CoupledSystem::new([("n", m.boxed())]).unwrap();
    system.run().unwrap();
    assert_eq!(image_of(&system, 0), [10.0, 11.0, 12.0, 13.0, 14.0, 15.0]);
}

// ── Coupling ────────────────────────────────────────────────────

#[test]
fn relaxation_moves_halfway_in_one_step() {
    let mut a = RecursiveManager::new(
        shape(1, 4),
        LinearRelaxation {
            x0: 0.0,
            rate: 0.5,
            own: 0,
            target: 1,
        },
    )
    .unwrap();
    a.init_domain_and_x0(0.0, 3.0).unwrap();
    let domain = a.share_domain().unwrap();
    let mut b = RecursiveManager::with_shared_domain(
        shape(1, 4),
        domain,
        LinearRelaxation {
            x0: 10.0,
            rate: 0.0,
            own: 1,
            target: 1,
        },
    )
    .unwrap();
    b.init_x0().unwrap();

    let mut system = CoupledSystem::new([("a", a.boxed()), ("b", b.boxed())]).unwrap();
    system.step(1).unwrap();
    assert_eq!(system.image_elem(0, 1).unwrap(), 5.0);
    assert_eq!(system.image_elem(1, 1).unwrap(), 10.0);
    system.run().unwrap();
    assert_eq!(image_of(&system, 0), [0.0, 5.0, 7.5, 8.75]);
}

#[test]
fn standalone_manager_steps_against_siblings() {
    let b = {
        let mut b = RecursiveManager::new(shape(1, 3), Increment::new(10.0)).unwrap();
        b.init_x0().unwrap();
        b
    };
    let mut a = RecursiveManager::new(
        shape(1, 3),
        LinearRelaxation {
            x0: 0.0,
            rate: 0.5,
            own: 0,
            target: 1,
        },
    )
    .unwrap();
    a.init_x0().unwrap();
    let a_prev = [a.image_elem(0).unwrap(); 3];

    // Slot 0 is a snapshot of `a` at index 0, slot 1 is `b`.
    struct Pair<'a>(&'a [f64; 3], &'a dyn ImageReader<f64>);
    impl RelationSet<f64> for Pair<'_> {
        fn relation_count(&self) -> usize {
            2
        }
        fn image_elem(&self, slot: usize, index: usize) -> Result<f64, RelationError> {
            match slot {
                0 => Ok(self.0[index]),
                1 => self.1.image_elem(index),
                _ => Err(RelationError::UnknownRelation { slot, count: 2 }),
            }
        }
    }

    a.modify_from_prev(1, &Pair(&a_prev, &b)).unwrap();
    assert_eq!(a.image_elem(1).unwrap(), 5.0);
    assert_eq!(a.state(), ManagerState::Stepping);
}

// ── Domain sharing ──────────────────────────────────────────────

#[test]
fn unpopulated_domain_cannot_be_shared() {
    let m = RecursiveManager::new(shape(2, 2), Increment::new(0.0)).unwrap();
    assert!(matches!(
        m.share_domain(),
        Err(RelationError::InvalidState { .. })
    ));

    let unpopulated = Arc::new(Domain::<f64>::zeroed(shape(2, 2)).unwrap());
    assert!(matches!(
        RecursiveManager::with_shared_domain(shape(2, 2), unpopulated, Increment::new(0.0)),
        Err(RelationError::InvalidState { .. })
    ));
}

#[test]
fn borrowed_domain_of_wrong_shape_is_refused() {
    let mut owner = RecursiveManager::new(shape(2, 2), Increment::new(0.0)).unwrap();
    owner.init_domain_and_x0(0.0, 1.0).unwrap();
    let domain = owner.share_domain().unwrap();
    assert!(matches!(
        RecursiveManager::with_shared_domain(shape(1, 4), domain, Increment::new(0.0)),
        Err(RelationError::ShapeMismatch { .. })
    ));
}

#[test]
fn stepping_borrowers_leaves_the_domain_untouched() {
    let mut owner = RecursiveManager::new(shape(2, 3), Increment::new(0.0)).unwrap();
    owner.init_domain_and_x0(-1.0, 1.5).unwrap();
    let domain = owner.share_domain().unwrap();
    let before: Vec<f64> = domain.samples().iter().collect();

    let mut borrower =
        RecursiveManager::with_shared_domain(shape(2, 3), Arc::clone(&domain), Increment::new(7.0))
            .unwrap();
    borrower.init_x0().unwrap();
    let mut system = CoupledSystem::new([("b", borrower.boxed())]).unwrap();
    system.run().unwrap();
    system.wrap().unwrap();

    let after: Vec<f64> = domain.samples().iter().collect();
    assert_eq!(before, after);
    assert_eq!(image_of(&system, 0), [13.0, 8.0, 9.0, 10.0, 11.0, 12.0]);
    for i in 0..6 {
        assert_eq!(owner.relation().domain_elem(i).unwrap(), before[i]);
    }
}

#[test]
fn dropping_a_borrower_keeps_the_domain_alive() {
    let mut owner = RecursiveManager::new(shape(1, 3), Increment::new(0.0)).unwrap();
    owner.init_domain_and_x0(0.0, 2.0).unwrap();
    let domain = owner.share_domain().unwrap();
    let borrower =
        RecursiveManager::with_shared_domain(shape(1, 3), Arc::clone(&domain), Increment::new(0.0))
            .unwrap();
    assert_eq!(Arc::strong_count(&domain), 3);
    drop(borrower);
    assert_eq!(Arc::strong_count(&domain), 2);
    drop(owner);
    assert_eq!(Arc::strong_count(&domain), 1);
    assert_eq!(domain.get(2).unwrap(), 2.0);
}

// ── Rule ownership ──────────────────────────────────────────────

#[test]
fn system_drops_owned_rules_exactly_once() {
    let probe = DropProbe::new(1.0);
    let drops = probe.counter();
    let mut m = RecursiveManager::<f64, _>::new(shape(1, 4), probe).unwrap();
    m.init_x0().unwrap();
    let mut system = CoupledSystem::new([("p", m.boxed())]).unwrap();
    system.run().unwrap();
    assert_eq!(drops.load(Ordering::Relaxed), 0);
    drop(system);
    assert_eq!(drops.load(Ordering::Relaxed), 1);
}

#[test]
fn system_never_drops_borrowed_rules() {
    let probe = DropProbe::new(1.0);
    let drops = probe.counter();
    {
        let mut m = RecursiveManager::<f64, _>::new(shape(1, 4), &probe).unwrap();
        m.init_x0().unwrap();
        let mut system = CoupledSystem::new([("p", m.boxed())]).unwrap();
        system.run().unwrap();
        assert_eq!(system.image_elem(0, 3).unwrap(), 4.0);
    }
    assert_eq!(drops.load(Ordering::Relaxed), 0);
    drop(probe);
    assert_eq!(drops.load(Ordering::Relaxed), 1);
}

#[test]
fn shared_rule_serves_several_managers() {
    let rule = Arc::new(Increment::new(0.0_f64));
    let mut a = RecursiveManager::new(shape(1, 3), Arc::clone(&rule)).unwrap();
    let mut b = RecursiveManager::new(shape(1, 3), Arc::clone(&rule)).unwrap();
    a.init_x0().unwrap();
    b.init_x0().unwrap();
    assert_eq!(Arc::strong_count(&rule), 3);
    drop(a);
    drop(b);
    assert_eq!(Arc::strong_count(&rule), 1);
}

// ── Rolling window ──────────────────────────────────────────────

#[test]
fn wrap_equals_one_more_step_from_the_last_sample() {
    let mut m = RecursiveManager::new(shape(2, 2), Increment::new(0.0)).unwrap();
    m.init_x0().unwrap();
    let mut system = CoupledSystem::new([("n", m.boxed())]).unwrap();
    system.run().unwrap();
    let last = system.image_elem(0, 3).unwrap();
    system.wrap().unwrap();
    assert_eq!(system.image_elem(0, 0).unwrap(), last + 1.0);
}

#[test]
fn rounds_continue_a_single_long_run() {
    let mut short = RecursiveManager::new(shape(1, 4), Increment::new(0.0)).unwrap();
    short.init_x0().unwrap();
    let mut system = CoupledSystem::new([("n", short.boxed())]).unwrap();
    let mut rows = Vec::new();
    system.run_rounds(2, |row| rows.push(row[0])).unwrap();
    let expected: Vec<f64> = (0..12).map(f64::from).collect();
    assert_eq!(rows, expected);
}

// ── Slot order ──────────────────────────────────────────────────

/// Two relaxations pulling towards each other, with `first` in slot 0
/// when `swapped` is false and in slot 1 otherwise.
fn mutual_pull(
    swapped: bool,
    seeds: (f64, f64),
    rates: (f64, f64),
    len: usize,
) -> CoupledSystem<'static, f64> {
    let (own, other) = if swapped { (1, 0) } else { (0, 1) };
    let mut first = RecursiveManager::new(
        shape(1, len),
        LinearRelaxation {
            x0: seeds.0,
            rate: rates.0,
            own,
            target: other,
        },
    )
    .unwrap();
    first.init_x0().unwrap();
    let mut second = RecursiveManager::new(
        shape(1, len),
        LinearRelaxation {
            x0: seeds.1,
            rate: rates.1,
            own: other,
            target: own,
        },
    )
    .unwrap();
    second.init_x0().unwrap();
    let members = if swapped {
        [("second", second.boxed()), ("first", first.boxed())]
    } else {
        [("first", first.boxed()), ("second", second.boxed())]
    };
    CoupledSystem::new(members).unwrap()
}

proptest! {
    #[test]
    fn slot_order_never_changes_a_row(
        a in -100.0f64..100.0,
        b in -100.0f64..100.0,
        ra in 0.0f64..1.0,
        rb in 0.0f64..1.0,
        len in 2usize..24,
    ) {
        let mut straight = mutual_pull(false, (a, b), (ra, rb), len);
        let mut swapped = mutual_pull(true, (a, b), (ra, rb), len);
        straight.run().unwrap();
        swapped.run().unwrap();
        for i in 0..len {
            let s = straight.row(i).unwrap();
            let w = swapped.row(i).unwrap();
            prop_assert_eq!(s[0], w[1]);
            prop_assert_eq!(s[1], w[0]);
        }
    }
}
