//! Integration tests: the Lorenz system built from `LorenzConfig`.

use falc_core::RelationSet;
use falc_rules::lorenz::{X, Y, Z};
use falc_rules::LorenzConfig;
use proptest::prelude::*;

/// Hand-rolled explicit Euler loop producing `len` samples of `(x, y, z)`.
fn euler(cfg: &LorenzConfig, len: usize) -> Vec<[f64; 3]> {
    let (dt, sigma, rho, beta) = (cfg.dt, cfg.sigma, cfg.rho, cfg.beta);
    let (mut x, mut y, mut z) = (cfg.x0, cfg.x0, cfg.x0);
    let mut out = Vec::with_capacity(len);
    out.push([x, y, z]);
    for _ in 1..len {
        let nx = x + dt * sigma * (y - x);
        let ny = y + dt * (x * (rho - z) - y);
        let nz = z + dt * (x * y - beta * z);
        x = nx;
        y = ny;
        z = nz;
        out.push([x, y, z]);
    }
    out
}

fn small(x0: f64) -> LorenzConfig {
    LorenzConfig {
        blocks: 20,
        block_len: 50,
        ..LorenzConfig::with_seed(x0)
    }
}

#[test]
fn coupled_run_matches_hand_rolled_euler_exactly() {
    let cfg = small(1.0);
    let mut system = cfg.build_system::<f64>().unwrap();
    system.run().unwrap();
    let expected = euler(&cfg, system.len());
    for (i, want) in expected.iter().enumerate() {
        let got = system.row(i).unwrap();
        assert_eq!(got.as_slice(), want, "row {i}");
    }
}

#[test]
fn slots_follow_x_y_z() {
    let cfg = small(2.0);
    let mut system = cfg.build_system::<f64>().unwrap();
    system.step(1).unwrap();
    let expected = euler(&cfg, 2);
    assert_eq!(system.image_elem(X, 1).unwrap(), expected[1][0]);
    assert_eq!(system.image_elem(Y, 1).unwrap(), expected[1][1]);
    assert_eq!(system.image_elem(Z, 1).unwrap(), expected[1][2]);
    assert_eq!(system.slot_of("z"), Some(Z));
}

#[test]
fn rounds_match_one_long_run() {
    let cfg = LorenzConfig {
        blocks: 4,
        block_len: 25,
        ..LorenzConfig::with_seed(1.0)
    };
    let mut system = cfg.build_system::<f64>().unwrap();
    let mut rows: Vec<[f64; 3]> = Vec::new();
    system
        .run_rounds(3, |row| rows.push([row[0], row[1], row[2]]))
        .unwrap();
    assert_eq!(rows, euler(&cfg, 400));
}

#[test]
fn default_run_stays_on_the_attractor() {
    let mut system = LorenzConfig::with_seed(1.0)
        .build_system::<f32>()
        .unwrap()
        .with_divergence_check(true);
    system.run().unwrap();
    let last = system.row(system.len() - 1).unwrap();
    assert!(last.iter().all(|v| v.abs() < 100.0), "{last:?}");
    assert!(last[2] > 0.0);
}

#[test]
fn domain_spans_the_simulated_time() {
    let cfg = small(1.0);
    let mut x = falc_manager::RecursiveManager::new(
        cfg.shape().unwrap(),
        falc_rules::Increment::new(0.0_f64),
    )
    .unwrap();
    x.init_domain_and_x0(0.0, cfg.duration()).unwrap();
    let last = x.relation().domain_elem(x.len() - 1).unwrap();
    assert!((last - 1.0).abs() < 1e-9);
    assert!((x.relation().dx() - 1.0 / 999.0).abs() < 1e-12);
}

proptest! {
    #[test]
    fn any_seed_matches_euler(seed in -20.0f64..20.0) {
        let cfg = LorenzConfig { blocks: 2, block_len: 10, ..LorenzConfig::with_seed(seed) };
        let mut system = cfg.build_system::<f64>().unwrap();
        system.run().unwrap();
        let expected = euler(&cfg, 20);
        for (i, want) in expected.iter().enumerate() {
            let row = system.row(i).unwrap();
            prop_assert_eq!(row.as_slice(), &want[..]);
        }
    }
}
