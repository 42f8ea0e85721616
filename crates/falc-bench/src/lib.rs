//! Benchmark profiles for falc.
//!
//! - [`reference_profile`]: the classic 1000 x 100 Lorenz run (100K samples)
//! - [`stress_profile`]: 1000 x 1000 (1M samples per relation)
//! - [`wide_block_profile`]: 100K samples in a single block, for comparing
//!   against the jagged layout

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use falc_rules::LorenzConfig;

/// The classic Lorenz run: 1000 blocks of 100 samples, `dt = 0.001`.
pub fn reference_profile(x0: f64) -> LorenzConfig {
    LorenzConfig::with_seed(x0)
}

/// Ten times the reference sample count.
pub fn stress_profile(x0: f64) -> LorenzConfig {
    LorenzConfig {
        block_len: 1000,
        ..LorenzConfig::with_seed(x0)
    }
}

/// The reference sample count in one contiguous block.
pub fn wide_block_profile(x0: f64) -> LorenzConfig {
    LorenzConfig {
        blocks: 1,
        block_len: 100_000,
        ..LorenzConfig::with_seed(x0)
    }
}
