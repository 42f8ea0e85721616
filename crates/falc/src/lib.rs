//! falc: sampled relations and lock-step recursive stepping of coupled
//! systems.
//!
//! This is the facade crate that re-exports the public API of every falc
//! sub-crate. Adding `falc` as a single dependency is enough for most uses.
//!
//! # Quick start
//!
//! ```rust
//! use falc::prelude::*;
//!
//! // `next(x) = 2x`, seeded at 1.
//! struct Doubling;
//! impl RecursiveRule<f64> for Doubling {
//!     fn init_value(&self) -> f64 { 1.0 }
//!     fn next(&self, x: f64) -> f64 { 2.0 * x }
//! }
//!
//! let shape = Shape::new(2, 4).unwrap();
//! let mut manager = RecursiveManager::new(shape, Doubling).unwrap();
//! manager.init_domain_and_x0(0.0, 7.0).unwrap();
//!
//! let mut system = CoupledSystem::new([("d", manager.boxed())]).unwrap();
//! system.run().unwrap();
//! assert_eq!(system.image_elem(0, 7).unwrap(), 128.0);
//!
//! // Keep going in the same memory: the last sample seeds index 0.
//! system.wrap().unwrap();
//! assert_eq!(system.image_elem(0, 0).unwrap(), 256.0);
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `falc-core` | `Real`, `Shape`, errors, relation-set traits |
//! | [`arena`] | `falc-arena` | Jagged block storage and shared domains |
//! | [`rule`] | `falc-rule` | `SimpleRule` and `RecursiveRule` |
//! | [`relation`] | `falc-relation` | `SampledRelation` |
//! | [`manager`] | `falc-manager` | `RecursiveManager` and `CoupledSystem` |
//! | [`rules`] | `falc-rules` | Reference rules and the Lorenz system |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core types, traits and errors (`falc-core`).
pub use falc_core as types;

/// Jagged block storage and shared domains (`falc-arena`).
pub use falc_arena as arena;

/// Rule traits (`falc-rule`).
///
/// [`rule::SimpleRule`] for closed-form functions of the domain,
/// [`rule::RecursiveRule`] for sequences defined by recursion.
pub use falc_rule as rule;

/// Sampled relations (`falc-relation`).
pub use falc_relation as relation;

/// Managers and lock-step systems (`falc-manager`).
pub use falc_manager as manager;

/// Reference rules (`falc-rules`).
///
/// Includes [`rules::Increment`], [`rules::LinearRelaxation`] and the
/// Lorenz system built by [`rules::LorenzConfig`].
pub use falc_rules as rules;

/// Common imports for typical falc usage.
///
/// ```rust
/// use falc::prelude::*;
/// ```
pub mod prelude {
    // Core types and traits
    pub use falc_core::{ImageReader, NoRelations, Real, RelationSet, Shape};

    // Errors
    pub use falc_core::{ConfigError, RelationError};

    // Storage
    pub use falc_arena::SharedDomain;

    // Rules
    pub use falc_rule::{RecursiveRule, SelfRecursive, SimpleRule};

    // Relations and managers
    pub use falc_manager::{CoupledSystem, ManagerState, RecursiveManager};
    pub use falc_relation::SampledRelation;

    // Reference rules
    pub use falc_rules::{Increment, LinearRelaxation, LorenzConfig};
}
