//! Recursive managers and lock-step coupled systems for falc.
//!
//! A [`RecursiveManager`] pairs one [`SampledRelation`](falc_relation::SampledRelation)
//! with one [`RecursiveRule`](falc_rule::RecursiveRule). A [`CoupledSystem`]
//! owns the managers of one coupled system and advances them together:
//!
//! ```text
//! step(i):  for each member in slot order
//!               value = member.rule(system, i - 1)
//!               member.image[i] = value
//! wrap():   for each member in slot order
//!               member.image[0] = member.rule(system, len - 1)
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod manager;
pub mod system;

pub use manager::{ManagerState, RecursiveManager};
pub use system::{CoupledMember, CoupledSystem, Row};
