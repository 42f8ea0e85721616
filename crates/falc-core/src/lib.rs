//! Core types and traits for falc sampled relations.
//!
//! This is the leaf crate with zero internal dependencies. It defines the
//! abstractions every other falc crate builds on: the [`Real`] sample type,
//! the jagged [`Shape`], error types, and the read traits rules use to look
//! at coupled relations.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod real;
pub mod shape;
pub mod traits;

pub use error::{ConfigError, RelationError};
pub use real::Real;
pub use shape::Shape;
pub use traits::{ImageReader, NoRelations, RelationSet};
