//! Simple and recursive rule traits for falc relations.
//!
//! A [`SimpleRule`] evaluates one image sample from one domain sample. A
//! [`RecursiveRule`] produces the next sample of a sequence, optionally by
//! reading other coupled relations through a
//! [`RelationSet`](falc_core::RelationSet).

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod recursive;
pub mod simple;

pub use recursive::{RecursiveRule, SelfRecursive};
pub use simple::SimpleRule;
