//! Jagged block storage and shared domains for falc relations.
//!
//! # Architecture
//!
//! ```text
//! SampledRelation
//! ├── DomainSlot ── Owned(Domain) | Borrowed(SharedDomain = Arc<Domain>)
//! │                 └── BlockList → Block[] (I blocks of J samples)
//! └── image: BlockList → Block[]
//! ```
//!
//! Every block is allocated separately so no single allocation exceeds
//! `J` samples. A domain is written exactly once by its owner and then
//! published as an immutable [`SharedDomain`] that any number of coupled
//! relations may borrow; the `Arc` keeps it alive for as long as the last
//! borrower needs it.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod block;
pub mod domain;

pub use block::{Block, BlockList};
pub use domain::{Domain, SharedDomain};
