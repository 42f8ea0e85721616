//! Sampled relations: a domain paired with an image of equal shape.
//!
//! A [`SampledRelation`] stores `I * J` domain samples and `I * J` image
//! samples in jagged block storage. Its domain is either owned or borrowed
//! from another relation through a [`SharedDomain`](falc_arena::SharedDomain);
//! its image is always its own.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod relation;
pub mod slot;
mod view;

pub use relation::SampledRelation;
pub use slot::DomainSlot;
