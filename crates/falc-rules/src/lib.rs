//! Reference recursive rules for falc.
//!
//! - [`Increment`]: `next(x) = x + 1` on its own relation.
//! - [`LinearRelaxation`]: moves one relation toward another by a fixed
//!   fraction per step.
//! - [`LorenzX`], [`LorenzY`], [`LorenzZ`]: explicit Euler steps of the
//!   Lorenz system, coupled through slots [`lorenz::X`], [`lorenz::Y`] and
//!   [`lorenz::Z`].
//! - [`LorenzConfig`]: validated parameters that build a seeded three
//!   member [`CoupledSystem`](falc_manager::CoupledSystem).

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod config;
pub mod increment;
pub mod lorenz;
pub mod relaxation;

pub use config::LorenzConfig;
pub use increment::Increment;
pub use lorenz::{LorenzX, LorenzY, LorenzZ};
pub use relaxation::LinearRelaxation;
