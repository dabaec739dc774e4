//! Pluggable random number generation
//!
//! A [`Rng`] handle wraps one backend algorithm behind the [`RngBackend`]
//! trait. Every derived draw, reseed and state I/O operation is written
//! once against that trait.
//!
//! CRITICAL: a handle is single-owner and unsynchronized. For parallel
//! work derive one child per task with [`Rng::spawn_child`] before the
//! work starts.

pub mod backend;
pub mod error;
mod generator;
pub mod lcg;
pub mod mzran;
pub mod seed;
pub mod snapshot;

pub use backend::{RngAlgorithm, RngBackend};
pub use error::RngError;
pub use generator::Rng;
pub use seed::InitMode;
pub use snapshot::RngSnapshot;
