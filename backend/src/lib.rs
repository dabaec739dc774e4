//! Ensemble RNG Core - Rust Engine
//!
//! Pluggable random number generation for reproducible ensemble
//! experiments.
//!
//! # Architecture
//!
//! - **rng**: generator handle, backend contract, seeding and persistence
//! - **config**: build a generator from a JSON configuration
//!
//! # Critical Invariants
//!
//! 1. All randomness is deterministic after seeding
//! 2. Saved state restores a generator bit-for-bit
//! 3. Consumers only need `next_uniform_double` and `next_int`

// Module declarations
pub mod config;
pub mod rng;

// Re-exports for convenience
pub use config::RngConfig;
pub use rng::{InitMode, Rng, RngAlgorithm, RngBackend, RngError, RngSnapshot};

// FFI module (when feature enabled)
#[cfg(feature = "pyo3")]
pub mod ffi;

// PyO3 exports (when feature enabled)
#[cfg(feature = "pyo3")]
use pyo3::prelude::*;

#[cfg(feature = "pyo3")]
#[pymodule]
fn ensemble_rng_core_rs(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<ffi::rng::PyRng>()?;
    Ok(())
}
