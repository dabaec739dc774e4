//! Error type shared by every fallible generator operation.

use thiserror::Error;

/// Errors raised while constructing, seeding or persisting a generator
///
/// None of these are transient: callers decide whether to terminate,
/// nothing is retried internally.
#[derive(Debug, Error)]
pub enum RngError {
    #[error("Unsupported RNG algorithm: {0}")]
    UnsupportedAlgorithm(String),

    #[error("Invalid RNG init mode: {0}")]
    InvalidInitMode(String),

    #[error("Entropy source {source_name} unavailable: {reason}")]
    EntropySourceUnavailable { source_name: String, reason: String },

    #[error("Failed to allocate {bytes} byte seed buffer")]
    AllocationFailure { bytes: usize },

    #[error("Seed buffer too short: expected at least {expected} bytes, got {actual}")]
    InvalidSeedLength { expected: usize, actual: usize },

    #[error("Malformed RNG state: {0}")]
    MalformedState(String),

    #[error("RNG state hash mismatch: expected {expected}, got {actual}")]
    StateIntegrity { expected: String, actual: String },

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
