//! Snapshot - Save/Load Generator State as JSON
//!
//! The text state from [`Rng::write_state`] carries no algorithm tag and no
//! checksum. A snapshot wraps it with both so it can sit inside larger JSON
//! checkpoints and be restored safely.
//!
//! # Critical Invariants
//!
//! - **Exactness**: a restored generator continues the original sequence
//! - **Integrity**: the state text must hash to `state_hash`

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use super::backend::RngAlgorithm;
use super::error::RngError;
use super::generator::Rng;
use super::seed::InitMode;

/// Complete generator state snapshot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RngSnapshot {
    /// Algorithm that wrote `state`
    pub algorithm: RngAlgorithm,

    /// Backend text state, as written by `write_state`
    pub state: String,

    /// SHA256 of `state`, lowercase hex
    pub state_hash: String,
}

impl RngSnapshot {
    /// Serialize as a single-line JSON object
    ///
    /// # Example
    /// ```
    /// use ensemble_rng_core_rs::{InitMode, Rng, RngAlgorithm, RngSnapshot};
    ///
    /// let mut rng = Rng::new(RngAlgorithm::Lcg31, InitMode::Default).unwrap();
    /// let json = rng.snapshot().unwrap().to_json().unwrap();
    ///
    /// let mut restored = Rng::from_snapshot(&RngSnapshot::from_json(&json).unwrap()).unwrap();
    /// assert_eq!(rng.forward(), restored.forward());
    /// ```
    pub fn to_json(&self) -> Result<String, RngError> {
        serde_json::to_string(self)
            .map_err(|e| RngError::Serialization(format!("Snapshot serialization failed: {}", e)))
    }

    /// Parse a snapshot; the hash is checked later by [`Rng::from_snapshot`]
    pub fn from_json(json: &str) -> Result<Self, RngError> {
        serde_json::from_str(json)
            .map_err(|e| RngError::Serialization(format!("Snapshot deserialization failed: {}", e)))
    }

    /// Check `state` against `state_hash`
    pub fn verify(&self) -> Result<(), RngError> {
        let actual = compute_state_hash(&self.state);
        if actual != self.state_hash {
            return Err(RngError::StateIntegrity {
                expected: self.state_hash.clone(),
                actual,
            });
        }
        Ok(())
    }
}

impl Rng {
    /// Capture the current state with its algorithm and hash
    pub fn snapshot(&self) -> Result<RngSnapshot, RngError> {
        let state = self.state_text()?;
        Ok(RngSnapshot {
            algorithm: self.algorithm(),
            state_hash: compute_state_hash(&state),
            state,
        })
    }

    /// Rebuild a generator from a verified snapshot
    ///
    /// # Errors
    /// `StateIntegrity` if the state text doesn't match its hash.
    pub fn from_snapshot(snapshot: &RngSnapshot) -> Result<Rng, RngError> {
        snapshot.verify()?;
        let mut rng = Rng::new(snapshot.algorithm, InitMode::Default)?;
        rng.read_state(&mut snapshot.state.as_bytes())?;
        Ok(rng)
    }
}

/// SHA256 of a state string, lowercase hex
pub fn compute_state_hash(state: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(state.as_bytes());
    format!("{:x}", hasher.finalize())
}
