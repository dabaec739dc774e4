//! Generator configuration
//!
//! A run either starts from fresh seed material or replays a stored state
//! file. Storing the initial state lets any run be replayed later:
//!
//! ```json
//! { "algorithm": "mzran", "init_mode": "system_random", "store_seed": "run1.seed" }
//! { "algorithm": "mzran", "load_seed": "run1.seed" }
//! ```

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::rng::{InitMode, Rng, RngAlgorithm, RngError};

/// Which generator to build and where its initial state comes from
///
/// Deserialization parses names with `FromStr`, so bad names are
/// reported as `UnsupportedAlgorithm` / `InvalidInitMode`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawRngConfig")]
pub struct RngConfig {
    pub algorithm: RngAlgorithm,

    /// Ignored when `load_seed` is set
    pub init_mode: InitMode,

    /// State file to start from instead of seeding
    pub load_seed: Option<PathBuf>,

    /// Where to write the initial state after building
    pub store_seed: Option<PathBuf>,
}

/// Config as written on disk, names still unparsed
#[derive(Debug, Deserialize)]
struct RawRngConfig {
    #[serde(default)]
    algorithm: Option<String>,
    #[serde(default)]
    init_mode: Option<String>,
    #[serde(default)]
    load_seed: Option<PathBuf>,
    #[serde(default)]
    store_seed: Option<PathBuf>,
}

impl TryFrom<RawRngConfig> for RngConfig {
    type Error = RngError;

    fn try_from(raw: RawRngConfig) -> Result<Self, Self::Error> {
        Ok(Self {
            algorithm: match raw.algorithm {
                Some(name) => name.parse()?,
                None => default_algorithm(),
            },
            init_mode: match raw.init_mode {
                Some(name) => name.parse()?,
                None => default_init_mode(),
            },
            load_seed: raw.load_seed,
            store_seed: raw.store_seed,
        })
    }
}

fn default_algorithm() -> RngAlgorithm {
    RngAlgorithm::Mzran
}

fn default_init_mode() -> InitMode {
    InitMode::SystemRandom
}

impl Default for RngConfig {
    fn default() -> Self {
        Self {
            algorithm: default_algorithm(),
            init_mode: default_init_mode(),
            load_seed: None,
            store_seed: None,
        }
    }
}

impl RngConfig {
    /// Parse a JSON config
    ///
    /// # Errors
    /// - `UnsupportedAlgorithm` / `InvalidInitMode` for unknown names
    /// - `Serialization` for malformed JSON or wrongly typed fields
    ///
    /// # Example
    /// ```
    /// use ensemble_rng_core_rs::{InitMode, RngAlgorithm, RngConfig};
    ///
    /// let config = RngConfig::from_json(r#"{"algorithm": "LCG31", "init_mode": "clock"}"#).unwrap();
    /// assert_eq!(config.algorithm, RngAlgorithm::Lcg31);
    /// assert_eq!(config.init_mode, InitMode::Clock);
    /// ```
    pub fn from_json(json: &str) -> Result<Self, RngError> {
        let raw: RawRngConfig = serde_json::from_str(json)
            .map_err(|e| RngError::Serialization(format!("Invalid RNG config: {}", e)))?;
        Self::try_from(raw)
    }

    /// Build the configured generator
    ///
    /// # Errors
    /// Seeding failures, or I/O and parse errors on the seed files.
    pub fn build(&self) -> Result<Rng, RngError> {
        let rng = match &self.load_seed {
            Some(path) => {
                let mut rng = Rng::new(self.algorithm, InitMode::Default)?;
                rng.load_state_file(path)?;
                info!(algorithm = %self.algorithm, path = %path.display(), "RNG state loaded");
                rng
            }
            None => Rng::new(self.algorithm, self.init_mode)?,
        };

        if let Some(path) = &self.store_seed {
            rng.save_state_file(path)?;
            info!(algorithm = %self.algorithm, path = %path.display(), "RNG state stored");
        }

        Ok(rng)
    }
}
