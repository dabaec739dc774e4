//! Seeding sources
//!
//! An [`InitMode`] names where seed bytes come from when a generator is
//! (re)initialized. Only the system sources give real entropy; clock
//! seeding is weak and only coincidentally reproducible.

use std::fmt;
use std::fs::File;
use std::io::Read;
use std::str::FromStr;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::error::RngError;

const BLOCKING_SOURCE: &str = "/dev/random";

/// How a freshly allocated generator is initialized
///
/// Serialized by [`InitMode::name`]; deserialization goes through
/// [`FromStr`], so `-` and `_` and any letter case are accepted everywhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum InitMode {
    /// Keep the backend's built-in starting state (reproducible)
    #[default]
    Default,
    /// Wall-clock derived bytes; not cryptographically meaningful
    Clock,
    /// Non-blocking system entropy (`getrandom`)
    SystemRandom,
    /// Blocking system entropy (`/dev/random`)
    SystemRandomBlocking,
}

impl InitMode {
    /// Every mode, in declaration order
    pub const ALL: [InitMode; 4] = [
        InitMode::Default,
        InitMode::Clock,
        InitMode::SystemRandom,
        InitMode::SystemRandomBlocking,
    ];

    /// Canonical snake_case name
    pub fn name(self) -> &'static str {
        match self {
            InitMode::Default => "default",
            InitMode::Clock => "clock",
            InitMode::SystemRandom => "system_random",
            InitMode::SystemRandomBlocking => "system_random_blocking",
        }
    }
}

impl fmt::Display for InitMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl TryFrom<String> for InitMode {
    type Error = RngError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<InitMode> for String {
    fn from(mode: InitMode) -> Self {
        mode.name().to_string()
    }
}

impl FromStr for InitMode {
    type Err = RngError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().replace('-', "_");
        InitMode::ALL
            .into_iter()
            .find(|mode| mode.name().eq_ignore_ascii_case(&wanted))
            .ok_or_else(|| RngError::InvalidInitMode(s.to_string()))
    }
}

/// Allocate a zeroed seed buffer, reporting allocation failure as an error
pub(crate) fn alloc_seed_buffer(bytes: usize) -> Result<Vec<u8>, RngError> {
    let mut buffer = Vec::new();
    buffer
        .try_reserve_exact(bytes)
        .map_err(|_| RngError::AllocationFailure { bytes })?;
    buffer.resize(bytes, 0);
    Ok(buffer)
}

/// Fill `buffer` with seed material from `mode`
///
/// [`InitMode::Default`] is not a seed source and is rejected.
pub fn fill_seed_buffer(mode: InitMode, buffer: &mut [u8]) -> Result<(), RngError> {
    match mode {
        InitMode::Default => Err(RngError::InvalidInitMode(format!(
            "{} is not a seeding source",
            mode
        ))),
        InitMode::Clock => {
            warn!("Seeding RNG from the clock; this is weak entropy");
            for byte in buffer.iter_mut() {
                *byte = clock_seed() as u8;
            }
            Ok(())
        }
        InitMode::SystemRandom => {
            getrandom::fill(buffer).map_err(|e| RngError::EntropySourceUnavailable {
                source_name: "getrandom".to_string(),
                reason: e.to_string(),
            })
        }
        InitMode::SystemRandomBlocking => read_entropy_device(BLOCKING_SOURCE, buffer),
    }
}

/// Fill `buffer` from an entropy device file, blocking until it is full
fn read_entropy_device(path: &str, buffer: &mut [u8]) -> Result<(), RngError> {
    let unavailable = |e: std::io::Error| RngError::EntropySourceUnavailable {
        source_name: path.to_string(),
        reason: e.to_string(),
    };
    let mut source = File::open(path).map_err(unavailable)?;
    source.read_exact(buffer).map_err(unavailable)
}

/// Low resolution seed value derived from the current time
///
/// Successive calls usually differ only in their low bits.
pub fn clock_seed() -> u32 {
    let elapsed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    let secs = elapsed.as_secs();
    let mixed = secs
        .wrapping_mul(0x9e37_79b9_7f4a_7c15)
        .wrapping_add(u64::from(elapsed.subsec_micros()));
    (mixed ^ (mixed >> 29)) as u32
}
