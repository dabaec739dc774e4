//! Backend capability contract and algorithm registry
//!
//! A backend is one concrete generation algorithm. The generator handle
//! only ever talks to it through [`RngBackend`], so algorithms can be added
//! without touching the handle.
//!
//! # Lifecycle mapping
//!
//! - allocate: [`RngAlgorithm::allocate_backend`] (the backend's `Default`
//!   state, valid but not random)
//! - free: `Drop`
//! - advance: [`RngBackend::forward`]
//! - seed: [`RngBackend::set_state`]
//! - persist: [`RngBackend::read_state`] / [`RngBackend::write_state`]

use std::fmt;
use std::io::{BufRead, Write};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::RngError;
use super::lcg::Lcg31;
use super::mzran::Mzran;

/// Capability bundle every pluggable algorithm provides
pub trait RngBackend: fmt::Debug + Send {
    /// Produce the next raw value, mutating state in place
    ///
    /// Must be a pure function of the current state.
    fn forward(&mut self) -> u32;

    /// Overwrite the state from seed bytes
    ///
    /// `seed` holds at least the algorithm's `state_size` bytes; the handle
    /// checks this before calling.
    fn set_state(&mut self, seed: &[u8]);

    /// Load the state from whitespace-separated integer tokens
    ///
    /// Consumes exactly the tokens written by [`RngBackend::write_state`].
    fn read_state(&mut self, reader: &mut dyn BufRead) -> Result<(), RngError>;

    /// Write the state as one line of integer tokens
    fn write_state(&self, writer: &mut dyn Write) -> Result<(), RngError>;
}

/// Registered generation algorithms
///
/// Serialized by [`RngAlgorithm::name`]; deserialization goes through
/// [`FromStr`] so every entry point accepts the same spellings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum RngAlgorithm {
    /// Marsaglia-Zaman subtract-with-borrow combined with a congruential step
    Mzran,
    /// 31-bit linear congruential generator
    Lcg31,
}

impl RngAlgorithm {
    /// Every registered algorithm, in registry order
    pub const ALL: [RngAlgorithm; 2] = [RngAlgorithm::Mzran, RngAlgorithm::Lcg31];

    /// Canonical lowercase name, as accepted by [`FromStr`]
    ///
    /// # Example
    /// ```
    /// use ensemble_rng_core_rs::RngAlgorithm;
    ///
    /// assert_eq!(RngAlgorithm::Mzran.name(), "mzran");
    /// assert_eq!("MZRAN".parse::<RngAlgorithm>().unwrap(), RngAlgorithm::Mzran);
    /// ```
    pub fn name(self) -> &'static str {
        match self {
            RngAlgorithm::Mzran => "mzran",
            RngAlgorithm::Lcg31 => "lcg31",
        }
    }

    /// Bytes of seed material needed to fully specify the state
    pub fn state_size(self) -> usize {
        match self {
            RngAlgorithm::Mzran => Mzran::STATE_SIZE,
            RngAlgorithm::Lcg31 => Lcg31::STATE_SIZE,
        }
    }

    /// Largest raw value `forward` can return (inclusive)
    pub fn max_value(self) -> u64 {
        match self {
            RngAlgorithm::Mzran => Mzran::MAX_VALUE,
            RngAlgorithm::Lcg31 => Lcg31::MAX_VALUE,
        }
    }

    /// Allocate a backend in its default starting configuration
    pub fn allocate_backend(self) -> Box<dyn RngBackend> {
        match self {
            RngAlgorithm::Mzran => Box::new(Mzran::default()),
            RngAlgorithm::Lcg31 => Box::new(Lcg31::default()),
        }
    }
}

impl fmt::Display for RngAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl TryFrom<String> for RngAlgorithm {
    type Error = RngError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<RngAlgorithm> for String {
    fn from(alg: RngAlgorithm) -> Self {
        alg.name().to_string()
    }
}

impl FromStr for RngAlgorithm {
    type Err = RngError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RngAlgorithm::ALL
            .into_iter()
            .find(|alg| alg.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| RngError::UnsupportedAlgorithm(s.to_string()))
    }
}

// ============================================================================
// Helpers shared by backends
// ============================================================================

/// Decode little-endian `u32` words from the front of a seed buffer
///
/// A trailing partial word is zero-padded.
pub(crate) fn seed_words(seed: &[u8], count: usize) -> Vec<u32> {
    (0..count)
        .map(|i| {
            let mut word = [0u8; 4];
            for (j, byte) in word.iter_mut().enumerate() {
                if let Some(&b) = seed.get(i * 4 + j) {
                    *byte = b;
                }
            }
            u32::from_le_bytes(word)
        })
        .collect()
}

/// Read exactly `count` unsigned integer tokens
pub(crate) fn read_words(reader: &mut dyn BufRead, count: usize) -> Result<Vec<u32>, RngError> {
    let mut words = Vec::with_capacity(count);
    for found in 0..count {
        let token = next_token(reader)?.ok_or_else(|| {
            RngError::MalformedState(format!(
                "expected {} state words, found {}",
                count, found
            ))
        })?;
        let word = token.parse::<u32>().map_err(|e| {
            RngError::MalformedState(format!("invalid state word '{}': {}", token, e))
        })?;
        words.push(word);
    }
    Ok(words)
}

/// Write words as a single space-separated line
pub(crate) fn write_words(writer: &mut dyn Write, words: &[u32]) -> Result<(), RngError> {
    let line = words
        .iter()
        .map(|w| w.to_string())
        .collect::<Vec<_>>()
        .join(" ");
    writeln!(writer, "{}", line)?;
    Ok(())
}

/// Longest decimal `u32` ("4294967295")
const MAX_TOKEN_LEN: usize = 10;

/// Pull the next whitespace-delimited token without consuming past it
///
/// Tokens longer than [`MAX_TOKEN_LEN`] are rejected before the rest of
/// the stream is buffered.
fn next_token(reader: &mut dyn BufRead) -> Result<Option<String>, RngError> {
    let mut token = String::new();
    loop {
        let (consumed, done) = {
            let buf = reader.fill_buf()?;
            if buf.is_empty() {
                break;
            }
            let mut consumed = 0;
            let mut done = false;
            for &byte in buf {
                if byte.is_ascii_whitespace() {
                    if token.is_empty() {
                        consumed += 1;
                        continue;
                    }
                    done = true;
                    break;
                }
                if token.len() >= MAX_TOKEN_LEN {
                    return Err(RngError::MalformedState(format!(
                        "state token longer than {} characters: '{}...'",
                        MAX_TOKEN_LEN, token
                    )));
                }
                token.push(byte as char);
                consumed += 1;
            }
            (consumed, done)
        };
        reader.consume(consumed);
        if done {
            break;
        }
    }
    Ok(if token.is_empty() { None } else { Some(token) })
}
