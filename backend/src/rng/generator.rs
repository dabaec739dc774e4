//! Generator handle
//!
//! [`Rng`] owns one backend instance and derives every algorithm-independent
//! operation (uniform doubles, bounded integers, reseeding, state I/O) from
//! the backend's single `forward` primitive.
//!
//! # Determinism
//!
//! After construction the state only changes through `forward` or an
//! explicit reseed. Same algorithm + same seed bytes → same sequence.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use tracing::debug;

use super::backend::{RngAlgorithm, RngBackend};
use super::error::RngError;
use super::seed::{alloc_seed_buffer, fill_seed_buffer, InitMode};

/// Random number generator handle backed by a pluggable algorithm
///
/// # Example
/// ```
/// use ensemble_rng_core_rs::{InitMode, Rng, RngAlgorithm};
///
/// let mut rng = Rng::new(RngAlgorithm::Mzran, InitMode::Default).unwrap();
/// let u = rng.next_uniform_double();
/// assert!((0.0..1.0).contains(&u));
/// let die = rng.next_int(6);
/// assert!(die < 6);
/// ```
#[derive(Debug)]
pub struct Rng {
    algorithm: RngAlgorithm,
    backend: Box<dyn RngBackend>,
    state_size: usize,
    max_value: u64,
    inv_value_scale: f64,
}

impl Rng {
    /// Allocate a generator for `algorithm`
    ///
    /// The backend is advanced once straight away so the first value a
    /// caller sees is never the raw output of its hard-coded default state.
    /// Any mode other than [`InitMode::Default`] then reseeds the state.
    ///
    /// # Errors
    /// Whatever [`Rng::seed`] reports for `init_mode`.
    pub fn new(algorithm: RngAlgorithm, init_mode: InitMode) -> Result<Self, RngError> {
        let max_value = algorithm.max_value();
        let mut rng = Self {
            algorithm,
            backend: algorithm.allocate_backend(),
            state_size: algorithm.state_size(),
            max_value,
            // max_value + 1 keeps next_uniform_double strictly below 1.0
            inv_value_scale: 1.0 / (max_value as f64 + 1.0),
        };
        rng.forward();

        if init_mode != InitMode::Default {
            rng.seed(init_mode)?;
        }

        debug!(
            algorithm = %algorithm,
            init_mode = %init_mode,
            state_size = rng.state_size,
            "Allocated RNG"
        );
        Ok(rng)
    }

    /// Reinitialize the state from an entropy source
    ///
    /// # Errors
    /// - `InvalidInitMode` for [`InitMode::Default`]
    /// - `EntropySourceUnavailable` if the system source can't be read
    /// - `AllocationFailure` if the seed buffer can't be reserved
    pub fn seed(&mut self, mode: InitMode) -> Result<(), RngError> {
        let mut seed = alloc_seed_buffer(self.state_size)?;
        fill_seed_buffer(mode, &mut seed)?;
        self.backend.set_state(&seed);
        debug!(algorithm = %self.algorithm, mode = %mode, "Seeded RNG");
        Ok(())
    }

    /// Overwrite the state from caller supplied seed bytes
    ///
    /// Only the first `state_size` bytes are used.
    ///
    /// # Errors
    /// `InvalidSeedLength` if `seed` is shorter than `state_size`.
    pub fn set_state(&mut self, seed: &[u8]) -> Result<(), RngError> {
        if seed.len() < self.state_size {
            return Err(RngError::InvalidSeedLength {
                expected: self.state_size,
                actual: seed.len(),
            });
        }
        self.backend.set_state(&seed[..self.state_size]);
        Ok(())
    }

    /// Reseed from another generator's raw output
    ///
    /// Draws `ceil(state_size / 4)` values from `source`, packs them as
    /// little-endian words and applies them as this generator's seed.
    /// `source` is advanced that many times.
    pub fn seed_from(&mut self, source: &mut Rng) {
        let word_count = self.state_size.div_ceil(4);
        let seed: Vec<u8> = (0..word_count)
            .flat_map(|_| source.forward().to_le_bytes())
            .collect();
        self.backend.set_state(&seed);
    }

    /// Allocate a new generator of the same algorithm seeded from this one
    ///
    /// Children derived in sequence from one seeded parent are
    /// reproducible, and need no further interaction with the parent.
    pub fn spawn_child(&mut self) -> Rng {
        let mut child = Self {
            algorithm: self.algorithm,
            backend: self.algorithm.allocate_backend(),
            state_size: self.state_size,
            max_value: self.max_value,
            inv_value_scale: self.inv_value_scale,
        };
        child.forward();
        child.seed_from(self);
        debug!(algorithm = %self.algorithm, "Spawned child RNG");
        child
    }

    /// Next raw value in `[0, max_value]`
    #[inline]
    pub fn forward(&mut self) -> u32 {
        self.backend.forward()
    }

    /// Fresh uniform draw in `[0.0, 1.0)`
    #[inline]
    pub fn next_uniform_double(&mut self) -> f64 {
        f64::from(self.forward()) * self.inv_value_scale
    }

    /// Fresh draw in `[0, bound)`
    ///
    /// Computed as `raw % bound`. When `bound` does not divide
    /// `max_value + 1` the low values come up very slightly more often;
    /// fine for simulation sampling, not for exact statistics.
    ///
    /// # Panics
    /// Panics if `bound == 0`.
    #[inline]
    pub fn next_int(&mut self, bound: u32) -> u32 {
        assert!(bound > 0, "bound must be positive");
        self.forward() % bound
    }

    /// Write the state as text tokens
    pub fn write_state<W: Write>(&self, writer: &mut W) -> Result<(), RngError> {
        self.backend.write_state(writer)
    }

    /// Replace the state with one previously written by [`Rng::write_state`]
    ///
    /// The stream must come from a generator of the same algorithm; that is
    /// not recorded in the text and can't be checked here.
    pub fn read_state<R: BufRead>(&mut self, reader: &mut R) -> Result<(), RngError> {
        self.backend.read_state(reader)
    }

    /// Current state as text
    pub fn state_text(&self) -> Result<String, RngError> {
        let mut out = Vec::new();
        self.write_state(&mut out)?;
        String::from_utf8(out).map_err(|e| RngError::Serialization(e.to_string()))
    }

    /// Write the text state to a file, replacing it if present
    ///
    /// # Arguments
    /// * `path` - Destination file
    ///
    /// # Example
    /// ```no_run
    /// use ensemble_rng_core_rs::{InitMode, Rng, RngAlgorithm};
    ///
    /// let rng = Rng::new(RngAlgorithm::Mzran, InitMode::SystemRandom).unwrap();
    /// rng.save_state_file("run.seed").unwrap();
    ///
    /// // Later, resume the exact same stream
    /// let mut resumed = Rng::new(RngAlgorithm::Mzran, InitMode::Default).unwrap();
    /// resumed.load_state_file("run.seed").unwrap();
    /// ```
    pub fn save_state_file<P: AsRef<Path>>(&self, path: P) -> Result<(), RngError> {
        let path = path.as_ref();
        let mut writer = BufWriter::new(File::create(path)?);
        self.write_state(&mut writer)?;
        writer.flush()?;
        debug!(algorithm = %self.algorithm, path = %path.display(), "Saved RNG state");
        Ok(())
    }

    /// Replace the state with one saved by [`Rng::save_state_file`]
    ///
    /// # Arguments
    /// * `path` - State file written by a generator of the same algorithm
    ///
    /// # Errors
    /// `Io` if the file can't be opened, `MalformedState` if its tokens
    /// don't fit this algorithm.
    pub fn load_state_file<P: AsRef<Path>>(&mut self, path: P) -> Result<(), RngError> {
        let path = path.as_ref();
        let mut reader = BufReader::new(File::open(path)?);
        self.read_state(&mut reader)?;
        debug!(algorithm = %self.algorithm, path = %path.display(), "Loaded RNG state");
        Ok(())
    }

    /// Backend algorithm, fixed at construction
    pub fn algorithm(&self) -> RngAlgorithm {
        self.algorithm
    }

    /// Seed bytes the backend needs
    pub fn state_size(&self) -> usize {
        self.state_size
    }

    /// Largest raw value [`Rng::forward`] can return
    pub fn max_value(&self) -> u64 {
        self.max_value
    }
}
