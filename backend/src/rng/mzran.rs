//! MZRAN random number generator
//!
//! Marsaglia and Zaman's combination of a subtract-with-borrow generator
//! (lag 3, modulus `2^32 - 18`) with a 32-bit congruential generator.
//!
//! # Algorithm
//!
//! ```text
//! s = y - (x + c)        (minus 18 more and borrow when y <= x + c)
//! x, y, z = y, z, s
//! n = 69069 * n + 1013904243
//! return z + n
//! ```
//!
//! All arithmetic wraps modulo `2^32`.
//!
//! # State
//!
//! Seeded from 16 bytes (four little-endian words `x y z n`). The borrow
//! `c` is derived while seeding, but the text form carries all five words
//! `x y z c n` so a restored generator continues bit-for-bit.

use std::io::{BufRead, Write};

use super::backend::{read_words, seed_words, write_words, RngBackend};
use super::error::RngError;

const DEFAULT_SEED: [u32; 4] = [99, 199, 13, 77];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mzran {
    x: u32,
    y: u32,
    z: u32,
    c: u32,
    n: u32,
}

impl Mzran {
    /// Seed bytes: four little-endian words
    pub const STATE_SIZE: usize = 16;
    /// Largest raw output
    pub const MAX_VALUE: u64 = u32::MAX as u64;

    /// Build from four seed words, repairing values the recurrence can't use
    pub fn from_words(s0: u32, s1: u32, s2: u32, s3: u32) -> Self {
        let x = s0 + u32::from(s0 == 0);
        let y = s1 + u32::from(s1 == 0);
        // z is rounded up to even; 0 becomes 2, u32::MAX wraps to 0
        let z = if s2 == 0 { 2 } else { s2.wrapping_add(s2 % 2) };
        Self {
            x,
            y,
            z,
            c: u32::from(y > z),
            n: s3,
        }
    }
}

impl Default for Mzran {
    fn default() -> Self {
        let [s0, s1, s2, s3] = DEFAULT_SEED;
        Self::from_words(s0, s1, s2, s3)
    }
}

impl RngBackend for Mzran {
    fn forward(&mut self) -> u32 {
        let xc = self.x.wrapping_add(self.c);
        let s = if self.y > xc {
            self.c = 0;
            self.y - xc
        } else {
            self.c = 1;
            self.y.wrapping_sub(xc).wrapping_sub(18)
        };

        self.x = self.y;
        self.y = self.z;
        self.z = s;
        self.n = self.n.wrapping_mul(69069).wrapping_add(1013904243);
        self.z.wrapping_add(self.n)
    }

    fn set_state(&mut self, seed: &[u8]) {
        let w = seed_words(seed, 4);
        *self = Self::from_words(w[0], w[1], w[2], w[3]);
    }

    fn read_state(&mut self, reader: &mut dyn BufRead) -> Result<(), RngError> {
        let w = read_words(reader, 5)?;
        if w[3] > 1 {
            return Err(RngError::MalformedState(format!(
                "mzran borrow must be 0 or 1, got {}",
                w[3]
            )));
        }
        *self = Self {
            x: w[0],
            y: w[1],
            z: w[2],
            c: w[3],
            n: w[4],
        };
        Ok(())
    }

    fn write_state(&self, writer: &mut dyn Write) -> Result<(), RngError> {
        write_words(writer, &[self.x, self.y, self.z, self.c, self.n])
    }
}
