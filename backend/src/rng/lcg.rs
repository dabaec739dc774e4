//! 31-bit linear congruential generator
//!
//! `state = (state * 1103515245 + 12345) mod 2^31`, returning the new state.
//! Statistically weak; kept as a small, fully predictable backend whose
//! output can be checked by hand.

use std::io::{BufRead, Write};

use super::backend::{read_words, seed_words, write_words, RngBackend};
use super::error::RngError;

const MULTIPLIER: u32 = 1_103_515_245;
const INCREMENT: u32 = 12_345;
const MASK: u32 = 0x7fff_ffff;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lcg31 {
    state: u32,
}

impl Lcg31 {
    /// Seed bytes: one little-endian word, top bit ignored
    pub const STATE_SIZE: usize = 4;
    /// Largest raw output, `2^31 - 1`
    pub const MAX_VALUE: u64 = MASK as u64;

    /// One step of the recurrence, without touching any generator
    pub fn step(state: u32) -> u32 {
        state.wrapping_mul(MULTIPLIER).wrapping_add(INCREMENT) & MASK
    }
}

impl Default for Lcg31 {
    fn default() -> Self {
        Self { state: 1 }
    }
}

impl RngBackend for Lcg31 {
    fn forward(&mut self) -> u32 {
        self.state = Self::step(self.state);
        self.state
    }

    fn set_state(&mut self, seed: &[u8]) {
        self.state = seed_words(seed, 1)[0] & MASK;
    }

    fn read_state(&mut self, reader: &mut dyn BufRead) -> Result<(), RngError> {
        let word = read_words(reader, 1)?[0];
        if word > MASK {
            return Err(RngError::MalformedState(format!(
                "lcg31 state {} exceeds 31 bits",
                word
            )));
        }
        self.state = word;
        Ok(())
    }

    fn write_state(&self, writer: &mut dyn Write) -> Result<(), RngError> {
        write_words(writer, &[self.state])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_from_one() {
        // (1 * 1103515245 + 12345) mod 2^31
        assert_eq!(Lcg31::step(1), 1_103_527_590);
    }

    #[test]
    fn test_step_reduces_modulo_2_31() {
        let mut state = 1;
        for _ in 0..1000 {
            state = Lcg31::step(state);
            assert!(u64::from(state) <= Lcg31::MAX_VALUE);
        }
    }

    #[test]
    fn test_set_state_masks_high_bit() {
        let mut rng = Lcg31::default();
        rng.set_state(&u32::MAX.to_le_bytes());
        assert_eq!(rng.state, MASK);
    }

    #[test]
    fn test_read_state_rejects_wide_value() {
        let mut rng = Lcg31::default();
        let result = rng.read_state(&mut "4294967295".as_bytes());
        assert!(matches!(result, Err(RngError::MalformedState(_))));
    }
}
