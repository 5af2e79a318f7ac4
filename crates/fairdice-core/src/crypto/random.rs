//! Unbiased integer draws from a cryptographically secure entropy source.

use rand::rngs::OsRng;
use rand::{CryptoRng, RngCore};
use thiserror::Error;

/// Number of distinct values a single 32-bit draw can take.
const DRAW_SPACE: u64 = 1 << 32;

/// Errors from the secure random source
#[derive(Debug, Error)]
pub enum RandomError {
    #[error("Invalid range: [{min}, {max}]")]
    InvalidRange { min: i64, max: i64 },

    #[error("Entropy unavailable: {0}")]
    EntropyUnavailable(String),
}

/// Secure random source producing uniform integers over inclusive ranges.
///
/// Defaults to the operating system RNG. Any `RngCore + CryptoRng` can be
/// injected instead, e.g. a seeded `StdRng` for reproducible runs.
#[derive(Debug, Clone)]
pub struct SecureRandom<R = OsRng> {
    rng: R,
}

impl SecureRandom<OsRng> {
    /// Create a source backed by the operating system RNG
    pub fn new() -> Self {
        Self { rng: OsRng }
    }
}

impl Default for SecureRandom<OsRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: RngCore + CryptoRng> SecureRandom<R> {
    /// Wrap an explicit cryptographic RNG
    pub fn from_rng(rng: R) -> Self {
        Self { rng }
    }

    /// Draw a uniformly distributed integer in `[min, max]`.
    ///
    /// Uses rejection sampling on 32-bit draws: any draw at or above the
    /// largest multiple of the range size is discarded, so every residue
    /// has exactly the same probability mass.
    pub fn generate(&mut self, min: i64, max: i64) -> Result<i64, RandomError> {
        let range = range_size(min, max)?;
        let limit = (DRAW_SPACE / range) * range;

        loop {
            let draw = u64::from(self.next_u32()?);
            if draw < limit {
                // draw % range < range <= 2^32, and min + offset <= max
                return Ok(min + (draw % range) as i64);
            }
        }
    }

    /// Fill `dest` with secure random bytes
    pub fn fill(&mut self, dest: &mut [u8]) -> Result<(), RandomError> {
        self.rng
            .try_fill_bytes(dest)
            .map_err(|e| RandomError::EntropyUnavailable(e.to_string()))
    }

    fn next_u32(&mut self) -> Result<u32, RandomError> {
        let mut bytes = [0u8; 4];
        self.fill(&mut bytes)?;
        Ok(u32::from_be_bytes(bytes))
    }
}

/// Number of values in the inclusive range `[min, max]`.
///
/// Fails for empty ranges and for ranges wider than one 32-bit draw can cover.
pub fn range_size(min: i64, max: i64) -> Result<u64, RandomError> {
    let size = i128::from(max) - i128::from(min) + 1;
    if size <= 0 || size > i128::from(DRAW_SPACE) {
        return Err(RandomError::InvalidRange { min, max });
    }
    Ok(size as u64)
}
