//! Cryptographic primitives for the fair random protocol.
//!
//! This module provides:
//! - SecureRandom for unbiased draws over inclusive ranges
//! - CommitmentKey, CommitmentDigest and SecretCommitment for commit-reveal

mod commitment;
mod random;

pub use commitment::{
    commit, verify, CommitmentDigest, CommitmentKey, ParseHexError, SecretCommitment,
};
pub use random::{range_size, RandomError, SecureRandom};
