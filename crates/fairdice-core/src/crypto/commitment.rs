//! HMAC-SHA3-256 commitments for the commit-reveal scheme.

use super::random::{RandomError, SecureRandom};
use hmac::{Hmac, Mac};
use rand::{CryptoRng, RngCore};
use serde::{Deserialize, Serialize};
use sha3::Sha3_256;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

type HmacSha3_256 = Hmac<Sha3_256>;

/// 256-bit secret key for a commitment
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CommitmentKey([u8; 32]);

impl CommitmentKey {
    /// Draw a fresh key from the secure source
    pub fn random<R: RngCore + CryptoRng>(
        source: &mut SecureRandom<R>,
    ) -> Result<Self, RandomError> {
        let mut bytes = [0u8; 32];
        source.fill(&mut bytes)?;
        Ok(Self(bytes))
    }

    /// Create from raw bytes
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Get the underlying bytes
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    fn mac(&self, value: i64) -> HmacSha3_256 {
        let mut mac =
            HmacSha3_256::new_from_slice(&self.0).expect("HMAC accepts keys of any length");
        mac.update(value.to_string().as_bytes());
        mac
    }
}

impl fmt::Debug for CommitmentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CommitmentKey({}..)", hex::encode_upper(&self.0[..4]))
    }
}

impl fmt::Display for CommitmentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode_upper(self.0))
    }
}

impl FromStr for CommitmentKey {
    type Err = ParseHexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_canonical_hex(s).map(Self)
    }
}

impl TryFrom<String> for CommitmentKey {
    type Error = ParseHexError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<CommitmentKey> for String {
    fn from(key: CommitmentKey) -> Self {
        key.to_string()
    }
}

/// Digest = HMAC-SHA3-256(key, decimal(value))
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CommitmentDigest([u8; 32]);

impl CommitmentDigest {
    /// Compute the digest binding `value` under `key`
    pub fn new(key: &CommitmentKey, value: i64) -> Self {
        Self(key.mac(value).finalize().into_bytes().into())
    }

    /// Create from raw bytes
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Get the underlying bytes
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Verify that `key` and `value` reproduce this digest.
    ///
    /// The comparison runs in constant time over the digest bytes.
    pub fn verify(&self, key: &CommitmentKey, value: i64) -> bool {
        key.mac(value).verify_slice(&self.0).is_ok()
    }
}

impl fmt::Debug for CommitmentDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CommitmentDigest({})", hex::encode_upper(&self.0[..8]))
    }
}

impl fmt::Display for CommitmentDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode_upper(self.0))
    }
}

impl FromStr for CommitmentDigest {
    type Err = ParseHexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_canonical_hex(s).map(Self)
    }
}

impl TryFrom<String> for CommitmentDigest {
    type Error = ParseHexError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<CommitmentDigest> for String {
    fn from(digest: CommitmentDigest) -> Self {
        digest.to_string()
    }
}

/// A committed value together with its opening.
///
/// Only the digest may be shown to the peer until the run reaches its
/// reveal step.
#[derive(Clone)]
pub struct SecretCommitment {
    key: CommitmentKey,
    value: i64,
    digest: CommitmentDigest,
}

impl SecretCommitment {
    /// Commit to `value` under a fresh random key
    pub fn new<R: RngCore + CryptoRng>(
        source: &mut SecureRandom<R>,
        value: i64,
    ) -> Result<Self, RandomError> {
        let key = CommitmentKey::random(source)?;
        let digest = CommitmentDigest::new(&key, value);
        Ok(Self { key, value, digest })
    }

    /// The publishable digest
    pub fn digest(&self) -> CommitmentDigest {
        self.digest
    }

    /// Disclose the key and value
    pub fn open(self) -> (CommitmentKey, i64) {
        (self.key, self.value)
    }
}

impl fmt::Debug for SecretCommitment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecretCommitment")
            .field("digest", &self.digest)
            .finish_non_exhaustive()
    }
}

/// Commit to `value`, returning the key and digest.
pub fn commit<R: RngCore + CryptoRng>(
    source: &mut SecureRandom<R>,
    value: i64,
) -> Result<(CommitmentKey, CommitmentDigest), RandomError> {
    let commitment = SecretCommitment::new(source, value)?;
    let digest = commitment.digest();
    let (key, _) = commitment.open();
    Ok((key, digest))
}

/// Verify a revealed `(key, value)` against a published textual digest.
///
/// Anything other than the canonical uppercase hex rendering fails.
pub fn verify(key: &CommitmentKey, value: i64, digest: &str) -> bool {
    digest
        .parse::<CommitmentDigest>()
        .map(|digest| digest.verify(key, value))
        .unwrap_or(false)
}

/// Error parsing a key or digest from text
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseHexError {
    #[error("expected 64 uppercase hex characters, got {0} characters")]
    Length(usize),

    #[error("invalid character {0:?}, expected 0-9 or A-F")]
    InvalidCharacter(char),
}

fn parse_canonical_hex(s: &str) -> Result<[u8; 32], ParseHexError> {
    if s.len() != 64 {
        return Err(ParseHexError::Length(s.chars().count()));
    }
    if let Some(c) = s
        .chars()
        .find(|c| !matches!(c, '0'..='9' | 'A'..='F'))
    {
        return Err(ParseHexError::InvalidCharacter(c));
    }

    let mut bytes = [0u8; 32];
    hex::decode_to_slice(s, &mut bytes).map_err(|_| ParseHexError::Length(s.len()))?;
    Ok(bytes)
}
