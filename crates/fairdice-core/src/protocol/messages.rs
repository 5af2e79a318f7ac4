//! Protocol messages.

use crate::crypto::{range_size, CommitmentDigest, CommitmentKey, RandomError};
use crate::protocol::RunId;
use serde::{Deserialize, Serialize};

/// Step 1: published before the peer contributes anything
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitMessage {
    pub run_id: RunId,
    pub digest: CommitmentDigest,
    pub min: i64,
    pub max: i64,
}

impl CommitMessage {
    /// Whether `value` is an acceptable contribution for this run
    pub fn accepts(&self, value: i64) -> bool {
        (self.min..=self.max).contains(&value)
    }

    /// Number of values in `[min, max]`, the modulus of the combination.
    ///
    /// Fails for a commitment that arrived with an empty or oversized range.
    pub fn modulus(&self) -> Result<u64, RandomError> {
        range_size(self.min, self.max)
    }
}

/// Step 4: the opening of the commitment and the combined result
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevealMessage {
    pub run_id: RunId,
    pub key: CommitmentKey,
    pub value: i64,
    pub peer_value: i64,
    pub result: i64,
}

impl RevealMessage {
    /// Check this reveal against the commitment published for the same run
    pub fn verify(&self, commit: &CommitMessage) -> bool {
        self.run_id == commit.run_id
            && commit.accepts(self.value)
            && commit.digest.verify(&self.key, self.value)
            && commit
                .modulus()
                .ok()
                .and_then(|modulus| combine(self.value, self.peer_value, modulus))
                == Some(self.result)
    }
}

/// Final value of a run plus everything needed to audit it
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FairRandomResult {
    pub run_id: RunId,
    pub min: i64,
    pub max: i64,
    /// `(self_value + peer_value) mod (max - min + 1)`
    pub result: i64,
    pub digest: CommitmentDigest,
    pub key: CommitmentKey,
    pub self_value: i64,
    pub peer_value: i64,
}

impl FairRandomResult {
    /// Re-check the digest and the combination
    pub fn verify(&self) -> bool {
        self.digest.verify(&self.key, self.self_value)
            && combine(
                self.self_value,
                self.peer_value,
                range_size(self.min, self.max).unwrap_or(0),
            ) == Some(self.result)
    }

    /// The commitment as it was published in step 1
    pub fn commit_message(&self) -> CommitMessage {
        CommitMessage {
            run_id: self.run_id,
            digest: self.digest,
            min: self.min,
            max: self.max,
        }
    }

    /// The reveal as it was disclosed in step 4
    pub fn reveal_message(&self) -> RevealMessage {
        RevealMessage {
            run_id: self.run_id,
            key: self.key.clone(),
            value: self.self_value,
            peer_value: self.peer_value,
            result: self.result,
        }
    }
}

/// `(a + b) mod modulus`, always in `[0, modulus)`; `None` for a zero modulus
pub fn combine(a: i64, b: i64, modulus: u64) -> Option<i64> {
    if modulus == 0 {
        return None;
    }
    let sum = i128::from(a) + i128::from(b);
    // modulus <= 2^32, so the remainder fits in i64
    Some(sum.rem_euclid(i128::from(modulus)) as i64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::{commit, SecureRandom};

    fn sample(min: i64, max: i64, value: i64, peer_value: i64) -> FairRandomResult {
        let (key, digest) = commit(&mut SecureRandom::new(), value).unwrap();
        let modulus = range_size(min, max).unwrap();
        FairRandomResult {
            run_id: RunId::random(&mut SecureRandom::new()).unwrap(),
            min,
            max,
            result: combine(value, peer_value, modulus).unwrap(),
            digest,
            key,
            self_value: value,
            peer_value,
        }
    }

    #[test]
    fn test_combine() {
        assert_eq!(combine(5, 4, 6), Some(3));
        assert_eq!(combine(0, 0, 2), Some(0));
        assert_eq!(combine(1, 1, 2), Some(0));
        assert_eq!(combine(-3, 1, 4), Some(2));
        assert_eq!(combine(i64::MAX, i64::MAX, 6), Some(((i64::MAX as i128 * 2) % 6) as i64));
        assert_eq!(combine(1, 2, 0), None);
    }

    #[test]
    fn test_result_verifies() {
        let result = sample(0, 5, 4, 3);
        assert_eq!(result.result, 1);
        assert!(result.verify());
        assert!(result.reveal_message().verify(&result.commit_message()));
    }

    #[test]
    fn test_tampered_result_fails() {
        let mut result = sample(0, 5, 4, 3);
        result.result = 2;
        assert!(!result.verify());

        let mut result = sample(0, 5, 4, 3);
        result.self_value = 5;
        assert!(!result.verify());
    }

    #[test]
    fn test_reveal_for_other_run_fails() {
        let result = sample(0, 1, 1, 0);
        let mut reveal = result.reveal_message();
        reveal.run_id = RunId::random(&mut SecureRandom::new()).unwrap();
        assert!(!reveal.verify(&result.commit_message()));
    }

    #[test]
    fn test_commit_accepts_range() {
        let commit = sample(0, 5, 2, 2).commit_message();
        assert!(commit.accepts(0));
        assert!(commit.accepts(5));
        assert!(!commit.accepts(6));
        assert!(!commit.accepts(-1));
        assert_eq!(commit.modulus().unwrap(), 6);
    }

    #[test]
    fn test_inverted_commit_has_no_modulus() {
        let result = sample(0, 5, 2, 2);
        let mut commit = result.commit_message();
        commit.min = 5;
        commit.max = 0;

        assert!(matches!(
            commit.modulus(),
            Err(RandomError::InvalidRange { min: 5, max: 0 })
        ));
        assert!(!result.reveal_message().verify(&commit));
    }

    #[test]
    fn test_message_serialization() {
        let result = sample(0, 5, 1, 2);
        let json = serde_json::to_string(&result.commit_message()).unwrap();
        let deserialized: CommitMessage = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized, result.commit_message());
        assert!(json.contains(&result.digest.to_string()));

        let json = serde_json::to_string(&result.reveal_message()).unwrap();
        let deserialized: RevealMessage = serde_json::from_str(&json).unwrap();
        assert!(deserialized.verify(&result.commit_message()));
    }
}
