//! Peer contribution trait definition.

use crate::protocol::{CommitMessage, Outcome, RevealMessage, RunId};
use async_trait::async_trait;
use thiserror::Error;

/// Errors from the peer side of a run
#[derive(Debug, Error)]
pub enum PeerError {
    #[error("Peer I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Peer disconnected")]
    Disconnected,

    #[error("Reveal for run {0} does not match its commitment")]
    CommitmentMismatch(RunId),

    #[error("Reveal for unknown run {0}")]
    UnknownRun(RunId),

    #[error("Commitment for run {0} has an empty or oversized range")]
    InvalidRange(RunId),
}

/// The party contributing the second half of every fair random value.
///
/// Implementations own the raw input: they validate and re-prompt as needed,
/// and only ever return a value inside `[commit.min, commit.max]` or a
/// cancellation. Implementations can be:
/// - ScriptedPeer for tests
/// - a terminal prompt, an RPC stub, etc. for real play
#[async_trait]
pub trait PeerContributionProvider: Send {
    /// Receive the published commitment and answer with a contribution
    async fn contribute(&mut self, commit: &CommitMessage) -> Result<Outcome<i64>, PeerError>;

    /// Receive the opening of a commitment once the run is combined
    async fn reveal(&mut self, reveal: &RevealMessage) -> Result<(), PeerError>;
}
