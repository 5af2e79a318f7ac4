//! Orchestration of one commit, contribute, combine, reveal exchange.

use super::messages::{combine, CommitMessage, FairRandomResult, RevealMessage};
use super::types::{Outcome, ProtocolPhase, RunId};
use crate::crypto::{range_size, RandomError, SecretCommitment, SecureRandom};
use crate::peer::{PeerContributionProvider, PeerError};
use rand::rngs::OsRng;
use rand::{CryptoRng, RngCore};
use thiserror::Error;
use tracing::{debug, info, info_span, Instrument};

/// Errors that abort a fair random run
#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error(transparent)]
    Random(#[from] RandomError),

    #[error("Peer contribution {value} outside [{min}, {max}]")]
    ContributionOutOfRange { value: i64, min: i64, max: i64 },

    #[error(transparent)]
    Peer(#[from] PeerError),
}

/// Runs the fair random protocol against a peer.
///
/// Owns its random source; every run draws its own value and key, so runs
/// never share secrets.
#[derive(Debug)]
pub struct FairRandomCoordinator<R = OsRng> {
    source: SecureRandom<R>,
}

impl FairRandomCoordinator<OsRng> {
    /// Coordinator backed by the operating system RNG
    pub fn new() -> Self {
        Self::with_source(SecureRandom::new())
    }
}

impl Default for FairRandomCoordinator<OsRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: RngCore + CryptoRng> FairRandomCoordinator<R> {
    pub fn with_source(source: SecureRandom<R>) -> Self {
        Self { source }
    }

    /// The underlying random source
    pub fn source_mut(&mut self) -> &mut SecureRandom<R> {
        &mut self.source
    }

    /// Produce a fair value in `[0, max - min]` together with its audit trail.
    ///
    /// The run id, the committed value and the key are all drawn from this
    /// coordinator's source, in that order. The commitment is published
    /// before the peer is asked for anything. If the peer cancels, the run
    /// ends without revealing the key or value.
    pub async fn run<P>(
        &mut self,
        min: i64,
        max: i64,
        peer: &mut P,
    ) -> Result<Outcome<FairRandomResult>, ProtocolError>
    where
        P: PeerContributionProvider + ?Sized,
    {
        let modulus = range_size(min, max)?;
        let run_id = RunId::random(&mut self.source)?;
        let span = info_span!("fair_random", %run_id, min, max);
        self.run_inner(run_id, min, max, modulus, peer)
            .instrument(span)
            .await
    }

    async fn run_inner<P>(
        &mut self,
        run_id: RunId,
        min: i64,
        max: i64,
        modulus: u64,
        peer: &mut P,
    ) -> Result<Outcome<FairRandomResult>, ProtocolError>
    where
        P: PeerContributionProvider + ?Sized,
    {
        // Committed
        let mut phase = ProtocolPhase::Committed;
        let self_value = self.source.generate(min, max)?;
        let commitment = SecretCommitment::new(&mut self.source, self_value)?;
        let commit = CommitMessage {
            run_id,
            digest: commitment.digest(),
            min,
            max,
        };
        debug!(%phase, digest = %commit.digest, "commitment published");

        // AwaitingPeerContribution
        phase = advance(phase);
        let peer_value = match peer.contribute(&commit).await? {
            Outcome::Completed(value) => value,
            Outcome::Cancelled => {
                info!(%phase, "peer cancelled the run");
                return Ok(Outcome::Cancelled);
            }
        };
        if !commit.accepts(peer_value) {
            return Err(ProtocolError::ContributionOutOfRange {
                value: peer_value,
                min,
                max,
            });
        }
        debug!(%phase, peer_value, "peer contribution received");

        // Combined
        phase = advance(phase);
        let result = combine(self_value, peer_value, modulus)
            .ok_or(RandomError::InvalidRange { min, max })?;
        debug!(%phase, result, "values combined");

        // Revealed
        phase = advance(phase);
        let (key, self_value) = commitment.open();
        let reveal = RevealMessage {
            run_id,
            key,
            value: self_value,
            peer_value,
            result,
        };
        peer.reveal(&reveal).await?;
        info!(%phase, self_value, peer_value, result, key = %reveal.key, "run complete");

        Ok(Outcome::Completed(FairRandomResult {
            run_id,
            min,
            max,
            result,
            digest: commit.digest,
            key: reveal.key,
            self_value,
            peer_value,
        }))
    }
}

fn advance(phase: ProtocolPhase) -> ProtocolPhase {
    let next = phase.successor();
    debug_assert!(next.is_some(), "no phase follows {phase}");
    next.unwrap_or(phase)
}
