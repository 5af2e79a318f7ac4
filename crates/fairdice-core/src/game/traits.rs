//! The human (or remote) side of a game.

use super::GameEvent;
use crate::crypto::RandomError;
use crate::dice::{DiceError, DieSet};
use crate::peer::{PeerContributionProvider, PeerError};
use crate::protocol::{Outcome, ProtocolError};
use async_trait::async_trait;
use thiserror::Error;

/// Errors that end a round early
#[derive(Debug, Error)]
pub enum GameError {
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    #[error(transparent)]
    Random(#[from] RandomError),

    #[error(transparent)]
    Dice(#[from] DiceError),

    #[error(transparent)]
    Peer(#[from] PeerError),

    #[error("Die {index} is not available to choose")]
    UnavailableDie { index: usize },
}

/// A peer that, besides contributing to fair random runs, picks a die and
/// follows the progress of the round.
#[async_trait]
pub trait Opponent: PeerContributionProvider {
    /// Pick one of `dice`, never `taken`
    async fn choose_die(
        &mut self,
        dice: &DieSet,
        taken: Option<usize>,
    ) -> Result<Outcome<usize>, PeerError>;

    /// Called for every step of the round, in order
    async fn observe(&mut self, event: &GameEvent) -> Result<(), PeerError>;
}
