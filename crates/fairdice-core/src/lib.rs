//! Fair Dice Core Library
//!
//! Two mutually distrusting parties jointly draw unbiased random values with
//! a commit-reveal protocol, and use them to play non-transitive dice.
//!
//! - [`crypto`]: secure random draws and HMAC-SHA3-256 commitments
//! - [`protocol`]: the fair random coordinator and its messages
//! - [`peer`]: the peer contribution capability
//! - [`dice`]: dice, die sets and win probabilities
//! - [`game`]: one round of the game

pub mod crypto;
pub mod dice;
pub mod game;
pub mod peer;
pub mod protocol;

#[cfg(test)]
mod testing;

pub use crypto::{CommitmentDigest, CommitmentKey, RandomError, SecureRandom};
pub use dice::{DiceError, Die, DieSet, ProbabilityMatrix, WinProbability};
pub use game::{GameBoard, GameError, GameEvent, Opponent, RoundResult, RoundSummary, Stage};
pub use peer::{PeerContributionProvider, PeerError, ScriptedPeer};
pub use protocol::{
    Actor, CommitMessage, FairRandomCoordinator, FairRandomResult, Outcome, ProtocolError,
    RevealMessage, RunId,
};
