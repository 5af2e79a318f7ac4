//! Protocol types.

use crate::crypto::{RandomError, SecureRandom};
use rand::{CryptoRng, RngCore};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::{Builder, Uuid};

/// Identifier of one fair random run.
///
/// A version 4 UUID whose random bits come from the run's own
/// [`SecureRandom`], so a seeded source reproduces the whole audit record.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RunId(Uuid);

impl RunId {
    /// Draw an id from `source`
    pub fn random<R: RngCore + CryptoRng>(
        source: &mut SecureRandom<R>,
    ) -> Result<Self, RandomError> {
        let mut bytes = [0u8; 16];
        source.fill(&mut bytes)?;
        Ok(Self(Builder::from_random_bytes(bytes).into_uuid()))
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl FromStr for RunId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

impl fmt::Display for RunId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Result of a step that the peer may abort
#[must_use]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome<T> {
    Completed(T),
    /// The peer asked to stop; nothing further is revealed
    Cancelled,
}

impl<T> Outcome<T> {
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Outcome<U> {
        match self {
            Outcome::Completed(value) => Outcome::Completed(f(value)),
            Outcome::Cancelled => Outcome::Cancelled,
        }
    }

    pub fn completed(self) -> Option<T> {
        match self {
            Outcome::Completed(value) => Some(value),
            Outcome::Cancelled => None,
        }
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, Outcome::Cancelled)
    }
}

/// Phases of one fair random run, in order
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ProtocolPhase {
    Committed,
    AwaitingPeerContribution,
    Combined,
    Revealed,
}

impl ProtocolPhase {
    /// The phase that follows this one, `None` once revealed
    pub fn successor(&self) -> Option<ProtocolPhase> {
        match self {
            ProtocolPhase::Committed => Some(ProtocolPhase::AwaitingPeerContribution),
            ProtocolPhase::AwaitingPeerContribution => Some(ProtocolPhase::Combined),
            ProtocolPhase::Combined => Some(ProtocolPhase::Revealed),
            ProtocolPhase::Revealed => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ProtocolPhase::Committed => "committed",
            ProtocolPhase::AwaitingPeerContribution => "awaiting_peer_contribution",
            ProtocolPhase::Combined => "combined",
            ProtocolPhase::Revealed => "revealed",
        }
    }
}

impl fmt::Display for ProtocolPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The two parties of a game
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Actor {
    /// The local party running the coordinator
    Computer,
    /// The remote or human party supplying contributions
    User,
}

impl Actor {
    /// Get the other party
    pub fn other(&self) -> Actor {
        match self {
            Actor::Computer => Actor::User,
            Actor::User => Actor::Computer,
        }
    }
}

impl fmt::Display for Actor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Actor::Computer => write!(f, "computer"),
            Actor::User => write!(f, "user"),
        }
    }
}
