//! Events and results of a round.

use crate::dice::Die;
use crate::protocol::Actor;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Part of the round a fair random run belongs to
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Stage {
    /// Coin flip over `[0, 1]`; 0 means the computer moves first
    FirstMove,
    /// Face selection over `[0, 5]` for the given actor's die
    Roll(Actor),
}

/// Progress of a round as seen by the opponent
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    StageStarted(Stage),
    FirstMover(Actor),
    DieChosen { by: Actor, index: usize, die: Die },
    Rolled { by: Actor, face_index: usize, value: i64 },
    Finished(RoundSummary),
}

/// Who won a round
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundResult {
    ComputerWins,
    UserWins,
    Tie,
}

impl RoundResult {
    /// Compare the two rolls
    pub fn from_rolls(computer_roll: i64, user_roll: i64) -> Self {
        match computer_roll.cmp(&user_roll) {
            Ordering::Greater => RoundResult::ComputerWins,
            Ordering::Less => RoundResult::UserWins,
            Ordering::Equal => RoundResult::Tie,
        }
    }

    pub fn winner(&self) -> Option<Actor> {
        match self {
            RoundResult::ComputerWins => Some(Actor::Computer),
            RoundResult::UserWins => Some(Actor::User),
            RoundResult::Tie => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RoundResult::ComputerWins => "computer wins",
            RoundResult::UserWins => "user wins",
            RoundResult::Tie => "tie",
        }
    }
}

impl fmt::Display for RoundResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Everything that happened in a completed round
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundSummary {
    pub first_mover: Actor,
    pub computer_die: usize,
    pub user_die: usize,
    pub computer_roll: i64,
    pub user_roll: i64,
    pub result: RoundResult,
}
