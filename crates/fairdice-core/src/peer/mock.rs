//! Scripted peer for tests and demos.

use super::traits::{PeerContributionProvider, PeerError};
use crate::dice::DieSet;
use crate::game::{GameEvent, Opponent};
use crate::protocol::{CommitMessage, Outcome, RevealMessage};
use async_trait::async_trait;
use std::collections::VecDeque;

/// In-memory peer that replays scripted answers and checks every reveal.
///
/// Contributions are taken from the script in order; once it runs out the
/// fallback value (if any) is repeated. Out-of-range scripted values are
/// passed through unchanged so tests can exercise the coordinator's checks.
#[derive(Clone, Debug, Default)]
pub struct ScriptedPeer {
    contributions: VecDeque<Outcome<i64>>,
    fallback: Option<i64>,
    die_choices: VecDeque<Outcome<usize>>,
    commits: Vec<CommitMessage>,
    reveals: Vec<RevealMessage>,
    events: Vec<GameEvent>,
}

impl ScriptedPeer {
    /// A peer that contributes `value` on every run
    pub fn constant(value: i64) -> Self {
        Self {
            fallback: Some(value),
            ..Self::default()
        }
    }

    /// A peer that plays the given answers in order, then disconnects
    pub fn scripted(contributions: impl IntoIterator<Item = Outcome<i64>>) -> Self {
        Self {
            contributions: contributions.into_iter().collect(),
            ..Self::default()
        }
    }

    /// A peer that cancels the first run it sees
    pub fn cancelling() -> Self {
        Self::scripted([Outcome::Cancelled])
    }

    /// Die choices to make, in order; without one the first free die is taken
    pub fn with_die_choices(mut self, choices: impl IntoIterator<Item = Outcome<usize>>) -> Self {
        self.die_choices = choices.into_iter().collect();
        self
    }

    /// Commitments received so far
    pub fn commits(&self) -> &[CommitMessage] {
        &self.commits
    }

    /// Reveals received so far, all verified against their commitments
    pub fn reveals(&self) -> &[RevealMessage] {
        &self.reveals
    }

    /// Game events observed so far
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }
}

#[async_trait]
impl PeerContributionProvider for ScriptedPeer {
    async fn contribute(&mut self, commit: &CommitMessage) -> Result<Outcome<i64>, PeerError> {
        self.commits.push(commit.clone());

        match self.contributions.pop_front() {
            Some(outcome) => Ok(outcome),
            None => self
                .fallback
                .map(Outcome::Completed)
                .ok_or(PeerError::Disconnected),
        }
    }

    async fn reveal(&mut self, reveal: &RevealMessage) -> Result<(), PeerError> {
        let commit = self
            .commits
            .iter()
            .find(|c| c.run_id == reveal.run_id)
            .ok_or(PeerError::UnknownRun(reveal.run_id))?;

        if !reveal.verify(commit) {
            return Err(PeerError::CommitmentMismatch(reveal.run_id));
        }

        self.reveals.push(reveal.clone());
        Ok(())
    }
}

#[async_trait]
impl Opponent for ScriptedPeer {
    async fn choose_die(
        &mut self,
        dice: &DieSet,
        taken: Option<usize>,
    ) -> Result<Outcome<usize>, PeerError> {
        if let Some(choice) = self.die_choices.pop_front() {
            return Ok(choice);
        }
        dice.available(taken)
            .first()
            .map(|&index| Outcome::Completed(index))
            .ok_or(PeerError::Disconnected)
    }

    async fn observe(&mut self, event: &GameEvent) -> Result<(), PeerError> {
        self.events.push(event.clone());
        Ok(())
    }
}
