//! Round orchestration: first move, die selection, rolls, winner.

use super::{GameError, GameEvent, Opponent, RoundResult, RoundSummary, Stage};
use crate::dice::{DieSet, FACES};
use crate::protocol::{Actor, FairRandomCoordinator, Outcome};
use rand::rngs::OsRng;
use rand::{CryptoRng, RngCore};
use tracing::{info, info_span, Instrument};

/// Unwrap a completed step or end the round as cancelled
macro_rules! proceed {
    ($step:expr) => {
        match $step {
            Outcome::Completed(value) => value,
            Outcome::Cancelled => return Ok(Outcome::Cancelled),
        }
    };
}

/// Plays rounds between the local computer and an [`Opponent`]
pub struct GameBoard<R = OsRng> {
    dice: DieSet,
    coordinator: FairRandomCoordinator<R>,
}

impl<R: RngCore + CryptoRng> GameBoard<R> {
    pub fn new(dice: DieSet, coordinator: FairRandomCoordinator<R>) -> Self {
        Self { dice, coordinator }
    }

    pub fn dice(&self) -> &DieSet {
        &self.dice
    }

    /// Play one round.
    ///
    /// A fair coin flip decides who picks a die first; the second picker
    /// cannot take the first one's die. Each die is then rolled with a fair
    /// face selection, the computer first.
    pub async fn play<O>(&mut self, opponent: &mut O) -> Result<Outcome<RoundSummary>, GameError>
    where
        O: Opponent + ?Sized,
    {
        let span = info_span!("round", dice = self.dice.len());
        self.play_round(opponent).instrument(span).await
    }

    async fn play_round<O>(&mut self, opponent: &mut O) -> Result<Outcome<RoundSummary>, GameError>
    where
        O: Opponent + ?Sized,
    {
        opponent
            .observe(&GameEvent::StageStarted(Stage::FirstMove))
            .await?;
        let flip = proceed!(self.coordinator.run(0, 1, opponent).await?);
        let first_mover = if flip.result == 0 {
            Actor::Computer
        } else {
            Actor::User
        };
        opponent.observe(&GameEvent::FirstMover(first_mover)).await?;

        let (computer_die, user_die) = match first_mover {
            Actor::Computer => {
                let computer_die = self.computer_choice(opponent, None).await?;
                let user_die = proceed!(self.user_choice(opponent, Some(computer_die)).await?);
                (computer_die, user_die)
            }
            Actor::User => {
                let user_die = proceed!(self.user_choice(opponent, None).await?);
                let computer_die = self.computer_choice(opponent, Some(user_die)).await?;
                (computer_die, user_die)
            }
        };

        let computer_roll = proceed!(self.roll(opponent, Actor::Computer, computer_die).await?);
        let user_roll = proceed!(self.roll(opponent, Actor::User, user_die).await?);

        let summary = RoundSummary {
            first_mover,
            computer_die,
            user_die,
            computer_roll,
            user_roll,
            result: RoundResult::from_rolls(computer_roll, user_roll),
        };
        info!(result = %summary.result, computer_roll, user_roll, "round finished");
        opponent.observe(&GameEvent::Finished(summary.clone())).await?;

        Ok(Outcome::Completed(summary))
    }

    /// Uniform pick among the dice the user has not taken
    async fn computer_choice<O>(
        &mut self,
        opponent: &mut O,
        taken: Option<usize>,
    ) -> Result<usize, GameError>
    where
        O: Opponent + ?Sized,
    {
        let available = self.dice.available(taken);
        let pick = self
            .coordinator
            .source_mut()
            .generate(0, available.len() as i64 - 1)?;
        let index = available[pick as usize];

        opponent
            .observe(&GameEvent::DieChosen {
                by: Actor::Computer,
                index,
                die: self.dice[index].clone(),
            })
            .await?;
        Ok(index)
    }

    async fn user_choice<O>(
        &mut self,
        opponent: &mut O,
        taken: Option<usize>,
    ) -> Result<Outcome<usize>, GameError>
    where
        O: Opponent + ?Sized,
    {
        let index = proceed!(opponent.choose_die(&self.dice, taken).await?);
        if index >= self.dice.len() || Some(index) == taken {
            return Err(GameError::UnavailableDie { index });
        }

        opponent
            .observe(&GameEvent::DieChosen {
                by: Actor::User,
                index,
                die: self.dice[index].clone(),
            })
            .await?;
        Ok(Outcome::Completed(index))
    }

    /// Fair face selection for `actor`'s die
    async fn roll<O>(
        &mut self,
        opponent: &mut O,
        actor: Actor,
        die_index: usize,
    ) -> Result<Outcome<i64>, GameError>
    where
        O: Opponent + ?Sized,
    {
        opponent
            .observe(&GameEvent::StageStarted(Stage::Roll(actor)))
            .await?;
        let run = proceed!(
            self.coordinator
                .run(0, FACES as i64 - 1, opponent)
                .await?
        );

        let face_index = run.result as usize;
        let value = self.dice[die_index].face_at(face_index)?;
        opponent
            .observe(&GameEvent::Rolled {
                by: actor,
                face_index,
                value,
            })
            .await?;
        Ok(Outcome::Completed(value))
    }
}
