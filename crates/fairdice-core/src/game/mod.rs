//! One round of the non-transitive dice game.

mod board;
mod events;
mod traits;

pub use board::GameBoard;
pub use events::{GameEvent, RoundResult, RoundSummary, Stage};
pub use traits::{GameError, Opponent};
