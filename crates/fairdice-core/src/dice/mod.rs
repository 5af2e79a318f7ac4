//! Dice, die sets and pairwise win probabilities.

mod die;
mod probability;
mod set;

pub use die::{Die, FACES};
pub use probability::{
    pairwise_win_probability, MatrixCell, PairwiseOdds, ProbabilityMatrix, WinProbability,
    FACE_PAIRS,
};
pub use set::{DieSet, MIN_DICE};

use thiserror::Error;

/// Validation errors for dice and die sets
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DiceError {
    #[error("Dice must have exactly 6 faces, got {0}")]
    FaceCount(usize),

    #[error("Invalid face value: {0}")]
    NonIntegerFace(String),

    #[error("Face index must be between 0 and 5, got {0}")]
    FaceIndex(usize),

    #[error("At least 3 dice are required, got {0}")]
    TooFewDice(usize),

    /// `index` is 1-based, matching how dice are numbered on the command line
    #[error("Error parsing dice {index}: {source}")]
    Parse {
        index: usize,
        source: Box<DiceError>,
    },
}
