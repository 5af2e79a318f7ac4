//! Pairwise win probabilities between dice.

use super::Die;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Number of (face, face) pairs when two dice are rolled against each other
pub const FACE_PAIRS: u32 = 36;

/// Outcome counts over all 36 face pairs of `a` against `b`
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PairwiseOdds {
    pub wins: u32,
    pub losses: u32,
    pub ties: u32,
}

impl PairwiseOdds {
    /// Count wins, losses and ties of `a` against `b`
    pub fn between(a: &Die, b: &Die) -> Self {
        let mut odds = Self {
            wins: 0,
            losses: 0,
            ties: 0,
        };
        for x in a.faces() {
            for y in b.faces() {
                match x.cmp(y) {
                    Ordering::Greater => odds.wins += 1,
                    Ordering::Less => odds.losses += 1,
                    Ordering::Equal => odds.ties += 1,
                }
            }
        }
        odds
    }

    pub fn win_probability(&self) -> WinProbability {
        WinProbability { wins: self.wins }
    }
}

/// Probability `wins / 36` that one die beats another.
///
/// Kept as an exact count; `Display` renders four decimal places.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct WinProbability {
    wins: u32,
}

impl WinProbability {
    /// Winning face pairs out of 36
    pub fn wins(&self) -> u32 {
        self.wins
    }

    pub fn as_f64(&self) -> f64 {
        f64::from(self.wins) / f64::from(FACE_PAIRS)
    }

    /// How this probability compares to an even 1/2
    pub fn cmp_even(&self) -> Ordering {
        (self.wins * 2).cmp(&FACE_PAIRS)
    }
}

impl fmt::Display for WinProbability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.4}", self.as_f64())
    }
}

/// Probability that a roll of `a` is strictly greater than a roll of `b`
pub fn pairwise_win_probability(a: &Die, b: &Die) -> WinProbability {
    PairwiseOdds::between(a, b).win_probability()
}

/// One cell of a probability matrix
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatrixCell {
    /// A die against itself
    Tie,
    Win(WinProbability),
}

/// Square matrix where `[i][j]` is the chance die `i` beats die `j`.
///
/// Not complementary in general: `P(a>b) + P(b>a)` falls short of 1 by the
/// chance of a tie.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProbabilityMatrix {
    rows: Vec<Vec<MatrixCell>>,
}

impl ProbabilityMatrix {
    /// Compute the matrix for `dice`
    pub fn for_dice(dice: &[Die]) -> Self {
        let rows = dice
            .iter()
            .enumerate()
            .map(|(i, a)| {
                dice.iter()
                    .enumerate()
                    .map(|(j, b)| {
                        if i == j {
                            MatrixCell::Tie
                        } else {
                            MatrixCell::Win(pairwise_win_probability(a, b))
                        }
                    })
                    .collect()
            })
            .collect();
        Self { rows }
    }

    /// Number of dice along each side
    pub fn size(&self) -> usize {
        self.rows.len()
    }

    pub fn cell(&self, row: usize, column: usize) -> Option<MatrixCell> {
        self.rows.get(row)?.get(column).copied()
    }

    pub fn rows(&self) -> &[Vec<MatrixCell>] {
        &self.rows
    }
}
