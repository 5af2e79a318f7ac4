//! Ordered set of dice chosen for a game.

use super::{DiceError, Die};
use std::ops::Index;

/// Minimum number of dice in a game
pub const MIN_DICE: usize = 3;

/// At least three dice, addressed by position
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DieSet(Vec<Die>);

impl DieSet {
    /// Wrap already-built dice
    pub fn new(dice: Vec<Die>) -> Result<Self, DiceError> {
        if dice.len() < MIN_DICE {
            return Err(DiceError::TooFewDice(dice.len()));
        }
        Ok(Self(dice))
    }

    /// Parse one die per argument, e.g. `["2,2,4,4,9,9", "6,8,1,1,8,6", "7,5,3,7,5,3"]`.
    ///
    /// Errors carry the 1-based position of the offending argument.
    pub fn parse<S: AsRef<str>>(args: &[S]) -> Result<Self, DiceError> {
        if args.len() < MIN_DICE {
            return Err(DiceError::TooFewDice(args.len()));
        }

        let dice = args
            .iter()
            .enumerate()
            .map(|(i, arg)| {
                arg.as_ref().parse::<Die>().map_err(|e| DiceError::Parse {
                    index: i + 1,
                    source: Box::new(e),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Self::new(dice)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the set holds no dice
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Die> {
        self.0.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Die> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[Die] {
        &self.0
    }

    /// Positions not equal to `taken`
    pub fn available(&self, taken: Option<usize>) -> Vec<usize> {
        (0..self.len()).filter(|&i| Some(i) != taken).collect()
    }
}

impl Index<usize> for DieSet {
    type Output = Die;

    fn index(&self, index: usize) -> &Die {
        &self.0[index]
    }
}

impl<'a> IntoIterator for &'a DieSet {
    type Item = &'a Die;
    type IntoIter = std::slice::Iter<'a, Die>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_three_dice() {
        let set = DieSet::parse(&["2,2,4,4,9,9", "6,8,1,1,8,6", "7,5,3,7,5,3"]).unwrap();
        assert_eq!(set.len(), 3);
        assert_eq!(set[1].describe(), "6,8,1,1,8,6");
        assert!(!set.is_empty());
    }

    #[test]
    fn test_too_few_dice() {
        assert_eq!(
            DieSet::parse(&["1,2,3,4,5,6", "1,2,3,4,5,6"]),
            Err(DiceError::TooFewDice(2))
        );
        assert_eq!(
            DieSet::parse::<&str>(&[]),
            Err(DiceError::TooFewDice(0))
        );
    }

    #[test]
    fn test_error_names_offending_die() {
        let err = DieSet::parse(&["1,2,3,4,5,6", "1,2,3,4,5,6", "1,2,3,4,5"]).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Error parsing dice 3: Dice must have exactly 6 faces, got 5"
        );

        let err = DieSet::parse(&["1,2,3,4,5,6", "1,a,3,4,5,6", "1,2,3,4,5,6"]).unwrap_err();
        assert_eq!(err.to_string(), "Error parsing dice 2: Invalid face value: a");
    }

    #[test]
    fn test_available_excludes_taken() {
        let set = DieSet::parse(&["1,1,1,1,1,1", "2,2,2,2,2,2", "3,3,3,3,3,3", "4,4,4,4,4,4"])
            .unwrap();
        assert_eq!(set.available(None), vec![0, 1, 2, 3]);
        assert_eq!(set.available(Some(2)), vec![0, 1, 3]);
    }
}
