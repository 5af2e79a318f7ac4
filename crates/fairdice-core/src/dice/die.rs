//! Six-sided die with fixed integer faces.

use super::DiceError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Number of faces on every die
pub const FACES: usize = 6;

/// An immutable die with exactly six integer faces, kept in the order given
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<i64>", into = "Vec<i64>")]
pub struct Die {
    faces: [i64; FACES],
}

impl Die {
    /// Build a die from exactly six faces
    pub fn new(faces: &[i64]) -> Result<Self, DiceError> {
        let faces: [i64; FACES] = faces
            .try_into()
            .map_err(|_| DiceError::FaceCount(faces.len()))?;
        Ok(Self { faces })
    }

    /// Face value at `index` (0..=5)
    pub fn face_at(&self, index: usize) -> Result<i64, DiceError> {
        self.faces
            .get(index)
            .copied()
            .ok_or(DiceError::FaceIndex(index))
    }

    /// All faces in order
    pub fn faces(&self) -> &[i64; FACES] {
        &self.faces
    }

    /// Comma-joined faces, e.g. `2,2,4,4,9,9`
    pub fn describe(&self) -> String {
        self.to_string()
    }
}

impl fmt::Debug for Die {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Die[{}]", self)
    }
}

impl fmt::Display for Die {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, face) in self.faces.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{face}")?;
        }
        Ok(())
    }
}

impl FromStr for Die {
    type Err = DiceError;

    /// Parse `"a,b,c,d,e,f"`; whitespace around each face is ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let faces = s
            .split(',')
            .map(|face| {
                face.trim()
                    .parse::<i64>()
                    .map_err(|_| DiceError::NonIntegerFace(face.trim().to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(&faces)
    }
}

impl TryFrom<Vec<i64>> for Die {
    type Error = DiceError;

    fn try_from(faces: Vec<i64>) -> Result<Self, Self::Error> {
        Self::new(&faces)
    }
}

impl From<Die> for Vec<i64> {
    fn from(die: Die) -> Self {
        die.faces.to_vec()
    }
}
