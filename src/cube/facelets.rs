//! Fixed-length sticker sequences and the fitness scorer.

use super::sticker::Sticker;
use crate::error::ParseFaceletsError;
use std::fmt;
use std::ops::Index;
use std::str::FromStr;

/// Number of stickers on a 3x3x3 cube.
pub const STICKER_COUNT: usize = 54;

/// Stickers per face.
pub const FACE_SIZE: usize = 9;

/// Highest attainable fitness: every sticker in its solved position.
pub const MAX_FITNESS: usize = STICKER_COUNT;

/// The solved configuration: nine `U`, then nine each of `R`, `F`, `D`,
/// `L` and `B`.
pub const SOLVED: Facelets = Facelets::solved();

/// A sticker configuration: exactly [`STICKER_COUNT`] stickers.
///
/// The length is part of the type, so a sequence of the wrong size cannot
/// reach the scorer.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Facelets([Sticker; STICKER_COUNT]);

impl Facelets {
    /// Builds the solved configuration, face by face.
    pub const fn solved() -> Self {
        let mut stickers = [Sticker::U; STICKER_COUNT];
        let mut i = 0;
        while i < STICKER_COUNT {
            stickers[i] = Sticker::ALL[i / FACE_SIZE];
            i += 1;
        }
        Facelets(stickers)
    }

    /// Wraps an array of stickers.
    pub const fn from_stickers(stickers: [Sticker; STICKER_COUNT]) -> Self {
        Facelets(stickers)
    }

    /// The underlying stickers.
    pub fn stickers(&self) -> &[Sticker; STICKER_COUNT] {
        &self.0
    }

    /// Returns a copy with the sticker at `position` replaced.
    ///
    /// # Panics
    /// Panics if `position >= STICKER_COUNT`.
    pub fn with_sticker(mut self, position: usize, sticker: Sticker) -> Self {
        self.0[position] = sticker;
        self
    }

    /// Counts positions where `self` and `other` carry the same sticker.
    pub fn matches(&self, other: &Facelets) -> usize {
        self.0
            .iter()
            .zip(other.0.iter())
            .filter(|(a, b)| a == b)
            .count()
    }

    pub(crate) fn set(&mut self, position: usize, sticker: Sticker) {
        self.0[position] = sticker;
    }

    pub(crate) fn swap(&mut self, i: usize, j: usize) {
        self.0.swap(i, j);
    }

    pub(crate) fn copy_tail_from(&mut self, other: &Facelets, cut: usize) {
        self.0[cut..].copy_from_slice(&other.0[cut..]);
    }
}

/// Scores a configuration: the number of positions whose sticker equals
/// the [`SOLVED`] sticker at the same index.
///
/// Always in `0..=MAX_FITNESS`.
pub fn compute_fitness(facelets: &Facelets) -> usize {
    facelets.matches(&SOLVED)
}

impl Default for Facelets {
    fn default() -> Self {
        SOLVED
    }
}

impl Index<usize> for Facelets {
    type Output = Sticker;

    fn index(&self, position: usize) -> &Sticker {
        &self.0[position]
    }
}

impl fmt::Display for Facelets {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for s in &self.0 {
            write!(f, "{s}")?;
        }
        Ok(())
    }
}

impl fmt::Debug for Facelets {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Facelets(\"{self}\")")
    }
}

impl FromStr for Facelets {
    type Err = ParseFaceletsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let found = s.chars().count();
        if found != STICKER_COUNT {
            return Err(ParseFaceletsError::InvalidLength { found });
        }

        let mut stickers = [Sticker::U; STICKER_COUNT];
        for (position, c) in s.chars().enumerate() {
            stickers[position] = Sticker::from_char(c).ok_or(
                ParseFaceletsError::InvalidSticker {
                    sticker: c,
                    position,
                },
            )?;
        }
        Ok(Facelets(stickers))
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Facelets {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Facelets {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = <String as serde::Deserialize>::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
