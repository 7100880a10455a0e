//! Face labels.

use std::fmt;

/// One sticker color, named after the face it belongs to when solved.
///
/// Declaration order is the alphabet order used throughout the crate:
/// up, right, front, down, left, back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum Sticker {
    U,
    R,
    F,
    D,
    L,
    B,
}

impl Sticker {
    /// All six stickers in alphabet order.
    pub const ALL: [Sticker; 6] = [
        Sticker::U,
        Sticker::R,
        Sticker::F,
        Sticker::D,
        Sticker::L,
        Sticker::B,
    ];

    /// The single-character label.
    pub const fn as_char(self) -> char {
        match self {
            Sticker::U => 'U',
            Sticker::R => 'R',
            Sticker::F => 'F',
            Sticker::D => 'D',
            Sticker::L => 'L',
            Sticker::B => 'B',
        }
    }

    /// Parses an upper-case face label.
    pub fn from_char(c: char) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.as_char() == c)
    }

    /// The five stickers different from `self`, in alphabet order.
    pub fn others(self) -> [Sticker; 5] {
        let mut out = [Sticker::U; 5];
        let mut k = 0;
        for s in Self::ALL {
            if s != self {
                out[k] = s;
                k += 1;
            }
        }
        out
    }
}

impl fmt::Display for Sticker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_char_round_trip() {
        for s in Sticker::ALL {
            assert_eq!(Sticker::from_char(s.as_char()), Some(s));
        }
    }

    #[test]
    fn test_from_char_rejects_unknown() {
        assert_eq!(Sticker::from_char('u'), None);
        assert_eq!(Sticker::from_char('X'), None);
        assert_eq!(Sticker::from_char(' '), None);
    }

    #[test]
    fn test_others_excludes_self_and_keeps_order() {
        assert_eq!(
            Sticker::F.others(),
            [Sticker::U, Sticker::R, Sticker::D, Sticker::L, Sticker::B]
        );
        for s in Sticker::ALL {
            let others = s.others();
            assert!(!others.contains(&s));
            assert!(others.windows(2).all(|w| w[0] < w[1]));
        }
    }
}
