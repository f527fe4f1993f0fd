//! Core bidi types shared by the data assembly and resolution stages

use bitflags::bitflags;

use crate::error::BidiError;

/// Maximum explicit embedding depth (BD2)
pub const MAX_DEPTH: u8 = 125;

/// Maximum number of simultaneously open brackets tracked by rule N0 (BD16)
pub const MAX_PAIRING_DEPTH: usize = 63;

/// Paragraph direction mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, serde::Serialize, serde::Deserialize)]
pub enum Direction {
    LeftToRight,
    RightToLeft,
    /// Detect from the first strong character (rules P2 and P3)
    #[default]
    Auto,
}

impl Direction {
    /// Base embedding level for an explicit direction, `None` for `Auto`
    #[inline]
    pub fn level(self) -> Option<u8> {
        match self {
            Direction::LeftToRight => Some(0),
            Direction::RightToLeft => Some(1),
            Direction::Auto => None,
        }
    }

    /// Direction implied by the parity of an embedding level
    #[inline]
    pub fn from_level(level: u8) -> Self {
        if level & 1 == 0 {
            Direction::LeftToRight
        } else {
            Direction::RightToLeft
        }
    }
}

impl TryFrom<u8> for Direction {
    type Error = BidiError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Direction::LeftToRight),
            1 => Ok(Direction::RightToLeft),
            2 => Ok(Direction::Auto),
            other => Err(BidiError::InvalidParagraphLevel(other)),
        }
    }
}

impl From<Direction> for u8 {
    fn from(direction: Direction) -> Self {
        match direction {
            Direction::LeftToRight => 0,
            Direction::RightToLeft => 1,
            Direction::Auto => 2,
        }
    }
}

bitflags! {
    /// Features present in a paragraph, used to skip resolver stages.
    ///
    /// Flags are trusted: clearing one for text that does contain the feature
    /// gives wrong levels. [`BidiDataFlags::all`] is always safe.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, serde::Serialize, serde::Deserialize)]
    pub struct BidiDataFlags: u8 {
        const HAS_BRACKETS = 1 << 0;
        const HAS_EMBEDDINGS = 1 << 1;
        const HAS_ISOLATES = 1 << 2;
    }
}
