//! Bidi character properties and their packed trie encoding
//!
//! A bidi trie value packs three properties into one `u32`:
//!
//! | bits   | property                                   |
//! |--------|--------------------------------------------|
//! | 24..32 | [`BidiCharacterType`]                      |
//! | 16..24 | [`BidiPairedBracketType`]                  |
//! | 0..16  | `Bidi_Paired_Bracket` code point (0 = none) |

use std::str::FromStr;

use crate::code_point::CodePoint;
use crate::error::UnicodeError;

/// Unicode `Bidi_Class` property values
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, serde::Serialize, serde::Deserialize,
)]
#[repr(u8)]
pub enum BidiCharacterType {
    // Strong types
    #[default]
    L = 0, // Left-to-right
    R = 1,  // Right-to-left
    AL = 2, // Arabic letter

    // Weak types
    EN = 3,  // European number
    ES = 4,  // European separator
    ET = 5,  // European terminator
    AN = 6,  // Arabic number
    CS = 7,  // Common separator
    NSM = 8, // Non-spacing mark
    BN = 9,  // Boundary neutral

    // Neutral types
    B = 10,  // Paragraph separator
    S = 11,  // Segment separator
    WS = 12, // Whitespace
    ON = 13, // Other neutral

    // Explicit formatting
    LRE = 14, // Left-to-right embedding
    LRO = 15, // Left-to-right override
    RLE = 16, // Right-to-left embedding
    RLO = 17, // Right-to-left override
    PDF = 18, // Pop directional format
    LRI = 19, // Left-to-right isolate
    RLI = 20, // Right-to-left isolate
    FSI = 21, // First strong isolate
    PDI = 22, // Pop directional isolate
}

impl BidiCharacterType {
    const ALL: [BidiCharacterType; 23] = [
        Self::L,
        Self::R,
        Self::AL,
        Self::EN,
        Self::ES,
        Self::ET,
        Self::AN,
        Self::CS,
        Self::NSM,
        Self::BN,
        Self::B,
        Self::S,
        Self::WS,
        Self::ON,
        Self::LRE,
        Self::LRO,
        Self::RLE,
        Self::RLO,
        Self::PDF,
        Self::LRI,
        Self::RLI,
        Self::FSI,
        Self::PDI,
    ];

    /// Map a packed discriminant back to the enum
    #[inline]
    pub fn from_u8(value: u8) -> Option<Self> {
        Self::ALL.get(usize::from(value)).copied()
    }

    /// L, R or AL
    #[inline]
    pub fn is_strong(self) -> bool {
        matches!(self, Self::L | Self::R | Self::AL)
    }

    /// LRI, RLI or FSI
    #[inline]
    pub fn is_isolate_initiator(self) -> bool {
        matches!(self, Self::LRI | Self::RLI | Self::FSI)
    }

    /// Isolate initiators and PDI
    #[inline]
    pub fn is_isolate_control(self) -> bool {
        matches!(self, Self::LRI | Self::RLI | Self::FSI | Self::PDI)
    }

    /// LRE, RLE, LRO, RLO or PDF
    #[inline]
    pub fn is_embedding_control(self) -> bool {
        matches!(
            self,
            Self::LRE | Self::RLE | Self::LRO | Self::RLO | Self::PDF
        )
    }

    /// Characters that rule X9 removes from the resolution stages
    #[inline]
    pub fn is_removed_by_x9(self) -> bool {
        self.is_embedding_control() || self == Self::BN
    }
}

/// Parses the short `Bidi_Class` aliases used by the UCD files
impl FromStr for BidiCharacterType {
    type Err = UnicodeError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        Ok(match name {
            "L" => Self::L,
            "R" => Self::R,
            "AL" => Self::AL,
            "EN" => Self::EN,
            "ES" => Self::ES,
            "ET" => Self::ET,
            "AN" => Self::AN,
            "CS" => Self::CS,
            "NSM" => Self::NSM,
            "BN" => Self::BN,
            "B" => Self::B,
            "S" => Self::S,
            "WS" => Self::WS,
            "ON" => Self::ON,
            "LRE" => Self::LRE,
            "LRO" => Self::LRO,
            "RLE" => Self::RLE,
            "RLO" => Self::RLO,
            "PDF" => Self::PDF,
            "LRI" => Self::LRI,
            "RLI" => Self::RLI,
            "FSI" => Self::FSI,
            "PDI" => Self::PDI,
            other => return Err(UnicodeError::UnknownBidiClass(other.to_string())),
        })
    }
}

/// Unicode `Bidi_Paired_Bracket_Type` property values
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, serde::Serialize, serde::Deserialize,
)]
#[repr(u8)]
pub enum BidiPairedBracketType {
    #[default]
    None = 0,
    Open = 1,
    Close = 2,
}

impl BidiPairedBracketType {
    #[inline]
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::None),
            1 => Some(Self::Open),
            2 => Some(Self::Close),
            _ => None,
        }
    }
}

/// Decoded bidi properties of a single code point
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct BidiClass {
    pub character_type: BidiCharacterType,
    pub paired_bracket_type: BidiPairedBracketType,
    /// `Bidi_Paired_Bracket`, `None` when the code point is not a paired bracket
    pub paired_bracket: Option<CodePoint>,
}

impl BidiClass {
    /// Decode a packed trie value.
    ///
    /// Unknown discriminants decode to the property defaults (L, no bracket).
    pub fn decode(packed: u32) -> Self {
        let character_type =
            BidiCharacterType::from_u8((packed >> 24) as u8).unwrap_or_default();
        let paired_bracket_type =
            BidiPairedBracketType::from_u8((packed >> 16) as u8).unwrap_or_default();
        let paired_bracket = match packed & 0xFFFF {
            0 => None,
            value => CodePoint::new(value).ok(),
        };

        Self {
            character_type,
            paired_bracket_type,
            paired_bracket,
        }
    }

    /// Pack the properties into a trie value
    pub fn encode(&self) -> u32 {
        let bracket = self
            .paired_bracket
            .map(|cp| cp.value() & 0xFFFF)
            .unwrap_or(0);
        (u32::from(self.character_type as u8) << 24)
            | (u32::from(self.paired_bracket_type as u8) << 16)
            | bracket
    }

    /// The paired bracket, if this code point has one
    #[inline]
    pub fn try_get_paired_bracket(&self) -> Option<CodePoint> {
        match self.paired_bracket_type {
            BidiPairedBracketType::None => None,
            _ => self.paired_bracket,
        }
    }
}
