//! Validated Unicode scalar values
//!
//! A [`CodePoint`] is always in `0..=0x10FFFF` and never a surrogate, so every
//! value maps to a Rust `char`. UTF-16 helpers decode surrogate pairs and
//! reject unpaired surrogates instead of substituting U+FFFD.

use std::fmt;

use crate::bidi_class::BidiClass;
use crate::error::{UnicodeError, UnicodeResult};
use crate::properties;

const LEAD_SURROGATE_START: u16 = 0xD800;
const LEAD_SURROGATE_END: u16 = 0xDBFF;
const TRAIL_SURROGATE_START: u16 = 0xDC00;
const TRAIL_SURROGATE_END: u16 = 0xDFFF;

/// A Unicode scalar value
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
#[serde(try_from = "u32", into = "u32")]
pub struct CodePoint(char);

impl CodePoint {
    /// U+FFFD REPLACEMENT CHARACTER
    pub const REPLACEMENT_CHAR: CodePoint = CodePoint('\u{FFFD}');

    /// Largest valid code point
    pub const MAX: CodePoint = CodePoint('\u{10FFFF}');

    /// Create a code point, rejecting surrogates and values above U+10FFFF
    #[inline]
    pub fn new(value: u32) -> UnicodeResult<Self> {
        char::from_u32(value)
            .map(CodePoint)
            .ok_or(UnicodeError::InvalidCodePoint(value))
    }

    #[inline]
    pub const fn from_char(ch: char) -> Self {
        CodePoint(ch)
    }

    /// Scalar value as an integer
    #[inline]
    pub const fn value(self) -> u32 {
        self.0 as u32
    }

    #[inline]
    pub const fn as_char(self) -> char {
        self.0
    }

    /// Whether the code point lives in the Basic Multilingual Plane
    #[inline]
    pub const fn is_bmp(self) -> bool {
        self.value() <= 0xFFFF
    }

    /// Number of UTF-8 bytes needed to encode this code point
    #[inline]
    pub const fn utf8_len(self) -> usize {
        self.0.len_utf8()
    }

    /// Number of UTF-16 code units needed to encode this code point
    #[inline]
    pub const fn utf16_len(self) -> usize {
        self.0.len_utf16()
    }

    /// Line feed, vertical tab, form feed, carriage return, NEL, LS or PS
    pub const fn is_new_line(self) -> bool {
        matches!(
            self.value(),
            0x000A..=0x000D | 0x0085 | 0x2028 | 0x2029
        )
    }

    /// Unicode `White_Space` property
    #[inline]
    pub fn is_white_space(self) -> bool {
        self.0.is_whitespace()
    }

    /// Bidi properties of this code point from the embedded trie
    #[inline]
    pub fn bidi_class(self) -> BidiClass {
        properties::bidi_class(self)
    }

    /// Decode the code point starting at `index` in UTF-16 text.
    ///
    /// Returns the code point and the number of code units consumed (1 or 2).
    pub fn decode_utf16_at(text: &[u16], index: usize) -> UnicodeResult<(CodePoint, usize)> {
        let Some(&unit) = text.get(index) else {
            return Err(UnicodeError::OutOfBounds {
                index,
                length: text.len(),
            });
        };

        match unit {
            LEAD_SURROGATE_START..=LEAD_SURROGATE_END => match text.get(index + 1) {
                Some(&trail @ TRAIL_SURROGATE_START..=TRAIL_SURROGATE_END) => {
                    let value = 0x10000
                        + ((u32::from(unit) - u32::from(LEAD_SURROGATE_START)) << 10)
                        + (u32::from(trail) - u32::from(TRAIL_SURROGATE_START));
                    Ok((CodePoint::new(value)?, 2))
                }
                _ => Err(UnicodeError::InvalidSurrogate { index, unit }),
            },
            TRAIL_SURROGATE_START..=TRAIL_SURROGATE_END => {
                Err(UnicodeError::InvalidSurrogate { index, unit })
            }
            _ => Ok((CodePoint::new(u32::from(unit))?, 1)),
        }
    }

    /// Count the code points in UTF-16 text, validating surrogate pairing
    pub fn count_utf16(text: &[u16]) -> UnicodeResult<usize> {
        let mut count = 0;
        let mut index = 0;
        while index < text.len() {
            let (_, consumed) = Self::decode_utf16_at(text, index)?;
            index += consumed;
            count += 1;
        }
        Ok(count)
    }

    /// Iterate over the code points of UTF-16 text
    pub fn decode_utf16(text: &[u16]) -> Utf16CodePoints<'_> {
        Utf16CodePoints { text, index: 0 }
    }
}

impl From<char> for CodePoint {
    #[inline]
    fn from(ch: char) -> Self {
        CodePoint(ch)
    }
}

impl From<CodePoint> for char {
    #[inline]
    fn from(code_point: CodePoint) -> Self {
        code_point.0
    }
}

impl From<CodePoint> for u32 {
    #[inline]
    fn from(code_point: CodePoint) -> Self {
        code_point.value()
    }
}

impl TryFrom<u32> for CodePoint {
    type Error = UnicodeError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        CodePoint::new(value)
    }
}

impl fmt::Display for CodePoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "U+{:04X}", self.value())
    }
}

/// Iterator over the code points of UTF-16 text.
///
/// Yields an error for an unpaired surrogate and stops afterwards.
#[derive(Debug, Clone)]
pub struct Utf16CodePoints<'a> {
    text: &'a [u16],
    index: usize,
}

impl Iterator for Utf16CodePoints<'_> {
    type Item = UnicodeResult<CodePoint>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.index >= self.text.len() {
            return None;
        }
        match CodePoint::decode_utf16_at(self.text, self.index) {
            Ok((code_point, consumed)) => {
                self.index += consumed;
                Some(Ok(code_point))
            }
            Err(err) => {
                self.index = self.text.len();
                Some(Err(err))
            }
        }
    }
}
