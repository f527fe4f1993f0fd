//! Paragraph property assembly
//!
//! [`BidiData`] turns text into the three parallel arrays the resolver reads:
//! character types, paired bracket types and canonical paired bracket values.
//! One instance is meant to be reused for many paragraphs.

use std::ops::Range;

use runic_unicode::properties::canonical_bracket;
use runic_unicode::{BidiCharacterType, BidiPairedBracketType, CodePoint};

use crate::buffer::GrowableBuffer;
use crate::error::BidiResult;
use crate::types::{BidiDataFlags, Direction};

/// Reusable per-paragraph working arrays
#[derive(Debug, Clone, Default)]
pub struct BidiData {
    types: GrowableBuffer<BidiCharacterType>,
    paired_bracket_types: GrowableBuffer<BidiPairedBracketType>,
    paired_bracket_values: GrowableBuffer<Option<CodePoint>>,
    saved_types: GrowableBuffer<BidiCharacterType>,
    saved_paired_bracket_types: GrowableBuffer<BidiPairedBracketType>,
    temp_levels: GrowableBuffer<u8>,
    paragraph_ends: Vec<usize>,
    flags: BidiDataFlags,
    paragraph_direction: Direction,
}

impl BidiData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            types: GrowableBuffer::with_capacity(capacity),
            paired_bracket_types: GrowableBuffer::with_capacity(capacity),
            paired_bracket_values: GrowableBuffer::with_capacity(capacity),
            ..Self::default()
        }
    }

    /// Assemble the arrays for UTF-8 text
    pub fn init_str(&mut self, text: &str, direction: Direction) {
        self.init_code_points(text.chars().map(CodePoint::from), direction);
    }

    /// Assemble the arrays for UTF-16 text.
    ///
    /// Unpaired surrogates are rejected before any state changes.
    pub fn init_utf16(&mut self, text: &[u16], direction: Direction) -> BidiResult<()> {
        CodePoint::count_utf16(text)?;
        self.init_code_points(
            CodePoint::decode_utf16(text).map_while(Result::ok),
            direction,
        );
        Ok(())
    }

    /// Assemble the arrays from a sequence of code points
    pub fn init_code_points<I>(&mut self, code_points: I, direction: Direction)
    where
        I: IntoIterator<Item = CodePoint>,
    {
        self.types.clear();
        self.paired_bracket_types.clear();
        self.paired_bracket_values.clear();
        self.paragraph_ends.clear();
        self.flags = BidiDataFlags::empty();
        self.paragraph_direction = direction;

        let mut pending_carriage_return = false;
        for code_point in code_points {
            let index = self.types.len();
            if pending_carriage_return {
                pending_carriage_return = false;
                if code_point.as_char() != '\n' {
                    self.paragraph_ends.push(index);
                }
            }

            let class = code_point.bidi_class();
            let character_type = class.character_type;
            if character_type.is_embedding_control() {
                self.flags |= BidiDataFlags::HAS_EMBEDDINGS;
            } else if character_type.is_isolate_control() {
                self.flags |= BidiDataFlags::HAS_ISOLATES;
            }

            let (bracket_type, bracket_value) = match class.paired_bracket_type {
                BidiPairedBracketType::None => (BidiPairedBracketType::None, None),
                BidiPairedBracketType::Open => {
                    self.flags |= BidiDataFlags::HAS_BRACKETS;
                    (
                        BidiPairedBracketType::Open,
                        class.try_get_paired_bracket().map(canonical_bracket),
                    )
                }
                BidiPairedBracketType::Close => {
                    self.flags |= BidiDataFlags::HAS_BRACKETS;
                    (
                        BidiPairedBracketType::Close,
                        Some(canonical_bracket(code_point)),
                    )
                }
            };

            self.types.push(character_type);
            self.paired_bracket_types.push(bracket_type);
            self.paired_bracket_values.push(bracket_value);

            // P1: a paragraph separator belongs to the paragraph it ends; CR LF is one separator
            if character_type == BidiCharacterType::B {
                if code_point.as_char() == '\r' {
                    pending_carriage_return = true;
                } else {
                    self.paragraph_ends.push(index + 1);
                }
            }
        }

        let len = self.types.len();
        if self.paragraph_ends.last().map_or(len > 0, |&end| end < len) {
            self.paragraph_ends.push(len);
        }

        log::trace!(
            "Assembled bidi data: {} code points, {} paragraphs, flags {:?}",
            len,
            self.paragraph_ends.len(),
            self.flags
        );
    }

    /// Number of code points
    #[inline]
    pub fn len(&self) -> usize {
        self.types.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    #[inline]
    pub fn types(&self) -> &[BidiCharacterType] {
        &self.types
    }

    /// Character types open for style-run overrides, see [`BidiData::save_types`]
    #[inline]
    pub fn types_mut(&mut self) -> &mut [BidiCharacterType] {
        &mut self.types
    }

    #[inline]
    pub fn paired_bracket_types(&self) -> &[BidiPairedBracketType] {
        &self.paired_bracket_types
    }

    /// Canonical bracket values: the closing bracket for openers, the bracket
    /// itself for closers.
    #[inline]
    pub fn paired_bracket_values(&self) -> &[Option<CodePoint>] {
        &self.paired_bracket_values
    }

    #[inline]
    pub fn flags(&self) -> BidiDataFlags {
        self.flags
    }

    #[inline]
    pub fn paragraph_direction(&self) -> Direction {
        self.paragraph_direction
    }

    /// Snapshot types and bracket types before overriding them
    pub fn save_types(&mut self) {
        self.saved_types.copy_from(&self.types);
        self.saved_paired_bracket_types
            .copy_from(&self.paired_bracket_types);
    }

    /// Undo overrides made since the last [`BidiData::save_types`]
    pub fn restore_types(&mut self) {
        self.types.copy_from(&self.saved_types);
        self.paired_bracket_types
            .copy_from(&self.saved_paired_bracket_types);
    }

    /// Zeroed scratch levels of the requested length, reused across calls
    pub fn temp_level_buffer(&mut self, len: usize) -> &mut [u8] {
        self.temp_levels.resize_fill(len, 0);
        &mut self.temp_levels
    }

    /// Code point ranges of each paragraph (rule P1)
    pub fn paragraph_ranges(&self) -> impl Iterator<Item = Range<usize>> + '_ {
        let mut start = 0;
        self.paragraph_ends.iter().map(move |&end| {
            let range = start..end;
            start = end;
            range
        })
    }
}
