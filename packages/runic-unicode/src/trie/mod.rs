//! Compact code point tries
//!
//! The layout follows ICU's 32-bit `UTrie2`: one flat `u32` array that holds
//! the index tables followed by the data blocks.
//!
//! - BMP code points (other than lead surrogates) use a single index lookup.
//! - Lead-surrogate code points have their own index block so that UTF-16 code
//!   unit lookups and code point lookups can differ.
//! - Supplementary code points go through index-1 then index-2.
//! - Everything from `high_start` to U+10FFFF shares one value stored in the
//!   last data granule, and values above U+10FFFF return the error value.
//!
//! Serialized form (little endian): `high_start: i32`, `error_value: u32`,
//! `data_length: i32`, then `data_length` `u32` words.

mod builder;

pub use builder::UnicodeTrieBuilder;

use crate::error::{UnicodeError, UnicodeResult};

/// Shift size for getting the index-1 table offset
pub(crate) const SHIFT_1: u32 = 6 + 5;

/// Shift size for getting the index-2 table offset
pub(crate) const SHIFT_2: u32 = 5;

/// Difference between the two shift sizes
pub(crate) const SHIFT_1_2: u32 = SHIFT_1 - SHIFT_2;

/// Number of index-1 entries for the BMP, omitted from the serialized index-1
pub(crate) const OMITTED_BMP_INDEX_1_LENGTH: u32 = 0x10000 >> SHIFT_1;

/// Number of entries in an index-2 block
pub(crate) const INDEX_2_BLOCK_LENGTH: u32 = 1 << SHIFT_1_2;

pub(crate) const INDEX_2_MASK: u32 = INDEX_2_BLOCK_LENGTH - 1;

/// Number of entries in a data block
pub(crate) const DATA_BLOCK_LENGTH: u32 = 1 << SHIFT_2;

pub(crate) const DATA_MASK: u32 = DATA_BLOCK_LENGTH - 1;

/// Index-2 entries are stored shifted right by this amount
pub(crate) const INDEX_SHIFT: u32 = 2;

/// Data blocks start at multiples of this granularity
pub(crate) const DATA_GRANULARITY: u32 = 1 << INDEX_SHIFT;

/// Offset of the lead-surrogate code point index-2 block
pub(crate) const LSCP_INDEX_2_OFFSET: u32 = 0x10000 >> SHIFT_2;

pub(crate) const LSCP_INDEX_2_LENGTH: u32 = 0x400 >> SHIFT_2;

/// Index-2 length for the BMP including the lead-surrogate block
pub(crate) const INDEX_2_BMP_LENGTH: u32 = LSCP_INDEX_2_OFFSET + LSCP_INDEX_2_LENGTH;

/// Index-2 block reserved for two-byte UTF-8 lookups
pub(crate) const UTF8_2B_INDEX_2_OFFSET: u32 = INDEX_2_BMP_LENGTH;

pub(crate) const UTF8_2B_INDEX_2_LENGTH: u32 = 0x800 >> 6;

/// Start of the index-1 table for supplementary code points
pub(crate) const INDEX_1_OFFSET: u32 = UTF8_2B_INDEX_2_OFFSET + UTF8_2B_INDEX_2_LENGTH;

const HEADER_LENGTH: usize = 12;

/// Immutable, frozen code point trie
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnicodeTrie {
    data: Vec<u32>,
    high_start: u32,
    error_value: u32,
}

impl UnicodeTrie {
    pub(crate) fn from_parts(data: Vec<u32>, high_start: u32, error_value: u32) -> Self {
        Self {
            data,
            high_start,
            error_value,
        }
    }

    /// Decode a serialized trie
    pub fn from_bytes(bytes: &[u8]) -> UnicodeResult<Self> {
        if bytes.len() < HEADER_LENGTH {
            return Err(UnicodeError::InvalidTrieData(format!(
                "header needs {HEADER_LENGTH} bytes, got {}",
                bytes.len()
            )));
        }

        let high_start = read_i32(bytes, 0);
        let error_value = read_u32(bytes, 4);
        let data_length = read_i32(bytes, 8);

        if !(0x10000..=0x110000).contains(&high_start) {
            return Err(UnicodeError::InvalidTrieData(format!(
                "high start {high_start:#X} outside the supplementary range"
            )));
        }

        let minimum_length = (INDEX_1_OFFSET + DATA_GRANULARITY) as i32;
        if data_length < minimum_length {
            return Err(UnicodeError::InvalidTrieData(format!(
                "data length {data_length} is shorter than the index tables"
            )));
        }

        let data_length = data_length as usize;
        let payload = &bytes[HEADER_LENGTH..];
        if payload.len() != data_length * 4 {
            return Err(UnicodeError::InvalidTrieData(format!(
                "expected {} payload bytes, got {}",
                data_length * 4,
                payload.len()
            )));
        }

        let data = payload
            .chunks_exact(4)
            .map(|chunk| u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
            .collect();

        Ok(Self::from_parts(data, high_start as u32, error_value))
    }

    /// Serialize into the blob format accepted by [`UnicodeTrie::from_bytes`]
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(HEADER_LENGTH + self.data.len() * 4);
        bytes.extend_from_slice(&(self.high_start as i32).to_le_bytes());
        bytes.extend_from_slice(&self.error_value.to_le_bytes());
        bytes.extend_from_slice(&(self.data.len() as i32).to_le_bytes());
        for value in &self.data {
            bytes.extend_from_slice(&value.to_le_bytes());
        }
        bytes
    }

    /// Look up the value for a code point
    #[inline]
    pub fn get(&self, code_point: u32) -> u32 {
        if code_point < 0xD800 || (code_point > 0xDBFF && code_point <= 0xFFFF) {
            // Ordinary BMP code point, including trail surrogates
            let index = self.at(code_point >> SHIFT_2);
            return self.at((index << INDEX_SHIFT) + (code_point & DATA_MASK));
        }

        if code_point <= 0xFFFF {
            // Lead surrogate code point
            let index = self.at(LSCP_INDEX_2_OFFSET + ((code_point - 0xD800) >> SHIFT_2));
            return self.at((index << INDEX_SHIFT) + (code_point & DATA_MASK));
        }

        if code_point < self.high_start {
            let index_1 = self.at(
                (INDEX_1_OFFSET - OMITTED_BMP_INDEX_1_LENGTH) + (code_point >> SHIFT_1),
            );
            let index_2 = self.at(index_1 + ((code_point >> SHIFT_2) & INDEX_2_MASK));
            return self.at((index_2 << INDEX_SHIFT) + (code_point & DATA_MASK));
        }

        if code_point <= 0x10FFFF {
            return self.high_value();
        }

        self.error_value
    }

    /// Value shared by every code point from `high_start` to U+10FFFF
    #[inline]
    pub fn high_value(&self) -> u32 {
        self.data[self.data.len() - DATA_GRANULARITY as usize]
    }

    #[inline]
    pub fn high_start(&self) -> u32 {
        self.high_start
    }

    #[inline]
    pub fn error_value(&self) -> u32 {
        self.error_value
    }

    /// Number of `u32` words in the index and data tables
    #[inline]
    pub fn data_length(&self) -> usize {
        self.data.len()
    }

    // Corrupt tables degrade to the error value instead of panicking
    #[inline]
    fn at(&self, index: u32) -> u32 {
        self.data
            .get(index as usize)
            .copied()
            .unwrap_or(self.error_value)
    }
}

#[inline]
fn read_u32(bytes: &[u8], offset: usize) -> u32 {
    u32::from_le_bytes([
        bytes[offset],
        bytes[offset + 1],
        bytes[offset + 2],
        bytes[offset + 3],
    ])
}

#[inline]
fn read_i32(bytes: &[u8], offset: usize) -> i32 {
    read_u32(bytes, offset) as i32
}
