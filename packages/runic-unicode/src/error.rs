//! Error types for code point validation and property data decoding

/// Errors raised while validating code points or loading property tries
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UnicodeError {
    #[error("Invalid code point: {0:#X}")]
    InvalidCodePoint(u32),

    #[error("Unpaired surrogate {unit:#06X} at UTF-16 index {index}")]
    InvalidSurrogate { index: usize, unit: u16 },

    #[error("UTF-16 index {index} out of bounds for length {length}")]
    OutOfBounds { index: usize, length: usize },

    #[error("Unknown bidi class: {0:?}")]
    UnknownBidiClass(String),

    #[error("Invalid trie data: {0}")]
    InvalidTrieData(String),
}

/// Result type alias
pub type UnicodeResult<T> = Result<T, UnicodeError>;
