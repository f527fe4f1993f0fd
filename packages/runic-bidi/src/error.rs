//! Error handling for bidi resolution

use runic_unicode::UnicodeError;

/// Caller errors raised by the resolver.
///
/// Unmatched isolates, unpaired brackets and nesting overflow are resolved by
/// the algorithm itself and never surface here.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BidiError {
    #[error("Output buffer length {actual} does not match input length {expected}")]
    LengthMismatch { expected: usize, actual: usize },

    #[error(
        "Input arrays disagree: {types} types, {bracket_types} bracket types, {bracket_values} bracket values"
    )]
    InputLengthMismatch {
        types: usize,
        bracket_types: usize,
        bracket_values: usize,
    },

    #[error("Invalid paragraph direction: {0} (expected 0, 1 or 2)")]
    InvalidParagraphLevel(u8),

    #[error("Unicode processing error: {0}")]
    Unicode(#[from] UnicodeError),
}

/// Result type alias
pub type BidiResult<T> = Result<T, BidiError>;
