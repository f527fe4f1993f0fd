//! Unicode primitives for runic
//!
//! Validated code points, UTF-16 decoding, a compact `UTrie2`-style code
//! point trie and the embedded bidi property data used by `runic-bidi`.

pub mod bidi_class;
pub mod code_point;
pub mod error;
pub mod properties;
pub mod trie;

pub use bidi_class::{BidiCharacterType, BidiClass, BidiPairedBracketType};
pub use code_point::{CodePoint, Utf16CodePoints};
pub use error::{UnicodeError, UnicodeResult};
pub use trie::{UnicodeTrie, UnicodeTrieBuilder};
