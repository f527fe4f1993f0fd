//! Embedded Unicode property data
//!
//! The bidi trie carries `Bidi_Class`, `Bidi_Paired_Bracket_Type` and
//! `Bidi_Paired_Bracket` from Unicode 16.0.0. Unassigned code points use the
//! `DerivedBidiClass.txt` defaults.

use once_cell::sync::Lazy;

use crate::bidi_class::BidiClass;
use crate::code_point::CodePoint;
use crate::trie::UnicodeTrie;

/// Unicode version of the embedded property data
pub const UNICODE_VERSION: (u8, u8, u8) = (16, 0, 0);

static BIDI_TRIE_BYTES: &[u8] = include_bytes!("../data/bidi.trie");

/// Bidi class, paired bracket type and paired bracket for every code point
pub static BIDI_TRIE: Lazy<UnicodeTrie> = Lazy::new(|| {
    let trie = UnicodeTrie::from_bytes(BIDI_TRIE_BYTES)
        .expect("embedded bidi trie must decode");
    log::debug!(
        "Loaded bidi trie: {} words, high_start={:#X}",
        trie.data_length(),
        trie.high_start()
    );
    trie
});

/// Bidi properties of a code point
#[inline]
pub fn bidi_class(code_point: CodePoint) -> BidiClass {
    BidiClass::decode(BIDI_TRIE.get(code_point.value()))
}

/// Map a bracket to the representative used for pair matching.
///
/// U+2329 and U+232A are canonically equivalent to U+3008 and U+3009.
#[inline]
pub fn canonical_bracket(code_point: CodePoint) -> CodePoint {
    match code_point.value() {
        0x2329 => CodePoint::from_char('\u{3008}'),
        0x232A => CodePoint::from_char('\u{3009}'),
        _ => code_point,
    }
}
