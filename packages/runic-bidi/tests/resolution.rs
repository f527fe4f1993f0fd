//! Resolved levels for hand-checked UAX #9 cases

use runic_bidi::{BidiAlgorithm, BidiData, Direction};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Resolve `text` and return the paragraph level and per-code-point levels
fn resolve(text: &str, direction: Direction) -> (u8, Vec<u8>) {
    init_logging();
    let mut data = BidiData::new();
    data.init_str(text, direction);
    let mut algorithm = BidiAlgorithm::new();
    let level = algorithm
        .process_data(&data, None)
        .expect("resolution succeeds");
    (level, algorithm.resolved_levels().to_vec())
}

/// Uppercase ASCII stands in for Hebrew letters
fn hebrew(text: &str) -> String {
    text.chars()
        .map(|ch| match ch {
            'A'..='Z' => char::from_u32(0x05D0 + (ch as u32 - 'A' as u32)).unwrap_or(ch),
            _ => ch,
        })
        .collect()
}

#[cfg(test)]
mod paragraph_level {
    use super::*;

    #[test]
    fn test_ascii_is_left_to_right() {
        assert_eq!(resolve("abc", Direction::Auto), (0, vec![0, 0, 0]));
    }

    #[test]
    fn test_leading_hebrew_is_right_to_left() {
        assert_eq!(resolve("\u{05D0}bc", Direction::Auto), (1, vec![1, 2, 2]));
    }

    #[test]
    fn test_no_strong_characters_defaults_to_ltr() {
        let (level, levels) = resolve("12 + 3!", Direction::Auto);
        assert_eq!(level, 0);
        assert!(levels.iter().all(|&level| level == 0));
    }

    #[test]
    fn test_isolates_are_skipped_when_detecting() {
        let (level, _) = resolve("\u{2067}\u{05D0}\u{2069}a", Direction::Auto);
        assert_eq!(level, 0);

        let (level, _) = resolve("\u{2066}abc", Direction::Auto);
        assert_eq!(level, 0);
    }

    #[test]
    fn test_empty_text() {
        assert_eq!(resolve("", Direction::Auto), (0, vec![]));
        assert_eq!(resolve("", Direction::RightToLeft), (1, vec![]));
    }
}

#[cfg(test)]
mod brackets {
    use super::*;

    #[test]
    fn test_brackets_match_embedding_direction() {
        assert_eq!(resolve("(\u{05D0})", Direction::Auto), (1, vec![1, 1, 1]));
    }

    #[test]
    fn test_brackets_without_context_take_embedding_direction() {
        assert_eq!(
            resolve("(\u{05D0})", Direction::LeftToRight),
            (0, vec![0, 1, 0])
        );
    }

    #[test]
    fn test_brackets_follow_opposite_context() {
        assert_eq!(
            resolve("\u{05D0}(\u{05D1})", Direction::LeftToRight),
            (0, vec![1, 1, 1, 1])
        );
    }

    #[test]
    fn test_nested_pairs_from_uax9() {
        let text = hebrew("AB(CD[&ef]!)gh");
        let (level, levels) = resolve(&text, Direction::RightToLeft);
        assert_eq!(level, 1);
        assert_eq!(levels, vec![1, 1, 1, 1, 1, 1, 1, 2, 2, 1, 1, 1, 2, 2]);
    }

    #[test]
    fn test_marks_after_resolved_bracket_follow_it() {
        assert_eq!(
            resolve("\u{05D0}(\u{05D1})\u{0301}a", Direction::LeftToRight),
            (0, vec![1, 1, 1, 1, 1, 0])
        );
    }

    #[test]
    fn test_canonically_equivalent_brackets_pair() {
        // U+2329 closes with U+3009
        assert_eq!(
            resolve("\u{05D0}\u{2329}\u{05D1}\u{3009}", Direction::LeftToRight),
            (0, vec![1, 1, 1, 1])
        );
    }

    /// `א(ב)bד` followed by `openers` copies of `[` and then `ג]c`
    fn nested_openers(openers: usize) -> String {
        let mut text = String::from("\u{05D0}(\u{05D1})b\u{05D3}");
        text.push_str(&"[".repeat(openers));
        text.push_str("\u{05D2}]c");
        text
    }

    #[test]
    fn test_pairing_stops_after_63_openers() {
        let (level, levels) = resolve(&nested_openers(64), Direction::LeftToRight);
        assert_eq!(level, 0);
        assert_eq!(levels.len(), 73);

        // the pair found before the overflow still takes the R context
        assert_eq!(&levels[..6], &[1, 1, 1, 1, 0, 1]);
        // unpaired openers sit between two R characters
        assert!(levels[6..70].iter().all(|&level| level == 1));
        assert_eq!(levels[70], 1);
        // the closer falls through to N2 instead of pairing
        assert_eq!(&levels[71..], &[0, 0]);
    }

    #[test]
    fn test_pairing_at_full_opener_stack() {
        let (_, levels) = resolve(&nested_openers(63), Direction::LeftToRight);
        assert_eq!(levels.len(), 72);
        assert_eq!(&levels[..6], &[1, 1, 1, 1, 0, 1]);
        assert!(levels[6..71].iter().all(|&level| level == 1));
        assert_eq!(levels[71], 0);
    }

    #[test]
    fn test_mismatched_brackets_are_neutral() {
        assert_eq!(
            resolve("a(\u{05D0}]", Direction::LeftToRight),
            (0, vec![0, 0, 1, 0])
        );
    }
}

#[cfg(test)]
mod numbers {
    use super::*;

    #[test]
    fn test_european_digits_after_hebrew() {
        assert_eq!(
            resolve("\u{05D0} 123", Direction::Auto),
            (1, vec![1, 1, 2, 2, 2])
        );
    }

    #[test]
    fn test_european_digits_after_arabic_become_arabic_numbers() {
        assert_eq!(
            resolve("\u{0627} 123", Direction::Auto),
            (1, vec![1, 1, 2, 2, 2])
        );
    }

    #[test]
    fn test_separators_and_terminators() {
        assert_eq!(resolve("1,2", Direction::RightToLeft), (1, vec![2, 2, 2]));
        assert_eq!(resolve("$12", Direction::RightToLeft), (1, vec![2, 2, 2]));
        assert_eq!(resolve("12%", Direction::RightToLeft), (1, vec![2, 2, 2]));
    }

    #[test]
    fn test_arabic_digits_in_ltr() {
        assert_eq!(
            resolve("a \u{0661}\u{0662}", Direction::LeftToRight),
            (0, vec![0, 0, 2, 2])
        );
    }
}

#[cfg(test)]
mod explicit_formatting {
    use super::*;

    #[test]
    fn test_rtl_isolate() {
        assert_eq!(
            resolve("a\u{2067}b\u{2069}c", Direction::LeftToRight),
            (0, vec![0, 0, 2, 0, 0])
        );
    }

    #[test]
    fn test_first_strong_isolate() {
        assert_eq!(
            resolve("\u{2068}\u{05D0}\u{2069}a", Direction::LeftToRight),
            (0, vec![0, 1, 0, 0])
        );
    }

    #[test]
    fn test_unmatched_isolate_initiator() {
        assert_eq!(resolve("a\u{2067}b", Direction::LeftToRight), (0, vec![0, 0, 2]));
        assert_eq!(resolve("\u{05D0}\u{2067}", Direction::Auto), (1, vec![1, 1]));
    }

    #[test]
    fn test_unmatched_pdi_is_neutral() {
        assert_eq!(
            resolve("a\u{2069}b", Direction::LeftToRight),
            (0, vec![0, 0, 0])
        );
    }

    #[test]
    fn test_override_forces_direction() {
        assert_eq!(
            resolve("\u{202E}abc\u{202C}", Direction::LeftToRight),
            (0, vec![0, 1, 1, 1, 0])
        );
        assert_eq!(
            resolve("\u{202D}\u{05D0}\u{05D1}\u{202C}x", Direction::RightToLeft),
            (1, vec![1, 2, 2, 2, 2])
        );
    }

    #[test]
    fn test_embedding_raises_level() {
        assert_eq!(
            resolve("a\u{202B}b\u{202C}c", Direction::LeftToRight),
            (0, vec![0, 0, 2, 2, 0])
        );
    }

    #[test]
    fn test_deep_nesting_is_capped() {
        let mut text = "\u{202B}".repeat(130);
        text.push('\u{05D0}');
        text.push_str(&"\u{202C}".repeat(130));

        let (level, levels) = resolve(&text, Direction::Auto);
        assert_eq!(level, 1);
        assert_eq!(levels.len(), 261);
        assert_eq!(levels[130], 125);
        assert!(levels.iter().all(|&level| level <= 125));
    }

    #[test]
    fn test_deep_isolates_are_capped() {
        let mut text = "\u{2066}".repeat(200);
        text.push('a');
        text.push_str(&"\u{2069}".repeat(200));

        let (_, levels) = resolve(&text, Direction::LeftToRight);
        assert_eq!(levels.len(), 401);
        assert!(levels.iter().all(|&level| level <= 126));
        assert_eq!(levels[200], 124);
    }
}

#[cfg(test)]
mod whitespace {
    use super::*;

    #[test]
    fn test_trailing_whitespace_resets() {
        assert_eq!(
            resolve("\u{05D0}\u{05D1} ", Direction::LeftToRight),
            (0, vec![1, 1, 0])
        );
    }

    #[test]
    fn test_segment_separator_resets() {
        assert_eq!(resolve("a\tb", Direction::RightToLeft), (1, vec![2, 1, 2]));
        assert_eq!(
            resolve("a \tb", Direction::RightToLeft),
            (1, vec![2, 1, 1, 2])
        );
    }

    #[test]
    fn test_removed_characters_take_preceding_level() {
        // U+200B ZERO WIDTH SPACE is BN
        assert_eq!(
            resolve("\u{05D0}\u{200B}\u{05D1}", Direction::LeftToRight),
            (0, vec![1, 1, 1])
        );
    }
}
