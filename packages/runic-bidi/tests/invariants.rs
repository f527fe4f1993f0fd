//! Structural guarantees that hold for arbitrary input

use runic_bidi::{
    coalesce_levels, invert_order, reorder_visual, BidiAlgorithm, BidiCharacterType, BidiData,
    BidiDataFlags, BidiError, Direction, ResolverPool,
};

/// Characters covering every bidi class the resolver treats differently
const ALPHABET: &[char] = &[
    'a', 'b', '\u{05D0}', '\u{05D1}', '\u{0627}', '1', '2', '\u{0661}', '+', '-', '$', '%', ',',
    '.', ':', '\u{0300}', '\u{200B}', ' ', '\t', '!', '(', ')', '[', ']', '\u{202A}', '\u{202B}',
    '\u{202C}', '\u{202D}', '\u{202E}', '\u{2066}', '\u{2067}', '\u{2068}', '\u{2069}',
];

/// Seeded so failures are reproducible
fn random_text(rng: &mut fastrand::Rng, len: usize) -> String {
    (0..len).map(|_| ALPHABET[rng.usize(..ALPHABET.len())]).collect()
}

fn directions() -> [Direction; 3] {
    [Direction::LeftToRight, Direction::RightToLeft, Direction::Auto]
}

#[test]
fn test_random_text_respects_level_bounds() {
    let mut rng = fastrand::Rng::with_seed(0x5EED);
    let mut data = BidiData::new();
    let mut algorithm = BidiAlgorithm::new();

    for round in 0..300 {
        let len = rng.usize(..64);
        let text = random_text(&mut rng, len);
        for direction in directions() {
            data.init_str(&text, direction);
            let level = algorithm.process_data(&data, None).unwrap();
            let levels = algorithm.resolved_levels();

            assert_eq!(levels.len(), data.len(), "round {round}: {text:?}");
            assert!(level <= 1);
            assert!(levels.iter().all(|&level| level <= 126), "{text:?}");
            if let Some(expected) = direction.level() {
                assert_eq!(level, expected);
            }

            let total: usize = coalesce_levels(levels).map(|run| run.length).sum();
            assert_eq!(total, levels.len());
        }
    }
}

#[test]
fn test_results_are_deterministic_across_reuse() {
    let mut rng = fastrand::Rng::with_seed(42);
    let texts: Vec<String> = (0..40).map(|_| random_text(&mut rng, 48)).collect();

    let mut data = BidiData::new();
    let mut reused = BidiAlgorithm::new();
    for text in &texts {
        data.init_str(text, Direction::Auto);
        let first = reused.process_data(&data, None).unwrap();
        let first_levels = reused.resolved_levels().to_vec();

        let mut fresh = BidiAlgorithm::new();
        let second = fresh.process_data(&data, None).unwrap();
        assert_eq!(first, second);
        assert_eq!(first_levels, fresh.resolved_levels(), "{text:?}");
    }
}

#[test]
fn test_hints_only_skip_work() {
    let mut rng = fastrand::Rng::with_seed(7);
    let mut data = BidiData::new();
    let mut hinted = BidiAlgorithm::new();
    let mut full = BidiAlgorithm::new();

    for _ in 0..100 {
        let text = random_text(&mut rng, 32);
        data.init_str(&text, Direction::Auto);
        hinted.process_data(&data, None).unwrap();
        full.process(
            data.types(),
            data.paired_bracket_types(),
            data.paired_bracket_values(),
            Direction::Auto,
            BidiDataFlags::all(),
            None,
        )
        .unwrap();
        assert_eq!(hinted.resolved_levels(), full.resolved_levels(), "{text:?}");
    }
}

#[test]
fn test_external_output_buffer() {
    let mut data = BidiData::new();
    data.init_str("a \u{05D0}\u{05D1}", Direction::LeftToRight);
    let mut algorithm = BidiAlgorithm::new();

    let mut levels = vec![9; data.len()];
    let level = algorithm.process_data(&data, Some(&mut levels)).unwrap();
    assert_eq!(level, 0);
    assert_eq!(levels, vec![0, 0, 1, 1]);

    let mut wrong = vec![0; 3];
    assert_eq!(
        algorithm.process_data(&data, Some(&mut wrong)),
        Err(BidiError::LengthMismatch {
            expected: 4,
            actual: 3
        })
    );
}

#[test]
fn test_style_overrides_can_be_undone() {
    let mut data = BidiData::new();
    data.init_str("abc", Direction::LeftToRight);
    let mut algorithm = BidiAlgorithm::new();

    data.save_types();
    data.types_mut()[1] = BidiCharacterType::R;
    algorithm.process_data(&data, None).unwrap();
    assert_eq!(algorithm.resolved_levels(), &[0, 1, 0]);

    data.restore_types();
    algorithm.process_data(&data, None).unwrap();
    assert_eq!(algorithm.resolved_levels(), &[0, 0, 0]);
}

#[test]
fn test_utf16_input_counts_code_points() {
    let text: Vec<u16> = "\u{05D0}\u{1F600}b".encode_utf16().collect();
    let mut data = BidiData::new();
    data.init_utf16(&text, Direction::Auto).unwrap();
    let mut algorithm = BidiAlgorithm::new();
    algorithm.process_data(&data, None).unwrap();
    assert_eq!(algorithm.resolved_levels().len(), 3);

    let invalid = [0x61, 0xD83D];
    assert!(matches!(
        data.init_utf16(&invalid, Direction::Auto),
        Err(BidiError::Unicode(_))
    ));
}

#[test]
fn test_paragraphs_resolve_independently() {
    let pool = ResolverPool::default();
    let resolved = pool
        .resolve_paragraphs("\u{05D0}b\nab\u{05D1}", Direction::Auto)
        .unwrap();
    assert_eq!(resolved.paragraphs, vec![(0..3, 1), (3..6, 0)]);
    assert_eq!(resolved.levels, vec![1, 2, 1, 0, 0, 1]);
}

#[test]
fn test_visual_order_is_a_permutation() {
    let mut rng = fastrand::Rng::with_seed(99);
    let pool = ResolverPool::default();
    for _ in 0..50 {
        let text = random_text(&mut rng, 40);
        let resolved = pool.resolve_str(&text, Direction::Auto).unwrap();
        let order = reorder_visual(&resolved.levels);
        let mut sorted = order.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, (0..resolved.levels.len()).collect::<Vec<_>>());
        assert_eq!(invert_order(&invert_order(&order)), order);
    }
}
