//! Unicode Bidirectional Algorithm (UAX #9) level resolution
//!
//! [`BidiAlgorithm`] is a reusable resolver. Every call to
//! [`BidiAlgorithm::process`] runs the full pipeline for one paragraph:
//!
//! 1. BD9 isolate matching
//! 2. P2/P3 paragraph level
//! 3. X1-X8 explicit levels and directional overrides
//! 4. X9 removal map, BD7 level runs and BD13 isolating run sequences
//! 5. W1-W7, N0-N2 and I1-I2 per isolating run sequence
//! 6. Levels for characters removed by X9, then L1 whitespace resets
//!
//! Scratch storage is kept between calls and only ever grows.

mod explicit;
mod runs;
mod sequence;

use std::mem;

use runic_unicode::{BidiCharacterType, BidiPairedBracketType, CodePoint};

use crate::buffer::{BidiMap, GrowableBuffer};
use crate::data::BidiData;
use crate::error::{BidiError, BidiResult};
use crate::types::{BidiDataFlags, Direction};

use runs::{IsolatingRunSequence, LevelRun};
use sequence::SequenceResolver;

/// Reusable bidi level resolver.
///
/// Not shareable between threads while resolving; give each worker its own
/// instance (see [`crate::ResolverPool`]).
#[derive(Debug, Default)]
pub struct BidiAlgorithm {
    resolved_types: GrowableBuffer<BidiCharacterType>,
    levels: GrowableBuffer<u8>,
    isolate_pairs: BidiMap<usize, usize>,
    pending_isolates: Vec<usize>,
    retained: GrowableBuffer<usize>,
    level_runs: Vec<LevelRun>,
    next_run: Vec<Option<usize>>,
    continues_sequence: Vec<bool>,
    sequences: Vec<IsolatingRunSequence>,
    sequence_indices: GrowableBuffer<usize>,
    bracket_pairs: Vec<(usize, usize)>,
    paragraph_level: u8,
}

impl BidiAlgorithm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a resolver with storage reserved for `capacity` code points
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            resolved_types: GrowableBuffer::with_capacity(capacity),
            levels: GrowableBuffer::with_capacity(capacity),
            retained: GrowableBuffer::with_capacity(capacity),
            sequence_indices: GrowableBuffer::with_capacity(capacity),
            ..Self::default()
        }
    }

    /// Clear per-call state, keeping allocated storage
    pub fn reset(&mut self) {
        self.resolved_types.clear();
        self.levels.clear();
        self.isolate_pairs.clear();
        self.pending_isolates.clear();
        self.retained.clear();
        self.level_runs.clear();
        self.next_run.clear();
        self.continues_sequence.clear();
        self.sequences.clear();
        self.sequence_indices.clear();
        self.bracket_pairs.clear();
        self.paragraph_level = 0;
    }

    /// Resolve the embedding levels of one paragraph.
    ///
    /// `paired_bracket_values` holds the canonical closing bracket for
    /// openers and the canonical bracket itself for closers, as produced by
    /// [`BidiData`]. `hints` are trusted: a missing flag skips the matching
    /// stage, so pass [`BidiDataFlags::all`] when unsure.
    ///
    /// Levels are written to `output` when given, otherwise to internal
    /// storage readable through [`BidiAlgorithm::resolved_levels`]. Returns
    /// the paragraph embedding level.
    pub fn process(
        &mut self,
        types: &[BidiCharacterType],
        paired_bracket_types: &[BidiPairedBracketType],
        paired_bracket_values: &[Option<CodePoint>],
        direction: Direction,
        hints: BidiDataFlags,
        output: Option<&mut [u8]>,
    ) -> BidiResult<u8> {
        if paired_bracket_types.len() != types.len() || paired_bracket_values.len() != types.len()
        {
            return Err(BidiError::InputLengthMismatch {
                types: types.len(),
                bracket_types: paired_bracket_types.len(),
                bracket_values: paired_bracket_values.len(),
            });
        }

        let input = Input {
            types,
            paired_bracket_types,
            paired_bracket_values,
        };

        match output {
            Some(levels) => {
                if levels.len() != types.len() {
                    return Err(BidiError::LengthMismatch {
                        expected: types.len(),
                        actual: levels.len(),
                    });
                }
                self.resolve(&input, direction, hints, levels);
                self.levels.clear();
            }
            None => {
                let mut levels = mem::take(&mut self.levels);
                levels.resize(types.len());
                self.resolve(&input, direction, hints, &mut levels);
                self.levels = levels;
            }
        }

        Ok(self.paragraph_level)
    }

    /// Resolve the paragraph assembled in `data`
    pub fn process_data(&mut self, data: &BidiData, output: Option<&mut [u8]>) -> BidiResult<u8> {
        self.process(
            data.types(),
            data.paired_bracket_types(),
            data.paired_bracket_values(),
            data.paragraph_direction(),
            data.flags(),
            output,
        )
    }

    /// Levels from the last call that did not supply an output buffer
    #[inline]
    pub fn resolved_levels(&self) -> &[u8] {
        &self.levels
    }

    /// Character types after weak and neutral resolution
    #[inline]
    pub fn resolved_types(&self) -> &[BidiCharacterType] {
        &self.resolved_types
    }

    /// Paragraph embedding level of the last call
    #[inline]
    pub fn paragraph_level(&self) -> u8 {
        self.paragraph_level
    }

    fn resolve(
        &mut self,
        input: &Input<'_>,
        direction: Direction,
        hints: BidiDataFlags,
        levels: &mut [u8],
    ) {
        self.reset();
        let types = input.types;
        self.resolved_types.copy_from(types);

        if hints.contains(BidiDataFlags::HAS_ISOLATES) {
            self.find_isolate_pairs(types);
        }

        self.paragraph_level = direction.level().unwrap_or_else(|| {
            first_strong_level(types, &self.isolate_pairs, 0, types.len()).unwrap_or(0)
        });

        if hints.intersects(BidiDataFlags::HAS_EMBEDDINGS | BidiDataFlags::HAS_ISOLATES) {
            self.resolve_explicit_levels(types, levels);
        } else {
            levels.fill(self.paragraph_level);
        }

        self.build_retained_map(types);
        self.find_level_runs(levels);
        self.find_isolating_run_sequences(types, levels);

        let resolve_brackets = hints.contains(BidiDataFlags::HAS_BRACKETS);
        for sequence in &self.sequences {
            let map = &self.sequence_indices[sequence.start..sequence.end];
            let mut resolver = SequenceResolver::new(
                &mut self.resolved_types,
                map,
                input,
                sequence,
            );
            resolver.resolve_weak_types();
            if resolve_brackets {
                resolver.resolve_paired_brackets(&mut self.bracket_pairs);
            }
            resolver.resolve_neutral_types();
            resolver.resolve_implicit_levels(levels);
        }

        assign_removed_levels(types, levels, self.paragraph_level);
        reset_whitespace_levels(types, levels, self.paragraph_level);

        log::trace!(
            "Resolved {} code points: paragraph level {}, {} level runs, {} sequences",
            types.len(),
            self.paragraph_level,
            self.level_runs.len(),
            self.sequences.len()
        );
    }
}

/// The three parallel paragraph arrays of one call
#[derive(Debug, Clone, Copy)]
struct Input<'a> {
    types: &'a [BidiCharacterType],
    paired_bracket_types: &'a [BidiPairedBracketType],
    paired_bracket_values: &'a [Option<CodePoint>],
}

/// P2/P3: level implied by the first strong character in `start..end`.
///
/// Isolate contents are skipped; an unmatched initiator hides the rest of the
/// range.
fn first_strong_level(
    types: &[BidiCharacterType],
    isolate_pairs: &BidiMap<usize, usize>,
    start: usize,
    end: usize,
) -> Option<u8> {
    let mut index = start;
    while index < end {
        match types[index] {
            BidiCharacterType::L => return Some(0),
            BidiCharacterType::R | BidiCharacterType::AL => return Some(1),
            BidiCharacterType::LRI | BidiCharacterType::RLI | BidiCharacterType::FSI => {
                match isolate_pairs.get_value(&index) {
                    Some(&pdi) => index = pdi,
                    None => return None,
                }
            }
            _ => {}
        }
        index += 1;
    }
    None
}

/// Strong direction of an embedding level
#[inline]
fn level_direction(level: u8) -> BidiCharacterType {
    if level & 1 == 0 {
        BidiCharacterType::L
    } else {
        BidiCharacterType::R
    }
}

/// Characters removed by X9 take the level of the preceding character
fn assign_removed_levels(types: &[BidiCharacterType], levels: &mut [u8], paragraph_level: u8) {
    for index in 0..types.len() {
        if types[index].is_removed_by_x9() {
            levels[index] = match index {
                0 => paragraph_level,
                _ => levels[index - 1],
            };
        }
    }
}

/// L1: separators, and whitespace before them or at the end of the line,
/// return to the paragraph level
fn reset_whitespace_levels(types: &[BidiCharacterType], levels: &mut [u8], paragraph_level: u8) {
    let is_whitespace = |ty: BidiCharacterType| {
        ty == BidiCharacterType::WS || ty.is_isolate_control() || ty.is_removed_by_x9()
    };

    let reset_preceding = |levels: &mut [u8], mut index: usize| {
        while index > 0 && is_whitespace(types[index - 1]) {
            index -= 1;
            levels[index] = paragraph_level;
        }
    };

    for index in 0..types.len() {
        if matches!(types[index], BidiCharacterType::B | BidiCharacterType::S) {
            levels[index] = paragraph_level;
            reset_preceding(levels, index);
        }
    }
    reset_preceding(levels, types.len());
}

#[cfg(test)]
mod tests {
    use super::*;
    use runic_unicode::BidiCharacterType as T;

    fn resolve(types: &[T], direction: Direction) -> (u8, Vec<u8>) {
        let bracket_types = vec![BidiPairedBracketType::None; types.len()];
        let bracket_values = vec![None; types.len()];
        let mut algorithm = BidiAlgorithm::new();
        let level = algorithm
            .process(
                types,
                &bracket_types,
                &bracket_values,
                direction,
                BidiDataFlags::all(),
                None,
            )
            .unwrap();
        (level, algorithm.resolved_levels().to_vec())
    }

    #[test]
    fn test_first_strong_skips_isolates() {
        let mut pairs = BidiMap::new();
        pairs.insert(0, 2);
        let types = [T::RLI, T::R, T::PDI, T::L];
        assert_eq!(first_strong_level(&types, &pairs, 0, 4), Some(0));

        let unmatched = [T::LRI, T::R];
        assert_eq!(first_strong_level(&unmatched, &BidiMap::new(), 0, 2), None);
        assert_eq!(first_strong_level(&[T::EN, T::AL], &pairs, 0, 2), Some(1));
    }

    #[test]
    fn test_weak_type_sequences() {
        assert_eq!(resolve(&[T::R, T::WS, T::EN, T::EN], Direction::Auto), (1, vec![1, 1, 2, 2]));
        assert_eq!(resolve(&[T::AL, T::EN], Direction::Auto), (1, vec![1, 2]));
        assert_eq!(resolve(&[T::L, T::EN, T::CS, T::EN], Direction::Auto), (0, vec![0; 4]));
        assert_eq!(
            resolve(&[T::ET, T::EN, T::ET], Direction::RightToLeft),
            (1, vec![2, 2, 2])
        );
    }

    #[test]
    fn test_output_buffer_length_is_checked() {
        let mut algorithm = BidiAlgorithm::new();
        let types = [T::L, T::R];
        let bracket_types = [BidiPairedBracketType::None; 2];
        let bracket_values = [None; 2];
        let mut short = [0u8; 1];
        let result = algorithm.process(
            &types,
            &bracket_types,
            &bracket_values,
            Direction::Auto,
            BidiDataFlags::all(),
            Some(&mut short),
        );
        assert_eq!(
            result,
            Err(BidiError::LengthMismatch {
                expected: 2,
                actual: 1
            })
        );

        let result = algorithm.process(
            &types,
            &bracket_types[..1],
            &bracket_values,
            Direction::Auto,
            BidiDataFlags::all(),
            None,
        );
        assert!(matches!(result, Err(BidiError::InputLengthMismatch { .. })));
    }

    #[test]
    fn test_whitespace_reset() {
        let mut levels = [3, 3, 3, 3, 3];
        let types = [T::R, T::WS, T::S, T::R, T::WS];
        reset_whitespace_levels(&types, &mut levels, 1);
        assert_eq!(levels, [3, 1, 1, 3, 1]);
    }
}
