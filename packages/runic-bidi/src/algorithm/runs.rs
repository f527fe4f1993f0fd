//! X9 removal, level runs (BD7) and isolating run sequences (BD13, X10)

use runic_unicode::BidiCharacterType;

use super::{level_direction, BidiAlgorithm};

/// Maximal span of equal levels, in retained (post-X9) coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct LevelRun {
    pub start: usize,
    pub end: usize,
}

/// Level runs spliced across matched isolates.
///
/// `start..end` indexes the flattened `sequence_indices` buffer, whose
/// entries are positions in the paragraph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct IsolatingRunSequence {
    pub start: usize,
    pub end: usize,
    pub level: u8,
    pub sos: BidiCharacterType,
    pub eos: BidiCharacterType,
}

impl BidiAlgorithm {
    /// X9: remember the positions that survive removal of embedding controls and BN
    pub(super) fn build_retained_map(&mut self, types: &[BidiCharacterType]) {
        self.retained.clear();
        for (index, ty) in types.iter().enumerate() {
            if !ty.is_removed_by_x9() {
                self.retained.push(index);
            }
        }
    }

    /// BD7
    pub(super) fn find_level_runs(&mut self, levels: &[u8]) {
        self.level_runs.clear();
        let retained = &self.retained;
        let mut start = 0;
        for position in 1..=retained.len() {
            if position == retained.len() || levels[retained[position]] != levels[retained[start]]
            {
                self.level_runs.push(LevelRun {
                    start,
                    end: position,
                });
                start = position;
            }
        }
    }

    /// BD13 and X10: splice runs across matched isolates and compute sos/eos
    pub(super) fn find_isolating_run_sequences(
        &mut self,
        types: &[BidiCharacterType],
        levels: &[u8],
    ) {
        let run_count = self.level_runs.len();
        self.next_run.clear();
        self.next_run.resize(run_count, None);
        self.continues_sequence.clear();
        self.continues_sequence.resize(run_count, false);

        // A run opening with a matched PDI continues the run that ends with its initiator
        for run_index in 0..run_count {
            let first = self.retained[self.level_runs[run_index].start];
            if types[first] != BidiCharacterType::PDI {
                continue;
            }
            let Some(&initiator) = self.isolate_pairs.get_key(&first) else {
                continue;
            };
            match self.run_ending_at(initiator) {
                Some(previous) => {
                    self.next_run[previous] = Some(run_index);
                    self.continues_sequence[run_index] = true;
                }
                None => debug_assert!(
                    false,
                    "isolate initiator {initiator} does not end a level run"
                ),
            }
        }

        let paragraph_level = self.paragraph_level;
        for first_run in 0..run_count {
            if self.continues_sequence[first_run] {
                continue;
            }

            let start = self.sequence_indices.len();
            let mut last_run = first_run;
            let mut current = Some(first_run);
            while let Some(run_index) = current {
                let run = self.level_runs[run_index];
                for &index in &self.retained[run.start..run.end] {
                    self.sequence_indices.push(index);
                }
                last_run = run_index;
                current = self.next_run[run_index];
            }
            let end = self.sequence_indices.len();

            let level = levels[self.sequence_indices[start]];

            let run_start = self.level_runs[first_run].start;
            let preceding_level = match run_start {
                0 => paragraph_level,
                _ => levels[self.retained[run_start - 1]],
            };

            let run_end = self.level_runs[last_run].end;
            let last = self.sequence_indices[end - 1];
            let following_level =
                if run_end == self.retained.len() || types[last].is_isolate_initiator() {
                    paragraph_level
                } else {
                    levels[self.retained[run_end]]
                };

            self.sequences.push(IsolatingRunSequence {
                start,
                end,
                level,
                sos: level_direction(preceding_level.max(level)),
                eos: level_direction(following_level.max(level)),
            });
        }
    }

    /// Index of the level run whose last character is `index`
    fn run_ending_at(&self, index: usize) -> Option<usize> {
        let position = self.retained.binary_search(&index).ok()?;
        let run_index = self.level_runs.partition_point(|run| run.end <= position);
        let run = self.level_runs.get(run_index)?;
        (run.end == position + 1).then_some(run_index)
    }
}
