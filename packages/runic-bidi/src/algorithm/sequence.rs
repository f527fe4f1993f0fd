//! Weak, neutral and implicit resolution of one isolating run sequence

use arrayvec::ArrayVec;
use runic_unicode::BidiCharacterType as T;
use runic_unicode::{BidiCharacterType, BidiPairedBracketType, CodePoint};

use super::runs::IsolatingRunSequence;
use super::{level_direction, Input};
use crate::buffer::MappedSlice;
use crate::types::MAX_PAIRING_DEPTH;

pub(super) struct SequenceResolver<'a> {
    types: MappedSlice<'a, BidiCharacterType>,
    input: &'a Input<'a>,
    level: u8,
    sos: BidiCharacterType,
    eos: BidiCharacterType,
}

impl<'a> SequenceResolver<'a> {
    pub fn new(
        resolved_types: &'a mut [BidiCharacterType],
        map: &'a [usize],
        input: &'a Input<'a>,
        sequence: &IsolatingRunSequence,
    ) -> Self {
        Self {
            types: MappedSlice::new(resolved_types, map),
            input,
            level: sequence.level,
            sos: sequence.sos,
            eos: sequence.eos,
        }
    }

    #[inline]
    fn embedding_direction(&self) -> BidiCharacterType {
        level_direction(self.level)
    }

    #[inline]
    fn original_type(&self, index: usize) -> BidiCharacterType {
        self.input.types[self.types.source_index(index)]
    }

    /// W1-W7
    pub fn resolve_weak_types(&mut self) {
        let len = self.types.len();

        // W1
        let mut previous = self.sos;
        for index in 0..len {
            let ty = self.types.get(index);
            if ty == T::NSM {
                self.types.set(index, previous);
            } else if ty.is_isolate_control() {
                previous = T::ON;
            } else {
                previous = ty;
            }
        }

        // W2, W3
        let mut last_strong = self.sos;
        for index in 0..len {
            match self.types.get(index) {
                ty @ (T::L | T::R) => last_strong = ty,
                T::AL => {
                    last_strong = T::AL;
                    self.types.set(index, T::R);
                }
                T::EN if last_strong == T::AL => self.types.set(index, T::AN),
                _ => {}
            }
        }

        // W4
        for index in 1..len.saturating_sub(1) {
            let before = self.types.get(index - 1);
            let after = self.types.get(index + 1);
            match self.types.get(index) {
                T::ES if before == T::EN && after == T::EN => self.types.set(index, T::EN),
                T::CS if before == after && matches!(before, T::EN | T::AN) => {
                    self.types.set(index, before)
                }
                _ => {}
            }
        }

        // W5
        let mut index = 0;
        while index < len {
            if self.types.get(index) != T::ET {
                index += 1;
                continue;
            }
            let start = index;
            while index < len && self.types.get(index) == T::ET {
                index += 1;
            }
            let touches_number = (start > 0 && self.types.get(start - 1) == T::EN)
                || (index < len && self.types.get(index) == T::EN);
            if touches_number {
                self.types.fill(start..index, T::EN);
            }
        }

        // W6, W7
        let mut last_strong = self.sos;
        for index in 0..len {
            match self.types.get(index) {
                T::ES | T::ET | T::CS => self.types.set(index, T::ON),
                ty @ (T::L | T::R) => last_strong = ty,
                T::EN if last_strong == T::L => self.types.set(index, T::L),
                _ => {}
            }
        }
    }

    /// N0: resolve paired brackets
    pub fn resolve_paired_brackets(&mut self, pairs: &mut Vec<(usize, usize)>) {
        self.locate_bracket_pairs(pairs);

        let embedding = self.embedding_direction();
        for &(open, close) in pairs.iter() {
            let mut found_embedding = false;
            let mut found_opposite = false;
            for index in open + 1..close {
                match strong_direction(self.types.get(index)) {
                    Some(direction) if direction == embedding => {
                        found_embedding = true;
                        break;
                    }
                    Some(_) => found_opposite = true,
                    None => {}
                }
            }

            let resolved = if found_embedding {
                embedding
            } else if found_opposite {
                let context = (0..open)
                    .rev()
                    .find_map(|index| strong_direction(self.types.get(index)))
                    .unwrap_or(self.sos);
                if context != embedding {
                    context
                } else {
                    embedding
                }
            } else {
                continue;
            };

            self.set_bracket(open, resolved);
            self.set_bracket(close, resolved);
        }
    }

    /// BD16: pair brackets that are still ON, using canonical bracket values
    fn locate_bracket_pairs(&self, pairs: &mut Vec<(usize, usize)>) {
        pairs.clear();
        let mut openers: ArrayVec<(usize, Option<CodePoint>), MAX_PAIRING_DEPTH> =
            ArrayVec::new();

        for index in 0..self.types.len() {
            if self.types.get(index) != T::ON {
                continue;
            }
            let source = self.types.source_index(index);
            let value = self.input.paired_bracket_values[source];
            match self.input.paired_bracket_types[source] {
                BidiPairedBracketType::Open => {
                    if openers.try_push((index, value)).is_err() {
                        log::debug!(
                            "Bracket nesting exceeded {MAX_PAIRING_DEPTH}, pairing stopped at {source}"
                        );
                        break;
                    }
                }
                BidiPairedBracketType::Close => {
                    if value.is_none() {
                        continue;
                    }
                    if let Some(depth) = openers.iter().rposition(|&(_, closer)| closer == value) {
                        pairs.push((openers[depth].0, index));
                        openers.truncate(depth);
                    }
                }
                BidiPairedBracketType::None => {}
            }
        }

        pairs.sort_unstable_by_key(|&(open, _)| open);
    }

    /// Set a bracket and the non-spacing marks that originally followed it
    fn set_bracket(&mut self, index: usize, direction: BidiCharacterType) {
        self.types.set(index, direction);
        let mut next = index + 1;
        while next < self.types.len() && self.original_type(next) == T::NSM {
            self.types.set(next, direction);
            next += 1;
        }
    }

    /// N1, N2
    pub fn resolve_neutral_types(&mut self) {
        let len = self.types.len();
        let embedding = self.embedding_direction();

        let mut index = 0;
        while index < len {
            if !is_neutral_or_isolate(self.types.get(index)) {
                index += 1;
                continue;
            }
            let start = index;
            while index < len && is_neutral_or_isolate(self.types.get(index)) {
                index += 1;
            }

            let leading = match start {
                0 => self.sos,
                _ => strong_direction(self.types.get(start - 1)).unwrap_or(embedding),
            };
            let trailing = if index == len {
                self.eos
            } else {
                strong_direction(self.types.get(index)).unwrap_or(embedding)
            };

            let resolved = if leading == trailing {
                leading
            } else {
                embedding
            };
            self.types.fill(start..index, resolved);
        }
    }

    /// I1, I2
    pub fn resolve_implicit_levels(&self, levels: &mut [u8]) {
        let even = self.level & 1 == 0;
        for index in 0..self.types.len() {
            let ty = self.types.get(index);
            let raise = match (even, ty) {
                (true, T::R) => 1,
                (true, T::AN | T::EN) => 2,
                (false, T::L | T::AN | T::EN) => 1,
                _ => 0,
            };
            levels[self.types.source_index(index)] = self.level + raise;
        }
    }
}

/// Strong direction for N0 and N1, numbers count as R
#[inline]
fn strong_direction(ty: BidiCharacterType) -> Option<BidiCharacterType> {
    match ty {
        T::L => Some(T::L),
        T::R | T::AL | T::EN | T::AN => Some(T::R),
        _ => None,
    }
}

#[inline]
fn is_neutral_or_isolate(ty: BidiCharacterType) -> bool {
    matches!(ty, T::B | T::S | T::WS | T::ON) || ty.is_isolate_control()
}
