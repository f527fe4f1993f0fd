//! Isolate matching (BD9) and explicit levels (X1-X8)

use arrayvec::ArrayVec;
use runic_unicode::BidiCharacterType;

use super::{first_strong_level, BidiAlgorithm};
use crate::types::MAX_DEPTH;

/// Paragraph entry plus one entry per possible embedding level
const STACK_CAPACITY: usize = MAX_DEPTH as usize + 2;

/// Directional status stack entry
#[derive(Debug, Clone, Copy)]
struct Status {
    level: u8,
    override_status: Option<BidiCharacterType>,
    isolate: bool,
}

#[derive(Debug, Default)]
struct OverflowCounters {
    isolates: usize,
    embeddings: usize,
    valid_isolates: usize,
    overflowed: bool,
}

impl OverflowCounters {
    #[inline]
    fn any_pending(&self) -> bool {
        self.isolates > 0 || self.embeddings > 0
    }
}

#[inline]
fn least_odd_greater(level: u8) -> u8 {
    (level + 1) | 1
}

#[inline]
fn least_even_greater(level: u8) -> u8 {
    (level + 2) & !1
}

impl BidiAlgorithm {
    /// BD9: pair each isolate initiator with the PDI that closes it
    pub(super) fn find_isolate_pairs(&mut self, types: &[BidiCharacterType]) {
        for (index, &ty) in types.iter().enumerate() {
            match ty {
                BidiCharacterType::LRI | BidiCharacterType::RLI | BidiCharacterType::FSI => {
                    self.pending_isolates.push(index)
                }
                BidiCharacterType::PDI => {
                    if let Some(initiator) = self.pending_isolates.pop() {
                        self.isolate_pairs.insert(initiator, index);
                    }
                }
                BidiCharacterType::B => self.pending_isolates.clear(),
                _ => {}
            }
        }
    }

    /// X1-X8: explicit embedding levels and directional overrides.
    ///
    /// Overridden characters get their type replaced in `resolved_types`.
    /// Pushes beyond [`MAX_DEPTH`] are counted and absorbed.
    pub(super) fn resolve_explicit_levels(&mut self, types: &[BidiCharacterType], levels: &mut [u8]) {
        let base = Status {
            level: self.paragraph_level,
            override_status: None,
            isolate: false,
        };
        let mut stack: ArrayVec<Status, STACK_CAPACITY> = ArrayVec::new();
        stack.push(base);
        let mut counters = OverflowCounters::default();

        for (index, &ty) in types.iter().enumerate() {
            let top = stack.last().copied().unwrap_or(base);

            match ty {
                BidiCharacterType::RLE
                | BidiCharacterType::LRE
                | BidiCharacterType::RLO
                | BidiCharacterType::LRO => {
                    levels[index] = top.level;
                    let level = match ty {
                        BidiCharacterType::RLE | BidiCharacterType::RLO => {
                            least_odd_greater(top.level)
                        }
                        _ => least_even_greater(top.level),
                    };
                    let override_status = match ty {
                        BidiCharacterType::RLO => Some(BidiCharacterType::R),
                        BidiCharacterType::LRO => Some(BidiCharacterType::L),
                        _ => None,
                    };
                    let status = Status {
                        level,
                        override_status,
                        isolate: false,
                    };
                    if level > MAX_DEPTH || counters.any_pending() || stack.try_push(status).is_err()
                    {
                        counters.overflowed = true;
                        if counters.isolates == 0 {
                            counters.embeddings += 1;
                        }
                    }
                }

                BidiCharacterType::RLI | BidiCharacterType::LRI | BidiCharacterType::FSI => {
                    levels[index] = top.level;
                    if let Some(override_type) = top.override_status {
                        self.resolved_types[index] = override_type;
                    }

                    let rtl = match ty {
                        BidiCharacterType::RLI => true,
                        BidiCharacterType::LRI => false,
                        _ => {
                            let end = self
                                .isolate_pairs
                                .get_value(&index)
                                .copied()
                                .unwrap_or(types.len());
                            first_strong_level(types, &self.isolate_pairs, index + 1, end)
                                == Some(1)
                        }
                    };
                    let level = if rtl {
                        least_odd_greater(top.level)
                    } else {
                        least_even_greater(top.level)
                    };
                    let status = Status {
                        level,
                        override_status: None,
                        isolate: true,
                    };
                    if level > MAX_DEPTH || counters.any_pending() || stack.try_push(status).is_err()
                    {
                        counters.overflowed = true;
                        counters.isolates += 1;
                    } else {
                        counters.valid_isolates += 1;
                    }
                }

                BidiCharacterType::PDI => {
                    if counters.isolates > 0 {
                        counters.isolates -= 1;
                    } else if counters.valid_isolates > 0 {
                        counters.embeddings = 0;
                        while stack.last().is_some_and(|status| !status.isolate) {
                            stack.pop();
                        }
                        stack.pop();
                        counters.valid_isolates -= 1;
                    }

                    let top = stack.last().copied().unwrap_or(base);
                    levels[index] = top.level;
                    if let Some(override_type) = top.override_status {
                        self.resolved_types[index] = override_type;
                    }
                }

                BidiCharacterType::PDF => {
                    levels[index] = top.level;
                    if counters.isolates > 0 {
                        // Inside an overflowed isolate
                    } else if counters.embeddings > 0 {
                        counters.embeddings -= 1;
                    } else if !top.isolate && stack.len() >= 2 {
                        stack.pop();
                    }
                }

                BidiCharacterType::B => {
                    // X8
                    levels[index] = self.paragraph_level;
                    stack.truncate(1);
                    counters = OverflowCounters {
                        overflowed: counters.overflowed,
                        ..OverflowCounters::default()
                    };
                }

                BidiCharacterType::BN => levels[index] = top.level,

                _ => {
                    levels[index] = top.level;
                    if let Some(override_type) = top.override_status {
                        self.resolved_types[index] = override_type;
                    }
                }
            }
        }

        if counters.overflowed {
            log::debug!(
                "Explicit nesting exceeded depth {} in {} code points, extra pushes ignored",
                MAX_DEPTH,
                types.len()
            );
        }
    }
}
