//! Directional runs and visual reordering over resolved levels

use crate::types::Direction;

/// Maximal span of code points sharing one resolved level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct BidiRun {
    pub start: usize,
    pub length: usize,
    pub level: u8,
}

impl BidiRun {
    #[inline]
    pub fn end(&self) -> usize {
        self.start + self.length
    }

    /// Left-to-right for even levels, right-to-left for odd ones
    #[inline]
    pub fn direction(&self) -> Direction {
        Direction::from_level(self.level)
    }

    #[inline]
    pub fn is_rtl(&self) -> bool {
        self.level & 1 == 1
    }
}

/// Split resolved levels into runs of equal level
pub fn coalesce_levels(levels: &[u8]) -> CoalescedRuns<'_> {
    CoalescedRuns {
        levels,
        position: 0,
    }
}

/// Forward-only iterator returned by [`coalesce_levels`]
#[derive(Debug, Clone)]
pub struct CoalescedRuns<'a> {
    levels: &'a [u8],
    position: usize,
}

impl Iterator for CoalescedRuns<'_> {
    type Item = BidiRun;

    fn next(&mut self) -> Option<BidiRun> {
        let start = self.position;
        let level = *self.levels.get(start)?;
        let length = self.levels[start..]
            .iter()
            .take_while(|&&other| other == level)
            .count();
        self.position = start + length;
        Some(BidiRun {
            start,
            length,
            level,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.levels.len() - self.position;
        (usize::from(remaining > 0), Some(remaining))
    }
}

impl std::iter::FusedIterator for CoalescedRuns<'_> {}

/// L2: visual order of a line.
///
/// Entry `v` of the result is the logical index displayed at visual
/// position `v`.
pub fn reorder_visual(levels: &[u8]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..levels.len()).collect();
    let (Some(&highest), Some(&lowest)) = (levels.iter().max(), levels.iter().min()) else {
        return order;
    };
    let lowest_odd = lowest | 1;

    let mut visual_levels = levels.to_vec();
    let mut level = highest;
    while level >= lowest_odd {
        let mut index = 0;
        while index < visual_levels.len() {
            if visual_levels[index] < level {
                index += 1;
                continue;
            }
            let start = index;
            while index < visual_levels.len() && visual_levels[index] >= level {
                index += 1;
            }
            order[start..index].reverse();
            visual_levels[start..index].reverse();
        }
        level -= 1;
    }

    order
}

/// Turn a visual-to-logical map into a logical-to-visual map, or back
pub fn invert_order(order: &[usize]) -> Vec<usize> {
    let mut inverted = vec![0; order.len()];
    for (visual, &logical) in order.iter().enumerate() {
        inverted[logical] = visual;
    }
    inverted
}
