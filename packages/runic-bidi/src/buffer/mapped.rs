use std::ops::Range;

/// Mutable view of `data` through an index map.
///
/// Element `k` of the view is `data[map[k]]`. Used to walk an isolating run
/// sequence as if it were contiguous while writing through to the paragraph
/// arrays.
#[derive(Debug)]
pub struct MappedSlice<'a, T> {
    data: &'a mut [T],
    map: &'a [usize],
}

impl<'a, T: Copy> MappedSlice<'a, T> {
    pub fn new(data: &'a mut [T], map: &'a [usize]) -> Self {
        debug_assert!(map.iter().all(|&index| index < data.len()));
        Self { data, map }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    #[inline]
    pub fn get(&self, index: usize) -> T {
        self.data[self.map[index]]
    }

    #[inline]
    pub fn set(&mut self, index: usize, value: T) {
        self.data[self.map[index]] = value;
    }

    /// Set every element in `range` of the view
    pub fn fill(&mut self, range: Range<usize>, value: T) {
        for &index in &self.map[range] {
            self.data[index] = value;
        }
    }

    /// Position in the underlying data of view element `index`
    #[inline]
    pub fn source_index(&self, index: usize) -> usize {
        self.map[index]
    }
}
