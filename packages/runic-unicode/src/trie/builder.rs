use ahash::AHashMap;

use super::{
    UnicodeTrie, DATA_BLOCK_LENGTH, DATA_GRANULARITY, INDEX_1_OFFSET, INDEX_2_BLOCK_LENGTH,
    INDEX_SHIFT, LSCP_INDEX_2_OFFSET, OMITTED_BMP_INDEX_1_LENGTH, SHIFT_1,
};
use crate::error::{UnicodeError, UnicodeResult};

const CODE_POINT_LIMIT: u32 = 0x110000;

/// Code points covered by one index-1 entry
const INDEX_1_SPAN: u32 = 1 << SHIFT_1;

/// Mutable builder that freezes into a [`UnicodeTrie`].
///
/// Values are kept in a dense table until [`UnicodeTrieBuilder::freeze`]
/// compacts them. Identical data blocks and identical supplementary index-2
/// blocks are stored once.
#[derive(Debug, Clone)]
pub struct UnicodeTrieBuilder {
    values: Vec<u32>,
    error_value: u32,
}

impl UnicodeTrieBuilder {
    pub fn new(initial_value: u32, error_value: u32) -> Self {
        Self {
            values: vec![initial_value; CODE_POINT_LIMIT as usize],
            error_value,
        }
    }

    /// Set the value for one code point
    pub fn set(&mut self, code_point: u32, value: u32) -> UnicodeResult<&mut Self> {
        let slot = self
            .values
            .get_mut(code_point as usize)
            .ok_or(UnicodeError::InvalidCodePoint(code_point))?;
        *slot = value;
        Ok(self)
    }

    /// Set the value for every code point in `start..=end`
    pub fn set_range(&mut self, start: u32, end: u32, value: u32) -> UnicodeResult<&mut Self> {
        if end >= CODE_POINT_LIMIT {
            return Err(UnicodeError::InvalidCodePoint(end));
        }
        if start > end {
            return Err(UnicodeError::InvalidCodePoint(start));
        }
        self.values[start as usize..=end as usize].fill(value);
        Ok(self)
    }

    /// Current value of a code point, the error value above U+10FFFF
    pub fn get(&self, code_point: u32) -> u32 {
        self.values
            .get(code_point as usize)
            .copied()
            .unwrap_or(self.error_value)
    }

    /// Compact the table into a frozen trie
    pub fn freeze(&self) -> UnicodeTrie {
        let high_value = self.values[CODE_POINT_LIMIT as usize - 1];

        // Trailing index-1 spans that only hold the high value are dropped
        let mut high_start = CODE_POINT_LIMIT;
        while high_start > 0x10000 {
            let span = &self.values[(high_start - INDEX_1_SPAN) as usize..high_start as usize];
            if span.iter().any(|&value| value != high_value) {
                break;
            }
            high_start -= INDEX_1_SPAN;
        }

        let mut blocks = DataBlocks::default();

        let bmp: Vec<u32> = (0..0x10000)
            .step_by(DATA_BLOCK_LENGTH as usize)
            .map(|start| blocks.intern(&self.values, start))
            .collect();

        let lead_surrogates: Vec<u32> = (0xD800..0xDC00)
            .step_by(DATA_BLOCK_LENGTH as usize)
            .map(|start| blocks.intern(&self.values, start))
            .collect();

        let mut index_2_lookup: AHashMap<Vec<u32>, usize> = AHashMap::new();
        let mut index_2_blocks: Vec<Vec<u32>> = Vec::new();
        let mut index_1 = Vec::new();
        for span_start in (0x10000..high_start).step_by(INDEX_1_SPAN as usize) {
            let block: Vec<u32> = (span_start..span_start + INDEX_1_SPAN)
                .step_by(DATA_BLOCK_LENGTH as usize)
                .map(|start| blocks.intern(&self.values, start))
                .collect();
            let next = index_2_blocks.len();
            let number = *index_2_lookup.entry(block.clone()).or_insert(next);
            if number == next {
                index_2_blocks.push(block);
            }
            index_1.push(number);
        }

        let index_1_length = (high_start >> SHIFT_1) - OMITTED_BMP_INDEX_1_LENGTH;
        let index_2_start = INDEX_1_OFFSET + index_1_length;
        let unaligned = index_2_start + INDEX_2_BLOCK_LENGTH * index_2_blocks.len() as u32;
        let data_start = (unaligned + DATA_GRANULARITY - 1) & !(DATA_GRANULARITY - 1);
        let data_offset = |block: u32| (data_start + DATA_BLOCK_LENGTH * block) >> INDEX_SHIFT;

        let mut data = vec![0u32; data_start as usize];
        for (slot, &block) in bmp.iter().enumerate() {
            data[slot] = data_offset(block);
        }
        for (slot, &block) in lead_surrogates.iter().enumerate() {
            data[LSCP_INDEX_2_OFFSET as usize + slot] = data_offset(block);
        }
        for (slot, &number) in index_1.iter().enumerate() {
            data[INDEX_1_OFFSET as usize + slot] =
                index_2_start + INDEX_2_BLOCK_LENGTH * number as u32;
        }
        for (number, block) in index_2_blocks.iter().enumerate() {
            let base = (index_2_start + INDEX_2_BLOCK_LENGTH * number as u32) as usize;
            for (slot, &data_block) in block.iter().enumerate() {
                data[base + slot] = data_offset(data_block);
            }
        }

        for block in &blocks.list {
            data.extend_from_slice(block);
        }
        data.extend(std::iter::repeat(high_value).take(DATA_GRANULARITY as usize));

        log::debug!(
            "Froze trie: high_start={:#X}, {} data blocks, {} index-2 blocks, {} words",
            high_start,
            blocks.list.len(),
            index_2_blocks.len(),
            data.len()
        );

        UnicodeTrie::from_parts(data, high_start, self.error_value)
    }
}

#[derive(Default)]
struct DataBlocks {
    lookup: AHashMap<Vec<u32>, u32>,
    list: Vec<Vec<u32>>,
}

impl DataBlocks {
    fn intern(&mut self, values: &[u32], start: u32) -> u32 {
        let block = &values[start as usize..(start + DATA_BLOCK_LENGTH) as usize];
        if let Some(&number) = self.lookup.get(block) {
            return number;
        }
        let number = self.list.len() as u32;
        self.lookup.insert(block.to_vec(), number);
        self.list.push(block.to_vec());
        number
    }
}
