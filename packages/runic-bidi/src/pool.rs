//! Per-thread resolver reuse

use std::cell::RefCell;
use std::ops::Range;

use thread_local::ThreadLocal;

use crate::algorithm::BidiAlgorithm;
use crate::config::BidiConfig;
use crate::data::BidiData;
use crate::error::BidiResult;
use crate::types::Direction;

/// Levels of a single resolved paragraph
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ResolvedParagraph {
    pub paragraph_level: u8,
    pub levels: Vec<u8>,
}

/// Levels of multi-paragraph text, one entry per code point
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ResolvedText {
    /// Code point range and paragraph level of each paragraph
    pub paragraphs: Vec<(Range<usize>, u8)>,
    pub levels: Vec<u8>,
}

/// Paragraph data and resolver owned by one thread
#[derive(Debug, Default)]
pub struct ResolverWorker {
    pub data: BidiData,
    pub algorithm: BidiAlgorithm,
}

impl ResolverWorker {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            data: BidiData::with_capacity(capacity),
            algorithm: BidiAlgorithm::with_capacity(capacity),
        }
    }

    /// Resolve `text` as a single paragraph
    pub fn resolve_str(&mut self, text: &str, direction: Direction) -> BidiResult<ResolvedParagraph> {
        self.data.init_str(text, direction);
        let paragraph_level = self.algorithm.process_data(&self.data, None)?;
        Ok(ResolvedParagraph {
            paragraph_level,
            levels: self.algorithm.resolved_levels().to_vec(),
        })
    }

    /// Split `text` into paragraphs (P1) and resolve each one on its own
    pub fn resolve_paragraphs(&mut self, text: &str, direction: Direction) -> BidiResult<ResolvedText> {
        self.data.init_str(text, direction);
        let data = &self.data;
        let mut levels = vec![0; data.len()];
        let mut paragraphs = Vec::new();

        for range in data.paragraph_ranges() {
            let paragraph_level = self.algorithm.process(
                &data.types()[range.clone()],
                &data.paired_bracket_types()[range.clone()],
                &data.paired_bracket_values()[range.clone()],
                direction,
                data.flags(),
                Some(&mut levels[range.clone()]),
            )?;
            paragraphs.push((range, paragraph_level));
        }

        Ok(ResolvedText { paragraphs, levels })
    }
}

/// Caller-owned pool handing each thread its own [`ResolverWorker`]
pub struct ResolverPool {
    config: BidiConfig,
    workers: ThreadLocal<RefCell<ResolverWorker>>,
}

impl ResolverPool {
    pub fn new(config: BidiConfig) -> Self {
        Self {
            config,
            workers: ThreadLocal::new(),
        }
    }

    pub fn config(&self) -> &BidiConfig {
        &self.config
    }

    /// Lend this thread's worker to `f`.
    ///
    /// A nested call on the same thread gets a temporary worker.
    pub fn with<T>(&self, f: impl FnOnce(&mut ResolverWorker) -> T) -> T {
        let capacity = self.config.initial_capacity;
        let cell = self
            .workers
            .get_or(|| RefCell::new(ResolverWorker::with_capacity(capacity)));

        match cell.try_borrow_mut() {
            Ok(mut worker) => f(&mut worker),
            Err(_) => {
                log::debug!("Thread resolver busy, using a temporary worker");
                let mut worker = ResolverWorker::with_capacity(capacity);
                f(&mut worker)
            }
        }
    }

    /// Resolve `text` as one paragraph
    pub fn resolve_str(&self, text: &str, direction: Direction) -> BidiResult<ResolvedParagraph> {
        self.with(|worker| worker.resolve_str(text, direction))
    }

    /// Resolve `text` as one paragraph in the configured default direction
    pub fn resolve(&self, text: &str) -> BidiResult<ResolvedParagraph> {
        self.resolve_str(text, self.config.default_direction)
    }

    /// Resolve each paragraph of `text` separately
    pub fn resolve_paragraphs(&self, text: &str, direction: Direction) -> BidiResult<ResolvedText> {
        self.with(|worker| worker.resolve_paragraphs(text, direction))
    }
}

impl Default for ResolverPool {
    fn default() -> Self {
        Self::new(BidiConfig::default())
    }
}

impl std::fmt::Debug for ResolverPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResolverPool")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reentrant_use_gets_a_temporary_worker() {
        let pool = ResolverPool::default();
        let (outer, inner) = pool.with(|worker| {
            let inner = pool.resolve_str("\u{05D0}b", Direction::Auto).unwrap();
            let outer = worker.resolve_str("ab", Direction::Auto).unwrap();
            (outer, inner)
        });
        assert_eq!(outer.levels, vec![0, 0]);
        assert_eq!(inner.paragraph_level, 1);
        assert_eq!(inner.levels, vec![1, 2]);
    }

    #[test]
    fn test_default_direction_from_config() {
        let pool = ResolverPool::new(BidiConfig {
            default_direction: Direction::RightToLeft,
            initial_capacity: 8,
        });
        let resolved = pool.resolve("abc").unwrap();
        assert_eq!(resolved.paragraph_level, 1);
        assert_eq!(resolved.levels, vec![2, 2, 2]);
    }

    #[test]
    fn test_workers_are_per_thread() {
        let pool = ResolverPool::default();
        std::thread::scope(|scope| {
            for _ in 0..4 {
                scope.spawn(|| {
                    let resolved = pool.resolve_str("a \u{05D0}", Direction::LeftToRight).unwrap();
                    assert_eq!(resolved.levels, vec![0, 0, 1]);
                });
            }
        });
    }
}
