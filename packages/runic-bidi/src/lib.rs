//! Unicode Bidirectional Algorithm for runic
//!
//! Resolves per-code-point embedding levels for mixed-direction paragraphs
//! following UAX #9:
//! - [`BidiData`] assembles character types and paired brackets from text
//! - [`BidiAlgorithm`] runs the resolution pipeline and can be reused across paragraphs
//! - [`coalesce_levels`] and [`reorder_visual`] turn levels into runs and visual order
//! - [`ResolverPool`] keeps one data/resolver pair per thread
//!
//! ```
//! use runic_bidi::{BidiAlgorithm, BidiData, Direction};
//!
//! let mut data = BidiData::new();
//! data.init_str("abc \u{05D0}\u{05D1}", Direction::Auto);
//!
//! let mut algorithm = BidiAlgorithm::new();
//! let paragraph_level = algorithm.process_data(&data, None)?;
//! assert_eq!(paragraph_level, 0);
//! assert_eq!(algorithm.resolved_levels(), &[0, 0, 0, 0, 1, 1]);
//! # Ok::<(), runic_bidi::BidiError>(())
//! ```

pub mod algorithm;
pub mod buffer;
pub mod config;
pub mod data;
pub mod error;
pub mod pool;
pub mod run;
pub mod types;

pub use algorithm::BidiAlgorithm;
pub use config::BidiConfig;
pub use data::BidiData;
pub use error::{BidiError, BidiResult};
pub use pool::{ResolvedParagraph, ResolvedText, ResolverPool, ResolverWorker};
pub use run::{coalesce_levels, invert_order, reorder_visual, BidiRun, CoalescedRuns};
pub use types::{BidiDataFlags, Direction, MAX_DEPTH, MAX_PAIRING_DEPTH};

pub use runic_unicode::{BidiCharacterType, BidiPairedBracketType, CodePoint};
