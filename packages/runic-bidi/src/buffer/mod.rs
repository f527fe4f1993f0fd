//! Allocation-reusing containers for the resolver
//!
//! - [`GrowableBuffer`]: owned array with a logical length, storage never shrinks
//! - [`MappedSlice`]: mutable index-indirection view over a slice
//! - [`BidiMap`]: bijective map queried from either side

mod bidi_map;
mod growable;
mod mapped;

pub use bidi_map::BidiMap;
pub use growable::GrowableBuffer;
pub use mapped::MappedSlice;
