//! Nesting engine for rectangular panels cut from stock sheets.
//!
//! A cutting list of [`PartSpec`](entities::PartSpec)s is grouped by material and thickness,
//! expanded into individual instances and packed onto as few sheets as possible, honoring
//! the grain direction of every part unless the selected strategy explicitly trades it for yield.

/// Entities to model cutting lists, sheets and nesting results
pub mod entities;

/// Axis-aligned rectangles and orientations
pub mod geometry;

/// Placement search, grain policy, sheet allocation and strategies
pub mod opt;

/// Configuration of a nesting run
pub mod config;

/// Helper functions which do not belong to any specific module
pub mod util;

#[doc(inline)]
pub use config::NestConfig;
#[doc(inline)]
pub use opt::dispatch::{NestingOptimizer, optimize_nesting};
