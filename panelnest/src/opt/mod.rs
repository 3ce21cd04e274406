/// Drives placement of instances across consecutive sheets
pub mod allocator;

/// Grouping of a cutting list by material and running a strategy per group
pub mod dispatch;

/// Free-rectangle bookkeeping of a single sheet
pub mod free_rects;

/// Legality of orientations with respect to grain requirements
pub mod grain;

/// Best Short Side Fit search over the free space of a sheet
pub mod search;

/// Row-by-row grid walk, used by the simplified placement strategies
pub mod shelf;

/// Named policy presets over the shared placement core
pub mod strategy;

/// Candidate location for a part of a given footprint on the active sheet.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Position {
    pub x: f64,
    pub y: f64,
    /// Layout-specific reference to the free region the position was taken from
    pub slot: usize,
    /// Lower is better
    pub score: f64,
}

/// Free-space model of the active sheet.
pub trait SheetLayout {
    /// Discards all placements, the full sheet becomes available again
    fn reset(&mut self);

    /// Finds a position for a footprint of `length` x `width`, without modifying the layout
    fn find(&self, length: f64, width: f64) -> Option<Position>;

    /// Occupies the footprint at a position previously returned by [`SheetLayout::find`]
    fn commit(&mut self, position: &Position, length: f64, width: f64);
}
