use crate::entities::Grain;
use crate::geometry::{Orientation, Rect};
use crate::opt::grain;
use crate::opt::{Position, SheetLayout};

/// Searches the active sheet for a position of a part with dimensions `length` x `width`
/// placed in `orientation`.
/// Returns `None` without searching if the orientation is illegal for `grain`.
pub fn find(
    layout: &impl SheetLayout,
    length: f64,
    width: f64,
    grain: Grain,
    orientation: Orientation,
) -> Option<Position> {
    if !grain::is_legal(grain, orientation) {
        return None;
    }
    let (length, width) = orientation.apply(length, width);
    layout.find(length, width)
}

/// Best Short Side Fit: among the rectangles which can hold a `length` x `width` footprint,
/// selects the one leaving the smallest leftover along its shorter side.
/// Ties resolve to the first rectangle encountered.
/// The part is placed flush against the top-left corner of the winning rectangle.
pub fn best_short_side_fit(free_rects: &[Rect], length: f64, width: f64) -> Option<Position> {
    let mut best: Option<Position> = None;
    for (i, rect) in free_rects.iter().enumerate() {
        if !rect.fits(length, width) {
            continue;
        }
        let score = f64::min(rect.length - length, rect.width - width);
        let better = match &best {
            Some(b) => score < b.score,
            None => true,
        };
        if better {
            best = Some(Position {
                x: rect.x,
                y: rect.y,
                slot: i,
                score,
            });
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::SheetSize;
    use crate::opt::free_rects::FreeRectSheet;

    #[test]
    fn prefers_smallest_short_side_leftover() {
        let free = [
            Rect::new(0.0, 0.0, 1000.0, 1000.0),
            Rect::new(1000.0, 0.0, 620.0, 2000.0),
            Rect::new(0.0, 1000.0, 900.0, 410.0),
        ];
        let pos = best_short_side_fit(&free, 600.0, 400.0).unwrap();
        assert_eq!(pos.slot, 2);
        assert_eq!((pos.x, pos.y), (0.0, 1000.0));
        assert_eq!(pos.score, 10.0);
    }

    #[test]
    fn ties_resolve_to_first_rect() {
        let free = [
            Rect::new(0.0, 0.0, 700.0, 500.0),
            Rect::new(700.0, 0.0, 700.0, 500.0),
        ];
        let pos = best_short_side_fit(&free, 600.0, 400.0).unwrap();
        assert_eq!(pos.slot, 0);
    }

    #[test]
    fn nothing_fits() {
        let free = [Rect::new(0.0, 0.0, 500.0, 500.0)];
        assert!(best_short_side_fit(&free, 600.0, 100.0).is_none());
        assert!(best_short_side_fit(&[], 1.0, 1.0).is_none());
    }

    #[test]
    fn illegal_orientation_is_rejected_without_search() {
        let layout = FreeRectSheet::new(SheetSize::STANDARD);
        assert!(find(&layout, 2440.0, 100.0, Grain::Length, Orientation::Rotated).is_none());
        assert!(find(&layout, 2440.0, 100.0, Grain::Length, Orientation::Normal).is_some());
        assert!(find(&layout, 100.0, 1220.0, Grain::Width, Orientation::Normal).is_none());
        assert!(find(&layout, 100.0, 1220.0, Grain::Width, Orientation::Rotated).is_some());
    }

    #[test]
    fn rotation_swaps_the_footprint() {
        let layout = FreeRectSheet::new(SheetSize::STANDARD);
        //1300 exceeds the sheet width unless rotated
        assert!(find(&layout, 600.0, 1300.0, Grain::None, Orientation::Normal).is_none());
        assert!(find(&layout, 600.0, 1300.0, Grain::None, Orientation::Rotated).is_some());
    }
}
