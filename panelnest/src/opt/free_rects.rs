use std::cmp::Reverse;

use ordered_float::OrderedFloat;

use crate::entities::SheetSize;
use crate::geometry::Rect;
use crate::opt::search::best_short_side_fit;
use crate::opt::{Position, SheetLayout};
use crate::util::FPA;

/// The active sheet, modeled as a set of free rectangles.
/// Every point of the sheet not covered by a placed part is covered by at least one free rectangle,
/// and no free rectangle covers a placed part.
/// Free rectangles may overlap each other, only those fully contained in another are pruned.
#[derive(Clone, Debug)]
pub struct FreeRectSheet {
    sheet: SheetSize,
    free_rects: Vec<Rect>,
}

impl FreeRectSheet {
    pub fn new(sheet: SheetSize) -> Self {
        FreeRectSheet {
            sheet,
            free_rects: vec![sheet.rect()],
        }
    }

    pub fn free_rects(&self) -> &[Rect] {
        &self.free_rects
    }

    /// Occupies a `part_length` x `part_width` footprint at (`x`, `y`) inside the free rectangle at index `rect_idx`.
    ///
    /// The chosen rectangle is replaced by a guillotine-style split: a strip to the right of the part at the
    /// full width of the rectangle and a strip below the part at the full length of the rectangle.
    /// Other free rectangles that intersect the part are trimmed to the maximal pieces outside of it.
    pub fn split(&mut self, rect_idx: usize, x: f64, y: f64, part_length: f64, part_width: f64) {
        let rect = self.free_rects.remove(rect_idx);
        let part = Rect::new(x, y, part_length, part_width);

        let mut free_rects = Vec::with_capacity(self.free_rects.len() + 2);
        for fr in self.free_rects.drain(..) {
            match fr.overlaps(&part) {
                false => free_rects.push(fr),
                true => free_rects.extend(fr.subtract(&part).into_iter().filter(has_area)),
            }
        }

        //strip to the right of the part
        if FPA(rect.x_max()) > FPA(part.x_max()) {
            free_rects.push(Rect::new(
                part.x_max(),
                rect.y,
                rect.x_max() - part.x_max(),
                rect.width,
            ));
        }
        //strip below the part
        if FPA(rect.y_max()) > FPA(part.y_max()) {
            free_rects.push(Rect::new(
                rect.x,
                part.y_max(),
                rect.length,
                rect.y_max() - part.y_max(),
            ));
        }

        self.free_rects = free_rects;
    }

    /// Removes every free rectangle fully contained within another one.
    /// Of two identical rectangles, the first one (after sorting by descending area) is kept.
    pub fn prune(&mut self) {
        self.free_rects
            .sort_by_cached_key(|r| Reverse(OrderedFloat(r.area())));

        let mut kept: Vec<Rect> = Vec::with_capacity(self.free_rects.len());
        for fr in self.free_rects.drain(..) {
            //sorted by area, so only earlier rectangles can contain this one
            if !kept.iter().any(|k| k.contains(&fr)) {
                kept.push(fr);
            }
        }
        self.free_rects = kept;
    }
}

impl SheetLayout for FreeRectSheet {
    fn reset(&mut self) {
        self.free_rects.clear();
        self.free_rects.push(self.sheet.rect());
    }

    fn find(&self, length: f64, width: f64) -> Option<Position> {
        best_short_side_fit(&self.free_rects, length, width)
    }

    fn commit(&mut self, position: &Position, length: f64, width: f64) {
        self.split(position.slot, position.x, position.y, length, width);
        self.prune();
    }
}

fn has_area(r: &Rect) -> bool {
    FPA(r.length) > FPA(0.0) && FPA(r.width) > FPA(0.0)
}
