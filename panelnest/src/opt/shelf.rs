use crate::entities::SheetSize;
use crate::opt::{Position, SheetLayout};
use crate::util::FPA;

const SLOT_CURRENT_ROW: usize = 0;
const SLOT_NEXT_ROW: usize = 1;

/// Coarse row-by-row walk over a sheet.
/// Parts are laid out left to right along the length of the sheet.
/// Once a part no longer fits in the current row, a new row is started below the tallest part of the current one.
/// There is no search for free space: gaps left behind are never revisited.
#[derive(Clone, Debug)]
pub struct ShelfSheet {
    sheet: SheetSize,
    cursor_x: f64,
    cursor_y: f64,
    /// Extent of the tallest part in the current row, along the width of the sheet
    row_width: f64,
}

impl ShelfSheet {
    pub fn new(sheet: SheetSize) -> Self {
        ShelfSheet {
            sheet,
            cursor_x: 0.0,
            cursor_y: 0.0,
            row_width: 0.0,
        }
    }
}

impl SheetLayout for ShelfSheet {
    fn reset(&mut self) {
        self.cursor_x = 0.0;
        self.cursor_y = 0.0;
        self.row_width = 0.0;
    }

    fn find(&self, length: f64, width: f64) -> Option<Position> {
        let fits_length = |x: f64| FPA(x + length) <= FPA(self.sheet.length);
        let fits_width = |y: f64| FPA(y + width) <= FPA(self.sheet.width);

        if fits_length(self.cursor_x) && fits_width(self.cursor_y) {
            return Some(Position {
                x: self.cursor_x,
                y: self.cursor_y,
                slot: SLOT_CURRENT_ROW,
                score: 0.0,
            });
        }
        let next_row_y = self.cursor_y + self.row_width;
        match fits_length(0.0) && fits_width(next_row_y) {
            true => Some(Position {
                x: 0.0,
                y: next_row_y,
                slot: SLOT_NEXT_ROW,
                score: 1.0,
            }),
            false => None,
        }
    }

    fn commit(&mut self, position: &Position, length: f64, width: f64) {
        if position.slot == SLOT_NEXT_ROW {
            self.cursor_y += self.row_width;
            self.cursor_x = 0.0;
            self.row_width = 0.0;
        }
        self.cursor_x += length;
        self.row_width = f64::max(self.row_width, width);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn walks_rows_left_to_right() {
        let mut shelf = ShelfSheet::new(SheetSize::try_new(1000.0, 500.0).unwrap());
        let mut origins = vec![];
        for (l, w) in [(400.0, 200.0), (400.0, 100.0), (400.0, 150.0), (900.0, 150.0)] {
            let pos = shelf.find(l, w).unwrap();
            shelf.commit(&pos, l, w);
            origins.push((pos.x, pos.y));
        }
        assert_eq!(
            origins,
            vec![(0.0, 0.0), (400.0, 0.0), (0.0, 200.0), (0.0, 350.0)]
        );
        //row at y=350 is 150 wide, the sheet ends at 500
        assert!(shelf.find(100.0, 1.0).is_some());
        assert!(shelf.find(950.0, 1.0).is_none());
    }

    #[test]
    fn rejects_parts_larger_than_sheet() {
        let shelf = ShelfSheet::new(SheetSize::STANDARD);
        assert!(shelf.find(3000.0, 100.0).is_none());
        assert!(shelf.find(100.0, 1300.0).is_none());
    }
}
