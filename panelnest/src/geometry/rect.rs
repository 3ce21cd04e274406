use crate::util::FPA;
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle in sheet-local coordinates.
/// `length` extends along the x-axis (the long axis of the sheet), `width` along the y-axis.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub length: f64,
    pub width: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, length: f64, width: f64) -> Self {
        Rect {
            x,
            y,
            length,
            width,
        }
    }

    pub fn x_max(&self) -> f64 {
        self.x + self.length
    }

    pub fn y_max(&self) -> f64 {
        self.y + self.width
    }

    pub fn area(&self) -> f64 {
        self.length * self.width
    }

    /// Returns true if a part of `length` x `width` fits inside `self` without rotation.
    #[inline(always)]
    pub fn fits(&self, length: f64, width: f64) -> bool {
        FPA(self.length) >= FPA(length) && FPA(self.width) >= FPA(width)
    }

    /// Returns true if `other` lies entirely within `self` (edges may touch).
    pub fn contains(&self, other: &Rect) -> bool {
        FPA(self.x) <= FPA(other.x)
            && FPA(self.y) <= FPA(other.y)
            && FPA(self.x_max()) >= FPA(other.x_max())
            && FPA(self.y_max()) >= FPA(other.y_max())
    }

    /// Returns true if the interiors of `self` and `other` share a region of nonzero area.
    /// Rectangles that only touch along an edge do not overlap.
    pub fn overlaps(&self, other: &Rect) -> bool {
        FPA(self.x) < FPA(other.x_max())
            && FPA(other.x) < FPA(self.x_max())
            && FPA(self.y) < FPA(other.y_max())
            && FPA(other.y) < FPA(self.y_max())
    }

    /// Returns the maximal rectangles covering `self` minus `other`.
    /// The pieces may overlap each other; together they cover exactly the part of `self` outside `other`.
    /// If the two do not overlap, `self` is returned unchanged.
    pub fn subtract(&self, other: &Rect) -> Vec<Rect> {
        if !self.overlaps(other) {
            return vec![*self];
        }
        let mut pieces = Vec::with_capacity(4);
        //left of other
        if FPA(other.x) > FPA(self.x) {
            pieces.push(Rect::new(self.x, self.y, other.x - self.x, self.width));
        }
        //right of other
        if FPA(other.x_max()) < FPA(self.x_max()) {
            pieces.push(Rect::new(
                other.x_max(),
                self.y,
                self.x_max() - other.x_max(),
                self.width,
            ));
        }
        //above other
        if FPA(other.y) > FPA(self.y) {
            pieces.push(Rect::new(self.x, self.y, self.length, other.y - self.y));
        }
        //below other
        if FPA(other.y_max()) < FPA(self.y_max()) {
            pieces.push(Rect::new(
                self.x,
                other.y_max(),
                self.length,
                self.y_max() - other.y_max(),
            ));
        }
        pieces
    }
}

#[cfg(test)]
mod tests {
    use super::Rect;

    #[test]
    fn touching_rects_do_not_overlap() {
        let a = Rect::new(0.0, 0.0, 600.0, 400.0);
        let b = Rect::new(600.0, 0.0, 600.0, 400.0);
        let c = Rect::new(0.0, 400.0, 600.0, 400.0);
        assert!(!a.overlaps(&b));
        assert!(!a.overlaps(&c));
        assert!(a.overlaps(&Rect::new(599.0, 399.0, 10.0, 10.0)));
    }

    #[test]
    fn containment_includes_equal_rects() {
        let a = Rect::new(0.0, 0.0, 2440.0, 1220.0);
        assert!(a.contains(&a));
        assert!(a.contains(&Rect::new(100.0, 100.0, 200.0, 200.0)));
        assert!(!a.contains(&Rect::new(2400.0, 0.0, 100.0, 100.0)));
    }

    #[test]
    fn subtract_corner_leaves_two_maximal_pieces() {
        let free = Rect::new(0.0, 0.0, 1000.0, 500.0);
        let part = Rect::new(0.0, 0.0, 300.0, 200.0);
        let pieces = free.subtract(&part);
        assert_eq!(
            pieces,
            vec![
                Rect::new(300.0, 0.0, 700.0, 500.0),
                Rect::new(0.0, 200.0, 1000.0, 300.0)
            ]
        );
    }

    #[test]
    fn subtract_interior_leaves_four_pieces() {
        let free = Rect::new(0.0, 0.0, 100.0, 100.0);
        let hole = Rect::new(40.0, 40.0, 20.0, 20.0);
        let pieces = free.subtract(&hole);
        assert_eq!(pieces.len(), 4);
        assert!(pieces.iter().all(|p| !p.overlaps(&hole)));
        assert!(pieces.iter().all(|p| free.contains(p)));
    }

    #[test]
    fn subtract_disjoint_is_identity() {
        let free = Rect::new(0.0, 0.0, 100.0, 100.0);
        let other = Rect::new(100.0, 0.0, 50.0, 50.0);
        assert_eq!(free.subtract(&other), vec![free]);
    }
}
