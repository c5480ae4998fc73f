/// Tolerance used when deciding whether an item exactly fills a free region.
pub const EPSILON: f64 = 0.000_001;

#[inline]
pub fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

/// An axis-aligned rectangle. `(x, y)` is the lower-left corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    #[inline]
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    #[inline]
    pub fn pos(&self) -> (f64, f64) {
        (self.x, self.y)
    }

    #[inline]
    pub fn size(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    #[inline]
    pub fn max(&self) -> (f64, f64) {
        (self.x + self.width, self.y + self.height)
    }

    /// Grows the rectangle away from its origin by `margin` in both
    /// dimensions. This is the region a placed item reserves in the canvas.
    #[inline]
    pub fn inflate(&self, margin: f64) -> Rect {
        Rect::new(self.x, self.y, self.width + margin, self.height + margin)
    }

    /// Whether `other` lies entirely inside this rectangle, allowing for
    /// floating point error at the edges.
    pub fn contains(&self, other: &Rect) -> bool {
        let (max_x, max_y) = self.max();
        let (other_max_x, other_max_y) = other.max();

        other.x >= self.x - EPSILON
            && other.y >= self.y - EPSILON
            && other_max_x <= max_x + EPSILON
            && other_max_y <= max_y + EPSILON
    }

    /// Whether the interiors of the two rectangles overlap. Rectangles that
    /// only share an edge do not intersect.
    pub fn intersects(&self, other: &Rect) -> bool {
        let (max_x, max_y) = self.max();
        let (other_max_x, other_max_y) = other.max();

        let x_overlap = self.x < other_max_x - EPSILON && other.x < max_x - EPSILON;
        let y_overlap = self.y < other_max_y - EPSILON && other.y < max_y - EPSILON;

        x_overlap && y_overlap
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn shared_edge_is_not_intersection() {
        let left = Rect::new(0.0, 0.0, 4.0, 4.0);
        let right = Rect::new(4.0, 0.0, 4.0, 4.0);

        assert!(!left.intersects(&right));
        assert!(!right.intersects(&left));
    }

    #[test]
    fn overlapping_corner() {
        let a = Rect::new(0.0, 0.0, 4.0, 4.0);
        let b = Rect::new(3.0, 3.0, 4.0, 4.0);

        assert!(a.intersects(&b));
        assert!(b.intersects(&a));
    }

    #[test]
    fn contains_self_and_inner() {
        let outer = Rect::new(0.0, 0.0, 8.0, 8.0);

        assert!(outer.contains(&outer));
        assert!(outer.contains(&Rect::new(2.0, 2.0, 6.0, 6.0)));
        assert!(!outer.contains(&Rect::new(2.0, 2.0, 6.5, 6.0)));
    }

    #[test]
    fn inflate_keeps_origin() {
        let rect = Rect::new(1.0, 2.0, 3.0, 4.0).inflate(1.0);

        assert_eq!(rect, Rect::new(1.0, 2.0, 4.0, 5.0));
        assert_eq!(rect.max(), (5.0, 7.0));
    }

    #[test]
    fn approx_eq_tolerance() {
        assert!(approx_eq(1.0, 1.0 + EPSILON / 2.0));
        assert!(!approx_eq(1.0, 1.0 + EPSILON * 2.0));
    }
}
