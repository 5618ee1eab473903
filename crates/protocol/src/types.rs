use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned rectangle in layout pixels, origin at the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self { x, y, w, h }
    }

    pub fn right(&self) -> f64 {
        self.x + self.w
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.h
    }

    pub fn center_y(&self) -> f64 {
        self.y + self.h / 2.0
    }

    /// Right edge midpoint, where outgoing arrows leave a bar.
    pub fn right_anchor(&self) -> Point {
        Point::new(self.right(), self.center_y())
    }

    /// Left edge midpoint, where incoming arrows enter a bar.
    pub fn left_anchor(&self) -> Point {
        Point::new(self.x, self.center_y())
    }
}

/// A one-dimensional closed interval `[start, end]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Span {
    pub start: f64,
    pub end: f64,
}

impl Span {
    /// Builds a span from two coordinates in either order.
    pub fn between(a: f64, b: f64) -> Self {
        Self {
            start: a.min(b),
            end: a.max(b),
        }
    }

    pub fn len(&self) -> f64 {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.len() <= 0.0
    }

    /// Closed-interval overlap: touching spans overlap.
    pub fn overlaps(&self, other: &Span) -> bool {
        self.start <= other.end && other.start <= self.end
    }

    pub fn union(&self, other: &Span) -> Span {
        Span {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rect_anchors_sit_on_vertical_center() {
        let r = Rect::new(10.0, 20.0, 100.0, 40.0);
        assert_eq!(r.right_anchor(), Point::new(110.0, 40.0));
        assert_eq!(r.left_anchor(), Point::new(10.0, 40.0));
        assert_eq!(r.bottom(), 60.0);
    }

    #[test]
    fn touching_spans_overlap() {
        let a = Span::between(5.0, 0.0);
        let b = Span::between(5.0, 9.0);
        assert_eq!(a.start, 0.0);
        assert!(a.overlaps(&b));
        assert!(!a.overlaps(&Span::between(5.5, 9.0)));
        assert_eq!(a.union(&b), Span::between(0.0, 9.0));
    }
}
