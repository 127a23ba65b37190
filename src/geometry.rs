//! Fundamental planar types for drawing-surface coordinates.
//!
//! Surface units grow to the right along X and downwards along Y, so a
//! particle that "settles" has an increasing Y coordinate.

use nalgebra::Vector2;

/// Position on a drawing surface measured in surface units.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    /// Distance from the left edge.
    pub x: f64,
    /// Distance from the top edge.
    pub y: f64,
}

impl Point {
    /// Create a [`Point`] with explicit coordinates.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Convert the point into an algebraic vector.
    #[must_use]
    pub fn to_vector(self) -> Vector2<f64> {
        Vector2::new(self.x, self.y)
    }

    /// Return the point shifted by `(dx, dy)`.
    #[must_use]
    pub fn offset(self, dx: f64, dy: f64) -> Self {
        (self.to_vector() + Vector2::new(dx, dy)).into()
    }
}

impl From<Vector2<f64>> for Point {
    fn from(value: Vector2<f64>) -> Self {
        Self::new(value.x, value.y)
    }
}

impl From<Point> for Vector2<f64> {
    fn from(value: Point) -> Self {
        value.to_vector()
    }
}

/// Axis-aligned bounding box.
///
/// Overlap tests treat the box as closed, so two boxes that share only an
/// edge are reported as overlapping.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    /// Top-left corner.
    pub min: Point,
    /// Bottom-right corner.
    pub max: Point,
}

impl Rect {
    /// Create a [`Rect`] from two corners, normalising their order.
    #[must_use]
    pub fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self {
            min: Point::new(x1.min(x2), y1.min(y2)),
            max: Point::new(x1.max(x2), y1.max(y2)),
        }
    }

    /// Create a [`Rect`] from its top-left corner and its size.
    #[must_use]
    pub fn from_origin(origin: Point, width: f64, height: f64) -> Self {
        Self::new(origin.x, origin.y, origin.x + width, origin.y + height)
    }

    /// Smallest box enclosing every vertex, or `None` for an empty slice.
    #[must_use]
    pub fn enclosing(vertices: &[Point]) -> Option<Self> {
        let first = vertices.first()?;
        let mut bounds = Self::new(first.x, first.y, first.x, first.y);
        for vertex in &vertices[1..] {
            bounds.min.x = bounds.min.x.min(vertex.x);
            bounds.min.y = bounds.min.y.min(vertex.y);
            bounds.max.x = bounds.max.x.max(vertex.x);
            bounds.max.y = bounds.max.y.max(vertex.y);
        }
        Some(bounds)
    }

    /// Horizontal extent.
    #[must_use]
    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    /// Vertical extent.
    #[must_use]
    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    /// Whether the two closed boxes share at least one point.
    #[must_use]
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.min.x <= other.max.x
            && other.min.x <= self.max.x
            && self.min.y <= other.max.y
            && other.min.y <= self.max.y
    }

    /// Whether `other` lies entirely inside this box.
    #[must_use]
    pub fn contains(&self, other: &Rect) -> bool {
        self.min.x <= other.min.x
            && self.min.y <= other.min.y
            && other.max.x <= self.max.x
            && other.max.y <= self.max.y
    }

    /// Return the box shifted by `(dx, dy)`.
    #[must_use]
    pub fn translated(&self, dx: f64, dy: f64) -> Self {
        Self {
            min: self.min.offset(dx, dy),
            max: self.max.offset(dx, dy),
        }
    }
}

/// Convenience helper for creating [`Point`] instances.
///
/// # Examples
/// ```
/// use soilbed::point;
///
/// let anchor = point(20.0, 70.0);
/// assert_eq!(anchor.y, 70.0);
/// ```
#[must_use]
pub const fn point(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn point_to_vector_roundtrip() {
        let anchor = Point::new(1.0, 2.0);
        let vector: Vector2<f64> = anchor.into();
        assert_eq!(vector, Vector2::new(1.0, 2.0));
        assert_eq!(Point::from(vector), anchor);
    }

    #[test]
    fn rect_normalises_corners() {
        let bounds = Rect::new(10.0, 8.0, 2.0, 4.0);
        assert_eq!(bounds.min, Point::new(2.0, 4.0));
        assert_eq!(bounds.max, Point::new(10.0, 8.0));
        assert_eq!(bounds.width(), 8.0);
        assert_eq!(bounds.height(), 4.0);
    }

    #[test]
    fn touching_boxes_overlap() {
        let left = Rect::new(0.0, 0.0, 1.0, 1.0);
        let touching = Rect::new(1.0, 0.0, 2.0, 1.0);
        let apart = Rect::new(2.0, 0.0, 3.0, 1.0);
        assert!(left.overlaps(&touching));
        assert!(!left.overlaps(&apart));
    }

    #[test]
    fn enclosing_box_spans_all_vertices() {
        let vertices = [point(3.0, 0.0), point(14.0, 6.0), point(0.0, 6.0), point(8.0, 12.0)];
        let bounds = Rect::enclosing(&vertices).expect("non-empty");
        assert_eq!(bounds, Rect::new(0.0, 0.0, 14.0, 12.0));
        assert!(Rect::enclosing(&[]).is_none());
    }
}
