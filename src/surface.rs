//! Drawing-surface capability and an in-memory shape registry.
//!
//! Everything that draws or animates receives a `&mut impl Surface` so the
//! same code can target the in-memory [`Canvas`] used by the binary and tests,
//! or any other backend that can answer bounding-box queries.

use serde::{Deserialize, Serialize};

use crate::errors::SurfaceError;
use crate::geometry::{Point, Rect};

/// Handle to a shape owned by a [`Surface`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ShapeId(usize);

impl ShapeId {
    /// Create a handle from a raw registry index.
    #[must_use]
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    /// Position of the shape in its surface's registry.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

/// Reference point of a text label.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Anchor {
    /// The label is centred on its position.
    #[default]
    Center,
    /// The label's top-left corner sits on its position.
    NorthWest,
}

/// Appearance of a text label.
#[derive(Clone, Debug, PartialEq)]
pub struct TextStyle {
    /// Fill color name.
    pub color: String,
    /// Which point of the label the position refers to.
    pub anchor: Anchor,
    /// Font description, e.g. `"Arial 20"`.
    pub font: String,
}

impl TextStyle {
    /// Font size parsed from the last token of the font description.
    #[must_use]
    pub fn font_size(&self) -> f64 {
        self.font
            .split_whitespace()
            .last()
            .and_then(|size| size.parse().ok())
            .unwrap_or(12.0)
    }
}

/// A 2-D drawing surface that owns shapes and answers geometric queries.
pub trait Surface {
    /// Width of the drawable area.
    fn width(&self) -> f64;

    /// Height of the drawable area.
    fn height(&self) -> f64;

    /// Create an ellipse inscribed in `bounds`.
    fn create_oval(&mut self, bounds: Rect, color: &str) -> ShapeId;

    /// Create a filled rectangle covering `bounds`.
    fn create_rectangle(&mut self, bounds: Rect, color: &str) -> ShapeId;

    /// Create a closed polygon through `vertices`.
    fn create_polygon(&mut self, vertices: &[Point], fill: &str, outline: &str) -> ShapeId;

    /// Create a text label at `position`.
    fn create_text(&mut self, position: Point, text: &str, style: &TextStyle) -> ShapeId;

    /// Move a shape by a relative offset.
    ///
    /// # Errors
    ///
    /// Returns [`SurfaceError::UnknownShape`] when `shape` is not on this surface.
    fn move_shape(&mut self, shape: ShapeId, dx: f64, dy: f64) -> Result<(), SurfaceError>;

    /// Bounding box of a shape.
    fn bounds(&self, shape: ShapeId) -> Option<Rect>;

    /// Top edge of a shape.
    fn top_y(&self, shape: ShapeId) -> Option<f64> {
        self.bounds(shape).map(|bounds| bounds.min.y)
    }

    /// Left edge of a shape.
    fn left_x(&self, shape: ShapeId) -> Option<f64> {
        self.bounds(shape).map(|bounds| bounds.min.x)
    }

    /// Every shape whose bounding box overlaps `region`, in creation order.
    fn find_overlapping(&self, region: &Rect) -> Vec<ShapeId>;
}

/// Geometry carried by a shape on a [`Canvas`].
#[derive(Clone, Debug, PartialEq)]
pub enum ShapeKind {
    /// Ellipse inscribed in the shape bounds.
    Oval,
    /// Rectangle covering the shape bounds.
    Rectangle,
    /// Closed polygon.
    Polygon(Vec<Point>),
    /// Text label.
    Text {
        /// Label contents.
        text: String,
        /// Position the label was created at.
        position: Point,
        /// Label appearance.
        style: TextStyle,
    },
}

/// A shape stored on a [`Canvas`].
#[derive(Clone, Debug, PartialEq)]
pub struct Shape {
    /// What kind of primitive this is.
    pub kind: ShapeKind,
    /// Current bounding box.
    pub bounds: Rect,
    /// Fill color name.
    pub fill: String,
    /// Optional outline color name.
    pub outline: Option<String>,
}

/// In-memory drawing surface that keeps every shape and its bounding box.
///
/// # Examples
/// ```
/// use soilbed::{Canvas, Rect, Surface};
///
/// let mut canvas = Canvas::new(400.0, 400.0);
/// let grain = canvas.create_oval(Rect::new(0.0, 300.0, 1.0, 301.0), "brown");
/// canvas.move_shape(grain, 1.0, 2.0).expect("grain exists");
/// assert_eq!(canvas.top_y(grain), Some(302.0));
/// assert_eq!(canvas.find_overlapping(&Rect::new(0.0, 0.0, 5.0, 305.0)), vec![grain]);
/// ```
#[derive(Clone, Debug)]
pub struct Canvas {
    /// Width of the drawable area.
    width: f64,
    /// Height of the drawable area.
    height: f64,
    /// Shape registry indexed by [`ShapeId`].
    shapes: Vec<Shape>,
}

impl Canvas {
    /// Create an empty canvas.
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            shapes: Vec::new(),
        }
    }

    /// Number of shapes on the canvas.
    #[must_use]
    pub fn shape_count(&self) -> usize {
        self.shapes.len()
    }

    /// Look up a shape by handle.
    #[must_use]
    pub fn shape(&self, shape: ShapeId) -> Option<&Shape> {
        self.shapes.get(shape.index())
    }

    /// Iterate over every shape in creation (stacking) order.
    pub fn shapes(&self) -> impl Iterator<Item = (ShapeId, &Shape)> {
        self.shapes
            .iter()
            .enumerate()
            .map(|(index, shape)| (ShapeId::new(index), shape))
    }

    /// Append a shape and return its handle.
    fn push(&mut self, shape: Shape) -> ShapeId {
        self.shapes.push(shape);
        ShapeId::new(self.shapes.len() - 1)
    }
}

impl Surface for Canvas {
    fn width(&self) -> f64 {
        self.width
    }

    fn height(&self) -> f64 {
        self.height
    }

    fn create_oval(&mut self, bounds: Rect, color: &str) -> ShapeId {
        self.push(Shape {
            kind: ShapeKind::Oval,
            bounds,
            fill: color.to_owned(),
            outline: None,
        })
    }

    fn create_rectangle(&mut self, bounds: Rect, color: &str) -> ShapeId {
        self.push(Shape {
            kind: ShapeKind::Rectangle,
            bounds,
            fill: color.to_owned(),
            outline: None,
        })
    }

    fn create_polygon(&mut self, vertices: &[Point], fill: &str, outline: &str) -> ShapeId {
        let bounds = Rect::enclosing(vertices).unwrap_or(Rect::new(0.0, 0.0, 0.0, 0.0));
        self.push(Shape {
            kind: ShapeKind::Polygon(vertices.to_vec()),
            bounds,
            fill: fill.to_owned(),
            outline: Some(outline.to_owned()),
        })
    }

    fn create_text(&mut self, position: Point, text: &str, style: &TextStyle) -> ShapeId {
        // Rough glyph metrics are enough for overlap queries.
        let size = style.font_size();
        let width = text.chars().count() as f64 * size * 0.6;
        let origin = match style.anchor {
            Anchor::Center => position.offset(-width / 2.0, -size / 2.0),
            Anchor::NorthWest => position,
        };
        self.push(Shape {
            kind: ShapeKind::Text {
                text: text.to_owned(),
                position,
                style: style.clone(),
            },
            bounds: Rect::from_origin(origin, width, size),
            fill: style.color.clone(),
            outline: None,
        })
    }

    fn move_shape(&mut self, shape: ShapeId, dx: f64, dy: f64) -> Result<(), SurfaceError> {
        let entry = self
            .shapes
            .get_mut(shape.index())
            .ok_or(SurfaceError::UnknownShape(shape))?;
        entry.bounds = entry.bounds.translated(dx, dy);
        match &mut entry.kind {
            ShapeKind::Polygon(vertices) => {
                for vertex in vertices.iter_mut() {
                    *vertex = vertex.offset(dx, dy);
                }
            }
            ShapeKind::Text { position, .. } => *position = position.offset(dx, dy),
            ShapeKind::Oval | ShapeKind::Rectangle => {}
        }
        Ok(())
    }

    fn bounds(&self, shape: ShapeId) -> Option<Rect> {
        self.shapes.get(shape.index()).map(|shape| shape.bounds)
    }

    fn find_overlapping(&self, region: &Rect) -> Vec<ShapeId> {
        self.shapes()
            .filter(|(_, shape)| shape.bounds.overlaps(region))
            .map(|(id, _)| id)
            .collect()
    }
}
