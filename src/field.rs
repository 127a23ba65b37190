//! Procedural layout of soil particles inside the soil band.
//!
//! Each soil type maps to a [`GrainPolicy`] describing the particle shape and
//! how the placement cursor advances along a row and between rows. The
//! synthesizer sweeps the band row by row, left to right, and stops a row at
//! the first particle that would cross the right edge.

use rand::Rng;
use tracing::debug;

use crate::geometry::{point, Point, Rect};
use crate::soil::SoilType;
use crate::surface::{ShapeId, Surface};

/// Footprint the placement cursor itself occupies when advancing.
const CURSOR: f64 = 1.0;

/// A soil particle drawn on a surface.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Particle {
    /// Shape handle owned by the surface.
    pub shape: ShapeId,
    /// Top-left anchor after the last accepted move.
    pub position: Point,
    /// Nominal width of the particle.
    pub width: f64,
    /// Nominal height of the particle.
    pub height: f64,
}

impl Particle {
    /// Bounding box at the recorded position.
    #[must_use]
    pub fn bounds(&self) -> Rect {
        Rect::from_origin(self.position, self.width, self.height)
    }
}

/// Particles of one soil, in creation (row-major) order.
#[derive(Clone, Debug, PartialEq)]
pub struct ParticleField {
    /// Soil the particles represent.
    soil: SoilType,
    /// Particles in creation order.
    particles: Vec<Particle>,
}

impl ParticleField {
    /// Wrap an existing particle sequence.
    #[must_use]
    pub fn new(soil: SoilType, particles: Vec<Particle>) -> Self {
        Self { soil, particles }
    }

    /// Soil the particles represent.
    #[must_use]
    pub fn soil(&self) -> SoilType {
        self.soil
    }

    /// Number of particles.
    #[must_use]
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    /// Whether the field has no particles.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Particles in creation order.
    #[must_use]
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Mutable access to a single particle.
    pub fn get_mut(&mut self, index: usize) -> Option<&mut Particle> {
        self.particles.get_mut(index)
    }

    /// Shape handles of every particle.
    pub fn shapes(&self) -> impl Iterator<Item = ShapeId> + '_ {
        self.particles.iter().map(|particle| particle.shape)
    }
}

/// Spacing drawn for each step of the cursor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Gap {
    /// Always the same spacing.
    Fixed(i32),
    /// Uniformly drawn from the closed range.
    Uniform(i32, i32),
}

impl Gap {
    /// Draw a spacing.
    pub fn sample<R: Rng + ?Sized>(self, rng: &mut R) -> i32 {
        match self {
            Gap::Fixed(gap) => gap,
            Gap::Uniform(low, high) => rng.gen_range(low..=high),
        }
    }
}

/// Shape of the particles of one soil.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Grain {
    /// Round grain of a fixed diameter.
    Circle {
        /// Diameter.
        size: i32,
    },
    /// Flat ellipse of random width.
    ThinEllipse {
        /// Narrowest width.
        min_width: i32,
        /// Widest width.
        max_width: i32,
        /// Fixed height.
        height: i32,
    },
    /// Fixed-size platelet.
    Rectangle {
        /// Width.
        width: i32,
        /// Height.
        height: i32,
    },
    /// Irregular six-sided stone.
    Stone,
}

impl Grain {
    /// Tallest particle this grain can produce.
    #[must_use]
    pub const fn max_height(self) -> i32 {
        match self {
            Grain::Circle { size } => size,
            Grain::ThinEllipse { height, .. } | Grain::Rectangle { height, .. } => height,
            Grain::Stone => 15,
        }
    }

    /// Draw the outline of a particle anchored at `origin`.
    fn sample<R: Rng + ?Sized>(self, origin: Point, rng: &mut R) -> Outline {
        match self {
            Grain::Circle { size } => {
                Outline::Oval(Rect::from_origin(origin, f64::from(size), f64::from(size)))
            }
            Grain::ThinEllipse {
                min_width,
                max_width,
                height,
            } => {
                let width = rng.gen_range(min_width..=max_width);
                Outline::Oval(Rect::from_origin(
                    origin,
                    f64::from(width),
                    f64::from(height),
                ))
            }
            Grain::Rectangle { width, height } => Outline::Rectangle(Rect::from_origin(
                origin,
                f64::from(width),
                f64::from(height),
            )),
            Grain::Stone => {
                let size = f64::from(rng.gen_range(9..=15));
                let top_right = f64::from(rng.gen_range(7..=10));
                let middle_right = f64::from(rng.gen_range(11..=15));
                let bottom_left = f64::from(rng.gen_range(3..=5));
                let bottom_right = f64::from(rng.gen_range(7..=10));
                let Point { x, y } = origin;
                Outline::Polygon(vec![
                    point(x + 3.0, y),
                    point(x + top_right, y + 2.0),
                    point(x + middle_right, y + size / 2.0),
                    point(x + bottom_right, y + size),
                    point(x + bottom_left, y + size),
                    point(x, y + size / 2.0),
                ])
            }
        }
    }
}

/// A sampled particle outline before it is drawn.
enum Outline {
    /// Ellipse inscribed in the box.
    Oval(Rect),
    /// Rectangle covering the box.
    Rectangle(Rect),
    /// Closed polygon.
    Polygon(Vec<Point>),
}

impl Outline {
    /// Bounding box of the outline.
    fn bounds(&self) -> Rect {
        match self {
            Outline::Oval(bounds) | Outline::Rectangle(bounds) => *bounds,
            Outline::Polygon(vertices) => {
                Rect::enclosing(vertices).unwrap_or(Rect::new(0.0, 0.0, 0.0, 0.0))
            }
        }
    }
}

/// How the cursor moves right after a particle is placed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Advance {
    /// Step by the cursor footprint plus a gap.
    Cursor(Gap),
    /// Jump past the particle's rightmost vertex plus a gap.
    PastRightmostVertex(Gap),
}

/// How the cursor moves down between rows.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RowStep {
    /// Step by the cursor footprint plus a gap.
    Cursor(Gap),
    /// Step by a fixed base plus the last horizontal gap of the row.
    CarryLastGap {
        /// Fixed part of the step.
        base: i32,
    },
}

/// Layout rules for the particles of one soil.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GrainPolicy {
    /// Particle shape.
    pub grain: Grain,
    /// Horizontal cursor movement.
    pub advance: Advance,
    /// Vertical cursor movement.
    pub row_step: RowStep,
    /// Starting x of every row after the first.
    pub row_start: Gap,
    /// Fill color.
    pub fill: &'static str,
    /// Outline color for polygons.
    pub outline: &'static str,
}

impl GrainPolicy {
    /// Layout rules for `soil`.
    #[must_use]
    pub const fn for_soil(soil: SoilType) -> Self {
        match soil {
            SoilType::LooseSand => Self::circles(Gap::Uniform(1, 25), Gap::Fixed(1), "brown"),
            SoilType::MediumDenseSand => {
                Self::circles(Gap::Uniform(10, 25), Gap::Fixed(5), "black")
            }
            SoilType::DenseSand => Self::circles(Gap::Fixed(5), Gap::Fixed(5), "brown"),
            SoilType::SoftClay => GrainPolicy {
                grain: Grain::ThinEllipse {
                    min_width: 3,
                    max_width: 10,
                    height: 1,
                },
                advance: Advance::Cursor(Gap::Uniform(1, 20)),
                row_step: RowStep::Cursor(Gap::Fixed(15)),
                row_start: Gap::Fixed(0),
                fill: "brown",
                outline: "brown",
            },
            SoilType::StiffClay => GrainPolicy {
                grain: Grain::Rectangle {
                    width: 6,
                    height: 3,
                },
                advance: Advance::Cursor(Gap::Uniform(1, 10)),
                row_step: RowStep::Cursor(Gap::Uniform(7, 10)),
                row_start: Gap::Uniform(0, 5),
                fill: "gray",
                outline: "gray",
            },
            SoilType::SiltySand => GrainPolicy {
                grain: Grain::ThinEllipse {
                    min_width: 1,
                    max_width: 7,
                    height: 1,
                },
                advance: Advance::Cursor(Gap::Uniform(1, 20)),
                row_step: RowStep::Cursor(Gap::Fixed(10)),
                row_start: Gap::Uniform(0, 5),
                fill: "black",
                outline: "black",
            },
            SoilType::Gravel => GrainPolicy {
                grain: Grain::Stone,
                advance: Advance::PastRightmostVertex(Gap::Uniform(0, 3)),
                row_step: RowStep::CarryLastGap { base: 10 },
                row_start: Gap::Uniform(0, 3),
                fill: "gray",
                outline: "black",
            },
        }
    }

    /// Round unit grains laid out on a regular or jittered grid.
    const fn circles(gap: Gap, row_gap: Gap, color: &'static str) -> Self {
        GrainPolicy {
            grain: Grain::Circle { size: 1 },
            advance: Advance::Cursor(gap),
            row_step: RowStep::Cursor(row_gap),
            row_start: Gap::Fixed(0),
            fill: color,
            outline: color,
        }
    }
}

/// Lay out the particles of `soil` in the band `[0, width] × [band_top, height]`.
///
/// Every particle's bounding box lies inside the band when it is created.
///
/// # Examples
/// ```
/// use rand::SeedableRng;
/// use rand_chacha::ChaCha8Rng;
/// use soilbed::{synthesize, Canvas, SoilType};
///
/// let mut canvas = Canvas::new(400.0, 400.0);
/// let mut rng = ChaCha8Rng::seed_from_u64(7);
/// let field = synthesize(&mut canvas, SoilType::DenseSand, 400.0, 300.0, 400.0, &mut rng);
/// assert_eq!(field.len(), 67 * 17);
/// ```
pub fn synthesize<S, R>(
    surface: &mut S,
    soil: SoilType,
    width: f64,
    band_top: f64,
    height: f64,
    rng: &mut R,
) -> ParticleField
where
    S: Surface + ?Sized,
    R: Rng + ?Sized,
{
    let policy = GrainPolicy::for_soil(soil);
    let row_height = f64::from(policy.grain.max_height());
    let mut particles = Vec::new();
    let mut cursor = point(0.0, band_top);
    let mut last_gap = 0;

    while cursor.y + row_height <= height {
        loop {
            let outline = policy.grain.sample(cursor, rng);
            let bounds = outline.bounds();
            if bounds.max.x > width {
                break;
            }
            let shape = match &outline {
                Outline::Oval(bounds) => surface.create_oval(*bounds, policy.fill),
                Outline::Rectangle(bounds) => surface.create_rectangle(*bounds, policy.fill),
                Outline::Polygon(vertices) => {
                    surface.create_polygon(vertices, policy.fill, policy.outline)
                }
            };
            particles.push(Particle {
                shape,
                position: cursor,
                width: bounds.width(),
                height: bounds.height(),
            });
            cursor.x = match policy.advance {
                Advance::Cursor(gap) => {
                    last_gap = gap.sample(rng);
                    cursor.x + CURSOR + f64::from(last_gap)
                }
                Advance::PastRightmostVertex(gap) => {
                    last_gap = gap.sample(rng);
                    bounds.max.x + f64::from(last_gap)
                }
            };
        }
        cursor.y += match policy.row_step {
            RowStep::Cursor(gap) => CURSOR + f64::from(gap.sample(rng)),
            RowStep::CarryLastGap { base } => f64::from(base + last_gap),
        };
        cursor.x = f64::from(policy.row_start.sample(rng));
    }

    debug!(soil = soil.code(), particles = particles.len(), "synthesized particle field");
    ParticleField::new(soil, particles)
}
