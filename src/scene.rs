//! Decorative drawing around the soil bed.
//!
//! The scene is laid out for a surface of any size, with the soil band filling
//! the bottom quarter and the building standing on the band's top edge.

use std::thread;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::SurfaceError;
use crate::foundation::{FoundationKind, FoundationSpec};
use crate::geometry::{point, Point, Rect};
use crate::soil::SoilType;
use crate::surface::{Anchor, ShapeId, Surface, TextStyle};

/// Width of a cloud's envelope.
const CLOUD_WIDTH: f64 = 80.0;
/// Height of a cloud's envelope.
const CLOUD_HEIGHT: f64 = 40.0;
/// Height of the sky strip.
const SKY_HEIGHT: f64 = 120.0;
/// Surface units per metre when drawing foundations.
const FOUNDATION_SCALE: f64 = 30.0;
/// Width of the building.
const BUILDING_WIDTH: f64 = 100.0;
/// Height of one floor.
const FLOOR_HEIGHT: f64 = 70.0;

/// Dimensions of the drawing surface.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneLayout {
    /// Surface width.
    pub width: f64,
    /// Surface height.
    pub height: f64,
}

impl SceneLayout {
    /// Top edge of the soil band, three quarters of the way down.
    #[must_use]
    pub fn band_top(&self) -> f64 {
        3.0 * self.height / 4.0
    }

    /// Horizontal centre of the surface.
    #[must_use]
    pub fn center_x(&self) -> f64 {
        self.width / 2.0
    }
}

impl Default for SceneLayout {
    fn default() -> Self {
        Self {
            width: 400.0,
            height: 400.0,
        }
    }
}

/// Three overlapping ovals drawn as one cloud.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cloud {
    /// Bottom-left, bottom-right and top ovals.
    pub parts: [ShapeId; 3],
}

impl Cloud {
    /// Draw a cloud whose envelope starts at `origin`.
    pub fn draw<S: Surface + ?Sized>(surface: &mut S, origin: Point, color: &str) -> Self {
        let Point { x, y } = origin;
        let lower_top = y + CLOUD_HEIGHT / 3.0;
        let bottom = y + CLOUD_HEIGHT;
        let bottom_left = surface.create_oval(
            Rect::new(x, lower_top, x + 3.0 * CLOUD_WIDTH / 4.0, bottom),
            color,
        );
        let bottom_right = surface.create_oval(
            Rect::new(x + CLOUD_WIDTH / 4.0, lower_top, x + CLOUD_WIDTH, bottom),
            color,
        );
        let top = surface.create_oval(
            Rect::new(
                x + CLOUD_WIDTH / 4.0,
                y,
                x + 3.0 * CLOUD_WIDTH / 4.0,
                y + 3.0 * CLOUD_HEIGHT / 4.0,
            ),
            color,
        );
        Self {
            parts: [bottom_left, bottom_right, top],
        }
    }

    /// Move every part of the cloud.
    ///
    /// # Errors
    ///
    /// Returns [`SurfaceError::UnknownShape`] when a part is not on `surface`.
    pub fn shift<S: Surface + ?Sized>(
        &self,
        surface: &mut S,
        dx: f64,
        dy: f64,
    ) -> Result<(), SurfaceError> {
        for part in self.parts {
            surface.move_shape(part, dx, dy)?;
        }
        Ok(())
    }

    /// Top edge of the upper oval.
    fn top<S: Surface + ?Sized>(&self, surface: &S) -> Result<f64, SurfaceError> {
        surface
            .top_y(self.parts[2])
            .ok_or(SurfaceError::UnknownShape(self.parts[2]))
    }

    /// Left edge of the bottom-left oval.
    fn left<S: Surface + ?Sized>(&self, surface: &S) -> Result<f64, SurfaceError> {
        surface
            .left_x(self.parts[0])
            .ok_or(SurfaceError::UnknownShape(self.parts[0]))
    }
}

/// Sky strip and the three clouds drawn before any question is asked.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Backdrop {
    /// Sky rectangle.
    pub sky: ShapeId,
    /// Clouds in drawing order.
    pub clouds: [Cloud; 3],
}

impl Backdrop {
    /// Draw the sky and clouds.
    pub fn draw<S: Surface + ?Sized>(surface: &mut S, layout: &SceneLayout) -> Self {
        let sky = surface.create_rectangle(Rect::new(0.0, 0.0, layout.width, SKY_HEIGHT), "light blue");
        let clouds = [
            Cloud::draw(surface, point(20.0, 70.0), "white"),
            Cloud::draw(surface, point(270.0, 20.0), "white"),
            Cloud::draw(surface, point(270.0, 70.0), "white"),
        ];
        Self { sky, clouds }
    }
}

/// Draw the soil band in the soil's color.
pub fn draw_soil_band<S: Surface + ?Sized>(
    surface: &mut S,
    layout: &SceneLayout,
    soil: SoilType,
) -> ShapeId {
    surface.create_rectangle(
        Rect::new(0.0, layout.band_top(), layout.width, layout.height),
        soil.band_color(),
    )
}

/// Draw the foundation below the band top.
///
/// A raft is centred on the building; isolated footings are spread evenly
/// across the building's footprint.
pub fn draw_foundation<S: Surface + ?Sized>(
    surface: &mut S,
    layout: &SceneLayout,
    foundation: &FoundationSpec,
) -> Vec<ShapeId> {
    let top = layout.band_top();
    let bottom = top + foundation.depth() * FOUNDATION_SCALE;
    let footing = foundation.width() * FOUNDATION_SCALE;
    let center = layout.center_x();
    match foundation.kind() {
        FoundationKind::Raft => {
            vec![surface.create_rectangle(
                Rect::new(center - footing, top, center + footing, bottom),
                "grey",
            )]
        }
        FoundationKind::Isolated => {
            let count = foundation.footings();
            let left = center - BUILDING_WIDTH / 2.0;
            let centres: Vec<f64> = if count == 1 {
                vec![center]
            } else {
                let step = BUILDING_WIDTH / f64::from(count - 1);
                (0..count).map(|i| left + f64::from(i) * step).collect()
            };
            centres
                .into_iter()
                .map(|x| {
                    surface.create_rectangle(
                        Rect::new(x - footing / 2.0, top, x + footing / 2.0, bottom),
                        "grey",
                    )
                })
                .collect()
        }
    }
}

/// Draw a building of `floors` storeys standing on the band, one window per floor.
pub fn draw_building<S: Surface + ?Sized>(
    surface: &mut S,
    layout: &SceneLayout,
    floors: u32,
) -> Vec<ShapeId> {
    let left = layout.center_x() - BUILDING_WIDTH / 2.0;
    let right = layout.center_x() + BUILDING_WIDTH / 2.0;
    let mut top = layout.band_top() - f64::from(floors) * FLOOR_HEIGHT;
    let mut shapes = Vec::new();
    for _ in 0..floors {
        shapes.push(surface.create_rectangle(Rect::new(left, top, right, top + FLOOR_HEIGHT), "blue"));
        top += FLOOR_HEIGHT;
    }

    let window_left = layout.center_x() + 10.0;
    let window_right = layout.center_x() + 40.0;
    let mut window_top = layout.band_top() - 60.0;
    for _ in 0..floors {
        shapes.push(surface.create_rectangle(
            Rect::new(window_left, window_top, window_right, window_top + 20.0),
            "grey",
        ));
        window_top -= FLOOR_HEIGHT;
    }
    shapes
}

/// Overlay the red failure banner in the middle of the surface.
pub fn show_failure_message<S: Surface + ?Sized>(surface: &mut S, layout: &SceneLayout) -> ShapeId {
    let style = TextStyle {
        color: "red".to_owned(),
        anchor: Anchor::Center,
        font: "Arial 20".to_owned(),
    };
    surface.create_text(
        point(layout.center_x(), layout.height / 2.0),
        "FOUNDATION FAILURE!",
        &style,
    )
}

/// Cloud motion across the sky.
///
/// The first cloud bounces diagonally, the second sinks and hops between two
/// columns, the third scrolls right and wraps around.
#[derive(Clone, Debug)]
pub struct CloudDrift {
    /// Clouds being moved.
    clouds: [Cloud; 3],
    /// Current diagonal velocity of the first cloud.
    bounce: (f64, f64),
    /// Left edge where the second cloud starts.
    home_x: f64,
}

impl CloudDrift {
    /// Highest top edge of the bouncing cloud.
    const BOUNCE_HIGH: f64 = -90.0;
    /// Lowest top edge of the bouncing cloud.
    const BOUNCE_LOW: f64 = 150.0;
    /// Top edge at which the sinking cloud hops.
    const SINK_LIMIT: f64 = 120.0;
    /// Horizontal hop of the sinking cloud.
    const HOP_X: f64 = 250.0;
    /// Vertical hop of the sinking cloud.
    const HOP_Y: f64 = -190.0;
    /// Left edge at which the scrolling cloud wraps.
    const WRAP_X: f64 = 600.0;
    /// Horizontal wrap of the scrolling cloud.
    const WRAP_SHIFT: f64 = -1200.0;
    /// Per-frame speed of the scrolling cloud.
    const SCROLL_SPEED: f64 = 1.5;

    /// Prepare to move the backdrop's clouds.
    #[must_use]
    pub fn new(backdrop: &Backdrop, surface: &impl Surface) -> Self {
        let home_x = surface
            .left_x(backdrop.clouds[1].parts[0])
            .unwrap_or(270.0);
        Self {
            clouds: backdrop.clouds,
            bounce: (1.0, -1.0),
            home_x,
        }
    }

    /// Move every cloud by one frame.
    ///
    /// # Errors
    ///
    /// Returns [`SurfaceError::UnknownShape`] when a cloud is not on `surface`.
    pub fn step<S: Surface + ?Sized>(&mut self, surface: &mut S) -> Result<(), SurfaceError> {
        let [bouncing, sinking, scrolling] = self.clouds;

        let top = bouncing.top(surface)?;
        if top <= Self::BOUNCE_HIGH || top >= Self::BOUNCE_LOW {
            self.bounce = (-self.bounce.0, -self.bounce.1);
        }
        bouncing.shift(surface, self.bounce.0, self.bounce.1)?;

        if sinking.top(surface)? >= Self::SINK_LIMIT {
            let at_home = (sinking.left(surface)? - self.home_x).abs() < 0.5;
            let hop = if at_home { -Self::HOP_X } else { Self::HOP_X };
            sinking.shift(surface, hop, Self::HOP_Y)?;
        } else {
            sinking.shift(surface, 0.0, 1.0)?;
        }

        if scrolling.left(surface)? >= Self::WRAP_X {
            scrolling.shift(surface, Self::WRAP_SHIFT, 0.0)?;
        } else {
            scrolling.shift(surface, Self::SCROLL_SPEED, 0.0)?;
        }
        Ok(())
    }

    /// Run `frames` frames with `delay` between them.
    ///
    /// # Errors
    ///
    /// Propagates any error from [`CloudDrift::step`].
    pub fn run<S: Surface + ?Sized>(
        &mut self,
        surface: &mut S,
        frames: usize,
        delay: Duration,
    ) -> Result<(), SurfaceError> {
        for _ in 0..frames {
            self.step(surface)?;
            if !delay.is_zero() {
                thread::sleep(delay);
            }
        }
        debug!(frames, "clouds drifted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::{Canvas, ShapeKind};

    fn backdrop() -> (Canvas, Backdrop) {
        let mut canvas = Canvas::new(400.0, 400.0);
        let backdrop = Backdrop::draw(&mut canvas, &SceneLayout::default());
        (canvas, backdrop)
    }

    #[test]
    fn cloud_parts_share_an_envelope() {
        let (canvas, backdrop) = backdrop();
        let cloud = backdrop.clouds[0];
        assert_eq!(canvas.bounds(cloud.parts[0]), Some(Rect::new(20.0, 70.0 + 40.0 / 3.0, 80.0, 110.0)));
        assert_eq!(canvas.bounds(cloud.parts[2]), Some(Rect::new(40.0, 70.0, 80.0, 100.0)));
        assert_eq!(canvas.shape_count(), 10);
    }

    #[test]
    fn building_stands_on_the_band() {
        let mut canvas = Canvas::new(400.0, 400.0);
        let layout = SceneLayout::default();
        let shapes = draw_building(&mut canvas, &layout, 3);
        assert_eq!(shapes.len(), 6);
        assert_eq!(canvas.bounds(shapes[0]), Some(Rect::new(150.0, 90.0, 250.0, 160.0)));
        assert_eq!(canvas.bounds(shapes[2]), Some(Rect::new(150.0, 230.0, 250.0, 300.0)));
        assert_eq!(canvas.bounds(shapes[3]), Some(Rect::new(210.0, 240.0, 240.0, 260.0)));
        assert_eq!(canvas.bounds(shapes[5]), Some(Rect::new(210.0, 100.0, 240.0, 120.0)));
    }

    #[test]
    fn isolated_footings_span_the_building() {
        let mut canvas = Canvas::new(400.0, 400.0);
        let layout = SceneLayout::default();
        let foundation = FoundationSpec::isolated(1.0, 1.0, 3).expect("valid footings");
        let footings = draw_foundation(&mut canvas, &layout, &foundation);
        let lefts: Vec<f64> = footings
            .iter()
            .filter_map(|shape| canvas.left_x(*shape))
            .collect();
        assert_eq!(lefts, [135.0, 185.0, 235.0]);
        assert_eq!(canvas.bounds(footings[0]).map(|b| b.max.y), Some(330.0));
    }

    #[test]
    fn raft_is_centred() {
        let mut canvas = Canvas::new(400.0, 400.0);
        let foundation = FoundationSpec::raft(1.5, 0.6).expect("valid raft");
        let raft = draw_foundation(&mut canvas, &SceneLayout::default(), &foundation);
        let bounds = canvas.bounds(raft[0]).expect("raft drawn");
        assert!((bounds.min.x - 155.0).abs() < 1.0e-9);
        assert!((bounds.max.x - 245.0).abs() < 1.0e-9);
        assert!((bounds.max.y - 318.0).abs() < 1.0e-9);
    }

    #[test]
    fn failure_banner_is_red_and_centred() {
        let mut canvas = Canvas::new(400.0, 400.0);
        let label = show_failure_message(&mut canvas, &SceneLayout::default());
        let shape = canvas.shape(label).expect("label drawn");
        assert_eq!(shape.fill, "red");
        let ShapeKind::Text { text, position, .. } = &shape.kind else {
            panic!("label must be text");
        };
        assert_eq!(text, "FOUNDATION FAILURE!");
        assert_eq!(*position, point(200.0, 200.0));
    }

    #[test]
    fn clouds_drift_and_wrap() {
        let (mut canvas, backdrop) = backdrop();
        let mut drift = CloudDrift::new(&backdrop, &canvas);
        drift.run(&mut canvas, 100, Duration::ZERO).expect("clouds exist");

        let [bouncing, sinking, scrolling] = backdrop.clouds;
        assert_eq!(canvas.top_y(bouncing.parts[2]), Some(-30.0));
        assert_eq!(canvas.top_y(sinking.parts[2]), Some(120.0));
        assert_eq!(canvas.left_x(scrolling.parts[0]), Some(420.0));

        drift.step(&mut canvas).expect("clouds exist");
        assert_eq!(canvas.left_x(sinking.parts[0]), Some(20.0));
        assert_eq!(canvas.top_y(sinking.parts[2]), Some(-70.0));

        drift.run(&mut canvas, 200, Duration::ZERO).expect("clouds exist");
        let top = canvas.top_y(bouncing.parts[2]).expect("cloud exists");
        assert!((-90.0..=150.0).contains(&top));
        assert!(canvas.left_x(scrolling.parts[0]).expect("cloud exists") < 600.0);
    }
}
