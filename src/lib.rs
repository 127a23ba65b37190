#![warn(clippy::all)]
#![warn(missing_docs)]
#![warn(rustdoc::missing_doc_code_examples)]
#![warn(clippy::missing_docs_in_private_items)]
#![doc = include_str!("../README.md")]

pub mod bearing;
pub mod config;
pub mod errors;
pub mod field;
pub mod foundation;
pub mod geometry;
pub mod scene;
pub mod settle;
pub mod soil;
pub mod surface;
pub mod svg;

pub use bearing::{
    assess, compute_factors, ultimate_capacity, BearingFactors, BearingResult, FRICTIONLESS_NC,
};
pub use config::{CloudConfig, Config, LoadConfig, SettleConfig};
pub use errors::{
    ConfigError, InputError, ParseFoundationKindError, ParseSoilTypeError, SurfaceError,
};
pub use field::{synthesize, GrainPolicy, Particle, ParticleField};
pub use foundation::{
    FoundationKind, FoundationSpec, LoadModel, DEFAULT_BUILDING_AREA, FLOOR_LOAD_KPA, MAX_FLOORS,
};
pub use geometry::{point, Point, Rect};
pub use scene::{
    draw_building, draw_foundation, draw_soil_band, show_failure_message, Backdrop, Cloud,
    CloudDrift, SceneLayout,
};
pub use settle::{FrameStats, SettleProfile, SettleSummary, Settler};
pub use soil::{PropertyRange, SoilProfile, SoilProperties, SoilType};
pub use surface::{Anchor, Canvas, Shape, ShapeId, ShapeKind, Surface, TextStyle};
pub use svg::render_svg;
