//! Error types produced while describing foundations or driving a surface.

use thiserror::Error;

use crate::surface::ShapeId;

/// Error returned when a foundation or building description is not physically meaningful.
///
/// The variants describe the reason the supplied value is rejected so callers can
/// present actionable feedback to users.
///
/// # Examples
///
/// ```
/// use soilbed::{FoundationSpec, InputError};
///
/// let error = FoundationSpec::isolated(1.0, 1.0, 0).expect_err("zero footings rejected");
/// assert_eq!(error, InputError::NoFootings);
/// ```
#[derive(Clone, Copy, Debug, Error, PartialEq)]
pub enum InputError {
    /// Returned when the foundation width is zero or negative.
    #[error("foundation width must be positive (received {0} m)")]
    NonPositiveWidth(f64),
    /// Returned when the foundation depth is zero or negative.
    #[error("foundation depth must be positive (received {0} m)")]
    NonPositiveDepth(f64),
    /// Returned when an isolated foundation has no footings.
    #[error("an isolated foundation needs at least one footing")]
    NoFootings,
    /// Returned when the floor count lies outside the supported range.
    #[error("floor count must be between 1 and {max} (received {floors})")]
    FloorsOutOfRange {
        /// Rejected floor count.
        floors: u32,
        /// Largest supported floor count.
        max: u32,
    },
    /// Returned when the building footprint is zero or negative.
    #[error("building area must be positive (received {0} m²)")]
    NonPositiveArea(f64),
}

/// Error returned when a soil code does not name one of the catalogued soils.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("unknown soil type {0:?}; expected one of LS, MDS, DS, SC, SIC, SS, G")]
pub struct ParseSoilTypeError(pub String);

/// Error returned when a foundation code is neither raft nor isolated.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("unknown foundation type {0:?}; expected R or I")]
pub struct ParseFoundationKindError(pub String);

/// Error returned when a surface is asked about a shape it does not own.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum SurfaceError {
    /// Returned when a shape identifier is not part of this surface.
    #[error("shape {0:?} does not exist on this surface")]
    UnknownShape(ShapeId),
}

/// Error returned when a configuration file cannot be used.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Returned when the file cannot be read.
    #[error("failed to read configuration from {path}")]
    Read {
        /// Path that was requested.
        path: String,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
    /// Returned when the file is not valid TOML for [`Config`](crate::Config).
    #[error("failed to parse configuration: {0}")]
    Parse(#[from] toml::de::Error),
    /// Returned when a value parses but cannot drive the scene or the animation.
    #[error("invalid configuration value for {key}: {reason}")]
    Invalid {
        /// Dotted path of the offending key.
        key: String,
        /// What the value must satisfy.
        reason: &'static str,
    },
}
