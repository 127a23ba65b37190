//! Foundation geometry and the pressure a building transmits through it.

use std::fmt;
use std::str::FromStr;

use uom::si::area::square_meter;
use uom::si::f64::{Area, Force, Length, Pressure};
use uom::si::force::kilonewton;
use uom::si::length::meter;
use uom::si::pressure::kilopascal;

use crate::errors::{InputError, ParseFoundationKindError};

/// Largest number of floors a building may have.
pub const MAX_FLOORS: u32 = 4;

/// Dead plus live load carried by each floor, in kN/m².
pub const FLOOR_LOAD_KPA: f64 = 6.0;

/// Building footprint assumed when none is given, in m².
pub const DEFAULT_BUILDING_AREA: f64 = 100.0;

/// How the building load reaches the soil.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FoundationKind {
    /// A single continuous footing under the whole building.
    Raft,
    /// Several discrete footings, one per column.
    Isolated,
}

impl FoundationKind {
    /// Short code typed by users.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            FoundationKind::Raft => "R",
            FoundationKind::Isolated => "I",
        }
    }
}

impl fmt::Display for FoundationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FoundationKind::Raft => f.write_str("Raft"),
            FoundationKind::Isolated => f.write_str("Isolated footings"),
        }
    }
}

impl FromStr for FoundationKind {
    type Err = ParseFoundationKindError;

    fn from_str(code: &str) -> Result<Self, Self::Err> {
        match code.trim().to_ascii_uppercase().as_str() {
            "R" => Ok(FoundationKind::Raft),
            "I" => Ok(FoundationKind::Isolated),
            _ => Err(ParseFoundationKindError(code.to_owned())),
        }
    }
}

/// Geometry of a shallow foundation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FoundationSpec {
    /// Raft or isolated.
    kind: FoundationKind,
    /// Width of the (square) footing.
    width: Length,
    /// Embedment depth below ground level.
    depth: Length,
    /// Number of footings sharing the load.
    footings: u32,
}

impl FoundationSpec {
    /// Describe a raft foundation of the given width and depth in metres.
    ///
    /// # Errors
    ///
    /// Returns [`InputError::NonPositiveWidth`] or [`InputError::NonPositiveDepth`]
    /// for dimensions that are not strictly positive.
    pub fn raft(width: f64, depth: f64) -> Result<Self, InputError> {
        Self::new(FoundationKind::Raft, width, depth, 1)
    }

    /// Describe `footings` isolated footings of the given width and depth in metres.
    ///
    /// # Errors
    ///
    /// Returns [`InputError::NoFootings`] when `footings` is zero, and the same
    /// dimension errors as [`FoundationSpec::raft`].
    pub fn isolated(width: f64, depth: f64, footings: u32) -> Result<Self, InputError> {
        Self::new(FoundationKind::Isolated, width, depth, footings)
    }

    /// Describe a foundation of either kind. Rafts always have one footing.
    ///
    /// # Errors
    ///
    /// See [`FoundationSpec::raft`] and [`FoundationSpec::isolated`].
    pub fn new(
        kind: FoundationKind,
        width: f64,
        depth: f64,
        footings: u32,
    ) -> Result<Self, InputError> {
        if width <= 0.0 {
            return Err(InputError::NonPositiveWidth(width));
        }
        if depth <= 0.0 {
            return Err(InputError::NonPositiveDepth(depth));
        }
        let footings = match kind {
            FoundationKind::Raft => 1,
            FoundationKind::Isolated if footings == 0 => return Err(InputError::NoFootings),
            FoundationKind::Isolated => footings,
        };
        Ok(Self {
            kind,
            width: Length::new::<meter>(width),
            depth: Length::new::<meter>(depth),
            footings,
        })
    }

    /// Raft or isolated.
    #[must_use]
    pub fn kind(&self) -> FoundationKind {
        self.kind
    }

    /// Footing width in metres.
    #[must_use]
    pub fn width(&self) -> f64 {
        self.width.get::<meter>()
    }

    /// Embedment depth in metres.
    #[must_use]
    pub fn depth(&self) -> f64 {
        self.depth.get::<meter>()
    }

    /// Number of footings sharing the load.
    #[must_use]
    pub fn footings(&self) -> u32 {
        self.footings
    }

    /// Contact area of a single footing.
    #[must_use]
    pub fn footing_area(&self) -> Area {
        self.width * self.width
    }
}

/// Building load derived from its floor count and footprint.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LoadModel {
    /// Number of floors.
    floors: u32,
    /// Building footprint.
    building_area: Area,
    /// Load carried per floor per unit area.
    floor_load: Pressure,
    /// Total load on the foundation.
    total_load: Force,
}

impl LoadModel {
    /// Compute the load of a building.
    ///
    /// `building_area` is in m² and `floor_load` in kN/m².
    ///
    /// # Errors
    ///
    /// Returns [`InputError::FloorsOutOfRange`] when `floors` is outside
    /// `1..=MAX_FLOORS` and [`InputError::NonPositiveArea`] for a footprint that
    /// is not strictly positive.
    ///
    /// # Examples
    /// ```
    /// use soilbed::{FoundationSpec, LoadModel};
    /// use uom::si::pressure::kilopascal;
    ///
    /// let load = LoadModel::new(2, 100.0, 6.0).expect("valid building");
    /// let raft = FoundationSpec::raft(1.0, 1.0).expect("valid raft");
    /// assert_eq!(load.applied_pressure(&raft).get::<kilopascal>(), 1_200.0);
    /// ```
    pub fn new(floors: u32, building_area: f64, floor_load: f64) -> Result<Self, InputError> {
        if !(1..=MAX_FLOORS).contains(&floors) {
            return Err(InputError::FloorsOutOfRange {
                floors,
                max: MAX_FLOORS,
            });
        }
        if building_area <= 0.0 {
            return Err(InputError::NonPositiveArea(building_area));
        }
        let building_area = Area::new::<square_meter>(building_area);
        let floor_load = Pressure::new::<kilopascal>(floor_load);
        let total_load: Force = floor_load * building_area * f64::from(floors);
        Ok(Self {
            floors,
            building_area,
            floor_load,
            total_load,
        })
    }

    /// Number of floors.
    #[must_use]
    pub fn floors(&self) -> u32 {
        self.floors
    }

    /// Building footprint in m².
    #[must_use]
    pub fn building_area(&self) -> f64 {
        self.building_area.get::<square_meter>()
    }

    /// Load per floor per unit area in kN/m².
    #[must_use]
    pub fn floor_load(&self) -> f64 {
        self.floor_load.get::<kilopascal>()
    }

    /// Total building load in kN.
    #[must_use]
    pub fn total_load(&self) -> f64 {
        self.total_load.get::<kilonewton>()
    }

    /// Pressure under one footing of `foundation`.
    ///
    /// The load is shared evenly between isolated footings, so a raft and a
    /// single isolated footing of the same width give the same pressure.
    #[must_use]
    pub fn applied_pressure(&self, foundation: &FoundationSpec) -> Pressure {
        let load_per_footing = match foundation.kind() {
            FoundationKind::Raft => self.total_load,
            FoundationKind::Isolated => self.total_load / f64::from(foundation.footings()),
        };
        load_per_footing / foundation.footing_area()
    }
}
