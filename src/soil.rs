//! Catalogue of the soils a foundation can be placed on.

use std::fmt;
use std::str::FromStr;

use crate::errors::ParseSoilTypeError;

/// The seven soil categories understood by the crate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SoilType {
    /// Loose sand (LS).
    LooseSand,
    /// Medium dense sand (MDS).
    MediumDenseSand,
    /// Dense sand (DS).
    DenseSand,
    /// Soft clay (SC).
    SoftClay,
    /// Stiff clay (SIC).
    StiffClay,
    /// Silty sand (SS).
    SiltySand,
    /// Gravel (G).
    Gravel,
}

impl SoilType {
    /// Every soil type in menu order.
    pub const ALL: [SoilType; 7] = [
        SoilType::LooseSand,
        SoilType::MediumDenseSand,
        SoilType::DenseSand,
        SoilType::SoftClay,
        SoilType::StiffClay,
        SoilType::SiltySand,
        SoilType::Gravel,
    ];

    /// Short code typed by users.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            SoilType::LooseSand => "LS",
            SoilType::MediumDenseSand => "MDS",
            SoilType::DenseSand => "DS",
            SoilType::SoftClay => "SC",
            SoilType::StiffClay => "SIC",
            SoilType::SiltySand => "SS",
            SoilType::Gravel => "G",
        }
    }

    /// Human-readable name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            SoilType::LooseSand => "Loose Sand",
            SoilType::MediumDenseSand => "Medium Dense Sand",
            SoilType::DenseSand => "Dense Sand",
            SoilType::SoftClay => "Soft Clay",
            SoilType::StiffClay => "Stiff Clay",
            SoilType::SiltySand => "Silty Sand",
            SoilType::Gravel => "Gravel",
        }
    }

    /// Color used for the soil band behind the particles.
    #[must_use]
    pub const fn band_color(self) -> &'static str {
        match self {
            SoilType::LooseSand => "sandybrown",
            SoilType::MediumDenseSand => "peru",
            SoilType::DenseSand => "saddlebrown",
            SoilType::SoftClay => "tan",
            SoilType::StiffClay => "burlywood",
            SoilType::SiltySand => "wheat",
            SoilType::Gravel => "gray",
        }
    }

    /// Whether the soil is known for settling, which favours a raft foundation.
    #[must_use]
    pub const fn prone_to_settlement(self) -> bool {
        matches!(
            self,
            SoilType::SoftClay | SoilType::SiltySand | SoilType::LooseSand
        )
    }

    /// Typical strength parameters for this soil.
    #[must_use]
    pub const fn profile(self) -> SoilProfile {
        let (cohesion, friction_angle, unit_weight) = match self {
            SoilType::LooseSand => ((0.0, 0.0), (28.0, 32.0), (16.0, 18.0)),
            SoilType::MediumDenseSand => ((0.0, 0.0), (32.0, 36.0), (17.0, 19.0)),
            SoilType::DenseSand => ((0.0, 0.0), (36.0, 40.0), (18.0, 21.0)),
            SoilType::SoftClay => ((15.0, 25.0), (0.0, 5.0), (14.0, 17.0)),
            SoilType::StiffClay => ((40.0, 75.0), (0.0, 10.0), (17.0, 20.0)),
            SoilType::SiltySand => ((5.0, 15.0), (26.0, 34.0), (16.0, 19.0)),
            SoilType::Gravel => ((0.0, 0.0), (36.0, 42.0), (19.0, 22.0)),
        };
        SoilProfile {
            soil: self,
            cohesion: PropertyRange::new(cohesion.0, cohesion.1),
            friction_angle: PropertyRange::new(friction_angle.0, friction_angle.1),
            unit_weight: PropertyRange::new(unit_weight.0, unit_weight.1),
        }
    }

    /// Teaching notes on the strengths and weaknesses of the soil.
    #[must_use]
    pub const fn pros_and_cons(self) -> &'static str {
        match self {
            SoilType::LooseSand => {
                "Loose sand drains water quickly, which reduces pore water pressure.\n\
                 Your building will have fewer forces working against it.\n\
                 However, loose sand has low strength and is prone to settlement."
            }
            SoilType::MediumDenseSand => {
                "Medium dense sand has medium strength and drainage.\n\
                 It spreads load better than loose sand,\n\
                 but it can still settle and let your home sink."
            }
            SoilType::DenseSand => {
                "Dense sand has high shear strength, excellent bearing capacity and low compressibility.\n\
                 Seismic shaking can still make it flow like water,\n\
                 and its low compressibility means it cannot be compacted much further."
            }
            SoilType::SoftClay => {
                "Soft clay is easy to excavate,\n\
                 but it has very low strength and keeps settling over long periods.\n\
                 A building on soft clay can sink for years without warning."
            }
            SoilType::StiffClay => {
                "Stiff clay has a higher bearing strength than soft clay\n\
                 and a reduced settlement risk,\n\
                 but it cracks when dry, leading to water seepage and volume changes."
            }
            SoilType::SiltySand => {
                "Silty sand has a moderate bearing capacity if compacted well.\n\
                 It retains water, so it is prone to frost heave\n\
                 and loses strength when saturated."
            }
            SoilType::Gravel => {
                "Gravel has a high bearing capacity, excellent drainage and rarely compresses.\n\
                 It is hard to compact uniformly and may let water move under foundations.\n\
                 It is also hard and expensive to excavate."
            }
        }
    }
}

impl fmt::Display for SoilType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SoilType {
    type Err = ParseSoilTypeError;

    fn from_str(code: &str) -> Result<Self, Self::Err> {
        let normalised = code.trim().to_ascii_uppercase();
        SoilType::ALL
            .into_iter()
            .find(|soil| soil.code() == normalised)
            .ok_or_else(|| ParseSoilTypeError(code.to_owned()))
    }
}

/// Closed range of a soil property.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PropertyRange {
    /// Lower bound.
    pub min: f64,
    /// Upper bound.
    pub max: f64,
}

impl PropertyRange {
    /// Create a range from its bounds.
    #[must_use]
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Midpoint of the range.
    #[must_use]
    pub fn median(&self) -> f64 {
        (self.min + self.max) / 2.0
    }
}

/// Typical parameter ranges for one soil type.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SoilProfile {
    /// Soil these ranges describe.
    pub soil: SoilType,
    /// Cohesion in kPa.
    pub cohesion: PropertyRange,
    /// Angle of internal friction in degrees.
    pub friction_angle: PropertyRange,
    /// Unit weight in kN/m³.
    pub unit_weight: PropertyRange,
}

impl SoilProfile {
    /// Median values used for design.
    ///
    /// # Examples
    /// ```
    /// use soilbed::SoilType;
    ///
    /// let clay = SoilType::SoftClay.profile().design_properties();
    /// assert_eq!(clay.cohesion, 20.0);
    /// assert_eq!(clay.friction_angle, 2.5);
    /// ```
    #[must_use]
    pub fn design_properties(&self) -> SoilProperties {
        SoilProperties {
            cohesion: self.cohesion.median(),
            friction_angle: self.friction_angle.median(),
            unit_weight: self.unit_weight.median(),
        }
    }

    /// Whether the soil has no cohesion anywhere in its range.
    #[must_use]
    pub fn is_cohesionless(&self) -> bool {
        self.cohesion.max == 0.0
    }
}

/// Single set of strength parameters fed to the bearing capacity equation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SoilProperties {
    /// Cohesion in kPa.
    pub cohesion: f64,
    /// Angle of internal friction in degrees.
    pub friction_angle: f64,
    /// Unit weight in kN/m³.
    pub unit_weight: f64,
}
