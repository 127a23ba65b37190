//! Ultimate bearing capacity of shallow foundations.
//!
//! The capacity follows the general bearing capacity equation
//! `q_ult = c Nc + γ D Nq + ½ γ B Nγ` described at
//! <https://en.wikipedia.org/wiki/Bearing_capacity>.

use tracing::info;
use uom::si::angle::{degree, radian};
use uom::si::f64::{Angle, Pressure};
use uom::si::pressure::kilopascal;

use crate::foundation::{FoundationSpec, LoadModel};
use crate::soil::SoilProperties;

/// Nc used when the friction angle is zero and `(Nq - 1) / tan φ` is undefined.
pub const FRICTIONLESS_NC: f64 = 5.7;

/// Dimensionless bearing capacity factors for one friction angle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BearingFactors {
    /// Cohesion factor.
    pub nc: f64,
    /// Surcharge factor.
    pub nq: f64,
    /// Self-weight factor.
    pub ngamma: f64,
}

/// Outcome of comparing the applied pressure with the soil's capacity.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BearingResult {
    /// Factors derived from the friction angle.
    pub factors: BearingFactors,
    /// Ultimate bearing capacity.
    pub ultimate: Pressure,
    /// Pressure transmitted by the foundation.
    pub applied: Pressure,
    /// Whether the applied pressure stays strictly below the capacity.
    pub safe: bool,
}

impl BearingResult {
    /// Ratio of capacity to demand.
    #[must_use]
    pub fn factor_of_safety(&self) -> f64 {
        let applied = self.applied.get::<kilopascal>();
        if applied == 0.0 {
            f64::INFINITY
        } else {
            self.ultimate.get::<kilopascal>() / applied
        }
    }
}

/// Compute `(Nc, Nq, Nγ)` for a friction angle given in degrees.
///
/// # Examples
/// ```
/// use soilbed::compute_factors;
///
/// let clay = compute_factors(0.0);
/// assert_eq!(clay.nc, 5.7);
/// assert!((clay.nq - 1.0).abs() < 1e-9);
/// ```
#[must_use]
pub fn compute_factors(friction_angle: f64) -> BearingFactors {
    let phi = Angle::new::<degree>(friction_angle).get::<radian>();
    let passive = Angle::new::<degree>(45.0 + friction_angle / 2.0).get::<radian>();

    let nq = (2.0 * std::f64::consts::PI * (0.75 - friction_angle / 360.0) * phi.tan()).exp()
        / (2.0 * passive.cos().powi(2));
    let nc = if friction_angle > 0.0 {
        (nq - 1.0) / phi.tan()
    } else {
        FRICTIONLESS_NC
    };
    let kp = passive.tan().powi(2);
    let ngamma = 0.5 * phi.tan() * (kp / phi.cos().powi(2) - 1.0);

    BearingFactors { nc, nq, ngamma }
}

/// Ultimate bearing capacity in kPa.
///
/// `cohesion` is in kPa, `unit_weight` in kN/m³, `depth` and `width` in metres.
#[must_use]
pub fn ultimate_capacity(
    cohesion: f64,
    unit_weight: f64,
    depth: f64,
    width: f64,
    factors: &BearingFactors,
) -> f64 {
    cohesion * factors.nc
        + unit_weight * depth * factors.nq
        + 0.5 * unit_weight * width * factors.ngamma
}

/// Check a foundation on a soil against the load it carries.
#[must_use]
pub fn assess(
    soil: &SoilProperties,
    foundation: &FoundationSpec,
    load: &LoadModel,
) -> BearingResult {
    let factors = compute_factors(soil.friction_angle);
    let ultimate = Pressure::new::<kilopascal>(ultimate_capacity(
        soil.cohesion,
        soil.unit_weight,
        foundation.depth(),
        foundation.width(),
        &factors,
    ));
    let applied = load.applied_pressure(foundation);
    let safe = applied < ultimate;
    info!(
        applied_kpa = applied.get::<kilopascal>(),
        ultimate_kpa = ultimate.get::<kilopascal>(),
        safe,
        "bearing check complete"
    );
    BearingResult {
        factors,
        ultimate,
        applied,
        safe,
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::soil::SoilType;

    #[test]
    fn frictionless_soil_uses_fallback_nc() {
        let factors = compute_factors(0.0);
        assert_eq!(factors.nc, FRICTIONLESS_NC);
        assert_relative_eq!(factors.nq, 1.0, epsilon = 1.0e-9);
        assert_relative_eq!(factors.ngamma, 0.0, epsilon = 1.0e-12);
    }

    #[test]
    fn factors_at_thirty_degrees_match_closed_form() {
        let factors = compute_factors(30.0);
        assert_relative_eq!(factors.nq, 22.4557, epsilon = 1.0e-3);
        assert_relative_eq!(factors.nc, 37.1624, epsilon = 1.0e-3);
        // tan 30° · (Kp / cos² 30° - 1) / 2 with Kp = 3 reduces to √3 / 2.
        assert_relative_eq!(factors.ngamma, 3.0_f64.sqrt() / 2.0, epsilon = 1.0e-9);
    }

    #[test]
    fn factors_grow_with_friction_angle() {
        let mut previous = compute_factors(1.0);
        for angle in 2..=45 {
            let factors = compute_factors(f64::from(angle));
            assert!(factors.nq > previous.nq, "Nq at {angle}");
            assert!(factors.nc > previous.nc, "Nc at {angle}");
            assert!(factors.ngamma > previous.ngamma, "Nγ at {angle}");
            previous = factors;
        }
    }

    #[test]
    fn reference_capacity_is_reproducible() {
        let factors = compute_factors(20.0);
        let first = ultimate_capacity(20.0, 18.0, 1.0, 1.0, &factors);
        let second = ultimate_capacity(20.0, 18.0, 1.0, 1.0, &compute_factors(20.0));
        assert_eq!(first, second);
        assert_relative_eq!(first, 489.848, epsilon = 1.0e-3);
        assert!(150.0 < first);
    }

    #[test]
    fn soft_clay_under_heavy_raft_fails() {
        let soil = SoilType::SoftClay.profile().design_properties();
        let foundation = FoundationSpec::raft(1.0, 1.0).expect("valid raft");
        let load = LoadModel::new(4, 100.0, 6.0).expect("valid load");
        let result = assess(&soil, &foundation, &load);
        assert_relative_eq!(result.ultimate.get::<kilopascal>(), 149.076, epsilon = 1.0e-3);
        assert_relative_eq!(result.applied.get::<kilopascal>(), 2_400.0, epsilon = 1.0e-9);
        assert!(!result.safe);
        assert!(result.factor_of_safety() < 1.0);
    }

    #[test]
    fn equal_pressure_is_unsafe() {
        let soil = SoilProperties {
            cohesion: 100.0,
            friction_angle: 0.0,
            unit_weight: 0.0,
        };
        // Capacity is exactly 5.7 · 100 = 570 kPa; a 95 m² single-floor
        // building on a 1 m raft applies exactly 570 kPa.
        let foundation = FoundationSpec::raft(1.0, 1.0).expect("valid raft");
        let load = LoadModel::new(1, 95.0, 6.0).expect("valid load");
        let result = assess(&soil, &foundation, &load);
        assert_relative_eq!(result.ultimate.get::<kilopascal>(), 570.0, epsilon = 1.0e-9);
        assert_relative_eq!(result.applied.get::<kilopascal>(), 570.0, epsilon = 1.0e-9);
        assert!(!result.safe);
    }
}
