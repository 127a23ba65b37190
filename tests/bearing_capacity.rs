#![warn(clippy::pedantic)]

use approx::assert_relative_eq;
use soilbed::{
    assess, compute_factors, ultimate_capacity, FoundationKind, FoundationSpec, InputError,
    LoadModel, SoilProperties, SoilType, FLOOR_LOAD_KPA,
};
use uom::si::pressure::kilopascal;

fn clayey_sand() -> SoilProperties {
    SoilProperties {
        cohesion: 20.0,
        friction_angle: 20.0,
        unit_weight: 18.0,
    }
}

#[test]
fn reference_capacity_is_reproduced() {
    let factors = compute_factors(20.0);
    let q_ult = ultimate_capacity(20.0, 18.0, 1.0, 1.0, &factors);
    assert_relative_eq!(q_ult, 489.848, epsilon = 1e-2);
    assert!(150.0 < q_ult);
}

#[test]
fn assessment_flags_pressure_above_capacity() {
    let foundation = FoundationSpec::raft(1.0, 1.0).expect("valid raft");

    // 6 kN/m² * 1 floor * 25 m² over a 1 m² raft gives 150 kPa.
    let light = LoadModel::new(1, 25.0, FLOOR_LOAD_KPA).expect("valid building");
    let verdict = assess(&clayey_sand(), &foundation, &light);
    assert_relative_eq!(verdict.applied.get::<kilopascal>(), 150.0, epsilon = 1e-9);
    assert!(verdict.safe);
    assert!(verdict.factor_of_safety() > 3.0);

    // 6 * 4 * 25 = 600 kPa exceeds the capacity.
    let heavy = LoadModel::new(4, 25.0, FLOOR_LOAD_KPA).expect("valid building");
    assert!(!assess(&clayey_sand(), &foundation, &heavy).safe);
}

#[test]
fn single_isolated_footing_matches_raft() {
    let load = LoadModel::new(3, 80.0, FLOOR_LOAD_KPA).expect("valid building");
    let raft = FoundationSpec::new(FoundationKind::Raft, 1.2, 1.0, 1).expect("valid raft");
    let footing = FoundationSpec::isolated(1.2, 1.0, 1).expect("valid footing");
    assert_relative_eq!(
        load.applied_pressure(&raft).get::<kilopascal>(),
        load.applied_pressure(&footing).get::<kilopascal>()
    );
}

#[test]
fn more_footings_share_the_load() {
    let load = LoadModel::new(2, 100.0, FLOOR_LOAD_KPA).expect("valid building");
    let two = FoundationSpec::isolated(1.0, 1.0, 2).expect("valid footings");
    let eight = FoundationSpec::isolated(1.0, 1.0, 8).expect("valid footings");
    assert_relative_eq!(
        load.applied_pressure(&two).get::<kilopascal>(),
        4.0 * load.applied_pressure(&eight).get::<kilopascal>()
    );
}

#[test]
fn medians_drive_the_catalog_verdict() {
    let soft_clay = SoilType::SoftClay.profile().design_properties();
    let foundation = FoundationSpec::raft(1.0, 1.0).expect("valid raft");
    let load = LoadModel::new(1, 20.0, FLOOR_LOAD_KPA).expect("valid building");
    let verdict = assess(&soft_clay, &foundation, &load);
    assert_relative_eq!(verdict.ultimate.get::<kilopascal>(), 149.076, epsilon = 1e-2);
    assert!(verdict.safe);
}

#[test]
fn building_limits_are_enforced() {
    assert_eq!(
        LoadModel::new(5, 100.0, FLOOR_LOAD_KPA),
        Err(InputError::FloorsOutOfRange { floors: 5, max: 4 })
    );
    assert_eq!(
        LoadModel::new(2, 0.0, FLOOR_LOAD_KPA),
        Err(InputError::NonPositiveArea(0.0))
    );
    assert_eq!(
        FoundationSpec::raft(0.0, 1.0),
        Err(InputError::NonPositiveWidth(0.0))
    );
}
