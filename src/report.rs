use soilbed::{BearingResult, FoundationKind, FoundationSpec, LoadModel, SoilType};
use std::fmt::Write;
use uom::si::pressure::kilopascal;

/// Walkthrough of the bearing capacity equation, shown unless the user skips it.
pub const FORMULA: &str = "\
The formula used to calculate that is below
q_ult = c * Nc + gamma * D * Nq + 0.5 * gamma * B * Ng

Where:
q_ult  = ultimate bearing capacity (kN/m²)
c      = soil cohesion (kPa or kN/m²)
Nc     = bearing capacity factor for cohesion (depends on φ)
gamma  = unit weight of soil (kN/m³)
D      = depth of foundation (m)
Nq     = bearing capacity factor for surcharge (depends on φ)
B      = width of foundation (m)
Ng     = bearing capacity factor for unit weight (depends on φ)
";

/// Render the teaching notes and typical property ranges of a soil.
#[must_use]
pub fn render_soil_guide(soil: SoilType) -> String {
    let profile = soil.profile();
    let mut output = String::new();

    writeln!(&mut output, "You have selected: {soil}\n{}", soil.pros_and_cons())
        .expect("writing to string cannot fail");
    writeln!(&mut output, "Typical property values for {soil} are:")
        .expect("writing to string cannot fail");

    // Sands and gravel carry no cohesion, so a range of zeros reads oddly.
    if profile.is_cohesionless() {
        output.push_str("Cohesion (c): 0\n");
    } else {
        writeln!(
            &mut output,
            "Cohesion (c): {} - {}",
            profile.cohesion.min, profile.cohesion.max
        )
        .expect("writing to string cannot fail");
    }
    writeln!(
        &mut output,
        "Friction angle (φ): {} - {}\nUnit weight (γ): {} - {}",
        profile.friction_angle.min,
        profile.friction_angle.max,
        profile.unit_weight.min,
        profile.unit_weight.max
    )
    .expect("writing to string cannot fail");

    output.push_str("\nThe median of each range is used for the calculation.\n");
    output
}

/// Render how the building's weight turns into contact pressure.
#[must_use]
pub fn render_pressure(load: &LoadModel, foundation: &FoundationSpec) -> String {
    let mut output = String::new();

    output.push_str(
        "We first find the load your building is exerting with the formula\n\
         Total Load = Floor weight * No. of floors * Building area\n",
    );
    writeln!(
        &mut output,
        "Total Load = {} * {} * {} = {:.2} kN",
        load.floor_load(),
        load.floors(),
        load.building_area(),
        load.total_load()
    )
    .expect("writing to string cannot fail");

    match foundation.kind() {
        FoundationKind::Raft => output.push_str(
            "Then the pressure is the load divided by the area of the raft\n",
        ),
        FoundationKind::Isolated => writeln!(
            &mut output,
            "Then the load is shared by {} footings and divided by the area of one footing",
            foundation.footings()
        )
        .expect("writing to string cannot fail"),
    }

    writeln!(
        &mut output,
        "\nYour building will apply {:.2} kN/m² pressure on the soil",
        load.applied_pressure(foundation).get::<kilopascal>()
    )
    .expect("writing to string cannot fail");
    output
}

/// Render the comparison of applied pressure and capacity.
#[must_use]
pub fn render_verdict(result: &BearingResult) -> String {
    let mut output = String::new();

    writeln!(
        &mut output,
        "Nc = {:.2}, Nq = {:.2}, Ng = {:.2}",
        result.factors.nc, result.factors.nq, result.factors.ngamma
    )
    .expect("writing to string cannot fail");
    writeln!(
        &mut output,
        "Applied pressure: {:.2} kN/m², ultimate bearing capacity: {:.2} kN/m² (factor of safety {:.2})",
        result.applied.get::<kilopascal>(),
        result.ultimate.get::<kilopascal>(),
        result.factor_of_safety()
    )
    .expect("writing to string cannot fail");
    output.push('\n');

    if result.safe {
        output.push_str(
            "Yay, your building is safe!!\n\
             We'll now draw a simplified version of your building's foundation\n\
             to show how its weight spreads into the soil\n",
        );
    } else {
        output.push_str(
            "Ooops your building is pulling a Titanic!\n\
             Find a Geotechnical Engineer ASAP!\n\
             Or use a deeper foundation, different soil or modify your foundation type\n",
        );
    }
    output
}
