use soilbed::{assess, FoundationSpec, LoadModel, SoilType, FLOOR_LOAD_KPA};
use uom::si::pressure::kilopascal;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // A two storey house on a 1.2 m wide raft founded 1.5 m deep
    let foundation = FoundationSpec::raft(1.2, 1.5)?;
    let load = LoadModel::new(2, 60.0, FLOOR_LOAD_KPA)?;

    // Check the same building on every soil in the catalog
    for soil in SoilType::ALL {
        let verdict = assess(&soil.profile().design_properties(), &foundation, &load);
        println!(
            "{:<18} q_ult = {:>8.1} kPa, applied = {:.1} kPa, {}",
            soil.name(),
            verdict.ultimate.get::<kilopascal>(),
            verdict.applied.get::<kilopascal>(),
            if verdict.safe { "safe" } else { "fails" }
        );
    }

    Ok(())
}
