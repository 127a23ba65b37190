use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use soilbed::{
    draw_soil_band, render_svg, synthesize, Canvas, SceneLayout, SettleProfile, Settler, SoilType,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let layout = SceneLayout::default();
    let mut canvas = Canvas::new(layout.width, layout.height);
    let mut rng = ChaCha8Rng::seed_from_u64(2024);

    // Lay out a gravel bed and shake it with the failure profile
    draw_soil_band(&mut canvas, &layout, SoilType::Gravel);
    let mut field = synthesize(
        &mut canvas,
        SoilType::Gravel,
        layout.width,
        layout.band_top(),
        layout.height,
        &mut rng,
    );
    let settler = Settler::new(&field, SettleProfile::FAILURE.without_delay(), layout.band_top());
    let summary = settler.run(&mut canvas, &mut field, &mut rng)?;

    println!(
        "{} stones, {} moves accepted, {} blocked, mean drop {:.2}",
        field.len(),
        summary.accepted,
        summary.blocked,
        summary.mean_displacement(field.len())
    );
    std::fs::write("settle_bed.svg", render_svg(&canvas))?;

    Ok(())
}
