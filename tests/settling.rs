#![warn(clippy::pedantic)]

use std::collections::BTreeSet;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use soilbed::{
    point, synthesize, Canvas, Particle, ParticleField, Rect, SettleProfile, Settler, ShapeId,
    SoilType, Surface,
};

const WIDTH: f64 = 400.0;
const HEIGHT: f64 = 400.0;
const BAND_TOP: f64 = 300.0;

/// One row of small grains spaced far enough apart that their probes never meet.
fn sparse_row(canvas: &mut Canvas) -> ParticleField {
    let particles = (0..13)
        .map(|column| {
            let origin = point(5.0 + 30.0 * f64::from(column), BAND_TOP);
            Particle {
                shape: canvas.create_oval(Rect::from_origin(origin, 2.0, 2.0), "brown"),
                position: origin,
                width: 2.0,
                height: 2.0,
            }
        })
        .collect();
    ParticleField::new(SoilType::DenseSand, particles)
}

fn mean_displacement(profile: SettleProfile, seed: u64) -> f64 {
    let mut canvas = Canvas::new(WIDTH, HEIGHT);
    let mut field = sparse_row(&mut canvas);
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let summary = Settler::new(&field, profile.without_delay(), BAND_TOP)
        .run(&mut canvas, &mut field, &mut rng)
        .expect("animation runs");
    summary.mean_displacement(field.len())
}

#[test]
fn failure_moves_further_than_normal_settling() {
    let seeds = 0..8_u64;
    let normal: f64 = seeds
        .clone()
        .map(|seed| mean_displacement(SettleProfile::NORMAL, seed))
        .sum();
    let failure: f64 = seeds
        .map(|seed| mean_displacement(SettleProfile::FAILURE, seed))
        .sum();
    assert!(failure > normal, "failure {failure} vs normal {normal}");
}

#[test]
fn every_soil_fills_only_its_band() {
    for soil in SoilType::ALL {
        let mut canvas = Canvas::new(WIDTH, HEIGHT);
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let field = synthesize(&mut canvas, soil, WIDTH, BAND_TOP, HEIGHT, &mut rng);
        assert!(!field.is_empty(), "{soil} produced no particles");
        let band = Rect::new(0.0, BAND_TOP, WIDTH, HEIGHT);
        for particle in field.particles() {
            let bounds = canvas.bounds(particle.shape).expect("particle drawn");
            assert!(band.contains(&bounds), "{soil} particle at {bounds:?} escapes the band");
        }
    }
}

#[test]
fn same_seed_same_bed() {
    let bed = |seed| {
        let mut canvas = Canvas::new(WIDTH, HEIGHT);
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        synthesize(&mut canvas, SoilType::Gravel, WIDTH, BAND_TOP, HEIGHT, &mut rng)
    };
    assert_eq!(bed(3), bed(3));
}

/// Every unordered pair of field members whose bounding boxes touch.
fn overlapping_pairs(canvas: &Canvas, field: &ParticleField) -> BTreeSet<(ShapeId, ShapeId)> {
    let members: BTreeSet<ShapeId> = field.shapes().collect();
    let mut pairs = BTreeSet::new();
    for particle in field.particles() {
        let bounds = canvas.bounds(particle.shape).expect("particle drawn");
        for other in canvas.find_overlapping(&bounds) {
            if other != particle.shape && members.contains(&other) {
                pairs.insert((particle.shape.min(other), particle.shape.max(other)));
            }
        }
    }
    pairs
}

#[test]
fn settling_never_creates_new_overlaps() {
    for soil in SoilType::ALL {
        let mut canvas = Canvas::new(WIDTH, HEIGHT);
        let mut rng = ChaCha8Rng::seed_from_u64(23);
        let mut field = synthesize(&mut canvas, soil, WIDTH, BAND_TOP, HEIGHT, &mut rng);
        let settler = Settler::new(&field, SettleProfile::FAILURE.without_delay(), BAND_TOP);

        let mut before = overlapping_pairs(&canvas, &field);
        for frame in 0..SettleProfile::FAILURE.frames {
            settler
                .step(&mut canvas, &mut field, &mut rng)
                .expect("frame runs");
            let after = overlapping_pairs(&canvas, &field);
            let created: Vec<_> = after.difference(&before).collect();
            assert!(
                created.is_empty(),
                "{soil} frame {frame} created overlaps {created:?}"
            );
            before = after;
        }

        for particle in field.particles() {
            let recorded = canvas.top_y(particle.shape).expect("particle drawn");
            assert!((recorded - particle.position.y).abs() < f64::EPSILON);
        }
    }
}

#[test]
fn disjoint_beds_stay_disjoint() {
    for soil in SoilType::ALL {
        let mut canvas = Canvas::new(WIDTH, HEIGHT);
        let mut rng = ChaCha8Rng::seed_from_u64(31);
        let mut field = synthesize(&mut canvas, soil, WIDTH, BAND_TOP, HEIGHT, &mut rng);
        if !overlapping_pairs(&canvas, &field).is_empty() {
            continue;
        }
        Settler::new(&field, SettleProfile::NORMAL.without_delay(), BAND_TOP)
            .run(&mut canvas, &mut field, &mut rng)
            .expect("animation runs");
        let members: BTreeSet<ShapeId> = field.shapes().collect();
        for particle in field.particles() {
            let bounds = canvas.bounds(particle.shape).expect("particle drawn");
            let hits: Vec<ShapeId> = canvas
                .find_overlapping(&bounds)
                .into_iter()
                .filter(|other| members.contains(other))
                .collect();
            assert_eq!(hits, vec![particle.shape], "{soil} particle overlaps a neighbour");
        }
    }
}
