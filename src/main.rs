mod prompt;
mod report;

use anyhow::{Context, Result};
use clap::Parser;
use prompt::Prompter;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use soilbed::{
    assess, draw_building, draw_foundation, draw_soil_band, render_svg, show_failure_message,
    synthesize, Backdrop, Canvas, CloudDrift, Config, ConfigError, FoundationKind, FoundationSpec,
    LoadModel, Settler, MAX_FLOORS,
};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Configuration file picked up from the working directory when `--config` is not given.
const DEFAULT_CONFIG: &str = "soilbed.toml";

#[derive(Parser, Debug)]
#[command(name = "soilbed")]
#[command(about = "Build a house on a soil of your choice and watch the ground settle")]
#[command(version)]
struct Args {
    /// Configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Seed for the particle bed and settling moves
    #[arg(short, long)]
    seed: Option<u64>,

    /// Write the final scene to this SVG file
    #[arg(long)]
    svg: Option<PathBuf>,

    /// Run the animations without pausing between frames
    #[arg(long)]
    no_delay: bool,

    /// Log filter such as `info` or `soilbed=debug`; falls back to RUST_LOG, then `warn`
    #[arg(long)]
    log_level: Option<String>,

    /// Print the effective configuration as JSON and exit
    #[arg(long)]
    print_config: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Logs go to stderr so they never interleave with the questions on stdout.
    let filter = match &args.log_level {
        Some(level) => EnvFilter::new(level),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
    };
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let config = load_config(&args)?;
    if args.print_config {
        println!("{}", serde_json::to_string_pretty(&config)?);
        return Ok(());
    }

    run(&config, args.svg.as_deref())
}

/// Resolve the configuration from the file and the command line overrides.
fn load_config(args: &Args) -> Result<Config> {
    let mut config = match &args.config {
        Some(path) => Config::load(path)
            .with_context(|| format!("loading configuration from {}", path.display()))?,
        None => match Config::load(DEFAULT_CONFIG) {
            Ok(config) => config,
            Err(ConfigError::Read { .. }) => Config::default(),
            Err(error) => {
                warn!(%error, path = DEFAULT_CONFIG, "ignoring malformed configuration");
                Config::default()
            }
        },
    };
    if args.seed.is_some() {
        config.seed = args.seed;
    }
    if args.no_delay {
        config = config.without_delays();
    }
    debug!(?config, "configuration resolved");
    Ok(config)
}

/// Walk the user through one building and animate the outcome.
fn run(config: &Config, svg: Option<&Path>) -> Result<()> {
    let mut rng = match config.seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    };
    let layout = config.scene;
    let mut canvas = Canvas::new(layout.width, layout.height);
    let backdrop = Backdrop::draw(&mut canvas, &layout);

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut prompter = Prompter::new(stdin.lock(), stdout.lock());

    prompter.say("Let's see if your dream home will stand strong or sink like the Titanic\n")?;
    prompter.wait_for_enter("Press Enter to continue...")?;
    prompter.say("\nFirst, let's choose the soil type you want to build on\n")?;
    let soil = prompter.choose_soil_type()?;
    prompter.say(&format!("\n{soil}\n\nGreat choice!\n"))?;

    // The bed is laid out before any structural question so the verdict cannot shape it.
    draw_soil_band(&mut canvas, &layout, soil);
    let mut field = synthesize(
        &mut canvas,
        soil,
        layout.width,
        layout.band_top(),
        layout.height,
        &mut rng,
    );
    debug!(soil = soil.code(), particles = field.len(), "particle bed ready");

    prompter.say(&report::render_soil_guide(soil))?;
    prompter.wait_for_enter("Press Enter to continue...")?;

    let (depth, width) = prompter.foundation_properties()?;
    prompter.say("\nGreat!\n")?;
    let (floors, area) = prompter.building_details(
        MAX_FLOORS,
        config.load.floor_load,
        config.load.default_building_area,
    )?;
    prompter.say("\nNice!\n")?;
    let kind = prompter.foundation_type(soil)?;
    let footings = match kind {
        FoundationKind::Raft => 1,
        FoundationKind::Isolated => prompter.footing_count()?,
    };
    let foundation =
        FoundationSpec::new(kind, width, depth, footings).context("describing the foundation")?;
    let load = LoadModel::new(floors, area, config.load.floor_load)
        .context("describing the building")?;
    draw_foundation(&mut canvas, &layout, &foundation);

    prompter.say("\nCool!\n\nNow let's determine the amount of pressure your building is exerting\n")?;
    prompter.say(&report::render_pressure(&load, &foundation))?;
    prompter.wait_for_enter("Press Enter to continue...")?;

    prompter.say("Now let's find out the amount of pressure the soil you chose can take")?;
    if prompter.skip_formula()? {
        prompter.say("\nAlright, skipping the formula\n")?;
    } else {
        prompter.say(report::FORMULA)?;
    }
    prompter.say("Comparing your building pressure and ultimate pressure of your soil reveals that...\n")?;

    let verdict = assess(&soil.profile().design_properties(), &foundation, &load);
    prompter.say(&report::render_verdict(&verdict))?;

    draw_building(&mut canvas, &layout, floors);
    let profile = if verdict.safe {
        config.settle.normal
    } else {
        config.settle.failure
    };
    let summary = Settler::new(&field, profile, layout.band_top())
        .run(&mut canvas, &mut field, &mut rng)
        .context("settling the particle bed")?;
    if !verdict.safe {
        show_failure_message(&mut canvas, &layout);
    }
    info!(
        safe = verdict.safe,
        mean_displacement = summary.mean_displacement(field.len()),
        "animation finished"
    );

    CloudDrift::new(&backdrop, &canvas)
        .run(&mut canvas, config.clouds.frames, config.clouds.frame_delay())
        .context("drifting the clouds")?;

    if let Some(path) = svg {
        fs::write(path, render_svg(&canvas))
            .with_context(|| format!("writing scene to {}", path.display()))?;
        prompter.say(&format!("\nScene written to {}", path.display()))?;
    }
    Ok(())
}
