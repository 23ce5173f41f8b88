//! Wisp runner
//!
//! Compiles a behavior script and drives a sprite batch for a fixed number
//! of steps, headless. Useful for smoke-testing scripts without a
//! rendering host.

use clap::Parser;
use std::path::PathBuf;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use wisp_runtime::{Bounds, SpriteBatch};

#[derive(Parser, Debug)]
#[command(name = "wisp-run")]
#[command(about = "Run a Wisp behavior script over a sprite batch")]
struct Cli {
    /// Path to a .wisp behavior script
    script: PathBuf,

    /// Number of sprites to spawn
    #[arg(long, default_value = "100")]
    sprites: usize,

    /// Number of simulation steps to run
    #[arg(long, default_value = "60")]
    steps: u64,

    /// Fixed timestep in seconds
    #[arg(long, default_value = "0.016")]
    dt: f64,

    /// Seed for reproducible sprite spawns
    #[arg(long)]
    seed: Option<u64>,

    /// Spawn bounds as WIDTH HEIGHT
    #[arg(long, num_args = 2, value_names = ["W", "H"], default_values = ["800", "600"])]
    bounds: Vec<f64>,

    /// Unscaled sprite size as WIDTH HEIGHT
    #[arg(long, num_args = 2, value_names = ["W", "H"], default_values = ["32", "32"])]
    sprite_size: Vec<f64>,

    /// Print the compiled behavior as JSON and exit
    #[arg(long)]
    dump_ast: bool,
}

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "wisp_run=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let source = match std::fs::read_to_string(&cli.script) {
        Ok(source) => source,
        Err(e) => {
            error!("could not read script '{}': {}", cli.script.display(), e);
            std::process::exit(1);
        }
    };

    let behavior = match wisp::compile(&source) {
        Ok(behavior) => behavior,
        Err(e) => {
            error!("failed to compile '{}': {}", cli.script.display(), e);
            std::process::exit(1);
        }
    };
    info!(behavior = %behavior.name, "compiled");

    if cli.dump_ast {
        match serde_json::to_string_pretty(&behavior) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                error!("failed to serialize behavior: {}", e);
                std::process::exit(1);
            }
        }
        return;
    }

    let bounds = Bounds {
        x: 0.0,
        y: 0.0,
        w: cli.bounds[0],
        h: cli.bounds[1],
    };
    let sprite_size = (cli.sprite_size[0], cli.sprite_size[1]);

    let mut batch = match cli.seed {
        Some(seed) => SpriteBatch::with_seed(behavior, bounds, sprite_size, seed),
        None => SpriteBatch::new(behavior, bounds, sprite_size),
    };
    batch.add(cli.sprites, 1.0);
    info!(sprites = batch.len(), steps = cli.steps, dt = cli.dt, "running");

    for step in 0..cli.steps {
        if let Err(e) = batch.update(cli.dt) {
            // A runtime error abandons this frame's script effects but must
            // not take the host down; stop stepping and report.
            error!(step, "runtime error: {}", e);
            break;
        }
    }

    let sample = batch.len().min(5);
    for i in 0..sample {
        println!(
            "sprite {i}: pos=({:.2}, {:.2}) rot={:.3}",
            batch.pos_x()[i],
            batch.pos_y()[i],
            batch.rot()[i],
        );
    }
}
