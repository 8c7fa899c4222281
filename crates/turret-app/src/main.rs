//! Turret defense CLI.
//!
//! Usage:
//!   turret                                  interactive terminal game
//!   turret --headless --ticks 5000          autopilot run, final snapshot as JSON
//!   RUST_LOG=debug turret --log-file turret.log

use std::fs::File;
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::filter::EnvFilter;

use turret_app::{headless, terminal};
use turret_sim::SimConfig;

#[derive(Parser, Debug)]
#[command(name = "turret")]
#[command(about = "Turret defense arcade shooter")]
struct Args {
    /// JSON config file (seed, playfield size, starting health, stage length)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the RNG seed
    #[arg(long)]
    seed: Option<u64>,

    /// Run without a terminal UI, driven by the autopilot
    #[arg(long)]
    headless: bool,

    /// Frames to simulate in headless mode
    #[arg(long, default_value_t = 3600)]
    ticks: u32,

    /// Frame length in milliseconds for headless mode
    #[arg(long, default_value_t = 16.0)]
    frame_ms: f64,

    /// Log file for interactive mode (stderr would corrupt the screen)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_tracing(&args)?;

    let mut config = match &args.config {
        Some(path) => SimConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => SimConfig::default(),
    };
    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    info!(seed = config.seed, headless = args.headless, "starting");

    if args.headless {
        anyhow::ensure!(
            args.frame_ms.is_finite() && args.frame_ms > 0.0,
            "--frame-ms must be a positive number"
        );
        let snapshot = headless::run_headless(config, args.ticks, args.frame_ms);
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
        Ok(())
    } else {
        terminal::run(config)
    }
}

fn init_tracing(args: &Args) -> anyhow::Result<()> {
    let filter = EnvFilter::from_default_env();
    if args.headless {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    } else if let Some(path) = &args.log_file {
        let file = File::create(path)
            .with_context(|| format!("failed to create log file {}", path.display()))?;
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_ansi(false)
            .with_writer(Mutex::new(file))
            .init();
    }
    Ok(())
}
