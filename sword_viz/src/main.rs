//! sword_viz: interactive entry point.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use sword_viz::app::{run, run_headless, AppConfig};

#[derive(Parser, Debug)]
#[command(name = "sword_viz", about = "Hand-gesture controlled flying-sword swarm")]
struct Cli {
    /// JSON configuration file (missing file = defaults)
    #[arg(long, default_value = "sword_viz.json")]
    config: PathBuf,

    /// Number of swords
    #[arg(long)]
    swords: Option<usize>,

    /// Seed for spawn, jitter and stars
    #[arg(long)]
    seed: Option<u64>,

    /// Replay recorded detector output
    #[arg(long, conflicts_with = "detector")]
    replay: Option<PathBuf>,

    /// Step this many frames without a window and log swarm statistics
    #[arg(long, value_name = "FRAMES")]
    headless: Option<u64>,

    /// Skip the config file and start with defaults
    #[arg(long)]
    quick: bool,

    /// Detector program and its arguments, after `--`, printing one JSON
    /// detection per line.  Each argument is passed through unsplit.
    #[arg(last = true, value_name = "DETECTOR")]
    detector: Vec<String>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sword_viz=info,sword_swarm=info,hand_gesture=warn".into()),
        )
        .init();

    let mut cfg = if cli.quick {
        AppConfig::default()
    } else {
        AppConfig::load(&cli.config)?
    };
    if let Some(n) = cli.swords     { cfg.swarm.sword_count = n; }
    if let Some(s) = cli.seed       { cfg.swarm.seed = Some(s); }
    if !cli.detector.is_empty()     { cfg.detector = Some(cli.detector); }
    if cli.replay.is_some()         { cfg.replay = cli.replay; }

    if let Some(frames) = cli.headless {
        run_headless(&cfg, frames)?;
        return Ok(());
    }

    println!();
    println!("╔══════════════════════════════════════════════════════════════╗");
    println!("║        Sword Swarm — Hand Gesture Flying-Sword Array         ║");
    println!("╚══════════════════════════════════════════════════════════════╝");
    println!();

    if let Some(argv) = cfg.detector.as_ref().filter(|a| !a.is_empty()) {
        println!("  Mode: detector  ({})", argv.join(" "));
    } else if let Some(path) = &cfg.replay {
        println!("  Mode: replay  ({})", path.display());
    } else {
        #[cfg(feature = "leap")]
        println!("  Mode: LeapMotion hardware");
        #[cfg(not(feature = "leap"))]
        println!("  Mode: Keyboard simulation  (use --features leap for hardware)");
    }
    println!("  Swords: {}", cfg.swarm.sword_count);
    println!();
    println!("  Opening visualizer window…");
    println!();

    run(cfg)
}
