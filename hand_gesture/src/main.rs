//! gesture_probe: classify detector output line by line.
//!
//! ```text
//! detector | gesture_probe
//! gesture_probe session.jsonl
//! ```

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use hand_gesture::{hand_frame_from_line, GestureThresholds};

#[derive(Parser, Debug)]
#[command(name = "gesture_probe", about = "Print gesture, palm center and direction per detected hand")]
struct Cli {
    /// JSON-lines file to read (default: stdin)
    input: Option<PathBuf>,

    /// Only print frames whose hands changed since the previous line
    #[arg(long)]
    changes_only: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "hand_gesture=warn".into()),
        )
        .with_writer(io::stderr)
        .init();

    let reader: Box<dyn BufRead> = match &cli.input {
        Some(path) => Box::new(BufReader::new(
            File::open(path).with_context(|| format!("opening {}", path.display()))?,
        )),
        None => Box::new(io::stdin().lock()),
    };

    let thresholds = GestureThresholds::default();
    let mut last: Option<Vec<&'static str>> = None;

    for (n, line) in reader.lines().enumerate() {
        let line = line.context("reading detector output")?;
        if line.trim().is_empty() { continue; }

        let frame = hand_frame_from_line(&line, &thresholds);
        let names: Vec<&'static str> = frame.hands().iter().map(|h| h.gesture.name()).collect();
        if cli.changes_only && last.as_ref() == Some(&names) { continue; }
        last = Some(names);

        if frame.is_empty() {
            println!("#{n:<6} no hands");
            continue;
        }
        for (i, hand) in frame.hands().iter().enumerate() {
            let role = if i == 0 { "primary  " } else { "secondary" };
            let c = hand.palm_center;
            let d = hand.direction;
            println!(
                "#{n:<6} {role} {:<9} palm=({:.3}, {:.3}, {:.3})  dir=({:+.3}, {:+.3}, {:+.3})",
                hand.gesture.name(), c.x, c.y, c.z, d.x, d.y, d.z,
            );
        }
    }

    Ok(())
}
