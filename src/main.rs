use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use platescan::models::RecognitionReport;
use platescan::{OcrsEngine, PlateRecognizer};

#[derive(Parser)]
#[command(name = "platescan")]
#[command(about = "Read a vehicle license plate from an image")]
struct Cli {
    /// Path to input image file
    #[arg(value_name = "IMAGE")]
    image_path: PathBuf,

    /// Minimum confidence required to report a plate
    #[arg(long, value_name = "FLOAT")]
    min_confidence: Option<f32>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Save conditioning-stage images to directory (must be empty)
    #[arg(long, value_name = "DIR")]
    debug_out: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let args = Cli::parse();

    let default_level = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Some(min) = args.min_confidence {
        if !(0.0..=1.0).contains(&min) {
            anyhow::bail!("--min-confidence must be within [0.0, 1.0], got {}", min);
        }
    }

    let image_bytes = std::fs::read(&args.image_path)
        .map_err(|e| anyhow::anyhow!("Failed to read {}: {}", args.image_path.display(), e))?;

    let engine = Arc::new(OcrsEngine::from_cache_dir()?);
    let mut recognizer = PlateRecognizer::new(engine);
    if let Some(debug_dir) = args.debug_out {
        recognizer = recognizer.with_debug_dump(debug_dir)?;
    }

    let started = Instant::now();
    let outcome = recognizer.recognize(&image_bytes, args.min_confidence)?;
    let report = RecognitionReport::from_outcome(&outcome, started.elapsed());

    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(())
}
