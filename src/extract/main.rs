//! Bounding-box extraction from GeoJSONL building footprints.
//!
//! Streams a GeoJSONL file (e.g. one country of Microsoft's
//! GlobalMLBuildingFootprints), keeps the polygons with a point inside
//! the given box, and writes them as a GeoJSON FeatureCollection.

mod spinner;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use bbox_extractor::config::Config;
use bbox_extractor::pipeline::group_thousands;
use bbox_extractor::{
    default_output_path, BoundingBox, ExtractSummary, Extractor, Logger, TracingLogger,
};

use crate::spinner::SpinnerLogger;

#[derive(Parser, Debug)]
#[command(name = "bbox-extractor", version)]
#[command(about = "Extract polygons inside a bounding box from a GeoJSONL file")]
#[command(
    long_about = "Extract polygons inside a bounding box from a GeoJSONL file.\n\
                  Also converts GeoJSONL to GeoJSON: the result is a single FeatureCollection.\n\n\
                  The two corners may be given in any order.\n\n\
                  Example:\n  bbox-extractor Germany.geojsonl 10.2 50.1 11.9 51.6 extracted.geojson"
)]
#[command(allow_negative_numbers = true)]
struct Args {
    /// Path to source file in GeoJSONL format (.gz is decompressed on the fly)
    input: PathBuf,

    /// Longitude of the first corner
    #[arg(value_name = "MIN_LON")]
    lon1: f32,

    /// Latitude of the first corner
    #[arg(value_name = "MIN_LAT")]
    lat1: f32,

    /// Longitude of the opposite corner
    #[arg(value_name = "MAX_LON")]
    lon2: f32,

    /// Latitude of the opposite corner
    #[arg(value_name = "MAX_LAT")]
    lat2: f32,

    /// Output GeoJSON file [default: <INPUT stem>-extracted.geojson next to INPUT]
    output: Option<PathBuf>,

    /// TOML dataset profile with the coordinate layout of the input
    #[arg(long)]
    profile: Option<PathBuf>,

    /// Show a spinner instead of logging every match
    #[arg(long)]
    progress: bool,
}

fn main() -> Result<()> {
    // Initialize logging
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder().with_env_filter(filter).finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let args = Args::parse();

    if !args.input.is_file() {
        Args::command()
            .error(ErrorKind::ValueValidation, "Input file not found.")
            .exit();
    }
    if ![args.lon1, args.lat1, args.lon2, args.lat2]
        .iter()
        .all(|v| v.is_finite())
    {
        Args::command()
            .error(
                ErrorKind::ValueValidation,
                "Bounding box coordinates were not parseable.",
            )
            .exit();
    }

    let bbox = BoundingBox::from_corners(args.lon1, args.lat1, args.lon2, args.lat2);
    let output = args
        .output
        .clone()
        .unwrap_or_else(|| default_output_path(&args.input));

    let config = match &args.profile {
        Some(path) => Config::load_from_file(path)
            .with_context(|| format!("Failed to load profile {}", path.display()))?,
        None => Config::default(),
    };

    info!("bbox-extractor {}", env!("CARGO_PKG_VERSION"));

    let summary = if args.progress {
        let logger = SpinnerLogger::new()?;
        let bar = logger.bar();
        let summary = run(&args.input, &output, bbox, &config, logger);
        bar.finish_and_clear();
        summary?
    } else {
        run(&args.input, &output, bbox, &config, TracingLogger)?
    };

    info!(
        "Wrote {} of {} features to {} in {:.1}s",
        group_thousands(summary.matched),
        group_thousands(summary.lines),
        output.display(),
        summary.elapsed().num_milliseconds() as f64 / 1000.0
    );
    info!("Done.");

    Ok(())
}

fn run<L: Logger>(
    input: &Path,
    output: &Path,
    bbox: BoundingBox,
    config: &Config,
    logger: L,
) -> Result<ExtractSummary> {
    let mut extractor = Extractor::new(input, logger)
        .context("Failed to open input")?
        .with_profile(config.scan)
        .with_options(config.progress);

    let summary = extractor
        .extract(bbox, output)
        .context("Extraction failed")?;
    Ok(summary)
}
