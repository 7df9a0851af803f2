#![allow(clippy::collapsible_if)]
#![allow(clippy::collapsible_else_if)]

// Core modules
pub mod analysis;
pub mod config;
pub mod domain;
pub mod engine;
pub mod models;
mod utils;

// Re-export commonly used types
pub use analysis::{ContourExtractor, MarchingSquares, RectangularFallback};
pub use domain::{Bounds, Evidence, EvidenceKind, ProbabilityZone, ZoneGeometry, ZoneProperties};
pub use engine::{UpdateEngine, UpdateJob, UpdateOutcome, UpdateWorkerPool};
pub use models::{FeatureCollection, ProbabilityGrid, ZoneDocument};

// CLI argument parsing
use clap::Parser;
use std::path::PathBuf;

use crate::config::constants::DEFAULT_GRID_RESOLUTION;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Prior probability zones (GeoJSON FeatureCollection or bare feature array)
    pub prior: PathBuf,

    /// Evidence report (JSON: lat, lon, type, confidence, reliability, timestamp)
    pub evidence: PathBuf,

    /// Grid cells per axis; fidelity vs. compute cost
    #[arg(long, default_value_t = DEFAULT_GRID_RESOLUTION)]
    pub resolution: usize,

    /// Write the updated FeatureCollection here instead of stdout
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Print a per-zone summary table to stderr
    #[arg(long, default_value_t = false)]
    pub summary: bool,
}
