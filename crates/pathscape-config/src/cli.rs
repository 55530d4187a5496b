//! Command-line argument parsing.

use std::path::PathBuf;

use clap::Parser;

use crate::Config;

/// Pathscape command-line arguments.
///
/// CLI values override settings loaded from `config.ron`.
#[derive(Parser, Debug, Default)]
#[command(name = "pathscape", about = "Procedural terrain and path carving")]
pub struct CliArgs {
    /// Noise seed offset.
    #[arg(long, allow_negative_numbers = true)]
    pub seed: Option<f32>,

    /// Pick a random seed and discard configured waypoints.
    #[arg(long)]
    pub randomize_seed: bool,

    /// Heightfield resolution.
    #[arg(long)]
    pub resolution: Option<usize>,

    /// Noise frequency scale.
    #[arg(long)]
    pub perlin_stretch: Option<f32>,

    /// Vertical scale.
    #[arg(long)]
    pub height_multiplier: Option<f32>,

    /// Rock steepness threshold in degrees.
    #[arg(long)]
    pub max_slope: Option<f32>,

    /// Path brush half-width in cells.
    #[arg(long)]
    pub path_width: Option<i32>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log level for generation pipeline events only.
    #[arg(long)]
    pub pipeline_log_level: Option<String>,

    /// Directory for exported images.
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(seed) = args.seed {
            self.generation.seed = seed;
        }
        if let Some(res) = args.resolution {
            self.terrain.heightmap_resolution = res;
        }
        if let Some(stretch) = args.perlin_stretch {
            self.generation.perlin_stretch = stretch;
        }
        if let Some(mult) = args.height_multiplier {
            self.generation.height_multiplier = mult;
        }
        if let Some(slope) = args.max_slope {
            self.generation.max_slope = slope;
        }
        if let Some(width) = args.path_width {
            self.generation.path_width = width;
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
        if let Some(ref level) = args.pipeline_log_level {
            self.debug.pipeline_log_level = Some(level.clone());
        }
        if let Some(ref dir) = args.output {
            self.debug.output_dir = dir.clone();
        }
    }
}
