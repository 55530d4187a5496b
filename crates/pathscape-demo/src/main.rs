//! Demo binary that generates a terrain with carved paths and writes debug images.
//!
//! Configuration is loaded from `config.ron` and can be overridden via CLI flags.
//! Run with `cargo run -p pathscape-demo` to generate with the saved settings.
//! Run with `cargo run -p pathscape-demo -- --seed 42 --path-width 3` to override them.

use std::path::Path;

use clap::Parser;
use glam::Vec3;
use pathscape_config::{CliArgs, Config, GenerationConfig, TerrainConfig, default_config_dir};
use pathscape_terrain::debug_viz::{ExportError, render_splat, render_storage_heights};
use pathscape_terrain::{
    CurveKey, GenerationParameters, InMemoryTerrain, ShapingCurve,
    StraightLineNavigator, TerrainEditor, TerrainStorage,
};
use tracing::{error, info, warn};

const HEIGHTFIELD_IMAGE: &str = "heightfield.png";
const SPLATMAP_IMAGE: &str = "splatmap.png";

fn generation_parameters(config: &GenerationConfig) -> GenerationParameters {
    GenerationParameters {
        perlin_stretch: config.perlin_stretch,
        height_multiplier: config.height_multiplier,
        max_slope: config.max_slope,
        path_width: config.path_width,
        path_height: config.path_height,
        water_level: config.water_level,
        seed: config.seed,
    }
}

/// Configured curve keys, or the identity curve when none are set.
fn shaping_curve(config: &GenerationConfig) -> ShapingCurve {
    if config.curve.is_empty() {
        return ShapingCurve::linear();
    }
    ShapingCurve::new(
        config
            .curve
            .iter()
            .map(|k| CurveKey::new(k.time, k.value, k.in_tangent, k.out_tangent))
            .collect(),
    )
}

fn host_terrain(config: &TerrainConfig) -> InMemoryTerrain {
    InMemoryTerrain::new(
        config.heightmap_resolution,
        (config.alphamap_width, config.alphamap_height),
        Vec3::from_array(config.origin),
        Vec3::from_array(config.size),
    )
}

fn export_images(
    editor: &TerrainEditor<InMemoryTerrain, StraightLineNavigator>,
    output_dir: &Path,
) -> Result<(), ExportError> {
    std::fs::create_dir_all(output_dir).map_err(|source| ExportError::Io {
        path: output_dir.to_path_buf(),
        source,
    })?;

    let storage = editor.storage();
    // Committed heights are normalized, so the water line is scaled the same way.
    let size_y = match storage.size().y {
        y if y > 0.0 => y,
        _ => 1.0,
    };
    render_storage_heights(storage, editor.water_level() / size_y)
        .save_png(&output_dir.join(HEIGHTFIELD_IMAGE))?;
    render_splat(storage.alphamaps()).save_png(&output_dir.join(SPLATMAP_IMAGE))?;

    info!(dir = %output_dir.display(), "exported debug images");
    Ok(())
}

fn main() {
    let args = CliArgs::parse();

    // Resolve config directory
    let config_dir = args.config.clone().unwrap_or_else(default_config_dir);

    // Load or create config, then apply CLI overrides
    let mut config = Config::load_or_create(&config_dir).unwrap_or_else(|e| {
        eprintln!("Failed to load config: {e}, using defaults");
        Config::default()
    });
    config.apply_cli_overrides(&args);

    // Initialize logging with config and debug settings
    let log_dir = config_dir.join("logs");
    pathscape_log::init_logging(Some(&log_dir), cfg!(debug_assertions), Some(&config));

    info!(config_dir = %config_dir.display(), "pathscape starting");

    let mut editor = TerrainEditor::new(
        host_terrain(&config.terrain),
        StraightLineNavigator::new(),
        generation_parameters(&config.generation),
        shaping_curve(&config.generation),
    );
    info!(
        resolution = editor.resolution(),
        seed = editor.seed(),
        "terrain attached"
    );

    if args.randomize_seed {
        let seed = editor.randomize_seed(&mut rand::rng());
        info!(seed, "configured waypoints discarded");
    } else {
        editor.regenerate();
        for &[x, y, z] in &config.terrain.waypoints {
            editor.add_waypoint(Vec3::new(x, y, z));
        }
    }

    if let Some(report) = editor.last_report() {
        if report.carve.waypoints_snapped < editor.waypoints().len() {
            warn!(
                placed = editor.waypoints().len(),
                snapped = report.carve.waypoints_snapped,
                "some waypoints could not be snapped onto the terrain"
            );
        }
        info!(
            segments = report.carve.segments_routed,
            points = report.carve.points_stamped,
            elapsed_ms = report.elapsed.as_secs_f64() * 1000.0,
            "generation finished"
        );
    }

    if config.debug.export_images
        && let Err(e) = export_images(&editor, &config.debug.output_dir)
    {
        error!("Failed to export debug images: {e}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pathscape_config::CurveKeyConfig;

    #[test]
    fn test_parameters_follow_config() {
        let config = GenerationConfig {
            perlin_stretch: 0.02,
            path_width: 4,
            seed: -3.0,
            ..Default::default()
        };
        let params = generation_parameters(&config);
        assert_eq!(params.perlin_stretch, 0.02);
        assert_eq!(params.path_width, 4);
        assert_eq!(params.seed, -3.0);
        assert_eq!(params.max_slope, 40.0);
    }

    #[test]
    fn test_default_curve_is_identity() {
        let curve = shaping_curve(&GenerationConfig::default());
        for t in [0.0, 0.25, 0.5, 1.0] {
            assert!((curve.evaluate(t) - t).abs() < 1e-5);
        }
    }

    #[test]
    fn test_empty_curve_falls_back_to_linear() {
        let config = GenerationConfig {
            curve: Vec::new(),
            ..Default::default()
        };
        assert_eq!(shaping_curve(&config), ShapingCurve::linear());
    }

    #[test]
    fn test_configured_keys_are_used() {
        let config = GenerationConfig {
            curve: vec![CurveKeyConfig {
                time: 0.0,
                value: 0.3,
                in_tangent: 0.0,
                out_tangent: 0.0,
            }],
            ..Default::default()
        };
        assert_eq!(shaping_curve(&config).evaluate(0.8), 0.3);
    }

    #[test]
    fn test_export_writes_both_images() {
        let terrain = TerrainConfig {
            heightmap_resolution: 33,
            alphamap_width: 32,
            alphamap_height: 32,
            size: [32.0, 10.0, 32.0],
            ..Default::default()
        };
        let mut editor = TerrainEditor::new(
            host_terrain(&terrain),
            StraightLineNavigator::new(),
            GenerationParameters::default(),
            ShapingCurve::linear(),
        );
        editor.regenerate();

        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("images");
        export_images(&editor, &out).unwrap();
        assert!(out.join(HEIGHTFIELD_IMAGE).is_file());
        assert!(out.join(SPLATMAP_IMAGE).is_file());
    }
}
