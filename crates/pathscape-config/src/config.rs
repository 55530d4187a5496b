//! Configuration structs with sensible defaults and RON persistence.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Heightfield synthesis, classification and carving parameters.
    pub generation: GenerationConfig,
    /// Host terrain dimensions and placed waypoints.
    pub terrain: TerrainConfig,
    /// Debug/development settings.
    pub debug: DebugConfig,
}

/// Parameters driving a regeneration pass.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GenerationConfig {
    /// Noise frequency scale (0.0001 - 0.05).
    pub perlin_stretch: f32,
    /// Vertical scale applied after the shaping curve (0.0 - 1.0).
    pub height_multiplier: f32,
    /// Steepness threshold in degrees above which cells become rock.
    pub max_slope: f32,
    /// Half-width of the path brush, in grid cells.
    pub path_width: i32,
    /// Path depression depth; each brush stamp lowers cells by `path_height / 100`.
    pub path_height: f32,
    /// Cells below this world-space height become sand.
    pub water_level: f32,
    /// Additive offset into noise sample coordinates.
    pub seed: f32,
    /// Keyframes of the shaping curve applied to raw noise.
    pub curve: Vec<CurveKeyConfig>,
}

/// A single keyframe of the shaping curve.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CurveKeyConfig {
    pub time: f32,
    pub value: f32,
    pub in_tangent: f32,
    pub out_tangent: f32,
}

/// Dimensions of the in-memory host terrain used by the demo.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TerrainConfig {
    /// Side length of the square heightfield grid.
    pub heightmap_resolution: usize,
    /// Splat map width in cells.
    pub alphamap_width: usize,
    /// Splat map height in cells.
    pub alphamap_height: usize,
    /// World-space size of the terrain (x, y = max height, z).
    pub size: [f32; 3],
    /// World-space position of the terrain's corner.
    pub origin: [f32; 3],
    /// Waypoints placed in order, in world space.
    pub waypoints: Vec<[f32; 3]>,
}

/// Debug/development configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level override (e.g., "debug", "info", "warn").
    pub log_level: String,
    /// Level for the generation pipeline's own events (stage timings, snaps,
    /// routes). Falls back to `log_level` when unset.
    pub pipeline_log_level: Option<String>,
    /// Directory that receives exported debug images.
    pub output_dir: PathBuf,
    /// Write heightfield and splat map PNGs after generation.
    pub export_images: bool,
}

// --- Default implementations ---

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            perlin_stretch: 0.01,
            height_multiplier: 0.5,
            max_slope: 40.0,
            path_width: 1,
            path_height: 0.1,
            water_level: 0.0,
            seed: 0.0,
            curve: vec![
                CurveKeyConfig {
                    time: 0.0,
                    value: 0.0,
                    in_tangent: 1.0,
                    out_tangent: 1.0,
                },
                CurveKeyConfig {
                    time: 1.0,
                    value: 1.0,
                    in_tangent: 1.0,
                    out_tangent: 1.0,
                },
            ],
        }
    }
}

impl Default for CurveKeyConfig {
    fn default() -> Self {
        Self {
            time: 0.0,
            value: 0.0,
            in_tangent: 0.0,
            out_tangent: 0.0,
        }
    }
}

impl Default for TerrainConfig {
    fn default() -> Self {
        Self {
            heightmap_resolution: 513,
            alphamap_width: 512,
            alphamap_height: 512,
            size: [1000.0, 600.0, 1000.0],
            origin: [0.0, 0.0, 0.0],
            waypoints: Vec::new(),
        }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            pipeline_log_level: None,
            output_dir: PathBuf::from("output"),
            export_images: true,
        }
    }
}

/// Platform config directory for Pathscape, falling back to the working directory.
pub fn default_config_dir() -> PathBuf {
    dirs::config_dir()
        .map(|dir| dir.join("pathscape"))
        .unwrap_or_else(|| PathBuf::from("."))
}

// --- Load / Save / Reload ---

impl Config {
    /// Load config from the given directory, or create a default config file.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join("config.ron");

        if config_path.exists() {
            let contents = std::fs::read_to_string(&config_path).map_err(ConfigError::ReadError)?;
            let config: Config = ron::from_str(&contents).map_err(ConfigError::ParseError)?;
            log::info!("Loaded config from {}", config_path.display());
            Ok(config)
        } else {
            let config = Config::default();
            config.save(config_dir)?;
            log::info!("Created default config at {}", config_path.display());
            Ok(config)
        }
    }

    /// Save config to the given directory as `config.ron`.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        std::fs::create_dir_all(config_dir).map_err(ConfigError::WriteError)?;

        let config_path = config_dir.join("config.ron");
        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(3)
            .separate_tuple_members(true)
            .enumerate_arrays(false);

        let serialized =
            ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::SerializeError)?;

        std::fs::write(&config_path, serialized).map_err(ConfigError::WriteError)?;
        Ok(())
    }

    /// Hot-reload: returns `Some(new_config)` if the file changed, `None` otherwise.
    pub fn reload(&self, config_dir: &Path) -> Result<Option<Self>, ConfigError> {
        let config_path = config_dir.join("config.ron");
        let contents = std::fs::read_to_string(&config_path).map_err(ConfigError::ReadError)?;
        let new_config: Config = ron::from_str(&contents).map_err(ConfigError::ParseError)?;

        if &new_config != self {
            log::info!("Config reloaded with changes");
            Ok(Some(new_config))
        } else {
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_serializes() {
        let config = Config::default();
        let ron_str =
            ron::ser::to_string_pretty(&config, ron::ser::PrettyConfig::new().depth_limit(3))
                .unwrap();
        assert!(ron_str.contains("heightmap_resolution: 513"));
        assert!(ron_str.contains("max_slope: 40.0"));
    }

    #[test]
    fn test_config_roundtrip() {
        let mut config = Config::default();
        config.terrain.waypoints = vec![[10.0, 0.0, 20.0], [300.0, 5.0, 400.0]];
        let ron_str = ron::to_string(&config).unwrap();
        let deserialized: Config = ron::from_str(&ron_str).unwrap();
        assert_eq!(config, deserialized);
    }

    #[test]
    fn test_missing_section_uses_default() {
        let ron_str = "(terrain: (heightmap_resolution: 129))";
        let config: Config = ron::from_str(ron_str).unwrap();
        assert_eq!(config.generation, GenerationConfig::default());
        assert_eq!(config.terrain.heightmap_resolution, 129);
        assert_eq!(config.terrain.alphamap_width, 512);
    }

    #[test]
    fn test_extra_field_ignored() {
        let result: Result<Config, _> = ron::from_str("(future_setting: true)");
        assert!(result.is_ok());
    }

    #[test]
    fn test_default_curve_is_identity() {
        let curve = GenerationConfig::default().curve;
        assert_eq!(curve.len(), 2);
        assert_eq!((curve[0].time, curve[0].value), (0.0, 0.0));
        assert_eq!((curve[1].time, curve[1].value), (1.0, 1.0));
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.generation.seed = -421.0;
        config.generation.path_width = 4;
        config.debug.log_level = "debug".to_string();

        config.save(dir.path()).unwrap();
        let loaded = Config::load_or_create(dir.path()).unwrap();
        assert_eq!(config, loaded);
    }

    #[test]
    fn test_load_or_create_writes_default_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_or_create(dir.path()).unwrap();
        assert_eq!(config, Config::default());
        assert!(dir.path().join("config.ron").exists());
    }

    #[test]
    fn test_reload_detects_changes() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::default();
        config.save(dir.path()).unwrap();

        let mut modified = config.clone();
        modified.generation.max_slope = 25.0;
        modified.save(dir.path()).unwrap();

        let result = config.reload(dir.path()).unwrap();
        assert_eq!(result.unwrap().generation.max_slope, 25.0);
    }

    #[test]
    fn test_reload_no_changes() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::default();
        config.save(dir.path()).unwrap();

        let result = config.reload(dir.path()).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_invalid_ron_produces_error() {
        let result: Result<Config, _> = ron::from_str("{{not valid}}");
        assert!(result.is_err());
    }
}
