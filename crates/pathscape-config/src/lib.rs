//! Configuration for the Pathscape terrain tools.
//!
//! Settings persist to disk as RON files and can be overridden from the
//! command line via clap. Unknown or missing fields fall back to defaults so
//! older config files keep loading.

mod cli;
mod config;
mod error;

pub use cli::CliArgs;
pub use config::{
    Config, CurveKeyConfig, DebugConfig, GenerationConfig, TerrainConfig, default_config_dir,
};
pub use error::ConfigError;
