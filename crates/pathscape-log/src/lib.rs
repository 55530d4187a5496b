//! Structured logging for the Pathscape tools.
//!
//! Console output goes through an uptime-stamped `fmt` layer; debug builds also
//! write JSON lines to [`LOG_FILE_NAME`]. The filter comes from `RUST_LOG` when
//! set, otherwise from `debug.log_level` plus an optional directive for the
//! generation pipeline (`debug.pipeline_log_level`).

use std::fs::File;
use std::path::Path;
use std::sync::Mutex;

use pathscape_config::Config;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Filter used when neither `RUST_LOG` nor the config specify one.
pub const DEFAULT_FILTER: &str = "info";

/// Target the pipeline level directive applies to.
pub const PIPELINE_TARGET: &str = "pathscape_terrain";

/// Name of the JSON log file written in debug builds.
pub const LOG_FILE_NAME: &str = "pathscape.log";

/// Initialize the global tracing subscriber.
///
/// The JSON file layer is only attached when `debug_build` is set and the log
/// file under `log_dir` can be created; otherwise logging is console-only.
///
/// ```no_run
/// use pathscape_config::Config;
/// use pathscape_log::init_logging;
///
/// let mut config = Config::default();
/// config.debug.pipeline_log_level = Some("debug".into());
/// init_logging(Some(std::path::Path::new("./logs")), true, Some(&config));
/// ```
pub fn init_logging(log_dir: Option<&Path>, debug_build: bool, config: Option<&Config>) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter_string(config)));

    let file_layer = log_dir
        .filter(|_| debug_build)
        .and_then(open_log_file)
        .map(|file| {
            fmt::layer()
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .with_timer(fmt::time::uptime())
                .json()
        });

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_target(true).with_timer(fmt::time::uptime()))
        .with(file_layer)
        .init();
}

fn open_log_file(log_dir: &Path) -> Option<File> {
    std::fs::create_dir_all(log_dir).ok()?;
    File::create(log_dir.join(LOG_FILE_NAME)).ok()
}

/// Filter directives for an optional config: the base level, then the pipeline
/// override if one is set.
fn filter_string(config: Option<&Config>) -> String {
    let Some(debug) = config.map(|c| &c.debug) else {
        return DEFAULT_FILTER.to_string();
    };
    let base = if debug.log_level.is_empty() {
        DEFAULT_FILTER
    } else {
        debug.log_level.as_str()
    };
    match debug.pipeline_log_level.as_deref() {
        Some(level) if !level.is_empty() => format!("{base},{PIPELINE_TARGET}={level}"),
        _ => base.to_string(),
    }
}

/// Create an `EnvFilter` with the default filter string.
pub fn default_env_filter() -> EnvFilter {
    EnvFilter::new(DEFAULT_FILTER)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_log_level() {
        let filter = default_env_filter();
        assert!(format!("{}", filter).contains("info"));
    }

    #[test]
    fn test_filter_from_config() {
        let mut config = Config::default();
        config.debug.log_level = "debug,pathscape_terrain=trace".to_string();
        assert_eq!(filter_string(Some(&config)), "debug,pathscape_terrain=trace");
    }

    #[test]
    fn test_empty_config_level_falls_back() {
        let mut config = Config::default();
        config.debug.log_level.clear();
        assert_eq!(filter_string(Some(&config)), DEFAULT_FILTER);
        assert_eq!(filter_string(None), DEFAULT_FILTER);
    }

    #[test]
    fn test_pipeline_level_appends_directive() {
        let mut config = Config::default();
        config.debug.pipeline_log_level = Some("debug".to_string());
        let filter = filter_string(Some(&config));
        assert_eq!(filter, "info,pathscape_terrain=debug");
        assert!(EnvFilter::try_new(&filter).is_ok());

        config.debug.pipeline_log_level = Some(String::new());
        assert_eq!(filter_string(Some(&config)), "info");
    }

    #[test]
    fn test_pipeline_level_without_base_level() {
        let mut config = Config::default();
        config.debug.log_level.clear();
        config.debug.pipeline_log_level = Some("trace".to_string());
        assert_eq!(filter_string(Some(&config)), "info,pathscape_terrain=trace");
    }

    #[test]
    fn test_log_file_created_in_missing_dir() {
        let temp_dir = tempfile::tempdir().unwrap();
        let log_dir = temp_dir.path().join("nested").join("logs");
        assert!(open_log_file(&log_dir).is_some());
        assert!(log_dir.join(LOG_FILE_NAME).is_file());
    }

    #[test]
    fn test_env_filter_parsing() {
        let valid_filters = [
            "info",
            "debug,pathscape_terrain=trace",
            "warn,pathscape_terrain::carve=debug",
            "error",
        ];

        for filter_str in &valid_filters {
            let result = EnvFilter::try_from(*filter_str);
            assert!(result.is_ok(), "Failed to parse filter: {}", filter_str);
        }
    }
}
