/// File logging setup.
///
/// The terminal is in raw alternate-screen mode while the game runs, so
/// log lines cannot go to stdout/stderr. Logging is off unless
/// `STONEFALL_LOG` holds a filter directive (`info`, `debug`,
/// `stonefall::sim=trace`, ...); output goes to `STONEFALL_LOG_FILE`
/// (default `stonefall.log`).

use std::fs::File;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

pub const FILTER_VAR: &str = "STONEFALL_LOG";
pub const FILE_VAR: &str = "STONEFALL_LOG_FILE";
const DEFAULT_FILE: &str = "stonefall.log";

/// Install the global subscriber if `STONEFALL_LOG` is set.
/// Returns the log file path when logging was enabled.
pub fn init() -> Result<Option<String>, Box<dyn std::error::Error>> {
    let directive = match std::env::var(FILTER_VAR) {
        Ok(d) if !d.trim().is_empty() => d,
        _ => return Ok(None),
    };
    let path = std::env::var(FILE_VAR).unwrap_or_else(|_| DEFAULT_FILE.to_string());
    let file = File::create(&path)?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(&directive)?)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true)
        .try_init()
        .map_err(|e| e as Box<dyn std::error::Error>)?;

    Ok(Some(path))
}
