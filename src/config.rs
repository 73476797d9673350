/// External configuration loader.
///
/// Reads `config.toml` from the executable's directory (or CWD).
/// Falls back to sensible defaults if the file is missing or incomplete.
/// A file that fails to parse while it carries a `[level]` table is an
/// error: playing the built-in level instead would hide the problem.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, warn};

use crate::sim::render::{MAX_TILE_SIZE, TILE_SIZE};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config.toml has a [level] table but does not parse: {0}")]
    Level(#[source] toml::de::Error),
}

// ── Public Config Struct ──

#[derive(Clone, Debug)]
pub struct GameConfig {
    pub speed: SpeedConfig,
    pub render: RenderConfig,
    pub gamepad: GamepadConfig,
    /// Level override as a grid literal; `None` = built-in level.
    pub level: Option<Vec<Vec<i64>>>,
}

#[derive(Clone, Debug)]
pub struct SpeedConfig {
    pub fps: u32,
}

#[derive(Clone, Debug)]
pub struct RenderConfig {
    pub tile_size: u32,
}

#[derive(Clone, Debug)]
pub struct GamepadConfig {
    pub quit: Vec<String>,
    pub restart: Vec<String>,
}

// ── TOML Schema (with serde defaults) ──

#[derive(Deserialize, Debug, Default)]
struct TomlConfig {
    #[serde(default)]
    speed: TomlSpeed,
    #[serde(default)]
    render: TomlRender,
    #[serde(default)]
    gamepad: TomlGamepad,
    #[serde(default)]
    level: TomlLevel,
}

#[derive(Deserialize, Debug)]
struct TomlSpeed {
    #[serde(default = "default_fps")]
    fps: u32,
}

#[derive(Deserialize, Debug)]
struct TomlRender {
    #[serde(default = "default_tile_size")]
    tile_size: u32,
}

#[derive(Deserialize, Debug)]
struct TomlGamepad {
    #[serde(default = "default_quit")]
    quit: Vec<String>,
    #[serde(default = "default_restart")]
    restart: Vec<String>,
}

#[derive(Deserialize, Debug, Default)]
struct TomlLevel {
    #[serde(default)]
    map: Option<Vec<Vec<i64>>>,
}

// ── Defaults ──

fn default_fps() -> u32 { 30 }
fn default_tile_size() -> u32 { TILE_SIZE }

fn default_quit() -> Vec<String> { vec!["Select".into()] }
fn default_restart() -> Vec<String> { vec!["Start".into()] }

impl Default for TomlSpeed {
    fn default() -> Self {
        TomlSpeed { fps: default_fps() }
    }
}

impl Default for TomlRender {
    fn default() -> Self {
        TomlRender { tile_size: default_tile_size() }
    }
}

impl Default for TomlGamepad {
    fn default() -> Self {
        TomlGamepad {
            quit: default_quit(),
            restart: default_restart(),
        }
    }
}

// ── Loading ──

impl GameConfig {
    /// Load config from `config.toml`.
    /// Search order: (1) exe directory, (2) current working directory.
    /// Missing file or missing keys gracefully fall back to defaults.
    pub fn load() -> Result<Self, ConfigError> {
        let text = find_config_text(&candidate_dirs()).unwrap_or_default();
        GameConfig::parse(&text)
    }

    /// Parse config text. Parse errors fall back to defaults with a warning,
    /// unless the text declares a `[level]` table.
    pub fn parse(text: &str) -> Result<Self, ConfigError> {
        let toml_cfg = match toml::from_str::<TomlConfig>(text) {
            Ok(cfg) => cfg,
            Err(e) if has_level_table(text) => return Err(ConfigError::Level(e)),
            Err(e) => {
                warn!(error = %e, "config.toml parse error, using defaults");
                TomlConfig::default()
            }
        };
        Ok(GameConfig::from_toml(toml_cfg))
    }

    fn from_toml(cfg: TomlConfig) -> Self {
        GameConfig {
            speed: SpeedConfig { fps: cfg.speed.fps.max(1) },
            render: RenderConfig { tile_size: cfg.render.tile_size.clamp(1, MAX_TILE_SIZE) },
            gamepad: GamepadConfig {
                quit: cfg.gamepad.quit,
                restart: cfg.gamepad.restart,
            },
            level: cfg.level.map,
        }
    }
}

fn has_level_table(text: &str) -> bool {
    text.lines().any(|l| l.trim_start().starts_with("[level"))
}

/// Candidate directories to search: exe dir + CWD (deduplicated).
fn candidate_dirs() -> Vec<PathBuf> {
    let mut dirs = vec![];

    // 1. Directory of the running executable
    if let Ok(exe) = std::env::current_exe() {
        let resolved = exe.canonicalize().unwrap_or(exe);
        if let Some(parent) = resolved.parent() {
            dirs.push(parent.to_path_buf());
        }
    }

    // 2. Current working directory
    if let Ok(cwd) = std::env::current_dir() {
        if !dirs.iter().any(|d| d == &cwd) {
            dirs.push(cwd);
        }
    }

    // 3. Fallback
    if dirs.is_empty() {
        dirs.push(PathBuf::from("."));
    }

    dirs
}

/// Read the first config.toml found in the candidate directories.
fn find_config_text(search_dirs: &[PathBuf]) -> Option<String> {
    for dir in search_dirs {
        let path = dir.join("config.toml");
        if path.exists() {
            return read_config(&path);
        }
    }
    info!("no config.toml found, using defaults");
    None
}

fn read_config(path: &Path) -> Option<String> {
    match std::fs::read_to_string(path) {
        Ok(text) => {
            info!(path = %path.display(), "config.toml found");
            Some(text)
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "could not read config.toml");
            None
        }
    }
}
