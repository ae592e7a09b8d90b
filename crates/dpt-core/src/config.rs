//! Configuration types for dpt.
//!
//! [`Config::load`] reads `~/.config/dpt/config.toml`, creating it with
//! hardcoded defaults if it does not yet exist. [`Config::defaults`] returns
//! the same defaults without touching the filesystem (useful in tests).

use chrono::format::{Item, StrftimeItems};
use serde::Deserialize;
use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// Embedded defaults
// ---------------------------------------------------------------------------

const DEFAULT_CONFIG: &str = r#"
[storage]
# data_file = "/home/me/.local/share/dpt/store.json"

[catalog]
# path = "/home/me/patents.json"

[search]
score         = "none"
fixed_score   = 80
similar_limit = 3

[display]
timestamp_format = "%Y-%m-%d %H:%M"
"#;

// ---------------------------------------------------------------------------
// Public config types
// ---------------------------------------------------------------------------

/// Top-level application configuration, loaded from `~/.config/dpt/config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub display: DisplayConfig,
}

/// `[storage]` section of `config.toml`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StorageConfig {
    /// Key-value store file holding history and watchlists. Defaults to
    /// `$XDG_DATA_HOME/dpt/store.json`.
    #[serde(default)]
    pub data_file: Option<PathBuf>,
}

impl StorageConfig {
    pub fn data_file(&self) -> PathBuf {
        self.data_file.clone().unwrap_or_else(default_data_file)
    }
}

/// `[catalog]` section of `config.toml`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CatalogConfig {
    /// JSON array of records. The built-in sample catalog is used when unset.
    #[serde(default)]
    pub path: Option<PathBuf>,
}

/// How search results are scored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoreMode {
    #[default]
    None,
    Fixed,
}

/// `[search]` section of `config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchConfig {
    #[serde(default)]
    pub score: ScoreMode,
    #[serde(default = "default_fixed_score")]
    pub fixed_score: u8,
    #[serde(default = "default_similar_limit")]
    pub similar_limit: usize,
}

fn default_fixed_score() -> u8 { 80 }
fn default_similar_limit() -> usize { 3 }

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            score: ScoreMode::default(),
            fixed_score: default_fixed_score(),
            similar_limit: default_similar_limit(),
        }
    }
}

/// `[display]` section of `config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct DisplayConfig {
    #[serde(default = "default_timestamp_format")]
    pub timestamp_format: String,
}

fn default_timestamp_format() -> String { "%Y-%m-%d %H:%M".to_string() }

impl DisplayConfig {
    /// Replace an invalid strftime pattern with the default, since chrono
    /// fails at print time on unknown specifiers.
    fn sanitize(&mut self) {
        let invalid = StrftimeItems::new(&self.timestamp_format)
            .any(|item| matches!(item, Item::Error));
        if invalid {
            tracing::warn!(
                format = %self.timestamp_format,
                "config: invalid [display] timestamp_format, using default"
            );
            self.timestamp_format = default_timestamp_format();
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            timestamp_format: default_timestamp_format(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::defaults()
    }
}

impl Config {
    /// Load from `~/.config/dpt/config.toml`, layered on top of the built-in
    /// defaults. Creates the file with defaults if it does not exist.
    pub fn load() -> anyhow::Result<Self> {
        let path = config_path();

        if !path.exists() {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(&path, DEFAULT_CONFIG.trim_start())?;
        }

        Self::load_from(&path)
    }

    /// Load `path` layered on top of the built-in defaults. A missing file
    /// yields the defaults; an invalid `timestamp_format` falls back to the
    /// default pattern.
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let mut cfg: Self = config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .add_source(config::File::from(path).required(false))
            .build()?
            .try_deserialize()?;
        cfg.display.sanitize();
        Ok(cfg)
    }

    /// Return the built-in defaults without touching the filesystem.
    pub fn defaults() -> Self {
        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .build()
            .expect("built-in default config must be valid TOML")
            .try_deserialize()
            .expect("built-in default config must deserialize correctly")
    }
}

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

fn home_dir() -> PathBuf {
    PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".to_string()))
}

fn config_path() -> PathBuf {
    std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| home_dir().join(".config"))
        .join("dpt")
        .join("config.toml")
}

fn default_data_file() -> PathBuf {
    std::env::var("XDG_DATA_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| home_dir().join(".local").join("share"))
        .join("dpt")
        .join("store.json")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
