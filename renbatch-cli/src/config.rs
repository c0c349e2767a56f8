use anyhow::{Context, Result};
use renbatch_core::{Exclusions, SessionOptions};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_DIR: &str = ".renbatch";
const CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub defaults: DefaultsConfig,

    #[serde(default)]
    pub exclude: ExcludeConfig,

    #[serde(default)]
    pub history: HistoryConfig,

    /// Append a timestamped record of every rename to this file
    #[serde(default)]
    pub log_file: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultsConfig {
    /// Default preview format: "table", "summary" or "json"
    #[serde(default = "default_preview")]
    pub preview_format: String,

    /// Whether to use color output by default (None = auto-detect)
    #[serde(default)]
    pub use_color: Option<bool>,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            preview_format: default_preview(),
            use_color: None,
        }
    }
}

/// Files the rename rules never touch
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExcludeConfig {
    /// Skip names ending with any of these
    #[serde(default = "default_suffixes")]
    pub suffixes: Vec<String>,

    /// Skip these exact names
    #[serde(default)]
    pub names: Vec<String>,
}

impl Default for ExcludeConfig {
    fn default() -> Self {
        Self {
            suffixes: default_suffixes(),
            names: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryConfig {
    /// Oldest batches are dropped beyond this many; 0 keeps all
    #[serde(default = "default_max_batches")]
    pub max_batches: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            max_batches: default_max_batches(),
        }
    }
}

fn default_preview() -> String {
    "table".to_string()
}

fn default_suffixes() -> Vec<String> {
    vec![".exe".to_string()]
}

fn default_max_batches() -> usize {
    50
}

impl Config {
    /// Load config from .renbatch/config.toml, falling back to the user config
    /// directory and then to defaults
    pub fn load() -> Result<Self> {
        if let Ok(cwd) = std::env::current_dir() {
            let config_path = cwd.join(CONFIG_DIR).join(CONFIG_FILE);
            if config_path.exists() {
                return Self::load_from_path(&config_path);
            }
        }

        if let Some(config_dir) = dirs::config_dir() {
            let config_path = config_dir.join("renbatch").join(CONFIG_FILE);
            if config_path.exists() {
                return Self::load_from_path(&config_path);
            }
        }

        Ok(Self::default())
    }

    /// Load config from a specific path
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config {}", path.display()))?;
        Ok(config)
    }

    /// Exclusion set described by the `[exclude]` section
    pub fn exclusions(&self) -> Exclusions {
        let mut exclusions = Exclusions::new();
        for suffix in &self.exclude.suffixes {
            exclusions.add_suffix(suffix.as_str());
        }
        for name in &self.exclude.names {
            exclusions.add_name(name.as_str());
        }
        exclusions
    }

    pub fn session_options(&self) -> SessionOptions {
        SessionOptions {
            exclusions: self.exclusions(),
            max_batches: (self.history.max_batches > 0).then_some(self.history.max_batches),
            log_file: self.log_file.clone(),
        }
    }
}
