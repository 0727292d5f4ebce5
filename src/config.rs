use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::ConfigError;
use crate::scanner::{parse_size, ListOptions, DEFAULT_MIN_SIZE};
use crate::tui::UiOptions;

/// Root configuration structure
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub explorer: ExplorerConfig,
    pub tui: TuiConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExplorerConfig {
    /// Entries smaller than this many bytes are hidden
    pub min_size: u64,
    /// Show directories whatever their reported size
    pub exempt_directories: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TuiConfig {
    /// Disable colors
    pub no_color: bool,
    /// Show free space of the root filesystem in the header
    pub show_disk_usage: bool,
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        Self {
            min_size: DEFAULT_MIN_SIZE,
            exempt_directories: false,
        }
    }
}

impl Default for TuiConfig {
    fn default() -> Self {
        Self {
            no_color: false,
            show_disk_usage: true,
        }
    }
}

impl Config {
    /// Default config file location (`~/.config/purgo/config.toml` on Linux)
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("purgo").join("config.toml"))
    }

    /// Load configuration.
    ///
    /// An explicit path must exist. Without one, the default location is used
    /// if present, otherwise built-in defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::from_file(path),
            None => match Self::default_path() {
                Some(path) if path.is_file() => Self::from_file(&path),
                _ => Ok(Self::default()),
            },
        }
    }

    /// Read and parse a TOML config file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadError {
            path: path.to_path_buf(),
            source,
        })?;

        toml::from_str(&content).map_err(|source| ConfigError::ParseError {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Apply a `--min-size` value from the command line, if any.
    pub fn with_min_size_arg(mut self, arg: Option<&str>) -> Result<Self, ConfigError> {
        if let Some(arg) = arg {
            self.explorer.min_size = parse_size(arg).ok_or_else(|| {
                ConfigError::Invalid(format!(
                    "min size must be a non-negative byte count (e.g. 1048576 or 1MB), got '{}'",
                    arg
                ))
            })?;
        }
        Ok(self)
    }

    pub fn list_options(&self) -> ListOptions {
        ListOptions::new()
            .with_min_size(self.explorer.min_size)
            .with_exempt_directories(self.explorer.exempt_directories)
    }

    pub fn ui_options(&self) -> UiOptions {
        UiOptions {
            no_color: self.tui.no_color,
            show_disk_usage: self.tui.show_disk_usage,
        }
    }
}
