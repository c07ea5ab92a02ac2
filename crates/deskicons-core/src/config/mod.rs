mod loader;
pub mod template;

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::listview::DEFAULT_TEXT_CAPACITY;
use crate::log::LogConfig;

pub use loader::{config_dir, config_path, load, load_from, try_load_from};

/// Smallest text buffer that can hold one character and its terminator.
const MIN_TEXT_CAPACITY: usize = 2;
const MAX_TEXT_CAPACITY: usize = 4096;

/// Top-level configuration for Deskicons.
///
/// Loaded from `~/.config/deskicons/config.toml`. Missing sections
/// fall back to defaults thanks to `#[serde(default)]`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Where quick saves go.
    pub layout: LayoutFileConfig,
    /// Remote buffer sizing.
    pub listview: ListViewConfig,
    /// File logging.
    pub logging: LogConfig,
}

/// Quick-save location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutFileConfig {
    /// Layout file. Relative paths resolve against the config directory.
    pub file: PathBuf,
}

impl Default for LayoutFileConfig {
    fn default() -> Self {
        Self {
            file: PathBuf::from("icon_layout.json"),
        }
    }
}

/// List-view controller settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListViewConfig {
    /// Capacity of the remote text buffer in UTF-16 units, terminator included.
    pub text_capacity: usize,
}

impl Default for ListViewConfig {
    fn default() -> Self {
        Self {
            text_capacity: DEFAULT_TEXT_CAPACITY,
        }
    }
}

impl Config {
    /// Clamps values to ranges the controller can work with.
    pub fn validate(&mut self) {
        self.listview.text_capacity = self
            .listview
            .text_capacity
            .clamp(MIN_TEXT_CAPACITY, MAX_TEXT_CAPACITY);
    }

    /// Resolves the quick-save file against `base` when it is relative.
    pub fn layout_path_in(&self, base: &Path) -> PathBuf {
        if self.layout.file.is_absolute() {
            self.layout.file.clone()
        } else {
            base.join(&self.layout.file)
        }
    }

    /// Resolves the quick-save file against the config directory.
    pub fn layout_path(&self) -> Option<PathBuf> {
        if self.layout.file.is_absolute() {
            return Some(self.layout.file.clone());
        }
        config_dir().map(|dir| self.layout_path_in(&dir))
    }
}
