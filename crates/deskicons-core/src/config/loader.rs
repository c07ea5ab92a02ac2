use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::Config;

/// Returns the config directory: `~/.config/deskicons/`.
pub fn config_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".config").join("deskicons"))
}

/// Returns the config file path: `~/.config/deskicons/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|d| d.join("config.toml"))
}

/// Tries to load and parse a config file.
///
/// A missing file yields `Ok(None)`. Other failures are returned as a
/// message naming the file.
pub fn try_load_from(path: &Path) -> Result<Option<Config>, String> {
    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(format!("{}: {e}", path.display())),
    };
    let mut config: Config =
        toml::from_str(&content).map_err(|e| format!("{}: {e}", path.display()))?;
    config.validate();
    Ok(Some(config))
}

/// Loads a config file, falling back to defaults.
///
/// Missing files silently return defaults; other errors are printed as
/// a warning.
pub fn load_from(path: &Path) -> Config {
    match try_load_from(path) {
        Ok(Some(config)) => config,
        Ok(None) => Config::default(),
        Err(e) => {
            eprintln!("Warning: {e}");
            Config::default()
        }
    }
}

/// Loads `~/.config/deskicons/config.toml`, falling back to defaults.
pub fn load() -> Config {
    match config_path() {
        Some(path) => load_from(&path),
        None => Config::default(),
    }
}
