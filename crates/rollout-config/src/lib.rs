pub mod error;

pub use error::*;

use std::path::{Path, PathBuf};

/// Environment variable that points directly at a config file
pub const CONFIG_ENV_VAR: &str = "ROLLOUT_CONFIG";

/// File names searched in a directory, highest priority first
pub const CANDIDATES: [&str; 4] = [
    "rollout.local.kdl",
    ".rollout.local.kdl",
    "rollout.kdl",
    ".rollout.kdl",
];

/// Path of the global config file (~/.config/rollout/rollout.kdl)
pub fn global_config_path() -> Result<PathBuf> {
    let config_dir = dirs::config_dir().ok_or(ConfigError::ConfigDirNotFound)?;
    Ok(config_dir.join("rollout").join("rollout.kdl"))
}

/// Find the rollout config file
///
/// Search order:
/// 1. `explicit` (the `--config` flag)
/// 2. the ROLLOUT_CONFIG environment variable
/// 3. the current directory: rollout.local.kdl, .rollout.local.kdl, rollout.kdl, .rollout.kdl
/// 4. `./.rollout/` with the same names
/// 5. ~/.config/rollout/rollout.kdl
///
/// An explicitly named file that does not exist is an error rather than
/// falling through to the next location.
pub fn find_config_file(explicit: Option<&Path>) -> Result<PathBuf> {
    if let Some(path) = explicit {
        return existing(path.to_path_buf());
    }

    if let Ok(config_path) = std::env::var(CONFIG_ENV_VAR)
        && !config_path.is_empty()
    {
        return existing(PathBuf::from(config_path));
    }

    let current_dir = std::env::current_dir()?;
    if let Some(path) = find_config_file_in(&current_dir) {
        return Ok(path);
    }

    if let Ok(global) = global_config_path()
        && global.is_file()
    {
        tracing::debug!("Using global config: {}", global.display());
        return Ok(global);
    }

    Err(ConfigError::ConfigFileNotFound)
}

/// Look for a config file in `dir` and then in `dir/.rollout/`
pub fn find_config_file_in(dir: &Path) -> Option<PathBuf> {
    let search_dirs = [dir.to_path_buf(), dir.join(".rollout")];

    for search_dir in &search_dirs {
        if !search_dir.is_dir() {
            continue;
        }
        for filename in &CANDIDATES {
            let path = search_dir.join(filename);
            if path.is_file() {
                tracing::debug!("Found config: {}", path.display());
                return Some(path);
            }
        }
    }

    None
}

fn existing(path: PathBuf) -> Result<PathBuf> {
    if path.is_file() {
        Ok(path)
    } else {
        Err(ConfigError::ExplicitPathMissing(path))
    }
}
