//! Config loader
//!
//! Ties together file discovery, KDL parsing, environment overrides and
//! validation.

use crate::env::apply_process_env;
use crate::error::Result;
use crate::model::DeployConfig;
use crate::parser::parse_kdl_file;
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument};

/// A validated config together with the file it came from
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub source: PathBuf,
    pub config: DeployConfig,
}

/// Discover, parse, override from the environment and validate
#[instrument]
pub fn load_config(explicit: Option<&Path>) -> Result<LoadedConfig> {
    let source = rollout_config::find_config_file(explicit)?;
    load_config_from_path(&source)
}

/// Load a specific file, applying environment overrides
#[instrument(fields(path = %path.display()))]
pub fn load_config_from_path(path: &Path) -> Result<LoadedConfig> {
    debug!("Parsing config");
    let mut config = parse_kdl_file(path)?;

    debug!("Applying environment overrides");
    apply_process_env(&mut config)?;

    config.validate()?;
    info!(remote = %config.remote, container = %config.container, "Config loaded");

    Ok(LoadedConfig {
        source: path.to_path_buf(),
        config,
    })
}
