use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("config directory not found")]
    ConfigDirNotFound,

    #[error(
        "no rollout config file found. Looked in:\n\
        - current directory: rollout.local.kdl, .rollout.local.kdl, rollout.kdl, .rollout.kdl\n\
        - ./.rollout/ directory\n\
        - ~/.config/rollout/rollout.kdl\n\
        Use --config or the ROLLOUT_CONFIG environment variable to point at one directly"
    )]
    ConfigFileNotFound,

    #[error("config file does not exist: {0}")]
    ExplicitPathMissing(PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ConfigError>;
