use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("KDL parse error: {0}")]
    KdlParse(#[from] kdl::KdlError),

    #[error("file read error: {0}")]
    Io(#[from] std::io::Error),

    #[error("IO error: {path}\nreason: {message}")]
    IoError { path: PathBuf, message: String },

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("missing required setting '{0}'\nhint: set it in rollout.kdl or through its ROLLOUT_* environment variable")]
    MissingField(&'static str),

    #[error("invalid value in {var}: {message}")]
    InvalidEnv { var: &'static str, message: String },

    #[error(transparent)]
    Discovery(#[from] rollout_config::ConfigError),
}

pub type Result<T> = std::result::Result<T, CoreError>;
