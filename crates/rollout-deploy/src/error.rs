//! Deploy error types

use crate::step::DeployStep;
use rollout_core::InvalidRevision;
use rollout_remote::RemoteError;
use std::path::PathBuf;
use thiserror::Error;

/// Why a revision could not be read
#[derive(Error, Debug)]
pub enum VcsError {
    #[error(transparent)]
    Command(#[from] RemoteError),

    #[error("git printed an invalid revision: {0}")]
    Revision(#[from] InvalidRevision),
}

#[derive(Error, Debug)]
pub enum DeployError {
    #[error("cannot read local revision in {}: {source}", .path.display())]
    LocalVcs {
        path: PathBuf,
        #[source]
        source: VcsError,
    },

    #[error("{0}")]
    Connection(#[source] RemoteError),

    #[error("cannot read remote revision in {path}: {source}")]
    RemoteVcs {
        path: String,
        #[source]
        source: VcsError,
    },

    #[error("step '{step}' failed: {source}")]
    Step {
        step: DeployStep,
        #[source]
        source: RemoteError,
    },
}

impl DeployError {
    /// The deploy step that failed, if the failure happened after the
    /// revision comparison
    pub fn step(&self) -> Option<DeployStep> {
        match self {
            DeployError::Step { step, .. } => Some(*step),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, DeployError>;
