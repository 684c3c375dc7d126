use crate::step::DeployStep;
use rollout_core::Revision;
use serde::{Deserialize, Serialize};

/// What a deploy run did
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "result", rename_all = "kebab-case")]
pub enum Outcome {
    /// Remote already runs the local revision; nothing was touched
    UpToDate { revision: Revision },

    /// Every step completed
    Deployed { previous: Revision, current: Revision },

    /// Dry run: the steps that would have run
    Planned {
        previous: Revision,
        current: Revision,
        steps: Vec<PlannedStep>,
    },
}

impl Outcome {
    pub fn is_noop(&self) -> bool {
        matches!(self, Outcome::UpToDate { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlannedStep {
    pub step: DeployStep,
    /// Command line as it would run on the remote
    pub command: String,
}

/// Local and remote revisions side by side
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevisionStatus {
    pub target: String,
    pub local: Revision,
    pub remote: Revision,
    pub up_to_date: bool,
}

impl RevisionStatus {
    pub fn new(target: impl Into<String>, local: Revision, remote: Revision) -> Self {
        let up_to_date = local == remote;
        Self {
            target: target.into(),
            local,
            remote,
            up_to_date,
        }
    }
}
