use rollout_remote::RemoteError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Mutating steps run on the remote host, in order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DeployStep {
    /// Discard local modifications in the remote checkout
    Reset,
    /// Fetch and merge the upstream branch
    Pull,
    /// Write the build file with the revision substituted
    RenderTemplate,
    BuildImage,
    /// Stop the running container; a missing or stopped container is fine
    StopContainer,
    /// Remove the stopped container; a missing container is fine
    RemoveContainer,
    /// Run the external restart helper
    RestartHelper,
    RestartProxy,
}

impl DeployStep {
    pub const ALL: [DeployStep; 8] = [
        DeployStep::Reset,
        DeployStep::Pull,
        DeployStep::RenderTemplate,
        DeployStep::BuildImage,
        DeployStep::StopContainer,
        DeployStep::RemoveContainer,
        DeployStep::RestartHelper,
        DeployStep::RestartProxy,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            DeployStep::Reset => "reset",
            DeployStep::Pull => "pull",
            DeployStep::RenderTemplate => "render-template",
            DeployStep::BuildImage => "build-image",
            DeployStep::StopContainer => "stop-container",
            DeployStep::RemoveContainer => "remove-container",
            DeployStep::RestartHelper => "restart-helper",
            DeployStep::RestartProxy => "restart-proxy",
        }
    }

    /// Whether `err` from this step should be logged and skipped
    ///
    /// Only the two cleanup steps tolerate anything, and only the runtime
    /// reporting that the container is already gone or already stopped.
    /// Any other failure, including a timeout, stays fatal.
    pub fn tolerates(&self, err: &RemoteError) -> bool {
        let RemoteError::Failed { stderr, .. } = err else {
            return false;
        };
        let stderr = stderr.to_lowercase();
        let missing = MISSING_CONTAINER.iter().any(|m| stderr.contains(m));

        match self {
            DeployStep::StopContainer => missing || stderr.contains("is not running"),
            DeployStep::RemoveContainer => missing,
            _ => false,
        }
    }
}

/// Lowercased runtime messages for a container that does not exist
/// (docker, podman)
const MISSING_CONTAINER: [&str; 2] = ["no such container", "no container with name or id"];

impl fmt::Display for DeployStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
