use super::{BuildSpec, RemoteHost, Tools, Upstream};
use crate::error::{CoreError, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_COMMAND_TIMEOUT_SECS: u64 = 600;
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

/// Everything one `rollout update` needs
///
/// Built once at startup from the config file and environment, then
/// passed down explicitly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeployConfig {
    pub remote: RemoteHost,

    /// Local checkout whose HEAD is deployed
    pub local_repo_path: PathBuf,

    /// Checkout path on the remote host
    pub remote_repo_path: String,

    pub upstream: Upstream,
    pub build: BuildSpec,

    /// Primary container replaced on every deploy
    pub container: String,

    /// Proxy container restarted after the helper
    pub proxy: String,

    /// Helper script that brings the new container up
    pub restart_helper: String,

    pub tools: Tools,
    pub timeouts: Timeouts,
}

impl Default for DeployConfig {
    fn default() -> Self {
        Self {
            remote: RemoteHost::default(),
            local_repo_path: PathBuf::from("."),
            remote_repo_path: String::new(),
            upstream: Upstream::default(),
            build: BuildSpec::default(),
            container: String::new(),
            proxy: String::new(),
            restart_helper: String::new(),
            tools: Tools::default(),
            timeouts: Timeouts::default(),
        }
    }
}

impl DeployConfig {
    /// Check that every required setting is present and usable
    pub fn validate(&self) -> Result<()> {
        let required = [
            ("remote host", self.remote.host.as_str()),
            ("remote repository path", self.remote_repo_path.as_str()),
            ("build image", self.build.image.as_str()),
            ("build template", self.build.template.as_str()),
            ("build output", self.build.output.as_str()),
            ("build placeholder", self.build.placeholder.as_str()),
            ("container", self.container.as_str()),
            ("proxy", self.proxy.as_str()),
            ("restart helper", self.restart_helper.as_str()),
            ("git binary", self.tools.git.as_str()),
            ("container runtime binary", self.tools.container.as_str()),
        ];
        for (name, value) in required {
            if value.trim().is_empty() {
                return Err(CoreError::MissingField(name));
            }
        }

        if self.local_repo_path.as_os_str().is_empty() {
            return Err(CoreError::MissingField("local repository path"));
        }

        if self.remote.port == Some(0) {
            return Err(CoreError::InvalidConfig(
                "remote port must be between 1 and 65535".to_string(),
            ));
        }

        if self.build.template == self.build.output {
            return Err(CoreError::InvalidConfig(format!(
                "build template and output are the same file: {}",
                self.build.template
            )));
        }

        self.timeouts.validate()
    }
}

/// Per-command limits, in seconds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timeouts {
    pub command_secs: u64,
    pub connect_secs: u64,
}

impl Default for Timeouts {
    fn default() -> Self {
        Self {
            command_secs: DEFAULT_COMMAND_TIMEOUT_SECS,
            connect_secs: DEFAULT_CONNECT_TIMEOUT_SECS,
        }
    }
}

impl Timeouts {
    pub fn command(&self) -> Duration {
        Duration::from_secs(self.command_secs)
    }

    pub fn connect(&self) -> Duration {
        Duration::from_secs(self.connect_secs)
    }

    fn validate(&self) -> Result<()> {
        if self.command_secs == 0 {
            return Err(CoreError::InvalidConfig(
                "command timeout must be greater than 0".to_string(),
            ));
        }
        if self.connect_secs == 0 {
            return Err(CoreError::InvalidConfig(
                "connect timeout must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}
