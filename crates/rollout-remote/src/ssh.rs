//! SSH execution
//!
//! Wraps the system `ssh` client, so keys, agents and ~/.ssh/config work
//! exactly as they do in a terminal.

use crate::command::{CommandOutput, CommandSpec};
use crate::error::{RemoteError, Result};
use crate::process::execute;
use crate::runner::{CommandRunner, Connector};
use crate::shell::remote_command_line;
use async_trait::async_trait;
use rollout_core::RemoteHost;
use std::time::Duration;

/// Exit status ssh reserves for its own failures
pub const SSH_ERROR_EXIT: i32 = 255;

/// Connection settings shared by the connector and its sessions
#[derive(Debug, Clone)]
pub struct SshOptions {
    /// ssh binary
    pub program: String,
    pub connect_timeout: Duration,
    pub command_timeout: Duration,
}

impl Default for SshOptions {
    fn default() -> Self {
        Self {
            program: "ssh".to_string(),
            connect_timeout: Duration::from_secs(10),
            command_timeout: Duration::from_secs(600),
        }
    }
}

/// Opens [`SshSession`]s to one host
#[derive(Debug, Clone)]
pub struct SshConnector {
    host: RemoteHost,
    options: SshOptions,
}

impl SshConnector {
    pub fn new(host: RemoteHost, options: SshOptions) -> Self {
        Self { host, options }
    }
}

#[async_trait]
impl Connector for SshConnector {
    fn target(&self) -> String {
        self.host.to_string()
    }

    /// Check the host with `true` so unreachable hosts and rejected keys
    /// surface before any repository command runs
    async fn connect(&self) -> Result<Box<dyn CommandRunner>> {
        let session = SshSession::new(self.host.clone(), self.options.clone());
        let check = CommandSpec::new("true");
        // connect timeout plus slack for the remote shell to start
        let limit = self.options.connect_timeout + Duration::from_secs(5);

        tracing::info!("Connecting to {}", self.host);
        let output = session
            .exec(&check, limit)
            .await
            .map_err(|e| RemoteError::ConnectionFailed {
                target: self.target(),
                reason: e.to_string(),
            })?;

        if !output.success() {
            let reason = match output.stderr.trim() {
                "" => format!("ssh exited with {:?}", output.code),
                stderr => stderr.to_string(),
            };
            return Err(RemoteError::ConnectionFailed {
                target: self.target(),
                reason,
            });
        }

        Ok(Box::new(session))
    }
}

/// Runs commands on the remote host, one ssh invocation per command
#[derive(Debug, Clone)]
pub struct SshSession {
    host: RemoteHost,
    options: SshOptions,
}

impl SshSession {
    pub fn new(host: RemoteHost, options: SshOptions) -> Self {
        Self { host, options }
    }

    /// Arguments passed to the ssh binary for `spec`
    pub fn ssh_args(&self, spec: &CommandSpec) -> Vec<String> {
        let mut args = vec![
            "-o".to_string(),
            "BatchMode=yes".to_string(),
            "-o".to_string(),
            format!(
                "ConnectTimeout={}",
                self.options.connect_timeout.as_secs().max(1)
            ),
        ];
        if let Some(port) = self.host.port {
            args.push("-p".to_string());
            args.push(port.to_string());
        }
        if let Some(identity) = &self.host.identity {
            args.push("-i".to_string());
            args.push(identity.to_string_lossy().to_string());
        }
        args.push("--".to_string());
        args.push(self.host.destination());
        args.push(remote_command_line(spec));
        args
    }

    async fn exec(&self, spec: &CommandSpec, timeout: Duration) -> Result<CommandOutput> {
        let label = format!("[{}] {}", self.host, spec);
        execute(
            &label,
            &self.options.program,
            &self.ssh_args(spec),
            None,
            spec.stdin.as_deref(),
            timeout,
        )
        .await
    }
}

#[async_trait]
impl CommandRunner for SshSession {
    fn location(&self) -> String {
        self.host.to_string()
    }

    async fn run(&self, spec: &CommandSpec) -> Result<CommandOutput> {
        let output = self.exec(spec, self.options.command_timeout).await?;

        if output.code == Some(SSH_ERROR_EXIT) {
            return Err(RemoteError::ConnectionFailed {
                target: self.host.to_string(),
                reason: output.stderr.trim().to_string(),
            });
        }

        Ok(output)
    }
}
