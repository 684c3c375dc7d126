//! Command runner abstraction
//!
//! The deploy pipeline talks to the local checkout and to the remote
//! host through the same trait, which is also the seam tests mock.

use crate::command::{CommandOutput, CommandSpec};
use crate::error::{RemoteError, Result};
use crate::process::execute;
use async_trait::async_trait;
use std::time::Duration;

/// Something that can run a [`CommandSpec`] somewhere
#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// Where commands run, for messages ("local", "root@host:122")
    fn location(&self) -> String;

    /// Run a command and return its output whatever the exit code
    async fn run(&self, spec: &CommandSpec) -> Result<CommandOutput>;

    /// Run a command, turning a nonzero exit into [`RemoteError::Failed`]
    async fn run_checked(&self, spec: &CommandSpec) -> Result<CommandOutput> {
        let output = self.run(spec).await?;
        if output.success() {
            Ok(output)
        } else {
            Err(RemoteError::Failed {
                command: spec.to_string(),
                code: output.code,
                stderr: output.stderr.trim().to_string(),
            })
        }
    }
}

/// Opens a session on the deploy target
#[async_trait]
pub trait Connector: Send + Sync {
    /// Human readable target
    fn target(&self) -> String;

    /// Establish the session; fails with [`RemoteError::ConnectionFailed`]
    async fn connect(&self) -> Result<Box<dyn CommandRunner>>;
}

/// Runs commands on this machine
#[derive(Debug, Clone)]
pub struct LocalRunner {
    timeout: Duration,
}

impl LocalRunner {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

#[async_trait]
impl CommandRunner for LocalRunner {
    fn location(&self) -> String {
        "local".to_string()
    }

    async fn run(&self, spec: &CommandSpec) -> Result<CommandOutput> {
        execute(
            &spec.to_string(),
            &spec.program,
            &spec.args,
            spec.cwd.as_deref(),
            spec.stdin.as_deref(),
            self.timeout,
        )
        .await
    }
}
