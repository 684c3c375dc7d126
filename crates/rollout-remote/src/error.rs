//! Command execution error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum RemoteError {
    #[error("failed to start {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("`{command}` timed out after {secs}s")]
    Timeout { command: String, secs: u64 },

    #[error("`{command}` failed ({}): {}", exit_label(.code), stderr_label(.stderr))]
    Failed {
        command: String,
        code: Option<i32>,
        stderr: String,
    },

    #[error("cannot connect to {target}: {reason}")]
    ConnectionFailed { target: String, reason: String },

    #[error("unexpected output from `{command}`: {reason}")]
    InvalidOutput { command: String, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl RemoteError {
    /// stderr of a failed command, empty for other errors
    pub fn stderr(&self) -> &str {
        match self {
            RemoteError::Failed { stderr, .. } => stderr,
            _ => "",
        }
    }
}

fn exit_label(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exit code {}", code),
        None => "killed by signal".to_string(),
    }
}

fn stderr_label(stderr: &str) -> &str {
    if stderr.is_empty() {
        "(no output)"
    } else {
        stderr
    }
}

pub type Result<T> = std::result::Result<T, RemoteError>;
