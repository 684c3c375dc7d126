//! Spawning a local child process with a timeout

use crate::command::CommandOutput;
use crate::error::{RemoteError, Result};
use std::process::Stdio;
use std::time::Duration;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

/// Run `program args...` to completion and capture its output
///
/// `label` is what appears in logs and errors. The child is killed if
/// `timeout` expires.
pub(crate) async fn execute(
    label: &str,
    program: &str,
    args: &[String],
    cwd: Option<&str>,
    stdin: Option<&[u8]>,
    timeout: Duration,
) -> Result<CommandOutput> {
    let mut cmd = Command::new(program);
    cmd.args(args);
    if let Some(dir) = cwd {
        cmd.current_dir(dir);
    }
    cmd.stdin(if stdin.is_some() {
        Stdio::piped()
    } else {
        Stdio::null()
    });
    cmd.stdout(Stdio::piped());
    cmd.stderr(Stdio::piped());
    cmd.kill_on_drop(true);

    tracing::debug!("Running: {}", label);

    let mut child = cmd.spawn().map_err(|source| RemoteError::Spawn {
        program: program.to_string(),
        source,
    })?;

    // Feed stdin from a separate task so a chatty child cannot block on a
    // full stdout pipe while we are still writing.
    let writer = match (stdin, child.stdin.take()) {
        (Some(input), Some(mut pipe)) => {
            let input = input.to_vec();
            Some(tokio::spawn(async move {
                let result = pipe.write_all(&input).await;
                drop(pipe);
                result
            }))
        }
        _ => None,
    };

    let output = match tokio::time::timeout(timeout, child.wait_with_output()).await {
        Ok(output) => output?,
        Err(_) => {
            tracing::warn!("Timed out after {:?}: {}", timeout, label);
            return Err(RemoteError::Timeout {
                command: label.to_string(),
                secs: timeout.as_secs(),
            });
        }
    };

    if let Some(writer) = writer
        && let Ok(Err(e)) = writer.await
    {
        // A child that exits without reading stdin closes the pipe early;
        // its exit status below is what matters.
        tracing::debug!("stdin write to {} ended early: {}", program, e);
    }

    let result = CommandOutput::from_bytes(
        output.status.code(),
        output.stdout,
        String::from_utf8_lossy(&output.stderr).to_string(),
    );
    tracing::debug!(code = ?result.code, "Finished: {}", label);

    Ok(result)
}
