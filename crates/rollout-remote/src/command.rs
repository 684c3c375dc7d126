use std::fmt;

/// One external command, as an argument vector
///
/// Arguments are never passed through a local shell. Over SSH each one
/// is quoted individually before the remote command line is assembled.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandSpec {
    pub program: String,
    pub args: Vec<String>,
    /// Working directory (on whichever host runs the command)
    pub cwd: Option<String>,
    /// Bytes written to the command's stdin
    pub stdin: Option<Vec<u8>>,
}

impl CommandSpec {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            ..Default::default()
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn current_dir(mut self, dir: impl Into<String>) -> Self {
        self.cwd = Some(dir.into());
        self
    }

    pub fn stdin(mut self, input: impl Into<Vec<u8>>) -> Self {
        self.stdin = Some(input.into());
        self
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

/// Captured result of a finished command
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// Exit code, `None` when killed by a signal
    pub code: Option<i32>,
    /// stdout decoded as UTF-8, invalid sequences replaced
    pub stdout: String,
    /// stdout exactly as the command wrote it
    pub stdout_bytes: Vec<u8>,
    pub stderr: String,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }

    pub fn ok(stdout: impl Into<Vec<u8>>) -> Self {
        Self::from_bytes(Some(0), stdout.into(), String::new())
    }

    pub fn failed(code: i32, stderr: impl Into<String>) -> Self {
        Self::from_bytes(Some(code), Vec::new(), stderr.into())
    }

    pub fn from_bytes(code: Option<i32>, stdout: Vec<u8>, stderr: String) -> Self {
        Self {
            code,
            stdout: String::from_utf8_lossy(&stdout).to_string(),
            stdout_bytes: stdout,
            stderr,
        }
    }
}
