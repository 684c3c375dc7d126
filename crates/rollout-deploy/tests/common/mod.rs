#![allow(dead_code)]

use async_trait::async_trait;
use rollout_core::{BuildSpec, DeployConfig, RemoteHost, Revision};
use rollout_deploy::{DeployStep, Reporter};
use rollout_remote::{CommandOutput, CommandRunner, CommandSpec, Connector, RemoteError};
use std::collections::{HashMap, HashSet};
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

pub const REMOTE_REPO: &str = "/src/poputchiki/";

pub const TEMPLATE: &str = "FROM golang:1.4\nENV APP_REVISION VERSION\nADD . /go/src/kafe\nLABEL revision=VERSION\n";

/// Configuration of the kafe deployment used throughout the tests
pub fn kafe_config() -> DeployConfig {
    DeployConfig {
        remote: RemoteHost {
            host: "msk1.cydev.ru".to_string(),
            user: Some("root".to_string()),
            port: Some(122),
            identity: None,
        },
        local_repo_path: PathBuf::from("."),
        remote_repo_path: REMOTE_REPO.to_string(),
        build: BuildSpec {
            image: "cydev/kafe".to_string(),
            ..Default::default()
        },
        container: "kafe".to_string(),
        proxy: "nginx".to_string(),
        restart_helper: "~/poputchiki.sh".to_string(),
        ..Default::default()
    }
}

pub fn rev(s: &str) -> Revision {
    Revision::parse(s).unwrap()
}

/// One command a fake host received
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Call {
    pub cwd: Option<String>,
    pub command: String,
}

#[derive(Default)]
struct State {
    head: String,
    /// HEAD after a successful pull
    upstream_head: Option<String>,
    calls: Vec<Call>,
    failures: HashMap<String, CommandOutput>,
    timeouts: HashSet<String>,
    files: HashMap<String, Vec<u8>>,
}

/// In-memory stand-in for a git checkout plus container runtime
///
/// `rev-parse HEAD` prints the configured head, `pull` moves it to the
/// upstream head, `cat`/`tee` read and write an in-memory file table.
/// Everything else succeeds unless a failure was injected for its exact
/// command line.
#[derive(Clone, Default)]
pub struct FakeHost {
    state: Arc<Mutex<State>>,
}

impl FakeHost {
    pub fn at(head: &str) -> Self {
        let host = Self::default();
        host.state.lock().unwrap().head = head.to_string();
        host
    }

    /// Remote checkout at `head` holding the build-file template
    pub fn remote(head: &str) -> Self {
        let host = Self::at(head);
        host.put_file("Dockerfile.template", TEMPLATE);
        host
    }

    pub fn with_upstream(self, head: &str) -> Self {
        self.state.lock().unwrap().upstream_head = Some(head.to_string());
        self
    }

    pub fn fail(&self, command: &str, code: i32, stderr: &str) {
        self.state
            .lock()
            .unwrap()
            .failures
            .insert(command.to_string(), CommandOutput::failed(code, stderr));
    }

    pub fn time_out(&self, command: &str) {
        self.state
            .lock()
            .unwrap()
            .timeouts
            .insert(command.to_string());
    }

    pub fn put_file(&self, path: &str, content: impl Into<Vec<u8>>) {
        self.state
            .lock()
            .unwrap()
            .files
            .insert(path.to_string(), content.into());
    }

    pub fn file(&self, path: &str) -> Option<String> {
        self.file_bytes(path)
            .map(|bytes| String::from_utf8(bytes).unwrap())
    }

    pub fn file_bytes(&self, path: &str) -> Option<Vec<u8>> {
        self.state.lock().unwrap().files.get(path).cloned()
    }

    pub fn head(&self) -> String {
        self.state.lock().unwrap().head.clone()
    }

    pub fn calls(&self) -> Vec<Call> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn commands(&self) -> Vec<String> {
        self.calls().into_iter().map(|c| c.command).collect()
    }

    pub fn ran(&self, command: &str) -> bool {
        self.commands().iter().any(|c| c == command)
    }
}

#[async_trait]
impl CommandRunner for FakeHost {
    fn location(&self) -> String {
        "fake".to_string()
    }

    async fn run(&self, spec: &CommandSpec) -> Result<CommandOutput, RemoteError> {
        let command = spec.to_string();
        let mut state = self.state.lock().unwrap();
        state.calls.push(Call {
            cwd: spec.cwd.clone(),
            command: command.clone(),
        });

        if state.timeouts.contains(&command) {
            return Err(RemoteError::Timeout { command, secs: 600 });
        }
        if let Some(output) = state.failures.get(&command) {
            return Ok(output.clone());
        }

        let args: Vec<&str> = spec.args.iter().map(String::as_str).collect();
        let output = match (spec.program.as_str(), args.as_slice()) {
            (_, ["rev-parse", "HEAD"]) => CommandOutput::ok(format!("{}\n", state.head)),
            (_, ["pull", ..]) => {
                if let Some(head) = state.upstream_head.clone() {
                    state.head = head;
                }
                CommandOutput::ok("Already up to date.\n")
            }
            ("cat", [path]) => match state.files.get(*path) {
                Some(content) => CommandOutput::ok(content.clone()),
                None => CommandOutput::failed(
                    1,
                    format!("cat: {}: No such file or directory\n", path),
                ),
            },
            ("tee", [path]) => {
                let content = spec.stdin.clone().unwrap_or_default();
                state.files.insert(path.to_string(), content.clone());
                CommandOutput::ok(content)
            }
            _ => CommandOutput::ok(""),
        };
        Ok(output)
    }
}

/// Hands out sessions on a [`FakeHost`], or refuses to connect
pub struct FakeConnector {
    host: FakeHost,
    reachable: bool,
    connects: AtomicUsize,
}

impl FakeConnector {
    pub fn new(host: FakeHost) -> Self {
        Self {
            host,
            reachable: true,
            connects: AtomicUsize::new(0),
        }
    }

    pub fn unreachable(host: FakeHost) -> Self {
        Self {
            reachable: false,
            ..Self::new(host)
        }
    }

    pub fn connects(&self) -> usize {
        self.connects.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Connector for FakeConnector {
    fn target(&self) -> String {
        "root@msk1.cydev.ru:122".to_string()
    }

    async fn connect(&self) -> Result<Box<dyn CommandRunner>, RemoteError> {
        self.connects.fetch_add(1, Ordering::SeqCst);
        if !self.reachable {
            return Err(RemoteError::ConnectionFailed {
                target: self.target(),
                reason: "Connection refused".to_string(),
            });
        }
        Ok(Box::new(self.host.clone()))
    }
}

/// Collects reporter callbacks as strings
#[derive(Default)]
pub struct RecordingReporter {
    events: Mutex<Vec<String>>,
}

impl RecordingReporter {
    pub fn events(&self) -> Vec<String> {
        self.events.lock().unwrap().clone()
    }

    fn push(&self, event: String) {
        self.events.lock().unwrap().push(event);
    }
}

impl Reporter for RecordingReporter {
    fn revisions(&self, local: &Revision, remote: &Revision) {
        self.push(format!("revisions {} {}", local, remote));
    }

    fn up_to_date(&self, revision: &Revision) {
        self.push(format!("up-to-date {}", revision));
    }

    fn step_finished(&self, step: DeployStep) {
        self.push(format!("finished {}", step));
    }

    fn step_tolerated(&self, step: DeployStep, reason: &str) {
        self.push(format!("tolerated {}: {}", step, reason));
    }

    fn template_rendered(&self, output: &str, replacements: usize) {
        self.push(format!("rendered {} ({})", output, replacements));
    }
}
