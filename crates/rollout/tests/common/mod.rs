#![allow(deprecated)]
#![allow(dead_code)]

use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub const KAFE_CONFIG: &str = r#"
remote "msk1.cydev.ru" user="root" port=122
repository "/src/poputchiki/" {
    upstream "origin" branch="master"
}
build image="cydev/kafe"
container "kafe"
proxy "nginx"
restart-helper "~/poputchiki.sh"
"#;

const ENV_VARS: [&str; 11] = [
    "ROLLOUT_CONFIG",
    "ROLLOUT_REMOTE_HOST",
    "ROLLOUT_REMOTE_USER",
    "ROLLOUT_REMOTE_PORT",
    "ROLLOUT_REMOTE_REPO",
    "ROLLOUT_LOCAL_REPO",
    "ROLLOUT_IMAGE",
    "ROLLOUT_CONTAINER",
    "ROLLOUT_PROXY",
    "ROLLOUT_RESTART_HELPER",
    "ROLLOUT_COMMAND_TIMEOUT",
];

/// Scratch directory that doubles as cwd and HOME
pub struct TestProject {
    pub root: TempDir,
}

impl TestProject {
    pub fn new() -> Self {
        let root = tempfile::tempdir().unwrap();
        Self { root }
    }

    pub fn path(&self) -> PathBuf {
        self.root.path().to_path_buf()
    }

    pub fn write_config(&self, name: &str, content: &str) -> PathBuf {
        let path = self.root.path().join(name);
        fs::write(&path, content).unwrap();
        path
    }

    /// `rollout` running in the project, isolated from the caller's
    /// environment and global config
    pub fn command(&self) -> Command {
        rollout_in(self.root.path())
    }
}

pub fn rollout_in(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("rollout").unwrap();
    cmd.current_dir(dir)
        .env("HOME", dir)
        .env("XDG_CONFIG_HOME", dir.join(".config"))
        .env_remove("RUST_LOG");
    for var in ENV_VARS {
        cmd.env_remove(var);
    }
    cmd
}

/// A local git checkout plus a clone of it standing in for the remote
/// checkout, with `ssh`, `docker` and the restart helper replaced by
/// scripts on PATH. The fake `ssh` runs the remote command line locally.
#[cfg(unix)]
pub struct DeployFixture {
    pub project: TestProject,
}

#[cfg(unix)]
impl DeployFixture {
    pub fn new() -> Self {
        let fixture = Self {
            project: TestProject::new(),
        };
        fs::create_dir(fixture.bin()).unwrap();
        fixture.script(
            "ssh",
            "#!/bin/sh\nfor last; do :; done\nexec sh -c \"$last\"\n",
        );
        fixture.stub_docker("exit 0");
        fixture.stub_helper("exit 0");

        let local = fixture.local();
        fs::create_dir(&local).unwrap();
        fixture.git(&local, &["-c", "init.defaultBranch=master", "init", "-q"]);
        fs::write(
            local.join("Dockerfile.template"),
            "FROM golang:1.4\nENV APP_REVISION VERSION\n",
        )
        .unwrap();
        fixture.git(&local, &["add", "Dockerfile.template"]);
        fixture.git(&local, &["commit", "-q", "-m", "initial"]);

        let remote = fixture.remote();
        fixture.git(
            fixture.project.root.path(),
            &["clone", "-q", &local.to_string_lossy(), &remote.to_string_lossy()],
        );

        fixture.project.write_config(
            "rollout.kdl",
            &format!(
                r#"
remote "localhost"
repository "{remote}" {{
    local "{local}"
    upstream "origin" branch="master"
}}
build image="cydev/kafe"
container "kafe"
proxy "nginx"
restart-helper "{bin}/restart.sh"
tools container="{bin}/docker"
timeouts command=30 connect=5
"#,
                remote = remote.display(),
                local = local.display(),
                bin = fixture.bin().display(),
            ),
        );
        fixture
    }

    pub fn local(&self) -> PathBuf {
        self.project.path().join("local")
    }

    pub fn remote(&self) -> PathBuf {
        self.project.path().join("remote")
    }

    pub fn bin(&self) -> PathBuf {
        self.project.path().join("bin")
    }

    /// Shell body of the `docker` stand-in; `$1` is the subcommand
    pub fn stub_docker(&self, body: &str) {
        self.script("docker", &format!("#!/bin/sh\n{}\n", body));
    }

    pub fn stub_helper(&self, body: &str) {
        self.script("restart.sh", &format!("#!/bin/sh\n{}\n", body));
    }

    /// New commit in the local checkout only
    pub fn commit_locally(&self, message: &str) {
        let local = self.local();
        fs::write(local.join("CHANGELOG"), message).unwrap();
        self.git(&local, &["add", "CHANGELOG"]);
        self.git(&local, &["commit", "-q", "-m", message]);
    }

    pub fn head(&self, dir: &Path) -> String {
        self.git(dir, &["rev-parse", "HEAD"])
    }

    /// `rollout` with the stand-ins first on PATH
    pub fn command(&self) -> Command {
        let path = format!(
            "{}:{}",
            self.bin().display(),
            std::env::var("PATH").unwrap_or_default()
        );
        let mut cmd = self.project.command();
        cmd.env("PATH", path).env("GIT_CONFIG_NOSYSTEM", "1");
        cmd
    }

    fn script(&self, name: &str, content: &str) {
        use std::os::unix::fs::PermissionsExt;

        let path = self.bin().join(name);
        fs::write(&path, content).unwrap();
        let mut perms = fs::metadata(&path).unwrap().permissions();
        perms.set_mode(0o755);
        fs::set_permissions(&path, perms).unwrap();
    }

    fn git(&self, dir: &Path, args: &[&str]) -> String {
        let output = std::process::Command::new("git")
            .args([
                "-c",
                "user.name=rollout",
                "-c",
                "user.email=rollout@example.com",
                "-c",
                "commit.gpgsign=false",
            ])
            .args(args)
            .current_dir(dir)
            .env("HOME", self.project.path())
            .env("GIT_CONFIG_NOSYSTEM", "1")
            .output()
            .unwrap();
        assert!(
            output.status.success(),
            "git {:?} failed: {}",
            args,
            String::from_utf8_lossy(&output.stderr)
        );
        String::from_utf8_lossy(&output.stdout).trim().to_string()
    }
}
