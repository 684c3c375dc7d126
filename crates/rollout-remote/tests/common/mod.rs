use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A stand-in `ssh` binary that runs the remote command line locally
///
/// The last argument is executed with `sh -c` and appended to a log, so
/// tests see exactly what the real remote shell would receive. HOME is
/// pointed at the fixture directory so `~/` paths resolve inside it.
pub struct FakeSsh {
    pub dir: TempDir,
}

impl FakeSsh {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let fake = Self { dir };
        fake.write_script(
            "ssh",
            &format!(
                "#!/bin/sh\nfor last; do :; done\nprintf '%s\\n' \"$last\" >> '{log}'\nexport HOME='{home}'\nexec sh -c \"$last\"\n",
                log = fake.log_path().display(),
                home = fake.home().display(),
            ),
        );
        fake.write_script(
            "ssh-unreachable",
            "#!/bin/sh\necho 'ssh: connect to host example.org port 22: Connection refused' >&2\nexit 255\n",
        );
        fake
    }

    pub fn program(&self) -> String {
        self.dir.path().join("ssh").to_string_lossy().to_string()
    }

    pub fn unreachable_program(&self) -> String {
        self.dir
            .path()
            .join("ssh-unreachable")
            .to_string_lossy()
            .to_string()
    }

    pub fn home(&self) -> PathBuf {
        self.dir.path().to_path_buf()
    }

    pub fn log_path(&self) -> PathBuf {
        self.dir.path().join("ssh.log")
    }

    pub fn logged_commands(&self) -> Vec<String> {
        fs::read_to_string(self.log_path())
            .unwrap_or_default()
            .lines()
            .map(|l| l.to_string())
            .collect()
    }

    pub fn write_script(&self, name: &str, content: &str) -> PathBuf {
        write_executable(&self.dir.path().join(name), content)
    }
}

pub fn write_executable(path: &Path, content: &str) -> PathBuf {
    fs::write(path, content).unwrap();
    let mut perms = fs::metadata(path).unwrap().permissions();
    perms.set_mode(0o755);
    fs::set_permissions(path, perms).unwrap();
    path.to_path_buf()
}
