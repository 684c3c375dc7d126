//! Model definitions
//!
//! The deploy target, the build settings and the tools rollout drives.

mod build;
mod deploy;
mod remote;

pub use build::*;
pub use deploy::*;
pub use remote::*;

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_default_config() {
        let config = DeployConfig::default();

        assert_eq!(config.local_repo_path, std::path::PathBuf::from("."));
        assert_eq!(config.upstream.remote, "origin");
        assert_eq!(config.upstream.branch, "master");
        assert_eq!(config.build.template, "Dockerfile.template");
        assert_eq!(config.build.output, "Dockerfile");
        assert_eq!(config.build.placeholder, "VERSION");
        assert_eq!(config.tools.git, "git");
        assert_eq!(config.tools.container, "docker");
        assert_eq!(config.timeouts.command(), Duration::from_secs(600));
        assert_eq!(config.timeouts.connect(), Duration::from_secs(10));
    }

    #[test]
    fn test_default_config_fails_validation() {
        let result = DeployConfig::default().validate();
        assert!(matches!(
            result,
            Err(crate::CoreError::MissingField("remote host"))
        ));
    }
}
