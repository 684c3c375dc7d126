//! Environment overrides
//!
//! ROLLOUT_* variables override values read from the config file, so a
//! CI job or a one-off run can retarget a deploy without editing KDL.

use crate::error::{CoreError, Result};
use crate::model::DeployConfig;
use std::path::PathBuf;

pub const REMOTE_HOST: &str = "ROLLOUT_REMOTE_HOST";
pub const REMOTE_USER: &str = "ROLLOUT_REMOTE_USER";
pub const REMOTE_PORT: &str = "ROLLOUT_REMOTE_PORT";
pub const REMOTE_REPO: &str = "ROLLOUT_REMOTE_REPO";
pub const LOCAL_REPO: &str = "ROLLOUT_LOCAL_REPO";
pub const IMAGE: &str = "ROLLOUT_IMAGE";
pub const CONTAINER: &str = "ROLLOUT_CONTAINER";
pub const PROXY: &str = "ROLLOUT_PROXY";
pub const RESTART_HELPER: &str = "ROLLOUT_RESTART_HELPER";
pub const COMMAND_TIMEOUT: &str = "ROLLOUT_COMMAND_TIMEOUT";

/// Every variable [`apply_process_env`] reads
pub const ALL: [&str; 10] = [
    REMOTE_HOST,
    REMOTE_USER,
    REMOTE_PORT,
    REMOTE_REPO,
    LOCAL_REPO,
    IMAGE,
    CONTAINER,
    PROXY,
    RESTART_HELPER,
    COMMAND_TIMEOUT,
];

/// Apply overrides from the process environment
pub fn apply_process_env(config: &mut DeployConfig) -> Result<()> {
    apply_overrides(config, |key| std::env::var(key).ok())
}

/// Apply overrides from an arbitrary lookup; empty values are ignored
pub fn apply_overrides<F>(config: &mut DeployConfig, lookup: F) -> Result<()>
where
    F: Fn(&str) -> Option<String>,
{
    let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

    if let Some(host) = get(REMOTE_HOST) {
        config.remote.host = host;
    }
    if let Some(user) = get(REMOTE_USER) {
        config.remote.user = Some(user);
    }
    if let Some(port) = get(REMOTE_PORT) {
        let port = port
            .trim()
            .parse::<u16>()
            .ok()
            .filter(|p| *p > 0)
            .ok_or_else(|| CoreError::InvalidEnv {
                var: REMOTE_PORT,
                message: format!("'{}' is not a valid port", port),
            })?;
        config.remote.port = Some(port);
    }
    if let Some(path) = get(REMOTE_REPO) {
        config.remote_repo_path = path;
    }
    if let Some(path) = get(LOCAL_REPO) {
        config.local_repo_path = PathBuf::from(path);
    }
    if let Some(image) = get(IMAGE) {
        config.build.image = image;
    }
    if let Some(container) = get(CONTAINER) {
        config.container = container;
    }
    if let Some(proxy) = get(PROXY) {
        config.proxy = proxy;
    }
    if let Some(helper) = get(RESTART_HELPER) {
        config.restart_helper = helper;
    }
    if let Some(secs) = get(COMMAND_TIMEOUT) {
        config.timeouts.command_secs = secs
            .trim()
            .parse::<u64>()
            .ok()
            .filter(|s| *s > 0)
            .ok_or_else(|| CoreError::InvalidEnv {
                var: COMMAND_TIMEOUT,
                message: format!("'{}' is not a positive number of seconds", secs),
            })?;
    }

    Ok(())
}
