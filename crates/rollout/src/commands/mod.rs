pub mod status;
pub mod update;
pub mod validate;

use rollout_core::DeployConfig;
use rollout_remote::{LocalRunner, SshConnector, SshOptions};

/// Local runner and SSH connector for `config`
pub fn runners(config: &DeployConfig) -> (LocalRunner, SshConnector) {
    let local = LocalRunner::new(config.timeouts.command());
    let options = SshOptions {
        connect_timeout: config.timeouts.connect(),
        command_timeout: config.timeouts.command(),
        ..Default::default()
    };
    let connector = SshConnector::new(config.remote.clone(), options);
    (local, connector)
}
