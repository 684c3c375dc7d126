//! Revision-gated deploy pipeline
//!
//! [`Deployer`] compares the local and remote git revisions and, when
//! they differ, runs the [`DeployStep`]s on the remote host in order.
//!
//! ```ignore
//! use rollout_deploy::Deployer;
//! use rollout_remote::{LocalRunner, SshConnector, SshOptions};
//!
//! let local = LocalRunner::new(config.timeouts.command());
//! let connector = SshConnector::new(config.remote.clone(), SshOptions::default());
//! let outcome = Deployer::new(&config, &local, &connector).run().await?;
//! ```

pub mod error;
pub mod outcome;
pub mod pipeline;
pub mod reporter;
pub mod step;

pub use error::{DeployError, Result, VcsError};
pub use outcome::{Outcome, PlannedStep, RevisionStatus};
pub use pipeline::Deployer;
pub use reporter::{Reporter, SilentReporter};
pub use step::DeployStep;
