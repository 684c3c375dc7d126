//! Command execution for rollout
//!
//! Every external tool rollout drives (git, docker, the restart helper)
//! is invoked as an argument vector through a [`CommandRunner`]: either
//! [`LocalRunner`] on this machine or [`SshSession`] on the deploy
//! target. Each invocation is bounded by a timeout.
//!
//! ```ignore
//! use rollout_remote::{CommandSpec, Connector, SshConnector, SshOptions};
//!
//! let connector = SshConnector::new(config.remote.clone(), SshOptions::default());
//! let session = connector.connect().await?;
//! let head = session
//!     .run_checked(&CommandSpec::new("git").args(["rev-parse", "HEAD"]))
//!     .await?;
//! ```

pub mod command;
pub mod error;
mod process;
pub mod runner;
pub mod shell;
pub mod ssh;

pub use command::{CommandOutput, CommandSpec};
pub use error::{RemoteError, Result};
pub use runner::{CommandRunner, Connector, LocalRunner};
pub use ssh::{SSH_ERROR_EXIT, SshConnector, SshOptions, SshSession};
