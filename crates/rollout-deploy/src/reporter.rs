//! Progress callbacks
//!
//! The pipeline stays free of terminal output; the CLI plugs in a
//! reporter that prints, tests use [`SilentReporter`].

use crate::step::DeployStep;
use rollout_core::Revision;

#[allow(unused_variables)]
pub trait Reporter: Send + Sync {
    fn revisions(&self, local: &Revision, remote: &Revision) {}

    fn up_to_date(&self, revision: &Revision) {}

    fn step_started(&self, step: DeployStep, index: usize, total: usize) {}

    fn step_finished(&self, step: DeployStep) {}

    /// A cleanup step failed in a way that is allowed
    fn step_tolerated(&self, step: DeployStep, reason: &str) {}

    fn template_rendered(&self, output: &str, replacements: usize) {}
}

/// Reports nothing
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentReporter;

impl Reporter for SilentReporter {}
