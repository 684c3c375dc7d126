//! Deploy pipeline
//!
//! 1. read the local revision
//! 2. connect to the remote host and read its revision
//! 3. stop if they are equal
//! 4. otherwise run every [`DeployStep`] in order, aborting on the first
//!    failure that the step does not tolerate
//!
//! Nothing is retried.

use crate::error::{DeployError, Result, VcsError};
use crate::outcome::{Outcome, PlannedStep, RevisionStatus};
use crate::reporter::{Reporter, SilentReporter};
use crate::step::DeployStep;
use rollout_core::{DeployConfig, Revision, TemplateRenderer};
use rollout_remote::{CommandRunner, CommandSpec, Connector, RemoteError};
use tracing::{debug, info, warn};

static SILENT: SilentReporter = SilentReporter;

pub struct Deployer<'a> {
    config: &'a DeployConfig,
    local: &'a dyn CommandRunner,
    connector: &'a dyn Connector,
    reporter: &'a dyn Reporter,
}

impl<'a> Deployer<'a> {
    pub fn new(
        config: &'a DeployConfig,
        local: &'a dyn CommandRunner,
        connector: &'a dyn Connector,
    ) -> Self {
        Self {
            config,
            local,
            connector,
            reporter: &SILENT,
        }
    }

    pub fn with_reporter(mut self, reporter: &'a dyn Reporter) -> Self {
        self.reporter = reporter;
        self
    }

    /// Deploy the local revision if the remote differs
    pub async fn run(&self) -> Result<Outcome> {
        let (session, status) = self.compare().await?;
        if status.up_to_date {
            info!(revision = %status.local, "Remote already up to date");
            self.reporter.up_to_date(&status.local);
            return Ok(Outcome::UpToDate {
                revision: status.local,
            });
        }

        info!(from = %status.remote, to = %status.local, "Deploying");
        self.apply(session.as_ref(), &status.local).await?;

        Ok(Outcome::Deployed {
            previous: status.remote,
            current: status.local,
        })
    }

    /// Compare revisions and list the steps a deploy would run, without
    /// running any of them
    pub async fn plan(&self) -> Result<Outcome> {
        let (_session, status) = self.compare().await?;
        if status.up_to_date {
            self.reporter.up_to_date(&status.local);
            return Ok(Outcome::UpToDate {
                revision: status.local,
            });
        }

        let steps = DeployStep::ALL
            .iter()
            .map(|&step| PlannedStep {
                step,
                command: self.describe(step),
            })
            .collect();

        Ok(Outcome::Planned {
            previous: status.remote,
            current: status.local,
            steps,
        })
    }

    /// Read both revisions without changing anything
    pub async fn status(&self) -> Result<RevisionStatus> {
        let (_session, status) = self.compare().await?;
        Ok(status)
    }

    /// `git rev-parse HEAD` in the local checkout
    pub async fn local_revision(&self) -> Result<Revision> {
        let path = self.config.local_repo_path.clone();
        let spec = self
            .git(["rev-parse", "HEAD"])
            .current_dir(path.to_string_lossy());

        read_revision(self.local, &spec)
            .await
            .map_err(|source| DeployError::LocalVcs { path, source })
    }

    async fn remote_revision(&self, session: &dyn CommandRunner) -> Result<Revision> {
        let spec = self.remote_git(["rev-parse", "HEAD"]);

        read_revision(session, &spec)
            .await
            .map_err(|source| DeployError::RemoteVcs {
                path: self.config.remote_repo_path.clone(),
                source,
            })
    }

    async fn compare(&self) -> Result<(Box<dyn CommandRunner>, RevisionStatus)> {
        let local = self.local_revision().await?;
        debug!(revision = %local, "Local revision");

        let session = self
            .connector
            .connect()
            .await
            .map_err(DeployError::Connection)?;

        let remote = self.remote_revision(session.as_ref()).await?;
        debug!(revision = %remote, "Remote revision");

        self.reporter.revisions(&local, &remote);
        let status = RevisionStatus::new(self.connector.target(), local, remote);
        Ok((session, status))
    }

    async fn apply(&self, session: &dyn CommandRunner, revision: &Revision) -> Result<()> {
        let total = DeployStep::ALL.len();

        for (index, step) in DeployStep::ALL.into_iter().enumerate() {
            self.reporter.step_started(step, index + 1, total);
            info!(step = %step, "Running step {}/{}", index + 1, total);

            let result = match step {
                DeployStep::RenderTemplate => self.render_template(session, revision).await,
                _ => session
                    .run_checked(&self.step_command(step))
                    .await
                    .map(|_| ()),
            };

            match result {
                Ok(()) => self.reporter.step_finished(step),
                Err(err) if step.tolerates(&err) => {
                    warn!(step = %step, "Ignoring failure: {}", err);
                    self.reporter.step_tolerated(step, err.stderr());
                }
                Err(source) => return Err(DeployError::Step { step, source }),
            }
        }

        Ok(())
    }

    /// Read the template on the remote, substitute the revision locally
    /// and write the result back through stdin
    async fn render_template(
        &self,
        session: &dyn CommandRunner,
        revision: &Revision,
    ) -> std::result::Result<(), RemoteError> {
        let build = &self.config.build;

        let template = session
            .run_checked(&self.in_remote_repo(CommandSpec::new("cat").arg(&build.template)))
            .await?
            .stdout_bytes;

        let renderer = TemplateRenderer::new(&build.placeholder);
        let rendered = renderer.render_bytes(&template, revision);
        if rendered.replacements == 0 {
            warn!(
                "Template {} has no '{}' placeholder",
                build.template, build.placeholder
            );
        }

        session
            .run_checked(
                &self.in_remote_repo(
                    CommandSpec::new("tee")
                        .arg(&build.output)
                        .stdin(rendered.content),
                ),
            )
            .await?;

        self.reporter
            .template_rendered(&build.output, rendered.replacements);
        Ok(())
    }

    /// Command run by every step except template rendering
    fn step_command(&self, step: DeployStep) -> CommandSpec {
        let config = self.config;
        match step {
            DeployStep::Reset => self.remote_git(["reset", "--hard"]),
            DeployStep::Pull => self.remote_git([
                "pull",
                config.upstream.remote.as_str(),
                config.upstream.branch.as_str(),
            ]),
            DeployStep::BuildImage => self.runtime([
                "build",
                "-t",
                config.build.image.as_str(),
                "-f",
                config.build.output.as_str(),
                ".",
            ]),
            DeployStep::StopContainer => self.runtime(["stop", config.container.as_str()]),
            DeployStep::RemoveContainer => self.runtime(["rm", config.container.as_str()]),
            DeployStep::RestartHelper => {
                self.in_remote_repo(CommandSpec::new(config.restart_helper.as_str()))
            }
            DeployStep::RestartProxy => self.runtime(["restart", config.proxy.as_str()]),
            DeployStep::RenderTemplate => self.in_remote_repo(
                CommandSpec::new("tee").arg(config.build.output.as_str()),
            ),
        }
    }

    fn describe(&self, step: DeployStep) -> String {
        match step {
            DeployStep::RenderTemplate => format!(
                "render {} -> {} ({} = revision)",
                self.config.build.template, self.config.build.output, self.config.build.placeholder
            ),
            _ => self.step_command(step).to_string(),
        }
    }

    fn git<const N: usize>(&self, args: [&str; N]) -> CommandSpec {
        CommandSpec::new(self.config.tools.git.as_str()).args(args)
    }

    fn remote_git<const N: usize>(&self, args: [&str; N]) -> CommandSpec {
        self.in_remote_repo(self.git(args))
    }

    fn runtime<const N: usize>(&self, args: [&str; N]) -> CommandSpec {
        self.in_remote_repo(CommandSpec::new(self.config.tools.container.as_str()).args(args))
    }

    fn in_remote_repo(&self, spec: CommandSpec) -> CommandSpec {
        spec.current_dir(self.config.remote_repo_path.as_str())
    }
}

async fn read_revision(
    runner: &dyn CommandRunner,
    spec: &CommandSpec,
) -> std::result::Result<Revision, VcsError> {
    let output = runner.run_checked(spec).await?;
    Ok(Revision::parse(&output.stdout)?)
}
