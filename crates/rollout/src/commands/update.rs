use crate::reporter::ConsoleReporter;
use colored::Colorize;
use rollout_core::DeployConfig;
use rollout_deploy::{DeployError, DeployStep, Deployer, Outcome};
use rollout_remote::{Connector, RemoteError};

pub async fn handle(config: &DeployConfig, dry_run: bool) -> anyhow::Result<()> {
    let (local, connector) = super::runners(config);
    let reporter = ConsoleReporter;

    println!(
        "{} {}",
        "Checking revisions on".blue(),
        connector.target().cyan()
    );

    let deployer = Deployer::new(config, &local, &connector).with_reporter(&reporter);
    let result = if dry_run {
        deployer.plan().await
    } else {
        deployer.run().await
    };

    match result {
        Ok(Outcome::UpToDate { .. }) => {}
        Ok(Outcome::Deployed { previous, current }) => {
            println!();
            println!(
                "{}",
                format!("✓ Deployed {} (was {})", current.short(), previous.short())
                    .green()
                    .bold()
            );
        }
        Ok(Outcome::Planned { steps, .. }) => {
            println!();
            println!("{}", "Dry run, would run:".yellow().bold());
            for (index, planned) in steps.iter().enumerate() {
                println!(
                    "  {} {:<16} {}",
                    format!("{}.", index + 1).dimmed(),
                    planned.step.name().cyan(),
                    planned.command
                );
            }
        }
        Err(e) => {
            report_failure(&e);
            std::process::exit(1);
        }
    }

    Ok(())
}

fn report_failure(err: &DeployError) {
    eprintln!();
    let title = match err {
        DeployError::LocalVcs { .. } => "✗ Cannot read the local revision".to_string(),
        DeployError::Connection(_) => "✗ Cannot connect to the remote host".to_string(),
        DeployError::RemoteVcs { .. } => "✗ Cannot read the remote revision".to_string(),
        DeployError::Step { step, .. } => format!("✗ Deploy failed at step '{}'", step),
    };
    eprintln!("{}", title.red().bold());
    eprintln!("  {}", err);
    if let Some(hint) = failure_hint(err) {
        eprintln!("  {} {}", "hint:".yellow(), hint);
    }
}

/// Extra context for failures whose message can mislead
fn failure_hint(err: &DeployError) -> Option<&'static str> {
    match err {
        // ssh reports its own failures as exit 255, so a helper exiting
        // with 255 looks like a dropped connection
        DeployError::Step {
            step: DeployStep::RestartHelper,
            source: RemoteError::ConnectionFailed { .. },
        } => Some("the restart helper itself may have exited with status 255"),
        _ => None,
    }
}
