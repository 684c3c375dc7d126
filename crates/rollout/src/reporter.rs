use colored::Colorize;
use rollout_core::Revision;
use rollout_deploy::{DeployStep, Reporter};

/// Prints deploy progress to stdout
pub struct ConsoleReporter;

impl Reporter for ConsoleReporter {
    fn revisions(&self, local: &Revision, remote: &Revision) {
        println!("  local:  {}", local.short().cyan());
        println!("  remote: {}", remote.short().cyan());
    }

    fn up_to_date(&self, revision: &Revision) {
        println!();
        println!(
            "{}",
            format!("✓ Already up to date ({})", revision.short())
                .green()
                .bold()
        );
    }

    fn step_started(&self, step: DeployStep, index: usize, total: usize) {
        println!();
        println!(
            "{} {}",
            format!("[{}/{}]", index, total).dimmed(),
            step.name().blue()
        );
    }

    fn step_finished(&self, _step: DeployStep) {
        println!("  {}", "✓ done".green());
    }

    fn step_tolerated(&self, _step: DeployStep, reason: &str) {
        println!("  {} {}", "⚠ skipped:".yellow(), reason);
    }

    fn template_rendered(&self, output: &str, replacements: usize) {
        println!(
            "  wrote {} ({} replacement{})",
            output.cyan(),
            replacements,
            if replacements == 1 { "" } else { "s" }
        );
    }
}
