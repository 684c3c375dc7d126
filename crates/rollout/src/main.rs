mod commands;
mod reporter;

use clap::{Parser, Subcommand};
use colored::Colorize;
use rollout_core::LoadedConfig;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "rollout")]
#[command(
    about = "Deploy the current git revision to a remote docker host",
    long_about = None
)]
struct Cli {
    /// Config file (default: ROLLOUT_CONFIG, then rollout.kdl in the
    /// current directory, then ~/.config/rollout/rollout.kdl)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Show debug logs
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Deploy the local revision if the remote runs a different one
    Update {
        /// Compare revisions and print the steps without running them
        #[arg(long)]
        dry_run: bool,
    },
    /// Compare the local and remote revisions
    Status {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Validate the configuration
    Validate,
    /// Show version
    Version,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    // no config needed
    if matches!(cli.command, Commands::Version) {
        println!("rollout {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    let loaded = load(cli.config.as_deref());

    match cli.command {
        Commands::Update { dry_run } => {
            commands::update::handle(&loaded.config, dry_run).await?;
        }
        Commands::Status { json } => {
            commands::status::handle(&loaded.config, json).await?;
        }
        Commands::Validate => {
            commands::validate::handle(&loaded);
        }
        Commands::Version => {
            unreachable!("Version is handled before config loading");
        }
    }

    Ok(())
}

/// Logs go to stderr so `status --json` stays parseable
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn load(explicit: Option<&Path>) -> LoadedConfig {
    match rollout_core::load_config(explicit) {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!("{}", "✗ Configuration error".red().bold());
            eprintln!("  {}", e);
            eprintln!();
            eprintln!("Create rollout.kdl in the current directory or pass --config <path>");
            std::process::exit(1);
        }
    }
}
