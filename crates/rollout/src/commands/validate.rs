use colored::Colorize;
use rollout_core::LoadedConfig;

pub fn handle(loaded: &LoadedConfig) {
    let config = &loaded.config;

    println!(
        "{} {}",
        "Config file:".blue(),
        loaded.source.display().to_string().cyan()
    );
    println!("{}", "✓ Configuration is valid".green().bold());
    println!();
    println!("Summary:");
    println!("  remote:          {}", config.remote.to_string().cyan());
    if let Some(identity) = &config.remote.identity {
        println!("  identity:        {}", identity.display());
    }
    println!(
        "  repository:      {} -> {}",
        config.local_repo_path.display(),
        config.remote_repo_path.cyan()
    );
    println!(
        "  upstream:        {} {}",
        config.upstream.remote, config.upstream.branch
    );
    println!(
        "  build:           {} -> {} ({} = revision)",
        config.build.template, config.build.output, config.build.placeholder
    );
    println!("  image:           {}", config.build.image.cyan());
    println!("  container:       {}", config.container.cyan());
    println!("  proxy:           {}", config.proxy.cyan());
    println!("  restart helper:  {}", config.restart_helper);
    println!(
        "  tools:           {}, {}",
        config.tools.git, config.tools.container
    );
    println!(
        "  timeouts:        command {}s, connect {}s",
        config.timeouts.command_secs, config.timeouts.connect_secs
    );
}
