use colored::Colorize;
use rollout_core::DeployConfig;
use rollout_deploy::Deployer;

pub async fn handle(config: &DeployConfig, json: bool) -> anyhow::Result<()> {
    let (local, connector) = super::runners(config);
    let status = Deployer::new(config, &local, &connector).status().await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&status)?);
        return Ok(());
    }

    println!("{} {}", "Target:".bold(), status.target.cyan());
    println!("  local:  {}", status.local.as_str());
    println!("  remote: {}", status.remote.as_str());
    println!();
    if status.up_to_date {
        println!("{}", "✓ Up to date".green().bold());
    } else {
        println!(
            "{}",
            "⚠ Remote differs, run `rollout update` to deploy".yellow()
        );
    }

    Ok(())
}
