use ad_manager::api::{AdManagerClient, VersionRegistry};
use ad_manager::config::Config;
use anyhow::{Context, Result};
use clap::Parser;
use log::{debug, info};

mod cli;

use cli::commands::{network_command, users_command, versions_command};
use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logger to file (truncate on each run)
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open("ad-manager.log")?;
    env_logger::Builder::from_default_env()
        .target(env_logger::Target::Pipe(Box::new(log_file)))
        .init();

    let cli = Cli::parse();
    info!("Starting ad-manager");

    if let Commands::Versions = cli.command {
        versions_command(&VersionRegistry::builtin());
        return Ok(());
    }

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    let client = AdManagerClient::from_config(&config)?;

    let version = cli
        .version_tag
        .or_else(|| config.api.default_version.clone())
        .or_else(|| client.registry().latest().map(str::to_string))
        .context("No API versions are registered")?;
    debug!("Using API version {}", version);

    match cli.command {
        Commands::Network(args) => network_command(&client, &version, args).await?,
        Commands::Users(args) => users_command(&client, &version, args).await?,
        Commands::Versions => {}
    }

    info!("Done");
    Ok(())
}
