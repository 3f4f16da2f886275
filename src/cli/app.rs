use super::commands::network::NetworkCommands;
use super::commands::users::UsersCommands;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "ad-manager")]
#[command(about = "A CLI tool for querying an Ad Manager network")]
pub struct Cli {
    /// Config file (defaults to the per-user config directory)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// API version to call, e.g. v202202
    #[arg(long = "version-tag", global = true)]
    pub version_tag: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show the current network
    Network(NetworkCommands),
    /// List users matching a filter
    Users(UsersCommands),
    /// List registered API versions and their services
    Versions,
}
