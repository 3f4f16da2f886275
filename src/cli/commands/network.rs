use super::print_json;
use ad_manager::api::{AdManagerClient, Error};
use ad_manager::versions::{v202202, v202205};
use anyhow::Result;
use clap::Args;
use log::info;

#[derive(Args)]
pub struct NetworkCommands {
    /// List every network the user can access instead of the current one
    #[arg(short, long)]
    pub all: bool,

    /// Pretty print the output
    #[arg(short, long)]
    pub pretty: bool,
}

pub async fn network_command(client: &AdManagerClient, version: &str, args: NetworkCommands) -> Result<()> {
    info!("Fetching network info with {}", version);

    match (version, args.all) {
        (v202202::VERSION, false) => {
            let service = client.service::<v202202::NetworkService>().await?;
            print_json(&service.get_current_network().await?, args.pretty)
        }
        (v202202::VERSION, true) => {
            let service = client.service::<v202202::NetworkService>().await?;
            print_json(&service.get_all_networks().await?, args.pretty)
        }
        (v202205::VERSION, false) => {
            let service = client.service::<v202205::NetworkService>().await?;
            print_json(&service.get_current_network().await?, args.pretty)
        }
        (v202205::VERSION, true) => {
            let service = client.service::<v202205::NetworkService>().await?;
            print_json(&service.get_all_networks().await?, args.pretty)
        }
        (other, _) => Err(Error::UnsupportedVersion(other.to_string()).into()),
    }
}
