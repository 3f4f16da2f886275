use super::print_json;
use ad_manager::api::{AdManagerClient, ByStatement, Error, StatementBuilder};
use ad_manager::versions::{v202202, v202205};
use anyhow::Result;
use clap::Args;
use colored::*;
use log::info;

#[derive(Args)]
pub struct UsersCommands {
    /// PQL condition, e.g. "isActive = true"
    #[arg(short, long = "where")]
    pub where_clause: Option<String>,

    /// Page size
    #[arg(short, long, default_value_t = 50)]
    pub limit: u32,

    /// Rows to skip
    #[arg(long, default_value_t = 0)]
    pub offset: u32,

    /// Pretty print the output
    #[arg(short, long)]
    pub pretty: bool,
}

pub async fn users_command(client: &AdManagerClient, version: &str, args: UsersCommands) -> Result<()> {
    let mut builder = StatementBuilder::new()
        .order_by("id", true)
        .limit(args.limit)
        .offset(args.offset);
    if let Some(condition) = args.where_clause.as_deref() {
        builder = builder.where_clause(condition);
    }
    let statement = builder.to_statement();
    info!("Listing users with {}: {}", version, statement.query());

    let (shown, total) = match version {
        v202202::VERSION => {
            let page = client
                .service::<v202202::UserService>()
                .await?
                .get_by_statement(&statement)
                .await?;
            print_json(&page.results, args.pretty)?;
            (page.len(), page.total_result_set_size)
        }
        v202205::VERSION => {
            let page = client
                .service::<v202205::UserService>()
                .await?
                .get_by_statement(&statement)
                .await?;
            print_json(&page.results, args.pretty)?;
            (page.len(), page.total_result_set_size)
        }
        other => return Err(Error::UnsupportedVersion(other.to_string()).into()),
    };

    eprintln!(
        "{}",
        format!("{} of {} users (offset {})", shown, total, args.offset).dimmed()
    );
    Ok(())
}
