pub mod api;
pub mod auth;
pub mod config;
pub mod versions;

pub use api::{AdManagerClient, Error, Result, Statement, StatementBuilder};
pub use auth::Credential;
pub use config::Config;
