pub mod network;
pub mod users;
pub mod versions;

pub use network::network_command;
pub use users::users_command;
pub use versions::versions_command;

use serde::Serialize;

pub(crate) fn print_json<T: Serialize>(value: &T, pretty: bool) -> anyhow::Result<()> {
    let output = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{}", output);
    Ok(())
}
