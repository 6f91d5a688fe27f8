//! Command dispatch: bridges CLI args -> client calls -> output formatting.

pub mod clients;
pub mod config_cmd;
pub mod devices;
pub mod events;
pub mod groups;
pub mod session;
pub mod settings;
pub mod sites;
pub mod util;

use omada_api::OmadaClient;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Dispatch a controller-bound command to the appropriate handler.
pub async fn dispatch(
    cmd: Command,
    client: &OmadaClient,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match cmd {
        Command::Status => session::status(client, global).await,
        Command::Whoami => session::whoami(client, global).await,
        Command::Sites(args) => sites::list(client, &args, global).await,
        Command::SiteKey { name } => sites::site_key(client, name.as_deref(), global).await,
        Command::Scenarios => sites::scenarios(client, global).await,
        Command::Clients(args) => clients::handle(client, &args, global).await,
        Command::Devices => devices::handle(client, global).await,
        Command::Events(args) => events::events(client, &args, global).await,
        Command::Alerts(args) => events::alerts(client, &args, global).await,
        Command::Settings(args) => settings::handle(client, args, global).await,
        Command::Groups { group_type } => groups::handle(client, group_type.as_deref(), global).await,
        // Handled before a session is opened
        Command::Config(_) | Command::Completions(_) => Ok(()),
    }
}
