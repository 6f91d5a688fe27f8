//! Site settings handlers.
//!
//! Settings documents are not modeled; they pass through as JSON.

use omada_api::OmadaClient;
use tracing::info;

use crate::cli::{GlobalOpts, SettingsArgs, SettingsCommand};
use crate::error::CliError;
use crate::output;

use super::util;

pub async fn handle(
    client: &OmadaClient,
    args: SettingsArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let doc = match args.command {
        SettingsCommand::Get => client.get_site_settings(None).await?,
        SettingsCommand::Set { from_file } => {
            let patch = util::read_json_file(&from_file)?;
            let site = client.default_site();
            if !util::confirm(&format!("Apply settings to site '{site}'?"), global.yes)? {
                return Ok(());
            }
            let updated = client.set_site_settings(&patch, None).await?;
            info!(site, "site settings updated");
            updated
        }
        SettingsCommand::Notifications => client.get_site_notifications(None).await?,
        SettingsCommand::TimeRanges => client.get_time_ranges(None).await?,
        SettingsCommand::Radius => client.get_radius_profiles(None).await?,
        SettingsCommand::PortalCandidates => client.get_portal_candidates(None).await?,
        SettingsCommand::Wlans { group: None } => client.get_wireless_groups(None).await?,
        SettingsCommand::Wlans { group: Some(group) } => {
            client.get_wireless_networks(&group, None).await?
        }
    };

    let out = output::render_document(global.format(), &doc)?;
    output::print_output(&out, global.quiet);
    Ok(())
}
