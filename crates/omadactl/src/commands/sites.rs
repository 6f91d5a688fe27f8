//! Site command handlers.

use omada_api::OmadaClient;
use serde_json::Value;
use tabled::Tabled;

use crate::cli::{GlobalOpts, LimitArgs};
use crate::error::CliError;
use crate::output::{self, field};

use super::util;

#[derive(Tabled)]
struct SiteRow {
    #[tabled(rename = "Key")]
    key: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Scenario")]
    scenario: String,
    #[tabled(rename = "Region")]
    region: String,
}

impl From<&Value> for SiteRow {
    fn from(s: &Value) -> Self {
        Self {
            key: field(s, "id"),
            name: field(s, "name"),
            scenario: field(s, "scenario"),
            region: field(s, "region"),
        }
    }
}

pub async fn list(
    client: &OmadaClient,
    args: &LimitArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let sites = util::collect_limited(client.list_sites(), args.limit).await?;
    let out = output::render_list(
        global.format(),
        &sites,
        |s| SiteRow::from(s),
        |s| field(s, "id"),
    )?;
    output::print_output(&out, global.quiet);
    Ok(())
}

pub async fn site_key(
    client: &OmadaClient,
    name: Option<&str>,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let key = client.resolve_site(name).await?;
    let out = output::render_single(global.format(), &key, Clone::clone, Clone::clone)?;
    output::print_output(&out, global.quiet);
    Ok(())
}

pub async fn scenarios(client: &OmadaClient, global: &GlobalOpts) -> Result<(), CliError> {
    let names = client.get_scenarios().await?;
    let out = output::render_single(
        global.format(),
        &names,
        |n| n.join("\n"),
        |n| n.join("\n"),
    )?;
    output::print_output(&out, global.quiet);
    Ok(())
}
