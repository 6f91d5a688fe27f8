//! Group profile handler.

use omada_api::{OmadaClient, SiteGroup};
use tabled::Tabled;

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

#[derive(Tabled)]
struct GroupRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Type")]
    kind: i64,
    #[tabled(rename = "Entries")]
    count: i64,
    #[tabled(rename = "Built-in")]
    built_in: bool,
}

impl From<&SiteGroup> for GroupRow {
    fn from(g: &SiteGroup) -> Self {
        Self {
            id: g.group_id.clone(),
            name: g.name.clone(),
            kind: g.group_type,
            count: g.count,
            built_in: g.build_in,
        }
    }
}

pub async fn handle(
    client: &OmadaClient,
    group_type: Option<&str>,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let groups = client.get_site_groups(None, group_type).await?;
    let out = output::render_list(
        global.format(),
        &groups,
        |g| GroupRow::from(g),
        |g| g.group_id.clone(),
    )?;
    output::print_output(&out, global.quiet);
    Ok(())
}
