//! Client command handlers.

use omada_api::OmadaClient;
use serde_json::Value;
use tabled::Tabled;

use crate::cli::{GlobalOpts, LimitArgs};
use crate::error::CliError;
use crate::output::{self, field};

use super::util;

#[derive(Tabled)]
struct ClientRow {
    #[tabled(rename = "MAC")]
    mac: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "IP")]
    ip: String,
    #[tabled(rename = "Link")]
    link: String,
    #[tabled(rename = "Uplink")]
    uplink: String,
}

impl From<&Value> for ClientRow {
    fn from(c: &Value) -> Self {
        let wireless = c.get("wireless").and_then(Value::as_bool).unwrap_or(false);
        let (link, uplink) = if wireless {
            (field(c, "ssid"), field(c, "apName"))
        } else {
            ("wired".to_owned(), field(c, "switchName"))
        };
        Self {
            mac: field(c, "mac"),
            name: field(c, "name"),
            ip: field(c, "ip"),
            link,
            uplink,
        }
    }
}

pub async fn handle(
    client: &OmadaClient,
    args: &LimitArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let stream = client.list_site_clients(None).await?;
    let clients = util::collect_limited(stream, args.limit).await?;
    let out = output::render_list(
        global.format(),
        &clients,
        |c| ClientRow::from(c),
        |c| field(c, "mac"),
    )?;
    output::print_output(&out, global.quiet);
    Ok(())
}
