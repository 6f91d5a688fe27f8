//! Device command handlers.

use omada_api::OmadaClient;
use serde_json::Value;
use tabled::Tabled;

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output::{self, field};

#[derive(Tabled)]
struct DeviceRow {
    #[tabled(rename = "MAC")]
    mac: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Type")]
    kind: String,
    #[tabled(rename = "Model")]
    model: String,
    #[tabled(rename = "IP")]
    ip: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Firmware")]
    firmware: String,
}

impl From<&Value> for DeviceRow {
    fn from(d: &Value) -> Self {
        Self {
            mac: field(d, "mac"),
            name: field(d, "name"),
            kind: field(d, "type"),
            model: field(d, "model"),
            ip: field(d, "ip"),
            status: field(d, "status"),
            firmware: field(d, "firmwareVersion"),
        }
    }
}

pub async fn handle(client: &OmadaClient, global: &GlobalOpts) -> Result<(), CliError> {
    let devices = client.get_site_devices(None).await?;
    let out = output::render_list(
        global.format(),
        &devices,
        |d| DeviceRow::from(d),
        |d| field(d, "mac"),
    )?;
    output::print_output(&out, global.quiet);
    Ok(())
}
