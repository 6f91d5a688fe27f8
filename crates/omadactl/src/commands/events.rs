//! Event and alert command handlers.

use omada_api::OmadaClient;
use serde_json::Value;
use tabled::Tabled;

use crate::cli::{AlertsArgs, EventsArgs, GlobalOpts};
use crate::error::CliError;
use crate::output::{self, field, time_field};

use super::util;

#[derive(Tabled)]
struct LogRow {
    #[tabled(rename = "Time (UTC)")]
    time: String,
    #[tabled(rename = "Level")]
    level: String,
    #[tabled(rename = "Module")]
    module: String,
    #[tabled(rename = "Message")]
    message: String,
}

impl From<&Value> for LogRow {
    fn from(e: &Value) -> Self {
        Self {
            time: time_field(e, "time"),
            level: field(e, "level"),
            module: field(e, "module"),
            message: field(e, "msg"),
        }
    }
}

fn render(records: &[Value], global: &GlobalOpts) -> Result<(), CliError> {
    let out = output::render_list(
        global.format(),
        records,
        |e| LogRow::from(e),
        |e| field(e, "id"),
    )?;
    output::print_output(&out, global.quiet);
    Ok(())
}

pub async fn events(
    client: &OmadaClient,
    args: &EventsArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let filter = util::event_filter(&args.filter)?;
    let stream = client.list_site_events(None, &filter).await?;
    let records = util::collect_limited(stream, args.limit.limit).await?;
    render(&records, global)
}

pub async fn alerts(
    client: &OmadaClient,
    args: &AlertsArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let filter = util::event_filter(&args.filter)?;
    let stream = client.list_site_alerts(None, args.archived, &filter).await?;
    let records = util::collect_limited(stream, args.limit.limit).await?;
    render(&records, global)
}
