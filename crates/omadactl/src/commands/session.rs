//! Session lifecycle and the `status` / `whoami` handlers.

use omada_api::{CurrentUser, Error as ApiError, OmadaClient};
use serde::Serialize;
use tracing::{debug, warn};

use crate::cli::GlobalOpts;
use crate::config::Connection;
use crate::error::CliError;
use crate::output;

/// Build the client and log in.
pub async fn open(conn: Connection) -> Result<OmadaClient, CliError> {
    let mut client = OmadaClient::new(conn.client)?;
    debug!(profile = %conn.profile_name, user = %conn.username, "logging in");

    match client.login(&conn.username, &conn.password).await {
        Ok(_) => Ok(client),
        Err(ApiError::Api(e)) => Err(CliError::AuthFailed {
            profile: conn.profile_name,
            message: e.message,
        }),
        Err(ApiError::MissingCredential { field }) => Err(CliError::NoCredentials {
            profile: conn.profile_name,
            what: field.into(),
        }),
        Err(other) => Err(other.into()),
    }
}

/// Log out, reporting but not failing on errors.
pub async fn close(mut client: OmadaClient) {
    if let Err(e) = client.logout().await {
        warn!(error = %e, "logout failed");
    }
}

// ── status ──────────────────────────────────────────────────────────

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct StatusReport {
    controller: String,
    controller_id: String,
    site: String,
    role_type: Option<i64>,
    logged_in: bool,
}

pub async fn status(client: &OmadaClient, global: &GlobalOpts) -> Result<(), CliError> {
    let logged_in = client.get_login_status().await?;
    let config = client.config();
    let report = StatusReport {
        controller: config.base_url.to_string(),
        controller_id: config.controller_id.clone(),
        site: client.default_site().to_owned(),
        role_type: client.login_result().map(|l| l.role_type),
        logged_in,
    };

    let out = output::render_single(
        global.format(),
        &report,
        |r| {
            [
                format!("Controller:   {}", r.controller),
                format!("Omadac ID:    {}", r.controller_id),
                format!("Site:         {}", r.site),
                format!(
                    "Role type:    {}",
                    r.role_type.map_or_else(|| "-".into(), |t| t.to_string())
                ),
                format!("Logged in:    {}", r.logged_in),
            ]
            .join("\n")
        },
        |r| r.logged_in.to_string(),
    )?;
    output::print_output(&out, global.quiet);
    Ok(())
}

// ── whoami ──────────────────────────────────────────────────────────

fn user_detail(user: &CurrentUser) -> String {
    let mut lines = vec![
        format!("Name:       {}", user.name),
        format!("Email:      {}", user.email),
        format!("All sites:  {}", user.privilege.all),
        "Sites:".to_owned(),
    ];
    lines.extend(
        user.privilege
            .sites
            .iter()
            .map(|s| format!("  {} ({})", s.name, s.key)),
    );
    lines.join("\n")
}

pub async fn whoami(client: &OmadaClient, global: &GlobalOpts) -> Result<(), CliError> {
    let user = client.current_user().await?;
    let out = output::render_single(global.format(), user, user_detail, |u| u.name.clone())?;
    output::print_output(&out, global.quiet);
    Ok(())
}
