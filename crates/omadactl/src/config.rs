//! CLI configuration: thin wrapper around `omada_config`.
//!
//! Adds `GlobalOpts`-aware resolution on top of the shared crate: flags
//! override profile values, and a profile-less run is possible when the
//! controller, controller id and credentials all come from flags or env.

use omada_api::ClientConfig;
use omada_config::{Config, Profile};
use secrecy::SecretString;

use crate::cli::GlobalOpts;
use crate::error::CliError;

pub use omada_config::{config_path, load_config, save_config, store_password};

/// Everything needed to open a session.
pub struct Connection {
    pub profile_name: String,
    pub client: ClientConfig,
    pub username: String,
    pub password: SecretString,
}

/// Resolve the active profile name from CLI flags and config.
pub fn active_profile_name(global: &GlobalOpts, config: &Config) -> String {
    global
        .profile
        .clone()
        .or_else(|| config.default_profile.clone())
        .unwrap_or_else(|| "default".into())
}

/// Merge config file, profile and flag overrides into a `Connection`.
pub fn resolve_connection(global: &GlobalOpts, cfg: &Config) -> Result<Connection, CliError> {
    let profile_name = active_profile_name(global, cfg);

    let mut profile = match cfg.profiles.get(&profile_name) {
        Some(p) => p.clone(),
        None => profile_from_flags(global, &profile_name)?,
    };
    apply_overrides(&mut profile, global);

    let client = omada_config::profile_to_client_config(&profile, &cfg.defaults)?;
    let (username, password) = omada_config::resolve_credentials(&profile, &profile_name)?;

    Ok(Connection {
        profile_name,
        client,
        username,
        password,
    })
}

/// Without a matching profile, the controller URL and id must be flags.
fn profile_from_flags(global: &GlobalOpts, profile_name: &str) -> Result<Profile, CliError> {
    let (Some(controller), Some(controller_id)) = (&global.controller, &global.controller_id)
    else {
        return Err(CliError::NoConfig {
            name: profile_name.into(),
            path: config_path().display().to_string(),
        });
    };

    Ok(Profile {
        controller: controller.clone(),
        controller_id: controller_id.clone(),
        site: omada_api::DEFAULT_SITE.into(),
        username: None,
        password: None,
        password_env: None,
        ca_cert: None,
        insecure: None,
        timeout: None,
    })
}

fn apply_overrides(profile: &mut Profile, global: &GlobalOpts) {
    if let Some(ref controller) = global.controller {
        profile.controller.clone_from(controller);
    }
    if let Some(ref id) = global.controller_id {
        profile.controller_id.clone_from(id);
    }
    if let Some(ref site) = global.site {
        profile.site.clone_from(site);
    }
    if let Some(ref user) = global.username {
        profile.username = Some(user.clone());
    }
    if global.insecure {
        profile.insecure = Some(true);
    }
    if let Some(timeout) = global.timeout {
        profile.timeout = Some(timeout);
    }
}
