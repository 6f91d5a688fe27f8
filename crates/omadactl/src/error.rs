//! CLI error types with miette diagnostics.
//!
//! Maps `omada_api::Error` and `ConfigError` into user-facing errors with
//! actionable help text and a stable exit code per class.

use miette::Diagnostic;
use thiserror::Error;

use omada_api::Error as ApiError;
use omada_config::ConfigError;

pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
    pub const PERMISSION: i32 = 5;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────
    #[error("Could not connect to controller at {url}")]
    #[diagnostic(
        code(omada::connection_failed),
        help(
            "Check that the controller is running and reachable.\n\
             Self-hosted controllers usually listen on port 8043."
        )
    )]
    ConnectionFailed {
        url: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("TLS setup failed: {reason}")]
    #[diagnostic(
        code(omada::tls_error),
        help(
            "Controllers ship with a self-signed certificate.\n\
             Use --insecure (-k) to accept it, or configure ca_cert in your profile."
        )
    )]
    Tls { reason: String },

    #[error("Request timed out")]
    #[diagnostic(
        code(omada::timeout),
        help("Increase the timeout with --timeout or check controller responsiveness.")
    )]
    Timeout,

    // ── Authentication ───────────────────────────────────────────────
    #[error("Authentication failed: {message}")]
    #[diagnostic(
        code(omada::auth_failed),
        help(
            "Verify the username and password for profile '{profile}'.\n\
             Run: omadactl config set-password --profile {profile}"
        )
    )]
    AuthFailed { profile: String, message: String },

    #[error("No {what} configured for profile '{profile}'")]
    #[diagnostic(
        code(omada::no_credentials),
        help(
            "Configure credentials with: omadactl config init\n\
             Or set OMADA_USERNAME / OMADA_PASSWORD."
        )
    )]
    NoCredentials { profile: String, what: String },

    #[error("Access denied (HTTP {status})")]
    #[diagnostic(
        code(omada::permission),
        help("The account lacks the role required for this operation.")
    )]
    PermissionDenied { status: u16 },

    // ── Resources ────────────────────────────────────────────────────
    #[error("{message}")]
    #[diagnostic(
        code(omada::not_found),
        help("Run: omadactl {list_command} to see what is available")
    )]
    NotFound {
        message: String,
        list_command: String,
    },

    // ── API ──────────────────────────────────────────────────────────
    #[error("Controller error ({code}): {message}")]
    #[diagnostic(code(omada::api_error))]
    Api { code: i64, message: String },

    #[error("HTTP {status}: {body}")]
    #[diagnostic(code(omada::http_status))]
    HttpStatus { status: u16, body: String },

    #[error("Unreadable controller response: {message}")]
    #[diagnostic(
        code(omada::decode),
        help("Re-run with -vv to log request URLs; the controller may be mid-upgrade.")
    )]
    Decode { message: String },

    // ── Validation ───────────────────────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(omada::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────
    #[error("Profile '{name}' not found in configuration")]
    #[diagnostic(
        code(omada::profile_not_found),
        help(
            "Create one with: omadactl config init\n\
             Or pass --controller and --controller-id.\n\
             Expected config at: {path}"
        )
    )]
    NoConfig { name: String, path: String },

    #[error("Configuration error: {0}")]
    #[diagnostic(code(omada::config))]
    Config(Box<ConfigError>),

    // ── Interactive ──────────────────────────────────────────────────
    #[error("Operation '{action}' requires confirmation")]
    #[diagnostic(
        code(omada::confirmation_required),
        help("Use --yes (-y) to skip confirmation in non-interactive contexts.")
    )]
    NonInteractiveRequiresYes { action: String },

    // ── IO / Serialization ───────────────────────────────────────────
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Invalid JSON payload: {0}")]
    #[diagnostic(code(omada::json), help("Check the JSON file contents and try again."))]
    Json(#[from] serde_json::Error),

    #[error("YAML rendering failed: {0}")]
    #[diagnostic(code(omada::yaml))]
    Yaml(#[from] serde_yaml::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } | Self::Tls { .. } => exit_code::CONNECTION,
            Self::Timeout => exit_code::TIMEOUT,
            Self::AuthFailed { .. } | Self::NoCredentials { .. } => exit_code::AUTH,
            Self::PermissionDenied { .. } => exit_code::PERMISSION,
            Self::NotFound { .. } => exit_code::NOT_FOUND,
            Self::Validation { .. } | Self::NoConfig { .. } | Self::NonInteractiveRequiresYes { .. } => {
                exit_code::USAGE
            }
            _ => exit_code::GENERAL,
        }
    }
}

// ── omada_api::Error → CliError ──────────────────────────────────────

impl From<ApiError> for CliError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::Transport(e) if e.is_timeout() => Self::Timeout,
            ApiError::Transport(e) => Self::ConnectionFailed {
                url: e
                    .url()
                    .map_or_else(|| "(unknown)".into(), |u| u.origin().ascii_serialization()),
                source: Box::new(e),
            },
            ApiError::Tls(reason) => Self::Tls { reason },
            ApiError::InvalidUrl(e) => Self::Validation {
                field: "controller".into(),
                reason: e.to_string(),
            },
            ApiError::HttpStatus { status: 401, body } => Self::AuthFailed {
                profile: "current".into(),
                message: body,
            },
            ApiError::HttpStatus { status: 403, .. } => Self::PermissionDenied { status: 403 },
            ApiError::HttpStatus { status, body } => Self::HttpStatus { status, body },
            ApiError::Api(e) => Self::Api {
                code: e.code,
                message: e.message,
            },
            ApiError::Decode { message, .. } => Self::Decode { message },
            err @ ApiError::UnknownSite { .. } => Self::NotFound {
                message: err.to_string(),
                list_command: "whoami".into(),
            },
            ApiError::NotAuthenticated => Self::AuthFailed {
                profile: "current".into(),
                message: "not logged in".into(),
            },
            ApiError::MissingCredential { field } => Self::NoCredentials {
                profile: "current".into(),
                what: field.into(),
            },
        }
    }
}

// ── ConfigError → CliError ───────────────────────────────────────────

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Validation { field, reason } => Self::Validation { field, reason },
            ConfigError::NoCredentials { profile, what } => Self::NoCredentials {
                profile,
                what: what.into(),
            },
            ConfigError::UnknownProfile { name } => Self::NoConfig {
                name,
                path: omada_config::config_path().display().to_string(),
            },
            other => Self::Config(Box::new(other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_errors_map_to_exit_codes() {
        let cases = [
            (ApiError::UnknownSite { name: "x".into() }, exit_code::NOT_FOUND),
            (ApiError::NotAuthenticated, exit_code::AUTH),
            (
                ApiError::HttpStatus {
                    status: 403,
                    body: String::new(),
                },
                exit_code::PERMISSION,
            ),
            (
                ApiError::HttpStatus {
                    status: 502,
                    body: String::new(),
                },
                exit_code::GENERAL,
            ),
            (ApiError::Tls("bad".into()), exit_code::CONNECTION),
            (
                ApiError::Api(omada_api::ApiError {
                    code: -1,
                    message: "General error.".into(),
                }),
                exit_code::GENERAL,
            ),
        ];
        for (err, code) in cases {
            let shown = err.to_string();
            assert_eq!(CliError::from(err).exit_code(), code, "{shown}");
        }
    }

    #[test]
    fn unknown_site_keeps_message() {
        let err = CliError::from(ApiError::UnknownSite {
            name: "Lab".into(),
        });
        assert_eq!(
            err.to_string(),
            "Current user does not have privilege to site \"Lab\""
        );
    }

    #[test]
    fn missing_profile_is_usage_error() {
        let err = CliError::from(ConfigError::UnknownProfile {
            name: "home".into(),
        });
        assert_eq!(err.exit_code(), exit_code::USAGE);
    }
}
