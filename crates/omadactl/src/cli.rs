//! Clap derive structures for the `omadactl` CLI.
//!
//! Defines the command tree, global flags, and shared argument types.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use omada_api::{LevelFilter, ModuleFilter};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// omadactl -- query and configure TP-Link Omada controllers
#[derive(Debug, Parser)]
#[command(
    name = "omadactl",
    version,
    about = "Manage TP-Link Omada networks from the command line",
    long_about = "Talks to an Omada SDN controller (self-hosted or cloud) over its\n\
        web API: sessions, sites, clients, devices, events, alerts and\n\
        site settings.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Controller profile to use
    #[arg(long, short = 'p', env = "OMADA_PROFILE", global = true)]
    pub profile: Option<String>,

    /// Controller base URL (overrides profile)
    #[arg(long, short = 'c', env = "OMADA_CONTROLLER", global = true)]
    pub controller: Option<String>,

    /// Controller (omadac) id (overrides profile)
    #[arg(long, env = "OMADA_CONTROLLER_ID", global = true)]
    pub controller_id: Option<String>,

    /// Site display name (overrides profile)
    #[arg(long, short = 's', env = "OMADA_SITE", global = true)]
    pub site: Option<String>,

    /// Login username (overrides profile)
    #[arg(long, short = 'u', env = "OMADA_USERNAME", global = true)]
    pub username: Option<String>,

    /// Output format [default: from config, else table]
    #[arg(long, short = 'o', env = "OMADA_OUTPUT", global = true)]
    pub output: Option<OutputFormat>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Skip confirmation prompts
    #[arg(long, short = 'y', global = true)]
    pub yes: bool,

    /// Accept self-signed TLS certificates
    #[arg(long, short = 'k', env = "OMADA_INSECURE", global = true)]
    pub insecure: bool,

    /// Request timeout in seconds (overrides profile)
    #[arg(long, env = "OMADA_TIMEOUT", global = true)]
    pub timeout: Option<u64>,
}

impl GlobalOpts {
    pub fn format(&self) -> OutputFormat {
        self.output.unwrap_or(OutputFormat::Table)
    }
}

// ── Output ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one value per line (scripting)
    Plain,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Log in and report the controller's session status
    Status,

    /// Show the signed-in user and their site privileges
    Whoami,

    /// List sites on the controller
    Sites(LimitArgs),

    /// Resolve a site display name to its key
    SiteKey {
        /// Site display name [default: the profile's site]
        name: Option<String>,
    },

    /// List active clients of a site
    #[command(alias = "cl")]
    Clients(LimitArgs),

    /// List adopted devices of a site
    #[command(alias = "dev")]
    Devices,

    /// List site events
    Events(EventsArgs),

    /// List site alerts
    Alerts(AlertsArgs),

    /// Read or update site settings
    Settings(SettingsArgs),

    /// List group profiles (IP, MAC, port groups)
    Groups {
        /// Only groups of this type (e.g. 0 = IP, 1 = port, 2 = MAC)
        #[arg(long = "type", short = 't')]
        group_type: Option<String>,
    },

    /// List deployment scenario names
    Scenarios,

    /// Manage CLI configuration and profiles
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Shared arguments ─────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct LimitArgs {
    /// Stop after this many records (pages are fetched lazily)
    #[arg(long, short = 'l')]
    pub limit: Option<usize>,
}

#[derive(Debug, Args)]
pub struct EventFilterArgs {
    /// Severity filter
    #[arg(long, value_parser = parse_level)]
    pub level: Option<LevelFilter>,

    /// Source module filter
    #[arg(long, value_parser = parse_module)]
    pub module: Option<ModuleFilter>,

    /// Start of the time window (RFC 3339 or epoch milliseconds)
    #[arg(long)]
    pub since: Option<String>,

    /// End of the time window (RFC 3339 or epoch milliseconds)
    #[arg(long)]
    pub until: Option<String>,

    /// Free-text search
    #[arg(long)]
    pub search: Option<String>,
}

fn parse_level(s: &str) -> Result<LevelFilter, String> {
    s.parse()
        .map_err(|_| format!("expected one of error, warning, information; got '{s}'"))
}

fn parse_module(s: &str) -> Result<ModuleFilter, String> {
    s.parse()
        .map_err(|_| format!("expected one of operation, system, device, client; got '{s}'"))
}

#[derive(Debug, Args)]
pub struct EventsArgs {
    #[command(flatten)]
    pub limit: LimitArgs,

    #[command(flatten)]
    pub filter: EventFilterArgs,
}

#[derive(Debug, Args)]
pub struct AlertsArgs {
    #[command(flatten)]
    pub limit: LimitArgs,

    #[command(flatten)]
    pub filter: EventFilterArgs,

    /// List archived instead of active alerts
    #[arg(long)]
    pub archived: bool,
}

// ── Settings ─────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct SettingsArgs {
    #[command(subcommand)]
    pub command: SettingsCommand,
}

#[derive(Debug, Subcommand)]
pub enum SettingsCommand {
    /// Print the full site settings document
    Get,

    /// Apply a (partial) settings document from a JSON file
    Set {
        /// JSON file with the settings to PATCH
        #[arg(long = "from-file", short = 'F')]
        from_file: PathBuf,
    },

    /// Print notification settings
    Notifications,

    /// Print time-range profiles
    TimeRanges,

    /// Print RADIUS profiles
    Radius,

    /// Print portal SSID / network candidates
    PortalCandidates,

    /// Print WLAN groups, or the SSIDs of one group
    Wlans {
        /// WLAN group id whose SSIDs to list
        #[arg(long)]
        group: Option<String>,
    },
}

// ── Config ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Create or extend the config file with guided setup
    Init,

    /// Display the resolved configuration (secrets masked)
    Show,

    /// Store a profile's password in the system keyring
    SetPassword,

    /// Print the config file location
    Path,
}

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn command_tree_is_consistent() {
        Cli::command().debug_assert();
    }
}
