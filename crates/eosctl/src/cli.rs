//! Clap derive structures for the `eosctl` CLI.
//!
//! Defines the command tree, global flags, and shared types.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use eosctl_core::Scheme;

// ── Top-Level CLI ────────────────────────────────────────────────────

/// eosctl -- read and idempotently configure Arista EOS devices
#[derive(Debug, Parser)]
#[command(
    name = "eosctl",
    version,
    about = "Read and idempotently configure Arista EOS devices over eAPI",
    long_about = "Talks to the EOS command API (JSON-RPC over HTTP/HTTPS).\n\n\
        Read commands are batched into as few round trips as possible; \
        configuration changes are only sent when the device differs from \
        the desired state.",
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
    /// Device profile to use
    #[arg(long, short = 'd', env = "EOSCTL_DEVICE", global = true)]
    pub device: Option<String>,

    /// Device hostname or address (overrides profile)
    #[arg(long, env = "EOSCTL_HOST", global = true)]
    pub host: Option<String>,

    /// eAPI transport: http or https
    #[arg(long, env = "EOSCTL_TRANSPORT", global = true)]
    pub transport: Option<Scheme>,

    /// eAPI port (defaults to 80/443 by transport)
    #[arg(long, env = "EOSCTL_PORT", global = true)]
    pub port: Option<u16>,

    /// Login username
    #[arg(long, short = 'u', env = "EOSCTL_USERNAME", global = true)]
    pub username: Option<String>,

    /// Login password
    #[arg(long, env = "EOSCTL_PASSWORD", global = true, hide_env_values = true)]
    pub password: Option<String>,

    /// Output format [default: from config, else table]
    #[arg(long, short = 'o', env = "EOSCTL_OUTPUT", global = true)]
    pub output: Option<OutputFormat>,

    /// When to use color output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Accept self-signed TLS certificates
    #[arg(long, short = 'k', env = "EOSCTL_INSECURE", global = true)]
    pub insecure: bool,

    /// Request timeout in seconds
    #[arg(long, env = "EOSCTL_TIMEOUT", global = true)]
    pub timeout: Option<u64>,
}

impl GlobalOpts {
    /// Effective output format.
    pub fn format(&self) -> &OutputFormat {
        self.output.as_ref().unwrap_or(&OutputFormat::Table)
    }
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, ValueEnum)]
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

#[derive(Debug, Clone, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show version and interfaces, fetched in one round trip
    #[command(alias = "snap")]
    Snapshot,

    /// List interfaces, or show one
    #[command(alias = "if", alias = "i")]
    Interfaces(InterfacesArgs),

    /// Read or set an interface's primary IPv4 address
    #[command(alias = "addr")]
    Address(AddressArgs),

    /// Set an interface address only if it differs from the device
    Reconcile(ReconcileArgs),

    /// Run raw CLI commands and print their JSON output
    Run(RunArgs),

    /// Manage device profiles and the config file
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  DEVICE COMMANDS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct InterfacesArgs {
    /// Interface name (e.g. Management1). Lists all when omitted.
    pub name: Option<String>,
}

#[derive(Debug, Args)]
pub struct AddressArgs {
    #[command(subcommand)]
    pub command: AddressCommand,
}

#[derive(Debug, Subcommand)]
pub enum AddressCommand {
    /// Show the primary address of an interface
    Get {
        /// Interface name
        interface: String,
    },

    /// Set the primary address unconditionally
    Set {
        /// Interface name
        interface: String,

        /// Address in a.b.c.d/len form
        address: String,
    },
}

#[derive(Debug, Args)]
pub struct ReconcileArgs {
    /// Interface name
    pub interface: String,

    /// Desired address in a.b.c.d/len form
    pub address: String,

    /// Report what would change without writing
    #[arg(long, short = 'n')]
    pub dry_run: bool,

    /// Skip the interface listing printed before reconciling
    #[arg(long)]
    pub no_snapshot: bool,
}

#[derive(Debug, Args)]
pub struct RunArgs {
    /// CLI commands, one per argument (e.g. "show clock")
    #[arg(required = true)]
    pub commands: Vec<String>,

    /// Run the commands as one configuration session
    #[arg(long)]
    pub config: bool,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  CONFIG
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Display the loaded configuration (secrets redacted)
    Show,

    /// Print the config file location
    Path,

    /// Add or replace a device profile
    AddDevice(AddDeviceArgs),

    /// Store a device password in the system keyring
    SetPassword {
        /// Device profile name (defaults to --device, then default_device)
        name: Option<String>,
    },
}

#[derive(Debug, Args)]
pub struct AddDeviceArgs {
    /// Profile name
    pub name: String,

    /// Hostname or address
    #[arg(long = "address", value_name = "HOST")]
    pub address: String,

    /// Username
    #[arg(long = "user", value_name = "USERNAME")]
    pub user: Option<String>,

    /// Environment variable holding the password
    #[arg(long)]
    pub password_env: Option<String>,

    /// Use plain HTTP instead of HTTPS
    #[arg(long)]
    pub http: bool,

    /// Non-default eAPI port
    #[arg(long = "api-port", value_name = "PORT")]
    pub api_port: Option<u16>,

    /// Custom CA certificate (PEM)
    #[arg(long)]
    pub ca_cert: Option<PathBuf>,

    /// Make this the default device
    #[arg(long)]
    pub default: bool,
}

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn command_tree_is_consistent() {
        Cli::command().debug_assert();
    }
}
