//! Clap derive structures for the `reocam` CLI.
//!
//! Defines the command tree, global flags, and shared value types.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// reocam -- configure Reolink IP cameras over their CGI API
#[derive(Debug, Parser)]
#[command(
    name = "reocam",
    version,
    about = "Configure Reolink IP cameras from the command line",
    long_about = "Logs in to a Reolink camera's web API, applies e-mail, FTP,\n\
        push and infrared settings or reads them back, then logs out again.",
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
    /// Camera profile to use
    #[arg(long, short = 'p', env = "REOCAM_PROFILE", global = true)]
    pub profile: Option<String>,

    /// Camera IP address (overrides profile)
    #[arg(long, short = 'H', env = "REOCAM_HOST", global = true)]
    pub host: Option<String>,

    /// Web interface port (overrides profile)
    #[arg(long, env = "REOCAM_PORT", global = true)]
    pub port: Option<u16>,

    /// Use HTTPS instead of plain HTTP
    #[arg(long, global = true)]
    pub https: bool,

    /// Web interface user (overrides profile)
    #[arg(long, short = 'u', env = "REOCAM_USERNAME", global = true)]
    pub user: Option<String>,

    /// Web interface password
    #[arg(long, env = "REOCAM_PASSWORD", global = true, hide_env_values = true)]
    pub password: Option<String>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "REOCAM_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

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
    #[arg(long, short = 'k', env = "REOCAM_INSECURE", global = true)]
    pub insecure: bool,

    /// Request timeout in seconds (overrides profile)
    #[arg(long, env = "REOCAM_TIMEOUT", global = true)]
    pub timeout: Option<u64>,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Key/value table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain `key=value` lines (scripting)
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

/// On/off switch argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Toggle {
    On,
    Off,
}

impl Toggle {
    pub fn enabled(self) -> bool {
        self == Self::On
    }
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Check that the camera accepts the configured credentials
    Login,

    /// E-mail alert settings
    #[command(alias = "mail")]
    Email(EmailArgs),

    /// FTP upload settings
    Ftp(FtpArgs),

    /// App push notification settings
    Push(PushArgs),

    /// Switch the infrared lights between automatic and off
    #[command(alias = "ir")]
    Infrared {
        /// `on` = automatic, `off` = permanently off
        state: Toggle,
    },

    /// Send a raw catalog request and print the response payload
    Query(QueryArgs),

    /// Manage CLI configuration and profiles
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Email ────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct EmailArgs {
    #[command(subcommand)]
    pub command: EmailCommand,
}

#[derive(Debug, Subcommand)]
pub enum EmailCommand {
    /// Show the camera's e-mail settings
    Get,

    /// Apply e-mail settings from a JSON file or the profile's [email] table
    Set {
        /// JSON object of e-mail parameters (smtpServer, smtpPort, ...)
        #[arg(long, short = 'F')]
        from_file: Option<PathBuf>,
    },

    /// Enable or disable the motion-detection e-mail alert
    Motion { state: Toggle },
}

// ── FTP ──────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct FtpArgs {
    #[command(subcommand)]
    pub command: FtpCommand,
}

#[derive(Debug, Subcommand)]
pub enum FtpCommand {
    /// Show the camera's FTP settings
    Get,

    /// Enable or disable FTP upload on motion
    Upload { state: Toggle },
}

// ── Push ─────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct PushArgs {
    #[command(subcommand)]
    pub command: PushCommand,
}

#[derive(Debug, Subcommand)]
pub enum PushCommand {
    /// Show the camera's push settings
    Get,

    /// Enable or disable motion push notifications for the whole week
    Motion { state: Toggle },
}

// ── Query ────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct QueryArgs {
    /// Request type (User, Logout, GetEmail, GetPush, GetFtp, Email, Push, Ftp, IrLights)
    pub request_type: String,

    /// Request parameter as KEY=VALUE; VALUE is parsed as JSON, falling back to a string
    #[arg(long = "param", short = 'P', value_name = "KEY=VALUE")]
    pub params: Vec<String>,
}

// ── Config ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Print the config file location
    Path,

    /// Show the configuration with secrets masked
    Show,

    /// Interactively create or update a profile
    Init,

    /// Store a profile's password in the system keyring
    SetPassword,
}

// ── Completions ──────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
