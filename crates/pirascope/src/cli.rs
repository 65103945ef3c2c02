//! Clap derive structures for the `pirascope` CLI.
//!
//! Defines the command tree, global flags, and shared value enums.
//! Also compiled by `build.rs` for man pages, so only clap may be used here.

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// pirascope -- anti-piracy monitoring from the terminal
#[derive(Debug, Parser)]
#[command(
    name = "pirascope",
    version,
    about = "Monitor protected assets, staff and piracy reports from the command line",
    long_about = "A command-line client for the Whyxpose anti-piracy dashboard.\n\n\
        Sign in once with `pirascope login`; the session cookie is kept per\n\
        profile so later commands reuse it.",
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
    /// Account profile to use
    #[arg(long, short = 'p', env = "PIRASCOPE_PROFILE", global = true)]
    pub profile: Option<String>,

    /// API root including `/api` (overrides profile)
    #[arg(long, env = "PIRASCOPE_API_URL", global = true)]
    pub api_url: Option<String>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "PIRASCOPE_OUTPUT",
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

    /// Skip confirmation prompts
    #[arg(long, short = 'y', global = true)]
    pub yes: bool,

    /// Accept invalid TLS certificates
    #[arg(long, short = 'k', env = "PIRASCOPE_INSECURE", global = true)]
    pub insecure: bool,

    /// Request timeout in seconds (overrides profile)
    #[arg(long, env = "PIRASCOPE_TIMEOUT", global = true)]
    pub timeout: Option<u64>,
}

// ── Output & Color Enums ─────────────────────────────────────────────

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

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

/// Bucket size for the detection series.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum TimeframeArg {
    #[default]
    Daily,
    Weekly,
    Monthly,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StatusArg {
    Active,
    Inactive,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Sign in and save the session for this profile
    Login(LoginArgs),

    /// Forget the saved session
    Logout,

    /// Check the saved session against the server
    #[command(alias = "whoami")]
    Status,

    /// Browse monitored assets and their telemetry
    #[command(alias = "a")]
    Assets(AssetsArgs),

    /// Manage staff accounts
    #[command(alias = "emp", alias = "e")]
    Employees(EmployeesArgs),

    /// Submit and review piracy link reports
    #[command(alias = "r")]
    Reports(ReportsArgs),

    /// Manage CLI configuration and profiles
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Shared Paging Arguments ──────────────────────────────────────────

#[derive(Debug, Args)]
pub struct PageArgs {
    /// Page number (1-based)
    #[arg(long, default_value = "1")]
    pub page: u32,

    /// Rows per page
    #[arg(long, short = 'l', default_value = "10")]
    pub limit: u32,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  LOGIN
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct LoginArgs {
    /// Account email (defaults to the profile's email)
    #[arg(long, short = 'e', env = "PIRASCOPE_EMAIL")]
    pub email: Option<String>,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  ASSETS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct AssetsArgs {
    #[command(subcommand)]
    pub command: AssetsCommand,
}

#[derive(Debug, Subcommand)]
pub enum AssetsCommand {
    /// List monitored assets
    #[command(alias = "ls")]
    List(PageArgs),

    /// Show one asset with its link counts and period statistics
    Show {
        /// Asset ID
        id: u64,
    },

    /// Render every dashboard panel for one asset
    Charts {
        /// Asset ID
        id: u64,

        /// Detection series bucket size
        #[arg(long, short = 't', default_value = "daily")]
        timeframe: TimeframeArg,

        /// Print the peer map as a GeoJSON FeatureCollection instead
        #[arg(long)]
        geojson: bool,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  EMPLOYEES
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct EmployeesArgs {
    #[command(subcommand)]
    pub command: EmployeesCommand,
}

#[derive(Debug, Subcommand)]
pub enum EmployeesCommand {
    /// List employees
    #[command(alias = "ls")]
    List {
        #[command(flatten)]
        paging: PageArgs,

        /// Server-side search on name or email
        #[arg(long, short = 's')]
        search: Option<String>,
    },

    /// Show one employee
    Get {
        /// Employee ID
        id: u64,
    },

    /// Create an employee account
    Add {
        /// Full name
        #[arg(long)]
        name: String,

        /// Login email
        #[arg(long)]
        email: String,

        /// Initial password (prompted when omitted)
        #[arg(long, env = "PIRASCOPE_EMPLOYEE_PASSWORD", hide_env_values = true)]
        password: Option<String>,

        /// Phone number
        #[arg(long)]
        phone: Option<String>,

        /// Profile image URL
        #[arg(long)]
        image: Option<String>,
    },

    /// Edit an employee; omitted fields keep their current value
    Update {
        /// Employee ID
        id: u64,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        email: Option<String>,

        #[arg(long)]
        phone: Option<String>,

        /// Profile image URL
        #[arg(long)]
        image: Option<String>,

        #[arg(long)]
        status: Option<StatusArg>,
    },

    /// Deactivate an employee (the record is kept)
    Deactivate {
        /// Employee ID
        id: u64,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  REPORTS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ReportsArgs {
    #[command(subcommand)]
    pub command: ReportsCommand,
}

#[derive(Debug, Subcommand)]
pub enum ReportsCommand {
    /// List submitted reports
    #[command(alias = "ls")]
    List,

    /// Report a link hosting pirated content
    Add {
        /// Absolute URL of the infringing page
        link: String,
    },
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
    /// Create initial config file with guided setup
    Init,

    /// Display current resolved configuration
    Show,

    /// Print the config file and session locations
    Path,

    /// Set a value on the active profile
    Set {
        /// Profile key: api_url, email, password_env, ca_cert, insecure, timeout
        key: String,

        /// Value to set
        value: String,
    },

    /// List configured profiles
    Profiles,

    /// Set the default profile
    Use {
        /// Profile name to set as default
        name: String,
    },

    /// Store the active profile's password in the system keyring
    SetPassword,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  COMPLETIONS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
