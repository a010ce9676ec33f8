//! Clap derive structures for the `agrisci` CLI.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// agrisci -- admin console for products, cart orders and shipping
#[derive(Debug, Parser)]
#[command(
    name = "agrisci",
    version,
    about = "Manage the Unique Agrisciences storefront from the command line",
    long_about = "Administer products, cart orders and shipping records through \
        the storefront admin API.\n\n\
        Log in once with `agrisci login`; the session token is kept in the \
        configured credential store until `agrisci logout` or until the API \
        rejects it.",
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
    /// Admin API base URL (overrides the config file)
    #[arg(long, env = "AGRISCI_API_BASE_URL", global = true)]
    pub api_url: Option<String>,

    /// Config file to use instead of the platform default
    #[arg(long, env = "AGRISCI_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "AGRISCI_OUTPUT",
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

    /// Accept self-signed TLS certificates
    #[arg(long, short = 'k', global = true)]
    pub insecure: bool,

    /// Request timeout in seconds
    #[arg(long, global = true)]
    pub timeout: Option<u64>,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, Copy, ValueEnum)]
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

#[derive(Debug, Clone, Copy, ValueEnum)]
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
    /// Log in and store the session token
    Login(LoginArgs),

    /// Forget the stored session
    Logout,

    /// Show the current session
    #[command(alias = "whoami")]
    Status,

    /// Manage products
    #[command(alias = "p")]
    Products(EntityArgs),

    /// Manage cart orders (one row per line item)
    #[command(alias = "o")]
    Orders(EntityArgs),

    /// Manage shipping information
    #[command(alias = "ship", alias = "s")]
    Shipping(EntityArgs),

    /// Counts of products, carts and shipping records
    Summary,

    /// Manage CLI configuration
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Auth ─────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct LoginArgs {
    /// Admin username (prompted when omitted)
    #[arg(long, short = 'u', env = "AGRISCI_USERNAME")]
    pub username: Option<String>,

    /// Read the password from the first line of stdin
    #[arg(long)]
    pub password_stdin: bool,
}

// ── Entities ─────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct EntityArgs {
    #[command(subcommand)]
    pub command: EntityCommand,
}

#[derive(Debug, Subcommand)]
pub enum EntityCommand {
    /// List every record
    #[command(alias = "ls")]
    List,

    /// Show the editable fields
    Fields,

    /// Create a record
    Add(EditArgs),

    /// Update a record (order rows are addressed by their row id)
    Edit {
        /// Record id
        id: String,

        #[command(flatten)]
        edit: EditArgs,
    },

    /// Delete a record
    #[command(alias = "rm")]
    Delete {
        /// Record id
        id: String,
    },
}

#[derive(Debug, Args)]
pub struct EditArgs {
    /// Field assignment, repeatable: --set name=Seed --set price=2.50
    #[arg(long = "set", short = 's', value_name = "FIELD=VALUE", value_parser = parse_assignment)]
    pub set: Vec<(String, String)>,

    /// Prompt for every editable field
    #[arg(long, short = 'i')]
    pub interactive: bool,
}

fn parse_assignment(raw: &str) -> Result<(String, String), String> {
    let (field, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected FIELD=VALUE, got '{raw}'"))?;
    let field = field.trim();
    if field.is_empty() {
        return Err(format!("missing field name in '{raw}'"));
    }
    Ok((field.to_owned(), value.to_owned()))
}

// ── Config ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Print the effective configuration
    Show,

    /// Print the config file location
    Path,

    /// Write a config file with default values
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

// ── Completions ──────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    pub shell: clap_complete::Shell,
}
