//! CLI argument definitions
//!
//! All Clap derive structs for `ovpnconf` command-line parsing.

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};

use crate::observability::LogFormat;

// ============================================================================
// Root CLI
// ============================================================================

/// Resolve and validate OpenVPN client connection settings.
#[derive(Parser, Debug)]
#[command(name = "ovpnconf", author, version, about)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all non-error output.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Color output control.
    #[arg(long, default_value = "auto", global = true, env = "OVPNCONF_COLOR")]
    pub color: ColorChoice,

    /// Log output format on stderr.
    #[arg(long, default_value = "human", global = true, env = "OVPNCONF_LOG_FORMAT")]
    pub log_format: LogFormat,
}

// ============================================================================
// Commands
// ============================================================================

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Resolve a request file into a validated configuration.
    Resolve(ResolveArgs),

    /// Print the built-in default policy table.
    Policy(PolicyArgs),

    /// Display version information.
    Version(VersionArgs),
}

/// Arguments for `resolve`.
#[derive(Args, Debug)]
pub struct ResolveArgs {
    /// Path to the YAML request file.
    pub file: PathBuf,

    /// Output format.
    #[arg(short, long, default_value = "human")]
    pub format: OutputFormat,

    /// Client identity used when the request names none.
    #[arg(long, env = "OVPNCONF_GUI_VERSION")]
    pub gui_version: Option<String>,

    /// Treat advisories as errors.
    #[arg(long)]
    pub strict: bool,
}

/// Arguments for `policy`.
#[derive(Args, Debug)]
pub struct PolicyArgs {
    /// Output format.
    #[arg(short, long, default_value = "human")]
    pub format: OutputFormat,
}

/// Arguments for `version`.
#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Output format.
    #[arg(short, long, default_value = "human")]
    pub format: OutputFormat,
}

// ============================================================================
// CLI-Local Enums
// ============================================================================

/// Color output choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ColorChoice {
    /// Auto-detect terminal support.
    #[default]
    Auto,
    /// Always use color.
    Always,
    /// Never use color.
    Never,
}

/// Output format for command results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output.
    #[default]
    Human,
    /// JSON output.
    Json,
}
