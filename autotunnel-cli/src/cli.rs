//! CLI argument parsing types using `clap`.

use std::path::PathBuf;

use autotunnel_core::manager::LanPolicy;
use autotunnel_core::wgconf::Dialect;
use clap::{Parser, Subcommand, ValueEnum};

/// `AutoTunnel` command-line interface for importing and managing tunnels
#[derive(Parser)]
#[command(name = "autotunnel-cli")]
#[command(author, version, about = "AutoTunnel command-line interface")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the configuration directory
    #[arg(short, long, global = true, env = "AUTOTUNNEL_CONFIG_DIR")]
    pub config: Option<PathBuf>,

    /// Increase output verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true, env = "NO_COLOR")]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Import tunnels from files or archives
    #[command(about = "Import tunnels from .conf files or .zip archives")]
    Import {
        /// Paths or file:// URLs of .conf or .zip files
        #[arg(required = true)]
        sources: Vec<String>,
    },

    /// Import a tunnel from text on standard input
    #[command(about = "Import a tunnel configuration read from stdin")]
    Paste,

    /// List all tunnels
    #[command(about = "List all stored tunnels")]
    List {
        /// Output format for the tunnel list
        #[arg(short, long, default_value = "table", value_enum)]
        format: OutputFormat,
    },

    /// Show tunnel details
    #[command(about = "Show a tunnel and its configuration text")]
    Show {
        /// Tunnel name
        name: String,

        /// Dialect to print the configuration in
        #[arg(short, long, default_value = "extended", value_enum)]
        dialect: DialectArg,
    },

    /// Delete a tunnel
    #[command(about = "Delete a tunnel")]
    Delete {
        /// Tunnel name
        name: String,
    },

    /// Duplicate a tunnel
    #[command(about = "Copy a tunnel under a new unique name")]
    Duplicate {
        /// Tunnel name
        name: String,
    },

    /// Mark a tunnel as primary
    #[command(about = "Make a tunnel the primary tunnel for auto-tunneling")]
    Primary {
        /// Tunnel name
        name: String,
    },

    /// Change LAN routing of a tunnel
    #[command(about = "Exclude or include local networks for every peer")]
    Lan {
        /// Tunnel name
        name: String,

        /// Whether local networks bypass the tunnel
        #[arg(value_enum)]
        policy: LanPolicyArg,
    },
}

/// Output format for the list command
#[derive(Clone, Copy, Debug, Default, ValueEnum)]
pub enum OutputFormat {
    /// Display as formatted table
    #[default]
    Table,
    /// Output as JSON
    Json,
}

/// Configuration dialect for the show command
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum DialectArg {
    /// Plain WireGuard
    Baseline,
    /// AmneziaWG
    Extended,
}

impl From<DialectArg> for Dialect {
    fn from(arg: DialectArg) -> Self {
        match arg {
            DialectArg::Baseline => Self::Baseline,
            DialectArg::Extended => Self::Extended,
        }
    }
}

/// LAN routing choice for the lan command
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum LanPolicyArg {
    /// Route only public addresses through the tunnel
    Exclude,
    /// Route everything through the tunnel
    Include,
}

impl From<LanPolicyArg> for LanPolicy {
    fn from(arg: LanPolicyArg) -> Self {
        match arg {
            LanPolicyArg::Exclude => Self::Exclude,
            LanPolicyArg::Include => Self::Include,
        }
    }
}
