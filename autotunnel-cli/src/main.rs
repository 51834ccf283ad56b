//! `AutoTunnel` CLI - Command-line interface for `AutoTunnel`
//!
//! Imports WireGuard and AmneziaWG tunnels from files, archives and stdin,
//! and lists, shows, deletes, duplicates and re-routes stored tunnels.

mod cli;
mod commands;
mod error;
mod util;

use autotunnel_core::tracing::{TracingConfig, TracingLevel, init_tracing};
use clap::Parser;
use cli::Cli;

fn main() {
    let cli = Cli::parse();
    let config_path = cli.config.as_deref();

    let level = if cli.quiet {
        TracingLevel::Error
    } else {
        TracingLevel::from_verbosity(cli.verbose)
    };
    let tracing_config = TracingConfig::new()
        .with_level(level)
        .with_ansi(!cli.no_color);
    if let Err(e) = init_tracing(&tracing_config) {
        eprintln!("Warning: {e}");
    }

    let result = commands::dispatch(config_path, cli.command);

    if let Err(e) = result {
        if !cli.quiet {
            eprintln!("Error: {e}");
        }
        std::process::exit(e.exit_code());
    }
}
