//! Command handler modules for the CLI.

mod delete;
mod duplicate;
mod import;
mod lan;
mod list;
mod primary;
mod show;

use std::path::Path;

use crate::cli::Commands;
use crate::error::CliError;

/// Dispatch a CLI command to the appropriate handler.
pub fn dispatch(config_path: Option<&Path>, command: Commands) -> Result<(), CliError> {
    match command {
        Commands::Import { sources } => import::cmd_import(config_path, &sources),
        Commands::Paste => import::cmd_paste(config_path),
        Commands::List { format } => list::cmd_list(config_path, format),
        Commands::Show { name, dialect } => show::cmd_show(config_path, &name, dialect.into()),
        Commands::Delete { name } => delete::cmd_delete(config_path, &name),
        Commands::Duplicate { name } => duplicate::cmd_duplicate(config_path, &name),
        Commands::Primary { name } => primary::cmd_primary(config_path, &name),
        Commands::Lan { name, policy } => lan::cmd_lan(config_path, &name, policy.into()),
    }
}
