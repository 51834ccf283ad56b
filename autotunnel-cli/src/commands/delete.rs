//! Delete tunnel command.

use std::path::Path;

use crate::error::CliError;
use crate::util::{create_tunnel_manager, runtime};

/// Delete tunnel command handler
pub fn cmd_delete(config_path: Option<&Path>, name: &str) -> Result<(), CliError> {
    let manager = create_tunnel_manager(config_path)?;
    runtime()?.block_on(manager.delete(name))?;

    println!("Deleted tunnel '{name}'");

    Ok(())
}
