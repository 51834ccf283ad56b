//! Duplicate tunnel command.

use std::path::Path;

use crate::error::CliError;
use crate::util::{create_tunnel_manager, runtime};

/// Duplicate a tunnel under the next free numbered name
pub fn cmd_duplicate(config_path: Option<&Path>, name: &str) -> Result<(), CliError> {
    let manager = create_tunnel_manager(config_path)?;
    let copy = runtime()?.block_on(manager.duplicate(name))?;

    println!("Created duplicate tunnel '{}'", copy.name);

    Ok(())
}
