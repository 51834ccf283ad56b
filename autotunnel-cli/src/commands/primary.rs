//! Primary tunnel command.

use std::path::Path;

use crate::error::CliError;
use crate::util::{create_tunnel_manager, runtime};

/// Marks a tunnel as primary
pub fn cmd_primary(config_path: Option<&Path>, name: &str) -> Result<(), CliError> {
    let manager = create_tunnel_manager(config_path)?;
    let tunnel = runtime()?.block_on(manager.set_primary(name))?;

    println!("Tunnel '{}' is now primary", tunnel.name);

    Ok(())
}
