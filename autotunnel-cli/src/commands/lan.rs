//! LAN routing command.

use std::path::Path;

use autotunnel_core::manager::LanPolicy;

use crate::error::CliError;
use crate::util::{create_tunnel_manager, runtime};

/// Rewrites every peer of a tunnel to exclude or include local networks
pub fn cmd_lan(config_path: Option<&Path>, name: &str, policy: LanPolicy) -> Result<(), CliError> {
    let manager = create_tunnel_manager(config_path)?;
    let tunnel = runtime()?.block_on(manager.set_lan_policy(name, policy))?;

    match policy {
        LanPolicy::Exclude => println!("Tunnel '{}' now bypasses local networks", tunnel.name),
        LanPolicy::Include => println!("Tunnel '{}' now routes all traffic", tunnel.name),
    }

    Ok(())
}
