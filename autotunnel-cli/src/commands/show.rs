//! Show tunnel command.

use std::path::Path;

use autotunnel_core::wgconf::Dialect;

use crate::error::CliError;
use crate::util::{create_tunnel_manager, runtime};

/// Show tunnel command handler.
///
/// Prints a short header followed by the stored text in the requested
/// dialect, which can be fed straight back into `import` or `wg-quick`.
pub fn cmd_show(config_path: Option<&Path>, name: &str, dialect: Dialect) -> Result<(), CliError> {
    let manager = create_tunnel_manager(config_path)?;
    let tunnel = runtime()?.block_on(manager.get(name))?;

    let lan_excluded = tunnel.parse().is_ok_and(|parsed| parsed.is_lan_excluded());

    println!("# Name: {}", tunnel.name);
    println!("# Primary: {}", if tunnel.is_primary_tunnel { "yes" } else { "no" });
    println!("# LAN excluded: {}", if lan_excluded { "yes" } else { "no" });
    println!("# Dialect: {dialect}");
    println!();

    let text = match dialect {
        Dialect::Baseline => &tunnel.wg_quick,
        Dialect::Extended => &tunnel.am_quick,
    };
    print!("{text}");

    Ok(())
}
