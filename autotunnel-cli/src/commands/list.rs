//! List tunnels command.

use std::fmt::Write as _;
use std::path::Path;

use autotunnel_core::models::TunnelConfig;
use autotunnel_core::wgconf::ParsedTunnel;

use crate::cli::OutputFormat;
use crate::error::CliError;
use crate::util::{create_tunnel_manager, runtime};

/// List tunnels command handler
pub fn cmd_list(config_path: Option<&Path>, format: OutputFormat) -> Result<(), CliError> {
    let manager = create_tunnel_manager(config_path)?;
    let tunnels = runtime()?.block_on(manager.list())?;

    match format {
        OutputFormat::Table => println!("{}", format_table(&tunnels)),
        OutputFormat::Json => println!("{}", format_json(&tunnels)?),
    }

    Ok(())
}

/// Format tunnels as a table string
#[must_use]
pub fn format_table(tunnels: &[TunnelConfig]) -> String {
    if tunnels.is_empty() {
        return "No tunnels found.".to_string();
    }

    let rows: Vec<TunnelOutput> = tunnels.iter().map(TunnelOutput::from).collect();

    let name_width = rows.iter().map(|r| r.name.len()).max().unwrap_or(4).max(4);
    let endpoint_width = rows
        .iter()
        .map(|r| r.endpoint.as_deref().map_or(1, str::len))
        .max()
        .unwrap_or(8)
        .max(8);
    let peers_width = 5;

    let mut output = String::new();
    let _ = writeln!(
        output,
        "{:<name_width$}  {:<endpoint_width$}  {:<peers_width$}  PRIMARY",
        "NAME", "ENDPOINT", "PEERS"
    );
    let _ = writeln!(
        output,
        "{:-<name_width$}  {:-<endpoint_width$}  {:-<peers_width$}  -------",
        "", "", ""
    );

    for row in &rows {
        let _ = writeln!(
            output,
            "{:<name_width$}  {:<endpoint_width$}  {:<peers_width$}  {}",
            row.name,
            row.endpoint.as_deref().unwrap_or("-"),
            row.peers,
            if row.primary { "yes" } else { "" }
        );
    }

    output.trim_end().to_string()
}

/// Format tunnels as JSON string
///
/// # Errors
///
/// Returns `CliError::Config` if JSON serialization fails.
pub fn format_json(tunnels: &[TunnelConfig]) -> Result<String, CliError> {
    let output: Vec<TunnelOutput> = tunnels.iter().map(TunnelOutput::from).collect();
    serde_json::to_string_pretty(&output)
        .map_err(|e| CliError::Config(format!("Failed to serialize to JSON: {e}")))
}

/// Simplified tunnel output for CLI
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct TunnelOutput {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
    pub peers: usize,
    pub primary: bool,
    pub lan_excluded: bool,
}

impl From<&TunnelConfig> for TunnelOutput {
    fn from(tunnel: &TunnelConfig) -> Self {
        // Stored text that no longer parses still gets listed
        let parsed: Option<ParsedTunnel> = tunnel.parse().ok();
        Self {
            name: tunnel.name.clone(),
            endpoint: parsed
                .as_ref()
                .and_then(|p| p.peers.iter().find_map(|peer| peer.endpoint.as_ref()))
                .map(ToString::to_string),
            peers: parsed.as_ref().map_or(0, |p| p.peers.len()),
            primary: tunnel.is_primary_tunnel,
            lan_excluded: parsed.as_ref().is_some_and(ParsedTunnel::is_lan_excluded),
        }
    }
}
