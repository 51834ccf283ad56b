//! Shared utility functions used across command modules.

use std::path::Path;

use autotunnel_core::config::ConfigManager;
use autotunnel_core::manager::TunnelManager;

use crate::error::CliError;

/// Creates a `ConfigManager` using the optional custom config directory
/// from CLI args.
pub fn create_config_manager(config_path: Option<&Path>) -> Result<ConfigManager, CliError> {
    match config_path {
        Some(path) => Ok(ConfigManager::with_config_dir(path.to_path_buf())),
        None => ConfigManager::new()
            .map_err(|e| CliError::Config(format!("Failed to initialize config: {e}"))),
    }
}

/// Creates a `TunnelManager` over the file-backed store
pub fn create_tunnel_manager(
    config_path: Option<&Path>,
) -> Result<TunnelManager<ConfigManager>, CliError> {
    create_config_manager(config_path).map(TunnelManager::new)
}

/// Creates the runtime that drives the async store and importer
pub fn runtime() -> Result<tokio::runtime::Runtime, CliError> {
    tokio::runtime::Runtime::new()
        .map_err(|e| CliError::Config(format!("Runtime error: {e}")))
}
