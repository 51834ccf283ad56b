//! Configuration management for `AutoTunnel`
//!
//! This module provides the `ConfigManager` for loading and saving
//! settings (TOML) and the tunnel list (JSON).

mod manager;
mod settings;

pub use manager::{ConfigManager, SETTINGS_FILE, TUNNELS_FILE};
pub use settings::{AppSettings, DEFAULT_ACCEPTED_SCHEME, DEFAULT_MAX_ENTRY_BYTES, ImportSettings};
