//! `AutoTunnel` Core Library
//!
//! This crate provides the tunnel-configuration import and normalization
//! engine of `AutoTunnel`: reading WireGuard and AmneziaWG configurations
//! from files, zip archives or clipboard text, naming them uniquely, applying
//! LAN routing policy and storing them.
//!
//! # Crate Structure
//!
//! - [`wgconf`] - Dialect parser and renderer (WireGuard / AmneziaWG)
//! - [`import`] - Source dispatch, archive reading and the import orchestrator
//! - [`naming`] - Unique name resolution and fallback names
//! - [`policy`] - LAN include/exclude transforms on peers
//! - [`store`] - Persistence traits and an in-memory store
//! - [`config`] - Settings and the file-backed store
//! - [`manager`] - Delete, duplicate, primary and LAN commands on stored tunnels
//! - [`tracing`] - Logging setup for binaries

// Enable missing_docs warning for public API documentation
#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod import;
pub mod manager;
pub mod models;
pub mod naming;
pub mod policy;
pub mod store;
pub mod tracing;
pub mod wgconf;

pub use config::{AppSettings, ConfigManager, ImportSettings};
pub use error::{
    AutoTunnelError, ConfigError, ConfigFormatError, ConfigResult, ImportError, ImportResult,
    StoreError, StoreResult, UserFacingError,
};
pub use import::{
    ByteSource, CancellationToken, FileSource, ImportFailure, ImportReport, MemorySource,
    SourceKind, TunnelImporter, derive_default_name,
};
pub use manager::{LanPolicy, TunnelManager};
pub use models::TunnelConfig;
pub use naming::{NameGenerator, RandomTunnelName, unique_name};
pub use policy::PeerProxy;
pub use store::{InMemoryTunnelStore, SettingsStore, TunnelStore};
pub use crate::tracing::{
    TracingConfig, TracingError, TracingLevel, TracingOutput, TracingResult, init_tracing,
    is_tracing_initialized,
};
pub use wgconf::{Dialect, Endpoint, Interface, Obfuscation, ParsedTunnel, Peer};
