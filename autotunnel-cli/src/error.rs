//! CLI error types and exit codes.

use autotunnel_core::error::{AutoTunnelError, ConfigError, StoreError};

/// Exit codes for CLI operations
pub mod exit_codes {
    /// General error - configuration, storage, or other non-import errors
    pub const GENERAL_ERROR: i32 = 1;
    /// At least one source could not be imported, or the named tunnel does
    /// not exist
    pub const IMPORT_FAILURE: i32 = 2;
}

/// CLI error type
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Tunnel not found
    #[error("Tunnel not found: {0}")]
    TunnelNotFound(String),

    /// One or more imports failed
    #[error("Import failed: {0}")]
    Import(String),

    /// Tunnel store error
    #[error("Store error: {0}")]
    Store(String),

    /// Stored configuration text is invalid
    #[error("Invalid tunnel configuration: {0}")]
    Format(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<StoreError> for CliError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(name) => Self::TunnelNotFound(name),
            other => Self::Store(other.to_string()),
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        Self::Config(err.to_string())
    }
}

impl From<AutoTunnelError> for CliError {
    fn from(err: AutoTunnelError) -> Self {
        match err {
            AutoTunnelError::Config(e) => e.into(),
            AutoTunnelError::Store(e) => e.into(),
            AutoTunnelError::Import(e) => Self::Import(e.user_facing().to_string()),
            AutoTunnelError::Format(e) => Self::Format(e.to_string()),
            AutoTunnelError::Io(e) => Self::Io(e),
        }
    }
}

impl CliError {
    /// Returns the appropriate exit code for this error type.
    ///
    /// Exit codes:
    /// - 0: Success (not an error)
    /// - 1: General error (configuration, store, invalid stored text, IO)
    /// - 2: Import failure or unknown tunnel
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Import(_) | Self::TunnelNotFound(_) => exit_codes::IMPORT_FAILURE,
            Self::Config(_) | Self::Store(_) | Self::Format(_) | Self::Io(_) => {
                exit_codes::GENERAL_ERROR
            }
        }
    }
}
