//! Error types for `AutoTunnel`
//!
//! Each subsystem has its own error enum; [`AutoTunnelError`] wraps them for
//! callers that deal with more than one subsystem at a time.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type for `AutoTunnel`
#[derive(Debug, Error)]
pub enum AutoTunnelError {
    /// Settings loading/saving error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Tunnel import error
    #[error("Import error: {0}")]
    Import(#[from] ImportError),

    /// Tunnel store error
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Tunnel configuration text could not be parsed
    #[error("Format error: {0}")]
    Format(#[from] ConfigFormatError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// The dialect parser rejected a configuration text.
///
/// This is the only parse failure kind exposed to callers; `reason`
/// carries the detail for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub struct ConfigFormatError {
    /// 1-based line number of the offending line, if known
    pub line: Option<usize>,
    /// Description of what was wrong
    pub reason: String,
}

impl ConfigFormatError {
    /// Creates an error that is not tied to a specific line
    #[must_use]
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            line: None,
            reason: reason.into(),
        }
    }

    /// Creates an error pointing at a line of the input
    #[must_use]
    pub fn at_line(line: usize, reason: impl Into<String>) -> Self {
        Self {
            line: Some(line),
            reason: reason.into(),
        }
    }

    /// Attaches a line number unless one is already present
    #[must_use]
    pub fn or_line(self, line: usize) -> Self {
        Self {
            line: self.line.or(Some(line)),
            reason: self.reason,
        }
    }
}

impl fmt::Display for ConfigFormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.line {
            Some(line) => write!(f, "line {line}: {}", self.reason),
            None => f.write_str(&self.reason),
        }
    }
}

/// Errors from a single import unit of work (one source or one archive entry)
#[derive(Debug, Error)]
pub enum ImportError {
    /// The source's access scheme is not the accepted one
    #[error("Unsupported source scheme '{scheme}' (expected '{expected}')")]
    InvalidSourceScheme {
        /// Scheme found on the source
        scheme: String,
        /// Scheme the importer accepts
        expected: String,
    },

    /// The source name carries neither the config nor the archive extension
    #[error("Unsupported file extension: {0}")]
    UnsupportedExtension(String),

    /// The dialect parser rejected the content
    #[error("Invalid tunnel configuration: {0}")]
    ConfigFormat(#[from] ConfigFormatError),

    /// The underlying stream could not be opened or read
    #[error("Failed to read {source_name}: {reason}")]
    SourceRead {
        /// Display name of the source
        source_name: String,
        /// Underlying failure
        reason: String,
    },

    /// The tunnel store rejected the result
    #[error("Failed to persist tunnel: {0}")]
    Store(#[from] StoreError),

    /// The import was cancelled before this unit completed
    #[error("Import cancelled")]
    Cancelled,
}

/// The two outcomes presented to end users.
///
/// The finer [`ImportError`] kinds stay available for logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UserFacingError {
    /// The selected file is not a tunnel config or archive
    InvalidFileExtension,
    /// The content could not be imported
    InvalidFormat,
}

impl UserFacingError {
    /// Returns the message shown to the user
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::InvalidFileExtension => "Invalid file extension",
            Self::InvalidFormat => "Invalid tunnel configuration format",
        }
    }
}

impl fmt::Display for UserFacingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

impl ImportError {
    /// Collapses this error into the user-visible outcome
    #[must_use]
    pub const fn user_facing(&self) -> UserFacingError {
        match self {
            Self::InvalidSourceScheme { .. } | Self::UnsupportedExtension(_) => {
                UserFacingError::InvalidFileExtension
            }
            Self::ConfigFormat(_) | Self::SourceRead { .. } | Self::Store(_) | Self::Cancelled => {
                UserFacingError::InvalidFormat
            }
        }
    }

    /// Returns true if the error came from the dialect parser
    #[must_use]
    pub const fn is_format_error(&self) -> bool {
        matches!(self, Self::ConfigFormat(_))
    }

    /// Creates a read error for the named source
    #[must_use]
    pub fn source_read(source_name: impl Into<String>, reason: impl fmt::Display) -> Self {
        Self::SourceRead {
            source_name: source_name.into(),
            reason: reason.to_string(),
        }
    }
}

/// Errors from the tunnel store
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading or writing the backing file failed
    #[error("IO error on {path}: {source}")]
    Io {
        /// File being accessed
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// The backing file holds invalid data
    #[error("Failed to (de)serialize tunnels: {0}")]
    Serialization(String),

    /// No tunnel with the given name exists
    #[error("Tunnel not found: {0}")]
    NotFound(String),
}

/// Errors from loading or saving application settings
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to parse the settings file
    #[error("Failed to parse settings: {0}")]
    Parse(String),

    /// Failed to serialize settings
    #[error("Failed to serialize settings: {0}")]
    Serialize(String),

    /// IO error
    #[error("IO error on {path}: {source}")]
    Io {
        /// File being accessed
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// No configuration directory could be determined
    #[error("Could not determine configuration directory")]
    NoConfigDir,
}

/// Result type alias for store operations
pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Result type alias for settings operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for import operations
pub type ImportResult<T> = std::result::Result<T, ImportError>;
