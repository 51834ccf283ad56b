//! Extension-based classification of import sources.

use crate::error::{ImportError, ImportResult};
use crate::naming::file_extension;

/// Extension of a single tunnel configuration file
pub const CONF_FILE_EXTENSION: &str = ".conf";

/// Extension of an archive bundling several configuration files
pub const ZIP_FILE_EXTENSION: &str = ".zip";

/// How a named source is handled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceKind {
    /// One configuration file
    Config,
    /// A zip archive of configuration files
    Archive,
}

impl SourceKind {
    /// Classifies a source by the extension of its name.
    ///
    /// Matching is case-sensitive: `HOME.CONF` is rejected.
    pub fn classify(file_name: &str) -> ImportResult<Self> {
        match file_extension(file_name) {
            Some(CONF_FILE_EXTENSION) => Ok(Self::Config),
            Some(ZIP_FILE_EXTENSION) => Ok(Self::Archive),
            _ => Err(ImportError::UnsupportedExtension(file_name.to_string())),
        }
    }
}

/// Returns true for archive entries that should be imported: regular files
/// whose own name carries the configuration extension
#[must_use]
pub fn is_config_entry(name: &str, is_dir: bool) -> bool {
    !is_dir && file_extension(name) == Some(CONF_FILE_EXTENSION)
}
