//! Named byte sources the importer reads from.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use url::Url;

use crate::error::{ImportError, ImportResult};

/// A readable, named location such as a picked file.
///
/// The importer checks [`scheme`](ByteSource::scheme) before calling
/// [`open`](ByteSource::open), so a rejected source is never read.
#[async_trait]
pub trait ByteSource: Send + Sync {
    /// Scheme-bearing location, e.g. `file:///home/user/home.conf`
    fn uri(&self) -> &str;

    /// Access scheme of the location
    fn scheme(&self) -> Option<String> {
        Url::parse(self.uri()).ok().map(|url| url.scheme().to_string())
    }

    /// File name presented to the user, if one can be determined
    fn display_name(&self) -> Option<String>;

    /// Reads the full content
    async fn open(&self) -> std::io::Result<Vec<u8>>;
}

/// A file on the local filesystem, addressed by a `file://` URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileSource {
    url: Url,
}

impl FileSource {
    /// Creates a source for a filesystem path (relative paths are resolved
    /// against the working directory)
    pub fn from_path(path: impl AsRef<Path>) -> ImportResult<Self> {
        let path = path.as_ref();
        let absolute = std::path::absolute(path)
            .map_err(|e| ImportError::source_read(path.display().to_string(), e))?;
        let url = Url::from_file_path(&absolute).map_err(|()| {
            ImportError::source_read(absolute.display().to_string(), "not an absolute path")
        })?;
        Ok(Self { url })
    }

    /// Creates a source from either a URL (`file:///...`) or a plain path.
    ///
    /// URLs with other schemes are accepted here and rejected later by the
    /// importer's scheme check.
    pub fn parse(location: &str) -> ImportResult<Self> {
        if location.contains("://") {
            let url = Url::parse(location).map_err(|e| ImportError::source_read(location, e))?;
            Ok(Self { url })
        } else {
            Self::from_path(location)
        }
    }

    /// Local path for `file` URLs
    #[must_use]
    pub fn path(&self) -> Option<PathBuf> {
        self.url.to_file_path().ok()
    }
}

#[async_trait]
impl ByteSource for FileSource {
    fn uri(&self) -> &str {
        self.url.as_str()
    }

    fn display_name(&self) -> Option<String> {
        self.path()
            .and_then(|path| path.file_name().map(|name| name.to_string_lossy().into_owned()))
            .or_else(|| {
                self.url
                    .path_segments()
                    .and_then(Iterator::last)
                    .filter(|segment| !segment.is_empty())
                    .map(str::to_string)
            })
    }

    async fn open(&self) -> std::io::Result<Vec<u8>> {
        let path = self.path().ok_or_else(|| {
            std::io::Error::new(
                std::io::ErrorKind::Unsupported,
                format!("{} is not a local file", self.url),
            )
        })?;
        tokio::fs::read(path).await
    }
}

/// Bytes held in memory under a name, e.g. piped input or test fixtures
#[derive(Debug, Clone)]
pub struct MemorySource {
    uri: String,
    scheme: String,
    name: Option<String>,
    bytes: Vec<u8>,
}

impl MemorySource {
    /// Creates a `file`-scheme source with the given display name
    #[must_use]
    pub fn new(name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self::build("file", Some(name.into()), bytes.into())
    }

    /// Creates a source without a display name
    #[must_use]
    pub fn unnamed(bytes: impl Into<Vec<u8>>) -> Self {
        Self::build("file", None, bytes.into())
    }

    /// Returns a copy reporting a different access scheme
    #[must_use]
    pub fn with_scheme(self, scheme: impl Into<String>) -> Self {
        let scheme: String = scheme.into();
        Self::build(&scheme, self.name, self.bytes)
    }

    fn build(scheme: &str, name: Option<String>, bytes: Vec<u8>) -> Self {
        let uri = format!("{scheme}:///{}", name.as_deref().unwrap_or_default());
        Self {
            uri,
            scheme: scheme.to_string(),
            name,
            bytes,
        }
    }
}

#[async_trait]
impl ByteSource for MemorySource {
    fn uri(&self) -> &str {
        &self.uri
    }

    fn scheme(&self) -> Option<String> {
        Some(self.scheme.clone())
    }

    fn display_name(&self) -> Option<String> {
        self.name.clone()
    }

    async fn open(&self) -> std::io::Result<Vec<u8>> {
        Ok(self.bytes.clone())
    }
}
