//! Import orchestration: file, archive and clipboard flows.

use tracing::{debug, info, instrument, warn};

use crate::config::ImportSettings;
use crate::error::{ImportError, ImportResult};
use crate::models::TunnelConfig;
use crate::naming::{NameGenerator, RandomTunnelName, name_from_file_name, unique_name};
use crate::store::TunnelStore;
use crate::wgconf::{Dialect, ParsedTunnel, parse_bytes};

use super::archive::ArchiveEntries;
use super::cancel::CancellationToken;
use super::dispatch::SourceKind;
use super::report::ImportReport;
use super::source::ByteSource;

/// Derives a default tunnel name from configuration text: the host of the
/// first peer's endpoint.
///
/// Returns `None` when the text does not parse or its first peer has no
/// endpoint; the caller picks a fallback.
#[must_use]
pub fn derive_default_name(text: &str) -> Option<String> {
    ParsedTunnel::parse_extended(text)
        .ok()
        .as_ref()
        .and_then(endpoint_name)
}

fn endpoint_name(tunnel: &ParsedTunnel) -> Option<String> {
    tunnel
        .first_endpoint_host()
        .filter(|host| !host.is_empty())
        .map(str::to_string)
}

/// Imports tunnel configurations into a [`TunnelStore`].
///
/// Every entry point is an independent unit of work. Failures are turned
/// into [`ImportError`]s and never abort sibling items: an archive with one
/// broken entry still imports the others.
///
/// Names are made unique against the store contents read just before each
/// save. Two imports running at the same time may still pick the same
/// name; callers that need strict uniqueness run imports one at a time.
pub struct TunnelImporter<S, G = RandomTunnelName> {
    store: S,
    names: G,
    settings: ImportSettings,
}

impl<S: TunnelStore, G: NameGenerator> TunnelImporter<S, G> {
    /// Creates an importer with default settings
    #[must_use]
    pub fn new(store: S, names: G) -> Self {
        Self {
            store,
            names,
            settings: ImportSettings::default(),
        }
    }

    /// Replaces the import settings
    #[must_use]
    pub fn with_settings(mut self, settings: ImportSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Returns the underlying store
    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Returns the active import settings
    #[must_use]
    pub const fn settings(&self) -> &ImportSettings {
        &self.settings
    }

    /// Imports a `.conf` file or a `.zip` archive.
    ///
    /// The source's scheme is checked before anything is read. The display
    /// name decides how the content is handled; a source without one gets
    /// a generated name, which has no extension and is therefore rejected.
    #[instrument(skip(self, source, cancel), fields(uri = %source.uri()))]
    pub async fn import_source(
        &self,
        source: &dyn ByteSource,
        cancel: &CancellationToken,
    ) -> ImportReport {
        if cancel.is_cancelled() {
            return ImportReport::cancelled();
        }

        let scheme = source.scheme().unwrap_or_default();
        if scheme != self.settings.accepted_scheme {
            let error = ImportError::InvalidSourceScheme {
                scheme,
                expected: self.settings.accepted_scheme.clone(),
            };
            warn!(error = %error, "Rejected import source");
            return ImportReport::failed(source.uri(), error);
        }

        let name = source.display_name().unwrap_or_else(|| {
            let generated = self.names.generate();
            debug!(name = %generated, "Source has no display name, using generated name");
            generated
        });

        let kind = match SourceKind::classify(&name) {
            Ok(kind) => kind,
            Err(error) => {
                warn!(source = %name, error = %error, "Rejected import source");
                return ImportReport::failed(name, error);
            }
        };

        let bytes = match source.open().await {
            Ok(bytes) => bytes,
            Err(e) => {
                let error = ImportError::source_read(&name, e);
                warn!(error = %error, "Failed to read import source");
                return ImportReport::failed(name, error);
            }
        };

        let report = match kind {
            SourceKind::Config => {
                let mut report = ImportReport::new();
                match self.import_config(&name, &bytes, cancel).await {
                    Ok(tunnel) => report.add_tunnel(tunnel),
                    Err(ImportError::Cancelled) => report.cancelled = true,
                    Err(error) => {
                        warn!(source = %name, error = %error, "Failed to import tunnel");
                        report.add_failure(name.clone(), error);
                    }
                }
                report
            }
            SourceKind::Archive => self.import_archive(&name, bytes, cancel).await,
        };

        info!(source = %name, summary = %report.summary(), "Import finished");
        report
    }

    /// Imports a single configuration file's content.
    ///
    /// The tunnel is named after the file with its extension removed.
    #[instrument(skip(self, bytes), fields(len = bytes.len()))]
    pub async fn import_file_bytes(
        &self,
        file_name: &str,
        bytes: &[u8],
    ) -> ImportResult<TunnelConfig> {
        self.import_config(file_name, bytes, &CancellationToken::new())
            .await
    }

    /// Imports every `.conf` entry of a zip archive, one after another.
    ///
    /// Failed entries are logged and recorded in the report; the remaining
    /// entries are still imported. Cancellation is checked before each
    /// entry. Entries saved before cancellation stay saved. An archive that
    /// cannot be opened is reported under the item name `"archive"`.
    #[instrument(skip(self, bytes, cancel), fields(len = bytes.len()))]
    pub async fn import_archive_bytes(
        &self,
        bytes: Vec<u8>,
        cancel: &CancellationToken,
    ) -> ImportReport {
        self.import_archive("archive", bytes, cancel).await
    }

    /// Imports the entries of an archive; `archive_name` labels a failure
    /// to open it
    async fn import_archive(
        &self,
        archive_name: &str,
        bytes: Vec<u8>,
        cancel: &CancellationToken,
    ) -> ImportReport {
        let mut entries = match ArchiveEntries::new(bytes, self.settings.max_entry_bytes) {
            Ok(entries) => entries,
            Err(error) => {
                warn!(archive = %archive_name, error = %error, "Failed to open archive");
                return ImportReport::failed(archive_name, error);
            }
        };
        debug!(archive = %archive_name, entries = entries.total_entries(), "Opened archive");

        let mut report = ImportReport::new();
        loop {
            if cancel.is_cancelled() {
                info!(imported = report.imported.len(), "Archive import cancelled");
                report.cancelled = true;
                break;
            }
            let Some(entry) = entries.next() else {
                break;
            };

            let entry = match entry {
                Ok(entry) => entry,
                Err(error) => {
                    let item = match &error {
                        ImportError::SourceRead { source_name, .. } => source_name.clone(),
                        _ => "archive entry".to_string(),
                    };
                    warn!(entry = %item, error = %error, "Failed to read archive entry");
                    report.add_failure(item, error);
                    continue;
                }
            };

            match self.import_config(&entry.name, &entry.data, cancel).await {
                Ok(tunnel) => report.add_tunnel(tunnel),
                Err(ImportError::Cancelled) => {
                    report.cancelled = true;
                    break;
                }
                Err(error) => {
                    warn!(entry = %entry.name, error = %error, "Failed to import archive entry");
                    report.add_failure(entry.name, error);
                }
            }
        }
        report
    }

    /// Imports configuration text, e.g. from the clipboard.
    ///
    /// The tunnel is named after the first peer's endpoint host, or gets a
    /// generated name when there is none.
    #[instrument(skip(self, text))]
    pub async fn import_text(&self, text: &str) -> ImportResult<TunnelConfig> {
        let tunnel = ParsedTunnel::parse_extended(text).inspect_err(|e| {
            warn!(error = %e, "Clipboard text is not a tunnel configuration");
        })?;
        let candidate = endpoint_name(&tunnel).unwrap_or_else(|| self.names.generate());
        self.commit(&candidate, &tunnel, &CancellationToken::new())
            .await
    }

    /// Saves a copy of a tunnel under a unique name
    #[instrument(skip(self, tunnel), fields(tunnel = %tunnel.name))]
    pub async fn duplicate(&self, tunnel: &TunnelConfig) -> ImportResult<TunnelConfig> {
        Ok(crate::manager::duplicate_tunnel(&self.store, tunnel).await?)
    }

    async fn import_config(
        &self,
        file_name: &str,
        bytes: &[u8],
        cancel: &CancellationToken,
    ) -> ImportResult<TunnelConfig> {
        let tunnel = parse_bytes(bytes, Dialect::Extended)?;
        let base = name_from_file_name(file_name);
        let candidate = if base.is_empty() {
            self.names.generate()
        } else {
            base.to_string()
        };
        self.commit(&candidate, &tunnel, cancel).await
    }

    async fn commit(
        &self,
        candidate: &str,
        tunnel: &ParsedTunnel,
        cancel: &CancellationToken,
    ) -> ImportResult<TunnelConfig> {
        if cancel.is_cancelled() {
            return Err(ImportError::Cancelled);
        }

        let existing = self.store.tunnel_names().await?;
        let name = unique_name(candidate, &existing);
        let config = TunnelConfig::from_parsed(name, tunnel);

        if cancel.is_cancelled() {
            return Err(ImportError::Cancelled);
        }

        self.store.save(config.clone()).await?;
        info!(tunnel = %config.name, peers = tunnel.peers.len(), "Imported tunnel");
        Ok(config)
    }
}

impl<S, G> std::fmt::Debug for TunnelImporter<S, G> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TunnelImporter")
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}
