//! Forward-only reading of configuration entries from zip archives.

use std::io::{Cursor, Read};

use zip::ZipArchive;

use crate::error::{ImportError, ImportResult};

use super::dispatch::is_config_entry;

/// One configuration file taken from an archive
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveEntry {
    /// Entry name as stored in the archive, possibly with directories
    pub name: String,
    /// Entry content
    pub data: Vec<u8>,
}

/// Single-pass iterator over the `.conf` entries of a zip archive.
///
/// Directories and entries with other extensions are skipped without being
/// decompressed. Each entry is read once, when the iterator reaches it, and
/// reading stops at `max_entry_bytes`: a larger entry yields an error for
/// that entry only.
pub struct ArchiveEntries {
    archive: ZipArchive<Cursor<Vec<u8>>>,
    next_index: usize,
    max_entry_bytes: u64,
}

impl ArchiveEntries {
    /// Opens an archive held in memory
    pub fn new(bytes: Vec<u8>, max_entry_bytes: u64) -> ImportResult<Self> {
        let archive = ZipArchive::new(Cursor::new(bytes))
            .map_err(|e| ImportError::source_read("archive", e))?;
        Ok(Self {
            archive,
            next_index: 0,
            max_entry_bytes,
        })
    }

    /// Total number of entries in the archive, including skipped ones
    #[must_use]
    pub fn total_entries(&self) -> usize {
        self.archive.len()
    }

    fn read_entry(&mut self, index: usize) -> Option<ImportResult<ArchiveEntry>> {
        // Raw access reads only the header, so skipped entries are never
        // decrypted or decompressed.
        let name = match self.archive.by_index_raw(index) {
            Ok(raw) if is_config_entry(raw.name(), raw.is_dir()) => raw.name().to_string(),
            Ok(raw) => {
                tracing::trace!(entry = %raw.name(), "Skipping archive entry");
                return None;
            }
            Err(e) => {
                return Some(Err(ImportError::source_read(
                    format!("archive entry #{index}"),
                    e,
                )));
            }
        };

        let mut file = match self.archive.by_index(index) {
            Ok(file) => file,
            Err(e) => return Some(Err(ImportError::source_read(name, e))),
        };

        if file.size() > self.max_entry_bytes {
            return Some(Err(ImportError::source_read(
                name,
                format!("entry exceeds {} bytes", self.max_entry_bytes),
            )));
        }

        let mut data = Vec::new();
        // The declared size may lie; cap the actual read as well.
        let read = file
            .by_ref()
            .take(self.max_entry_bytes.saturating_add(1))
            .read_to_end(&mut data);
        match read {
            Ok(_) if data.len() as u64 > self.max_entry_bytes => Some(Err(
                ImportError::source_read(name, format!("entry exceeds {} bytes", self.max_entry_bytes)),
            )),
            Ok(_) => Some(Ok(ArchiveEntry { name, data })),
            Err(e) => Some(Err(ImportError::source_read(name, e))),
        }
    }
}

impl Iterator for ArchiveEntries {
    type Item = ImportResult<ArchiveEntry>;

    fn next(&mut self) -> Option<Self::Item> {
        while self.next_index < self.archive.len() {
            let index = self.next_index;
            self.next_index += 1;
            if let Some(entry) = self.read_entry(index) {
                return Some(entry);
            }
        }
        None
    }
}

impl std::fmt::Debug for ArchiveEntries {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ArchiveEntries")
            .field("entries", &self.archive.len())
            .field("next_index", &self.next_index)
            .field("max_entry_bytes", &self.max_entry_bytes)
            .finish()
    }
}
