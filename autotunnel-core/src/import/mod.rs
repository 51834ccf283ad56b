//! Tunnel import
//!
//! Accepts tunnel definitions from three kinds of input:
//! - single `.conf` files
//! - `.zip` archives of `.conf` files, imported entry by entry
//! - raw text, such as clipboard content
//!
//! Every imported tunnel is parsed, named uniquely and stored in both
//! dialects. See [`TunnelImporter`].

mod archive;
mod cancel;
mod dispatch;
mod importer;
mod report;
mod source;

pub use archive::{ArchiveEntries, ArchiveEntry};
pub use cancel::CancellationToken;
pub use dispatch::{CONF_FILE_EXTENSION, SourceKind, ZIP_FILE_EXTENSION, is_config_entry};
pub use importer::{TunnelImporter, derive_default_name};
pub use report::{ImportFailure, ImportReport};
pub use source::{ByteSource, FileSource, MemorySource};
