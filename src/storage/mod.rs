//! Storage primitives for persisted artifacts (atomic writes + mmap reads).
//!
//! Artifacts are `rkyv` archives. Writers go through [`write_atomic`] so a reader
//! never observes a half-written file; readers map the file with
//! [`MmapFileHandle`] and validate the archive before deserializing.

pub mod error;
pub mod mmap;


pub use error::{StorageError, StorageResult};
pub use mmap::{MmapFileHandle, RKYV_ALIGNMENT};

use std::fs;
use std::io::Write;
use std::path::Path;

use tracing::debug;

/// Writes `bytes` to `path` via a sibling temp file, fsync and rename.
///
/// Parent directories are created as needed. Returns the number of bytes written.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> StorageResult<u64> {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };

    fs::create_dir_all(parent).map_err(|source| StorageError::CreateDir {
        path: parent.to_path_buf(),
        source,
    })?;

    let mut temp = tempfile::NamedTempFile::new_in(parent)?;
    temp.write_all(bytes)?;
    temp.as_file().sync_all()?;
    temp.persist(path).map_err(|e| StorageError::Io(e.error))?;

    debug!(path = %path.display(), bytes = bytes.len(), "Artifact written");
    Ok(bytes.len() as u64)
}

/// Returns the BLAKE3 digest of `bytes` (used to bind co-located artifacts).
pub fn digest(bytes: &[u8]) -> [u8; 32] {
    *blake3::hash(bytes).as_bytes()
}
