use std::fs::File;
use std::ops::Deref;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use memmap2::Mmap;
use rkyv::Portable;
use rkyv::api::high::{HighValidator, access};
use rkyv::bytecheck::CheckBytes;
use rkyv::rancor::Error as RkyvError;

use super::error::{StorageError, StorageResult};

pub const RKYV_ALIGNMENT: usize = 16;

/// Read-only, cheaply clonable memory map of an artifact file.
#[derive(Clone)]
pub struct MmapFileHandle {
    inner: Arc<Mmap>,
    path: Arc<PathBuf>,
}

impl std::fmt::Debug for MmapFileHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MmapFileHandle")
            .field("path", &self.path)
            .field("len", &self.len())
            .field("strong_count", &self.strong_count())
            .finish()
    }
}

impl MmapFileHandle {
    pub fn open<P: AsRef<Path>>(path: P) -> StorageResult<Self> {
        let path = path.as_ref();
        let file = File::open(path)?;

        let metadata = file.metadata()?;
        if metadata.len() == 0 {
            return Err(StorageError::EmptyFile);
        }

        // SAFETY: artifacts are replaced by rename, never rewritten in place,
        // so the mapped inode is not mutated underneath us.
        let mmap = unsafe { Mmap::map(&file)? };

        Ok(Self {
            inner: Arc::new(mmap),
            path: Arc::new(path.to_path_buf()),
        })
    }

    pub fn as_slice(&self) -> &[u8] {
        self.inner.deref()
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn strong_count(&self) -> usize {
        Arc::strong_count(&self.inner)
    }

    /// Validates and returns the archived root at offset 0.
    pub fn access_archived<T>(&self) -> StorageResult<&T>
    where
        T: Portable + for<'a> CheckBytes<HighValidator<'a, RkyvError>>,
    {
        self.access_archived_at::<T>(0)
    }

    pub fn access_archived_at<T>(&self, offset: usize) -> StorageResult<&T>
    where
        T: Portable + for<'a> CheckBytes<HighValidator<'a, RkyvError>>,
    {
        let data = self.as_slice();

        if offset >= data.len() {
            return Err(StorageError::FileTooSmall {
                expected: offset + 1,
                actual: data.len(),
            });
        }

        let slice = &data[offset..];

        let ptr = slice.as_ptr();
        if !(ptr as usize).is_multiple_of(RKYV_ALIGNMENT) {
            return Err(StorageError::AlignmentError {
                offset,
                alignment: RKYV_ALIGNMENT,
            });
        }

        access::<T, RkyvError>(slice)
            .map_err(|e| StorageError::ValidationFailed(format!("{:?}", e)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
