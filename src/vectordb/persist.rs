use std::path::Path;

use rkyv::rancor::Error as RkyvError;
use rkyv::{Archive, Deserialize, Serialize};
use tracing::info;

use super::error::VectorDbError;
use super::index::VectorIndex;
use crate::corpus::{CorpusStore, Document};
use crate::storage::{MmapFileHandle, StorageError, digest, write_atomic};

pub const INDEX_FILE: &str = "index.rkyv";
pub const META_FILE: &str = "meta.rkyv";

/// Bumped whenever either archived layout changes.
pub const INDEX_FORMAT_VERSION: u32 = 2;

#[derive(Archive, Serialize, Deserialize, Debug)]
struct IndexArtifact {
    format_version: u32,
    dim: u64,
    count: u64,
    vectors: Vec<f32>,
    /// Empty when the index was not built through an embedder.
    embedder_mode: String,
    meta_digest: [u8; 32],
}

#[derive(Archive, Serialize, Deserialize, Debug)]
struct MetaArtifact {
    format_version: u32,
    documents: Vec<Document>,
}

fn corrupt(path: &Path, reason: impl Into<String>) -> VectorDbError {
    VectorDbError::IndexCorrupt {
        path: path.to_path_buf(),
        reason: reason.into(),
    }
}

fn serialization(e: RkyvError) -> VectorDbError {
    VectorDbError::Storage(StorageError::Serialization(e.to_string()))
}

impl VectorIndex {
    /// Writes `meta.rkyv` then `index.rkyv` into `dir`, each atomically.
    pub fn persist(&self, dir: &Path) -> Result<(), VectorDbError> {
        let meta = MetaArtifact {
            format_version: INDEX_FORMAT_VERSION,
            documents: self.corpus().as_slice().to_vec(),
        };
        let meta_bytes = rkyv::to_bytes::<RkyvError>(&meta).map_err(serialization)?;

        let index = IndexArtifact {
            format_version: INDEX_FORMAT_VERSION,
            dim: self.dim() as u64,
            count: self.len() as u64,
            vectors: self.raw_vectors().to_vec(),
            embedder_mode: self.embedder_mode().unwrap_or_default().to_string(),
            meta_digest: digest(&meta_bytes),
        };
        let index_bytes = rkyv::to_bytes::<RkyvError>(&index).map_err(serialization)?;

        write_atomic(&dir.join(META_FILE), &meta_bytes)?;
        write_atomic(&dir.join(INDEX_FILE), &index_bytes)?;

        info!(
            dir = %dir.display(),
            rows = self.len(),
            dim = self.dim(),
            index_bytes = index_bytes.len(),
            meta_bytes = meta_bytes.len(),
            "Vector index persisted"
        );
        Ok(())
    }

    /// Loads and cross-checks an index written by [`persist`](Self::persist).
    pub fn load(dir: &Path) -> Result<Self, VectorDbError> {
        if !dir.is_dir() {
            return Err(VectorDbError::NotFound {
                path: dir.to_path_buf(),
            });
        }

        let index_path = dir.join(INDEX_FILE);
        let meta_path = dir.join(META_FILE);

        let index = read_artifact::<IndexArtifact, ArchivedIndexArtifact>(&index_path)?;
        let (meta, meta_digest) = {
            let handle = open(&meta_path)?;
            let digest = digest(handle.as_slice());
            let archived = handle
                .access_archived::<ArchivedMetaArtifact>()
                .map_err(|e| corrupt(&meta_path, e.to_string()))?;
            let meta = rkyv::deserialize::<MetaArtifact, RkyvError>(archived)
                .map_err(|e| corrupt(&meta_path, e.to_string()))?;
            (meta, digest)
        };

        for (path, version) in [
            (&index_path, index.format_version),
            (&meta_path, meta.format_version),
        ] {
            if version != INDEX_FORMAT_VERSION {
                return Err(corrupt(
                    path,
                    format!("unsupported format version {version}"),
                ));
            }
        }

        if meta_digest != index.meta_digest {
            return Err(corrupt(dir, "metadata digest does not match index"));
        }

        let dim = usize::try_from(index.dim).map_err(|_| corrupt(&index_path, "dimension overflow"))?;
        let count =
            usize::try_from(index.count).map_err(|_| corrupt(&index_path, "count overflow"))?;
        if dim == 0 {
            return Err(corrupt(&index_path, "zero dimension"));
        }
        if dim.checked_mul(count) != Some(index.vectors.len()) {
            return Err(corrupt(
                &index_path,
                format!(
                    "vector buffer holds {} values, expected {dim} x {count}",
                    index.vectors.len()
                ),
            ));
        }
        if meta.documents.len() != count {
            return Err(corrupt(
                dir,
                format!("{} documents for {count} vectors", meta.documents.len()),
            ));
        }

        let embedder_mode = Some(index.embedder_mode).filter(|mode| !mode.is_empty());

        info!(
            dir = %dir.display(),
            rows = count,
            dim,
            embedder = embedder_mode.as_deref().unwrap_or("unknown"),
            "Vector index loaded"
        );
        Ok(Self::from_parts(
            dim,
            index.vectors,
            CorpusStore::from(meta.documents),
            embedder_mode,
        ))
    }
}

fn open(path: &Path) -> Result<MmapFileHandle, VectorDbError> {
    MmapFileHandle::open(path).map_err(|e| corrupt(path, e.to_string()))
}

fn read_artifact<T, A>(path: &Path) -> Result<T, VectorDbError>
where
    A: rkyv::Portable
        + for<'a> rkyv::bytecheck::CheckBytes<rkyv::api::high::HighValidator<'a, RkyvError>>
        + rkyv::Deserialize<T, rkyv::api::high::HighDeserializer<RkyvError>>,
{
    let handle = open(path)?;
    let archived = handle
        .access_archived::<A>()
        .map_err(|e| corrupt(path, e.to_string()))?;
    rkyv::deserialize::<T, RkyvError>(archived).map_err(|e| corrupt(path, e.to_string()))
}
