use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("failed to create directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Cannot mmap empty file")]
    EmptyFile,

    #[error("File size {actual} is smaller than minimum {expected}")]
    FileTooSmall { expected: usize, actual: usize },

    #[error("Data at offset {offset} is not aligned to {alignment} bytes")]
    AlignmentError { offset: usize, alignment: usize },

    #[error("rkyv validation failed: {0}")]
    ValidationFailed(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

pub type StorageResult<T> = Result<T, StorageError>;
