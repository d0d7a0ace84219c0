use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to write {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to serialize document: {0}")]
    Serialize(#[from] serde_json::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;
