//! Registry error types

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RegistryError {
    /// The artifact's file extension maps to no known format.
    #[error("unknown artifact format: {}", .0.display())]
    UnknownFormat(PathBuf),

    /// The external loader failed to produce the artifact.
    #[error("failed to load artifact: {0}")]
    Load(#[source] anyhow::Error),

    /// The flush collaborator failed to write the artifact back.
    #[error("failed to flush artifact: {0}")]
    Flush(#[source] anyhow::Error),

    #[error("cache store error: {0}")]
    Store(#[from] lodestone_store::StoreError),
}
