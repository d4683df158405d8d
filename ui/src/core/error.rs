//! Error types for the two fallible seams: settings storage and panel attachment.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StorageError {
    /// The backend does not exist in this context (no userscript manager, no window).
    #[error("storage backend unavailable: {0}")]
    Unavailable(&'static str),

    /// The backend exists but the call threw.
    #[error("storage backend error: {0}")]
    Backend(String),

    #[error("failed to serialise setting `{key}`: {message}")]
    Serialize { key: String, message: String },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AttachError {
    #[error("no document available")]
    NoDocument,

    #[error("anchor `{0}` not found")]
    AnchorMissing(String),

    #[error("anchor has no parent to insert the panel beside")]
    NoParent,

    #[error("DOM operation failed: {0}")]
    Dom(String),
}

pub type StorageResult<T> = Result<T, StorageError>;
