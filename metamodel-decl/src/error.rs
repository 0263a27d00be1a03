//! Error types for declaration loading.

use thiserror::Error;

/// Result type for declaration loading.
pub type DeclResult<T> = Result<T, DeclError>;

/// Errors that can occur while loading a declaration document.
#[derive(Debug, Error)]
pub enum DeclError {
    /// The serialized document could not be decoded.
    #[error("malformed declaration document: {0}")]
    Malformed(#[from] serde_json::Error),

    /// The document declares a family that does not match its contents.
    #[error("document {document} is not a {expected} document")]
    FamilyMismatch { document: String, expected: String },
}
