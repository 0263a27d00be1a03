//! Error types for document providers and model access.

use metamodel_types::DocumentId;
use std::fmt;
use std::time::Duration;
use thiserror::Error;

/// Result type for document provider operations.
pub type ProviderResult<T> = Result<T, ProviderError>;

/// Result type for model access.
pub type AccessResult<T> = Result<T, AccessError>;

/// Errors reported by a [`crate::DocumentProvider`].
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ProviderError {
    /// The document index is being rebuilt and cannot be trusted.
    #[error("document index is inconsistent: {0}")]
    Inconsistent(String),

    /// The document exists but could not be parsed.
    #[error("document {document} is malformed: {reason}")]
    Malformed { document: DocumentId, reason: String },

    /// The document disappeared between listing and loading.
    #[error("document not found: {0}")]
    NotFound(DocumentId),
}

/// Why a model cannot be served right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NotReadyReason {
    /// The provider is still indexing, or its index is inconsistent.
    IndexNotSettled,
    /// A rebuild is running.
    RebuildInProgress,
    /// The document set changed and a rebuild was just started.
    RebuildScheduled,
}

impl fmt::Display for NotReadyReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            NotReadyReason::IndexNotSettled => "document index not settled",
            NotReadyReason::RebuildInProgress => "rebuild in progress",
            NotReadyReason::RebuildScheduled => "rebuild scheduled",
        })
    }
}

/// Errors returned by [`crate::MetaModelAccess`].
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AccessError {
    /// No up-to-date model is available yet; retry later.
    #[error("meta-model not ready: {0}")]
    NotReady(NotReadyReason),

    /// Waiting for a model exceeded the configured timeout.
    #[error("timed out after {0:?} waiting for the meta-model")]
    Timeout(Duration),
}

impl AccessError {
    /// Transient errors that callers should retry rather than surface.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, AccessError::NotReady(_) | AccessError::Timeout(_))
    }

    #[must_use]
    pub fn not_ready_reason(&self) -> Option<NotReadyReason> {
        match self {
            AccessError::NotReady(reason) => Some(*reason),
            AccessError::Timeout(_) => None,
        }
    }
}
