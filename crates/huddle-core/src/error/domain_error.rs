//! Domain errors - error types for the domain layer

use thiserror::Error;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("Document not found: {0}")]
    DocumentNotFound(String),

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Missing identifier for {0}")]
    MissingIdentifier(&'static str),

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Store error: {0}")]
    StoreError(String),

    #[error("Listener closed")]
    ListenerClosed,

    #[error("Collaborator error: {0}")]
    CollaboratorError(String),
}

impl DomainError {
    /// Get an error code string for callers that surface errors to users
    pub fn code(&self) -> &'static str {
        match self {
            // Not Found
            Self::DocumentNotFound(_) => "UNKNOWN_DOCUMENT",

            // Validation
            Self::MissingIdentifier(_) => "MISSING_IDENTIFIER",

            // Infrastructure
            Self::StoreError(_) => "STORE_ERROR",
            Self::ListenerClosed => "LISTENER_CLOSED",
            Self::CollaboratorError(_) => "COLLABORATOR_ERROR",
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::DocumentNotFound(_))
    }
}
