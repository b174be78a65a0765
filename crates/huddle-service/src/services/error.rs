//! Service layer error types
//!
//! Provides a unified error type for all service operations.

use huddle_common::AppError;
use huddle_core::DomainError;
use std::fmt;

/// Service layer error type
#[derive(Debug)]
pub enum ServiceError {
    /// Domain rule violation or store failure
    Domain(DomainError),

    /// Application error (credentials, hashing, etc.)
    App(AppError),

    /// Resource not found
    NotFound { resource: &'static str, id: String },

    /// Validation error
    Validation(String),

    /// A UI-side collaborator failed
    Collaborator(String),
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Domain(e) => write!(f, "{e}"),
            Self::App(e) => write!(f, "{e}"),
            Self::NotFound { resource, id } => write!(f, "{resource} not found: {id}"),
            Self::Validation(msg) => write!(f, "Validation error: {msg}"),
            Self::Collaborator(msg) => write!(f, "Collaborator error: {msg}"),
        }
    }
}

impl std::error::Error for ServiceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Domain(e) => Some(e),
            Self::App(e) => Some(e),
            _ => None,
        }
    }
}

impl ServiceError {
    /// Create a not found error
    pub fn not_found(resource: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            resource,
            id: id.into(),
        }
    }

    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Whether this error means the addressed record does not exist
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::NotFound { .. } => true,
            Self::Domain(e) => e.is_not_found(),
            _ => false,
        }
    }

    /// Get the error code for callers that surface errors to users
    pub fn error_code(&self) -> &str {
        match self {
            Self::Domain(e) => e.code(),
            Self::App(e) => e.error_code(),
            Self::NotFound { .. } => "NOT_FOUND",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::Collaborator(_) => "COLLABORATOR_ERROR",
        }
    }
}

impl From<DomainError> for ServiceError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::CollaboratorError(msg) => Self::Collaborator(msg),
            other => Self::Domain(other),
        }
    }
}

impl From<AppError> for ServiceError {
    fn from(err: AppError) -> Self {
        match err {
            AppError::Domain(e) => Self::from(e),
            other => Self::App(other),
        }
    }
}

impl From<validator::ValidationErrors> for ServiceError {
    fn from(err: validator::ValidationErrors) -> Self {
        Self::Validation(err.to_string())
    }
}

/// Result type for service operations
pub type ServiceResult<T> = Result<T, ServiceError>;

/// Log a failed operation at the service boundary before handing it back
pub(crate) trait LogFailure<T> {
    fn log_failure(self, action: &'static str) -> ServiceResult<T>;
}

impl<T, E: Into<ServiceError>> LogFailure<T> for Result<T, E> {
    fn log_failure(self, action: &'static str) -> ServiceResult<T> {
        self.map_err(|e| {
            let err = e.into();
            tracing::error!(error = %err, code = err.error_code(), "{action} failed");
            err
        })
    }
}
