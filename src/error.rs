//! Error types for the payslip engine.
//!
//! Every operation returns [`EngineError`]. Each variant maps to a stable
//! [`ErrorKind`] so a transport layer can pick a response code without
//! looking at the message text.

use serde::Serialize;
use thiserror::Error;

use crate::store::StoreError;

/// Stable classification of an [`EngineError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Malformed or rule-violating input.
    Validation,
    /// The store already holds state that contradicts the request.
    Conflict,
    /// A referenced entity is absent.
    NotFound,
    /// Missing, invalid or insufficient identity.
    Auth,
    /// Persistence or unexpected failure.
    Internal,
}

/// The main error type for the payslip engine.
///
/// # Example
///
/// ```
/// use payslip_engine::error::{EngineError, ErrorKind};
///
/// let error = EngineError::conflict("already checked in today");
/// assert_eq!(error.kind(), ErrorKind::Conflict);
/// assert_eq!(error.to_string(), "already checked in today");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A payroll policy value is out of range.
    #[error("Invalid policy field '{field}': {message}")]
    InvalidPolicy {
        /// The offending field.
        field: String,
        /// Why the value was rejected.
        message: String,
    },

    /// Input broke a business rule.
    #[error("{message}")]
    Validation {
        /// A description of the violated rule.
        message: String,
    },

    /// The request collides with existing state.
    #[error("{message}")]
    Conflict {
        /// A description of the conflict.
        message: String,
    },

    /// A referenced entity does not exist.
    #[error("{entity} not found")]
    NotFound {
        /// Human-readable name of the missing entity.
        entity: String,
    },

    /// The caller could not be identified.
    #[error("{message}")]
    Unauthorized {
        /// A description of the authentication failure.
        message: String,
    },

    /// The caller is identified but lacks the required role.
    #[error("{message}")]
    Forbidden {
        /// A description of the missing permission.
        message: String,
    },

    /// Persistence or unexpected failure. The message is safe to show users.
    #[error("{message}")]
    Internal {
        /// A generic, user-facing description.
        message: String,
    },
}

impl EngineError {
    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Creates a conflict error.
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict {
            message: message.into(),
        }
    }

    /// Creates a not-found error for the named entity.
    pub fn not_found(entity: impl Into<String>) -> Self {
        Self::NotFound {
            entity: entity.into(),
        }
    }

    /// Creates an internal error with a user-facing message.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Creates the error raised when a money amount leaves the `i64` range.
    pub fn amount_out_of_range() -> Self {
        Self::validation("payroll total exceeds representable range")
    }

    /// Returns the stable classification of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            EngineError::Validation { .. } => ErrorKind::Validation,
            EngineError::Conflict { .. } => ErrorKind::Conflict,
            EngineError::NotFound { .. } => ErrorKind::NotFound,
            EngineError::Unauthorized { .. } | EngineError::Forbidden { .. } => ErrorKind::Auth,
            EngineError::ConfigNotFound { .. }
            | EngineError::ConfigParseError { .. }
            | EngineError::InvalidPolicy { .. }
            | EngineError::Internal { .. } => ErrorKind::Internal,
        }
    }
}

impl From<StoreError> for EngineError {
    fn from(error: StoreError) -> Self {
        match error {
            StoreError::UniqueViolation { table, key } => {
                tracing::warn!(table, key = %key, "unique constraint rejected write");
                EngineError::conflict(format!("{} already exists", table.replace('_', " ")))
            }
            other => {
                tracing::error!(error = %other, "store failure");
                EngineError::internal("internal storage error")
            }
        }
    }
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
