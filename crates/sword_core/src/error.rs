use thiserror::Error;

use crate::models::deposit_target::ObjectKind;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SwordError {
    #[error("Object {id} has kind '{kind}', only collections can be described for deposit")]
    TypeMismatch { id: String, kind: ObjectKind },

    #[error("Invalid identifier '{id}': {reason}")]
    InvalidIdentifier { id: String, reason: String },

    #[error("Upstream unavailable during {operation}: {reason}")]
    UpstreamUnavailable { operation: String, reason: String },

    #[error("Deposit target not found: {id}")]
    NotFound { id: String },

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Which side of the exchange an error belongs to, for the request layer to
/// map onto a status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    Client,
    Server,
}

impl SwordError {
    pub fn class(&self) -> ErrorClass {
        match self {
            SwordError::TypeMismatch { .. }
            | SwordError::InvalidIdentifier { .. }
            | SwordError::NotFound { .. } => ErrorClass::Client,
            SwordError::UpstreamUnavailable { .. }
            | SwordError::Configuration(_)
            | SwordError::Serialization(_) => ErrorClass::Server,
        }
    }

    pub fn upstream(operation: impl Into<String>, reason: impl ToString) -> Self {
        SwordError::UpstreamUnavailable {
            operation: operation.into(),
            reason: reason.to_string(),
        }
    }

    pub fn invalid_identifier(id: impl Into<String>, reason: impl Into<String>) -> Self {
        SwordError::InvalidIdentifier {
            id: id.into(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, SwordError>;
