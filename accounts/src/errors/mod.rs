//! Service-level error types.
//!
//! Every account operation returns a [`ServiceResult`]. Business-rule
//! violations get their own variants so callers can match on them instead of
//! inspecting messages; failures raised by the repository or the credential
//! encoder are carried through untouched.

use crate::utils::encoder::EncodeError;
use thiserror::Error;

/// Errors surfaced by the account service.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// No record matches the requested id or username.
    #[error("{entity} not found: {identifier}")]
    NotFound { entity: String, identifier: String },

    /// The username is already claimed by a different account.
    #[error("Username {username} already exists")]
    DuplicateResource { username: String },

    /// Caller-supplied data is inconsistent or incomplete.
    #[error("Invalid state: {message}")]
    InvalidState { message: String },

    #[error("Repository error: {source}")]
    Repository {
        #[from]
        source: anyhow::Error,
    },

    #[error("Credential encoding error: {source}")]
    Encoding {
        #[from]
        source: EncodeError,
    },
}

pub type ServiceResult<T> = Result<T, ServiceError>;

impl ServiceError {
    // Helper constructors for common patterns

    pub fn not_found(entity: impl Into<String>, identifier: impl ToString) -> Self {
        Self::NotFound {
            entity: entity.into(),
            identifier: identifier.to_string(),
        }
    }

    pub fn duplicate_resource(username: impl Into<String>) -> Self {
        Self::DuplicateResource {
            username: username.into(),
        }
    }

    pub fn invalid_state(message: impl Into<String>) -> Self {
        Self::InvalidState {
            message: message.into(),
        }
    }

    /// Builds an `InvalidState` error from `validator` output, one
    /// `field: message` entry per failed rule.
    pub fn from_validation(errors: validator::ValidationErrors) -> Self {
        let mut messages: Vec<String> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errors)| {
                errors.iter().map(move |error| {
                    format!(
                        "{}: {}",
                        field,
                        error.message.as_ref().unwrap_or(&"Invalid value".into())
                    )
                })
            })
            .collect();
        messages.sort();

        Self::invalid_state(messages.join(", "))
    }
}
