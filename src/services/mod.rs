pub mod credential_service;
pub mod record_service;

pub use credential_service::{CredentialService, Registration};
pub use record_service::{permits, RecordService};

use std::collections::HashMap;

use thiserror::Error;

use crate::database::DatabaseError;

/// Failures of the credential and record workflows
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{message}")]
    Validation {
        message: String,
        field_errors: HashMap<String, String>,
    },

    #[error("email is already registered")]
    DuplicateEmail,

    /// Missing record, or one the requester may not touch
    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("authentication required")]
    Unauthenticated,

    #[error(transparent)]
    Persistence(#[from] DatabaseError),

    #[error("{0}")]
    Internal(String),
}

impl ServiceError {
    pub fn validation(field_errors: HashMap<String, String>) -> Self {
        ServiceError::Validation {
            message: "Please correct the highlighted fields".to_string(),
            field_errors,
        }
    }
}
