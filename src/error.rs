//! Error types
//!
//! `ConfigurationError` covers mistakes made while wiring the application at
//! startup. `AppError` is what request-time operations return; the transport
//! layer maps it to a response through [`AppError::kind`].

use thiserror::Error;

use crate::store::StoreError;

/// Startup wiring errors (route table, pet catalogue)
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigurationError {
    #[error("route pattern '{0}' is already registered")]
    DuplicatePattern(String),

    #[error("route name '{0}' is already registered")]
    DuplicateName(String),

    #[error("invalid route pattern '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: String },

    #[error("pet type '{0}' is defined more than once")]
    DuplicatePetType(String),
}

/// Coarse error classification used at the transport boundary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Configuration,
    NotFound,
    Internal,
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("no route matches '{path}'")]
    RouteNotFound { path: String },

    #[error("company {id} does not exist")]
    CompanyNotFound { id: u64 },

    #[error("configuration error: {0}")]
    Configuration(#[from] ConfigurationError),

    #[error("storage error: {0}")]
    Store(#[from] StoreError),
}

impl AppError {
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::RouteNotFound { .. } | Self::CompanyNotFound { .. } => ErrorKind::NotFound,
            Self::Configuration(_) => ErrorKind::Configuration,
            Self::Store(_) => ErrorKind::Internal,
        }
    }

    pub const fn is_not_found(&self) -> bool {
        matches!(self.kind(), ErrorKind::NotFound)
    }
}
