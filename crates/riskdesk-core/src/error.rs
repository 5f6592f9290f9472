//! Error types for RiskDesk Core

use thiserror::Error;

use crate::condition::Namespace;

/// Core error type
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    #[error("Field '{field}' is not part of the {namespace} catalog")]
    UnknownField { namespace: Namespace, field: String },

    #[error("The {0} catalog must contain at least one field")]
    EmptyCatalog(Namespace),

    #[error("Duplicate field '{field}' in the {namespace} catalog")]
    DuplicateField { namespace: Namespace, field: String },

    #[error("Failed to parse field catalog: {0}")]
    CatalogParse(String),

    #[error("Unknown namespace: {0}")]
    UnknownNamespace(String),

    #[error("Unknown operator: {0}")]
    UnknownOperator(String),

    #[error("Unknown flag level: {0}")]
    UnknownFlagLevel(String),

    #[error("Invalid clause '{input}': {reason}")]
    InvalidClause { input: String, reason: String },
}

pub type Result<T> = std::result::Result<T, CoreError>;

impl From<serde_yaml::Error> for CoreError {
    fn from(err: serde_yaml::Error) -> Self {
        CoreError::CatalogParse(err.to_string())
    }
}
