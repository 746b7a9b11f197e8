//! Error types for the field registry

use thiserror::Error;

/// Result type for field operations
pub type Result<T> = std::result::Result<T, FieldsError>;

/// Errors that make a field descriptor unusable in a registry
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FieldsError {
    /// Field key is empty or whitespace
    #[error("field key must not be empty")]
    EmptyKey,

    /// Key already present earlier in the registry
    #[error("duplicate field key: {key}")]
    DuplicateKey { key: String },

    /// Select control without any options to choose from
    #[error("select field '{key}' has no options")]
    MissingOptions { key: String },

    /// Selected value that none of the options carries
    #[error("select field '{key}' selects unknown value '{value}'")]
    UnknownSelection { key: String, value: String },
}
