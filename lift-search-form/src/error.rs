//! Error types for the search form

use std::path::PathBuf;

use lift_search_templating::TemplatingError;
use thiserror::Error;

/// Result type for search form operations
pub type Result<T> = std::result::Result<T, FormError>;

/// Errors raised while configuring or rendering the search form
///
/// Rendering entry points never return these; they degrade to empty
/// fragments. Construction and configuration loading do.
#[derive(Debug, Error)]
pub enum FormError {
    /// Configuration sources could not be merged or extracted
    #[error("Failed to load configuration: {0}")]
    Config(#[from] Box<figment::Error>),

    /// Configuration file has an extension we cannot map to a format
    #[error("Unsupported configuration file format: {path}")]
    UnsupportedConfigFormat { path: PathBuf },

    /// Configuration value is out of range or inconsistent
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidConfig { key: String, message: String },

    /// Template setup or rendering failed
    #[error(transparent)]
    Template(#[from] TemplatingError),
}

impl From<figment::Error> for FormError {
    fn from(error: figment::Error) -> Self {
        FormError::Config(Box::new(error))
    }
}
