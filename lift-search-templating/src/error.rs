//! Error types for template rendering

use thiserror::Error;

/// Result type for templating operations
pub type Result<T> = std::result::Result<T, TemplatingError>;

/// Errors raised while preparing or rendering a Liquid template
#[derive(Debug, Error)]
pub enum TemplatingError {
    /// Template source failed to parse
    #[error("Template parse error: {0}")]
    Parse(String),

    /// Parsed template failed to render with the given variables
    #[error("Template render error: {0}")]
    Render(String),

    /// Render variables could not be converted to a Liquid object
    #[error("Template variables error: {0}")]
    Variables(String),

    /// Template rejected by the security limits
    #[error("Template security error: {0}")]
    Security(String),
}
