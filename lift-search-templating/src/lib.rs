//! Liquid templating for the Lift search form
//!
//! Per-field renderers describe their markup as Liquid templates. This crate
//! owns the parser configuration and the limits applied to templates that
//! come from configuration rather than from the built-in set.

pub mod engine;
pub mod error;
pub mod security;

pub use engine::TemplateEngine;
pub use error::{Result, TemplatingError};
pub use security::validate_template_security;

pub use liquid::{Object, Template};
