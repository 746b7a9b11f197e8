//! Markup generation for the primary form and the filter panel.
//!
//! Both renderers walk the same field registry and delegate each field to
//! the renderer registered for its key.

pub mod fields;
pub mod form;
pub mod panel;

use serde::Serialize;
use tracing::warn;
use url::Url;

use crate::config::FormConfig;

pub use fields::{FieldRenderer, FieldRenderers, TemplateFieldRenderer};
pub use form::render_form;
pub use panel::render_filter_panel;

/// Wrapper markup handed to each per-field renderer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderOptions {
    pub before_field: String,
    pub after_field: String,
}

impl RenderOptions {
    pub fn from_config(config: &FormConfig) -> Self {
        Self {
            before_field: config.before_field.clone(),
            after_field: config.after_field.clone(),
        }
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self::from_config(&FormConfig::default())
    }
}

/// Escape a value for use inside a single- or double-quoted attribute.
pub fn escape_attr(value: &str) -> String {
    html_escape::encode_quoted_attribute(value).into_owned()
}

/// Escape a value for use as element text.
pub fn escape_text(value: &str) -> String {
    html_escape::encode_text(value).into_owned()
}

/// Escape a URL for an attribute, allowing only http(s) or relative URLs.
///
/// Anything else (`javascript:`, `data:`, unparsable input) becomes empty.
pub fn escape_url(raw: &str) -> String {
    let trimmed = raw.trim();
    let allowed = match Url::parse(trimmed) {
        Ok(url) => matches!(url.scheme(), "http" | "https"),
        Err(url::ParseError::RelativeUrlWithoutBase) => true,
        Err(_) => false,
    };
    if !allowed {
        warn!(url = %trimmed, "refusing unsafe url");
        return String::new();
    }
    escape_attr(trimmed)
}
