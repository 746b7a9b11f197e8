//! Query fixtures: a YAML stand-in for the host's request state.
//!
//! ```yaml
//! now: 1700000000
//! query:
//!   search_term: rust
//!   is_search: true
//!   vars:
//!     orderby: date
//!     lift_post_type: [post, page]
//!   facets:
//!     post_type: { post: 3 }
//! content_types:
//!   post: Posts
//!   page: Pages
//! taxonomies:
//!   category:
//!     label: Categories
//!     terms: [{ id: "3", name: News }]
//! widget:
//!   before_widget: "<aside>"
//!   after_widget: "</aside>"
//! ```

use std::path::Path;

use anyhow::{Context, Result};
use lift_search_form::{StaticContentTypes, StaticQueryContext, StaticTaxonomies, WidgetArgs};
use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Fixture {
    /// Fixed current time (Unix seconds); the system clock when absent
    pub now: Option<i64>,
    pub query: StaticQueryContext,
    pub content_types: StaticContentTypes,
    pub taxonomies: StaticTaxonomies,
    pub widget: WidgetArgs,
}

impl Fixture {
    pub fn from_yaml(content: &str) -> Result<Self> {
        serde_yaml_ng::from_str(content).context("invalid query fixture")
    }

    /// Load a fixture file, or the empty fixture when no path is given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read fixture {}", path.display()))?;
        Self::from_yaml(&content).with_context(|| format!("in {}", path.display()))
    }
}
