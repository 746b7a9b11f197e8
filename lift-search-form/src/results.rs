//! Results loop delegation.
//!
//! Listing search results is the host's job; the form only hands its
//! instance to whatever loop renderer the host installed.

use std::sync::Arc;

use lift_search_fields::FieldDescriptor;
use lift_search_templating::{validate_template_security, Template, TemplateEngine};
use serde::Serialize;

use crate::error::Result;
use crate::instance::FormInstance;

/// Renders the results loop for a form instance.
pub trait LoopRenderer: Send + Sync {
    fn render(&self, form: &FormInstance) -> Result<String>;
}

/// Loop renderer backed by a host-supplied Liquid template.
///
/// The template sees `search_term`, `is_search`, `base_url` and `fields`
/// (the form's field descriptors). Values are not pre-escaped; use the
/// `escape` filter.
pub struct LiquidLoopRenderer {
    engine: Arc<TemplateEngine>,
    template: Template,
}

#[derive(Serialize)]
struct LoopView<'a> {
    search_term: String,
    is_search: bool,
    base_url: &'a str,
    fields: &'a [FieldDescriptor],
}

impl LiquidLoopRenderer {
    /// Validate and parse `template` once up front.
    pub fn new(engine: Arc<TemplateEngine>, template: impl Into<String>) -> Result<Self> {
        let source = template.into();
        validate_template_security(&source, false)?;
        let template = engine.parse(&source)?;
        Ok(Self { engine, template })
    }
}

impl LoopRenderer for LiquidLoopRenderer {
    fn render(&self, form: &FormInstance) -> Result<String> {
        let view = LoopView {
            search_term: form.search_term(),
            is_search: form.is_search(),
            base_url: form.base_url(),
            fields: form.fields().as_slice(),
        };
        Ok(self.engine.render_serialize(&self.template, &view)?)
    }
}
