//! Per-field renderer dispatch.
//!
//! Presentation of each field is looked up by key, so one field's markup can
//! be swapped without touching the form or panel renderers. A key with no
//! registered renderer contributes nothing.

use std::collections::HashMap;
use std::sync::Arc;

use lift_search_fields::FieldDescriptor;
use lift_search_templating::{Template, TemplateEngine};
use serde::Serialize;

use crate::config::FormConfig;
use crate::defaults::{DATE_END, DATE_START, ORDERBY, POST_TYPE};
use crate::error::Result;
use crate::render::{escape_attr, escape_text, RenderOptions};

/// Renders one field's markup for the primary form and, optionally, the
/// JS-enhanced filter panel.
pub trait FieldRenderer: Send + Sync {
    /// Markup for the primary form, or `None` to contribute nothing.
    fn render(&self, field: &FieldDescriptor, options: &RenderOptions) -> Result<Option<String>>;

    /// Alternate markup for the filter panel. `is_last` is set for the final
    /// field of the panel's collection.
    fn render_faux(&self, _field: &FieldDescriptor, _is_last: bool) -> Result<Option<String>> {
        Ok(None)
    }
}

pub const SELECT_TEMPLATE: &str = "{{ before_field }}<label for='lift-{{ key }}' class='lift-field-label'>{{ label }}</label>\
<select name='{{ name }}' id='lift-{{ key }}'{% if multiple %} multiple='multiple'{% endif %}>\
{% for option in options %}<option value='{{ option.value }}'{% if option.selected %} selected='selected'{% endif %}>{{ option.label }}</option>{% endfor %}\
</select>{{ after_field }}";

pub const FAUX_SELECT_TEMPLATE: &str = "<li class='lift-filter-item lift-filter-{{ key }}{% if is_last %} last{% endif %}'>\
<a href='#' class='lift-filter-toggle'>{{ label }}</a><ul class='lift-filter-options'>\
{% for option in options %}<li{% if option.selected %} class='selected'{% endif %}>\
<a href='#' data-lift-key='{{ key }}' data-lift-value='{{ option.value }}'>{{ option.label }}</a></li>{% endfor %}\
</ul></li>";

pub const HIDDEN_TEMPLATE: &str = "<input type='hidden' name='{{ name }}' value='{{ value }}' />";

pub const TEXT_TEMPLATE: &str = "{{ before_field }}<label for='lift-{{ key }}' class='lift-field-label'>{{ label }}</label>\
<input type='text' name='{{ name }}' id='lift-{{ key }}' value='{{ value }}' />{{ after_field }}";

pub const CHECKBOX_TEMPLATE: &str = "{{ before_field }}<fieldset class='lift-checkboxes lift-filter-{{ key }}'><legend>{{ label }}</legend>\
{% for option in options %}<label><input type='checkbox' name='{{ name }}' value='{{ option.value }}'{% if option.selected %} checked='checked'{% endif %} /> {{ option.label }}</label>{% endfor %}\
</fieldset>{{ after_field }}";

/// Values handed to control templates. Strings are already HTML-escaped.
#[derive(Serialize)]
struct FieldView {
    key: String,
    name: String,
    label: String,
    value: String,
    multiple: bool,
    options: Vec<OptionView>,
    before_field: String,
    after_field: String,
    is_last: bool,
}

#[derive(Serialize)]
struct OptionView {
    label: String,
    value: String,
    selected: bool,
}

impl FieldView {
    fn new(field: &FieldDescriptor) -> Self {
        let name = if field.is_multiple() {
            format!("{}[]", field.key)
        } else {
            field.key.clone()
        };
        Self {
            key: escape_attr(&field.key),
            name: escape_attr(&name),
            label: escape_text(&field.label),
            value: escape_attr(field.raw_value().unwrap_or_default()),
            multiple: field.is_multiple(),
            options: field
                .options()
                .iter()
                .map(|o| OptionView {
                    label: escape_text(&o.label),
                    value: escape_attr(&o.value),
                    selected: field.is_selected(&o.value),
                })
                .collect(),
            before_field: String::new(),
            after_field: String::new(),
            is_last: false,
        }
    }
}

/// A field renderer backed by Liquid templates, parsed once at construction.
pub struct TemplateFieldRenderer {
    engine: Arc<TemplateEngine>,
    template: Template,
    faux_template: Option<Template>,
    wrap: bool,
}

impl TemplateFieldRenderer {
    pub fn new(engine: Arc<TemplateEngine>, template: &str) -> Result<Self> {
        let template = engine.parse(template)?;
        Ok(Self {
            engine,
            template,
            faux_template: None,
            wrap: true,
        })
    }

    /// Also render an alternate control for the filter panel.
    pub fn with_faux(mut self, template: &str) -> Result<Self> {
        self.faux_template = Some(self.engine.parse(template)?);
        Ok(self)
    }

    /// Render without the configured before/after wrapper.
    pub fn unwrapped(mut self) -> Self {
        self.wrap = false;
        self
    }

    /// Dropdown with a faux dropdown for the filter panel.
    pub fn select(engine: Arc<TemplateEngine>, config: &FormConfig) -> Result<Self> {
        let t = &config.templates;
        Self::new(engine, t.select.as_deref().unwrap_or(SELECT_TEMPLATE))?
            .with_faux(t.faux_select.as_deref().unwrap_or(FAUX_SELECT_TEMPLATE))
    }

    pub fn hidden(engine: Arc<TemplateEngine>, config: &FormConfig) -> Result<Self> {
        let template = config.templates.hidden.as_deref().unwrap_or(HIDDEN_TEMPLATE);
        Ok(Self::new(engine, template)?.unwrapped())
    }

    pub fn text(engine: Arc<TemplateEngine>, config: &FormConfig) -> Result<Self> {
        Self::new(engine, config.templates.text.as_deref().unwrap_or(TEXT_TEMPLATE))
    }

    pub fn checkbox(engine: Arc<TemplateEngine>, config: &FormConfig) -> Result<Self> {
        let t = &config.templates;
        Self::new(engine, t.checkbox.as_deref().unwrap_or(CHECKBOX_TEMPLATE))?
            .with_faux(t.faux_select.as_deref().unwrap_or(FAUX_SELECT_TEMPLATE))
    }
}

impl FieldRenderer for TemplateFieldRenderer {
    fn render(&self, field: &FieldDescriptor, options: &RenderOptions) -> Result<Option<String>> {
        let mut view = FieldView::new(field);
        if self.wrap {
            view.before_field = options.before_field.clone();
            view.after_field = options.after_field.clone();
        }
        Ok(Some(self.engine.render_serialize(&self.template, &view)?))
    }

    fn render_faux(&self, field: &FieldDescriptor, is_last: bool) -> Result<Option<String>> {
        let Some(template) = &self.faux_template else {
            return Ok(None);
        };
        let mut view = FieldView::new(field);
        view.is_last = is_last;
        Ok(Some(self.engine.render_serialize(template, &view)?))
    }
}

/// Field renderers keyed by field key.
#[derive(Clone, Default)]
pub struct FieldRenderers {
    renderers: HashMap<String, Arc<dyn FieldRenderer>>,
}

impl FieldRenderers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Renderers for the built-in fields, plus taxonomy checkboxes when enabled.
    ///
    /// Every configured template override is parsed here, whether or not its
    /// renderer ends up registered.
    pub fn defaults(engine: Arc<TemplateEngine>, config: &FormConfig) -> Result<Self> {
        let select = Arc::new(TemplateFieldRenderer::select(Arc::clone(&engine), config)?);
        let hidden = TemplateFieldRenderer::hidden(Arc::clone(&engine), config)?;
        let checkbox = Arc::new(TemplateFieldRenderer::checkbox(Arc::clone(&engine), config)?);
        if let Some(text) = config.templates.text.as_deref() {
            engine.parse(text)?;
        }

        let mut renderers = Self::new();
        renderers.register_arc(ORDERBY, select.clone());
        renderers.register_arc(POST_TYPE, select.clone());
        renderers.register_arc(DATE_START, select);
        renderers.register(DATE_END, hidden);

        if config.taxonomy_fields_enabled() {
            for taxonomy in &config.taxonomies {
                renderers.register_arc(taxonomy.as_str(), checkbox.clone());
            }
        }
        Ok(renderers)
    }

    /// Register (or replace) the renderer for `key`.
    pub fn register<R: FieldRenderer + 'static>(&mut self, key: impl Into<String>, renderer: R) -> &mut Self {
        self.register_arc(key, Arc::new(renderer))
    }

    pub fn register_arc(&mut self, key: impl Into<String>, renderer: Arc<dyn FieldRenderer>) -> &mut Self {
        self.renderers.insert(key.into(), renderer);
        self
    }

    pub fn remove(&mut self, key: &str) -> Option<Arc<dyn FieldRenderer>> {
        self.renderers.remove(key)
    }

    pub fn get(&self, key: &str) -> Option<&dyn FieldRenderer> {
        self.renderers.get(key).map(|r| r.as_ref())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.renderers.contains_key(key)
    }
}

impl std::fmt::Debug for FieldRenderers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut keys: Vec<_> = self.renderers.keys().collect();
        keys.sort();
        f.debug_struct("FieldRenderers").field("keys", &keys).finish()
    }
}
