//! Typed extension points.
//!
//! Each extension point is an ordered list of callbacks. Callbacks run in
//! registration order and each one receives the previous one's output.

use std::sync::Arc;

use lift_search_fields::FieldDescriptor;
use tracing::trace;

use crate::instance::{FormDraft, FormInstance};
use crate::render::RenderOptions;

/// Runs after the default fields are built, before the registry is frozen.
pub type RegistryBuildHook =
    Arc<dyn Fn(Vec<FieldDescriptor>, &FormDraft<'_>) -> Vec<FieldDescriptor> + Send + Sync>;

/// Substitutes the field collection shown in the filter panel.
pub type PanelFieldsHook = Arc<dyn Fn(Vec<FieldDescriptor>) -> Vec<FieldDescriptor> + Send + Sync>;

/// Observes the assembled form markup.
pub type FormMarkupHook = Arc<dyn Fn(&str, &FormInstance, &RenderOptions) -> String + Send + Sync>;

#[derive(Clone, Default)]
pub struct Hooks {
    registry_build: Vec<RegistryBuildHook>,
    panel_fields: Vec<PanelFieldsHook>,
    form_markup: Vec<FormMarkupHook>,
}

impl Hooks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_registry_build<F>(&mut self, hook: F) -> &mut Self
    where
        F: Fn(Vec<FieldDescriptor>, &FormDraft<'_>) -> Vec<FieldDescriptor> + Send + Sync + 'static,
    {
        self.registry_build.push(Arc::new(hook));
        self
    }

    pub fn on_panel_fields<F>(&mut self, hook: F) -> &mut Self
    where
        F: Fn(Vec<FieldDescriptor>) -> Vec<FieldDescriptor> + Send + Sync + 'static,
    {
        self.panel_fields.push(Arc::new(hook));
        self
    }

    pub fn on_form_markup<F>(&mut self, hook: F) -> &mut Self
    where
        F: Fn(&str, &FormInstance, &RenderOptions) -> String + Send + Sync + 'static,
    {
        self.form_markup.push(Arc::new(hook));
        self
    }

    pub fn apply_registry_build(
        &self,
        fields: Vec<FieldDescriptor>,
        draft: &FormDraft<'_>,
    ) -> Vec<FieldDescriptor> {
        self.registry_build
            .iter()
            .fold(fields, |fields, hook| hook(fields, draft))
    }

    pub fn apply_panel_fields(&self, fields: Vec<FieldDescriptor>) -> Vec<FieldDescriptor> {
        self.panel_fields.iter().fold(fields, |fields, hook| hook(fields))
    }

    /// Run the markup hooks over `html` and return the last hook's output.
    ///
    /// The form renderer only observes this value; see `render::form`.
    pub fn apply_form_markup(
        &self,
        html: &str,
        form: &FormInstance,
        options: &RenderOptions,
    ) -> String {
        let mut current = html.to_string();
        for hook in &self.form_markup {
            current = hook(&current, form, options);
        }
        trace!(
            hooks = self.form_markup.len(),
            changed = current != html,
            "form markup hooks observed"
        );
        current
    }

    pub fn is_empty(&self) -> bool {
        self.registry_build.is_empty() && self.panel_fields.is_empty() && self.form_markup.is_empty()
    }
}

impl std::fmt::Debug for Hooks {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Hooks")
            .field("registry_build", &self.registry_build.len())
            .field("panel_fields", &self.panel_fields.len())
            .field("form_markup", &self.form_markup.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hidden(key: &str) -> FieldDescriptor {
        FieldDescriptor::hidden(key, "1")
    }

    #[test]
    fn test_panel_hooks_run_in_registration_order() {
        let mut hooks = Hooks::new();
        hooks
            .on_panel_fields(|mut fields| {
                fields.push(hidden("a"));
                fields
            })
            .on_panel_fields(|mut fields| {
                fields.push(hidden("b"));
                fields
            });

        let fields = hooks.apply_panel_fields(vec![hidden("x")]);
        let keys: Vec<_> = fields.iter().map(|f| f.key.as_str()).collect();
        assert_eq!(keys, vec!["x", "a", "b"]);
    }

    #[test]
    fn test_no_hooks_is_identity() {
        let hooks = Hooks::new();
        assert!(hooks.is_empty());
        assert_eq!(hooks.apply_panel_fields(vec![hidden("x")]), vec![hidden("x")]);
    }
}
