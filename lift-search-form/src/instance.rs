//! Form instances: one query context bound to one frozen field registry.

use std::sync::Arc;

use lift_search_fields::{FieldDescriptor, FieldRegistry};
use tracing::debug;

use crate::config::FormConfig;
use crate::context::QueryContext;
use crate::defaults::{default_fields, DefaultSources};
use crate::hooks::Hooks;
use crate::state::QueryState;

/// Identity of a query context: the address of its shared allocation.
///
/// Two structurally identical contexts in different allocations have
/// different ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContextId(usize);

impl ContextId {
    pub fn of(context: &Arc<dyn QueryContext>) -> Self {
        ContextId(Arc::as_ptr(context) as *const () as usize)
    }
}

/// A form instance whose field collection is still being assembled.
///
/// Handed to registry-build hooks alongside the in-progress fields.
pub struct FormDraft<'a> {
    context: &'a Arc<dyn QueryContext>,
    context_id: ContextId,
    base_url: &'a str,
    config: &'a FormConfig,
}

impl<'a> FormDraft<'a> {
    pub fn context(&self) -> &'a dyn QueryContext {
        self.context.as_ref()
    }

    pub fn state(&self) -> QueryState<'a> {
        QueryState::new(self.context.as_ref())
    }

    pub fn context_id(&self) -> ContextId {
        self.context_id
    }

    pub fn base_url(&self) -> &'a str {
        self.base_url
    }

    pub fn config(&self) -> &'a FormConfig {
        self.config
    }
}

/// A query context bound to its field registry and submission URL.
///
/// Immutable after construction. Holding the context `Arc` keeps the
/// context's address, and with it the [`ContextId`], stable for as long
/// as the instance lives.
pub struct FormInstance {
    context_id: ContextId,
    context: Arc<dyn QueryContext>,
    base_url: String,
    fields: FieldRegistry,
}

impl FormInstance {
    /// Build the registry for `context`: defaults, then registry-build hooks,
    /// then freeze.
    pub fn build(context: Arc<dyn QueryContext>, sources: &DefaultSources<'_>, hooks: &Hooks) -> Self {
        let context_id = ContextId::of(&context);
        let base_url = sources.config.base_url();

        let fields = {
            let state = QueryState::new(context.as_ref());
            let defaults = default_fields(&state, sources);
            let draft = FormDraft {
                context: &context,
                context_id,
                base_url: &base_url,
                config: sources.config,
            };
            hooks.apply_registry_build(defaults, &draft)
        };
        let fields = FieldRegistry::freeze(fields);

        debug!(
            context = ?context_id,
            fields = fields.len(),
            "built search form instance"
        );

        Self {
            context_id,
            context,
            base_url,
            fields,
        }
    }

    pub fn context_id(&self) -> ContextId {
        self.context_id
    }

    pub fn context(&self) -> &dyn QueryContext {
        self.context.as_ref()
    }

    pub fn state(&self) -> QueryState<'_> {
        QueryState::new(self.context.as_ref())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn fields(&self) -> &FieldRegistry {
        &self.fields
    }

    pub fn field(&self, key: &str) -> Option<&FieldDescriptor> {
        self.fields.get(key)
    }

    /// Current search term when on a search results view, else empty.
    pub fn search_term(&self) -> String {
        self.state().search_term()
    }

    pub fn is_search(&self) -> bool {
        self.context.is_search()
    }
}

impl std::fmt::Debug for FormInstance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FormInstance")
            .field("context_id", &self.context_id)
            .field("base_url", &self.base_url)
            .field("fields", &self.fields.keys().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::context::{StaticContentTypes, StaticQueryContext};
    use crate::defaults::{DATE_END, DATE_START, ORDERBY, POST_TYPE};

    fn build(context: Arc<dyn QueryContext>, hooks: &Hooks) -> FormInstance {
        let types = StaticContentTypes::new().with_type("post", "Posts");
        let config = FormConfig {
            site_url: "https://example.com".into(),
            ..FormConfig::default()
        };
        let sources = DefaultSources {
            content_types: &types,
            taxonomies: None,
            clock: &FixedClock(1_700_000_000),
            config: &config,
        };
        FormInstance::build(context, &sources, hooks)
    }

    #[test]
    fn test_build_defaults() {
        let form = build(Arc::new(StaticQueryContext::search("lift")), &Hooks::new());
        let keys: Vec<_> = form.fields().keys().collect();
        assert_eq!(keys, vec![ORDERBY, POST_TYPE, DATE_END, DATE_START]);
        assert_eq!(form.base_url(), "https://example.com/");
        assert_eq!(form.search_term(), "lift");
    }

    #[test]
    fn test_registry_build_hook_sees_draft() {
        let mut hooks = Hooks::new();
        hooks.on_registry_build(|mut fields, draft| {
            assert_eq!(draft.base_url(), "https://example.com/");
            if draft.state().is_search() {
                fields.retain(|f| f.key != ORDERBY);
            }
            fields
        });
        let form = build(Arc::new(StaticQueryContext::search("lift")), &hooks);
        assert!(form.field(ORDERBY).is_none());
        assert!(form.field(POST_TYPE).is_some());
    }

    #[test]
    fn test_malformed_hook_output_is_dropped() {
        let mut hooks = Hooks::new();
        hooks.on_registry_build(|mut fields, _| {
            fields.push(FieldDescriptor::hidden(DATE_END, "1"));
            fields.push(FieldDescriptor::hidden("", "1"));
            fields.push(FieldDescriptor::text("author", "Author", ""));
            fields
        });
        let form = build(Arc::new(StaticQueryContext::new()), &hooks);
        assert_eq!(form.fields().len(), 5);
        assert_eq!(form.field(DATE_END).unwrap().raw_value(), Some("1700000000"));
        assert!(form.field("author").is_some());
    }

    #[test]
    fn test_context_id_is_identity() {
        let a: Arc<dyn QueryContext> = Arc::new(StaticQueryContext::new());
        let b: Arc<dyn QueryContext> = Arc::new(StaticQueryContext::new());
        assert_eq!(ContextId::of(&a), ContextId::of(&a.clone()));
        assert_ne!(ContextId::of(&a), ContextId::of(&b));
    }
}
