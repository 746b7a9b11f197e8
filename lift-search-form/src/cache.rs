//! Form instance cache: one form instance per query context identity.
//!
//! The cache is owned by the caller and injected into `SearchForm`, so its
//! lifetime (per request, per process) is the caller's decision. Entries are
//! never evicted; they live as long as the cache.

use std::sync::Arc;

use dashmap::DashMap;
use tracing::{debug, trace};

use crate::context::QueryContext;
use crate::instance::{ContextId, FormInstance};

#[derive(Debug, Default)]
pub struct FormCache {
    instances: DashMap<ContextId, Arc<FormInstance>>,
}

impl FormCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the instance for `context`, building it with `build` on first access.
    ///
    /// The build runs outside the map lock, so hooks inside it may use the
    /// cache. If two threads race on the first access to one context, both
    /// build and the first insert wins; every caller gets that instance.
    pub fn get_or_build<F>(&self, context: &Arc<dyn QueryContext>, build: F) -> Arc<FormInstance>
    where
        F: FnOnce() -> FormInstance,
    {
        let id = ContextId::of(context);
        if let Some(existing) = self.instances.get(&id) {
            trace!(context = ?id, "form cache hit");
            return Arc::clone(existing.value());
        }

        debug!(context = ?id, "form cache miss");
        let built = Arc::new(build());
        Arc::clone(self.instances.entry(id).or_insert(built).value())
    }

    /// The cached instance for `context`, if one was built.
    pub fn get(&self, context: &Arc<dyn QueryContext>) -> Option<Arc<FormInstance>> {
        self.instances
            .get(&ContextId::of(context))
            .map(|entry| Arc::clone(entry.value()))
    }

    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    /// Drop every cached instance.
    pub fn clear(&self) {
        self.instances.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::config::FormConfig;
    use crate::context::{StaticContentTypes, StaticQueryContext};
    use crate::defaults::DefaultSources;
    use crate::hooks::Hooks;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn build(context: &Arc<dyn QueryContext>) -> FormInstance {
        let types = StaticContentTypes::new();
        let config = FormConfig::default();
        let sources = DefaultSources {
            content_types: &types,
            taxonomies: None,
            clock: &FixedClock(0),
            config: &config,
        };
        FormInstance::build(Arc::clone(context), &sources, &Hooks::new())
    }

    #[test]
    fn test_same_context_returns_same_instance() {
        let cache = FormCache::new();
        let ctx: Arc<dyn QueryContext> = Arc::new(StaticQueryContext::new());
        let builds = AtomicUsize::new(0);

        let first = cache.get_or_build(&ctx, || {
            builds.fetch_add(1, Ordering::SeqCst);
            build(&ctx)
        });
        let second = cache.get_or_build(&ctx, || {
            builds.fetch_add(1, Ordering::SeqCst);
            build(&ctx)
        });

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(builds.load(Ordering::SeqCst), 1);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_equal_contexts_get_distinct_instances() {
        let cache = FormCache::new();
        let a: Arc<dyn QueryContext> = Arc::new(StaticQueryContext::search("x"));
        let b: Arc<dyn QueryContext> = Arc::new(StaticQueryContext::search("x"));

        let form_a = cache.get_or_build(&a, || build(&a));
        let form_b = cache.get_or_build(&b, || build(&b));

        assert!(!Arc::ptr_eq(&form_a, &form_b));
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_get_and_clear() {
        let cache = FormCache::new();
        let ctx: Arc<dyn QueryContext> = Arc::new(StaticQueryContext::new());
        assert!(cache.get(&ctx).is_none());

        cache.get_or_build(&ctx, || build(&ctx));
        assert!(cache.get(&ctx).is_some());

        cache.clear();
        assert!(cache.is_empty());
    }
}
