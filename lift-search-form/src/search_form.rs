//! SearchForm, the main API surface of the crate.
//!
//! Owns the configuration, collaborators, hooks and renderers, and an
//! injected [`FormCache`]. Every operation takes the query context
//! explicitly.

use std::sync::Arc;

use lift_search_fields::FieldDescriptor;
use lift_search_templating::TemplateEngine;
use tracing::{debug, warn};

use crate::cache::FormCache;
use crate::clock::{Clock, SystemClock};
use crate::config::FormConfig;
use crate::context::{ContentTypeRegistry, QueryContext, TaxonomySource};
use crate::defaults::DefaultSources;
use crate::error::Result;
use crate::hooks::Hooks;
use crate::instance::{FormDraft, FormInstance};
use crate::render::{self, FieldRenderer, FieldRenderers, RenderOptions};
use crate::results::{LiquidLoopRenderer, LoopRenderer};

/// Builder for [`SearchForm`]. Created by [`SearchForm::builder`].
pub struct SearchFormBuilder {
    content_types: Arc<dyn ContentTypeRegistry>,
    config: FormConfig,
    taxonomies: Option<Arc<dyn TaxonomySource>>,
    clock: Arc<dyn Clock>,
    hooks: Hooks,
    renderer_overrides: Vec<(String, Option<Arc<dyn FieldRenderer>>)>,
    loop_renderer: Option<Arc<dyn LoopRenderer>>,
    loop_template: Option<String>,
    cache: Option<Arc<FormCache>>,
}

impl SearchFormBuilder {
    pub fn with_config(mut self, config: FormConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_taxonomies(mut self, taxonomies: impl TaxonomySource + 'static) -> Self {
        self.taxonomies = Some(Arc::new(taxonomies));
        self
    }

    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    /// Share a cache with the caller. Without one, the form gets its own.
    ///
    /// A cache should serve a single `SearchForm` setup: instances are keyed
    /// by context only.
    pub fn with_cache(mut self, cache: Arc<FormCache>) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Register (or replace) the renderer for a field key.
    pub fn with_field_renderer(
        mut self,
        key: impl Into<String>,
        renderer: impl FieldRenderer + 'static,
    ) -> Self {
        self.renderer_overrides
            .push((key.into(), Some(Arc::new(renderer))));
        self
    }

    /// Unregister the renderer for a field key; that field renders nothing.
    pub fn without_field_renderer(mut self, key: impl Into<String>) -> Self {
        self.renderer_overrides.push((key.into(), None));
        self
    }

    pub fn with_loop_renderer(mut self, renderer: impl LoopRenderer + 'static) -> Self {
        self.loop_renderer = Some(Arc::new(renderer));
        self
    }

    /// Render the results loop with a Liquid template (see [`LiquidLoopRenderer`]).
    pub fn with_loop_template(mut self, template: impl Into<String>) -> Self {
        self.loop_template = Some(template.into());
        self
    }

    pub fn on_registry_build<F>(mut self, hook: F) -> Self
    where
        F: Fn(Vec<FieldDescriptor>, &FormDraft<'_>) -> Vec<FieldDescriptor> + Send + Sync + 'static,
    {
        self.hooks.on_registry_build(hook);
        self
    }

    pub fn on_panel_fields<F>(mut self, hook: F) -> Self
    where
        F: Fn(Vec<FieldDescriptor>) -> Vec<FieldDescriptor> + Send + Sync + 'static,
    {
        self.hooks.on_panel_fields(hook);
        self
    }

    pub fn on_form_markup<F>(mut self, hook: F) -> Self
    where
        F: Fn(&str, &FormInstance, &RenderOptions) -> String + Send + Sync + 'static,
    {
        self.hooks.on_form_markup(hook);
        self
    }

    /// Validate configuration, prepare templates and renderers.
    pub fn build(self) -> Result<SearchForm> {
        self.config.validate()?;
        let engine = Arc::new(TemplateEngine::new()?);

        let mut renderers = FieldRenderers::defaults(Arc::clone(&engine), &self.config)?;
        for (key, renderer) in self.renderer_overrides {
            match renderer {
                Some(renderer) => {
                    renderers.register_arc(key, renderer);
                }
                None => {
                    renderers.remove(&key);
                }
            }
        }

        let loop_renderer = match (self.loop_renderer, self.loop_template) {
            (Some(renderer), _) => Some(renderer),
            (None, Some(template)) => Some(Arc::new(LiquidLoopRenderer::new(
                Arc::clone(&engine),
                template,
            )?) as Arc<dyn LoopRenderer>),
            (None, None) => None,
        };

        debug!(?renderers, hooks = ?self.hooks, "search form ready");

        Ok(SearchForm {
            config: self.config,
            content_types: self.content_types,
            taxonomies: self.taxonomies,
            clock: self.clock,
            hooks: self.hooks,
            renderers,
            loop_renderer,
            cache: self.cache.unwrap_or_default(),
        })
    }
}

/// The search form service.
pub struct SearchForm {
    config: FormConfig,
    content_types: Arc<dyn ContentTypeRegistry>,
    taxonomies: Option<Arc<dyn TaxonomySource>>,
    clock: Arc<dyn Clock>,
    hooks: Hooks,
    renderers: FieldRenderers,
    loop_renderer: Option<Arc<dyn LoopRenderer>>,
    cache: Arc<FormCache>,
}

impl SearchForm {
    /// Start building a search form over the given content types.
    ///
    /// ```rust,ignore
    /// let search_form = SearchForm::builder(content_types)
    ///     .with_config(FormConfig::load(None)?)
    ///     .on_registry_build(|fields, _| fields)
    ///     .build()?;
    /// let html = search_form.render_form(&context);
    /// ```
    pub fn builder(content_types: impl ContentTypeRegistry + 'static) -> SearchFormBuilder {
        SearchFormBuilder {
            content_types: Arc::new(content_types),
            config: FormConfig::default(),
            taxonomies: None,
            clock: Arc::new(SystemClock),
            hooks: Hooks::new(),
            renderer_overrides: Vec::new(),
            loop_renderer: None,
            loop_template: None,
            cache: None,
        }
    }

    /// The form instance for `context`, built on first request.
    pub fn instance(&self, context: &Arc<dyn QueryContext>) -> Arc<FormInstance> {
        self.cache.get_or_build(context, || {
            let sources = DefaultSources {
                content_types: self.content_types.as_ref(),
                taxonomies: self.taxonomies.as_deref(),
                clock: self.clock.as_ref(),
                config: &self.config,
            };
            FormInstance::build(Arc::clone(context), &sources, &self.hooks)
        })
    }

    /// Primary form markup.
    pub fn render_form(&self, context: &Arc<dyn QueryContext>) -> String {
        let form = self.instance(context);
        render::render_form(&form, &self.renderers, &self.hooks, &self.config)
    }

    /// Filter panel markup; empty unless `context` is a search results view.
    pub fn render_filter_panel(&self, context: &Arc<dyn QueryContext>) -> String {
        let form = self.instance(context);
        render::render_filter_panel(&form, &self.renderers, &self.hooks, &self.config)
    }

    /// Results loop markup from the installed loop renderer.
    pub fn render_results_loop(&self, context: &Arc<dyn QueryContext>) -> String {
        let Some(loop_renderer) = &self.loop_renderer else {
            debug!("no results loop renderer installed");
            return String::new();
        };
        let form = self.instance(context);
        loop_renderer.render(&form).unwrap_or_else(|e| {
            warn!(%e, "results loop renderer failed");
            String::new()
        })
    }

    pub fn config(&self) -> &FormConfig {
        &self.config
    }

    pub fn cache(&self) -> &Arc<FormCache> {
        &self.cache
    }

    pub fn renderers(&self) -> &FieldRenderers {
        &self.renderers
    }
}
