//! Search form core for Lift
//!
//! Builds the field registry for a search form from the current query
//! context, lets extensions reshape it, and renders it two ways: as the
//! primary form and as the script-enhanced filter panel.
//!
//! # Architecture
//!
//! - **Query state**: `QueryState` reads request parameters through the host's `QueryContext`
//! - **Defaults**: `defaults` builds the sort, content type and date range fields
//! - **Instances**: `FormInstance` holds one frozen `FieldRegistry` per query context
//! - **Cache**: `FormCache` is injected by the caller and keyed by context identity
//! - **Rendering**: `render` walks the registry and delegates to per-field `FieldRenderer`s
//! - **Service**: `SearchForm` ties it together behind `render_form`,
//!   `render_filter_panel` and `render_results_loop`

pub mod cache;
pub mod clock;
pub mod config;
pub mod context;
pub mod defaults;
pub mod error;
pub mod hooks;
pub mod instance;
pub mod render;
pub mod results;
pub mod search_form;
pub mod state;
pub mod widget;

pub use cache::FormCache;
pub use clock::{Clock, FixedClock, SystemClock};
pub use config::{FormConfig, TaxonomyStrategy, TemplateOverrides};
pub use context::{
    ContentTypeRegistry, QueryContext, QueryValue, StaticContentTypes, StaticQueryContext,
    StaticTaxonomies, TaxonomySource, Term,
};
pub use error::{FormError, Result};
pub use hooks::Hooks;
pub use instance::{ContextId, FormDraft, FormInstance};
pub use render::{FieldRenderer, FieldRenderers, RenderOptions, TemplateFieldRenderer};
pub use results::{LiquidLoopRenderer, LoopRenderer};
pub use search_form::{SearchForm, SearchFormBuilder};
pub use state::QueryState;
pub use widget::{SearchFormWidget, WidgetArgs, WidgetSettings};

pub use lift_search_fields::{Control, FieldDescriptor, FieldKind, FieldRegistry, SelectOption, Selection};
