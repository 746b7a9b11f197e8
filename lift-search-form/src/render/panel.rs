//! The JS-enhanced filter panel.
//!
//! A hidden control set mirroring the form's fields. Client script is
//! responsible for revealing it and wiring it to the primary form.

use lift_search_fields::FieldRegistry;
use tracing::{debug, warn};

use crate::config::FormConfig;
use crate::hooks::Hooks;
use crate::instance::FormInstance;
use crate::render::{escape_text, FieldRenderers};

/// Render the filter panel, or nothing when not on a search results view.
pub fn render_filter_panel(
    form: &FormInstance,
    renderers: &FieldRenderers,
    hooks: &Hooks,
    config: &FormConfig,
) -> String {
    if !form.is_search() {
        return String::new();
    }
    if !config.js_filters {
        debug!("js filter panel disabled");
        return String::new();
    }

    let fields = FieldRegistry::freeze(hooks.apply_panel_fields(form.fields().to_vec()));
    let count = fields.len();

    let mut html =
        String::from("<div class='lift-js-filters lift-hidden' style='display: none'><ul id='lift-filters'>");
    html.push_str(&format!(
        "<li class='first'>{}</li>",
        escape_text(&config.filter_label)
    ));

    for (index, field) in fields.iter().enumerate() {
        let Some(renderer) = renderers.get(&field.key) else {
            continue;
        };
        match renderer.render_faux(field, index + 1 == count) {
            Ok(Some(fragment)) => html.push_str(&fragment),
            Ok(None) => {}
            Err(e) => warn!(key = %field.key, %e, "faux field renderer failed"),
        }
    }

    html.push_str("</ul></div>");
    html
}
