//! The primary search form: native controls, usable without script.

use tracing::{trace, warn};

use crate::config::FormConfig;
use crate::hooks::Hooks;
use crate::instance::FormInstance;
use crate::render::{escape_attr, escape_url, FieldRenderers, RenderOptions};

/// Render the form for `form`'s field registry.
///
/// Form-markup hooks see the assembled markup, but their return value is
/// only observed: the markup returned here is always the assembled markup.
pub fn render_form(
    form: &FormInstance,
    renderers: &FieldRenderers,
    hooks: &Hooks,
    config: &FormConfig,
) -> String {
    let options = RenderOptions::from_config(config);

    let mut html = format!(
        r#"<form role="search" class="lift-search" id="searchform" action="{}"><div>"#,
        escape_url(form.base_url())
    );
    html.push_str(&format!(
        "<input type='text' name='s' id='s' value='{}' />",
        escape_attr(&form.search_term())
    ));
    html.push_str(&format!(
        r#" <input type="submit" id="searchsubmit" value="{}" />"#,
        escape_attr(&config.submit_label)
    ));
    html.push_str(r#"<fieldset class="lift-search-form-filters"><ul>"#);

    for field in form.fields() {
        let Some(renderer) = renderers.get(&field.key) else {
            trace!(key = %field.key, "no renderer registered for field");
            continue;
        };
        match renderer.render(field, &options) {
            Ok(Some(fragment)) => html.push_str(&fragment),
            Ok(None) => {}
            Err(e) => warn!(key = %field.key, %e, "field renderer failed"),
        }
    }

    html.push_str("</ul></fieldset>");
    html.push_str("</div></form>");

    let _observed = hooks.apply_form_markup(&html, form, &options);
    html
}
