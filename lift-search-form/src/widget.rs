//! Sidebar widget embedding the search form.
//!
//! The host's widget area supplies the surrounding markup; the widget adds
//! an optional title and the form itself. Storing settings is up to the host.

use std::sync::{Arc, OnceLock};

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::context::QueryContext;
use crate::render::escape_text;
use crate::search_form::SearchForm;

/// Per-placement widget settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct WidgetSettings {
    pub title: String,
}

impl WidgetSettings {
    /// Merge submitted settings over the previous ones, stripping markup from
    /// the title.
    pub fn update(new: WidgetSettings, mut old: WidgetSettings) -> WidgetSettings {
        old.title = strip_tags(&new.title);
        old
    }
}

/// Markup the widget area wraps around each widget.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct WidgetArgs {
    pub before_widget: String,
    pub after_widget: String,
    pub before_title: String,
    pub after_title: String,
}

#[derive(Debug, Clone, Default)]
pub struct SearchFormWidget {
    settings: WidgetSettings,
}

impl SearchFormWidget {
    pub fn new(settings: WidgetSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &WidgetSettings {
        &self.settings
    }

    /// Render the widget: wrapper, optional title, then the search form.
    pub fn render(
        &self,
        search_form: &SearchForm,
        context: &Arc<dyn QueryContext>,
        args: &WidgetArgs,
    ) -> String {
        let mut html = args.before_widget.clone();
        let title = self.settings.title.trim();
        if !title.is_empty() {
            html.push_str(&args.before_title);
            html.push_str(&escape_text(title));
            html.push_str(&args.after_title);
        }
        html.push_str(&search_form.render_form(context));
        html.push_str(&args.after_widget);
        html
    }
}

fn tag_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?s)<[^>]*>").expect("valid tag regex"))
}

/// Remove anything that looks like a markup tag.
pub fn strip_tags(value: &str) -> String {
    tag_re().replace_all(value, "").trim().to_string()
}
