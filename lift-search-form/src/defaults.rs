//! Built-in field set derived from the query state.
//!
//! Defaults are built in a fixed order: sort, post type, date range, then
//! the taxonomy step. Extensions run after all of these.

use lift_search_fields::{FieldDescriptor, SelectOption, Selection};
use tracing::{debug, trace, warn};

use crate::clock::Clock;
use crate::config::FormConfig;
use crate::context::{ContentTypeRegistry, TaxonomySource, POST_TYPE_FACET};
use crate::state::QueryState;

pub const ORDERBY: &str = "orderby";
pub const POST_TYPE: &str = "lift_post_type";
pub const DATE_START: &str = "date_start";
pub const DATE_END: &str = "date_end";

pub const DAY_IN_SECONDS: i64 = 86_400;

const SORT_OPTIONS: [(&str, &str); 2] = [("Date", "date"), ("Relevancy", "relevancy")];
const DEFAULT_ORDERBY: &str = "relevancy";
const ALL_TYPES: &str = "All Types";
const ALL_DATES: &str = "All Dates";
const CUSTOM_DATE: &str = "Date";

/// Collaborators the default builders read from.
pub struct DefaultSources<'a> {
    pub content_types: &'a dyn ContentTypeRegistry,
    pub taxonomies: Option<&'a dyn TaxonomySource>,
    pub clock: &'a dyn Clock,
    pub config: &'a FormConfig,
}

/// Build every default field, in render order.
pub fn default_fields(state: &QueryState<'_>, sources: &DefaultSources<'_>) -> Vec<FieldDescriptor> {
    let mut fields = vec![sort_field(state), post_type_field(state, sources.content_types)];
    fields.extend(date_fields(state, sources.clock));
    fields.extend(taxonomy_fields(state, sources.config, sources.taxonomies));
    fields
}

/// Sort order dropdown. Unset or unknown sort falls back to relevancy.
pub fn sort_field(state: &QueryState<'_>) -> FieldDescriptor {
    let selected = match state.get_scalar(ORDERBY) {
        Some(value) if SORT_OPTIONS.iter().any(|(_, v)| *v == value) => value,
        Some(value) => {
            debug!(value = %value, "unknown sort order, using relevancy");
            DEFAULT_ORDERBY.to_string()
        }
        None => DEFAULT_ORDERBY.to_string(),
    };

    FieldDescriptor::select(
        ORDERBY,
        title_case(&selected),
        SORT_OPTIONS
            .iter()
            .map(|(label, value)| SelectOption::new(*label, *value))
            .collect(),
        Selection::Single(selected),
    )
}

/// Post type dropdown with one entry per indexed content type.
///
/// Selected types that are not indexed are ignored.
pub fn post_type_field(
    state: &QueryState<'_>,
    content_types: &dyn ContentTypeRegistry,
) -> FieldDescriptor {
    let indexed = content_types.indexed_types();

    let mut options = vec![SelectOption::new(ALL_TYPES, "")];
    for type_id in &indexed {
        let name = content_types
            .label(type_id)
            .unwrap_or_else(|| type_id.clone());
        let label = match state.facet_count(POST_TYPE_FACET, type_id) {
            Some(count) => format!("{name} ({count})"),
            None => name,
        };
        options.push(SelectOption::new(label, type_id.as_str()));
    }

    let (selected, ignored): (Vec<String>, Vec<String>) = state
        .get_list(POST_TYPE)
        .into_iter()
        .partition(|t| indexed.contains(t));
    if !ignored.is_empty() {
        debug!(?ignored, "ignoring post types that are not indexed");
    }

    let mut field = FieldDescriptor::select(POST_TYPE, "", options, Selection::Many(selected));
    let joined = field.selected_labels().join(" / ");
    field.label = if joined.is_empty() {
        ALL_TYPES.to_string()
    } else {
        joined
    };
    field
}

/// Hidden `date_end` followed by the `date_start` bucket dropdown.
///
/// `date_end` is the current time unless the context overrides it. A start
/// that matches no bucket gets its own "Date" option so the selection
/// survives a resubmit.
pub fn date_fields(state: &QueryState<'_>, clock: &dyn Clock) -> [FieldDescriptor; 2] {
    let date_end = state
        .get_timestamp(DATE_END)
        .unwrap_or_else(|| clock.now());
    let date_start = state.get_timestamp(DATE_START).unwrap_or(0);

    let buckets = [
        ("24 Hours", date_end.saturating_sub(DAY_IN_SECONDS)),
        ("7 Days", date_end.saturating_sub(DAY_IN_SECONDS * 7)),
        ("30 Days", date_end.saturating_sub(DAY_IN_SECONDS * 30)),
    ];

    let mut options = vec![SelectOption::new(ALL_DATES, "")];
    options.extend(
        buckets
            .iter()
            .map(|(label, ts)| SelectOption::new(*label, ts.to_string())),
    );

    let (label, selected) = if date_start == 0 {
        (ALL_DATES.to_string(), String::new())
    } else {
        let label = match buckets.iter().find(|(_, ts)| *ts == date_start) {
            Some((label, _)) => label.to_string(),
            None => {
                options.push(SelectOption::new(CUSTOM_DATE, date_start.to_string()));
                CUSTOM_DATE.to_string()
            }
        };
        (label, date_start.to_string())
    };

    [
        FieldDescriptor::hidden(DATE_END, date_end.to_string()),
        FieldDescriptor::select(DATE_START, label, options, Selection::Single(selected)),
    ]
}

/// Checkbox-style field per configured taxonomy.
///
/// Adds nothing unless the configuration opts into taxonomy checkboxes.
pub fn taxonomy_fields(
    state: &QueryState<'_>,
    config: &FormConfig,
    source: Option<&dyn TaxonomySource>,
) -> Vec<FieldDescriptor> {
    if !config.taxonomy_fields_enabled() {
        trace!("taxonomy fields disabled");
        return Vec::new();
    }
    let Some(source) = source else {
        warn!("taxonomy fields enabled without a taxonomy source");
        return Vec::new();
    };

    let mut fields = Vec::new();
    for taxonomy in &config.taxonomies {
        let terms = source.terms(taxonomy);
        if terms.is_empty() {
            trace!(taxonomy = %taxonomy, "taxonomy has no terms, skipping");
            continue;
        }
        let selected: Vec<String> = state
            .get_list(taxonomy)
            .into_iter()
            .filter(|id| terms.iter().any(|term| &term.id == id))
            .collect();
        let options = terms
            .into_iter()
            .map(|term| {
                let label = match state.facet_count(taxonomy, &term.id) {
                    Some(count) => format!("{} ({count})", term.name),
                    None => term.name,
                };
                SelectOption::new(label, term.id)
            })
            .collect();
        let label = source
            .label(taxonomy)
            .unwrap_or_else(|| title_case(taxonomy));
        fields.push(FieldDescriptor::multi_select(
            taxonomy.as_str(),
            label,
            options,
            selected,
        ));
    }
    fields
}

/// Upper-case the first letter of every whitespace-separated word.
pub fn title_case(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut at_word_start = true;
    for c in value.chars() {
        if at_word_start {
            out.extend(c.to_uppercase());
        } else {
            out.push(c);
        }
        at_word_start = c.is_whitespace();
    }
    out
}
