//! Shared fixtures for search form integration tests

#![allow(dead_code)] // Not every test binary uses every fixture

use std::sync::Arc;

use lift_search_form::{
    FixedClock, FormConfig, QueryContext, SearchForm, SearchFormBuilder, StaticContentTypes,
    StaticQueryContext,
};
use scraper::{ElementRef, Html, Selector};

pub const NOW: i64 = 1_700_000_000;
pub const DAY: i64 = 86_400;

pub fn content_types() -> StaticContentTypes {
    StaticContentTypes::new()
        .with_type("post", "Posts")
        .with_type("page", "Pages")
}

pub fn config() -> FormConfig {
    FormConfig {
        site_url: "https://example.com".to_string(),
        ..FormConfig::default()
    }
}

/// Builder with the standard content types, configuration and a fixed clock.
pub fn builder() -> SearchFormBuilder {
    SearchForm::builder(content_types())
        .with_config(config())
        .with_clock(FixedClock(NOW))
}

pub fn search_form() -> SearchForm {
    builder().build().unwrap()
}

pub fn context(ctx: StaticQueryContext) -> Arc<dyn QueryContext> {
    Arc::new(ctx)
}

pub fn parse(html: &str) -> Html {
    Html::parse_document(html)
}

pub fn select_all<'a>(doc: &'a Html, css: &str) -> Vec<ElementRef<'a>> {
    let selector = Selector::parse(css).unwrap();
    doc.select(&selector).collect()
}

pub fn select_one<'a>(doc: &'a Html, css: &str) -> ElementRef<'a> {
    let found = select_all(doc, css);
    assert_eq!(found.len(), 1, "expected exactly one match for {css}");
    found[0]
}

pub fn text(el: ElementRef<'_>) -> String {
    el.text().collect()
}

pub fn attr(el: ElementRef<'_>, name: &str) -> String {
    el.value().attr(name).unwrap_or_default().to_string()
}
