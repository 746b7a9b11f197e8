//! Integration tests for the sidebar widget

mod common;

use common::*;
use lift_search_form::{SearchFormWidget, StaticQueryContext, WidgetArgs, WidgetSettings};

fn args() -> WidgetArgs {
    WidgetArgs {
        before_widget: "<aside class='widget'>".to_string(),
        after_widget: "</aside>".to_string(),
        before_title: "<h3>".to_string(),
        after_title: "</h3>".to_string(),
    }
}

#[test]
fn test_widget_wraps_form_with_title() {
    let settings = WidgetSettings::update(
        WidgetSettings {
            title: "<b>Find</b> things".to_string(),
        },
        WidgetSettings::default(),
    );
    let widget = SearchFormWidget::new(settings);
    let html = widget.render(&search_form(), &context(StaticQueryContext::new()), &args());

    assert!(html.starts_with("<aside class='widget'><h3>Find things</h3><form"));
    assert!(html.ends_with("</form></aside>"));
    let doc = parse(&html);
    select_one(&doc, "aside form#searchform");
}

#[test]
fn test_widget_without_title() {
    let widget = SearchFormWidget::default();
    let html = widget.render(&search_form(), &context(StaticQueryContext::new()), &args());
    assert!(html.starts_with("<aside class='widget'><form"));
    assert!(!html.contains("<h3>"));
}
