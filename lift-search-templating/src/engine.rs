//! Template engine for rendering form control markup
//!
//! Wraps a Liquid parser configured with the standard library of tags and
//! filters. Templates are parsed once with `parse` and rendered many times;
//! field renderers pass their views through `render_serialize`, so templates
//! see the same structure the views serialize to.

use serde::Serialize;
use tracing::trace;

use crate::error::{Result, TemplatingError};

/// Template engine with Liquid configuration
pub struct TemplateEngine {
    parser: liquid::Parser,
}

impl TemplateEngine {
    /// Create a new template engine with the Liquid standard library
    pub fn new() -> Result<Self> {
        let parser = liquid::ParserBuilder::with_stdlib()
            .build()
            .map_err(|e| TemplatingError::Parse(e.to_string()))?;
        Ok(Self { parser })
    }

    /// Parse a template string, surfacing syntax errors early
    pub fn parse(&self, template_str: &str) -> Result<liquid::Template> {
        self.parser
            .parse(template_str)
            .map_err(|e| TemplatingError::Parse(e.to_string()))
    }

    /// Render a parsed template with a Liquid object as globals
    pub fn render(&self, template: &liquid::Template, globals: &liquid::Object) -> Result<String> {
        let output = template
            .render(globals)
            .map_err(|e| TemplatingError::Render(e.to_string()))?;
        trace!(bytes = output.len(), "rendered template");
        Ok(output)
    }

    /// Render a parsed template with any serializable value as globals
    ///
    /// The value must serialize to a map; its top-level keys become
    /// template variables.
    pub fn render_serialize<T: Serialize>(
        &self,
        template: &liquid::Template,
        value: &T,
    ) -> Result<String> {
        let globals =
            liquid::to_object(value).map_err(|e| TemplatingError::Variables(e.to_string()))?;
        self.render(template, &globals)
    }
}

impl std::fmt::Debug for TemplateEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TemplateEngine").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn render(engine: &TemplateEngine, source: &str, globals: &liquid::Object) -> Result<String> {
        engine.render(&engine.parse(source)?, globals)
    }

    #[test]
    fn test_engine_render() {
        let engine = TemplateEngine::new().unwrap();
        let globals = liquid::object!({ "greeting": "Hello" });

        let result = render(&engine, "{{greeting}} World!", &globals).unwrap();
        assert_eq!(result, "Hello World!");
    }

    #[test]
    fn test_engine_render_empty() {
        let engine = TemplateEngine::new().unwrap();
        let result = render(&engine, "", &liquid::Object::new()).unwrap();
        assert_eq!(result, "");
    }

    #[test]
    fn test_parsed_template_renders_repeatedly() {
        let engine = TemplateEngine::new().unwrap();
        let template = engine.parse("[{{ n }}]").unwrap();

        for n in 0..3 {
            let result = engine.render(&template, &liquid::object!({ "n": n })).unwrap();
            assert_eq!(result, format!("[{n}]"));
        }
    }

    #[test]
    fn test_engine_escape_filter() {
        let engine = TemplateEngine::new().unwrap();
        let globals = liquid::object!({ "label": "<b>Posts & Pages</b>" });

        let result = render(&engine, "{{ label | escape }}", &globals).unwrap();
        assert_eq!(result, "&lt;b&gt;Posts &amp; Pages&lt;/b&gt;");
    }

    #[test]
    fn test_engine_render_serialize() {
        let engine = TemplateEngine::new().unwrap();
        let template = engine
            .parse("{{ key }}:{% for o in options %}{{ o.label }}{% unless forloop.last %},{% endunless %}{% endfor %}")
            .unwrap();
        let value = json!({
            "key": "orderby",
            "options": [{"label": "Date"}, {"label": "Relevancy"}]
        });

        let result = engine.render_serialize(&template, &value).unwrap();
        assert_eq!(result, "orderby:Date,Relevancy");
    }

    #[test]
    fn test_engine_render_serialize_rejects_non_map() {
        let engine = TemplateEngine::new().unwrap();
        let template = engine.parse("{{ x }}").unwrap();
        let result = engine.render_serialize(&template, &json!([1, 2, 3]));
        assert!(matches!(result, Err(TemplatingError::Variables(_))));
    }

    #[test]
    fn test_engine_parse_invalid_template() {
        let engine = TemplateEngine::new().unwrap();
        let result = engine.parse("Hello {{ unclosed");
        assert!(matches!(result, Err(TemplatingError::Parse(_))));
    }
}
