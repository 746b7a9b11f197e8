//! Search form configuration using Figment
//!
//! Sources are merged in precedence order, later ones winning:
//! 1. Built-in defaults (`FormConfig::default()`)
//! 2. An optional configuration file (TOML, YAML or JSON by extension)
//! 3. Environment variables prefixed with `LIFT_SEARCH_`
//!    (`LIFT_SEARCH_SITE_URL`, `LIFT_SEARCH_TEMPLATES__SELECT`, ...)

use std::path::Path;

use figment::{
    providers::{Env, Format, Json, Serialized, Toml, Yaml},
    Figment,
};
use lift_search_templating::validate_template_security;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::error::{FormError, Result};

/// Environment variable prefix for configuration overrides
pub const ENV_PREFIX: &str = "LIFT_SEARCH_";

/// Whether the registry build adds per-taxonomy checkbox fields.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TaxonomyStrategy {
    /// The taxonomy step runs but adds nothing.
    #[default]
    Disabled,
    /// One checkbox-style field per configured taxonomy.
    Checkboxes,
}

/// Optional Liquid overrides for the built-in control templates.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct TemplateOverrides {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub select: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub faux_select: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hidden: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub checkbox: Option<String>,
}

impl TemplateOverrides {
    fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        [
            ("select", &self.select),
            ("faux_select", &self.faux_select),
            ("hidden", &self.hidden),
            ("text", &self.text),
            ("checkbox", &self.checkbox),
        ]
        .into_iter()
        .filter_map(|(name, t)| t.as_deref().map(|t| (name, t)))
    }
}

/// Configuration for one search form setup.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct FormConfig {
    /// Site root the form submits to
    pub site_url: String,
    /// Markup emitted before each field
    pub before_field: String,
    /// Markup emitted after each field
    pub after_field: String,
    /// Value of the submit control
    pub submit_label: String,
    /// Leading label item of the filter panel
    pub filter_label: String,
    /// Emit the JS-enhanced filter panel on search views
    pub js_filters: bool,
    pub taxonomy_fields: TaxonomyStrategy,
    /// Taxonomies exposed when `taxonomy_fields` is `checkboxes`
    pub taxonomies: Vec<String>,
    pub templates: TemplateOverrides,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            site_url: "/".to_string(),
            before_field: "<li>".to_string(),
            after_field: "</li>".to_string(),
            submit_label: "Search".to_string(),
            filter_label: "Filter by: ".to_string(),
            js_filters: true,
            taxonomy_fields: TaxonomyStrategy::Disabled,
            taxonomies: Vec::new(),
            templates: TemplateOverrides::default(),
        }
    }
}

impl FormConfig {
    /// Load configuration from defaults, an optional file and the environment.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config: FormConfig = Self::figment(path)?.extract()?;
        config.validate()?;
        debug!(site_url = %config.site_url, "loaded search form configuration");
        Ok(config)
    }

    /// Build the figment with all sources in precedence order.
    pub fn figment(path: Option<&Path>) -> Result<Figment> {
        let mut figment = Figment::new().merge(Serialized::defaults(FormConfig::default()));

        if let Some(path) = path {
            trace!(path = %path.display(), "merging configuration file");
            figment = match path.extension().and_then(|e| e.to_str()) {
                Some("toml") => figment.merge(Toml::file(path)),
                Some("yaml") | Some("yml") => figment.merge(Yaml::file(path)),
                Some("json") => figment.merge(Json::file(path)),
                _ => {
                    return Err(FormError::UnsupportedConfigFormat {
                        path: path.to_path_buf(),
                    })
                }
            };
        }

        Ok(figment.merge(Env::prefixed(ENV_PREFIX).split("__")))
    }

    /// Check values that would otherwise surface as broken markup.
    ///
    /// Template overrides come from outside the crate and are validated
    /// as untrusted.
    pub fn validate(&self) -> Result<()> {
        if self.site_url.trim().is_empty() {
            return Err(FormError::InvalidConfig {
                key: "site_url".into(),
                message: "must not be empty".into(),
            });
        }
        for (name, template) in self.templates.iter() {
            validate_template_security(template, false).map_err(|e| {
                FormError::InvalidConfig {
                    key: format!("templates.{name}"),
                    message: e.to_string(),
                }
            })?;
        }
        Ok(())
    }

    /// The form action: `site_url` with exactly one trailing slash.
    pub fn base_url(&self) -> String {
        format!("{}/", self.site_url.trim().trim_end_matches('/'))
    }

    pub fn taxonomy_fields_enabled(&self) -> bool {
        self.taxonomy_fields == TaxonomyStrategy::Checkboxes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = FormConfig::default();
        assert_eq!(config.before_field, "<li>");
        assert_eq!(config.after_field, "</li>");
        assert!(config.js_filters);
        assert!(!config.taxonomy_fields_enabled());
    }

    #[test]
    fn test_base_url_has_single_trailing_slash() {
        let mut config = FormConfig::default();
        assert_eq!(config.base_url(), "/");

        config.site_url = "https://example.com".into();
        assert_eq!(config.base_url(), "https://example.com/");

        config.site_url = "https://example.com//".into();
        assert_eq!(config.base_url(), "https://example.com/");
    }

    #[test]
    #[serial]
    fn test_load_without_file_uses_defaults() {
        let config = FormConfig::load(None).unwrap();
        assert_eq!(config, FormConfig::default());
    }

    #[test]
    #[serial]
    fn test_load_toml_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("lift.toml");
        fs::write(
            &path,
            r#"
site_url = "https://example.com/blog"
before_field = "<div class='field'>"
after_field = "</div>"
taxonomy_fields = "checkboxes"
taxonomies = ["category"]
"#,
        )
        .unwrap();

        let config = FormConfig::load(Some(&path)).unwrap();
        assert_eq!(config.base_url(), "https://example.com/blog/");
        assert_eq!(config.before_field, "<div class='field'>");
        assert!(config.taxonomy_fields_enabled());
        assert_eq!(config.taxonomies, vec!["category".to_string()]);
        assert_eq!(config.submit_label, "Search");
    }

    #[test]
    #[serial]
    fn test_load_yaml_file_with_template_override() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("lift.yaml");
        fs::write(
            &path,
            "js_filters: false\ntemplates:\n  hidden: \"<input type='hidden' name='{{ key }}' />\"\n",
        )
        .unwrap();

        let config = FormConfig::load(Some(&path)).unwrap();
        assert!(!config.js_filters);
        assert!(config.templates.hidden.is_some());
    }

    #[test]
    #[serial]
    fn test_env_overrides_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("lift.json");
        fs::write(&path, r#"{"site_url": "https://file.example"}"#).unwrap();

        std::env::set_var("LIFT_SEARCH_SITE_URL", "https://env.example");
        let config = FormConfig::load(Some(&path));
        std::env::remove_var("LIFT_SEARCH_SITE_URL");

        assert_eq!(config.unwrap().site_url, "https://env.example");
    }

    #[test]
    fn test_unsupported_extension() {
        let result = FormConfig::figment(Some(Path::new("lift.ini")));
        assert!(matches!(
            result,
            Err(FormError::UnsupportedConfigFormat { .. })
        ));
    }

    #[test]
    fn test_validate_rejects_empty_site_url() {
        let config = FormConfig {
            site_url: "  ".into(),
            ..FormConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(FormError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn test_validate_rejects_oversized_template_override() {
        let config = FormConfig {
            templates: TemplateOverrides {
                select: Some("x".repeat(lift_search_templating::security::MAX_TEMPLATE_SIZE + 1)),
                ..TemplateOverrides::default()
            },
            ..FormConfig::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("templates.select"));
    }
}
