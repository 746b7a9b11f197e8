//! Interfaces to the collaborators the form is derived from.
//!
//! The active search request is only reachable through [`QueryContext`];
//! nothing in this crate reads ambient request state. Content types and
//! taxonomies come from their own registries.

use std::collections::HashMap;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Facet key under which the search engine reports post type counts.
pub const POST_TYPE_FACET: &str = "post_type";

/// A filter value as supplied by the query context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum QueryValue {
    Scalar(String),
    List(Vec<String>),
}

impl QueryValue {
    /// Normalize to a collection; scalars become a single element.
    pub fn into_list(self) -> Vec<String> {
        match self {
            QueryValue::Scalar(value) => vec![value],
            QueryValue::List(values) => values,
        }
    }

    /// The scalar value, or the first element of a list.
    pub fn first(&self) -> Option<&str> {
        match self {
            QueryValue::Scalar(value) => Some(value),
            QueryValue::List(values) => values.first().map(String::as_str),
        }
    }
}

impl From<&str> for QueryValue {
    fn from(value: &str) -> Self {
        QueryValue::Scalar(value.to_string())
    }
}

impl From<Vec<String>> for QueryValue {
    fn from(values: Vec<String>) -> Self {
        QueryValue::List(values)
    }
}

/// The active search request's parameters and view state.
pub trait QueryContext: Send + Sync {
    /// Current value of a named filter key, if present.
    fn query_var(&self, key: &str) -> Option<QueryValue>;

    /// The free-text search term.
    fn search_term(&self) -> Option<String>;

    /// Whether the current view is a search results view.
    fn is_search(&self) -> bool;

    /// Number of documents matching `value` within `facet`, if the search
    /// engine reported one.
    fn facet_count(&self, facet: &str, value: &str) -> Option<u64>;
}

/// In-memory query context, deserializable from fixture files.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct StaticQueryContext {
    pub search_term: Option<String>,
    pub is_search: bool,
    pub vars: HashMap<String, QueryValue>,
    /// facet key → facet value → count
    pub facets: HashMap<String, HashMap<String, u64>>,
}

impl StaticQueryContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// A search results view for `term`.
    pub fn search(term: impl Into<String>) -> Self {
        Self {
            search_term: Some(term.into()),
            is_search: true,
            ..Self::default()
        }
    }

    pub fn with_var(mut self, key: impl Into<String>, value: impl Into<QueryValue>) -> Self {
        self.vars.insert(key.into(), value.into());
        self
    }

    pub fn with_facet(mut self, facet: impl Into<String>, value: impl Into<String>, count: u64) -> Self {
        self.facets
            .entry(facet.into())
            .or_default()
            .insert(value.into(), count);
        self
    }
}

impl QueryContext for StaticQueryContext {
    fn query_var(&self, key: &str) -> Option<QueryValue> {
        self.vars.get(key).cloned()
    }

    fn search_term(&self) -> Option<String> {
        self.search_term.clone()
    }

    fn is_search(&self) -> bool {
        self.is_search
    }

    fn facet_count(&self, facet: &str, value: &str) -> Option<u64> {
        self.facets.get(facet).and_then(|f| f.get(value)).copied()
    }
}

/// Registry of indexed content types and their display labels.
pub trait ContentTypeRegistry: Send + Sync {
    /// Indexed type identifiers, in enumeration order.
    fn indexed_types(&self) -> Vec<String>;

    /// Display label for a type identifier.
    fn label(&self, type_id: &str) -> Option<String>;
}

/// Content types held in memory, in insertion order.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct StaticContentTypes {
    types: IndexMap<String, String>,
}

impl StaticContentTypes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an indexed type with its display label.
    pub fn with_type(mut self, type_id: impl Into<String>, label: impl Into<String>) -> Self {
        self.types.insert(type_id.into(), label.into());
        self
    }
}

impl ContentTypeRegistry for StaticContentTypes {
    fn indexed_types(&self) -> Vec<String> {
        self.types.keys().cloned().collect()
    }

    fn label(&self, type_id: &str) -> Option<String> {
        self.types.get(type_id).cloned()
    }
}

/// A term within a taxonomy.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Term {
    pub id: String,
    pub name: String,
}

impl Term {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// Source of taxonomy labels and terms.
pub trait TaxonomySource: Send + Sync {
    fn label(&self, taxonomy: &str) -> Option<String>;

    fn terms(&self, taxonomy: &str) -> Vec<Term>;
}

/// Taxonomy fixture data: name → label and terms.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct StaticTaxonomies {
    taxonomies: IndexMap<String, StaticTaxonomy>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
struct StaticTaxonomy {
    label: String,
    #[serde(default)]
    terms: Vec<Term>,
}

impl StaticTaxonomies {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_taxonomy(
        mut self,
        name: impl Into<String>,
        label: impl Into<String>,
        terms: Vec<Term>,
    ) -> Self {
        self.taxonomies.insert(
            name.into(),
            StaticTaxonomy {
                label: label.into(),
                terms,
            },
        );
        self
    }
}

impl TaxonomySource for StaticTaxonomies {
    fn label(&self, taxonomy: &str) -> Option<String> {
        self.taxonomies.get(taxonomy).map(|t| t.label.clone())
    }

    fn terms(&self, taxonomy: &str) -> Vec<Term> {
        self.taxonomies
            .get(taxonomy)
            .map(|t| t.terms.clone())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_value_into_list() {
        assert_eq!(QueryValue::from("post").into_list(), vec!["post"]);
        assert_eq!(
            QueryValue::from(vec!["post".to_string(), "page".to_string()]).into_list(),
            vec!["post", "page"]
        );
    }

    #[test]
    fn test_query_value_deserializes_scalar_or_list() {
        let scalar: QueryValue = serde_json::from_str(r#""date""#).unwrap();
        assert_eq!(scalar, QueryValue::Scalar("date".into()));
        let list: QueryValue = serde_json::from_str(r#"["post","page"]"#).unwrap();
        assert_eq!(list.first(), Some("post"));
    }

    #[test]
    fn test_static_context_facets() {
        let ctx = StaticQueryContext::search("rust").with_facet(POST_TYPE_FACET, "post", 12);
        assert_eq!(ctx.facet_count(POST_TYPE_FACET, "post"), Some(12));
        assert_eq!(ctx.facet_count(POST_TYPE_FACET, "page"), None);
        assert_eq!(ctx.facet_count("category", "post"), None);
        assert!(ctx.is_search());
    }

    #[test]
    fn test_static_content_types_keep_insertion_order() {
        let types = StaticContentTypes::new()
            .with_type("page", "Pages")
            .with_type("post", "Posts");
        assert_eq!(types.indexed_types(), vec!["page", "post"]);
        assert_eq!(types.label("post").as_deref(), Some("Posts"));
        assert_eq!(types.label("attachment"), None);
    }

    #[test]
    fn test_static_taxonomies() {
        let taxonomies = StaticTaxonomies::new().with_taxonomy(
            "category",
            "Categories",
            vec![Term::new("3", "News")],
        );
        assert_eq!(taxonomies.label("category").as_deref(), Some("Categories"));
        assert_eq!(taxonomies.terms("category").len(), 1);
        assert!(taxonomies.terms("post_tag").is_empty());
    }
}
