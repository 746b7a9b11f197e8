//! The ordered, frozen field set of one form instance.
//!
//! Fields are collected into a plain `Vec<FieldDescriptor>` while defaults
//! and extensions are applied, then frozen. Freezing validates every entry;
//! malformed ones are dropped with a warning so that one bad extension
//! cannot break rendering of the rest of the form.

use std::collections::HashMap;

use serde::Serialize;
use tracing::{debug, warn};

use crate::error::{FieldsError, Result};
use crate::types::FieldDescriptor;

/// Ordered, key-unique collection of field descriptors.
///
/// Order is render order. The registry is read-only once built.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct FieldRegistry {
    fields: Vec<FieldDescriptor>,
    #[serde(skip)]
    key_index: HashMap<String, usize>,
}

impl FieldRegistry {
    /// Freeze a field collection, dropping entries that fail validation.
    ///
    /// Entries are checked in order, so on duplicate keys the first one wins.
    pub fn freeze(fields: Vec<FieldDescriptor>) -> Self {
        let mut registry = Self::default();
        for field in fields {
            if let Err(e) = registry.push(field) {
                warn!(%e, "dropping malformed field descriptor");
            }
        }
        debug!(fields = registry.len(), "field registry frozen");
        registry
    }

    fn push(&mut self, field: FieldDescriptor) -> Result<()> {
        field.validate()?;
        if self.key_index.contains_key(&field.key) {
            return Err(FieldsError::DuplicateKey { key: field.key });
        }
        self.key_index.insert(field.key.clone(), self.fields.len());
        self.fields.push(field);
        Ok(())
    }

    /// Get a field by key.
    pub fn get(&self, key: &str) -> Option<&FieldDescriptor> {
        self.key_index.get(key).map(|&i| &self.fields[i])
    }

    pub fn contains(&self, key: &str) -> bool {
        self.key_index.contains_key(key)
    }

    /// Iterate fields in render order.
    pub fn iter(&self) -> std::slice::Iter<'_, FieldDescriptor> {
        self.fields.iter()
    }

    /// Keys in render order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.key.as_str())
    }

    pub fn as_slice(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    /// Owned copy of the fields, for handing to extension hooks.
    pub fn to_vec(&self) -> Vec<FieldDescriptor> {
        self.fields.clone()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<'a> IntoIterator for &'a FieldRegistry {
    type Item = &'a FieldDescriptor;
    type IntoIter = std::slice::Iter<'a, FieldDescriptor>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{SelectOption, Selection};

    fn sort_field() -> FieldDescriptor {
        FieldDescriptor::select(
            "orderby",
            "Relevancy",
            vec![
                SelectOption::new("Date", "date"),
                SelectOption::new("Relevancy", "relevancy"),
            ],
            Selection::Single("relevancy".into()),
        )
    }

    #[test]
    fn freeze_keeps_order() {
        let registry = FieldRegistry::freeze(vec![
            sort_field(),
            FieldDescriptor::hidden("date_end", "100"),
            FieldDescriptor::text("q", "Query", ""),
        ]);
        let keys: Vec<_> = registry.keys().collect();
        assert_eq!(keys, vec!["orderby", "date_end", "q"]);
    }

    #[test]
    fn freeze_drops_duplicate_keys_keeping_first() {
        let registry = FieldRegistry::freeze(vec![
            sort_field(),
            FieldDescriptor::hidden("orderby", "date"),
        ]);
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get("orderby").unwrap(), &sort_field());
    }

    #[test]
    fn freeze_drops_malformed_entries_but_keeps_siblings() {
        let registry = FieldRegistry::freeze(vec![
            FieldDescriptor::hidden("", "x"),
            FieldDescriptor::select("broken", "Broken", vec![], Selection::None),
            sort_field(),
        ]);
        assert_eq!(registry.keys().collect::<Vec<_>>(), vec!["orderby"]);
    }

    #[test]
    fn freeze_drops_select_with_unknown_selection() {
        let registry = FieldRegistry::freeze(vec![
            sort_field(),
            FieldDescriptor::select(
                "color",
                "Color",
                vec![SelectOption::new("Red", "red")],
                Selection::Single("green".into()),
            ),
            FieldDescriptor::hidden("date_end", "100"),
        ]);
        assert!(!registry.contains("color"));
        assert_eq!(
            registry.keys().collect::<Vec<_>>(),
            vec!["orderby", "date_end"]
        );
    }

    #[test]
    fn get_missing_key() {
        let registry = FieldRegistry::freeze(vec![sort_field()]);
        assert!(registry.get("date_start").is_none());
        assert!(!registry.contains("date_start"));
    }
}
