//! Query state adapter: reads current selections from a query context.
//!
//! Falsy values (`""`, `"0"`, lists with no non-empty entries) count as
//! "not set", so every caller sees one notion of an absent filter. Callers
//! with no query at hand pass an empty `StaticQueryContext`.

use chrono::DateTime;
use tracing::debug;

use crate::context::{QueryContext, QueryValue};

#[derive(Clone, Copy)]
pub struct QueryState<'a> {
    context: &'a dyn QueryContext,
}

impl<'a> QueryState<'a> {
    pub fn new(context: &'a dyn QueryContext) -> Self {
        Self { context }
    }

    /// Current value for `key`, or `None` when absent or falsy.
    pub fn get(&self, key: &str) -> Option<QueryValue> {
        let value = self.context.query_var(key)?;
        match value {
            QueryValue::Scalar(ref s) if is_falsy(s) => None,
            QueryValue::List(values) => {
                let values: Vec<String> = values.into_iter().filter(|v| !v.is_empty()).collect();
                if values.is_empty() {
                    None
                } else {
                    Some(QueryValue::List(values))
                }
            }
            value => Some(value),
        }
    }

    /// Current value(s) for `key` normalized to a collection.
    pub fn get_list(&self, key: &str) -> Vec<String> {
        self.get(key).map(QueryValue::into_list).unwrap_or_default()
    }

    /// Current scalar value for `key`; lists yield their first element.
    pub fn get_scalar(&self, key: &str) -> Option<String> {
        self.get(key).and_then(|v| v.first().map(str::to_string))
    }

    /// Current value for `key` as a unix timestamp.
    ///
    /// Non-numeric values and values outside the representable date range
    /// are treated as unset.
    pub fn get_timestamp(&self, key: &str) -> Option<i64> {
        let raw = self.get_scalar(key)?;
        match raw.trim().parse::<i64>() {
            Ok(0) => None,
            Ok(ts) if DateTime::from_timestamp(ts, 0).is_none() => {
                debug!(key, value = ts, "ignoring out-of-range timestamp");
                None
            }
            Ok(ts) => Some(ts),
            Err(_) => {
                debug!(key, value = %raw, "ignoring non-numeric timestamp");
                None
            }
        }
    }

    /// Search term of the context, when on a search results view.
    pub fn search_term(&self) -> String {
        if self.context.is_search() {
            self.context.search_term().unwrap_or_default()
        } else {
            String::new()
        }
    }

    pub fn is_search(&self) -> bool {
        self.context.is_search()
    }

    pub fn facet_count(&self, facet: &str, value: &str) -> Option<u64> {
        self.context.facet_count(facet, value)
    }
}

fn is_falsy(value: &str) -> bool {
    value.is_empty() || value == "0"
}
