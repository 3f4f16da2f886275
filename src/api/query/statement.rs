//! Immutable filter statements
//!
//! A `Statement` is a query string such as `WHERE status = :status LIMIT 500`
//! plus the values bound to its named placeholders. It is inert data: nothing
//! is checked until a service call serializes it.

use super::value::Value;
use crate::api::error::ValidationError;
use crate::api::soap::xml::XmlWriter;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::{BTreeMap, BTreeSet};

static QUOTED_LITERAL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"'(?:[^']|'')*'").expect("valid literal pattern"));

static PLACEHOLDER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r":([A-Za-z_][A-Za-z0-9_]*)").expect("valid placeholder pattern"));

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Statement {
    query: String,
    values: BTreeMap<String, Value>,
}

impl Statement {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            values: BTreeMap::new(),
        }
    }

    /// New statement with `query` replacing the current one and `values`
    /// added to (or overriding) the current bindings
    pub fn with_filter<I, K, V>(&self, query: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        let mut bound = self.values.clone();
        bound.extend(values.into_iter().map(|(k, v)| (k.into(), v.into())));
        Self {
            query: query.into(),
            values: bound,
        }
    }

    /// New statement with one more binding
    pub fn with_value(&self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        let mut next = self.clone();
        next.values.insert(name.into(), value.into());
        next
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn values(&self) -> &BTreeMap<String, Value> {
        &self.values
    }

    /// Placeholder names referenced outside quoted literals
    pub fn placeholders(&self) -> BTreeSet<String> {
        let unquoted = QUOTED_LITERAL.replace_all(&self.query, "''");
        PLACEHOLDER
            .captures_iter(&unquoted)
            .map(|c| c[1].to_string())
            .collect()
    }

    /// Every placeholder must be bound and every binding referenced
    pub fn validate(&self) -> Result<(), ValidationError> {
        let placeholders = self.placeholders();

        if let Some(missing) = placeholders.iter().find(|p| !self.values.contains_key(*p)) {
            return Err(ValidationError::MissingValue(missing.clone()));
        }

        if let Some(unused) = self.values.keys().find(|k| !placeholders.contains(*k)) {
            return Err(ValidationError::UnusedValue(unused.clone()));
        }

        Ok(())
    }

    /// Write as `<name><query/><values/>...</name>`
    pub fn write_xml(&self, name: &str, w: &mut XmlWriter) {
        w.open(name);
        w.text_element("query", &self.query);
        for (key, value) in &self.values {
            w.open("values");
            w.text_element("key", key);
            value.write_xml("value", w);
            w.close("values");
        }
        w.close(name);
    }
}
