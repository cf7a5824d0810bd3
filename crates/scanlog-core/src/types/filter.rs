//! Filter types for dynamic query building.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A dynamic value carried by a request parameter or a filter constraint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterValue {
    /// A string value.
    String(String),
    /// An integer value.
    Integer(i64),
    /// A floating-point value.
    Float(f64),
    /// A boolean value.
    Boolean(bool),
    /// A list of string values (membership constraint).
    StringList(Vec<String>),
    /// Null / no value.
    Null,
}

impl FilterValue {
    /// Whether the value counts as absent.
    ///
    /// Null, the empty string and the empty list are absent. Numbers and
    /// booleans are always present, including `0` and `false`.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Null => true,
            Self::String(s) => s.is_empty(),
            Self::StringList(list) => list.is_empty(),
            Self::Integer(_) | Self::Float(_) | Self::Boolean(_) => false,
        }
    }

    /// Read the value as an ordered list of string tokens.
    ///
    /// A single string is split on `,`; blank tokens are dropped.
    pub fn as_tokens(&self) -> Vec<String> {
        match self {
            Self::String(s) => s
                .split(',')
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .map(str::to_string)
                .collect(),
            Self::StringList(list) => list.clone(),
            _ => Vec::new(),
        }
    }

    /// Convert into a JSON value.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Self::String(s) => serde_json::Value::String(s.clone()),
            Self::Integer(i) => serde_json::Value::from(*i),
            Self::Float(f) => serde_json::Value::from(*f),
            Self::Boolean(b) => serde_json::Value::Bool(*b),
            Self::StringList(list) => serde_json::Value::from(list.clone()),
            Self::Null => serde_json::Value::Null,
        }
    }
}

impl From<&str> for FilterValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for FilterValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<i64> for FilterValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<bool> for FilterValue {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

impl From<Vec<String>> for FilterValue {
    fn from(value: Vec<String>) -> Self {
        Self::StringList(value)
    }
}

impl<T: Into<FilterValue>> From<Option<T>> for FilterValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(Self::Null)
    }
}

/// Exact-match field constraints applied to a query.
///
/// A scalar value is an equality constraint; a [`FilterValue::StringList`]
/// is a membership constraint. Built fresh per request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Filter {
    fields: BTreeMap<String, FilterValue>,
}

impl Filter {
    /// Create an empty filter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the constraint for a field, replacing any previous one.
    pub fn insert(&mut self, field: impl Into<String>, value: FilterValue) {
        self.fields.insert(field.into(), value);
    }

    /// Builder-style variant of [`Filter::insert`].
    pub fn with(mut self, field: impl Into<String>, value: impl Into<FilterValue>) -> Self {
        self.insert(field, value.into());
        self
    }

    /// Constraint for a field, if any.
    pub fn get(&self, field: &str) -> Option<&FilterValue> {
        self.fields.get(field)
    }

    /// Whether the filter constrains nothing.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Number of constrained fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Iterate over `(field, value)` pairs in field-name order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &FilterValue)> {
        self.fields.iter()
    }

    /// Constrained field names in field-name order.
    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.fields.keys()
    }
}
