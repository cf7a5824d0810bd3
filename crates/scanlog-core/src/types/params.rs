//! Validated request parameters handed to the query translator.

use serde::{Deserialize, Serialize};

use super::filter::FilterValue;

/// Where a request parameter was read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamLocation {
    /// URL query string.
    Query,
    /// URL path segment.
    Path,
    /// Request body.
    Body,
}

/// One declared, already-validated request parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestParam {
    /// Declared parameter name.
    pub name: String,
    /// Coerced value.
    pub value: FilterValue,
    /// Where the parameter came from.
    pub location: ParamLocation,
}

impl RequestParam {
    /// Create a new request parameter.
    pub fn new(name: impl Into<String>, value: FilterValue, location: ParamLocation) -> Self {
        Self {
            name: name.into(),
            value,
            location,
        }
    }
}

/// Request parameters in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParameterSet {
    params: Vec<RequestParam>,
}

impl ParameterSet {
    /// Create an empty parameter set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a parameter.
    pub fn push(&mut self, param: RequestParam) {
        self.params.push(param);
    }

    /// Append a query-string parameter (builder style).
    pub fn query(mut self, name: impl Into<String>, value: impl Into<FilterValue>) -> Self {
        self.push(RequestParam::new(name, value.into(), ParamLocation::Query));
        self
    }

    /// Append a path parameter (builder style).
    pub fn path(mut self, name: impl Into<String>, value: impl Into<FilterValue>) -> Self {
        self.push(RequestParam::new(name, value.into(), ParamLocation::Path));
        self
    }

    /// Append a body parameter (builder style).
    pub fn body(mut self, name: impl Into<String>, value: impl Into<FilterValue>) -> Self {
        self.push(RequestParam::new(name, value.into(), ParamLocation::Body));
        self
    }

    /// First parameter with the given name.
    pub fn get(&self, name: &str) -> Option<&RequestParam> {
        self.params.iter().find(|p| p.name == name)
    }

    /// Iterate in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &RequestParam> {
        self.params.iter()
    }

    /// Number of parameters.
    pub fn len(&self) -> usize {
        self.params.len()
    }

    /// Whether the set holds no parameters.
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }
}

impl FromIterator<RequestParam> for ParameterSet {
    fn from_iter<I: IntoIterator<Item = RequestParam>>(iter: I) -> Self {
        Self {
            params: iter.into_iter().collect(),
        }
    }
}
