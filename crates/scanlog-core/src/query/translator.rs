//! Translation of validated request parameters into filters and sort specs.

use crate::config::QueryConfig;
use crate::types::filter::Filter;
use crate::types::params::{ParamLocation, ParameterSet};
use crate::types::sorting::{SortField, SortSpec};

/// Builds [`Filter`] and [`SortSpec`] values from a [`ParameterSet`].
///
/// Pure and stateless apart from its configuration; safe to share
/// across requests.
#[derive(Debug, Clone)]
pub struct QueryTranslator {
    /// Names that never become filter constraints.
    reserved: Vec<String>,
    /// Name of the default sort parameter.
    sort_param: String,
}

impl QueryTranslator {
    /// Create a translator from the list-query configuration.
    pub fn new(config: &QueryConfig) -> Self {
        Self {
            reserved: config.reserved_names(),
            sort_param: config.sort_param.clone(),
        }
    }

    /// Whether `name` is excluded from filters.
    pub fn is_reserved(&self, name: &str) -> bool {
        self.reserved.iter().any(|r| r == name)
    }

    /// Build the equality/membership filter for a request.
    ///
    /// Only query-string parameters with a non-empty value and a
    /// non-reserved name contribute; everything else is skipped silently.
    pub fn build_filter(&self, params: &ParameterSet) -> Filter {
        let mut filter = Filter::new();
        for param in params.iter() {
            if param.location == ParamLocation::Query
                && !param.value.is_empty()
                && !self.is_reserved(&param.name)
            {
                filter.insert(param.name.clone(), param.value.clone());
            }
        }
        filter
    }

    /// Build the sort spec from the default sort parameter.
    pub fn build_sort(&self, params: &ParameterSet) -> SortSpec {
        self.build_sort_with(params, &self.sort_param)
    }

    /// Build the sort spec from the default sort parameter and `sort_param_name`.
    ///
    /// Both names are matched in a single pass over the parameters in
    /// declaration order, so when both target the same field the parameter
    /// declared last decides its direction.
    pub fn build_sort_with(&self, params: &ParameterSet, sort_param_name: &str) -> SortSpec {
        let mut sort = SortSpec::new();
        for param in params.iter() {
            if param.value.is_empty()
                || (param.name != self.sort_param && param.name != sort_param_name)
            {
                continue;
            }
            for token in param.value.as_tokens() {
                let field = SortField::parse_token(&token);
                sort.set(field.field, field.direction);
            }
        }
        sort
    }
}

impl Default for QueryTranslator {
    fn default() -> Self {
        Self::new(&QueryConfig::default())
    }
}
