//! Sorting types for list endpoints.

use serde::{Deserialize, Serialize};

/// Sort direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    /// Ascending order.
    #[default]
    Asc,
    /// Descending order.
    Desc,
}

impl SortDirection {
    /// Return the numeric form used by document stores (`1` / `-1`).
    pub fn as_i32(&self) -> i32 {
        match self {
            Self::Asc => 1,
            Self::Desc => -1,
        }
    }
}

/// A sort specification consisting of a field name and direction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortField {
    /// Field name to sort by.
    pub field: String,
    /// Sort direction.
    #[serde(default)]
    pub direction: SortDirection,
}

impl SortField {
    /// Create a new sort field.
    pub fn new(field: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            field: field.into(),
            direction,
        }
    }

    /// Create an ascending sort on the given field.
    pub fn asc(field: impl Into<String>) -> Self {
        Self::new(field, SortDirection::Asc)
    }

    /// Create a descending sort on the given field.
    pub fn desc(field: impl Into<String>) -> Self {
        Self::new(field, SortDirection::Desc)
    }

    /// Parse a sort token: a leading `-` means descending.
    ///
    /// A bare `-` yields a descending sort on the empty field name.
    pub fn parse_token(token: &str) -> Self {
        match token.strip_prefix('-') {
            Some(rest) => Self::desc(rest),
            None => Self::asc(token),
        }
    }
}

/// Ordered field → direction mapping.
///
/// Fields keep the position of their first insertion; setting a field a
/// second time only replaces its direction. An empty spec imposes no order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SortSpec {
    fields: Vec<SortField>,
}

impl SortSpec {
    /// Create an empty sort spec.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the direction for a field (last write wins).
    pub fn set(&mut self, field: impl Into<String>, direction: SortDirection) {
        let field = field.into();
        match self.fields.iter_mut().find(|f| f.field == field) {
            Some(existing) => existing.direction = direction,
            None => self.fields.push(SortField::new(field, direction)),
        }
    }

    /// Builder-style variant of [`SortSpec::set`].
    pub fn with(mut self, field: impl Into<String>, direction: SortDirection) -> Self {
        self.set(field, direction);
        self
    }

    /// Direction for a field, if it is sorted on.
    pub fn direction(&self, field: &str) -> Option<SortDirection> {
        self.fields
            .iter()
            .find(|f| f.field == field)
            .map(|f| f.direction)
    }

    /// Iterate over the fields in order.
    pub fn iter(&self) -> impl Iterator<Item = &SortField> {
        self.fields.iter()
    }

    /// Whether no order is imposed.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Number of sorted fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_token() {
        assert_eq!(SortField::parse_token("QueuedAt"), SortField::asc("QueuedAt"));
        assert_eq!(SortField::parse_token("-QueuedAt"), SortField::desc("QueuedAt"));
        assert_eq!(SortField::parse_token("-"), SortField::desc(""));
    }

    #[test]
    fn test_set_keeps_first_position() {
        let spec = SortSpec::new()
            .with("a", SortDirection::Asc)
            .with("b", SortDirection::Asc)
            .with("a", SortDirection::Desc);
        let order: Vec<_> = spec.iter().map(|f| f.field.as_str()).collect();
        assert_eq!(order, vec!["a", "b"]);
        assert_eq!(spec.direction("a"), Some(SortDirection::Desc));
    }

    #[test]
    fn test_numeric_direction() {
        assert_eq!(SortDirection::Asc.as_i32(), 1);
        assert_eq!(SortDirection::Desc.as_i32(), -1);
    }
}
