//! Conversion of filters and sort specs into BSON query documents.

use mongodb::bson::{Bson, Document, doc};

use scanlog_core::types::filter::{Filter, FilterValue};
use scanlog_core::types::sorting::SortSpec;

/// Build the query document for a filter.
///
/// Scalars become equality matches; string lists become `$in` matches.
pub fn filter_document(filter: &Filter) -> Document {
    let mut document = Document::new();
    for (field, value) in filter.iter() {
        let condition = match value {
            FilterValue::StringList(list) => Bson::Document(doc! { "$in": list.clone() }),
            scalar => scalar_value(scalar),
        };
        document.insert(field.clone(), condition);
    }
    document
}

/// Build the ordered sort document for a sort spec.
pub fn sort_document(sort: &SortSpec) -> Document {
    let mut document = Document::new();
    for field in sort.iter() {
        document.insert(field.field.clone(), field.direction.as_i32());
    }
    document
}

fn scalar_value(value: &FilterValue) -> Bson {
    match value {
        FilterValue::String(s) => Bson::String(s.clone()),
        FilterValue::Integer(i) => Bson::Int64(*i),
        FilterValue::Float(f) => Bson::Double(*f),
        FilterValue::Boolean(b) => Bson::Boolean(*b),
        FilterValue::StringList(list) => {
            Bson::Array(list.iter().cloned().map(Bson::String).collect())
        }
        FilterValue::Null => Bson::Null,
    }
}
