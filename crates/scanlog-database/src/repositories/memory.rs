//! In-memory document repository.
//!
//! Documents are kept as JSON values in insertion order and matched with
//! the same equality/`$in` semantics as the MongoDB repository. Used by
//! the `memory` provider and by tests.

use std::cmp::Ordering;
use std::marker::PhantomData;

use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tokio::sync::RwLock;

use scanlog_core::error::AppError;
use scanlog_core::result::AppResult;
use scanlog_core::traits::Repository;
use scanlog_core::types::filter::{Filter, FilterValue};
use scanlog_core::types::pagination::PageRequest;
use scanlog_core::types::sorting::{SortDirection, SortSpec};

/// Field holding a document's identifier.
const ID_FIELD: &str = "_id";

/// Repository storing documents of type `T` in process memory.
#[derive(Debug)]
pub struct MemoryRepository<T> {
    documents: RwLock<Vec<Value>>,
    _entity: PhantomData<fn() -> T>,
}

impl<T> MemoryRepository<T> {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self {
            documents: RwLock::new(Vec::new()),
            _entity: PhantomData,
        }
    }

    /// Number of stored documents.
    pub async fn len(&self) -> usize {
        self.documents.read().await.len()
    }

    /// Whether nothing is stored.
    pub async fn is_empty(&self) -> bool {
        self.documents.read().await.is_empty()
    }
}

impl<T> Default for MemoryRepository<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<T> Repository<T> for MemoryRepository<T>
where
    T: Serialize + DeserializeOwned + Send + Sync + 'static,
{
    async fn count(&self, filter: &Filter) -> AppResult<u64> {
        let documents = self.documents.read().await;
        Ok(documents.iter().filter(|d| matches(d, filter)).count() as u64)
    }

    async fn find_page(
        &self,
        filter: &Filter,
        sort: &SortSpec,
        page: &PageRequest,
    ) -> AppResult<Vec<T>> {
        let documents = self.documents.read().await;
        let mut selected: Vec<&Value> = documents.iter().filter(|d| matches(d, filter)).collect();
        if !sort.is_empty() {
            // Stable, so ties keep insertion order.
            selected.sort_by(|a, b| compare(a, b, sort));
        }

        let offset = usize::try_from(page.offset()).unwrap_or(usize::MAX);
        let limit = usize::try_from(page.limit()).unwrap_or(usize::MAX);
        selected
            .into_iter()
            .skip(offset)
            .take(limit)
            .map(|d| serde_json::from_value(d.clone()).map_err(AppError::from))
            .collect()
    }

    async fn insert(&self, entity: &T) -> AppResult<T> {
        let document = serde_json::to_value(entity)?;
        let mut documents = self.documents.write().await;
        if let Some(id) = document.get(ID_FIELD) {
            if documents.iter().any(|d| d.get(ID_FIELD) == Some(id)) {
                return Err(AppError::conflict(format!("Document {id} already exists")));
            }
        }
        documents.push(document.clone());
        Ok(serde_json::from_value(document)?)
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<T>> {
        let documents = self.documents.read().await;
        documents
            .iter()
            .find(|d| d.get(ID_FIELD).and_then(Value::as_str) == Some(id))
            .map(|d| serde_json::from_value(d.clone()).map_err(AppError::from))
            .transpose()
    }

    async fn health_check(&self) -> AppResult<()> {
        Ok(())
    }
}

fn matches(document: &Value, filter: &Filter) -> bool {
    filter.iter().all(|(field, expected)| {
        let actual = document.get(field).unwrap_or(&Value::Null);
        match expected {
            FilterValue::StringList(list) => actual
                .as_str()
                .is_some_and(|s| list.iter().any(|candidate| candidate == s)),
            FilterValue::Integer(_) | FilterValue::Float(_) => {
                actual.as_f64().is_some() && actual.as_f64() == expected.to_json().as_f64()
            }
            scalar => *actual == scalar.to_json(),
        }
    })
}

fn compare(a: &Value, b: &Value, sort: &SortSpec) -> Ordering {
    for field in sort.iter() {
        let left = a.get(&field.field).unwrap_or(&Value::Null);
        let right = b.get(&field.field).unwrap_or(&Value::Null);
        let ordering = compare_values(left, right);
        let ordering = match field.direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        };
        if ordering != Ordering::Equal {
            return ordering;
        }
    }
    Ordering::Equal
}

/// Cross-type order: null < numbers < strings < everything else.
fn compare_values(a: &Value, b: &Value) -> Ordering {
    fn rank(value: &Value) -> u8 {
        match value {
            Value::Null => 0,
            Value::Number(_) => 1,
            Value::String(_) => 2,
            Value::Bool(_) => 4,
            Value::Array(_) | Value::Object(_) => 3,
        }
    }

    match (a, b) {
        (Value::Number(x), Value::Number(y)) => x
            .as_f64()
            .partial_cmp(&y.as_f64())
            .unwrap_or(Ordering::Equal),
        (Value::String(x), Value::String(y)) => x.cmp(y),
        (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
        _ => rank(a).cmp(&rank(b)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scanlog_core::error::ErrorKind;
    use serde::Deserialize;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Doc {
        #[serde(rename = "_id")]
        id: String,
        name: String,
        status: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        rank: Option<i64>,
    }

    fn doc(id: &str, name: &str, status: &str, rank: Option<i64>) -> Doc {
        Doc {
            id: id.to_string(),
            name: name.to_string(),
            status: status.to_string(),
            rank,
        }
    }

    async fn seeded() -> MemoryRepository<Doc> {
        let repo = MemoryRepository::new();
        for d in [
            doc("1", "beta", "Queued", Some(3)),
            doc("2", "alpha", "Success", None),
            doc("3", "gamma", "Queued", Some(1)),
            doc("4", "alpha", "Failure", Some(2)),
        ] {
            repo.insert(&d).await.unwrap();
        }
        repo
    }

    fn ids(docs: &[Doc]) -> Vec<&str> {
        docs.iter().map(|d| d.id.as_str()).collect()
    }

    #[tokio::test]
    async fn test_equality_and_membership_filters() {
        let repo = seeded().await;
        let queued = Filter::new().with("status", "Queued");
        assert_eq!(repo.count(&queued).await.unwrap(), 2);

        let either = Filter::new().with(
            "status",
            vec!["Success".to_string(), "Failure".to_string()],
        );
        assert_eq!(repo.count(&either).await.unwrap(), 2);

        let ranked = Filter::new().with("rank", 2i64);
        let page = repo
            .find_page(&ranked, &SortSpec::new(), &PageRequest::new(1, 10))
            .await
            .unwrap();
        assert_eq!(ids(&page), vec!["4"]);
    }

    #[tokio::test]
    async fn test_no_sort_keeps_insertion_order() {
        let repo = seeded().await;
        let page = repo
            .find_page(&Filter::new(), &SortSpec::new(), &PageRequest::new(1, 10))
            .await
            .unwrap();
        assert_eq!(ids(&page), vec!["1", "2", "3", "4"]);
    }

    #[tokio::test]
    async fn test_multi_field_sort() {
        let repo = seeded().await;
        let sort = SortSpec::new()
            .with("name", SortDirection::Asc)
            .with("rank", SortDirection::Desc);
        let page = repo
            .find_page(&Filter::new(), &sort, &PageRequest::new(1, 10))
            .await
            .unwrap();
        // Missing `rank` sorts lowest, so it comes last when descending.
        assert_eq!(ids(&page), vec!["4", "2", "1", "3"]);
    }

    #[tokio::test]
    async fn test_skip_and_limit() {
        let repo = seeded().await;
        let page = repo
            .find_page(&Filter::new(), &SortSpec::new(), &PageRequest::new(2, 3))
            .await
            .unwrap();
        assert_eq!(ids(&page), vec!["4"]);

        let beyond = repo
            .find_page(&Filter::new(), &SortSpec::new(), &PageRequest::new(9, 3))
            .await
            .unwrap();
        assert!(beyond.is_empty());
    }

    #[tokio::test]
    async fn test_find_by_id() {
        let repo = seeded().await;
        assert_eq!(repo.find_by_id("3").await.unwrap().unwrap().name, "gamma");
        assert!(repo.find_by_id("99").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_id_conflicts() {
        let repo = seeded().await;
        let err = repo
            .insert(&doc("1", "again", "Queued", None))
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Conflict);
        assert_eq!(repo.len().await, 4);
    }
}
