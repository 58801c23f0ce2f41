//! Bulk action encoding and result aggregation.
//!
//! Encoding produces the flat header/body sequence the store's bulk endpoint
//! consumes; aggregation splits the response back into per-document outcomes.
//! Both sides rely on the same positional contract: one response item per
//! submitted document, in submission order.

use serde_json::Value;

use docbind_core::{BulkResponse, DocbindError, Document};

use crate::store::document_body;

/// Store status code for a successful create action.
const STATUS_CREATED: u16 = 201;

/// Outcome of a bulk insert, split per document.
///
/// `successes` holds documents with their assigned ids written back;
/// `failures` pairs each rejected document with the store's error payload so
/// callers can inspect, log, or selectively retry without losing the rest of
/// the batch. Relative input order is preserved within each list.
#[derive(Debug)]
pub struct BulkInsertResult<T> {
    pub successes: Vec<T>,
    pub failures: Vec<(T, Value)>,
}

/// Encode documents as a flat create-action sequence.
///
/// Each document contributes a `{"create": {"_index": ..}}` header, carrying
/// `_id` only when the document already has one, followed by its id-stripped
/// body, preserving input order. The result is twice the input length.
pub(crate) fn create_actions<T: Document>(
    documents: &[T],
    index_name: &str,
) -> Result<Vec<Value>, DocbindError> {
    let mut actions = Vec::with_capacity(documents.len() * 2);
    for document in documents {
        let mut header = serde_json::json!({ "create": { "_index": index_name } });
        if let Some(id) = document.id() {
            header["create"]["_id"] = Value::String(id.to_string());
        }
        actions.push(header);
        actions.push(document_body(document)?);
    }
    Ok(actions)
}

/// Zip documents with their response items by position.
///
/// A `201` item moves its document to `successes` with the store-assigned id
/// written back; any other status moves the `(document, error)` pair to
/// `failures`. A response whose item count differs from the input count
/// breaks the positional contract and fails the whole call.
pub(crate) fn aggregate<T: Document>(
    documents: Vec<T>,
    response: BulkResponse,
) -> Result<BulkInsertResult<T>, DocbindError> {
    if response.items.len() != documents.len() {
        return Err(DocbindError::Store(format!(
            "bulk response returned {} items for {} documents",
            response.items.len(),
            documents.len()
        )));
    }

    let mut result = BulkInsertResult {
        successes: Vec::new(),
        failures: Vec::new(),
    };
    for (mut document, item) in documents.into_iter().zip(response.items) {
        if item.status == STATUS_CREATED {
            if let Some(id) = item.id {
                document.set_id(id);
            }
            result.successes.push(document);
        } else {
            let error = item.error.unwrap_or_else(|| {
                Value::String(format!("bulk action failed with status {}", item.status))
            });
            result.failures.push((document, error));
        }
    }

    tracing::debug!(
        successes = result.successes.len(),
        failures = result.failures.len(),
        "bulk insert aggregated"
    );
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Utc};
    use docbind_core::{BulkItem, FieldDescriptor, FieldKind, Keyword};
    use serde::{Deserialize, Serialize};
    use serde_json::json;

    #[derive(Debug, Clone, Serialize, Deserialize)]
    struct Note {
        #[serde(skip)]
        id: Option<String>,
        created: Option<DateTime<Utc>>,
        text: Keyword,
    }

    impl Note {
        fn new(text: &str) -> Self {
            Self {
                id: None,
                created: None,
                text: text.into(),
            }
        }

        fn with_id(text: &str, id: &str) -> Self {
            Self {
                id: Some(id.to_string()),
                ..Self::new(text)
            }
        }
    }

    impl Document for Note {
        fn name() -> &'static str {
            "Note"
        }

        fn fields() -> Vec<FieldDescriptor> {
            vec![FieldDescriptor::new("text", FieldKind::Keyword)]
        }

        fn id(&self) -> Option<&str> {
            self.id.as_deref()
        }

        fn set_id(&mut self, id: String) {
            self.id = Some(id);
        }

        fn created(&self) -> Option<DateTime<Utc>> {
            self.created
        }

        fn set_created(&mut self, at: DateTime<Utc>) {
            self.created = Some(at);
        }
    }

    fn item(status: u16, id: Option<&str>) -> BulkItem {
        BulkItem {
            status,
            id: id.map(String::from),
            error: if status == 201 {
                None
            } else {
                Some(json!({"type": "version_conflict_engine_exception"}))
            },
        }
    }

    #[test]
    fn actions_alternate_header_and_body() {
        let docs = vec![Note::new("a"), Note::new("b")];
        let actions = create_actions(&docs, "note").unwrap();

        assert_eq!(actions.len(), 4);
        assert_eq!(actions[0], json!({"create": {"_index": "note"}}));
        assert_eq!(actions[1]["text"], "a");
        assert_eq!(actions[2], json!({"create": {"_index": "note"}}));
        assert_eq!(actions[3]["text"], "b");
    }

    #[test]
    fn header_carries_caller_id_only_when_present() {
        let docs = vec![Note::with_id("a", "doc-1"), Note::new("b")];
        let actions = create_actions(&docs, "note").unwrap();

        assert_eq!(actions[0]["create"]["_id"], "doc-1");
        assert!(actions[2]["create"].get("_id").is_none());
    }

    #[test]
    fn bodies_never_contain_the_id() {
        let docs = vec![Note::with_id("a", "doc-1")];
        let actions = create_actions(&docs, "note").unwrap();
        assert!(actions[1].get("id").is_none());
    }

    #[test]
    fn aggregate_splits_by_status_in_order() {
        let docs = vec![Note::new("a"), Note::new("b"), Note::new("c")];
        let response = BulkResponse {
            items: vec![
                item(201, Some("id-a")),
                item(409, None),
                item(201, Some("id-c")),
            ],
        };

        let result = aggregate(docs, response).unwrap();
        assert_eq!(result.successes.len(), 2);
        assert_eq!(result.failures.len(), 1);

        assert_eq!(result.successes[0].text.as_str(), "a");
        assert_eq!(result.successes[0].id.as_deref(), Some("id-a"));
        assert_eq!(result.successes[1].text.as_str(), "c");
        assert_eq!(result.successes[1].id.as_deref(), Some("id-c"));

        let (failed, error) = &result.failures[0];
        assert_eq!(failed.text.as_str(), "b");
        assert_eq!(error["type"], "version_conflict_engine_exception");
    }

    #[test]
    fn aggregate_rejects_item_count_mismatch() {
        let docs = vec![Note::new("a"), Note::new("b")];
        let response = BulkResponse {
            items: vec![item(201, Some("id-a"))],
        };

        let err = aggregate(docs, response).unwrap_err();
        assert!(matches!(err, DocbindError::Store(_)));
    }
}
