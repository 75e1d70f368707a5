//! Firestore REST document encoding.
//!
//! Firestore wraps every field in a typed value object, e.g.
//! `{"body": {"stringValue": "..."}, "updatedAt": {"integerValue": "1700000000000"}}`.
//! 64-bit integers travel as JSON strings.

use serde::Deserialize;
use serde_json::{json, Map, Value};

use crate::models::{NewNote, Note, NoteId, NotePatch};
use crate::{Error, Result};

pub const BODY_FIELD: &str = "body";
pub const CREATED_AT_FIELD: &str = "createdAt";
pub const UPDATED_AT_FIELD: &str = "updatedAt";

/// A document as returned by the REST API
#[derive(Debug, Clone, Deserialize)]
pub struct Document {
    pub name: String,
    #[serde(default)]
    pub fields: Map<String, Value>,
}

/// One page of a collection listing
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListDocumentsResponse {
    #[serde(default)]
    pub documents: Vec<Document>,
    #[serde(default)]
    pub next_page_token: Option<String>,
}

impl Document {
    /// Last path segment of the resource name.
    pub fn id(&self) -> Result<NoteId> {
        self.name
            .rsplit('/')
            .next()
            .filter(|segment| !segment.is_empty())
            .map(NoteId::new)
            .ok_or_else(|| {
                Error::InvalidPayload(format!("document name '{}' has no id", self.name))
            })
    }

    /// Decode into a note. Missing fields fall back to empty/zero.
    pub fn into_note(self) -> Result<Note> {
        let id = self.id()?;
        Ok(Note {
            id,
            body: string_field(&self.fields, BODY_FIELD).unwrap_or_default(),
            created_at: integer_field(&self.fields, CREATED_AT_FIELD).unwrap_or_default(),
            updated_at: integer_field(&self.fields, UPDATED_AT_FIELD).unwrap_or_default(),
        })
    }
}

pub fn encode_new_note(note: &NewNote) -> Value {
    json!({
        "fields": {
            BODY_FIELD: string_value(&note.body),
            CREATED_AT_FIELD: integer_value(note.created_at),
            UPDATED_AT_FIELD: integer_value(note.updated_at),
        }
    })
}

pub fn encode_patch(patch: &NotePatch) -> Value {
    json!({
        "fields": {
            BODY_FIELD: string_value(&patch.body),
            UPDATED_AT_FIELD: integer_value(patch.updated_at),
        }
    })
}

/// Field paths written by [`encode_patch`], used as the update mask.
pub const PATCH_FIELD_PATHS: [&str; 2] = [BODY_FIELD, UPDATED_AT_FIELD];

fn string_value(value: &str) -> Value {
    json!({ "stringValue": value })
}

fn integer_value(value: i64) -> Value {
    json!({ "integerValue": value.to_string() })
}

fn string_field(fields: &Map<String, Value>, key: &str) -> Option<String> {
    fields
        .get(key)?
        .get("stringValue")?
        .as_str()
        .map(ToString::to_string)
}

#[allow(clippy::cast_possible_truncation)] // millisecond timestamps fit in i64
fn integer_field(fields: &Map<String, Value>, key: &str) -> Option<i64> {
    let value = fields.get(key)?;
    if let Some(integer) = value.get("integerValue") {
        return match integer {
            Value::String(raw) => raw.parse().ok(),
            other => other.as_i64(),
        };
    }
    value
        .get("doubleValue")
        .and_then(Value::as_f64)
        .map(|double| double as i64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn document(raw: &str) -> Document {
        serde_json::from_str(raw).unwrap()
    }

    #[test]
    fn decodes_a_full_document() {
        let doc = document(
            r##"{
              "name": "projects/p/databases/(default)/documents/notes/abc123",
              "fields": {
                "body": {"stringValue": "# Hello"},
                "createdAt": {"integerValue": "100"},
                "updatedAt": {"integerValue": "200"}
              },
              "createTime": "2024-01-01T00:00:00Z"
            }"##,
        );

        assert_eq!(
            doc.into_note().unwrap(),
            Note {
                id: NoteId::new("abc123"),
                body: "# Hello".to_string(),
                created_at: 100,
                updated_at: 200,
            }
        );
    }

    #[test]
    fn tolerates_missing_and_double_fields() {
        let doc = document(
            r#"{
              "name": "projects/p/databases/(default)/documents/notes/x",
              "fields": { "updatedAt": {"doubleValue": 1700000000000.0} }
            }"#,
        );
        let note = doc.into_note().unwrap();
        assert_eq!(note.body, "");
        assert_eq!(note.created_at, 0);
        assert_eq!(note.updated_at, 1_700_000_000_000);
    }

    #[test]
    fn rejects_document_without_id() {
        let doc = document(r#"{ "name": "projects/p/databases/(default)/documents/notes/" }"#);
        assert!(matches!(doc.into_note(), Err(Error::InvalidPayload(_))));
    }

    #[test]
    fn empty_listing_has_no_documents() {
        let page: ListDocumentsResponse = serde_json::from_str("{}").unwrap();
        assert!(page.documents.is_empty());
        assert!(page.next_page_token.is_none());
    }

    #[test]
    fn patch_encodes_only_merged_fields() {
        let encoded = encode_patch(&NotePatch {
            body: "hi".to_string(),
            updated_at: 42,
        });
        assert_eq!(
            encoded,
            json!({
                "fields": {
                    "body": {"stringValue": "hi"},
                    "updatedAt": {"integerValue": "42"}
                }
            })
        );
    }

    #[test]
    fn new_note_encodes_integers_as_strings() {
        let encoded = encode_new_note(&NewNote::placeholder(7));
        assert_eq!(encoded["fields"]["createdAt"]["integerValue"], "7");
        assert_eq!(encoded["fields"]["updatedAt"]["integerValue"], "7");
    }
}
