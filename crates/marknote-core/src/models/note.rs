//! Note model

use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Body given to every freshly created note.
pub const PLACEHOLDER_BODY: &str = "# Type your markdown note's title here";

/// Title shown for notes whose first line is blank.
pub const UNTITLED: &str = "Untitled";

/// Opaque note identifier, assigned by the remote store on creation
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NoteId(String);

impl NoteId {
    /// Wrap a store-assigned identifier
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the identifier as a string slice
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for NoteId {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.to_string()))
    }
}

impl From<&str> for NoteId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// A note as last seen in a remote snapshot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    /// Store-assigned identifier
    pub id: NoteId,
    /// Markdown source
    pub body: String,
    /// Creation timestamp (Unix ms)
    pub created_at: i64,
    /// Last accepted write (Unix ms)
    pub updated_at: i64,
}

impl Note {
    /// First line of the body without heading markers, truncated to `max_len`
    /// characters.
    #[must_use]
    pub fn title(&self, max_len: usize) -> String {
        let first_line = self
            .body
            .lines()
            .find(|line| !line.trim().is_empty())
            .unwrap_or("")
            .trim()
            .trim_start_matches('#')
            .trim();

        if first_line.is_empty() {
            return UNTITLED.to_string();
        }
        first_line.chars().take(max_len).collect()
    }
}

/// Fields sent to the store when creating a note
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewNote {
    pub body: String,
    pub created_at: i64,
    pub updated_at: i64,
}

impl NewNote {
    /// A placeholder note with both timestamps set to `now` (Unix ms)
    #[must_use]
    pub fn placeholder(now: i64) -> Self {
        Self {
            body: PLACEHOLDER_BODY.to_string(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Attach the store-assigned id
    #[must_use]
    pub fn into_note(self, id: NoteId) -> Note {
        Note {
            id,
            body: self.body,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// Partial write merged into an existing note
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotePatch {
    pub body: String,
    pub updated_at: i64,
}

impl NotePatch {
    /// Merge the patched fields into `note`, leaving the rest untouched
    pub fn apply_to(&self, note: &mut Note) {
        note.body.clone_from(&self.body);
        note.updated_at = self.updated_at;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn note(body: &str) -> Note {
        NewNote {
            body: body.to_string(),
            created_at: 1,
            updated_at: 1,
        }
        .into_note(NoteId::new("n1"))
    }

    #[test]
    fn test_placeholder_sets_both_timestamps() {
        let new_note = NewNote::placeholder(1_700_000_000_000);
        assert_eq!(new_note.body, PLACEHOLDER_BODY);
        assert_eq!(new_note.created_at, new_note.updated_at);
    }

    #[test]
    fn test_title_strips_heading_markers() {
        assert_eq!(note("# Groceries\n- milk").title(40), "Groceries");
        assert_eq!(note("### Deep heading").title(40), "Deep heading");
    }

    #[test]
    fn test_title_skips_leading_blank_lines_and_truncates() {
        assert_eq!(note("\n\n  Second try  \nrest").title(6), "Second");
    }

    #[test]
    fn test_title_of_blank_body() {
        assert_eq!(note("").title(40), UNTITLED);
        assert_eq!(note("#\n").title(40), UNTITLED);
    }

    #[test]
    fn test_patch_merges_only_patched_fields() {
        let mut target = note("old");
        NotePatch {
            body: "new".to_string(),
            updated_at: 99,
        }
        .apply_to(&mut target);
        assert_eq!(target.body, "new");
        assert_eq!(target.updated_at, 99);
        assert_eq!(target.created_at, 1);
        assert_eq!(target.id.as_str(), "n1");
    }

    #[test]
    fn test_note_id_serializes_transparently() {
        let json = serde_json::to_string(&NoteId::new("abc123")).unwrap();
        assert_eq!(json, "\"abc123\"");
    }
}
