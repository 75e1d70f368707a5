//! Pure derivations over a note list.
//!
//! Nothing here holds state; the controller calls these after every mutation
//! of the list or the selection.

use std::cmp::Reverse;

use crate::models::{Note, NoteId};

/// Notes ordered for display: most recently updated first.
///
/// The sort is stable, so notes with equal `updated_at` keep their snapshot
/// order.
pub fn sort_for_display(notes: &[Note]) -> Vec<Note> {
    let mut sorted = notes.to_vec();
    sorted.sort_by_key(|note| Reverse(note.updated_at));
    sorted
}

/// First note in display order.
pub fn first_in_display_order(notes: &[Note]) -> Option<&Note> {
    notes.iter().reduce(|best, note| {
        if note.updated_at > best.updated_at {
            note
        } else {
            best
        }
    })
}

/// The note being edited: the selected one, else the first in display order.
pub fn current_note<'a>(notes: &'a [Note], selected: Option<&NoteId>) -> Option<&'a Note> {
    selected
        .and_then(|id| notes.iter().find(|note| &note.id == id))
        .or_else(|| first_in_display_order(notes))
}

/// Selection after the list changed.
///
/// A selection that still names a note in the list is kept. An empty or
/// dangling selection moves to the first note in display order; with an empty
/// list an empty selection stays empty.
pub fn reselect(notes: &[Note], selected: Option<&NoteId>) -> Option<NoteId> {
    match selected {
        Some(id) if notes.iter().any(|note| &note.id == id) => Some(id.clone()),
        _ => first_in_display_order(notes).map(|note| note.id.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn note(id: &str, updated_at: i64) -> Note {
        Note {
            id: NoteId::new(id),
            body: format!("body of {id}"),
            created_at: 0,
            updated_at,
        }
    }

    fn ids(notes: &[Note]) -> Vec<&str> {
        notes.iter().map(|note| note.id.as_str()).collect()
    }

    #[test]
    fn sorts_most_recent_first() {
        let notes = vec![note("old", 100), note("new", 200)];
        assert_eq!(ids(&sort_for_display(&notes)), vec!["new", "old"]);
    }

    #[test]
    fn sort_keeps_snapshot_order_for_ties() {
        let notes = vec![note("a", 5), note("b", 5), note("c", 9)];
        assert_eq!(ids(&sort_for_display(&notes)), vec!["c", "a", "b"]);
        assert_eq!(first_in_display_order(&notes).unwrap().id.as_str(), "c");
    }

    #[test]
    fn first_in_display_order_matches_sort_on_ties() {
        let notes = vec![note("a", 5), note("b", 5)];
        assert_eq!(
            first_in_display_order(&notes).map(|note| note.id.as_str()),
            sort_for_display(&notes).first().map(|note| note.id.as_str())
        );
    }

    #[test]
    fn current_note_falls_back_to_most_recent() {
        let notes = vec![note("a", 1), note("b", 2)];
        assert_eq!(current_note(&notes, None).unwrap().id.as_str(), "b");
        assert_eq!(
            current_note(&notes, Some(&NoteId::new("missing")))
                .unwrap()
                .id
                .as_str(),
            "b"
        );
        assert_eq!(
            current_note(&notes, Some(&NoteId::new("a")))
                .unwrap()
                .id
                .as_str(),
            "a"
        );
        assert!(current_note(&[], None).is_none());
    }

    #[test]
    fn reselect_keeps_valid_selection() {
        let notes = vec![note("a", 1), note("b", 2)];
        assert_eq!(
            reselect(&notes, Some(&NoteId::new("a"))),
            Some(NoteId::new("a"))
        );
    }

    #[test]
    fn reselect_replaces_empty_or_dangling_selection() {
        let notes = vec![note("a", 1), note("b", 2)];
        assert_eq!(reselect(&notes, None), Some(NoteId::new("b")));
        assert_eq!(
            reselect(&notes, Some(&NoteId::new("deleted"))),
            Some(NoteId::new("b"))
        );
        assert_eq!(reselect(&[], Some(&NoteId::new("deleted"))), None);
        assert_eq!(reselect(&[], None), None);
    }
}
