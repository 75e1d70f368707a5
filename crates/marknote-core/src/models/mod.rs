//! Data models for marknote

mod note;

pub use note::{NewNote, Note, NoteId, NotePatch, PLACEHOLDER_BODY, UNTITLED};
