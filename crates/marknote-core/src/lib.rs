//! marknote-core - Core library for marknote
//!
//! This crate contains the note model, the remote document store contract and
//! its implementations, and the controller that keeps local editing state in
//! sync with the store.

pub mod config;
pub mod error;
pub mod models;
pub mod store;
pub mod sync;
pub mod util;

pub use error::{Error, Result};
pub use models::{NewNote, Note, NoteId, NotePatch};
pub use store::{MemoryNoteStore, NoteStore, Snapshot, Subscription};
pub use sync::{NoteSyncController, Reaction, SyncEvent, SyncSettings};
