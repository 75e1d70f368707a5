//! Remote document store contract
//!
//! The controller only needs four capabilities from a store: a live
//! subscription delivering full snapshots, create, merge-update and delete.
//! [`MemoryNoteStore`] keeps everything in process; [`FirestoreNoteStore`]
//! talks to Cloud Firestore over REST.

mod document;
mod firestore;
mod memory;

use std::future::Future;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::models::{NewNote, Note, NoteId, NotePatch};
use crate::Result;

pub use firestore::FirestoreNoteStore;
pub use memory::MemoryNoteStore;

/// Full point-in-time listing of every note in the collection
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot {
    notes: Vec<Note>,
}

impl Snapshot {
    pub const fn new(notes: Vec<Note>) -> Self {
        Self { notes }
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn into_notes(self) -> Vec<Note> {
        self.notes
    }
}

/// Live subscription to a notes collection
///
/// Snapshots are yielded in delivery order. Dropping or closing the handle
/// releases the subscription; nothing is yielded afterwards.
#[derive(Debug)]
pub struct Subscription {
    receiver: Option<mpsc::UnboundedReceiver<Snapshot>>,
    poller: Option<JoinHandle<()>>,
}

impl Subscription {
    /// Subscription fed by a store that pushes into `receiver`'s sender.
    pub const fn new(receiver: mpsc::UnboundedReceiver<Snapshot>) -> Self {
        Self {
            receiver: Some(receiver),
            poller: None,
        }
    }

    /// Subscription fed by a background task that is aborted on close.
    pub const fn with_poller(
        receiver: mpsc::UnboundedReceiver<Snapshot>,
        poller: JoinHandle<()>,
    ) -> Self {
        Self {
            receiver: Some(receiver),
            poller: Some(poller),
        }
    }

    /// Wait for the next snapshot. Returns `None` once the subscription is
    /// closed or the store went away.
    pub async fn next(&mut self) -> Option<Snapshot> {
        self.receiver.as_mut()?.recv().await
    }

    pub const fn is_closed(&self) -> bool {
        self.receiver.is_none()
    }

    /// Release the subscription. Buffered snapshots are discarded.
    pub fn close(&mut self) {
        if let Some(poller) = self.poller.take() {
            poller.abort();
        }
        if let Some(mut receiver) = self.receiver.take() {
            receiver.close();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.close();
    }
}

/// Document store holding the notes collection
pub trait NoteStore: Send + Sync + 'static {
    /// Open a live subscription. The first snapshot is the initial load.
    fn subscribe(&self) -> Subscription;

    /// Create a note and return the identifier the store assigned to it.
    fn create(&self, note: NewNote) -> impl Future<Output = Result<NoteId>> + Send;

    /// Merge `patch` into an existing note.
    fn merge_update(
        &self,
        id: &NoteId,
        patch: NotePatch,
    ) -> impl Future<Output = Result<()>> + Send;

    /// Delete a note.
    fn delete(&self, id: &NoteId) -> impl Future<Output = Result<()>> + Send;
}
