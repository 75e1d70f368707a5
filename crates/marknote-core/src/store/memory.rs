//! In-process note store with live snapshot fan-out.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::mpsc;
use uuid::Uuid;

use super::{NoteStore, Snapshot, Subscription};
use crate::models::{NewNote, Note, NoteId, NotePatch};
use crate::{Error, Result};

/// Note store kept entirely in memory.
///
/// Every accepted write pushes a fresh snapshot to all open subscriptions,
/// mirroring how a managed document database notifies its listeners.
#[derive(Clone, Default)]
pub struct MemoryNoteStore {
    inner: Arc<Mutex<Inner>>,
}

#[derive(Default)]
struct Inner {
    notes: Vec<Note>,
    subscribers: Vec<mpsc::UnboundedSender<Snapshot>>,
    offline: bool,
}

impl Inner {
    fn snapshot(&self) -> Snapshot {
        Snapshot::new(self.notes.clone())
    }

    fn publish(&mut self) {
        let snapshot = self.snapshot();
        self.subscribers
            .retain(|subscriber| subscriber.send(snapshot.clone()).is_ok());
        tracing::trace!(
            "Published snapshot of {} notes to {} subscribers",
            snapshot.notes().len(),
            self.subscribers.len()
        );
    }

    fn ensure_online(&self) -> Result<()> {
        if self.offline {
            Err(Error::Unavailable("memory store is offline".to_string()))
        } else {
            Ok(())
        }
    }
}

impl MemoryNoteStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with `notes`, kept in the given order.
    pub fn with_notes(notes: Vec<Note>) -> Self {
        let store = Self::default();
        store.lock().notes = notes;
        store
    }

    /// Current contents of the collection.
    pub fn snapshot(&self) -> Snapshot {
        self.lock().snapshot()
    }

    /// Reject every subsequent write while `offline` is set.
    pub fn set_offline(&self, offline: bool) {
        self.lock().offline = offline;
    }

    /// Number of subscriptions still listening.
    pub fn subscriber_count(&self) -> usize {
        let mut inner = self.lock();
        inner.subscribers.retain(|subscriber| !subscriber.is_closed());
        inner.subscribers.len()
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl NoteStore for MemoryNoteStore {
    fn subscribe(&self) -> Subscription {
        let (sender, receiver) = mpsc::unbounded_channel();
        let mut inner = self.lock();
        if sender.send(inner.snapshot()).is_ok() {
            inner.subscribers.push(sender);
        }
        Subscription::new(receiver)
    }

    async fn create(&self, note: NewNote) -> Result<NoteId> {
        let mut inner = self.lock();
        inner.ensure_online()?;

        let id = NoteId::new(Uuid::now_v7().simple().to_string());
        inner.notes.push(note.into_note(id.clone()));
        inner.publish();
        Ok(id)
    }

    async fn merge_update(&self, id: &NoteId, patch: NotePatch) -> Result<()> {
        let mut inner = self.lock();
        inner.ensure_online()?;

        let note = inner
            .notes
            .iter_mut()
            .find(|note| &note.id == id)
            .ok_or_else(|| Error::NotFound(id.to_string()))?;
        patch.apply_to(note);
        inner.publish();
        Ok(())
    }

    async fn delete(&self, id: &NoteId) -> Result<()> {
        let mut inner = self.lock();
        inner.ensure_online()?;

        let before = inner.notes.len();
        inner.notes.retain(|note| &note.id != id);
        if inner.notes.len() != before {
            inner.publish();
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn note(id: &str, body: &str, updated_at: i64) -> Note {
        Note {
            id: NoteId::new(id),
            body: body.to_string(),
            created_at: 1,
            updated_at,
        }
    }

    #[tokio::test]
    async fn subscribe_delivers_initial_load() {
        let store = MemoryNoteStore::with_notes(vec![note("a", "alpha", 10)]);
        let mut subscription = store.subscribe();

        let snapshot = subscription.next().await.unwrap();
        assert_eq!(snapshot.notes(), &[note("a", "alpha", 10)]);
    }

    #[tokio::test]
    async fn writes_fan_out_to_every_subscriber_in_order() {
        let store = MemoryNoteStore::new();
        let mut first = store.subscribe();
        let mut second = store.subscribe();

        let id = store.create(NewNote::placeholder(5)).await.unwrap();
        store
            .merge_update(
                &id,
                NotePatch {
                    body: "edited".to_string(),
                    updated_at: 6,
                },
            )
            .await
            .unwrap();

        for subscription in [&mut first, &mut second] {
            assert!(subscription.next().await.unwrap().notes().is_empty());
            let created = subscription.next().await.unwrap();
            assert_eq!(created.notes()[0].updated_at, 5);
            let updated = subscription.next().await.unwrap();
            assert_eq!(updated.notes()[0].body, "edited");
            assert_eq!(updated.notes()[0].created_at, 5);
        }
    }

    #[tokio::test]
    async fn merge_update_of_missing_note_is_rejected() {
        let store = MemoryNoteStore::new();
        let error = store
            .merge_update(
                &NoteId::new("gone"),
                NotePatch {
                    body: "x".to_string(),
                    updated_at: 1,
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(error, Error::NotFound(_)));
        assert!(store.snapshot().notes().is_empty());
    }

    #[tokio::test]
    async fn offline_store_rejects_writes() {
        let store = MemoryNoteStore::with_notes(vec![note("a", "alpha", 10)]);
        store.set_offline(true);

        assert!(matches!(
            store.create(NewNote::placeholder(1)).await,
            Err(Error::Unavailable(_))
        ));
        assert!(matches!(
            store.delete(&NoteId::new("a")).await,
            Err(Error::Unavailable(_))
        ));
        assert_eq!(store.snapshot().notes().len(), 1);
    }

    #[tokio::test]
    async fn closed_subscription_is_dropped_from_fan_out() {
        let store = MemoryNoteStore::new();
        let mut subscription = store.subscribe();
        assert_eq!(store.subscriber_count(), 1);

        subscription.close();
        assert!(subscription.next().await.is_none());
        assert_eq!(store.subscriber_count(), 0);

        store.create(NewNote::placeholder(1)).await.unwrap();
        assert!(subscription.next().await.is_none());
    }
}
