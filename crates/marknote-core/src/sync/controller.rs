//! Note sync controller
//!
//! Owns the local cache of notes, the selected note id and the edit buffer,
//! and mediates between the store's snapshot stream and user actions.
//!
//! Reactions:
//! - snapshot arrival replaces the list wholesale, then re-derives the
//!   selection and the buffer,
//! - a local edit only touches the buffer and restarts the debounce timer,
//! - debounce expiry merges the buffer into the current note when it differs
//!   from the note's latest known body,
//! - create and delete go straight to the store; the list only changes once
//!   the resulting snapshot arrives.

use std::sync::Arc;
use std::time::Duration;

use super::debounce::DebounceTimer;
use super::derive;
use crate::models::{NewNote, Note, NoteId, NotePatch};
use crate::store::{NoteStore, Snapshot, Subscription};
use crate::util::unix_millis_now;
use crate::Result;

/// Quiet period after the last edit before the buffer is written back.
pub const DEFAULT_QUIET_PERIOD: Duration = Duration::from_millis(500);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyncSettings {
    pub quiet_period: Duration,
}

impl Default for SyncSettings {
    fn default() -> Self {
        Self {
            quiet_period: DEFAULT_QUIET_PERIOD,
        }
    }
}

/// Something the controller is waiting on
#[derive(Debug)]
pub enum SyncEvent {
    /// The subscription delivered a snapshot
    Snapshot(Snapshot),
    /// The debounce quiet period elapsed
    QuietPeriodElapsed,
    /// The subscription is gone
    Closed,
}

/// Outcome of handling one [`SyncEvent`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reaction {
    /// Local list replaced by a snapshot of `notes` notes
    SnapshotApplied { notes: usize },
    /// Buffer merged into the note
    Saved(NoteId),
    /// Quiet period elapsed with nothing to write
    SaveSkipped,
    /// Subscription released; no more reactions will happen
    Closed,
}

pub struct NoteSyncController<S: NoteStore> {
    store: Arc<S>,
    subscription: Option<Subscription>,
    notes: Vec<Note>,
    selected: Option<NoteId>,
    /// Note created locally; cleared by the next snapshot
    awaiting_created: Option<NoteId>,
    buffer: String,
    /// Note the buffer was last loaded from
    buffer_source: Option<NoteId>,
    debounce: DebounceTimer,
}

impl<S: NoteStore> std::fmt::Debug for NoteSyncController<S> {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("NoteSyncController")
            .field("notes", &self.notes.len())
            .field("selected", &self.selected)
            .field("buffer_source", &self.buffer_source)
            .field("debounce", &self.debounce)
            .field("subscribed", &self.subscription.is_some())
            .finish_non_exhaustive()
    }
}

impl<S: NoteStore> NoteSyncController<S> {
    /// Create a controller and open its subscription.
    pub fn start(store: Arc<S>, settings: SyncSettings) -> Self {
        let subscription = store.subscribe();
        tracing::info!("Subscribed to remote notes collection");

        Self {
            store,
            subscription: Some(subscription),
            notes: Vec::new(),
            selected: None,
            awaiting_created: None,
            buffer: String::new(),
            buffer_source: None,
            debounce: DebounceTimer::new(settings.quiet_period),
        }
    }

    /// Notes exactly as delivered by the last snapshot.
    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    /// Notes in display order, most recently updated first.
    pub fn sorted_notes(&self) -> Vec<Note> {
        derive::sort_for_display(&self.notes)
    }

    pub const fn selected_id(&self) -> Option<&NoteId> {
        self.selected.as_ref()
    }

    pub fn current_note(&self) -> Option<&Note> {
        derive::current_note(&self.notes, self.selected.as_ref())
    }

    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    pub const fn has_pending_write(&self) -> bool {
        self.debounce.is_pending()
    }

    pub const fn is_subscribed(&self) -> bool {
        self.subscription.is_some()
    }

    /// Replace the local list with `snapshot` and re-derive selection and
    /// buffer.
    pub fn apply_snapshot(&mut self, snapshot: Snapshot) {
        self.notes = snapshot.into_notes();

        // A note created here may be missing from one listing taken before
        // the create landed. Only that first snapshot keeps the selection.
        let held = self
            .awaiting_created
            .take()
            .filter(|id| !self.notes.iter().any(|note| &note.id == id));

        if held.is_none() || held != self.selected {
            self.selected = derive::reselect(&self.notes, self.selected.as_ref());
        }
        self.rederive_buffer();

        tracing::debug!(
            "Applied snapshot with {} notes, current: {:?}",
            self.notes.len(),
            self.buffer_source
        );
    }

    /// Make `id` the current note. Unsaved edits to the previous note are
    /// discarded.
    pub fn select(&mut self, id: NoteId) {
        self.awaiting_created = None;
        self.selected = Some(id);
        self.rederive_buffer();
    }

    /// Replace the buffer with `text` and restart the quiet period.
    pub fn edit(&mut self, text: impl Into<String>) {
        self.buffer = text.into();
        self.debounce.restart();
    }

    /// Create a placeholder note and select it once the store assigned an id.
    pub async fn create_new_note(&mut self) -> Result<NoteId> {
        let id = self
            .store
            .create(NewNote::placeholder(unix_millis_now()))
            .await?;
        tracing::info!("Created note {}", id);

        self.selected = Some(id.clone());
        self.awaiting_created = Some(id.clone());
        self.rederive_buffer();
        Ok(id)
    }

    /// Ask the store to delete `id`. The local list is left alone until the
    /// next snapshot.
    pub async fn delete_note(&self, id: &NoteId) -> Result<()> {
        self.store.delete(id).await?;
        tracing::info!("Deleted note {}", id);
        Ok(())
    }

    /// Wait for the next snapshot or debounce expiry.
    ///
    /// Cancel-safe, so it can sit in a `select!` next to other event
    /// sources. Snapshots win over a simultaneous debounce expiry so the
    /// divergence check sees the newest body.
    pub async fn next_event(&mut self) -> SyncEvent {
        let Some(subscription) = self.subscription.as_mut() else {
            if self.debounce.is_pending() {
                self.debounce.expired().await;
                return SyncEvent::QuietPeriodElapsed;
            }
            return SyncEvent::Closed;
        };

        tokio::select! {
            biased;
            snapshot = subscription.next() => match snapshot {
                Some(snapshot) => SyncEvent::Snapshot(snapshot),
                None => {
                    tracing::warn!("Remote notes subscription ended");
                    self.subscription = None;
                    SyncEvent::Closed
                }
            },
            () = self.debounce.expired() => SyncEvent::QuietPeriodElapsed,
        }
    }

    /// Apply one event. Store failures from the debounced write are returned
    /// as-is; the buffer is not reverted.
    pub async fn react(&mut self, event: SyncEvent) -> Result<Reaction> {
        match event {
            SyncEvent::Snapshot(snapshot) => {
                let count = snapshot.notes().len();
                self.apply_snapshot(snapshot);
                Ok(Reaction::SnapshotApplied { notes: count })
            }
            SyncEvent::QuietPeriodElapsed => self.write_buffer().await,
            SyncEvent::Closed => Ok(Reaction::Closed),
        }
    }

    /// Wait for and apply the next event.
    pub async fn next_reaction(&mut self) -> Result<Reaction> {
        let event = self.next_event().await;
        self.react(event).await
    }

    /// Release the subscription and drop any pending write.
    pub fn shutdown(&mut self) {
        if let Some(mut subscription) = self.subscription.take() {
            subscription.close();
            tracing::info!("Unsubscribed from remote notes collection");
        }
        if self.debounce.cancel() {
            tracing::debug!("Dropped pending debounced write on shutdown");
        }
    }

    async fn write_buffer(&mut self) -> Result<Reaction> {
        let Some(note) = self.current_note() else {
            return Ok(Reaction::SaveSkipped);
        };
        if note.body == self.buffer {
            tracing::trace!("Buffer matches note {}, nothing to write", note.id);
            return Ok(Reaction::SaveSkipped);
        }

        let id = note.id.clone();
        let patch = NotePatch {
            body: self.buffer.clone(),
            updated_at: unix_millis_now(),
        };
        self.store.merge_update(&id, patch).await?;
        tracing::debug!("Saved buffer into note {}", id);
        Ok(Reaction::Saved(id))
    }

    fn rederive_buffer(&mut self) {
        let current = derive::current_note(&self.notes, self.selected.as_ref());
        let current_id = current.map(|note| note.id.clone());
        if current_id == self.buffer_source {
            return;
        }

        match current {
            Some(note) => self.buffer.clone_from(&note.body),
            None => self.buffer.clear(),
        }
        self.buffer_source = current_id;
        self.debounce.cancel();
    }
}

impl<S: NoteStore> Drop for NoteSyncController<S> {
    fn drop(&mut self) {
        self.shutdown();
    }
}
