//! Background driver owning the note sync controller
//!
//! The UI never touches the controller directly. It sends [`UiCommand`]s over
//! a channel and renders the [`NotesView`] published after every reaction.

use std::sync::Arc;

use marknote_core::{Note, NoteId, NoteStore, NoteSyncController, Reaction, SyncSettings};
use tokio::sync::mpsc;

/// User actions forwarded to the controller
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiCommand {
    Select(NoteId),
    Edit(String),
    Create,
    Delete(NoteId),
}

pub type CommandSender = mpsc::UnboundedSender<UiCommand>;
pub type CommandReceiver = mpsc::UnboundedReceiver<UiCommand>;

/// Render-ready view of the controller state
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotesView {
    /// Whether the first snapshot has arrived
    pub loaded: bool,
    /// Notes in display order
    pub notes: Vec<Note>,
    /// Note the editor is bound to
    pub current_id: Option<NoteId>,
    /// Edit buffer as of the last reaction
    pub buffer: String,
}

impl NotesView {
    pub fn from_controller<S: NoteStore>(
        controller: &NoteSyncController<S>,
        loaded: bool,
    ) -> Self {
        Self {
            loaded,
            notes: controller.sorted_notes(),
            current_id: controller.current_note().map(|note| note.id.clone()),
            buffer: controller.buffer().to_string(),
        }
    }
}

/// Run the controller until the command channel closes or the subscription
/// ends, calling `publish` after each handled command or reaction.
pub async fn run_sync<S: NoteStore>(
    store: Arc<S>,
    settings: SyncSettings,
    mut commands: CommandReceiver,
    mut publish: impl FnMut(NotesView),
) {
    let mut controller = NoteSyncController::start(store, settings);
    let mut loaded = false;

    loop {
        tokio::select! {
            command = commands.recv() => {
                let Some(command) = command else {
                    tracing::debug!("UI command channel closed");
                    break;
                };
                handle_command(&mut controller, command).await;
            }
            event = controller.next_event() => {
                match controller.react(event).await {
                    Ok(Reaction::SnapshotApplied { notes }) => {
                        tracing::debug!("Snapshot applied ({} notes)", notes);
                        loaded = true;
                    }
                    Ok(Reaction::Saved(id)) => tracing::debug!("Auto-saved note: {}", id),
                    Ok(Reaction::SaveSkipped) => {}
                    Ok(Reaction::Closed) => {
                        tracing::warn!("Notes subscription closed; stopping sync");
                        break;
                    }
                    Err(error) => tracing::error!("Failed to save note: {}", error),
                }
            }
        }

        publish(NotesView::from_controller(&controller, loaded));
    }

    controller.shutdown();
}

async fn handle_command<S: NoteStore>(
    controller: &mut NoteSyncController<S>,
    command: UiCommand,
) {
    match command {
        UiCommand::Select(id) => controller.select(id),
        UiCommand::Edit(text) => controller.edit(text),
        UiCommand::Create => {
            if let Err(error) = controller.create_new_note().await {
                tracing::error!("Failed to create note: {}", error);
            }
        }
        UiCommand::Delete(id) => {
            if let Err(error) = controller.delete_note(&id).await {
                tracing::error!("Failed to delete note {}: {}", id, error);
            }
        }
    }
}
