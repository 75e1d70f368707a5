//! Application state management
//!
//! Global state accessible via Dioxus context providers.

use dioxus::prelude::*;

use marknote_core::NoteId;

use crate::services::{CommandSender, NotesView, UiCommand};
use crate::theme::ResolvedTheme;

/// Where notes are persisted
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SyncMode {
    /// Firestore collection, synchronized live
    Remote,
    /// In-memory store, lost on exit
    LocalOnly,
}

/// Global application state
#[derive(Clone, Copy)]
pub struct AppState {
    /// Latest view published by the sync driver
    pub view: Signal<NotesView>,
    /// Channel into the sync driver, once it is running
    pub commands: Signal<Option<CommandSender>>,
    /// Resolved theme (light/dark based on system preference)
    pub theme: Signal<ResolvedTheme>,
    /// Persistence mode chosen at startup
    pub sync_mode: Signal<SyncMode>,
}

impl AppState {
    /// Forward a user action to the sync driver
    pub fn send(&self, command: UiCommand) {
        let commands = self.commands.read();
        let Some(sender) = commands.as_ref() else {
            tracing::warn!("Sync driver not running; dropped {:?}", command);
            return;
        };
        if sender.send(command).is_err() {
            tracing::error!("Sync driver stopped; command dropped");
        }
    }

    pub fn select_note(&self, id: NoteId) {
        self.send(UiCommand::Select(id));
    }

    pub fn create_note(&self) {
        self.send(UiCommand::Create);
    }

    pub fn delete_note(&self, id: NoteId) {
        self.send(UiCommand::Delete(id));
    }

    pub fn edit_buffer(&self, text: String) {
        self.send(UiCommand::Edit(text));
    }
}
