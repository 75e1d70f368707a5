//! Main application component

use std::sync::Arc;

use dioxus::prelude::*;
use tokio::sync::mpsc;

use marknote_core::store::FirestoreNoteStore;
use marknote_core::{MemoryNoteStore, SyncSettings};

use crate::bootstrap_config::{load_bootstrap_config, resolve_store_config};
use crate::services::{run_sync, CommandSender, NotesView};
use crate::state::{AppState, SyncMode};
use crate::theme::resolve_theme;
use crate::views::Home;

/// Root application component
#[component]
pub fn App() -> Element {
    // State signals
    let mut view = use_signal(NotesView::default);
    let mut commands = use_signal(|| None::<CommandSender>);
    let theme = use_signal(resolve_theme);
    let mut sync_mode = use_signal(|| SyncMode::LocalOnly);
    let mut sync_started = use_signal(|| false);

    // Start the sync driver (only once). Dropping the task on exit drops the
    // controller, which releases the subscription.
    use_effect(move || {
        if sync_started() {
            return;
        }
        sync_started.set(true); // Mark immediately to prevent double init

        let (sender, receiver) = mpsc::unbounded_channel();
        commands.set(Some(sender));
        let publish = move |next: NotesView| view.set(next);
        let settings = SyncSettings::default();

        let remote = resolve_store_config(load_bootstrap_config()).and_then(|config| {
            FirestoreNoteStore::new(config)
                .map_err(|e| tracing::error!("Failed to create Firestore client: {}", e))
                .ok()
        });

        if let Some(store) = remote {
            tracing::info!(
                "Syncing notes with Firestore project {}",
                store.config().project_id
            );
            sync_mode.set(SyncMode::Remote);
            spawn(run_sync(Arc::new(store), settings, receiver, publish));
        } else {
            tracing::warn!("No Firestore API key configured; notes are kept in memory only");
            sync_mode.set(SyncMode::LocalOnly);
            spawn(run_sync(
                Arc::new(MemoryNoteStore::new()),
                settings,
                receiver,
                publish,
            ));
        }
    });

    use_context_provider(|| AppState {
        view,
        commands,
        theme,
        sync_mode,
    });

    let current_theme = theme();
    let colors = current_theme.palette();

    rsx! {
        div {
            class: "app-container",
            "data-theme": "{current_theme.as_attr()}",
            style: "
                height: 100vh;
                margin: 0;
                font-family: system-ui, -apple-system, sans-serif;
                background: {colors.bg_primary};
                color: {colors.text_primary};
            ",
            Home {}
        }
    }
}
