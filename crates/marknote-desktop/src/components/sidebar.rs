//! Sidebar component with the note list

use dioxus::prelude::*;

use super::NoteList;
use crate::state::{AppState, SyncMode};

/// Sidebar with the create button and every note
#[component]
pub fn Sidebar() -> Element {
    let state = use_context::<AppState>();
    let colors = (state.theme)().palette();
    let mode_label = match (state.sync_mode)() {
        SyncMode::Remote => "Synced",
        SyncMode::LocalOnly => "Local only",
    };

    rsx! {
        aside {
            class: "sidebar",
            style: "
                display: flex;
                flex-direction: column;
                flex: 1;
                background: {colors.bg_secondary};
                overflow: hidden;
            ",

            div {
                class: "sidebar-header",
                style: "
                    display: flex;
                    align-items: center;
                    justify-content: space-between;
                    padding: 16px;
                    border-bottom: 1px solid {colors.border};
                ",

                h2 {
                    style: "margin: 0; font-size: 18px; font-weight: 600;",
                    "Notes"
                }

                button {
                    class: "add-note",
                    title: "New note",
                    style: "
                        width: 28px;
                        height: 28px;
                        border: none;
                        border-radius: 6px;
                        background: {colors.accent};
                        color: {colors.accent_text};
                        font-size: 18px;
                        line-height: 1;
                        cursor: pointer;
                    ",
                    onclick: move |_| state.create_note(),
                    "+"
                }
            }

            NoteList {}

            div {
                class: "sync-mode",
                style: "
                    padding: 8px 16px;
                    font-size: 11px;
                    color: {colors.text_muted};
                    border-top: 1px solid {colors.border};
                ",
                "{mode_label}"
            }
        }
    }
}
