//! Home view - main application screen

use dioxus::prelude::*;

use crate::components::{EmptyState, NoteEditor, Sidebar};
use crate::state::AppState;

/// Sidebar share of the window width, in percent
const SIDEBAR_WIDTH_PCT: u32 = 30;

/// Home view component - split layout once notes exist, empty state otherwise
#[component]
pub fn Home() -> Element {
    let state = use_context::<AppState>();
    let view = (state.view)();
    let colors = (state.theme)().palette();

    if !view.loaded {
        return rsx! {
            div {
                class: "loading",
                style: "
                    display: flex;
                    height: 100vh;
                    align-items: center;
                    justify-content: center;
                    color: {colors.text_muted};
                ",
                "Loading notes..."
            }
        };
    }

    if view.notes.is_empty() {
        return rsx! { EmptyState {} };
    }

    let editor_width = 100 - SIDEBAR_WIDTH_PCT;

    rsx! {
        div {
            class: "split",
            style: "display: flex; height: 100vh;",

            div {
                style: "width: {SIDEBAR_WIDTH_PCT}%; min-width: 180px; display: flex;",
                Sidebar {}
            }

            div {
                style: "
                    width: {editor_width}%;
                    display: flex;
                    border-left: 1px solid {colors.border};
                ",
                NoteEditor {}
            }
        }
    }
}
