//! Note card component

use dioxus::prelude::*;

use crate::state::AppState;

/// A single note row rendered in the note list.
#[component]
pub fn NoteCard(
    title: String,
    is_selected: bool,
    onclick: EventHandler<MouseEvent>,
    ondelete: EventHandler<MouseEvent>,
) -> Element {
    let state = use_context::<AppState>();
    let colors = (state.theme)().palette();

    let bg = if is_selected {
        colors.bg_selected
    } else {
        colors.bg_secondary
    };
    let border_left = if is_selected {
        format!("3px solid {}", colors.accent)
    } else {
        "3px solid transparent".to_string()
    };

    rsx! {
        div {
            class: if is_selected { "note-item selected" } else { "note-item" },
            style: "
                display: flex;
                align-items: center;
                justify-content: space-between;
                padding: 12px 16px;
                border-bottom: 1px solid {colors.border};
                border-left: {border_left};
                cursor: pointer;
                background: {bg};
                transition: background 0.15s;
            ",
            onclick: move |evt| onclick.call(evt),

            div {
                class: "note-title",
                style: "
                    font-weight: 500;
                    overflow: hidden;
                    text-overflow: ellipsis;
                    white-space: nowrap;
                    color: {colors.text_primary};
                ",
                "{title}"
            }

            button {
                class: "delete-note",
                title: "Delete note",
                style: "
                    flex-shrink: 0;
                    margin-left: 8px;
                    border: none;
                    background: transparent;
                    color: {colors.danger};
                    font-size: 14px;
                    cursor: pointer;
                ",
                onclick: move |evt: MouseEvent| {
                    // Keep the row from treating this as a selection
                    evt.stop_propagation();
                    ondelete.call(evt);
                },
                "✕"
            }
        }
    }
}
