//! Note list component

use dioxus::prelude::*;

use super::NoteCard;
use crate::state::AppState;

/// Maximum characters of a note title shown in the list
const TITLE_MAX_CHARS: usize = 40;

/// Notes ordered by most recent edit
#[component]
pub fn NoteList() -> Element {
    let state = use_context::<AppState>();
    let view = (state.view)();
    let current_id = view.current_id.clone();

    rsx! {
        div {
            class: "note-list",
            style: "flex: 1; overflow-y: auto;",

            for note in view.notes {
                {
                    let is_selected = current_id.as_ref() == Some(&note.id);
                    let title = note.title(TITLE_MAX_CHARS);
                    let select_id = note.id.clone();
                    let delete_id = note.id.clone();

                    rsx! {
                        NoteCard {
                            key: "{note.id}",
                            title,
                            is_selected,
                            onclick: move |_| state.select_note(select_id.clone()),
                            ondelete: move |_| state.delete_note(delete_id.clone()),
                        }
                    }
                }
            }
        }
    }
}
