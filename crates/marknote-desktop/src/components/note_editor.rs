//! Note editor component

use dioxus::prelude::*;

use marknote_core::NoteId;

use crate::state::AppState;

/// Plain text markdown editor bound to the sync driver's edit buffer
#[component]
pub fn NoteEditor() -> Element {
    let state = use_context::<AppState>();
    let colors = (state.theme)().palette();

    // Local copy of the buffer so keystrokes never wait on the driver
    let mut content = use_signal(String::new);
    let mut loaded_from = use_signal(|| None::<NoteId>);

    // Reload when the driver switches the current note
    use_effect(move || {
        let view = (state.view)();
        if view.current_id != *loaded_from.peek() {
            content.set(view.buffer);
            loaded_from.set(view.current_id);
        }
    });

    let on_input = move |evt: Event<FormData>| {
        let text = evt.value();
        content.set(text.clone());
        state.edit_buffer(text);
    };

    rsx! {
        div {
            class: "editor",
            style: "
                flex: 1;
                display: flex;
                flex-direction: column;
                background: {colors.bg_primary};
            ",

            textarea {
                class: "note-body",
                style: "
                    flex: 1;
                    padding: 20px;
                    border: none;
                    outline: none;
                    resize: none;
                    font-family: ui-monospace, SFMono-Regular, Menlo, monospace;
                    font-size: 14px;
                    line-height: 1.6;
                    background: {colors.bg_primary};
                    color: {colors.text_primary};
                ",
                spellcheck: "false",
                value: "{content}",
                oninput: on_input,
            }
        }
    }
}
