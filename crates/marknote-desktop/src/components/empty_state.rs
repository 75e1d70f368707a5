//! Placeholder shown when the collection has no notes

use dioxus::prelude::*;

use crate::state::AppState;

#[component]
pub fn EmptyState() -> Element {
    let state = use_context::<AppState>();
    let colors = (state.theme)().palette();

    rsx! {
        div {
            class: "no-notes",
            style: "
                display: flex;
                flex-direction: column;
                height: 100vh;
                align-items: center;
                justify-content: center;
                gap: 16px;
            ",

            h1 {
                style: "font-size: 22px; font-weight: 600; color: {colors.text_secondary};",
                "You have no notes"
            }

            button {
                class: "first-note",
                style: "
                    padding: 10px 20px;
                    border: none;
                    border-radius: 6px;
                    background: {colors.accent};
                    color: {colors.accent_text};
                    font-size: 14px;
                    cursor: pointer;
                ",
                onclick: move |_| state.create_note(),
                "Create one now"
            }
        }
    }
}
