//! UI Components
//!
//! Reusable UI components for the desktop application.

mod empty_state;
mod note_card;
mod note_editor;
mod note_list;
mod sidebar;

pub use empty_state::EmptyState;
pub use note_card::NoteCard;
pub use note_editor::NoteEditor;
pub use note_list::NoteList;
pub use sidebar::Sidebar;
