//! Application services
//!
//! Background sync driver shared by the UI components.

mod sync;

pub use sync::{run_sync, CommandReceiver, CommandSender, NotesView, UiCommand};
