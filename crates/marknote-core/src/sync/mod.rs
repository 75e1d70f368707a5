//! Synchronization between local editing state and the remote store.

mod controller;
mod debounce;
pub mod derive;

pub use controller::{
    NoteSyncController, Reaction, SyncEvent, SyncSettings, DEFAULT_QUIET_PERIOD,
};
pub use debounce::DebounceTimer;
