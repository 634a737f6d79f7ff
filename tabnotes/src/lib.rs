//! Tabnotes: tabbed plain-text notes backed by a key-value store.
pub mod binding;
pub mod errors;
pub mod manager;
pub mod note;
pub mod preferences;
pub mod storage;
pub mod sync;
pub mod ui;
#[cfg(test)]
mod util;

pub use binding::{EventResponse, UiEvent};
pub use manager::{NoteCollectionManager, Outcome};
pub use note::{Note, NoteID};
pub use preferences::{Preferences, Theme};
pub use storage::{FileStorage, KeyValueStorage, MemoryStorage, PersistentStore};
pub use ui::{Prompter, Renderer, View};
