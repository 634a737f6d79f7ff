//! Persistent store adapter: the serialized form of the note collection.
use super::KeyValueStorage;
use crate::errors::StorageError;
use crate::{Note, NoteID};
use tracing::warn;

/// Key of the JSON array of notes, in tab order.
pub static NOTES_KEY: &str = "notes";
/// Key of the raw id string of the active note.
pub static ACTIVE_NOTE_ID_KEY: &str = "activeNoteId";

/// Reads and writes the note collection and the active note id on a storage medium.
///
/// Reading never fails: anything that cannot be read back is reported as absent.
#[derive(Debug)]
pub struct PersistentStore<S> {
    storage: S,
}

impl<S: KeyValueStorage> PersistentStore<S> {
    pub fn new(storage: S) -> Self {
        PersistentStore { storage }
    }

    /// Get the stored notes.
    ///
    /// Returns `None` when the key is absent, unreadable, malformed, or holds an empty array.
    pub fn load_notes(&self) -> Option<Vec<Note>> {
        let raw = match self.storage.get_item(NOTES_KEY) {
            Ok(raw) => raw?,
            Err(e) => {
                warn!(error = ?e, "cannot read stored notes");
                return None;
            }
        };
        match serde_json::from_str::<Vec<Note>>(&raw) {
            Ok(notes) if !notes.is_empty() => Some(notes),
            Ok(_) => None,
            Err(e) => {
                warn!(error = %e, "stored notes are malformed, ignoring them");
                None
            }
        }
    }

    /// Get the stored active note id, if any.
    ///
    /// Whether the id refers to an existing note is for the caller to check.
    pub fn load_active_id(&self) -> Option<NoteID> {
        match self.storage.get_item(ACTIVE_NOTE_ID_KEY) {
            Ok(id) => id.map(NoteID::from),
            Err(e) => {
                warn!(error = ?e, "cannot read stored active note id");
                None
            }
        }
    }

    /// Write the collection and the active id.
    ///
    /// If the active id cannot be written, the previous collection is put back so that storage
    /// never pairs a new collection with a stale active id.
    pub fn save(&mut self, notes: &[Note], active: &NoteID) -> Result<(), StorageError> {
        let serialized = serde_json::to_string(notes)?;
        let previous = self.storage.get_item(NOTES_KEY)?;
        self.storage.set_item(NOTES_KEY, &serialized)?;
        if let Err(e) = self.storage.set_item(ACTIVE_NOTE_ID_KEY, active.as_ref()) {
            let restored = match previous {
                Some(previous) => self.storage.set_item(NOTES_KEY, &previous),
                None => self.storage.remove_item(NOTES_KEY),
            };
            if let Err(restore_error) = restored {
                warn!(error = ?restore_error, "cannot restore stored notes");
            }
            return Err(e);
        }
        Ok(())
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }
}
