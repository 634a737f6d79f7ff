//! The note collection and its active-note pointer.
use crate::storage::{KeyValueStorage, PersistentStore};
use crate::sync::{SyncEffect, Synchronizer};
use crate::ui::{Prompter, Renderer};
use crate::{Note, NoteID};
use std::collections::HashSet;
use tracing::{debug, info, instrument, warn};

/// Title of the note synthesized when storage holds nothing usable.
pub static DEFAULT_TITLE: &str = "Untitled Note";
pub static LAST_NOTE_WARNING: &str = "You cannot delete the last note.";
pub static DELETE_CONFIRMATION: &str = "Are you sure you want to delete this note?";

/// Which path an operation took.
///
/// None of these are errors; they let callers tell a change from a no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The state changed and was synchronized.
    Applied,
    /// The input was invalid or redundant (unknown id, blank title, already active).
    Ignored,
    /// The user declined the confirmation.
    Declined,
    /// A guard refused the operation and the user was warned.
    Refused,
}

/// Owner of the notes and of the active note id.
///
/// The collection is never empty, ids are unique, and the active id always names a note in the
/// collection.
/// All mutation goes through the methods below, and each one persists before returning.
pub struct NoteCollectionManager<S, R, P> {
    notes: Vec<Note>,
    active: NoteID,
    sync: Synchronizer<S, R>,
    prompter: P,
}

/// Drop notes whose id already appeared earlier in the list.
fn dedup_ids(notes: Vec<Note>) -> Vec<Note> {
    let mut seen = HashSet::new();
    let before = notes.len();
    let notes: Vec<Note> = notes
        .into_iter()
        .filter(|note| seen.insert(note.get_id().clone()))
        .collect();
    if notes.len() != before {
        warn!(dropped = before - notes.len(), "stored notes had duplicate ids");
    }
    notes
}

impl<S, R, P> NoteCollectionManager<S, R, P>
where
    S: KeyValueStorage,
    R: Renderer,
    P: Prompter,
{
    /// Restore the collection from `storage`.
    ///
    /// If storage has no usable notes, a single empty "Untitled Note" is created, made active
    /// and persisted right away.
    /// A stored active id that names no note falls back to the first note.
    pub fn load(storage: S, renderer: R, prompter: P) -> Self {
        let sync = Synchronizer::new(PersistentStore::new(storage), renderer);
        let mut manager = NoteCollectionManager {
            notes: Vec::new(),
            active: NoteID::from(""),
            sync,
            prompter,
        };
        manager.reload();
        manager
    }

    fn reload(&mut self) {
        let store = self.sync.store();
        let restored = store.load_notes().map(dedup_ids).and_then(|notes| {
            let first = notes.first()?.get_id().clone();
            Some((notes, first))
        });
        match restored {
            Some((notes, first)) => {
                let active = store
                    .load_active_id()
                    .filter(|id| notes.iter().any(|note| note.get_id() == id))
                    .unwrap_or(first);
                info!(notes = notes.len(), active = %active, "restored notes");
                self.notes = notes;
                self.active = active;
            }
            None => {
                let note = Note::new(NoteID::generate(), DEFAULT_TITLE.to_owned(), String::new());
                info!(note_id = %note.get_id(), "no stored notes, starting with an empty note");
                self.active = note.get_id().clone();
                self.notes = vec![note];
                self.synchronize(SyncEffect::PersistOnly);
            }
        }
    }

    /// Create an empty note at the end of the tab strip and make it active.
    ///
    /// The title counts the notes currently open, so titles can repeat after deletions.
    #[instrument(skip(self))]
    pub fn create_note(&mut self) -> NoteID {
        let title = format!("{} {}", DEFAULT_TITLE, self.notes.len() + 1);
        let note = Note::new(self.fresh_id(), title, String::new());
        let id = note.get_id().clone();
        self.notes.push(note);
        self.active = id.clone();
        debug!(note_id = %id, "created note");
        self.synchronize(SyncEffect::PersistAndRender);
        id
    }

    #[instrument(skip(self, id), fields(note_id = %id))]
    pub fn select_note(&mut self, id: &NoteID) -> Outcome {
        if &self.active == id || self.position(id).is_none() {
            return Outcome::Ignored;
        }
        self.active = id.clone();
        debug!("selected note");
        self.synchronize(SyncEffect::PersistAndRender);
        Outcome::Applied
    }

    /// Set the title to `new_title` with surrounding whitespace removed.
    /// A title that is blank after trimming is ignored.
    #[instrument(skip(self, id, new_title), fields(note_id = %id))]
    pub fn rename_note(&mut self, id: &NoteID, new_title: &str) -> Outcome {
        let title = new_title.trim();
        if title.is_empty() {
            return Outcome::Ignored;
        }
        let Some(index) = self.position(id) else {
            return Outcome::Ignored;
        };
        self.notes[index].set_title(title.to_owned());
        debug!(title, "renamed note");
        self.synchronize(SyncEffect::PersistAndRender);
        Outcome::Applied
    }

    /// Replace the content of a note. Persists without redrawing.
    #[instrument(skip(self, id, new_content), fields(note_id = %id, len = new_content.len()))]
    pub fn update_content(&mut self, id: &NoteID, new_content: &str) -> Outcome {
        let Some(index) = self.position(id) else {
            return Outcome::Ignored;
        };
        self.notes[index].set_content(new_content.to_owned());
        self.synchronize(SyncEffect::PersistOnly);
        Outcome::Applied
    }

    /// Delete a note after asking the user.
    ///
    /// The last remaining note can't be deleted. Deleting the active note makes the first
    /// remaining note active.
    #[instrument(skip(self, id), fields(note_id = %id))]
    pub fn delete_note(&mut self, id: &NoteID) -> Outcome {
        if self.notes.len() <= 1 {
            self.prompter.alert(LAST_NOTE_WARNING);
            return Outcome::Refused;
        }
        let Some(index) = self.position(id) else {
            return Outcome::Ignored;
        };
        if !self.prompter.confirm(DELETE_CONFIRMATION) {
            return Outcome::Declined;
        }
        let removed = self.notes.remove(index);
        if removed.get_id() == &self.active {
            if let Some(first) = self.notes.first() {
                self.active = first.get_id().clone();
            }
        }
        debug!(active = %self.active, "deleted note");
        self.synchronize(SyncEffect::PersistAndRender);
        Outcome::Applied
    }

    /// Draw the current state without changing it, e.g. for the first paint after loading.
    pub fn refresh(&mut self) {
        self.sync.render(&self.notes, &self.active);
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    /// Never true once loaded.
    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    pub fn active_id(&self) -> &NoteID {
        &self.active
    }

    pub fn active_note(&self) -> Option<&Note> {
        self.get(&self.active)
    }

    pub fn get(&self, id: &NoteID) -> Option<&Note> {
        self.notes.iter().find(|note| note.get_id() == id)
    }

    pub fn renderer(&self) -> &R {
        self.sync.renderer()
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        self.sync.renderer_mut()
    }

    pub fn prompter(&self) -> &P {
        &self.prompter
    }

    pub(crate) fn prompter_mut(&mut self) -> &mut P {
        &mut self.prompter
    }

    fn position(&self, id: &NoteID) -> Option<usize> {
        self.notes.iter().position(|note| note.get_id() == id)
    }

    /// A v4 UUID that is not already in the collection.
    fn fresh_id(&self) -> NoteID {
        loop {
            let id = NoteID::generate();
            if self.position(&id).is_none() {
                return id;
            }
        }
    }

    fn synchronize(&mut self, effect: SyncEffect) {
        self.sync.apply(effect, &self.notes, &self.active);
    }
}
