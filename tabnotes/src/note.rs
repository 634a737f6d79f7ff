//! Core types of Tabnotes.
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};
use uuid::Uuid;

/// ID of notes.
///
/// Within a note collection, a [`NoteID`] uniquely identifies a note for the whole
/// lifetime of that note.
/// IDs are compared by exact string equality.
#[derive(Debug, PartialEq, Eq, Serialize, Deserialize, Clone, Hash)]
#[serde(into = "String", from = "String")]
pub struct NoteID {
    id: String,
}

impl From<NoteID> for String {
    fn from(id: NoteID) -> String {
        id.id
    }
}

impl From<String> for NoteID {
    fn from(id: String) -> NoteID {
        NoteID::new(id)
    }
}

impl From<&str> for NoteID {
    fn from(id: &str) -> NoteID {
        NoteID::new(id.to_owned())
    }
}

impl NoteID {
    pub fn new(id: String) -> Self {
        NoteID { id }
    }

    /// Generate a new [`NoteID`].
    ///
    /// We use the UUID V4 scheme.
    pub fn generate() -> Self {
        NoteID::new(Uuid::new_v4().hyphenated().to_string())
    }
}

impl Display for NoteID {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id)
    }
}

impl AsRef<str> for NoteID {
    fn as_ref(&self) -> &str {
        &self.id
    }
}

/// One editable document.
///
/// This is also the serialized form of a note: `{"id": .., "title": .., "content": ..}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    id: NoteID,
    title: String,
    #[serde(default)]
    content: String,
}

impl Note {
    pub fn new(id: NoteID, title: String, content: String) -> Self {
        Note { id, title, content }
    }

    pub fn get_id(&self) -> &NoteID {
        &self.id
    }

    pub fn get_title(&self) -> &str {
        &self.title
    }

    pub fn get_content(&self) -> &str {
        &self.content
    }

    pub(crate) fn set_title(&mut self, title: String) {
        self.title = title;
    }

    pub(crate) fn set_content(&mut self, content: String) {
        self.content = content;
    }
}
