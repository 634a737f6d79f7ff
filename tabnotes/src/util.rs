//! Test doubles for the user-facing collaborators, and storage seeding.
use crate::errors::StorageError;
use crate::preferences::Preferences;
use crate::storage::{KeyValueStorage, ACTIVE_NOTE_ID_KEY, NOTES_KEY};
use crate::ui::{Prompter, Renderer, View};
use crate::{Note, NoteID};
use std::collections::VecDeque;

/// An owned copy of one tab, as it was drawn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedTab {
    pub id: NoteID,
    pub title: String,
    pub active: bool,
}

/// An owned copy of a [`View`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedView {
    pub tabs: Vec<RenderedTab>,
    pub editor_text: String,
}

impl RenderedView {
    pub fn titles(&self) -> Vec<&str> {
        self.tabs.iter().map(|t| t.title.as_str()).collect()
    }

    pub fn active_tab(&self) -> Option<&RenderedTab> {
        self.tabs.iter().find(|t| t.active)
    }
}

impl From<&View<'_>> for RenderedView {
    fn from(view: &View<'_>) -> Self {
        RenderedView {
            tabs: view
                .tabs
                .iter()
                .map(|t| RenderedTab {
                    id: t.id.clone(),
                    title: t.title.to_owned(),
                    active: t.active,
                })
                .collect(),
            editor_text: view.editor_text.to_owned(),
        }
    }
}

/// Renderer that records everything it is asked to draw.
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    pub renders: Vec<RenderedView>,
    pub preferences: Vec<Preferences>,
}

impl RecordingRenderer {
    pub fn last(&self) -> Option<&RenderedView> {
        self.renders.last()
    }
}

impl Renderer for RecordingRenderer {
    fn render(&mut self, view: &View<'_>) {
        self.renders.push(view.into());
    }

    fn apply_preferences(&mut self, preferences: &Preferences) {
        self.preferences.push(preferences.clone());
    }
}

/// Prompter that answers from a script and records the questions it was asked.
///
/// Once the script runs out, confirmations are declined and prompts are cancelled.
#[derive(Debug, Default)]
pub struct ScriptedPrompter {
    confirmations: VecDeque<bool>,
    answers: VecDeque<Option<String>>,
    pub alerts: Vec<String>,
    pub confirmations_asked: Vec<String>,
    pub prompts_asked: Vec<(String, String)>,
}

impl ScriptedPrompter {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn then_confirm(mut self, answer: bool) -> Self {
        self.confirmations.push_back(answer);
        self
    }

    pub fn then_answer(mut self, answer: Option<&str>) -> Self {
        self.answers.push_back(answer.map(str::to_owned));
        self
    }
}

impl Prompter for ScriptedPrompter {
    fn alert(&mut self, message: &str) {
        self.alerts.push(message.to_owned());
    }

    fn confirm(&mut self, message: &str) -> bool {
        self.confirmations_asked.push(message.to_owned());
        self.confirmations.pop_front().unwrap_or(false)
    }

    fn prompt(&mut self, message: &str, default: &str) -> Option<String> {
        self.prompts_asked
            .push((message.to_owned(), default.to_owned()));
        self.answers.pop_front().flatten()
    }
}

/// Write a collection of notes titled `titles`, with ids `note-0`, `note-1`, ..., straight to
/// storage, with `note-<active>` as the active note.
pub fn populate_test_data(
    storage: &mut impl KeyValueStorage,
    titles: &[&str],
    active: usize,
) -> Result<Vec<Note>, StorageError> {
    let notes: Vec<Note> = titles
        .iter()
        .enumerate()
        .map(|(i, title)| {
            Note::new(
                NoteID::new(format!("note-{i}")),
                (*title).to_owned(),
                format!("body of {title}"),
            )
        })
        .collect();
    storage.set_item(NOTES_KEY, &serde_json::to_string(&notes)?)?;
    storage.set_item(ACTIVE_NOTE_ID_KEY, &format!("note-{active}"))?;
    Ok(notes)
}
