//! Interfaces of the user-facing collaborators: the renderer and the prompter.
use crate::preferences::Preferences;
use crate::{Note, NoteID};

/// One entry of the tab strip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabView<'a> {
    pub id: &'a NoteID,
    pub title: &'a str,
    pub active: bool,
}

/// A read-only view of the collection, handed to the [`Renderer`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct View<'a> {
    pub tabs: Vec<TabView<'a>>,
    /// Content of the active note, for the edit surface.
    pub editor_text: &'a str,
}

impl<'a> View<'a> {
    pub fn new(notes: &'a [Note], active: &NoteID) -> Self {
        let tabs = notes
            .iter()
            .map(|note| TabView {
                id: note.get_id(),
                title: note.get_title(),
                active: note.get_id() == active,
            })
            .collect();
        let editor_text = notes
            .iter()
            .find(|note| note.get_id() == active)
            .map(Note::get_content)
            .unwrap_or("");
        View { tabs, editor_text }
    }
}

/// Draws the tab strip and the edit surface.
pub trait Renderer {
    /// Redraw everything from `view`.
    fn render(&mut self, view: &View<'_>);
    /// Apply display preferences. Renderers without styling can ignore them.
    fn apply_preferences(&mut self, _preferences: &Preferences) {}
}

/// Synchronous dialogs.
pub trait Prompter {
    /// Show a blocking warning.
    fn alert(&mut self, message: &str);
    /// Ask a yes/no question.
    fn confirm(&mut self, message: &str) -> bool;
    /// Ask for a line of text, pre-filled with `default`. `None` means cancelled.
    fn prompt(&mut self, message: &str, default: &str) -> Option<String>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn view_marks_active_tab() {
        let notes = vec![
            Note::new("a".into(), "A".to_owned(), "first".to_owned()),
            Note::new("b".into(), "B".to_owned(), "second".to_owned()),
        ];
        let view = View::new(&notes, &NoteID::from("b"));
        let active: Vec<bool> = view.tabs.iter().map(|t| t.active).collect();
        assert_eq!(active, vec![false, true]);
        assert_eq!(view.editor_text, "second");
    }

    #[test]
    fn view_without_active_note_has_empty_editor() {
        let notes = vec![Note::new("a".into(), "A".to_owned(), "first".to_owned())];
        let view = View::new(&notes, &NoteID::from("gone"));
        assert_eq!(view.editor_text, "");
        assert!(view.tabs.iter().all(|t| !t.active));
    }
}
