//! Translating classified UI events into manager operations.
//!
//! Frontends classify raw input (which element was hit, which key was released) into a
//! [`UiEvent`] before anything reaches the manager; the manager never sees toolkit events.
use crate::manager::{NoteCollectionManager, Outcome};
use crate::storage::KeyValueStorage;
use crate::ui::{Prompter, Renderer};
use crate::NoteID;
use tracing::trace;

pub static RENAME_PROMPT: &str = "Enter a new name for the note:";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    /// The "new note" control was clicked.
    NewNoteClicked,
    /// A tab was clicked outside its close control.
    TabClicked(NoteID),
    /// The close control embedded in a tab was clicked.
    CloseClicked(NoteID),
    /// A tab was double-clicked.
    TabDoubleClicked(NoteID),
    /// A key was released in the edit surface, which now holds the given text.
    KeyUp(String),
}

/// What the frontend has to do after an event was handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventResponse {
    pub outcome: Outcome,
    /// Enclosing elements must not see this event.
    pub stop_propagation: bool,
    /// Move input focus to the edit surface.
    pub focus_editor: bool,
}

impl EventResponse {
    fn new(outcome: Outcome) -> Self {
        EventResponse {
            outcome,
            stop_propagation: false,
            focus_editor: false,
        }
    }
}

impl<S, R, P> NoteCollectionManager<S, R, P>
where
    S: KeyValueStorage,
    R: Renderer,
    P: Prompter,
{
    /// Handle one event.
    pub fn dispatch(&mut self, event: UiEvent) -> EventResponse {
        trace!(?event, "dispatching");
        match event {
            UiEvent::NewNoteClicked => {
                self.create_note();
                EventResponse {
                    focus_editor: true,
                    ..EventResponse::new(Outcome::Applied)
                }
            }
            UiEvent::TabClicked(id) => EventResponse::new(self.select_note(&id)),
            UiEvent::CloseClicked(id) => EventResponse {
                stop_propagation: true,
                ..EventResponse::new(self.delete_note(&id))
            },
            UiEvent::TabDoubleClicked(id) => EventResponse::new(self.rename_flow(&id)),
            UiEvent::KeyUp(text) => {
                let active = self.active_id().clone();
                EventResponse::new(self.update_content(&active, &text))
            }
        }
    }

    /// Handle an event on its way from the innermost element outwards.
    ///
    /// `path` lists what each element along the way would receive, innermost first. Dispatch
    /// stops after the first handler that stops propagation.
    pub fn dispatch_bubbling<I>(&mut self, path: I) -> Vec<EventResponse>
    where
        I: IntoIterator<Item = UiEvent>,
    {
        let mut responses = Vec::new();
        for event in path {
            let response = self.dispatch(event);
            responses.push(response);
            if response.stop_propagation {
                break;
            }
        }
        responses
    }

    fn rename_flow(&mut self, id: &NoteID) -> Outcome {
        let Some(current) = self.get(id).map(|note| note.get_title().to_owned()) else {
            return Outcome::Ignored;
        };
        match self.prompter_mut().prompt(RENAME_PROMPT, &current) {
            Some(title) => self.rename_note(id, &title),
            None => Outcome::Ignored,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::{populate_test_data, RecordingRenderer, ScriptedPrompter};
    use crate::{MemoryStorage, Note};

    type Manager = NoteCollectionManager<MemoryStorage, RecordingRenderer, ScriptedPrompter>;

    fn manager(titles: &[&str], active: usize, prompter: ScriptedPrompter) -> Manager {
        let mut storage = MemoryStorage::new();
        populate_test_data(&mut storage, titles, active).unwrap();
        NoteCollectionManager::load(storage, RecordingRenderer::default(), prompter)
    }

    fn id(s: &str) -> NoteID {
        NoteID::from(s)
    }

    #[test]
    fn new_note_focuses_editor() {
        let mut m = manager(&["A", "B"], 0, ScriptedPrompter::new());
        let response = m.dispatch(UiEvent::NewNoteClicked);
        assert!(response.focus_editor);
        assert_eq!(response.outcome, Outcome::Applied);
        assert_eq!(m.active_note().unwrap().get_title(), "Untitled Note 3");
    }

    #[test]
    fn tab_click_selects() {
        let mut m = manager(&["A", "B"], 0, ScriptedPrompter::new());
        let response = m.dispatch(UiEvent::TabClicked(id("note-1")));
        assert_eq!(response.outcome, Outcome::Applied);
        assert!(!response.stop_propagation);
        assert_eq!(m.active_id(), &id("note-1"));
    }

    #[test]
    fn close_click_does_not_reach_tab() {
        let mut m = manager(&["A", "B", "C"], 2, ScriptedPrompter::new().then_confirm(false));
        let path = [UiEvent::CloseClicked(id("note-0")), UiEvent::TabClicked(id("note-0"))];
        let responses = m.dispatch_bubbling(path);
        assert_eq!(responses.len(), 1);
        assert_eq!(responses[0].outcome, Outcome::Declined);
        assert!(responses[0].stop_propagation);
        // Had the click reached the tab, note-0 would now be active
        assert_eq!(m.active_id(), &id("note-2"));
    }

    #[test]
    fn close_click_deletes() {
        let mut m = manager(&["A", "B"], 0, ScriptedPrompter::new().then_confirm(true));
        let responses = m.dispatch_bubbling([
            UiEvent::CloseClicked(id("note-0")),
            UiEvent::TabClicked(id("note-0")),
        ]);
        assert_eq!(responses.len(), 1);
        assert_eq!(m.notes().iter().map(Note::get_title).collect::<Vec<_>>(), vec!["B"]);
        assert_eq!(m.active_id(), &id("note-1"));
    }

    #[test]
    fn tab_click_bubbles_to_the_end() {
        let mut m = manager(&["A", "B"], 0, ScriptedPrompter::new());
        let responses = m.dispatch_bubbling([
            UiEvent::TabClicked(id("note-1")),
            UiEvent::TabClicked(id("note-1")),
        ]);
        assert_eq!(responses.len(), 2);
        assert_eq!(responses[1].outcome, Outcome::Ignored);
    }

    #[test]
    fn double_click_renames_with_prefilled_prompt() {
        let mut m = manager(&["A", "B"], 0, ScriptedPrompter::new().then_answer(Some("  Plans ")));
        let response = m.dispatch(UiEvent::TabDoubleClicked(id("note-1")));
        assert_eq!(response.outcome, Outcome::Applied);
        assert_eq!(m.get(&id("note-1")).unwrap().get_title(), "Plans");
        assert_eq!(
            m.prompter().prompts_asked,
            vec![(RENAME_PROMPT.to_owned(), "B".to_owned())]
        );
    }

    #[test]
    fn cancelled_rename_prompt() {
        let mut m = manager(&["A"], 0, ScriptedPrompter::new().then_answer(None));
        let response = m.dispatch(UiEvent::TabDoubleClicked(id("note-0")));
        assert_eq!(response.outcome, Outcome::Ignored);
        assert_eq!(m.get(&id("note-0")).unwrap().get_title(), "A");
    }

    #[test]
    fn double_click_on_unknown_tab_does_not_prompt() {
        let mut m = manager(&["A"], 0, ScriptedPrompter::new().then_answer(Some("X")));
        m.dispatch(UiEvent::TabDoubleClicked(id("gone")));
        assert!(m.prompter().prompts_asked.is_empty());
    }

    #[test]
    fn key_up_updates_active_note_only() {
        let mut m = manager(&["A", "B"], 1, ScriptedPrompter::new());
        let response = m.dispatch(UiEvent::KeyUp("typed".to_owned()));
        assert_eq!(response.outcome, Outcome::Applied);
        assert_eq!(m.get(&id("note-1")).unwrap().get_content(), "typed");
        assert_eq!(m.get(&id("note-0")).unwrap().get_content(), "body of A");
        assert!(m.renderer().renders.is_empty());
    }
}
