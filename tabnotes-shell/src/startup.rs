use crate::commands::{Command, HELP};
use crate::configuration::Settings;
use crate::console::{Console, ConsolePrompter, SharedConsole, TerminalRenderer};
use std::cell::RefCell;
use std::ffi::OsString;
use std::fs;
use std::io::{self, BufRead, Write};
use std::path::Path;
use std::rc::Rc;
use tabnotes::errors::StorageError;
use tabnotes::{
    EventResponse, FileStorage, NoteCollectionManager, Outcome, Preferences, Renderer, UiEvent,
};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StartupError {
    #[error("cannot open storage")]
    Storage(#[from] StorageError),
    #[error("console error")]
    Console(#[from] io::Error),
}

pub type ShellStorage = Rc<RefCell<FileStorage>>;
pub type ShellManager<I, O> =
    NoteCollectionManager<ShellStorage, TerminalRenderer<I, O>, ConsolePrompter<I, O>>;

/// Open the storage file, moving an unreadable one aside to `<path>.corrupt` and starting
/// afresh.
pub fn open_storage(path: &Path) -> Result<FileStorage, StorageError> {
    match FileStorage::open(path) {
        Err(StorageError::Corrupt(_)) => {
            let mut aside = OsString::from(path.as_os_str());
            aside.push(".corrupt");
            warn!(
                path = %path.display(),
                moved_to = ?aside,
                "storage file is corrupt, starting with empty storage"
            );
            fs::rename(path, &aside)?;
            FileStorage::open(path)
        }
        other => other,
    }
}

/// The page: notes, preferences and the settings menu, driven by typed commands.
pub struct Shell<I, O> {
    manager: ShellManager<I, O>,
    storage: ShellStorage,
    preferences: Preferences,
    menu_open: bool,
    console: SharedConsole<I, O>,
}

impl<I: BufRead, O: Write> Shell<I, O> {
    /// Load notes and preferences and draw the first screen.
    pub fn new(storage: FileStorage, console: SharedConsole<I, O>) -> Self {
        let storage = Rc::new(RefCell::new(storage));
        let preferences = Preferences::load(&storage);
        let mut manager = NoteCollectionManager::load(
            Rc::clone(&storage),
            TerminalRenderer::new(Rc::clone(&console)),
            ConsolePrompter::new(Rc::clone(&console)),
        );
        manager.renderer_mut().apply_preferences(&preferences);
        manager.refresh();
        Shell {
            manager,
            storage,
            preferences,
            menu_open: false,
            console,
        }
    }

    pub fn manager(&self) -> &ShellManager<I, O> {
        &self.manager
    }

    pub fn preferences(&self) -> &Preferences {
        &self.preferences
    }

    /// Read and execute commands until `quit` or end of input.
    pub fn run(&mut self) -> io::Result<()> {
        loop {
            self.print("> ")?;
            let line = self.console.borrow_mut().read_line()?;
            let Some(line) = line else {
                break;
            };
            if line.trim().is_empty() {
                continue;
            }
            match line.parse::<Command>() {
                Ok(Command::Quit) => break,
                Ok(command) => self.execute(command)?,
                Err(e) => self.say(&format!("{e}; type `help` for commands"))?,
            }
        }
        Ok(())
    }

    #[instrument(skip(self))]
    pub fn execute(&mut self, command: Command) -> io::Result<()> {
        match command {
            Command::New => {
                let response = self.manager.dispatch(UiEvent::NewNoteClicked);
                if response.focus_editor {
                    let title = self
                        .manager
                        .active_note()
                        .map(|note| note.get_title().to_owned())
                        .unwrap_or_default();
                    self.say(&format!("editing {title}"))?;
                }
            }
            Command::Select(tab) => {
                let id = tab.resolve(self.manager.notes());
                let response = self.manager.dispatch(UiEvent::TabClicked(id));
                self.report(&response)?;
            }
            Command::Close(tab) => {
                let id = tab.resolve(self.manager.notes());
                // The close control sits inside the tab, so the click reaches the tab next
                let responses = self.manager.dispatch_bubbling([
                    UiEvent::CloseClicked(id.clone()),
                    UiEvent::TabClicked(id),
                ]);
                for response in &responses {
                    self.report(response)?;
                }
            }
            Command::Rename(tab) => {
                let id = tab.resolve(self.manager.notes());
                let response = self.manager.dispatch(UiEvent::TabDoubleClicked(id));
                self.report(&response)?;
            }
            Command::Edit(text) => {
                self.manager.dispatch(UiEvent::KeyUp(text));
            }
            Command::Append(text) => {
                let current = self
                    .manager
                    .active_note()
                    .map(|note| note.get_content().to_owned())
                    .unwrap_or_default();
                let updated = if current.is_empty() {
                    text
                } else {
                    format!("{current}\n{text}")
                };
                self.manager.dispatch(UiEvent::KeyUp(updated));
            }
            Command::Theme(theme) => {
                let saved = self
                    .preferences
                    .set_theme(&mut *self.storage.borrow_mut(), theme);
                self.preferences_changed(saved)?;
            }
            Command::FontSize(size) => {
                let saved = self
                    .preferences
                    .set_font_size(&mut *self.storage.borrow_mut(), &size);
                self.preferences_changed(saved)?;
            }
            Command::FontFamily(family) => {
                let saved = self
                    .preferences
                    .set_font_family(&mut *self.storage.borrow_mut(), &family);
                self.preferences_changed(saved)?;
            }
            Command::Menu => {
                self.menu_open = !self.menu_open;
                if self.menu_open {
                    let panel = format!(
                        "settings\n  theme: {}\n  font-size: {}\n  font-family: {}",
                        self.preferences.theme,
                        self.preferences.font_size,
                        self.preferences.font_family
                    );
                    self.say(&panel)?;
                } else {
                    self.say("settings closed")?;
                }
            }
            Command::Show => self.manager.refresh(),
            Command::Help => self.say(HELP)?,
            Command::Quit => {}
        }
        Ok(())
    }

    fn preferences_changed(&mut self, saved: Result<(), StorageError>) -> io::Result<()> {
        match saved {
            Ok(()) => {
                self.manager.renderer_mut().apply_preferences(&self.preferences);
                Ok(())
            }
            Err(e) => {
                error!(error = ?e, "failed to save preference");
                self.say("could not save the preference")
            }
        }
    }

    fn report(&mut self, response: &EventResponse) -> io::Result<()> {
        match response.outcome {
            Outcome::Ignored => self.say("(nothing changed)"),
            Outcome::Declined => self.say("(kept)"),
            Outcome::Applied | Outcome::Refused => Ok(()),
        }
    }

    fn print(&mut self, text: &str) -> io::Result<()> {
        let mut console = self.console.borrow_mut();
        write!(console.output(), "{text}")?;
        console.output().flush()
    }

    fn say(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.console.borrow_mut().output(), "{text}")
    }
}

/// Open the configured storage and run a shell on `input` and `output`.
pub fn run<I: BufRead, O: Write>(
    settings: &Settings,
    input: I,
    output: O,
) -> Result<(), StartupError> {
    let storage = open_storage(Path::new(&settings.storagepath))?;
    info!(path = %settings.storagepath, "starting shell");
    let mut shell = Shell::new(storage, Console::shared(input, output));
    shell.run()?;
    Ok(())
}
