//! Parsing of the lines typed into the shell.
use std::str::FromStr;
use tabnotes::errors::PreferenceError;
use tabnotes::{Note, NoteID, Theme};
use thiserror::Error;

pub static HELP: &str = "\
commands:
  new                   open a new note
  select <tab>          switch to a tab
  close <tab>           delete a tab's note
  rename <tab>          rename a tab's note
  edit <text>           replace the active note's text (\\n for a line break)
  append <text>         add a line to the active note
  theme <light|dark>    change the theme
  font-size <value>     change the font size
  font-family <value>   change the font family
  menu                  open or close the settings menu
  show                  redraw
  help                  show this help
  quit                  leave
<tab> is a tab number, starting at 1, or a note id.";

/// A tab given by note id or by its 1-based position in the strip.
///
/// Ids win over positions, so a note whose id happens to be a number stays addressable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabRef(String);

impl TabRef {
    pub fn resolve(&self, notes: &[Note]) -> NoteID {
        let wanted = NoteID::from(self.0.as_str());
        if notes.iter().any(|note| note.get_id() == &wanted) {
            return wanted;
        }
        self.0
            .parse::<usize>()
            .ok()
            .and_then(|position| position.checked_sub(1))
            .and_then(|index| notes.get(index))
            .map(|note| note.get_id().clone())
            .unwrap_or(wanted)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    New,
    Select(TabRef),
    Close(TabRef),
    Rename(TabRef),
    Edit(String),
    Append(String),
    Theme(Theme),
    FontSize(String),
    FontFamily(String),
    Menu,
    Show,
    Help,
    Quit,
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum CommandError {
    #[error("unknown command `{0}`")]
    Unknown(String),
    #[error("`{0}` needs an argument")]
    MissingArgument(&'static str),
    #[error(transparent)]
    Preference(#[from] PreferenceError),
}

fn unescape(text: &str) -> String {
    text.replace("\\n", "\n")
}

fn required(name: &'static str, argument: &str) -> Result<String, CommandError> {
    let argument = argument.trim();
    if argument.is_empty() {
        Err(CommandError::MissingArgument(name))
    } else {
        Ok(argument.to_owned())
    }
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim_start();
        let (name, argument) = line.split_once(' ').unwrap_or((line, ""));
        let command = match name {
            "new" => Command::New,
            "select" => Command::Select(TabRef(required("select", argument)?)),
            "close" => Command::Close(TabRef(required("close", argument)?)),
            "rename" => Command::Rename(TabRef(required("rename", argument)?)),
            // Text is taken as typed, including surrounding spaces
            "edit" => Command::Edit(unescape(argument)),
            "append" => Command::Append(unescape(argument)),
            "theme" => Command::Theme(required("theme", argument)?.parse()?),
            "font-size" => Command::FontSize(required("font-size", argument)?),
            "font-family" => Command::FontFamily(required("font-family", argument)?),
            "menu" => Command::Menu,
            "show" => Command::Show,
            "help" | "?" => Command::Help,
            "quit" | "exit" => Command::Quit,
            other => return Err(CommandError::Unknown(other.to_owned())),
        };
        Ok(command)
    }
}
