//! The terminal stand-ins for the page: a renderer and a prompter sharing one console.
use std::cell::RefCell;
use std::io::{self, BufRead, Write};
use std::rc::Rc;
use tabnotes::{Preferences, Prompter, Renderer, View};

static RULE: &str = "----------------------------------------";

/// Line-oriented input and output.
pub struct Console<I, O> {
    input: I,
    output: O,
}

pub type SharedConsole<I, O> = Rc<RefCell<Console<I, O>>>;

impl<I: BufRead, O: Write> Console<I, O> {
    pub fn new(input: I, output: O) -> Self {
        Console { input, output }
    }

    pub fn shared(input: I, output: O) -> SharedConsole<I, O> {
        Rc::new(RefCell::new(Console::new(input, output)))
    }

    /// Read one line without its line terminator. `None` at end of input.
    pub fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let trimmed = line.trim_end_matches(['\n', '\r']).len();
        line.truncate(trimmed);
        Ok(Some(line))
    }

    pub fn output(&mut self) -> &mut O {
        &mut self.output
    }

    pub fn written(&self) -> &O {
        &self.output
    }
}

/// Draws the tab strip on one line and the active note below it.
pub struct TerminalRenderer<I, O> {
    console: SharedConsole<I, O>,
}

impl<I: BufRead, O: Write> TerminalRenderer<I, O> {
    pub fn new(console: SharedConsole<I, O>) -> Self {
        TerminalRenderer { console }
    }

    fn draw(&mut self, view: &View<'_>) -> io::Result<()> {
        let strip: Vec<String> = view
            .tabs
            .iter()
            .enumerate()
            .map(|(i, tab)| {
                let marker = if tab.active { "*" } else { "" };
                format!("[{}{}] {}", i + 1, marker, tab.title)
            })
            .collect();
        let mut console = self.console.borrow_mut();
        let out = console.output();
        writeln!(out, "{}", strip.join("  "))?;
        writeln!(out, "{RULE}")?;
        if !view.editor_text.is_empty() {
            writeln!(out, "{}", view.editor_text)?;
        }
        writeln!(out, "{RULE}")?;
        out.flush()
    }
}

impl<I: BufRead, O: Write> Renderer for TerminalRenderer<I, O> {
    fn render(&mut self, view: &View<'_>) {
        if let Err(e) = self.draw(view) {
            error!(error = %e, "failed to draw notes");
        }
    }

    fn apply_preferences(&mut self, preferences: &Preferences) {
        let mut console = self.console.borrow_mut();
        if let Err(e) = writeln!(
            console.output(),
            "style: {} | font-size: {} | font-family: {}",
            preferences.theme.body_class(),
            preferences.font_size,
            preferences.font_family
        ) {
            error!(error = %e, "failed to apply preferences");
        }
    }
}

/// Asks questions on the console and reads the answers from it.
///
/// End of input counts as declining or cancelling.
pub struct ConsolePrompter<I, O> {
    console: SharedConsole<I, O>,
}

impl<I: BufRead, O: Write> ConsolePrompter<I, O> {
    pub fn new(console: SharedConsole<I, O>) -> Self {
        ConsolePrompter { console }
    }

    fn ask(&mut self, question: &str) -> Option<String> {
        let mut console = self.console.borrow_mut();
        let asked = write!(console.output(), "{question} ").and_then(|_| console.output().flush());
        if let Err(e) = asked {
            error!(error = %e, "failed to ask");
            return None;
        }
        match console.read_line() {
            Ok(answer) => answer,
            Err(e) => {
                error!(error = %e, "failed to read answer");
                None
            }
        }
    }
}

impl<I: BufRead, O: Write> Prompter for ConsolePrompter<I, O> {
    fn alert(&mut self, message: &str) {
        let mut console = self.console.borrow_mut();
        if let Err(e) = writeln!(console.output(), "! {message}") {
            error!(error = %e, "failed to show alert");
        }
    }

    fn confirm(&mut self, message: &str) -> bool {
        self.ask(&format!("{message} [y/N]"))
            .map(|answer| matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
            .unwrap_or(false)
    }

    /// An empty answer accepts the pre-filled text.
    fn prompt(&mut self, message: &str, default: &str) -> Option<String> {
        let answer = self.ask(&format!("{message} [{default}]"))?;
        if answer.is_empty() {
            Some(default.to_owned())
        } else {
            Some(answer)
        }
    }
}
