use lazy_static::lazy_static;
use serde_json::Value;
use std::path::PathBuf;
use tabnotes_shell::configuration::Settings;
use tabnotes_shell::startup::run;
use tabnotes_shell::telemetry::{get_subscriber, init_tracing};
use tempfile::TempDir;
use tracing_subscriber::fmt::TestWriter;

lazy_static! {
    static ref TRACING: () = {
        let settings = Settings {
            storagepath: String::new(),
            debug: true,
        };
        init_tracing(get_subscriber(&settings, TestWriter::new()));
    };
}

/// A shell whose storage lives in its own temporary directory.
pub struct TestShell {
    pub dir: TempDir,
    pub settings: Settings,
}

impl TestShell {
    pub fn new() -> Self {
        lazy_static::initialize(&TRACING);
        let dir = TempDir::new().expect("Failed to create a temporary directory");
        let settings = Settings {
            storagepath: dir.path().join("tabnotes.json").display().to_string(),
            debug: true,
        };
        TestShell { dir, settings }
    }

    pub fn storage_path(&self) -> PathBuf {
        PathBuf::from(&self.settings.storagepath)
    }

    /// Run one session fed with `script` and return everything it printed.
    pub fn session(&self, script: &str) -> String {
        let mut output = Vec::new();
        run(&self.settings, script.as_bytes(), &mut output).expect("Shell session failed");
        String::from_utf8(output).expect("Shell printed invalid UTF-8")
    }

    /// The storage file, parsed.
    pub fn stored(&self) -> Value {
        let raw = std::fs::read_to_string(self.storage_path()).expect("Failed to read storage");
        serde_json::from_str(&raw).expect("Failed to parse storage")
    }

    /// The stored notes, parsed out of the `notes` key.
    pub fn stored_notes(&self) -> Vec<Value> {
        let notes = self.stored()["notes"]
            .as_str()
            .expect("notes should be stored as a string")
            .to_owned();
        serde_json::from_str(&notes).expect("Failed to parse stored notes")
    }

    pub fn stored_titles(&self) -> Vec<String> {
        self.stored_notes()
            .iter()
            .map(|note| note["title"].as_str().unwrap_or_default().to_owned())
            .collect()
    }
}
