//! File-backed storage.
use super::KeyValueStorage;
use crate::errors::StorageError;
use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Key-value storage persisted as a single JSON object on disk.
///
/// The whole object is kept in memory and rewritten on every change.
/// Writes go to a sibling temporary file which then replaces the real one, so a crash never
/// leaves a half-written file behind.
/// The file is only created on the first write.
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    items: BTreeMap<String, String>,
}

impl FileStorage {
    /// Open the storage file at `path`.
    ///
    /// A missing or empty file is an empty storage.
    /// A file that is not a UTF-8 JSON object of strings gives [`StorageError::Corrupt`].
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StorageError> {
        let path = path.as_ref().to_path_buf();
        let items: BTreeMap<String, String> = match fs::read(&path) {
            Ok(bytes) if bytes.iter().all(u8::is_ascii_whitespace) => BTreeMap::new(),
            Ok(bytes) => serde_json::from_slice(&bytes)
                .map_err(|_| StorageError::Corrupt(path.display().to_string()))?,
            Err(e) if e.kind() == io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(e.into()),
        };
        debug!(path = %path.display(), keys = items.len(), "opened storage file");
        Ok(FileStorage { path, items })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temporary_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    fn flush(&self) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let serialized = serde_json::to_string_pretty(&self.items)?;
        let tmp = self.temporary_path();
        let mut file = File::create(&tmp)?;
        file.write_all(serialized.as_bytes())?;
        file.sync_all()?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl KeyValueStorage for FileStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.items.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let previous = self.items.insert(key.to_owned(), value.to_owned());
        if let Err(e) = self.flush() {
            // Keep memory and disk in agreement
            match previous {
                Some(v) => self.items.insert(key.to_owned(), v),
                None => self.items.remove(key),
            };
            return Err(e);
        }
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> Result<(), StorageError> {
        if let Some(previous) = self.items.remove(key) {
            if let Err(e) = self.flush() {
                self.items.insert(key.to_owned(), previous);
                return Err(e);
            }
        }
        Ok(())
    }
}
