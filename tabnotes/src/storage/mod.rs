//! Storage media for notes and preferences.
use crate::errors::StorageError;
use std::cell::RefCell;
use std::rc::Rc;

mod file;
mod memory;
mod persist;

pub use file::FileStorage;
pub use memory::MemoryStorage;
pub use persist::{PersistentStore, ACTIVE_NOTE_ID_KEY, NOTES_KEY};

/// An abstraction for key-value storage media.
///
/// Keys and values are plain strings.
/// Every call is synchronous: once `set_item` returns `Ok`, the value is durable as far as the
/// medium is concerned.
pub trait KeyValueStorage {
    /// Get the value stored under `key`, or `None` if the key was never written.
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;
    /// Store `value` under `key`, replacing any previous value.
    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
    /// Remove `key`. Removing an absent key is not an error.
    fn remove_item(&mut self, key: &str) -> Result<(), StorageError>;
}

/// A shared handle, so that the note manager and the preferences can write to the same medium.
impl<S: KeyValueStorage> KeyValueStorage for Rc<RefCell<S>> {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.borrow().get_item(key)
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.borrow_mut().set_item(key, value)
    }

    fn remove_item(&mut self, key: &str) -> Result<(), StorageError> {
        self.borrow_mut().remove_item(key)
    }
}

impl<S: KeyValueStorage + ?Sized> KeyValueStorage for &mut S {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get_item(key)
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set_item(key, value)
    }

    fn remove_item(&mut self, key: &str) -> Result<(), StorageError> {
        (**self).remove_item(key)
    }
}
