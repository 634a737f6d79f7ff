use thiserror::Error;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("io error")]
    IOError(#[from] std::io::Error),
    #[error("serde error")]
    SerdeError(#[from] serde_json::Error),
    #[error("storage file `{0}` is not a JSON object of strings")]
    Corrupt(String),
    #[error("writing `{key}` needs {needed} bytes, but the quota is {quota} bytes")]
    QuotaExceeded {
        key: String,
        needed: usize,
        quota: usize,
    },
}

/// Error type for parsing display preferences.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum PreferenceError {
    #[error("theme `{0}` is not supported")]
    UnknownTheme(String),
}
