//! Display preferences: theme, font size and font family.
use crate::errors::{PreferenceError, StorageError};
use crate::storage::KeyValueStorage;
use std::fmt::{self, Display};
use std::str::FromStr;
use tracing::{debug, warn};

pub static THEME_KEY: &str = "theme";
pub static FONT_SIZE_KEY: &str = "font-size";
pub static FONT_FAMILY_KEY: &str = "font-family";

pub static DEFAULT_FONT_SIZE: &str = "large";
pub static DEFAULT_FONT_FAMILY: &str = "system-ui";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    /// Name of the style class applied to the page body.
    pub fn body_class(&self) -> String {
        format!("body-{}", self.as_str())
    }
}

impl FromStr for Theme {
    type Err = PreferenceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            _ => Err(PreferenceError::UnknownTheme(s.to_owned())),
        }
    }
}

impl Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preferences {
    pub theme: Theme,
    pub font_size: String,
    pub font_family: String,
}

impl Default for Preferences {
    fn default() -> Self {
        Preferences {
            theme: Theme::default(),
            font_size: DEFAULT_FONT_SIZE.to_owned(),
            font_family: DEFAULT_FONT_FAMILY.to_owned(),
        }
    }
}

/// Read a non-empty value, treating read errors as absence.
fn read_value(storage: &impl KeyValueStorage, key: &str) -> Option<String> {
    match storage.get_item(key) {
        Ok(value) => value.filter(|v| !v.is_empty()),
        Err(e) => {
            warn!(key, error = ?e, "cannot read preference");
            None
        }
    }
}

impl Preferences {
    /// Load preferences, using the default for anything absent or unrecognized.
    pub fn load(storage: &impl KeyValueStorage) -> Self {
        let defaults = Preferences::default();
        let theme = match read_value(storage, THEME_KEY).map(|t| t.parse::<Theme>()) {
            Some(Ok(theme)) => theme,
            Some(Err(e)) => {
                warn!(error = %e, "ignoring stored theme");
                defaults.theme
            }
            None => defaults.theme,
        };
        Preferences {
            theme,
            font_size: read_value(storage, FONT_SIZE_KEY).unwrap_or(defaults.font_size),
            font_family: read_value(storage, FONT_FAMILY_KEY).unwrap_or(defaults.font_family),
        }
    }

    pub fn set_theme(
        &mut self,
        storage: &mut impl KeyValueStorage,
        theme: Theme,
    ) -> Result<(), StorageError> {
        storage.set_item(THEME_KEY, theme.as_str())?;
        debug!(%theme, "theme changed");
        self.theme = theme;
        Ok(())
    }

    pub fn set_font_size(
        &mut self,
        storage: &mut impl KeyValueStorage,
        size: &str,
    ) -> Result<(), StorageError> {
        storage.set_item(FONT_SIZE_KEY, size)?;
        debug!(size, "font size changed");
        self.font_size = size.to_owned();
        Ok(())
    }

    pub fn set_font_family(
        &mut self,
        storage: &mut impl KeyValueStorage,
        family: &str,
    ) -> Result<(), StorageError> {
        storage.set_item(FONT_FAMILY_KEY, family)?;
        debug!(family, "font family changed");
        self.font_family = family.to_owned();
        Ok(())
    }
}
