//! Light/dark/ambient appearance preference.

use std::fmt;
use std::str::FromStr;

use crate::error::{StorageError, ValidationError};
use crate::storage::KeyValueStore;

/// Storage key holding the theme name.
pub const THEME_KEY: &str = "calendme_theme";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    Light,
    Dark,
    /// Follows the time of day. Used when nothing has been chosen yet.
    #[default]
    Ambient,
}

impl Theme {
    pub const ALL: [Theme; 3] = [Theme::Light, Theme::Dark, Theme::Ambient];

    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
            Theme::Ambient => "ambient",
        }
    }

    /// light -> dark -> ambient -> light
    pub fn next(self) -> Theme {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Ambient,
            Theme::Ambient => Theme::Light,
        }
    }

    /// Stored preference. Absent or unrecognised values give the default.
    pub fn load<S: KeyValueStore>(storage: &S) -> Result<Theme, StorageError> {
        let saved = storage.get(THEME_KEY)?;
        Ok(saved.and_then(|s| s.parse().ok()).unwrap_or_default())
    }

    pub fn save<S: KeyValueStore>(self, storage: &mut S) -> Result<(), StorageError> {
        storage.set(THEME_KEY, self.as_str())
    }

    /// Advance the stored preference and return the new theme.
    pub fn cycle<S: KeyValueStore>(storage: &mut S) -> Result<Theme, StorageError> {
        let next = Theme::load(&*storage)?.next();
        next.save(storage)?;
        Ok(next)
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Theme::ALL
            .into_iter()
            .find(|t| t.as_str() == s.trim())
            .ok_or_else(|| ValidationError::InvalidValue {
                field: "theme".into(),
                message: format!("unknown theme '{s}'"),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    #[test]
    fn defaults_to_ambient_when_unset() {
        let storage = MemoryStorage::new();
        assert_eq!(Theme::load(&storage).unwrap(), Theme::Ambient);
    }

    #[test]
    fn cycle_walks_all_themes_and_persists() {
        let mut storage = MemoryStorage::new();
        Theme::Light.save(&mut storage).unwrap();

        assert_eq!(Theme::cycle(&mut storage).unwrap(), Theme::Dark);
        assert_eq!(Theme::cycle(&mut storage).unwrap(), Theme::Ambient);
        assert_eq!(Theme::cycle(&mut storage).unwrap(), Theme::Light);
        assert_eq!(storage.get(THEME_KEY).unwrap().as_deref(), Some("light"));
    }

    #[test]
    fn unknown_stored_value_is_treated_as_unset() {
        let mut storage = MemoryStorage::new();
        storage.set(THEME_KEY, "sepia").unwrap();
        assert_eq!(Theme::load(&storage).unwrap(), Theme::Ambient);
        assert_eq!(Theme::cycle(&mut storage).unwrap(), Theme::Light);
    }
}
