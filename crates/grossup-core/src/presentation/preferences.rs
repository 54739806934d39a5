use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::fmt;
use std::str::FromStr;

use super::locale::Language;
use crate::error::FeeError;
use crate::FeeResult;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(&self) -> Theme {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Theme::Light => f.write_str("light"),
            Theme::Dark => f.write_str("dark"),
        }
    }
}

impl FromStr for Theme {
    type Err = FeeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" | "day" => Ok(Theme::Light),
            "dark" | "night" => Ok(Theme::Dark),
            other => Err(FeeError::InvalidInput {
                field: "theme".into(),
                reason: format!("Unsupported theme '{other}'. Use: light, dark"),
            }),
        }
    }
}

/// User display preferences persisted across sessions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
    pub language: Language,
    pub theme: Theme,
}

/// Persistence for [`Preferences`]. Injected into the presentation layer
/// rather than read from ambient global state.
pub trait PreferenceStore {
    /// Stored preferences, or defaults when nothing has been saved yet.
    fn load(&self) -> FeeResult<Preferences>;
    fn save(&self, prefs: &Preferences) -> FeeResult<()>;

    /// Load, apply `f`, save, and return the updated preferences.
    fn update(&self, f: impl FnOnce(&mut Preferences)) -> FeeResult<Preferences>
    where
        Self: Sized,
    {
        let mut prefs = self.load()?;
        f(&mut prefs);
        self.save(&prefs)?;
        Ok(prefs)
    }
}

/// Non-persistent store, for tests and embedding.
#[derive(Debug, Default)]
pub struct MemoryPreferenceStore {
    inner: RefCell<Option<Preferences>>,
}

impl MemoryPreferenceStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreferenceStore for MemoryPreferenceStore {
    fn load(&self) -> FeeResult<Preferences> {
        Ok(self.inner.borrow().unwrap_or_default())
    }

    fn save(&self, prefs: &Preferences) -> FeeResult<()> {
        *self.inner.borrow_mut() = Some(*prefs);
        Ok(())
    }
}
