//! User preferences (language and theme).

use infusion_calc_core::db::{Database, DbResult};
use serde::{Deserialize, Serialize};

use crate::locale::Language;

/// Preference key for the display language.
pub const LANGUAGE_KEY: &str = "lang";

/// Preference key for the color theme.
pub const THEME_KEY: &str = "theme";

/// Color theme.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggle(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_lowercase().as_str() {
            "light" => Some(Theme::Light),
            "dark" => Some(Theme::Dark),
            _ => None,
        }
    }
}

/// Display preferences, passed explicitly to rendering.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Preferences {
    pub language: Language,
    pub theme: Theme,
}

impl Preferences {
    /// Load from the store, falling back to defaults for missing or unknown values.
    pub fn load(db: &Database) -> DbResult<Self> {
        let language = db
            .get_preference(LANGUAGE_KEY)?
            .and_then(|code| Language::from_code(&code))
            .unwrap_or_default();
        let theme = db
            .get_preference(THEME_KEY)?
            .and_then(|code| Theme::from_code(&code))
            .unwrap_or_default();
        Ok(Self { language, theme })
    }

    /// Write both preferences to the store.
    pub fn save(&self, db: &Database) -> DbResult<()> {
        db.set_preference(LANGUAGE_KEY, self.language.code())?;
        db.set_preference(THEME_KEY, self.theme.code())?;
        Ok(())
    }
}
