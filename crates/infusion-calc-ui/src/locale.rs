//! Localized UI strings.

use serde::{Deserialize, Serialize};

/// Display language.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// Finnish
    #[default]
    Fi,
    /// English
    En,
}

/// Warning texts.
#[derive(Debug)]
pub struct WarningStrings {
    pub enter_weight: &'static str,
    pub enter_rate_or_dose: &'static str,
    pub out_of_range: &'static str,
}

/// All labels for one language.
#[derive(Debug)]
pub struct Strings {
    pub title: &'static str,
    pub drug: &'static str,
    pub weight: &'static str,
    pub rate: &'static str,
    pub target_dose: &'static str,
    pub or: &'static str,
    pub calculated_rate: &'static str,
    pub calculated_doses: &'static str,
    pub recommended: &'static str,
    pub clear_all: &'static str,
    pub warnings: WarningStrings,
}

static FI: Strings = Strings {
    title: "Infuusiolaskuri",
    drug: "Lääke",
    weight: "Paino",
    rate: "Nopeus",
    target_dose: "Tavoitettu annos",
    or: "tai",
    calculated_rate: "Laskettu nopeus",
    calculated_doses: "Laskettu annokset",
    recommended: "Suositus",
    clear_all: "Tyhjennä kaikki",
    warnings: WarningStrings {
        enter_weight: "Syötä paino",
        enter_rate_or_dose: "Syötä nopeus tai annos",
        out_of_range: "Annos on suosituksen ulkopuolella",
    },
};

static EN: Strings = Strings {
    title: "Infusion Calculator",
    drug: "Drug",
    weight: "Weight",
    rate: "Rate",
    target_dose: "Target dose",
    or: "or",
    calculated_rate: "Calculated rate",
    calculated_doses: "Calculated doses",
    recommended: "Recommended range",
    clear_all: "Clear all",
    warnings: WarningStrings {
        enter_weight: "Enter weight",
        enter_rate_or_dose: "Enter rate or dose",
        out_of_range: "Dose is outside the recommended range",
    },
};

impl Language {
    /// String table for this language.
    pub fn strings(self) -> &'static Strings {
        match self {
            Language::Fi => &FI,
            Language::En => &EN,
        }
    }

    /// The other language.
    pub fn toggle(self) -> Self {
        match self {
            Language::Fi => Language::En,
            Language::En => Language::Fi,
        }
    }

    /// Lowercase code ("fi", "en").
    pub fn code(self) -> &'static str {
        match self {
            Language::Fi => "fi",
            Language::En => "en",
        }
    }

    /// Label for the language toggle button.
    pub fn label(self) -> String {
        self.code().to_uppercase()
    }

    /// Parse a language code, case-insensitive.
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_lowercase().as_str() {
            "fi" => Some(Language::Fi),
            "en" => Some(Language::En),
            _ => None,
        }
    }
}
