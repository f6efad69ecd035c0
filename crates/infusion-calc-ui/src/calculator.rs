//! Interactive calculator session.
//!
//! Holds the selected drug and the raw text of the entry fields. Every
//! change recalculates from scratch; nothing but the inputs carries over.

use infusion_calc_core::catalog::{Catalog, CatalogError};
use infusion_calc_core::db::{Database, DbError};
use infusion_calc_core::engine::evaluate_text;
use infusion_calc_core::models::DrugRecord;
use thiserror::Error;

use crate::locale::{Language, Strings};
use crate::preferences::{Preferences, Theme};
use crate::render::{render, ResultView};

/// Session errors.
#[derive(Error, Debug)]
pub enum CalculatorError {
    #[error("Database error: {0}")]
    Database(#[from] DbError),

    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    #[error("Catalog has no drugs")]
    EmptyCatalog,

    #[error("No drug at position {0}")]
    NoSuchDrug(usize),
}

pub type CalculatorResult<T> = Result<T, CalculatorError>;

/// One calculator screen.
pub struct Calculator {
    catalog: Catalog,
    selected: usize,
    weight: String,
    rate: String,
    target_dose: String,
    preferences: Preferences,
    store: Option<Database>,
}

impl Calculator {
    /// Create a session over `catalog` with the first drug selected.
    pub fn new(catalog: Catalog, preferences: Preferences) -> CalculatorResult<Self> {
        if catalog.is_empty() {
            return Err(CalculatorError::EmptyCatalog);
        }
        Ok(Self {
            catalog,
            selected: 0,
            weight: String::new(),
            rate: String::new(),
            target_dose: String::new(),
            preferences,
            store: None,
        })
    }

    /// Create a session from a store: catalog and preferences come from it
    /// and preference changes are written back.
    pub fn from_store(db: Database) -> CalculatorResult<Self> {
        let catalog = db.load_catalog()?;
        let preferences = Preferences::load(&db)?;
        let mut calculator = Self::new(catalog, preferences)?;
        calculator.store = Some(db);
        Ok(calculator)
    }

    // =========================================================================
    // Inputs
    // =========================================================================

    /// Select a drug by catalog position.
    pub fn select_drug(&mut self, index: usize) -> CalculatorResult<ResultView> {
        if self.catalog.get(index).is_none() {
            return Err(CalculatorError::NoSuchDrug(index));
        }
        self.selected = index;
        Ok(self.view())
    }

    pub fn set_weight(&mut self, text: &str) -> ResultView {
        self.weight = text.to_string();
        self.view()
    }

    pub fn set_rate(&mut self, text: &str) -> ResultView {
        self.rate = text.to_string();
        self.view()
    }

    pub fn set_target_dose(&mut self, text: &str) -> ResultView {
        self.target_dose = text.to_string();
        self.view()
    }

    /// Empty all three entry fields and the result panel.
    pub fn clear_all(&mut self) -> ResultView {
        self.weight.clear();
        self.rate.clear();
        self.target_dose.clear();
        ResultView::cleared(self.selected_drug())
    }

    /// Recalculate from the current inputs.
    pub fn view(&self) -> ResultView {
        let drug = self.selected_drug();
        let outcome = evaluate_text(drug, &self.weight, &self.rate, &self.target_dose);
        render(drug, &outcome, self.preferences.language)
    }

    // =========================================================================
    // Preferences
    // =========================================================================

    /// Switch language and persist the choice.
    pub fn toggle_language(&mut self) -> CalculatorResult<Language> {
        self.preferences.language = self.preferences.language.toggle();
        self.persist()?;
        tracing::info!(language = self.preferences.language.code(), "language changed");
        Ok(self.preferences.language)
    }

    /// Switch theme and persist the choice.
    pub fn toggle_theme(&mut self) -> CalculatorResult<Theme> {
        self.preferences.theme = self.preferences.theme.toggle();
        self.persist()?;
        tracing::info!(theme = self.preferences.theme.code(), "theme changed");
        Ok(self.preferences.theme)
    }

    fn persist(&self) -> CalculatorResult<()> {
        if let Some(db) = &self.store {
            self.preferences.save(db)?;
        }
        Ok(())
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn selected_drug(&self) -> &DrugRecord {
        // `new` rejects empty catalogs and `select_drug` checks bounds
        &self.catalog.drugs()[self.selected]
    }

    pub fn selected_index(&self) -> usize {
        self.selected
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn preferences(&self) -> Preferences {
        self.preferences
    }

    pub fn strings(&self) -> &'static Strings {
        self.preferences.language.strings()
    }

    /// Raw text of (weight, rate, target dose).
    pub fn inputs(&self) -> (&str, &str, &str) {
        (&self.weight, &self.rate, &self.target_dose)
    }
}
