//! Infusion-Calc Core Library
//!
//! Offline clinical infusion-rate calculator: converts between volumetric
//! rate, mass rate and weight-normalized dose for a selected drug and flags
//! doses outside the drug's recommended range.
//!
//! # Architecture
//!
//! ```text
//!   Drug catalog ──► select one DrugRecord
//!                          │
//!   weight / rate / dose text ──► parse ──► CalculationInput
//!                          │
//!                          ▼
//!                  ┌───────────────────┐
//!                  │  engine::evaluate │  pure, stateless
//!                  └─────────┬─────────┘
//!                            │
//!            ┌───────────────┴───────────────┐
//!            ▼                               ▼
//!   Calculation { result, in_range }   ValidationError
//!            │                         (MissingWeight | MissingRateOrDose)
//!            ▼
//!   FormattedResult (fixed decimals) ──► presentation layer
//! ```
//!
//! # Modules
//!
//! - [`models`]: Domain types (DrugRecord, CalculationInput, Calculation)
//! - [`engine`]: Dose conversion engine and display formatting
//! - [`catalog`]: Ordered, read-only drug catalog with fuzzy lookup
//! - [`db`]: SQLite storage for the catalog and user preferences

pub mod catalog;
pub mod db;
pub mod engine;
pub mod models;

// Re-export commonly used types
pub use catalog::{Catalog, CatalogError, DrugMatch};
pub use db::Database;
pub use engine::{
    evaluate, evaluate_text, number_text, to_fixed, FormattedResult, ValidationError,
};
pub use models::{
    Calculation, CalculationInput, CalculationResult, DrugRecord, InputBasis, RangeStatus,
};

// UniFFI setup - using proc macros
uniffi::setup_scaffolding!();

use std::sync::{Arc, Mutex};

// =========================================================================
// FFI Error Type
// =========================================================================

#[derive(Debug, thiserror::Error, uniffi::Error)]
pub enum InfusionCalcError {
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid catalog: {0}")]
    InvalidCatalog(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl From<db::DbError> for InfusionCalcError {
    fn from(e: db::DbError) -> Self {
        InfusionCalcError::DatabaseError(e.to_string())
    }
}

impl From<catalog::CatalogError> for InfusionCalcError {
    fn from(e: catalog::CatalogError) -> Self {
        InfusionCalcError::InvalidCatalog(e.to_string())
    }
}

impl<T> From<std::sync::PoisonError<T>> for InfusionCalcError {
    fn from(e: std::sync::PoisonError<T>) -> Self {
        InfusionCalcError::DatabaseError(format!("Lock poisoned: {}", e))
    }
}

// =========================================================================
// Stateless Functions (exported to FFI)
// =========================================================================

/// Evaluate one infusion from the raw text of the entry fields.
#[uniffi::export]
pub fn evaluate_infusion(
    drug: FfiDrugRecord,
    weight: String,
    rate: String,
    target_dose: String,
) -> FfiEvaluation {
    let drug: DrugRecord = drug.into();
    evaluate_text(&drug, &weight, &rate, &target_dose).into()
}

/// Format a number with a fixed count of decimals (at most 100).
#[uniffi::export]
pub fn format_fixed(value: f64, decimals: u32) -> Result<String, InfusionCalcError> {
    let decimals = decimals as usize;
    if decimals > engine::MAX_FIXED_DECIMALS {
        return Err(InfusionCalcError::InvalidInput(format!(
            "decimals must be between 0 and {}, got {}",
            engine::MAX_FIXED_DECIMALS,
            decimals
        )));
    }
    Ok(to_fixed(value, decimals))
}

/// Parse and validate a JSON catalog without storing it.
#[uniffi::export]
pub fn parse_catalog_json(json: String) -> Result<Vec<FfiDrugRecord>, InfusionCalcError> {
    let catalog = Catalog::from_json(&json)?;
    Ok(catalog.into_iter().map(|d| d.into()).collect())
}

// =========================================================================
// Factory Functions (exported to FFI)
// =========================================================================

/// Open or create a store at the given path.
#[uniffi::export]
pub fn open_store(path: String) -> Result<Arc<InfusionCalcCore>, InfusionCalcError> {
    let db = Database::open(&path)?;
    Ok(Arc::new(InfusionCalcCore {
        db: Arc::new(Mutex::new(db)),
    }))
}

/// Create an in-memory store (for testing).
#[uniffi::export]
pub fn open_store_in_memory() -> Result<Arc<InfusionCalcCore>, InfusionCalcError> {
    let db = Database::open_in_memory()?;
    Ok(Arc::new(InfusionCalcCore {
        db: Arc::new(Mutex::new(db)),
    }))
}

// =========================================================================
// Main API Object
// =========================================================================

/// Thread-safe store wrapper for FFI.
#[derive(uniffi::Object)]
pub struct InfusionCalcCore {
    db: Arc<Mutex<Database>>,
}

#[uniffi::export]
impl InfusionCalcCore {
    // =========================================================================
    // Catalog Operations
    // =========================================================================

    /// Replace the stored catalog with a JSON array of drugs.
    pub fn import_catalog_json(&self, json: String) -> Result<u32, InfusionCalcError> {
        let catalog = Catalog::from_json(&json)?;
        let db = self.db.lock()?;
        db.replace_catalog(&catalog)?;
        Ok(catalog.len() as u32)
    }

    /// All drugs in selection order.
    pub fn list_drugs(&self) -> Result<Vec<FfiDrugRecord>, InfusionCalcError> {
        let db = self.db.lock()?;
        let catalog = db.load_catalog()?;
        Ok(catalog.into_iter().map(|d| d.into()).collect())
    }

    /// Get a drug by selection position.
    pub fn get_drug(&self, position: u32) -> Result<Option<FfiDrugRecord>, InfusionCalcError> {
        let db = self.db.lock()?;
        let drug = db.get_drug(position as usize)?;
        Ok(drug.map(|d| d.into()))
    }

    /// Fingerprint of the stored catalog.
    pub fn catalog_fingerprint(&self) -> Result<Option<String>, InfusionCalcError> {
        let db = self.db.lock()?;
        Ok(db.catalog_fingerprint()?)
    }

    // =========================================================================
    // Calculation
    // =========================================================================

    /// Evaluate an infusion for the drug at `position`.
    pub fn evaluate(
        &self,
        position: u32,
        weight: String,
        rate: String,
        target_dose: String,
    ) -> Result<FfiEvaluation, InfusionCalcError> {
        let db = self.db.lock()?;
        let drug = db
            .get_drug(position as usize)?
            .ok_or_else(|| InfusionCalcError::NotFound(format!("drug at position {}", position)))?;
        Ok(evaluate_text(&drug, &weight, &rate, &target_dose).into())
    }

    // =========================================================================
    // Preferences
    // =========================================================================

    /// Get a stored preference.
    pub fn get_preference(&self, key: String) -> Result<Option<String>, InfusionCalcError> {
        let db = self.db.lock()?;
        Ok(db.get_preference(&key)?)
    }

    /// Store a preference.
    pub fn set_preference(&self, key: String, value: String) -> Result<(), InfusionCalcError> {
        let db = self.db.lock()?;
        db.set_preference(&key, &value)?;
        Ok(())
    }
}

// =========================================================================
// FFI Types
// =========================================================================

/// FFI-safe drug record.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiDrugRecord {
    pub name: String,
    pub concentration: f64,
    pub unit: String,
    pub min_dose: f64,
    pub max_dose: f64,
}

impl From<DrugRecord> for FfiDrugRecord {
    fn from(drug: DrugRecord) -> Self {
        Self {
            name: drug.name,
            concentration: drug.concentration,
            unit: drug.unit,
            min_dose: drug.min_dose,
            max_dose: drug.max_dose,
        }
    }
}

impl From<FfiDrugRecord> for DrugRecord {
    fn from(drug: FfiDrugRecord) -> Self {
        DrugRecord {
            name: drug.name,
            concentration: drug.concentration,
            unit: drug.unit,
            min_dose: drug.min_dose,
            max_dose: drug.max_dose,
        }
    }
}

/// FFI-safe calculation result, raw and formatted.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiCalculation {
    pub ml_per_hour: f64,
    pub mg_per_hour: f64,
    pub mg_per_kg_per_hour: f64,
    pub ug_per_kg_per_hour: f64,
    pub ug_per_kg_per_minute: f64,
    pub formatted: FfiFormattedResult,
    pub in_range: bool,
    /// "rate" or "dose"
    pub basis: String,
}

/// FFI-safe formatted values.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiFormattedResult {
    pub ml_per_hour: String,
    pub mg_per_hour: String,
    pub mg_per_kg_per_hour: String,
    pub ug_per_kg_per_hour: String,
    pub ug_per_kg_per_minute: String,
}

impl From<FormattedResult> for FfiFormattedResult {
    fn from(f: FormattedResult) -> Self {
        Self {
            ml_per_hour: f.ml_per_hour,
            mg_per_hour: f.mg_per_hour,
            mg_per_kg_per_hour: f.mg_per_kg_per_hour,
            ug_per_kg_per_hour: f.ug_per_kg_per_hour,
            ug_per_kg_per_minute: f.ug_per_kg_per_minute,
        }
    }
}

impl From<Calculation> for FfiCalculation {
    fn from(calc: Calculation) -> Self {
        let r = calc.result;
        Self {
            ml_per_hour: r.ml_per_hour,
            mg_per_hour: r.mg_per_hour,
            mg_per_kg_per_hour: r.mg_per_kg_per_hour,
            ug_per_kg_per_hour: r.ug_per_kg_per_hour,
            ug_per_kg_per_minute: r.ug_per_kg_per_minute,
            formatted: FormattedResult::from(&r).into(),
            in_range: calc.in_range,
            basis: match calc.basis {
                InputBasis::Rate => "rate".into(),
                InputBasis::Dose => "dose".into(),
            },
        }
    }
}

/// FFI-safe evaluation outcome.
#[derive(Debug, Clone, uniffi::Enum)]
pub enum FfiEvaluation {
    MissingWeight,
    MissingRateOrDose,
    Success { calculation: FfiCalculation },
}

impl From<Result<Calculation, ValidationError>> for FfiEvaluation {
    fn from(outcome: Result<Calculation, ValidationError>) -> Self {
        match outcome {
            Ok(calc) => FfiEvaluation::Success {
                calculation: calc.into(),
            },
            Err(ValidationError::MissingWeight) => FfiEvaluation::MissingWeight,
            Err(ValidationError::MissingRateOrDose) => FfiEvaluation::MissingRateOrDose,
        }
    }
}
