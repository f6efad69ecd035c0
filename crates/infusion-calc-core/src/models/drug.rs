//! Drug catalog record.

use serde::{Deserialize, Serialize};

/// A single drug formulation from the catalog.
///
/// Concentration is expressed so that `rate (mL/h) * concentration / 1000`
/// yields the mass rate in mg/h, i.e. mcg per mL.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DrugRecord {
    /// Display name
    pub name: String,
    /// Mass per mL of infused solution
    pub concentration: f64,
    /// Display unit for the concentration (e.g., "mcg/mL")
    pub unit: String,
    /// Lower bound of the recommended dose, mg/kg/h
    #[serde(alias = "minDose")]
    pub min_dose: f64,
    /// Upper bound of the recommended dose, mg/kg/h
    #[serde(alias = "maxDose")]
    pub max_dose: f64,
}

impl DrugRecord {
    /// Create a new drug record.
    pub fn new(
        name: impl Into<String>,
        concentration: f64,
        unit: impl Into<String>,
        min_dose: f64,
        max_dose: f64,
    ) -> Self {
        Self {
            name: name.into(),
            concentration,
            unit: unit.into(),
            min_dose,
            max_dose,
        }
    }

    /// Check the record for values the engine cannot sensibly work with.
    ///
    /// The engine never calls this; catalog loaders do.
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("name is empty".into());
        }
        if !self.concentration.is_finite() || self.concentration <= 0.0 {
            return Err(format!(
                "concentration must be a positive number, got {}",
                self.concentration
            ));
        }
        if !self.min_dose.is_finite() || !self.max_dose.is_finite() {
            return Err("dose range must be finite".into());
        }
        if self.min_dose > self.max_dose {
            return Err(format!(
                "min_dose {} exceeds max_dose {}",
                self.min_dose, self.max_dose
            ));
        }
        Ok(())
    }
}
