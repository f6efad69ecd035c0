//! Calculation output models.

use serde::{Deserialize, Serialize};

/// Equivalent rate and dose values for one infusion.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct CalculationResult {
    /// Volumetric rate, mL/h
    pub ml_per_hour: f64,
    /// Mass rate, mg/h
    pub mg_per_hour: f64,
    /// Weight-normalized dose, mg/kg/h
    pub mg_per_kg_per_hour: f64,
    /// Weight-normalized dose, mcg/kg/h
    pub ug_per_kg_per_hour: f64,
    /// Weight-normalized dose, mcg/kg/min
    pub ug_per_kg_per_minute: f64,
}

/// Which entry field drove the calculation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum InputBasis {
    /// Computed from the infusion rate
    Rate,
    /// Computed from the target dose
    Dose,
}

/// Position of a dose relative to the recommended range.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RangeStatus {
    Below,
    Within,
    Above,
}

/// A successful calculation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Calculation {
    pub result: CalculationResult,
    /// `min_dose <= mg/kg/h <= max_dose`
    pub in_range: bool,
    pub basis: InputBasis,
    pub range_status: RangeStatus,
}

impl Calculation {
    /// Whether the clinician should see an out-of-range warning.
    pub fn needs_warning(&self) -> bool {
        !self.in_range
    }
}

impl RangeStatus {
    /// Classify a mg/kg/h dose against `[min, max]`.
    ///
    /// NaN anywhere never yields `Within`.
    pub fn classify(dose: f64, min: f64, max: f64) -> Self {
        if dose >= min && dose <= max {
            RangeStatus::Within
        } else if dose > max {
            RangeStatus::Above
        } else {
            RangeStatus::Below
        }
    }
}
