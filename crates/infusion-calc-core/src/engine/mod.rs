//! Dose conversion engine.
//!
//! Converts between volumetric rate (mL/h), mass rate (mg/h) and
//! weight-normalized dose (mg/kg/h, mcg/kg/h, mcg/kg/min) for one drug and
//! flags doses outside the drug's recommended range.
//!
//! Pipeline: Weight check → Rate or Target dose → Derived doses → Range check

mod format;

pub use format::*;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::{
    Calculation, CalculationInput, CalculationResult, DrugRecord, InputBasis, RangeStatus,
};

/// Micrograms per milligram.
pub const UG_PER_MG: f64 = 1000.0;

/// Minutes per hour.
pub const MINUTES_PER_HOUR: f64 = 60.0;

/// Validation failures. Neither carries data; callers map the kind to a message.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValidationError {
    #[error("weight is missing or not a positive number")]
    MissingWeight,

    #[error("neither rate nor target dose is a positive number")]
    MissingRateOrDose,
}

pub type EngineResult<T> = Result<T, ValidationError>;

/// Evaluate one infusion.
///
/// Weight is checked first and masks any rate/dose problem. When both rate
/// and target dose are usable the rate wins and the dose is ignored. An
/// out-of-range dose is still a successful calculation.
pub fn evaluate(drug: &DrugRecord, input: &CalculationInput) -> EngineResult<Calculation> {
    let weight = input.usable_weight().ok_or(ValidationError::MissingWeight)?;

    let (ml_per_hour, mg_per_hour, basis) = if let Some(rate) = input.usable_rate() {
        (rate, rate * drug.concentration / UG_PER_MG, InputBasis::Rate)
    } else if let Some(dose) = input.usable_target_dose() {
        let mg_per_hour = dose * weight;
        (
            mg_per_hour * UG_PER_MG / drug.concentration,
            mg_per_hour,
            InputBasis::Dose,
        )
    } else {
        return Err(ValidationError::MissingRateOrDose);
    };

    let mg_per_kg_per_hour = mg_per_hour / weight;
    let ug_per_kg_per_hour = mg_per_kg_per_hour * UG_PER_MG;
    let ug_per_kg_per_minute = ug_per_kg_per_hour / MINUTES_PER_HOUR;

    let in_range = mg_per_kg_per_hour >= drug.min_dose && mg_per_kg_per_hour <= drug.max_dose;
    let range_status = RangeStatus::classify(mg_per_kg_per_hour, drug.min_dose, drug.max_dose);

    let calculation = Calculation {
        result: CalculationResult {
            ml_per_hour,
            mg_per_hour,
            mg_per_kg_per_hour,
            ug_per_kg_per_hour,
            ug_per_kg_per_minute,
        },
        in_range,
        basis,
        range_status,
    };

    tracing::debug!(
        drug = %drug.name,
        ?basis,
        mg_per_kg_per_hour,
        in_range,
        "infusion evaluated"
    );

    Ok(calculation)
}

/// Evaluate directly from the text of the entry fields.
pub fn evaluate_text(
    drug: &DrugRecord,
    weight: &str,
    rate: &str,
    target_dose: &str,
) -> EngineResult<Calculation> {
    evaluate(drug, &CalculationInput::from_text(weight, rate, target_dose))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_drug() -> DrugRecord {
        DrugRecord::new("Test infusion", 4000.0, "mcg/mL", 0.05, 2.0)
    }

    #[test]
    fn test_rate_branch() {
        let input = CalculationInput::new(Some(70.0), Some(10.0), None);
        let calc = evaluate(&test_drug(), &input).unwrap();

        assert_eq!(calc.basis, InputBasis::Rate);
        assert_eq!(calc.result.ml_per_hour, 10.0);
        assert!((calc.result.mg_per_hour - 40.0).abs() < 1e-12);
        assert!((calc.result.mg_per_kg_per_hour - 40.0 / 70.0).abs() < 1e-12);
        assert!(calc.in_range);
        assert_eq!(calc.range_status, RangeStatus::Within);
    }

    #[test]
    fn test_dose_branch() {
        let input = CalculationInput::new(Some(70.0), None, Some(3.0));
        let calc = evaluate(&test_drug(), &input).unwrap();

        assert_eq!(calc.basis, InputBasis::Dose);
        assert!((calc.result.mg_per_hour - 210.0).abs() < 1e-9);
        assert!((calc.result.ml_per_hour - 52.5).abs() < 1e-9);
        assert!(!calc.in_range);
        assert_eq!(calc.range_status, RangeStatus::Above);
        assert!(calc.needs_warning());
    }

    #[test]
    fn test_weight_checked_first() {
        let input = CalculationInput::new(None, None, None);
        assert_eq!(
            evaluate(&test_drug(), &input),
            Err(ValidationError::MissingWeight)
        );

        let input = CalculationInput::new(Some(0.0), Some(10.0), None);
        assert_eq!(
            evaluate(&test_drug(), &input),
            Err(ValidationError::MissingWeight)
        );
    }

    #[test]
    fn test_missing_rate_and_dose() {
        let input = CalculationInput::new(Some(70.0), None, None);
        assert_eq!(
            evaluate(&test_drug(), &input),
            Err(ValidationError::MissingRateOrDose)
        );
    }

    #[test]
    fn test_zero_rate_falls_through_to_dose() {
        let input = CalculationInput::new(Some(70.0), Some(0.0), Some(5.0));
        let calc = evaluate(&test_drug(), &input).unwrap();
        assert_eq!(calc.basis, InputBasis::Dose);
        assert!((calc.result.mg_per_hour - 350.0).abs() < 1e-9);
    }

    #[test]
    fn test_below_range() {
        let input = CalculationInput::new(Some(100.0), Some(0.5), None);
        let calc = evaluate(&test_drug(), &input).unwrap();
        // 0.5 mL/h * 4 mg/mL / 100 kg = 0.02 mg/kg/h
        assert!(!calc.in_range);
        assert_eq!(calc.range_status, RangeStatus::Below);
    }

    #[test]
    fn test_evaluate_text() {
        let calc = evaluate_text(&test_drug(), "70", "10", "").unwrap();
        assert_eq!(calc.result.ml_per_hour, 10.0);

        assert_eq!(
            evaluate_text(&test_drug(), "", "abc", "x"),
            Err(ValidationError::MissingWeight)
        );
    }
}
