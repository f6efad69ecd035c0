//! Turn an engine outcome into display text.

use infusion_calc_core::engine::{
    number_text, EngineResult, FormattedResult, ValidationError,
};
use infusion_calc_core::models::{Calculation, DrugRecord};
use serde::Serialize;

use crate::locale::Language;

/// Warning shown under the inputs.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Warning {
    EnterWeight,
    EnterRateOrDose,
    OutOfRange,
}

impl Warning {
    pub fn text(self, language: Language) -> &'static str {
        let warnings = &language.strings().warnings;
        match self {
            Warning::EnterWeight => warnings.enter_weight,
            Warning::EnterRateOrDose => warnings.enter_rate_or_dose,
            Warning::OutOfRange => warnings.out_of_range,
        }
    }
}

impl From<ValidationError> for Warning {
    fn from(e: ValidationError) -> Self {
        match e {
            ValidationError::MissingWeight => Warning::EnterWeight,
            ValidationError::MissingRateOrDose => Warning::EnterRateOrDose,
        }
    }
}

/// Everything the result panel shows.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct ResultView {
    /// "<concentration> <unit>" of the selected drug
    pub concentration: String,
    /// Formatted values, only on success
    pub values: Option<FormattedResult>,
    /// Raw calculation, only on success
    pub calculation: Option<Calculation>,
    /// "<Recommended>: <min>–<max>", only on success
    pub dose_info: Option<String>,
    pub warning: Option<Warning>,
    pub warning_text: Option<String>,
}

impl ResultView {
    /// View with outputs emptied, keeping the concentration line.
    pub fn cleared(drug: &DrugRecord) -> Self {
        Self {
            concentration: concentration_text(drug),
            ..Self::default()
        }
    }

    pub fn is_success(&self) -> bool {
        self.values.is_some()
    }
}

/// Render an engine outcome for `drug` in `language`.
pub fn render(
    drug: &DrugRecord,
    outcome: &EngineResult<Calculation>,
    language: Language,
) -> ResultView {
    let mut view = ResultView::cleared(drug);

    let warning = match outcome {
        Ok(calc) => {
            view.values = Some(FormattedResult::from(&calc.result));
            view.calculation = Some(*calc);
            view.dose_info = Some(dose_info_text(drug, language));
            calc.needs_warning().then_some(Warning::OutOfRange)
        }
        Err(e) => Some(Warning::from(*e)),
    };

    view.warning = warning;
    view.warning_text = warning.map(|w| w.text(language).to_string());
    view
}

/// "<concentration> <unit>".
pub fn concentration_text(drug: &DrugRecord) -> String {
    format!("{} {}", number_text(drug.concentration), drug.unit)
}

/// "<Recommended>: <min>–<max>".
pub fn dose_info_text(drug: &DrugRecord, language: Language) -> String {
    format!(
        "{}: {}–{}",
        language.strings().recommended,
        number_text(drug.min_dose),
        number_text(drug.max_dose)
    )
}
