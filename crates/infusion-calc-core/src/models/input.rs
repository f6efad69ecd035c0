//! Clinical inputs for one calculation.

use serde::{Deserialize, Serialize};

/// Raw clinical inputs, already parsed from text.
///
/// Any value that is not a finite number greater than zero counts as "not
/// entered": `Some(0.0)` behaves exactly like `None`. A literal zero rate
/// therefore falls through to the target dose, and a zero weight is reported
/// as missing.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct CalculationInput {
    /// Patient weight, kg
    pub weight: Option<f64>,
    /// Volumetric infusion rate, mL/h
    pub rate: Option<f64>,
    /// Target dose, mg/kg/h
    pub target_dose: Option<f64>,
}

impl CalculationInput {
    pub fn new(weight: Option<f64>, rate: Option<f64>, target_dose: Option<f64>) -> Self {
        Self {
            weight,
            rate,
            target_dose,
        }
    }

    /// Build the input from the text of the three entry fields.
    ///
    /// Text that does not start with a number becomes `None`.
    pub fn from_text(weight: &str, rate: &str, target_dose: &str) -> Self {
        Self {
            weight: parse_numeric(weight),
            rate: parse_numeric(rate),
            target_dose: parse_numeric(target_dose),
        }
    }

    /// Weight if usable.
    pub fn usable_weight(&self) -> Option<f64> {
        usable(self.weight)
    }

    /// Rate if usable.
    pub fn usable_rate(&self) -> Option<f64> {
        usable(self.rate)
    }

    /// Target dose if usable.
    pub fn usable_target_dose(&self) -> Option<f64> {
        usable(self.target_dose)
    }
}

/// Keep a value only if it is finite and strictly positive.
pub fn usable(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite() && *v > 0.0)
}

/// Parse a usable positive number from text.
pub fn positive_value(text: &str) -> Option<f64> {
    usable(parse_numeric(text))
}

/// Parse the leading number of `text`.
///
/// Leading whitespace is skipped and the longest numeric prefix is used, so
/// `"12.5 ml"` parses as `12.5`. Returns `None` when no prefix is numeric.
pub fn parse_numeric(text: &str) -> Option<f64> {
    let s = text.trim_start();
    let bytes = s.as_bytes();
    let len = bytes.len();

    let mut end = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end = 1;
    }

    if s[end..].starts_with("Infinity") {
        return Some(if s.starts_with('-') {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        });
    }

    let int_start = end;
    while end < len && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;

    if end < len && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < len && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        let frac_digits = frac_end - frac_start;
        if digits > 0 || frac_digits > 0 {
            end = frac_end;
            digits += frac_digits;
        }
    }

    if digits == 0 {
        return None;
    }

    if end < len && matches!(bytes[end], b'e' | b'E') {
        let mut exp_end = end + 1;
        if exp_end < len && matches!(bytes[exp_end], b'+' | b'-') {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < len && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    s[..end].parse::<f64>().ok()
}
