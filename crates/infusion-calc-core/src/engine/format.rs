//! Fixed-decimal display formatting for calculation results.

use serde::{Deserialize, Serialize};

use crate::models::CalculationResult;

/// Decimal places shown for mL/h.
pub const ML_PER_HOUR_DECIMALS: usize = 2;
/// Decimal places shown for mg/h.
pub const MG_PER_HOUR_DECIMALS: usize = 3;
/// Decimal places shown for mg/kg/h.
pub const MG_PER_KG_PER_HOUR_DECIMALS: usize = 4;
/// Decimal places shown for mcg/kg/h.
pub const UG_PER_KG_PER_HOUR_DECIMALS: usize = 2;
/// Decimal places shown for mcg/kg/min.
pub const UG_PER_KG_PER_MINUTE_DECIMALS: usize = 3;

/// Largest decimal count `to_fixed` will produce.
pub const MAX_FIXED_DECIMALS: usize = 100;

/// Enough fraction digits to print any f64 exactly.
const EXACT_FRACTION_DIGITS: usize = 1074;

/// Magnitude from which numbers are written in exponent form.
const EXPONENT_FORM_THRESHOLD: f64 = 1e21;

/// Calculation result rendered for display.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FormattedResult {
    pub ml_per_hour: String,
    pub mg_per_hour: String,
    pub mg_per_kg_per_hour: String,
    pub ug_per_kg_per_hour: String,
    pub ug_per_kg_per_minute: String,
}

impl From<&CalculationResult> for FormattedResult {
    fn from(result: &CalculationResult) -> Self {
        Self {
            ml_per_hour: to_fixed(result.ml_per_hour, ML_PER_HOUR_DECIMALS),
            mg_per_hour: to_fixed(result.mg_per_hour, MG_PER_HOUR_DECIMALS),
            mg_per_kg_per_hour: to_fixed(result.mg_per_kg_per_hour, MG_PER_KG_PER_HOUR_DECIMALS),
            ug_per_kg_per_hour: to_fixed(result.ug_per_kg_per_hour, UG_PER_KG_PER_HOUR_DECIMALS),
            ug_per_kg_per_minute: to_fixed(
                result.ug_per_kg_per_minute,
                UG_PER_KG_PER_MINUTE_DECIMALS,
            ),
        }
    }
}

/// Format `value` with exactly `decimals` fraction digits.
///
/// Rounds the exact binary value half away from zero, so `0.125` becomes
/// `"0.13"` while `1.005` (stored as 1.00499...) becomes `"1.00"`.
/// `decimals` is clamped to [`MAX_FIXED_DECIMALS`]. Magnitudes of 1e21 and
/// above, and non-finite values, are written as [`number_text`] does.
pub fn to_fixed(value: f64, decimals: usize) -> String {
    if !value.is_finite() || value.abs() >= EXPONENT_FORM_THRESHOLD {
        return number_text(value);
    }
    let decimals = decimals.min(MAX_FIXED_DECIMALS);

    let exact = format!("{:.*}", EXACT_FRACTION_DIGITS, value.abs());
    let (int_part, frac_part) = exact.split_once('.').unwrap_or((exact.as_str(), ""));

    let mut digits: Vec<u8> = int_part
        .bytes()
        .chain(frac_part.bytes().take(decimals))
        .map(|b| b - b'0')
        .collect();
    // pad when the exact form is shorter than requested
    while digits.len() < int_part.len() + decimals {
        digits.push(0);
    }

    let mut int_len = int_part.len();
    let round_up = frac_part
        .as_bytes()
        .get(decimals)
        .is_some_and(|&b| b >= b'5');
    if round_up {
        let mut carry = true;
        for d in digits.iter_mut().rev() {
            if *d == 9 {
                *d = 0;
            } else {
                *d += 1;
                carry = false;
                break;
            }
        }
        if carry {
            digits.insert(0, 1);
            int_len += 1;
        }
    }

    let mut out = String::with_capacity(digits.len() + 2);
    if value < 0.0 {
        out.push('-');
    }
    out.extend(digits[..int_len].iter().map(|d| char::from(b'0' + d)));
    if decimals > 0 {
        out.push('.');
        out.extend(digits[int_len..].iter().map(|d| char::from(b'0' + d)));
    }
    out
}

/// Shortest text that reads back as `value`.
///
/// Plain decimal for magnitudes in `[1e-6, 1e21)`, exponent form otherwise
/// (`1e-7`, `1.5e+21`). Zero of either sign is `"0"`.
pub fn number_text(value: f64) -> String {
    if value.is_nan() {
        return "NaN".into();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.into();
    }
    if value == 0.0 {
        return "0".into();
    }

    // shortest round-trip digits, e.g. "1.5e21"
    let sci = format!("{:e}", value.abs());
    let (mantissa, exponent) = sci.split_once('e').unwrap_or((sci.as_str(), "0"));
    let exponent: i32 = exponent.parse().unwrap_or(0);
    let digits: String = mantissa.chars().filter(|c| *c != '.').collect();
    let k = digits.len() as i32;
    // position of the decimal point relative to the digits
    let n = exponent + 1;

    let body = if k <= n && n <= 21 {
        format!("{}{}", digits, "0".repeat((n - k) as usize))
    } else if 0 < n && n <= 21 {
        format!("{}.{}", &digits[..n as usize], &digits[n as usize..])
    } else if -6 < n && n <= 0 {
        format!("0.{}{}", "0".repeat((-n) as usize), digits)
    } else {
        let sign = if n - 1 < 0 { '-' } else { '+' };
        let (first, rest) = digits.split_at(1);
        if rest.is_empty() {
            format!("{}e{}{}", first, sign, (n - 1).abs())
        } else {
            format!("{}.{}e{}{}", first, rest, sign, (n - 1).abs())
        }
    };

    if value < 0.0 {
        format!("-{}", body)
    } else {
        body
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_fixed_basic() {
        assert_eq!(to_fixed(10.0, 2), "10.00");
        assert_eq!(to_fixed(40.0, 3), "40.000");
        assert_eq!(to_fixed(40.0 / 70.0, 4), "0.5714");
        assert_eq!(to_fixed(40000.0 / 70.0, 2), "571.43");
        assert_eq!(to_fixed(40000.0 / 70.0 / 60.0, 3), "9.524");
        assert_eq!(to_fixed(52.5, 2), "52.50");
    }

    #[test]
    fn test_to_fixed_ties_round_away_from_zero() {
        assert_eq!(to_fixed(0.125, 2), "0.13");
        assert_eq!(to_fixed(2.5, 0), "3");
        assert_eq!(to_fixed(-2.5, 0), "-3");
        assert_eq!(to_fixed(0.5, 0), "1");
    }

    #[test]
    fn test_to_fixed_uses_exact_binary_value() {
        // 1.005 is stored slightly below 1.005
        assert_eq!(to_fixed(1.005, 2), "1.00");
    }

    #[test]
    fn test_to_fixed_carry() {
        assert_eq!(to_fixed(9.9999, 2), "10.00");
        assert_eq!(to_fixed(99.996, 2), "100.00");
        assert_eq!(to_fixed(0.9996, 3), "1.000");
    }

    #[test]
    fn test_to_fixed_signs_and_specials() {
        assert_eq!(to_fixed(-0.0, 2), "0.00");
        assert_eq!(to_fixed(-0.001, 2), "-0.00");
        assert_eq!(to_fixed(-1.234, 1), "-1.2");
        assert_eq!(to_fixed(f64::NAN, 2), "NaN");
        assert_eq!(to_fixed(f64::INFINITY, 2), "Infinity");
        assert_eq!(to_fixed(f64::NEG_INFINITY, 2), "-Infinity");
    }

    #[test]
    fn test_to_fixed_decimals_are_capped() {
        let text = to_fixed(1.0, 5_000_000);
        assert_eq!(text.len(), 2 + MAX_FIXED_DECIMALS);
        assert!(text.starts_with("1.000"));
    }

    #[test]
    fn test_to_fixed_huge_values_use_exponent_form() {
        assert_eq!(to_fixed(1e21, 2), "1e+21");
        assert_eq!(to_fixed(-2.5e22, 3), "-2.5e+22");
        assert_eq!(to_fixed(1e20, 1), "100000000000000000000.0");
    }

    #[test]
    fn test_number_text_plain_range() {
        assert_eq!(number_text(4000.0), "4000");
        assert_eq!(number_text(2.0), "2");
        assert_eq!(number_text(0.05), "0.05");
        assert_eq!(number_text(0.0014), "0.0014");
        assert_eq!(number_text(-12.25), "-12.25");
        assert_eq!(number_text(0.000001), "0.000001");
        assert_eq!(number_text(123456789012345680000.0), "123456789012345680000");
    }

    #[test]
    fn test_number_text_exponent_range() {
        assert_eq!(number_text(1e-7), "1e-7");
        assert_eq!(number_text(2.5e-7), "2.5e-7");
        assert_eq!(number_text(1e21), "1e+21");
        assert_eq!(number_text(-1.5e21), "-1.5e+21");
    }

    #[test]
    fn test_number_text_specials() {
        assert_eq!(number_text(0.0), "0");
        assert_eq!(number_text(-0.0), "0");
        assert_eq!(number_text(f64::NAN), "NaN");
        assert_eq!(number_text(f64::NEG_INFINITY), "-Infinity");
    }

    #[test]
    fn test_formatted_result() {
        let result = CalculationResult {
            ml_per_hour: 10.0,
            mg_per_hour: 40.0,
            mg_per_kg_per_hour: 40.0 / 70.0,
            ug_per_kg_per_hour: 40.0 / 70.0 * 1000.0,
            ug_per_kg_per_minute: 40.0 / 70.0 * 1000.0 / 60.0,
        };
        let formatted = FormattedResult::from(&result);
        assert_eq!(formatted.ml_per_hour, "10.00");
        assert_eq!(formatted.mg_per_hour, "40.000");
        assert_eq!(formatted.mg_per_kg_per_hour, "0.5714");
        assert_eq!(formatted.ug_per_kg_per_hour, "571.43");
        assert_eq!(formatted.ug_per_kg_per_minute, "9.524");
    }
}
