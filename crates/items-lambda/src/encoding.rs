//! Rendering of store numbers as JSON numbers.
//!
//! The store keeps numbers as arbitrary-precision decimals. Responses render a
//! decimal with a zero fractional part as an integer literal (`4.00` becomes
//! `4`) and anything else as a plain decimal literal (`2.50` becomes `2.5`).
//! Digits are carried as text end to end, so no value is rounded through a
//! binary float on the way out.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde_json::{Number, Value};
use thiserror::Error;

/// Largest decimal exponent accepted when expanding scientific notation.
const MAX_EXPONENT: u64 = 400;

/// Errors raised while turning decimal text into a JSON number.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodingError {
    /// The text is not a decimal number.
    #[error("'{raw}' is not a decimal number")]
    Malformed {
        /// Offending text.
        raw: String,
    },
    /// The number cannot be represented as a JSON number.
    #[error("'{raw}' cannot be represented as a JSON number")]
    Unrepresentable {
        /// Offending text.
        raw: String,
    },
}

/// Renders a decimal as a JSON number: integral values become integers,
/// everything else keeps its significant fractional digits.
///
/// # Errors
///
/// Returns [`EncodingError::Unrepresentable`] when the rendered text is not
/// accepted as a JSON number.
pub fn render_decimal(value: Decimal) -> Result<Number, EncodingError> {
    json_number(value.normalize().to_string())
}

/// Parses decimal text as delivered by the store (plain or scientific
/// notation) and renders it with the same rule as [`render_decimal`].
///
/// Precision is not limited to what [`Decimal`] can hold: every digit of the
/// input survives.
///
/// # Errors
///
/// Returns [`EncodingError::Malformed`] when the text is not a number, or
/// [`EncodingError::Unrepresentable`] when its exponent is out of range.
pub fn decimal_number(raw: &str) -> Result<Number, EncodingError> {
    let trimmed = raw.trim();
    json_number(canonical_text(trimmed)?)
}

fn json_number(text: String) -> Result<Number, EncodingError> {
    Number::from_str(&text).map_err(|_| EncodingError::Unrepresentable { raw: text })
}

/// Rewrites `raw` as the shortest plain decimal with the same value.
fn canonical_text(raw: &str) -> Result<String, EncodingError> {
    let malformed = || EncodingError::Malformed {
        raw: raw.to_owned(),
    };
    let unrepresentable = || EncodingError::Unrepresentable {
        raw: raw.to_owned(),
    };

    let (negative, unsigned) = match raw.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, raw.strip_prefix('+').unwrap_or(raw)),
    };
    let (significand, exponent) = match unsigned.split_once(['e', 'E']) {
        Some((significand, exponent)) => {
            (significand, exponent.parse::<i64>().map_err(|_| malformed())?)
        }
        None => (unsigned, 0),
    };
    let (whole, fraction) = significand.split_once('.').unwrap_or((significand, ""));
    let is_digits = |part: &str| part.bytes().all(|byte| byte.is_ascii_digit());
    if (whole.is_empty() && fraction.is_empty()) || !is_digits(whole) || !is_digits(fraction) {
        return Err(malformed());
    }

    let digits = format!("{whole}{fraction}");
    let significant = digits.trim_start_matches('0');
    let mantissa = significant.trim_end_matches('0');
    if mantissa.is_empty() {
        return Ok("0".to_owned());
    }

    let length = |text: &str| i64::try_from(text.len()).map_err(|_| unrepresentable());
    let trailing_zeros = length(significant)? - length(mantissa)?;
    let exponent = exponent
        .checked_sub(length(fraction)?)
        .and_then(|exponent| exponent.checked_add(trailing_zeros))
        .filter(|exponent| exponent.unsigned_abs() <= MAX_EXPONENT)
        .ok_or_else(unrepresentable)?;

    let mut text = String::with_capacity(mantissa.len() + 8);
    if negative {
        text.push('-');
    }
    let point = length(mantissa)? + exponent;
    if exponent >= 0 {
        text.push_str(mantissa);
        text.extend(std::iter::repeat_n('0', zeros(exponent)));
    } else if point > 0 {
        let (integral, fractional) = mantissa.split_at(zeros(point));
        text.push_str(integral);
        text.push('.');
        text.push_str(fractional);
    } else {
        text.push_str("0.");
        text.extend(std::iter::repeat_n('0', zeros(-point)));
        text.push_str(mantissa);
    }
    Ok(text)
}

fn zeros(count: i64) -> usize {
    usize::try_from(count).unwrap_or_default()
}

/// Rewrites every non-integer number inside `value` according to the
/// rendering rule, so `4.0` serializes as `4`. Integers are left untouched.
///
/// # Errors
///
/// Propagates the first [`EncodingError`] met while walking the value.
pub fn normalise_numbers(value: &mut Value) -> Result<(), EncodingError> {
    match value {
        Value::Number(number) if !(number.is_i64() || number.is_u64()) => {
            *number = decimal_number(&number.to_string())?;
        }
        Value::Array(elements) => {
            for element in elements {
                normalise_numbers(element)?;
            }
        }
        Value::Object(fields) => {
            for field in fields.values_mut() {
                normalise_numbers(field)?;
            }
        }
        Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_) => {}
    }
    Ok(())
}
