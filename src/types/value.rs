use std::str::FromStr;

use bigdecimal::{BigDecimal, Zero};

use crate::types::errors::AmountError;

/// Scale bounds of a normalized issued value.
///
/// The ledger stores issued values as a 16 digit mantissa with an exponent
/// between -96 and 80, so a normalized value never sits outside these.
const MIN_ISSUED_SCALE: i64 = -96;
const MAX_ISSUED_SCALE: i64 = 96;

/// Values whose scale stays within this bound are written in plain notation.
const PLAIN_SCALE_LIMIT: i64 = 28;

/// Parses an issued-currency value, accepting plain decimals and scientific notation.
///
/// The whole issued range is supported, from `"1e-81"` up to `"9999999999999999e80"`.
pub fn parse_value(value: &str) -> Result<BigDecimal, AmountError> {
    if value.is_empty() {
        return Err(AmountError::invalid(value, "Value is an empty string"));
    }

    let parsed = BigDecimal::from_str(value)
        .map_err(|error| AmountError::invalid(value, error.to_string()))?;

    if parsed.is_zero() {
        return Ok(BigDecimal::zero());
    }

    let normalized = parsed.normalized();
    let (_, scale) = normalized.as_bigint_and_exponent();

    if !(MIN_ISSUED_SCALE..=MAX_ISSUED_SCALE).contains(&scale) {
        return Err(AmountError::invalid(value, "Value is outside the range of an issued amount"));
    }

    Ok(normalized)
}

/// Canonical text of a value: no trailing zeros, plain notation for everyday
/// magnitudes and `<mantissa>e<exponent>` beyond them.
///
/// The output always parses back with [`parse_value`].
pub(crate) fn format_value(value: &BigDecimal) -> String {
    let (mantissa, scale) = value.normalized().as_bigint_and_exponent();

    if mantissa.is_zero() {
        return "0".to_string();
    }

    let sign = if *value < BigDecimal::zero() { "-" } else { "" };
    let digits = mantissa.magnitude().to_string();

    if !(-PLAIN_SCALE_LIMIT..=PLAIN_SCALE_LIMIT).contains(&scale) {
        return format!("{sign}{digits}e{}", -scale);
    }

    let places = scale.unsigned_abs() as usize;

    if scale <= 0 {
        return format!("{sign}{digits}{}", "0".repeat(places));
    }

    let padded = format!("{digits:0>width$}", width = places + 1);
    let (integer, fraction) = padded.split_at(padded.len() - places);

    format!("{sign}{integer}.{fraction}")
}
