use std::fmt;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

use bigdecimal::{BigDecimal, Zero};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::errors::AmountError;
use crate::types::value::{format_value, parse_value};
use crate::types::{NATIVE_CURRENCY, NATIVE_DECIMAL_PLACES};

/// A currency-issuer pair, or just the currency code for the native asset.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Issuer {
    pub currency: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issuer: Option<String>,
    /// Set on the issuing side of a trust line, naming the holder.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub counterparty: Option<String>
}

impl Issuer {
    pub fn native() -> Self {
        Self {
            currency: NATIVE_CURRENCY.to_string(),
            issuer: None,
            counterparty: None
        }
    }

    pub fn issued(currency: &str, issuer: &str) -> Self {
        Self {
            currency: currency.to_string(),
            issuer: Some(issuer.to_string()),
            counterparty: None
        }
    }

    pub fn is_native(&self) -> bool {
        self.issuer.is_none() && self.counterparty.is_none() && self.currency == NATIVE_CURRENCY
    }
}

/// An issued-currency amount in the ledger's object form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AmountType {
    pub currency: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issuer: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub counterparty: Option<String>,
    pub value: String
}

impl AmountType {
    pub fn new(currency: &str, issuer: Option<&str>, value: &str) -> Self {
        Self {
            currency: currency.to_string(),
            issuer: issuer.map(str::to_string),
            counterparty: None,
            value: value.to_string()
        }
    }

    pub fn as_issuer(&self) -> Issuer {
        Issuer {
            currency: self.currency.clone(),
            issuer: self.issuer.clone(),
            counterparty: self.counterparty.clone()
        }
    }

    pub fn to_decimal(&self) -> Result<BigDecimal, AmountError> {
        parse_value(&self.value)
    }
}

/// Either a native amount in drops (`"1000000"`) or an issued amount object.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LedgerAmount {
    Native(String),
    Issued(AmountType)
}

impl LedgerAmount {
    pub fn is_native(&self) -> bool {
        matches!(self, LedgerAmount::Native(_))
    }

    pub fn currency(&self) -> &str {
        match self {
            LedgerAmount::Native(_) => NATIVE_CURRENCY,
            LedgerAmount::Issued(amount) => &amount.currency
        }
    }

    pub fn issuer(&self) -> Option<&str> {
        match self {
            LedgerAmount::Native(_) => None,
            LedgerAmount::Issued(amount) => amount.issuer.as_deref()
        }
    }

    /// Numeric value in the amount's own unit: drops for native, value for issued.
    pub fn to_decimal(&self) -> Result<BigDecimal, AmountError> {
        match self {
            LedgerAmount::Native(drops) => drops_value(drops),
            LedgerAmount::Issued(amount) => amount.to_decimal()
        }
    }

    /// Display-ready value: native amounts are converted out of drops.
    pub fn display_value(&self) -> Result<String, AmountError> {
        match self {
            LedgerAmount::Native(drops) => drops_to_native(drops),
            LedgerAmount::Issued(amount) => Ok(format_value(&amount.to_decimal()?))
        }
    }

    pub fn is_zero(&self) -> Result<bool, AmountError> {
        Ok(self.to_decimal()?.is_zero())
    }

    /// Value and currency and issuer equality.
    ///
    /// Numeric values are compared after normalization, so `"1.0"` equals `"1"`.
    /// A value that does not parse only equals the identical string.
    pub fn equals(&self, other: &LedgerAmount) -> bool {
        match (self, other) {
            (LedgerAmount::Native(left), LedgerAmount::Native(right)) => {
                match (parse_drops(left), parse_drops(right)) {
                    (Ok(left), Ok(right)) => left == right,
                    _ => left == right
                }
            }
            (LedgerAmount::Issued(left), LedgerAmount::Issued(right)) => {
                if left.currency != right.currency || left.issuer != right.issuer {
                    return false;
                }

                match (left.to_decimal(), right.to_decimal()) {
                    (Ok(left), Ok(right)) => left == right,
                    _ => left.value == right.value
                }
            }
            _ => false
        }
    }

    /// Returns `self - other` in the same representation.
    ///
    /// # Errors
    /// Returns `AmountError` if either value is invalid or the two amounts
    /// are not in the same currency.
    pub fn checked_sub(&self, other: &LedgerAmount) -> Result<LedgerAmount, AmountError> {
        match (self, other) {
            (LedgerAmount::Native(left), LedgerAmount::Native(right)) => {
                let difference = parse_drops(left)? - parse_drops(right)?;
                Ok(LedgerAmount::Native(canonical(difference)))
            }
            (LedgerAmount::Issued(left), LedgerAmount::Issued(right))
                if left.currency == right.currency && left.issuer == right.issuer =>
            {
                let difference = left.to_decimal()? - right.to_decimal()?;

                Ok(LedgerAmount::Issued(AmountType {
                    value: format_value(&difference),
                    ..left.clone()
                }))
            }
            _ => Err(AmountError::invalid(
                &other.to_string(),
                format!("Cannot subtract a {} amount from a {} amount", other.currency(), self.currency())
            ))
        }
    }
}

impl PartialEq for LedgerAmount {
    fn eq(&self, other: &Self) -> bool {
        self.equals(other)
    }
}

impl Display for LedgerAmount {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        match self {
            LedgerAmount::Native(drops) => write!(formatter, "{} drops", drops),
            LedgerAmount::Issued(amount) => match &amount.issuer {
                Some(issuer) => write!(formatter, "{} {}.{}", amount.value, amount.currency, issuer),
                None => write!(formatter, "{} {}", amount.value, amount.currency)
            }
        }
    }
}

/// Converts an integer drops string into a native display value.
///
/// `"1500000"` becomes `"1.5"`. Signs, separators and anything other than
/// ASCII digits are rejected.
pub fn drops_to_native(drops: &str) -> Result<String, AmountError> {
    let drops = parse_drops(drops)?;
    let mut value = drops;
    value.set_scale(NATIVE_DECIMAL_PLACES)
        .map_err(|error| AmountError::invalid(&drops.to_string(), error.to_string()))?;

    Ok(canonical(value))
}

/// Converts a native display value back into drops.
pub fn native_to_drops(value: &str) -> Result<String, AmountError> {
    let parsed = Decimal::from_str_exact(value.trim())
        .map_err(|error| AmountError::invalid(value, error.to_string()))?;

    if parsed.is_sign_negative() && !parsed.is_zero() {
        return Err(AmountError::invalid(value, "Native values cannot be negative"));
    }

    if parsed.normalize().scale() > NATIVE_DECIMAL_PLACES {
        return Err(AmountError::invalid(value, "Native values carry at most six decimal places"));
    }

    let mut drops = parsed;
    drops.rescale(NATIVE_DECIMAL_PLACES);

    if drops.scale() != NATIVE_DECIMAL_PLACES {
        return Err(AmountError::invalid(value, "Value is too large to express in drops"));
    }

    let drops = Decimal::from_i128_with_scale(drops.mantissa(), 0);

    Ok(canonical(drops))
}

fn parse_drops(drops: &str) -> Result<Decimal, AmountError> {
    drop_count(drops).map(Decimal::from)
}

/// A drops string as an unbounded decimal, for arithmetic alongside issued values.
pub(crate) fn drops_value(drops: &str) -> Result<BigDecimal, AmountError> {
    drop_count(drops).map(BigDecimal::from)
}

fn drop_count(drops: &str) -> Result<u64, AmountError> {
    if drops.is_empty() {
        return Err(AmountError::invalid(drops, "Drops value is an empty string"));
    }

    if !drops.bytes().all(|byte| byte.is_ascii_digit()) {
        return Err(AmountError::invalid(drops, "Drops must be a non-negative integer"));
    }

    u64::from_str(drops).map_err(|error| AmountError::invalid(drops, error.to_string()))
}

fn canonical(value: Decimal) -> String {
    value.normalize().to_string()
}
