use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};

use crate::types::{parse_value, AmountError, AmountType, Issuer};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum BalanceAction {
    Dec,
    Inc
}

/// One observed balance delta for one account on one currency/issuer pair.
///
/// `value` is always a magnitude; the direction lives in `action`. Native
/// changes are expressed in drops.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceChange {
    pub account: String,
    pub currency: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issuer: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub counterparty: Option<String>,
    pub value: String,
    pub action: BalanceAction
}

impl BalanceChange {
    pub fn as_issuer(&self) -> Issuer {
        Issuer {
            currency: self.currency.clone(),
            issuer: self.issuer.clone(),
            counterparty: self.counterparty.clone()
        }
    }

    pub fn as_amount(&self) -> AmountType {
        AmountType {
            currency: self.currency.clone(),
            issuer: self.issuer.clone(),
            counterparty: self.counterparty.clone(),
            value: self.value.clone()
        }
    }

    /// The change as a signed decimal, negative for `DEC`.
    pub fn signed_value(&self) -> Result<BigDecimal, AmountError> {
        let magnitude = parse_value(&self.value)?;

        Ok(match self.action {
            BalanceAction::Inc => magnitude,
            BalanceAction::Dec => -magnitude
        })
    }
}
