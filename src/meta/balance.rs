use std::collections::HashMap;

use bigdecimal::{BigDecimal, Zero};
use serde_json::Value;

use crate::meta::errors::NodeError;
use crate::meta::nodes::{
    issued_member, issued_value, string_value, LedgerNode, NodeAction, ACCOUNT, ACCOUNT_ROOT, BALANCE, HIGH_LIMIT,
    LOW_LIMIT, RIPPLE_STATE
};
use crate::models::{BalanceAction, BalanceChange};
use crate::types::{drops_value, format_value, NATIVE_CURRENCY};

/// A signed balance movement read from a single node, before aggregation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct BalanceDelta {
    pub account: String,
    pub currency: String,
    pub issuer: Option<String>,
    pub counterparty: Option<String>,
    pub delta: BigDecimal
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct BalanceKey {
    account: String,
    currency: String,
    issuer: Option<String>
}

#[derive(Debug)]
struct PendingChange {
    counterparty: Option<String>,
    delta: BigDecimal
}

/// Sums node deltas per (account, currency, issuer), keeping first-seen order.
#[derive(Debug, Default)]
pub(crate) struct BalanceAccumulator {
    order: Vec<BalanceKey>,
    pending: HashMap<BalanceKey, PendingChange>
}

impl BalanceAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, delta: BalanceDelta) {
        let key = BalanceKey {
            account: delta.account,
            currency: delta.currency,
            issuer: delta.issuer
        };

        match self.pending.get_mut(&key) {
            Some(pending) => {
                pending.delta += delta.delta;

                if pending.counterparty != delta.counterparty {
                    pending.counterparty = None;
                }
            }
            None => {
                self.order.push(key.clone());
                self.pending.insert(key, PendingChange {
                    counterparty: delta.counterparty,
                    delta: delta.delta
                });
            }
        }
    }

    /// Adds the burned fee back to the sender's native balance so it is not
    /// reported as part of the transaction's own movement.
    pub fn exclude_fee(&mut self, account: &str, fee_drops: &BigDecimal) {
        let key = BalanceKey {
            account: account.to_string(),
            currency: NATIVE_CURRENCY.to_string(),
            issuer: None
        };

        if let Some(pending) = self.pending.get_mut(&key) {
            pending.delta += fee_drops.clone();
        }
    }

    pub fn into_changes(mut self) -> Vec<BalanceChange> {
        self.order.into_iter()
            .filter_map(|key| {
                let pending = self.pending.remove(&key)?;

                if pending.delta.is_zero() {
                    return None;
                }

                let action = match pending.delta < BigDecimal::zero() {
                    true => BalanceAction::Dec,
                    false => BalanceAction::Inc
                };

                Some(BalanceChange {
                    account: key.account,
                    currency: key.currency,
                    issuer: key.issuer,
                    counterparty: pending.counterparty,
                    value: format_value(&pending.delta.abs()),
                    action
                })
            })
            .collect()
    }
}

/// Balance movements recorded by one node. Entry kinds that hold no balance yield nothing.
pub(crate) fn balance_deltas(node: &LedgerNode) -> Result<Vec<BalanceDelta>, NodeError> {
    match node.entry_type.as_str() {
        ACCOUNT_ROOT => account_root_deltas(node),
        RIPPLE_STATE => ripple_state_deltas(node),
        _ => Ok(Vec::new())
    }
}

fn account_root_deltas(node: &LedgerNode) -> Result<Vec<BalanceDelta>, NodeError> {
    let Some((previous, current)) = balance_snapshots(node, parse_native_balance)? else {
        return Ok(Vec::new());
    };

    let account = node.require_str(ACCOUNT)?;
    let delta = current - previous;

    Ok(vec![BalanceDelta {
        account: account.to_string(),
        currency: NATIVE_CURRENCY.to_string(),
        issuer: None,
        counterparty: None,
        delta
    }])
}

/// Splits a trust line movement into the holder's and the issuer's side.
///
/// `Balance` is stored from the low account's point of view. The issuing side
/// is whoever owes the balance; both sides are keyed by that issuer so the
/// two entries cancel out per currency/issuer.
fn ripple_state_deltas(node: &LedgerNode) -> Result<Vec<BalanceDelta>, NodeError> {
    let Some((previous, current)) = balance_snapshots(node, |value| issued_value(value, BALANCE))? else {
        return Ok(Vec::new());
    };

    let low = limit_account(node, LOW_LIMIT)?;
    let high = limit_account(node, HIGH_LIMIT)?;
    let currency = balance_currency(node)?;
    let low_delta = &current - &previous;

    let (issuer, holder, holder_delta) = match low_is_issuer(node, &previous, &current)? {
        true => (low, high, -low_delta),
        false => (high, low, low_delta)
    };
    let issuer_delta = -holder_delta.clone();

    Ok(vec![
        BalanceDelta {
            account: holder.to_string(),
            currency: currency.to_string(),
            issuer: Some(issuer.to_string()),
            counterparty: None,
            delta: holder_delta
        },
        BalanceDelta {
            account: issuer.to_string(),
            currency: currency.to_string(),
            issuer: Some(issuer.to_string()),
            counterparty: Some(holder.to_string()),
            delta: issuer_delta
        }
    ])
}

/// Returns `(previous, final)` for the `Balance` field, or `None` when the node leaves it untouched.
///
/// Created nodes start from zero and deleted nodes end at zero.
fn balance_snapshots<F>(node: &LedgerNode, parse: F) -> Result<Option<(BigDecimal, BigDecimal)>, NodeError>
where
    F: Fn(&Value) -> Result<BigDecimal, NodeError>
{
    let current = node.field(BALANCE)?;
    let previous = node.previous_field(BALANCE)?;

    match node.action {
        NodeAction::Created => {
            let current = current.ok_or_else(|| NodeError::missing(BALANCE))?;
            Ok(Some((BigDecimal::zero(), parse(current)?)))
        }
        NodeAction::Modified => {
            let Some(previous) = previous else {
                return Ok(None);
            };

            let current = current.ok_or_else(|| NodeError::missing(BALANCE))?;
            Ok(Some((parse(previous)?, parse(current)?)))
        }
        NodeAction::Deleted => {
            let previous = previous.or(current).ok_or_else(|| NodeError::missing(BALANCE))?;
            Ok(Some((parse(previous)?, BigDecimal::zero())))
        }
    }
}

fn parse_native_balance(value: &Value) -> Result<BigDecimal, NodeError> {
    drops_value(string_value(value, BALANCE)?).map_err(|error| NodeError::invalid(BALANCE, error))
}

fn limit_account<'a>(node: &'a LedgerNode, name: &'static str) -> Result<&'a str, NodeError> {
    let limit = node.field(name)?.ok_or_else(|| NodeError::missing(name))?;
    issued_member(limit, "issuer", name)
}

fn balance_currency(node: &LedgerNode) -> Result<&str, NodeError> {
    let balance = match node.field(BALANCE)? {
        Some(balance) => balance,
        None => node.previous_field(BALANCE)?.ok_or_else(|| NodeError::missing(BALANCE))?
    };

    issued_member(balance, "currency", BALANCE)
}

/// Whether the low party issues the line, judged from the final balance first.
///
/// A line whose balance crosses zero within one transaction is labelled by
/// where it ends up.
fn low_is_issuer(node: &LedgerNode, previous: &BigDecimal, current: &BigDecimal) -> Result<bool, NodeError> {
    //NOTE: A negative low-side balance means the low account owes the high account
    if let Some(balance) = [current, previous].into_iter().find(|balance| !balance.is_zero()) {
        return Ok(*balance < BigDecimal::zero());
    }

    let low_limit = limit_value(node, LOW_LIMIT)?;
    let high_limit = limit_value(node, HIGH_LIMIT)?;

    Ok(low_limit.is_zero() && !high_limit.is_zero())
}

fn limit_value(node: &LedgerNode, name: &'static str) -> Result<BigDecimal, NodeError> {
    let limit = node.field(name)?.ok_or_else(|| NodeError::missing(name))?;
    issued_value(limit, name)
}
