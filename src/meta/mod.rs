mod balance;
mod errors;
mod nodes;
mod offers;
mod trustline;

use bigdecimal::BigDecimal;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::models::{BalanceChange, OfferChange, TransactionType};
use crate::types::{drops_value, AmountError};

use balance::{balance_deltas, BalanceAccumulator};
use nodes::{parse_affected_nodes, ACCOUNT_ROOT, OFFER, RIPPLE_STATE};
use offers::offer_change;

pub use errors::{DiagnosticKind, MetaError, NodeDiagnostic, NodeError};

/// What the metadata needs to know about the transaction that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionContext {
    pub transaction_type: TransactionType,
    /// The sending account.
    pub account: String,
    /// Fee in drops, excluded from the sender's native balance change when set.
    pub fee_drops: Option<BigDecimal>,
    /// `OfferSequence` of an `OfferCancel` or replacing `OfferCreate`.
    pub offer_sequence: Option<u32>
}

impl TransactionContext {
    pub fn new(transaction_type: TransactionType, account: &str) -> Self {
        Self {
            transaction_type,
            account: account.to_string(),
            fee_drops: None,
            offer_sequence: None
        }
    }

    pub fn with_fee(mut self, fee_drops: &str) -> Result<Self, AmountError> {
        self.fee_drops = Some(drops_value(fee_drops)?);
        Ok(self)
    }

    pub fn with_offer_sequence(mut self, offer_sequence: u32) -> Self {
        self.offer_sequence = Some(offer_sequence);
        self
    }
}

/// Everything derived from one transaction's metadata.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MetaInterpretation {
    pub balance_changes: Vec<BalanceChange>,
    pub offer_changes: Vec<OfferChange>,
    /// Nodes that were skipped because they could not be read.
    pub diagnostics: Vec<NodeDiagnostic>
}

/// Derives balance changes and offer statuses from transaction metadata.
///
/// Malformed nodes of a recognized kind are skipped and reported in
/// `diagnostics`; unrecognized entry kinds are ignored.
///
/// # Errors
/// Returns `MetaError::StructuralViolation` if `meta` is not a metadata object
/// holding a list of affected nodes.
pub fn interpret(meta: &Value, context: &TransactionContext) -> Result<MetaInterpretation, MetaError> {
    let nodes = parse_affected_nodes(meta)?;

    let mut balances = BalanceAccumulator::new();
    let mut offer_changes = Vec::new();
    let mut diagnostics = Vec::new();

    for node in &nodes {
        let outcome = match node.entry_type.as_str() {
            ACCOUNT_ROOT | RIPPLE_STATE => balance_deltas(node).map(|deltas| {
                deltas.into_iter().for_each(|delta| balances.add(delta));
            }),
            OFFER => offer_change(node, context).map(|change| offer_changes.push(change)),
            other => {
                debug!("Ignoring [{}] node [{}]", other, node.index);
                Ok(())
            }
        };

        if let Err(error) = outcome {
            warn!("Skipping malformed [{}] node [{}]: {error}", node.entry_type, node.index);

            diagnostics.push(NodeDiagnostic {
                index: node.index,
                ledger_entry_type: node.entry_type.clone(),
                ledger_index: node.ledger_index.clone(),
                kind: DiagnosticKind::MalformedMetadataNode,
                reason: error.to_string()
            });
        }
    }

    if let Some(fee_drops) = &context.fee_drops {
        balances.exclude_fee(&context.account, fee_drops);
    }

    Ok(MetaInterpretation {
        balance_changes: balances.into_changes(),
        offer_changes,
        diagnostics
    })
}
