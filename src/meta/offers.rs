use tracing::debug;

use crate::meta::errors::NodeError;
use crate::meta::nodes::{amount_value, u32_value, LedgerNode, NodeAction, ACCOUNT};
use crate::meta::TransactionContext;
use crate::models::{OfferChange, OfferStatus, TransactionType};
use crate::types::LedgerAmount;

const SEQUENCE: &str = "Sequence";
const TAKER_GETS: &str = "TakerGets";
const TAKER_PAYS: &str = "TakerPays";
const EXPIRATION: &str = "Expiration";
const LEDGER_INDEX: &str = "LedgerIndex";

/// Remaining and previous amounts of an offer node.
struct OfferAmounts {
    taker_gets: Option<LedgerAmount>,
    taker_pays: Option<LedgerAmount>,
    previous_gets: Option<LedgerAmount>,
    previous_pays: Option<LedgerAmount>
}

impl OfferAmounts {
    fn read(node: &LedgerNode) -> Result<Self, NodeError> {
        let read = |value: Option<&serde_json::Value>, name| value.map(|value| amount_value(value, name)).transpose();

        Ok(Self {
            taker_gets: read(node.field(TAKER_GETS)?, TAKER_GETS)?,
            taker_pays: read(node.field(TAKER_PAYS)?, TAKER_PAYS)?,
            previous_gets: read(node.previous_field(TAKER_GETS)?, TAKER_GETS)?,
            previous_pays: read(node.previous_field(TAKER_PAYS)?, TAKER_PAYS)?
        })
    }

    /// Whether this transaction traded against the offer.
    fn was_consumed(&self) -> bool {
        self.previous_gets.is_some() || self.previous_pays.is_some()
    }

    /// Whether either side has nothing left to trade.
    fn is_exhausted(&self) -> bool {
        [&self.taker_gets, &self.taker_pays]
            .into_iter()
            .flatten()
            .any(|amount| amount.is_zero().unwrap_or(false))
    }

    fn is_open(&self) -> bool {
        self.taker_gets.is_some() && self.taker_pays.is_some() && !self.is_exhausted()
    }

    fn consumed(
        previous: &Option<LedgerAmount>,
        remaining: &Option<LedgerAmount>,
        name: &'static str
    ) -> Result<Option<LedgerAmount>, NodeError> {
        match (previous, remaining) {
            (Some(previous), Some(remaining)) => previous.checked_sub(remaining)
                .map(Some)
                .map_err(|error| NodeError::invalid(name, error)),
            _ => Ok(None)
        }
    }
}

/// Classifies one `Offer` node.
///
/// # Errors
/// Returns `NodeError` when the node lacks its owner, sequence or ledger index,
/// or carries an amount that does not parse.
pub(crate) fn offer_change(node: &LedgerNode, context: &TransactionContext) -> Result<OfferChange, NodeError> {
    let account = node.require_str(ACCOUNT)?;
    let sequence = node.field(SEQUENCE)?
        .ok_or_else(|| NodeError::missing(SEQUENCE))
        .and_then(|value| u32_value(value, SEQUENCE))?;
    let offer_id = node.ledger_index.clone().ok_or_else(|| NodeError::missing(LEDGER_INDEX))?;
    let has_expiration = node.field(EXPIRATION)?.is_some();

    let amounts = OfferAmounts::read(node)?;
    let status = classify(node.action, &amounts, context, account, sequence, has_expiration);

    debug!("Offer [{}] of [{}]:[{}] classified as {:?}", offer_id, account, sequence, status);

    Ok(OfferChange {
        offer_id,
        account: account.to_string(),
        sequence,
        status,
        taker_got: OfferAmounts::consumed(&amounts.previous_gets, &amounts.taker_gets, TAKER_GETS)?,
        taker_paid: OfferAmounts::consumed(&amounts.previous_pays, &amounts.taker_pays, TAKER_PAYS)?,
        taker_gets: amounts.taker_gets,
        taker_pays: amounts.taker_pays
    })
}

fn classify(
    action: NodeAction,
    amounts: &OfferAmounts,
    context: &TransactionContext,
    account: &str,
    sequence: u32,
    has_expiration: bool
) -> OfferStatus {
    match action {
        NodeAction::Created => OfferStatus::Created,
        NodeAction::Modified => {
            if amounts.was_consumed() && amounts.is_open() {
                OfferStatus::PartiallyFilled
            } else {
                OfferStatus::Unknown
            }
        }
        NodeAction::Deleted => {
            if is_cancelled_by(context, account, sequence) {
                return OfferStatus::Cancelled;
            }

            let is_exchange = context.transaction_type.is_exchange();

            match amounts.was_consumed() {
                true if amounts.is_exhausted() && is_exchange => OfferStatus::Filled,
                //NOTE: Partially consumed and then removed could be either a fill or an unfunded removal
                true => OfferStatus::Unknown,
                false if is_exchange || has_expiration => OfferStatus::Killed,
                false => OfferStatus::Unknown
            }
        }
    }
}

/// An explicit cancel names the offer by its owner and sequence, through
/// `OfferCancel` or the `OfferSequence` of a replacing `OfferCreate`.
fn is_cancelled_by(context: &TransactionContext, account: &str, sequence: u32) -> bool {
    let cancels = matches!(context.transaction_type, TransactionType::OfferCancel | TransactionType::OfferCreate);

    cancels && context.account == account && context.offer_sequence == Some(sequence)
}
