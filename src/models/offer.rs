use serde::{Deserialize, Serialize};

use crate::types::LedgerAmount;

/// Lifecycle state of an offer as seen through one transaction's metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OfferStatus {
    Created,
    PartiallyFilled,
    Filled,
    Cancelled,
    Killed,
    /// The metadata does not say enough to tell a fill from a removal.
    Unknown
}

impl OfferStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, OfferStatus::Filled | OfferStatus::Cancelled | OfferStatus::Killed)
    }
}

/// An offer touched by a transaction and the status it ended up in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OfferChange {
    /// Ledger index of the offer entry.
    pub offer_id: String,
    /// Owner of the offer.
    pub account: String,
    pub sequence: u32,
    pub status: OfferStatus,
    /// Remaining amount the offer sells, after the transaction.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub taker_gets: Option<LedgerAmount>,
    /// Remaining amount the offer buys, after the transaction.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub taker_pays: Option<LedgerAmount>,
    /// Amount the offer sold within this transaction.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub taker_got: Option<LedgerAmount>,
    /// Amount the offer bought within this transaction.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub taker_paid: Option<LedgerAmount>
}
