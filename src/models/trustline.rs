use serde::{Deserialize, Serialize};

/// One account's view of a trust line, rebuilt from ledger state on every query.
///
/// Field names follow the `account_lines` shape, so `account` is the peer on
/// the other side of the line and `balance` is positive when the peer owes
/// the viewing account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trustline {
    pub account: String,
    pub balance: String,
    pub currency: String,
    pub limit: String,
    pub limit_peer: String,
    #[serde(default)]
    pub quality_in: u32,
    #[serde(default)]
    pub quality_out: u32,
    #[serde(default)]
    pub no_ripple: bool,
    #[serde(default)]
    pub no_ripple_peer: bool,
    #[serde(default)]
    pub freeze: bool,
    #[serde(default)]
    pub freeze_peer: bool,
    #[serde(default)]
    pub authorized: bool,
    #[serde(default)]
    pub peer_authorized: bool
}
