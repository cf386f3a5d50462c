use serde::Deserialize;

use crate::models::{MemoType, SignerEntry, TransactionType};
use crate::types::LedgerAmount;

/// The transaction fields this crate reads, in the ledger's JSON naming.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct TransactionEnvelope {
    pub transaction_type: TransactionType,
    pub account: String,
    /// Fee in drops.
    pub fee: String,
    #[serde(default)]
    pub sequence: Option<u32>,
    #[serde(default)]
    pub source_tag: Option<u32>,
    #[serde(default)]
    pub destination: Option<String>,
    #[serde(default)]
    pub destination_tag: Option<u32>,
    #[serde(default)]
    pub amount: Option<LedgerAmount>,
    #[serde(default)]
    pub offer_sequence: Option<u32>,
    #[serde(default)]
    pub set_flag: Option<u32>,
    #[serde(default)]
    pub clear_flag: Option<u32>,
    #[serde(default)]
    pub memos: Vec<MemoWrapper>,
    #[serde(default)]
    pub signers: Vec<SignerWrapper>,
    #[serde(default)]
    pub signer_entries: Vec<SignerEntryWrapper>,
    #[serde(default, rename = "hash")]
    pub hash: Option<String>,
    #[serde(default, rename = "engine_result")]
    pub engine_result: Option<String>,
    #[serde(default, rename = "engine_result_message")]
    pub engine_result_message: Option<String>
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct MemoWrapper {
    pub memo: MemoType
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct SignerWrapper {
    pub signer: Signer
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct Signer {
    pub account: String
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct SignerEntryWrapper {
    pub signer_entry: RawSignerEntry
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct RawSignerEntry {
    pub account: String,
    pub signer_weight: u16,
    #[serde(default)]
    pub wallet_locator: Option<String>
}

impl From<RawSignerEntry> for SignerEntry {
    fn from(entry: RawSignerEntry) -> Self {
        SignerEntry {
            account: entry.account,
            weight: entry.signer_weight,
            wallet_locator: entry.wallet_locator
        }
    }
}
