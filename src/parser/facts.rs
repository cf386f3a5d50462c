use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use crate::meta::{interpret, NodeDiagnostic, TransactionContext};
use crate::models::{
    Account, BalanceChange, DecodedMemo, Destination, OfferChange, SignerEntry, TransactionResult, TransactionType
};
use crate::parser::envelope::TransactionEnvelope;
use crate::parser::errors::ParseError;
use crate::types::{drops_to_native, LedgerAmount};

/// `asfRequireDest`, the AccountSet flag that makes destination tags mandatory.
const ASF_REQUIRE_DEST: u32 = 1;

const TRANSACTION_KEYS: [&str; 2] = ["tx", "tx_json"];
const META_KEYS: [&str; 2] = ["meta", "metaData"];
const DELIVERED_KEYS: [&str; 2] = ["delivered_amount", "DeliveredAmount"];

/// Display-ready facts about one transaction.
///
/// This is the single place balance changes and offer statuses are derived;
/// consumers read them from here rather than from the raw metadata.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransactionFacts {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hash: Option<String>,
    pub transaction_type: TransactionType,
    /// The sender, with `SourceTag` as its tag.
    pub account: Account,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destination: Option<Destination>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<LedgerAmount>,
    /// What actually arrived, which can differ from `amount` for partial payments.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delivered_amount: Option<LedgerAmount>,
    /// Fee in native display units.
    pub fee: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sequence: Option<u32>,
    /// Signer list set by a `SignerListSet` transaction.
    pub signers: Vec<SignerEntry>,
    /// Accounts that multi-signed this transaction.
    pub multisigned_by: Vec<String>,
    pub memos: Vec<DecodedMemo>,
    pub result: TransactionResult,
    /// Set when an `AccountSet` turns the destination tag requirement on or off.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub requires_destination_tag: Option<bool>,
    pub balance_changes: Vec<BalanceChange>,
    pub offer_changes: Vec<OfferChange>,
    pub diagnostics: Vec<NodeDiagnostic>
}

impl TransactionFacts {
    /// Builds the facts for a transaction and its metadata.
    ///
    /// # Errors
    /// Returns `ParseError` if:
    /// - The transaction is missing `TransactionType`, `Account` or `Fee`, or a field has the wrong shape.
    /// - The fee is not a valid drops amount.
    /// - The metadata is not a list of affected nodes.
    /// - No engine result is present in the metadata or the envelope.
    pub fn build(transaction: &Value, meta: &Value) -> Result<Self, ParseError> {
        let envelope = TransactionEnvelope::deserialize(transaction)?;

        let fee = drops_to_native(&envelope.fee)?;
        let mut context = TransactionContext::new(envelope.transaction_type.clone(), &envelope.account)
            .with_fee(&envelope.fee)?;

        if let Some(offer_sequence) = envelope.offer_sequence {
            context = context.with_offer_sequence(offer_sequence);
        }

        let interpretation = interpret(meta, &context)?;
        let result = transaction_result(&envelope, meta)?;

        if !interpretation.diagnostics.is_empty() {
            warn!(
                "Transaction [{}] skipped {} malformed metadata node(s)",
                envelope.hash.as_deref().unwrap_or("unknown"),
                interpretation.diagnostics.len()
            );
        }

        let requires_destination_tag = match envelope.transaction_type {
            TransactionType::AccountSet => requires_destination_tag(&envelope),
            _ => None
        };

        Ok(TransactionFacts {
            hash: envelope.hash,
            transaction_type: envelope.transaction_type,
            account: Account::new(&envelope.account, envelope.source_tag),
            destination: envelope.destination
                .as_deref()
                .map(|address| Destination::new(address, envelope.destination_tag)),
            amount: envelope.amount,
            delivered_amount: delivered_amount(meta),
            fee,
            sequence: envelope.sequence,
            signers: envelope.signer_entries.into_iter().map(|wrapper| wrapper.signer_entry.into()).collect(),
            multisigned_by: envelope.signers.into_iter().map(|wrapper| wrapper.signer.account).collect(),
            memos: envelope.memos.iter().map(|wrapper| wrapper.memo.decode()).collect(),
            result,
            requires_destination_tag,
            balance_changes: interpretation.balance_changes,
            offer_changes: interpretation.offer_changes,
            diagnostics: interpretation.diagnostics
        })
    }

    /// Builds the facts from a combined envelope.
    ///
    /// Accepts `{"tx": {..}, "meta": {..}}` as returned by `account_tx`,
    /// `{"tx_json": {..}, "meta": {..}, "hash": ..}`, and a transaction object
    /// carrying its own `meta` or `metaData`.
    pub fn from_envelope(envelope: &Value) -> Result<Self, ParseError> {
        let transaction = TRANSACTION_KEYS.iter()
            .find_map(|key| envelope.get(*key))
            .unwrap_or(envelope);

        let meta = META_KEYS.iter()
            .find_map(|key| envelope.get(*key).or_else(|| transaction.get(*key)))
            .ok_or(ParseError::MissingMetadata)?;

        let mut facts = Self::build(transaction, meta)?;

        if facts.hash.is_none() {
            facts.hash = envelope.get("hash").and_then(Value::as_str).map(str::to_string);
        }

        Ok(facts)
    }

    pub fn is_success(&self) -> bool {
        self.result.success
    }

    /// Balance changes of a single account, e.g. the wallet owner.
    pub fn balance_changes_for<'a>(&'a self, account: &'a str) -> impl Iterator<Item = &'a BalanceChange> + 'a {
        self.balance_changes.iter().filter(move |change| change.account == account)
    }
}

fn transaction_result(envelope: &TransactionEnvelope, meta: &Value) -> Result<TransactionResult, ParseError> {
    let code = meta.get("TransactionResult")
        .and_then(Value::as_str)
        .or(envelope.engine_result.as_deref())
        .ok_or(ParseError::MissingResult)?;

    let mut result = TransactionResult::from_code(code);

    if let Some(message) = &envelope.engine_result_message {
        result.message = Some(message.clone());
    }

    Ok(result)
}

fn delivered_amount(meta: &Value) -> Option<LedgerAmount> {
    let raw = DELIVERED_KEYS.iter().find_map(|key| meta.get(*key))?;

    //NOTE: Transactions from before the field existed report the string "unavailable"
    match LedgerAmount::deserialize(raw) {
        Ok(amount) if amount.to_decimal().is_ok() => Some(amount),
        _ => {
            debug!("Delivered amount is not usable: {raw}");
            None
        }
    }
}

fn requires_destination_tag(envelope: &TransactionEnvelope) -> Option<bool> {
    if envelope.set_flag == Some(ASF_REQUIRE_DEST) {
        Some(true)
    } else if envelope.clear_flag == Some(ASF_REQUIRE_DEST) {
        Some(false)
    } else {
        None
    }
}
