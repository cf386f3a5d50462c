use super::{ParseError, TransactionFacts};
use crate::meta::MetaError;
use crate::models::{BalanceAction, MemoField, OfferStatus, ResultCategory, SignerEntry, TransactionResult, TransactionType};
use crate::types::{AmountError, LedgerAmount};

use anyhow::{anyhow, Result};
use serde_json::{json, Value};

const ALICE: &str = "rf1BiGeXwwQoi8Z2ueFYTEXSwuJYfV2Jpn";
const BOB: &str = "rPEPPER7kfTD9w2To4CQk6UCfuHM9c6GDY";
const CAROL: &str = "rLHzPsX6oXkzU2qL12kHCH8G8cnZv1rBJh";
const TX_HASH: &str = "E08D6E9754025BA2534A78707605E0601F03ACE063687A0CA1BDDACFCD1698C7";

fn payment_transaction() -> Value {
    json!({
        "TransactionType": "Payment",
        "Account": ALICE,
        "Destination": BOB,
        "DestinationTag": 1337,
        "SourceTag": 7,
        "Amount": "10000000",
        "Fee": "12",
        "Sequence": 24,
        "Flags": 2147483648u32,
        "hash": TX_HASH,
        "Memos": [
            { "Memo": { "MemoType": "696E766F696365", "MemoFormat": "746578742F706C61696E", "MemoData": "48656C6C6F" } },
            { "Memo": { "MemoData": "not hex!" } },
            { "Memo": { "MemoData": "FF" } }
        ]
    })
}

fn payment_meta() -> Value {
    json!({
        "AffectedNodes": [
            {
                "ModifiedNode": {
                    "LedgerEntryType": "AccountRoot",
                    "FinalFields": { "Account": ALICE, "Balance": "89999988", "Sequence": 25 },
                    "PreviousFields": { "Balance": "100000000", "Sequence": 24 }
                }
            },
            {
                "ModifiedNode": {
                    "LedgerEntryType": "AccountRoot",
                    "FinalFields": { "Account": BOB, "Balance": "60000000", "Sequence": 3 },
                    "PreviousFields": { "Balance": "50000000" }
                }
            }
        ],
        "TransactionIndex": 0,
        "TransactionResult": "tesSUCCESS",
        "delivered_amount": "10000000"
    })
}

#[test]
fn test_native_payment_facts() -> Result<()> {
    let facts = TransactionFacts::build(&payment_transaction(), &payment_meta())?;

    assert_eq!(facts.hash.as_deref(), Some(TX_HASH));
    assert_eq!(facts.transaction_type, TransactionType::Payment);
    assert_eq!(facts.account.address, ALICE);
    assert_eq!(facts.account.tag, Some(7));
    assert_eq!(facts.account.name, None);

    let destination = facts.destination.as_ref().ok_or_else(|| anyhow!("destination missing"))?;
    assert_eq!((destination.address.as_str(), destination.tag), (BOB, Some(1337)));

    assert_eq!(facts.fee, "0.000012");
    assert_eq!(facts.sequence, Some(24));
    assert_eq!(facts.amount, Some(LedgerAmount::Native("10000000".to_string())));
    assert_eq!(facts.delivered_amount, Some(LedgerAmount::Native("10000000".to_string())));
    assert!(facts.is_success());

    let alice: Vec<_> = facts.balance_changes_for(ALICE).collect();
    assert_eq!(alice.len(), 1);
    assert_eq!((alice[0].action, alice[0].value.as_str()), (BalanceAction::Dec, "10000000"));

    let bob: Vec<_> = facts.balance_changes_for(BOB).collect();
    assert_eq!((bob[0].action, bob[0].value.as_str()), (BalanceAction::Inc, "10000000"));

    Ok(())
}

#[test]
fn test_memos_are_decoded_best_effort() -> Result<()> {
    let facts = TransactionFacts::build(&payment_transaction(), &payment_meta())?;

    assert_eq!(facts.memos.len(), 3);

    let invoice = &facts.memos[0];
    assert_eq!(invoice.memo_type, Some(MemoField::Decoded("invoice".to_string())));
    assert_eq!(invoice.memo_format, Some(MemoField::Decoded("text/plain".to_string())));
    assert_eq!(invoice.memo_data, Some(MemoField::Decoded("Hello".to_string())));
    assert!(invoice.is_fully_decoded());

    let not_hex = &facts.memos[1];
    assert_eq!(not_hex.memo_data, Some(MemoField::Undecodable("not hex!".to_string())));
    assert_eq!(not_hex.memo_type, None);
    assert!(!not_hex.is_fully_decoded());

    let not_utf8 = &facts.memos[2];
    assert_eq!(not_utf8.memo_data.as_ref().map(MemoField::text), Some("FF"));
    assert!(!not_utf8.is_fully_decoded());

    Ok(())
}

#[test]
fn test_invalid_fee_is_an_error_not_zero() {
    let mut transaction = payment_transaction();
    transaction["Fee"] = json!("-12");

    let result = TransactionFacts::build(&transaction, &payment_meta());

    assert!(matches!(result, Err(ParseError::Amount(AmountError::InvalidAmount { .. }))));
}

#[test]
fn test_missing_required_envelope_fields_are_rejected() {
    let mut transaction = payment_transaction();
    if let Some(fields) = transaction.as_object_mut() {
        fields.remove("Account");
    }

    let result = TransactionFacts::build(&transaction, &payment_meta());

    assert!(matches!(result, Err(ParseError::InvalidEnvelope(_))));
}

#[test]
fn test_structural_metadata_errors_propagate() {
    let result = TransactionFacts::build(&payment_transaction(), &json!("120000228000000024"));

    assert!(matches!(result, Err(ParseError::Meta(MetaError::StructuralViolation { .. }))));
}

#[test]
fn test_failed_transaction_keeps_the_raw_code() -> Result<()> {
    let mut meta = payment_meta();
    meta["TransactionResult"] = json!("tecPATH_DRY");

    let facts = TransactionFacts::build(&payment_transaction(), &meta)?;

    assert!(!facts.is_success());
    assert_eq!(facts.result.code, "tecPATH_DRY");
    assert_eq!(facts.result.message.as_deref(), Some("Path could not send partial amount."));
    assert_eq!(facts.result.category(), ResultCategory::ClaimedCost);

    Ok(())
}

#[test]
fn test_result_classification() {
    let unknown = TransactionResult::from_code("xyzSOMETHING_NEW");

    assert!(!unknown.success);
    assert_eq!(unknown.code, "xyzSOMETHING_NEW");
    assert_eq!(unknown.message, None);
    assert_eq!(unknown.category(), ResultCategory::Unknown);

    assert!(TransactionResult::from_code("tesSUCCESS").success);
    assert_eq!(TransactionResult::from_code("tefPAST_SEQ").category(), ResultCategory::Failure);
    assert_eq!(TransactionResult::from_code("temBAD_AMOUNT").category(), ResultCategory::Malformed);
    assert_eq!(TransactionResult::from_code("terQUEUED").category(), ResultCategory::Retry);
    assert_eq!(TransactionResult::from_code("telINSUF_FEE_P").category(), ResultCategory::Local);
    assert_eq!(TransactionResult::from_code("te").category(), ResultCategory::Unknown);
}

#[test]
fn test_engine_result_is_used_when_metadata_has_none() -> Result<()> {
    let mut transaction = payment_transaction();
    transaction["engine_result"] = json!("terQUEUED");
    transaction["engine_result_message"] = json!("Held until escalated fee drops.");

    let mut meta = payment_meta();
    if let Some(fields) = meta.as_object_mut() {
        fields.remove("TransactionResult");
    }

    let facts = TransactionFacts::build(&transaction, &meta)?;

    assert_eq!(facts.result.code, "terQUEUED");
    assert!(!facts.result.success);

    if let Some(fields) = transaction.as_object_mut() {
        fields.remove("engine_result");
    }

    assert!(matches!(TransactionFacts::build(&transaction, &meta), Err(ParseError::MissingResult)));

    Ok(())
}

#[test]
fn test_from_envelope_accepts_the_common_shapes() -> Result<()> {
    let account_tx = json!({ "tx": payment_transaction(), "meta": payment_meta(), "validated": true });

    let mut inline = payment_transaction();
    inline["metaData"] = payment_meta();

    let mut tx_json = payment_transaction();
    if let Some(fields) = tx_json.as_object_mut() {
        fields.remove("hash");
    }
    let api_v2 = json!({ "tx_json": tx_json, "meta": payment_meta(), "hash": TX_HASH });

    for envelope in [account_tx, inline, api_v2] {
        let facts = TransactionFacts::from_envelope(&envelope)?;

        assert_eq!(facts.hash.as_deref(), Some(TX_HASH));
        assert_eq!(facts.balance_changes.len(), 2);
    }

    assert!(matches!(
        TransactionFacts::from_envelope(&payment_transaction()),
        Err(ParseError::MissingMetadata)
    ));

    Ok(())
}

#[test]
fn test_unavailable_delivered_amount_is_dropped() -> Result<()> {
    let mut meta = payment_meta();
    meta["delivered_amount"] = json!("unavailable");

    let facts = TransactionFacts::build(&payment_transaction(), &meta)?;

    assert_eq!(facts.delivered_amount, None);

    Ok(())
}

#[test]
fn test_replacing_offer_create_cancels_the_previous_offer() -> Result<()> {
    let transaction = json!({
        "TransactionType": "OfferCreate",
        "Account": ALICE,
        "Fee": "10",
        "Sequence": 31,
        "OfferSequence": 30,
        "TakerGets": "5000000",
        "TakerPays": { "currency": "USD", "issuer": CAROL, "value": "2" }
    });

    let meta = json!({
        "AffectedNodes": [
            {
                "DeletedNode": {
                    "LedgerEntryType": "Offer",
                    "LedgerIndex": "OLD",
                    "FinalFields": { "Account": ALICE, "Sequence": 30, "TakerGets": "4000000", "TakerPays": { "currency": "USD", "issuer": CAROL, "value": "1.5" } }
                }
            },
            {
                "CreatedNode": {
                    "LedgerEntryType": "Offer",
                    "LedgerIndex": "NEW",
                    "NewFields": { "Account": ALICE, "Sequence": 31, "TakerGets": "5000000", "TakerPays": { "currency": "USD", "issuer": CAROL, "value": "2" } }
                }
            },
            {
                "ModifiedNode": {
                    "LedgerEntryType": "AccountRoot",
                    "FinalFields": { "Account": ALICE, "Balance": "99999990", "Sequence": 32 },
                    "PreviousFields": { "Balance": "100000000", "Sequence": 31 }
                }
            }
        ],
        "TransactionResult": "tesSUCCESS"
    });

    let facts = TransactionFacts::build(&transaction, &meta)?;
    let statuses: Vec<_> = facts.offer_changes.iter().map(|offer| (offer.offer_id.as_str(), offer.status)).collect();

    assert_eq!(statuses, vec![("OLD", OfferStatus::Cancelled), ("NEW", OfferStatus::Created)]);
    assert!(facts.balance_changes.is_empty());

    Ok(())
}

#[test]
fn test_signers_and_destination_tag_requirement() -> Result<()> {
    let signer_list = json!({
        "TransactionType": "SignerListSet",
        "Account": ALICE,
        "Fee": "12",
        "SignerQuorum": 3,
        "SignerEntries": [
            { "SignerEntry": { "Account": BOB, "SignerWeight": 2 } },
            { "SignerEntry": { "Account": CAROL, "SignerWeight": 1, "WalletLocator": "03075E94E1C5F5A2E7C1E1F5B3A4A1A3E9A1B2C3D4E5F6A7B8C9D0E1F2A3B4C5" } }
        ],
        "Signers": [
            { "Signer": { "Account": BOB, "SigningPubKey": "02A1", "TxnSignature": "3044" } },
            { "Signer": { "Account": CAROL, "SigningPubKey": "02B2", "TxnSignature": "3045" } }
        ]
    });
    let meta = json!({ "AffectedNodes": [], "TransactionResult": "tesSUCCESS" });

    let facts = TransactionFacts::build(&signer_list, &meta)?;

    assert_eq!(facts.signers[0], SignerEntry { account: BOB.to_string(), weight: 2, wallet_locator: None });
    assert_eq!(facts.signers[1].account, CAROL);
    assert!(facts.signers[1].wallet_locator.is_some());
    assert_eq!(facts.multisigned_by, vec![BOB.to_string(), CAROL.to_string()]);
    assert_eq!(facts.requires_destination_tag, None);

    let require = json!({ "TransactionType": "AccountSet", "Account": ALICE, "Fee": "12", "SetFlag": 1 });
    let allow = json!({ "TransactionType": "AccountSet", "Account": ALICE, "Fee": "12", "ClearFlag": 1 });

    assert_eq!(TransactionFacts::build(&require, &meta)?.requires_destination_tag, Some(true));
    assert_eq!(TransactionFacts::build(&allow, &meta)?.requires_destination_tag, Some(false));

    Ok(())
}

#[test]
fn test_unknown_transaction_types_are_kept_verbatim() -> Result<()> {
    let transaction = json!({ "TransactionType": "AMMDeposit", "Account": ALICE, "Fee": "12" });
    let meta = json!({ "AffectedNodes": [], "TransactionResult": "tesSUCCESS" });

    let facts = TransactionFacts::build(&transaction, &meta)?;

    assert_eq!(facts.transaction_type, TransactionType::Other("AMMDeposit".to_string()));
    assert_eq!(serde_json::to_value(&facts)?["transaction_type"], json!("AMMDeposit"));

    Ok(())
}
