use super::{drops_to_native, format_value, DROPS_PER_NATIVE, native_to_drops, normalize_currency_code, parse_value, AmountError, AmountType, Issuer, LedgerAmount};
use anyhow::Result;
use bigdecimal::BigDecimal;
use serde_json::json;
use std::str::FromStr;

const GATEWAY: &str = "rhub8VRN55s94qWKDv6jmDy1pUykJzF3wq";
const OTHER_GATEWAY: &str = "rvYAfWj5gh67oV6fW32ZzP3Aw4Eubs59B";

fn issued(currency: &str, issuer: &str, value: &str) -> LedgerAmount {
    LedgerAmount::Issued(AmountType::new(currency, Some(issuer), value))
}

#[test]
fn test_drops_to_native_converts_without_precision_loss() -> Result<()> {
    let test_cases = vec![
        ("1000000", "1"),
        ("1500000", "1.5"),
        ("12", "0.000012"),
        ("1", "0.000001"),
        ("0", "0"),
        ("100000000000000000", "100000000000"),
        ("123456789", "123.456789"),
    ];

    for (drops, expected_output) in test_cases {
        assert_eq!(drops_to_native(drops)?, expected_output);
    }

    Ok(())
}

#[test]
fn test_drops_to_native_rejects_invalid_strings() {
    assert!(drops_to_native("").is_err());
    assert!(drops_to_native("-1").is_err());
    assert!(drops_to_native("+1").is_err());
    assert!(drops_to_native("1.5").is_err());
    assert!(drops_to_native("abc").is_err());
    assert!(drops_to_native(" 10").is_err());
    assert!(drops_to_native("99999999999999999999").is_err());

    assert!(matches!(drops_to_native("-1"), Err(AmountError::InvalidAmount { .. })));
}

#[test]
fn test_native_to_drops_is_the_inverse_of_drops_to_native() -> Result<()> {
    assert_eq!(native_to_drops("1.5")?, "1500000");
    assert_eq!(native_to_drops("0.000012")?, "12");
    assert_eq!(native_to_drops("25")?, "25000000");
    assert_eq!(native_to_drops("1")?, DROPS_PER_NATIVE.to_string());

    for drops in ["1", "999999", "1000000", "4294967296"] {
        assert_eq!(native_to_drops(&drops_to_native(drops)?)?, drops);
    }

    Ok(())
}

#[test]
fn test_native_to_drops_rejects_sub_drop_and_negative_values() {
    assert!(native_to_drops("0.0000001").is_err());
    assert!(native_to_drops("-1").is_err());
    assert!(native_to_drops("one").is_err());
}

#[test]
fn test_parse_value_accepts_scientific_notation() -> Result<()> {
    assert_eq!(parse_value("1e-3")?, BigDecimal::from_str("0.001")?);
    assert_eq!(parse_value("1.5E2")?, BigDecimal::from_str("150")?);
    assert_eq!(parse_value("-0.25")?, BigDecimal::from_str("-0.25")?);
    assert!(parse_value("").is_err());
    assert!(parse_value("1..2").is_err());

    Ok(())
}

#[test]
fn test_parse_value_covers_the_whole_issued_range() -> Result<()> {
    let smallest = parse_value("1e-81")?;
    let largest = parse_value("9999999999999999e80")?;

    assert!(smallest > BigDecimal::from(0));
    assert!(largest > parse_value("1e95")?);
    assert_eq!(parse_value("1e30")?, BigDecimal::from_str("1000000000000000000000000000000")?);
    assert_eq!(parse_value("-1234567890123456e-96")?, BigDecimal::from_str("-1.234567890123456e-81")?);
    assert_eq!(parse_value("0e-500")?, BigDecimal::from(0));

    assert!(matches!(parse_value("1e-200"), Err(AmountError::InvalidAmount { .. })));
    assert!(matches!(parse_value("1e200"), Err(AmountError::InvalidAmount { .. })));

    Ok(())
}

#[test]
fn test_values_are_formatted_canonically() -> Result<()> {
    let test_cases = vec![
        ("0.001", "0.001"),
        ("1.50", "1.5"),
        ("-0.25", "-0.25"),
        ("1.5E2", "150"),
        ("0", "0"),
        ("50000000000000000000000000000", "50000000000000000000000000000"),
        ("1e30", "1e30"),
        ("1e-81", "1e-81"),
        ("9999999999999999e80", "9999999999999999e80"),
        ("-1234567890123456e-96", "-1234567890123456e-96"),
    ];

    for (input, expected_output) in test_cases {
        let formatted = format_value(&parse_value(input)?);

        assert_eq!(formatted, expected_output);
        assert_eq!(parse_value(&formatted)?, parse_value(input)?);
    }

    Ok(())
}

#[test]
fn test_ledger_amount_deserializes_both_shapes() -> Result<()> {
    let native: LedgerAmount = serde_json::from_value(json!("10000000"))?;
    let issued_amount: LedgerAmount = serde_json::from_value(json!({
        "currency": "USD",
        "issuer": GATEWAY,
        "value": "12.5"
    }))?;

    assert!(native.is_native());
    assert_eq!(native.currency(), "XRP");
    assert_eq!(native.issuer(), None);
    assert_eq!(native.display_value()?, "10");

    assert!(!issued_amount.is_native());
    assert_eq!(issued_amount.currency(), "USD");
    assert_eq!(issued_amount.issuer(), Some(GATEWAY));
    assert_eq!(issued_amount.display_value()?, "12.5");

    Ok(())
}

#[test]
fn test_equality_is_reflexive_and_symmetric() {
    let amounts = vec![
        LedgerAmount::Native("1000".to_string()),
        LedgerAmount::Native("not-a-number".to_string()),
        issued("USD", GATEWAY, "1"),
        issued("USD", GATEWAY, "bogus"),
    ];

    for left in &amounts {
        assert!(left.equals(left));

        for right in &amounts {
            assert_eq!(left.equals(right), right.equals(left));
        }
    }
}

#[test]
fn test_equality_normalizes_values_but_never_ignores_currency_or_issuer() {
    assert!(issued("USD", GATEWAY, "1.0").equals(&issued("USD", GATEWAY, "1")));
    assert!(issued("USD", GATEWAY, "1e0").equals(&issued("USD", GATEWAY, "1.000")));
    assert!(LedgerAmount::Native("0010".to_string()).equals(&LedgerAmount::Native("10".to_string())));

    assert!(!issued("USD", GATEWAY, "1").equals(&issued("EUR", GATEWAY, "1")));
    assert!(!issued("USD", GATEWAY, "1").equals(&issued("USD", OTHER_GATEWAY, "1")));
    assert!(!issued("XRP", GATEWAY, "1000").equals(&LedgerAmount::Native("1000".to_string())));
    assert_ne!(issued("USD", GATEWAY, "1"), issued("USD", GATEWAY, "2"));
}

#[test]
fn test_checked_sub_keeps_the_representation() -> Result<()> {
    let native = LedgerAmount::Native("1500".to_string()).checked_sub(&LedgerAmount::Native("500".to_string()))?;
    let issued_amount = issued("USD", GATEWAY, "10").checked_sub(&issued("USD", GATEWAY, "2.50"))?;

    assert_eq!(native, LedgerAmount::Native("1000".to_string()));
    assert!(matches!(&issued_amount, LedgerAmount::Issued(amount) if amount.value == "7.5"));

    let tiny = issued("USD", GATEWAY, "3e-81").checked_sub(&issued("USD", GATEWAY, "1e-81"))?;
    let huge = issued("USD", GATEWAY, "9999999999999999e80").checked_sub(&issued("USD", GATEWAY, "1e80"))?;

    assert!(matches!(&tiny, LedgerAmount::Issued(amount) if amount.value == "2e-81"));
    assert!(matches!(&huge, LedgerAmount::Issued(amount) if amount.value == "9999999999999998e80"));

    assert!(issued("USD", GATEWAY, "10").checked_sub(&LedgerAmount::Native("1".to_string())).is_err());
    assert!(issued("USD", GATEWAY, "10").checked_sub(&issued("USD", OTHER_GATEWAY, "1")).is_err());

    Ok(())
}

#[test]
fn test_native_issuer_never_carries_an_issuer() {
    assert!(Issuer::native().is_native());
    assert!(!Issuer::issued("USD", GATEWAY).is_native());
}

#[test]
fn test_currency_codes_are_normalized_for_display() {
    assert_eq!(normalize_currency_code("USD"), "USD");
    assert_eq!(normalize_currency_code("0000000000000000000000005553440000000000"), "USD");
    assert_eq!(normalize_currency_code("534F4C4F00000000000000000000000000000000"), "SOLO");

    let unreadable = "03E8A1F2D3C4B5A6978812345678900000000000";
    assert_eq!(normalize_currency_code(unreadable), unreadable);

    let not_hex = "ZZZZZZZZZZZZZZZZZZZZZZZZZZZZZZZZZZZZZZZZ";
    assert_eq!(normalize_currency_code(not_hex), not_hex);
}
