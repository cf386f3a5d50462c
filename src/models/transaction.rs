use std::fmt;
use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

/// Ledger transaction types this crate knows by name.
///
/// Anything else is kept verbatim in `Other` so no envelope is rejected for
/// carrying a newer type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TransactionType {
    Payment,
    OfferCreate,
    OfferCancel,
    TrustSet,
    AccountSet,
    AccountDelete,
    SetRegularKey,
    SignerListSet,
    EscrowCreate,
    EscrowFinish,
    EscrowCancel,
    PaymentChannelCreate,
    PaymentChannelFund,
    PaymentChannelClaim,
    CheckCreate,
    CheckCash,
    CheckCancel,
    DepositPreauth,
    TicketCreate,
    Other(String)
}

impl TransactionType {
    pub fn as_str(&self) -> &str {
        match self {
            TransactionType::Payment => "Payment",
            TransactionType::OfferCreate => "OfferCreate",
            TransactionType::OfferCancel => "OfferCancel",
            TransactionType::TrustSet => "TrustSet",
            TransactionType::AccountSet => "AccountSet",
            TransactionType::AccountDelete => "AccountDelete",
            TransactionType::SetRegularKey => "SetRegularKey",
            TransactionType::SignerListSet => "SignerListSet",
            TransactionType::EscrowCreate => "EscrowCreate",
            TransactionType::EscrowFinish => "EscrowFinish",
            TransactionType::EscrowCancel => "EscrowCancel",
            TransactionType::PaymentChannelCreate => "PaymentChannelCreate",
            TransactionType::PaymentChannelFund => "PaymentChannelFund",
            TransactionType::PaymentChannelClaim => "PaymentChannelClaim",
            TransactionType::CheckCreate => "CheckCreate",
            TransactionType::CheckCash => "CheckCash",
            TransactionType::CheckCancel => "CheckCancel",
            TransactionType::DepositPreauth => "DepositPreauth",
            TransactionType::TicketCreate => "TicketCreate",
            TransactionType::Other(name) => name
        }
    }

    /// Whether the transaction can consume offers by crossing the order book.
    pub fn is_exchange(&self) -> bool {
        matches!(self, TransactionType::Payment | TransactionType::OfferCreate)
    }
}

impl From<String> for TransactionType {
    fn from(name: String) -> Self {
        match name.as_str() {
            "Payment" => TransactionType::Payment,
            "OfferCreate" => TransactionType::OfferCreate,
            "OfferCancel" => TransactionType::OfferCancel,
            "TrustSet" => TransactionType::TrustSet,
            "AccountSet" => TransactionType::AccountSet,
            "AccountDelete" => TransactionType::AccountDelete,
            "SetRegularKey" => TransactionType::SetRegularKey,
            "SignerListSet" => TransactionType::SignerListSet,
            "EscrowCreate" => TransactionType::EscrowCreate,
            "EscrowFinish" => TransactionType::EscrowFinish,
            "EscrowCancel" => TransactionType::EscrowCancel,
            "PaymentChannelCreate" => TransactionType::PaymentChannelCreate,
            "PaymentChannelFund" => TransactionType::PaymentChannelFund,
            "PaymentChannelClaim" => TransactionType::PaymentChannelClaim,
            "CheckCreate" => TransactionType::CheckCreate,
            "CheckCash" => TransactionType::CheckCash,
            "CheckCancel" => TransactionType::CheckCancel,
            "DepositPreauth" => TransactionType::DepositPreauth,
            "TicketCreate" => TransactionType::TicketCreate,
            _ => TransactionType::Other(name)
        }
    }
}

impl From<&str> for TransactionType {
    fn from(name: &str) -> Self {
        TransactionType::from(name.to_string())
    }
}

impl From<TransactionType> for String {
    fn from(transaction_type: TransactionType) -> Self {
        transaction_type.as_str().to_string()
    }
}

impl Display for TransactionType {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}
