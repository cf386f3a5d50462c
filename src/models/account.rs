use serde::{Deserialize, Serialize};

/// A ledger account as shown to the user.
///
/// Only `address` comes from the ledger. The display `name` is resolved by the
/// caller (contact book, known accounts) and attached with [`Account::with_name`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub address: String,
    /// Source or destination tag routing to a sub-account.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<u32>
}

pub type Destination = Account;

impl Account {
    pub fn new(address: &str, tag: Option<u32>) -> Self {
        Self {
            name: None,
            address: address.to_string(),
            tag
        }
    }

    pub fn with_name(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }
}

/// One entry of a multi-signer list, in the order the ledger lists them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignerEntry {
    pub account: String,
    pub weight: u16,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wallet_locator: Option<String>
}
