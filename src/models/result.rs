use serde::{Deserialize, Serialize};

/// Engine result codes that mean the transaction was applied as intended.
pub const SUCCESS_CODES: &[&str] = &["tesSUCCESS"];

/// Canonical outcome of a transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionResult {
    pub success: bool,
    /// The engine result code, verbatim.
    pub code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>
}

/// Engine result families, keyed by the code prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResultCategory {
    /// `tes`: applied successfully.
    Success,
    /// `tec`: included in a ledger, fee claimed, intended effect not applied.
    ClaimedCost,
    /// `tef`: failed, not included.
    Failure,
    /// `tel`: rejected by the local server.
    Local,
    /// `tem`: malformed transaction.
    Malformed,
    /// `ter`: may succeed when retried.
    Retry,
    Unknown
}

impl TransactionResult {
    pub fn from_code(code: &str) -> Self {
        Self {
            success: SUCCESS_CODES.contains(&code),
            code: code.to_string(),
            message: describe(code).map(str::to_string)
        }
    }

    pub fn category(&self) -> ResultCategory {
        match self.code.get(..3) {
            Some("tes") => ResultCategory::Success,
            Some("tec") => ResultCategory::ClaimedCost,
            Some("tef") => ResultCategory::Failure,
            Some("tel") => ResultCategory::Local,
            Some("tem") => ResultCategory::Malformed,
            Some("ter") => ResultCategory::Retry,
            _ => ResultCategory::Unknown
        }
    }
}

fn describe(code: &str) -> Option<&'static str> {
    let message = match code {
        "tesSUCCESS" => "The transaction was applied.",
        "tecCLAIM" => "Fee claimed. Sequence used. No action.",
        "tecDIR_FULL" => "Can not add entry to full directory.",
        "tecDST_TAG_NEEDED" => "A destination tag is required.",
        "tecEXPIRED" => "Expiration time is passed.",
        "tecINSUF_RESERVE_LINE" => "Insufficient reserve to add trust line.",
        "tecINSUF_RESERVE_OFFER" => "Insufficient reserve to create offer.",
        "tecINSUFFICIENT_RESERVE" => "Insufficient reserve to complete requested operation.",
        "tecKILLED" => "FillOrKill offer killed.",
        "tecNO_DST" => "Destination does not exist. Send XRP to create it.",
        "tecNO_DST_INSUF_XRP" => "Destination does not exist. Too little XRP sent to create it.",
        "tecNO_LINE" => "No such line.",
        "tecNO_LINE_INSUF_RESERVE" => "No such line. Too little reserve to create it.",
        "tecNO_PERMISSION" => "No permission to perform requested operation.",
        "tecNO_ENTRY" => "No matching entry found.",
        "tecOWNERS" => "Non-zero owner count.",
        "tecPATH_DRY" => "Path could not send partial amount.",
        "tecPATH_PARTIAL" => "Path could not send full amount.",
        "tecUNFUNDED_OFFER" => "Insufficient balance to fund created offer.",
        "tecUNFUNDED_PAYMENT" => "Insufficient XRP balance to send.",
        "tefALREADY" => "The exact transaction was already in this ledger.",
        "tefMAX_LEDGER" => "Ledger sequence too high.",
        "tefPAST_SEQ" => "This sequence number has already passed.",
        "tefBAD_AUTH" => "Transaction's public key is not authorized.",
        "telINSUF_FEE_P" => "Fee insufficient.",
        "temBAD_AMOUNT" => "Can only send positive amounts.",
        "temBAD_FEE" => "Invalid fee, negative or not XRP.",
        "temREDUNDANT" => "Sends same currency to self.",
        "temDST_IS_SRC" => "Destination may not be source.",
        "terQUEUED" => "Held until escalated fee drops.",
        "terPRE_SEQ" => "Missing/inapplicable prior transaction.",
        "terNO_ACCOUNT" => "The source account does not exist.",
        _ => return None
    };

    Some(message)
}
