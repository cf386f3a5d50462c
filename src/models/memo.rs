use serde::{Deserialize, Serialize};

/// A transaction memo as stored on the ledger, every field hex encoded.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct MemoType {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memo_data: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memo_format: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memo_type: Option<String>
}

/// A single memo field after hex decoding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "value", rename_all = "lowercase")]
pub enum MemoField {
    Decoded(String),
    /// The raw field, which was not hex or did not hold UTF-8 text.
    Undecodable(String)
}

impl MemoField {
    pub fn decode(raw: &str) -> Self {
        match hex::decode(raw).map(String::from_utf8) {
            Ok(Ok(text)) => MemoField::Decoded(text),
            _ => MemoField::Undecodable(raw.to_string())
        }
    }

    pub fn is_decoded(&self) -> bool {
        matches!(self, MemoField::Decoded(_))
    }

    /// The decoded text, or the raw field when it could not be decoded.
    pub fn text(&self) -> &str {
        match self {
            MemoField::Decoded(text) | MemoField::Undecodable(text) => text
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecodedMemo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memo_type: Option<MemoField>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memo_format: Option<MemoField>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memo_data: Option<MemoField>
}

impl MemoType {
    pub fn decode(&self) -> DecodedMemo {
        DecodedMemo {
            memo_type: self.memo_type.as_deref().map(MemoField::decode),
            memo_format: self.memo_format.as_deref().map(MemoField::decode),
            memo_data: self.memo_data.as_deref().map(MemoField::decode)
        }
    }
}

impl DecodedMemo {
    pub fn is_fully_decoded(&self) -> bool {
        [&self.memo_type, &self.memo_format, &self.memo_data]
            .into_iter()
            .flatten()
            .all(MemoField::is_decoded)
    }
}
