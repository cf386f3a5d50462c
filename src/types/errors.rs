use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AmountError {
    #[error("Invalid amount [{value}]: {reason}")]
    InvalidAmount {
        value: String,
        reason: String
    }
}

impl AmountError {
    pub fn invalid(value: &str, reason: impl Into<String>) -> Self {
        Self::InvalidAmount {
            value: value.to_string(),
            reason: reason.into()
        }
    }
}
