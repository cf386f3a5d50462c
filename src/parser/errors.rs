use thiserror::Error;

use crate::meta::MetaError;
use crate::types::AmountError;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("Invalid transaction envelope: {0}")]
    InvalidEnvelope(#[from] serde_json::Error),
    #[error(transparent)]
    Amount(#[from] AmountError),
    #[error(transparent)]
    Meta(#[from] MetaError),
    #[error("Transaction has no metadata")]
    MissingMetadata,
    #[error("Transaction has neither a metadata result nor an engine result")]
    MissingResult
}
