use serde::Serialize;
use thiserror::Error;

/// Failures that make the whole metadata unusable.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MetaError {
    #[error("Metadata structural violation: {reason}")]
    StructuralViolation {
        reason: String
    }
}

impl MetaError {
    pub fn structural(reason: impl Into<String>) -> Self {
        Self::StructuralViolation { reason: reason.into() }
    }
}

/// Why a single recognized node could not be interpreted.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NodeError {
    #[error("Field [{field}] is missing")]
    MissingField {
        field: &'static str
    },
    #[error("Field [{field}] is invalid: {reason}")]
    InvalidField {
        field: &'static str,
        reason: String
    }
}

impl NodeError {
    pub fn missing(field: &'static str) -> Self {
        Self::MissingField { field }
    }

    pub fn invalid(field: &'static str, reason: impl ToString) -> Self {
        Self::InvalidField { field, reason: reason.to_string() }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    MalformedMetadataNode
}

/// A node that was skipped, with enough context to find it in the input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NodeDiagnostic {
    /// Position within `AffectedNodes`.
    pub index: usize,
    pub ledger_entry_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ledger_index: Option<String>,
    pub kind: DiagnosticKind,
    pub reason: String
}
