use bigdecimal::BigDecimal;
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::meta::errors::{MetaError, NodeError};
use crate::types::{parse_value, LedgerAmount};

pub(crate) const ACCOUNT_ROOT: &str = "AccountRoot";
pub(crate) const RIPPLE_STATE: &str = "RippleState";
pub(crate) const OFFER: &str = "Offer";

pub(crate) const ACCOUNT: &str = "Account";
pub(crate) const BALANCE: &str = "Balance";
pub(crate) const LOW_LIMIT: &str = "LowLimit";
pub(crate) const HIGH_LIMIT: &str = "HighLimit";

const AFFECTED_NODES: &str = "AffectedNodes";

#[derive(Debug, Deserialize)]
enum AffectedNode {
    CreatedNode(RawNode),
    ModifiedNode(RawNode),
    DeletedNode(RawNode)
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct RawNode {
    ledger_entry_type: String,
    #[serde(default)]
    ledger_index: Option<String>,
    #[serde(default)]
    new_fields: Option<Value>,
    #[serde(default)]
    final_fields: Option<Value>,
    #[serde(default)]
    previous_fields: Option<Value>
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum NodeAction {
    Created,
    Modified,
    Deleted
}

/// One affected ledger entry with its before and after snapshots.
///
/// Snapshots are kept as raw JSON; shape problems inside them surface as
/// `NodeError` when a field is read, so a single bad node can be skipped.
#[derive(Debug)]
pub(crate) struct LedgerNode {
    pub index: usize,
    pub action: NodeAction,
    pub entry_type: String,
    pub ledger_index: Option<String>,
    current: Option<Value>,
    previous: Option<Value>
}

/// Reads `AffectedNodes` out of the metadata container.
///
/// # Errors
/// Returns `MetaError::StructuralViolation` when the container is not an object,
/// has no node array, or any element is not a created/modified/deleted node.
pub(crate) fn parse_affected_nodes(meta: &Value) -> Result<Vec<LedgerNode>, MetaError> {
    let container = meta.as_object()
        .ok_or_else(|| MetaError::structural("Metadata is not an object"))?;

    let nodes = container.get(AFFECTED_NODES)
        .ok_or_else(|| MetaError::structural("Metadata has no AffectedNodes"))?
        .as_array()
        .ok_or_else(|| MetaError::structural("AffectedNodes is not an array"))?;

    nodes.iter().enumerate()
        .map(|(index, node)| {
            AffectedNode::deserialize(node)
                .map(|node| LedgerNode::new(index, node))
                .map_err(|error| MetaError::structural(format!("Affected node [{index}] is not a ledger node: {error}")))
        })
        .collect()
}

impl LedgerNode {
    fn new(index: usize, node: AffectedNode) -> Self {
        let (action, raw) = match node {
            AffectedNode::CreatedNode(raw) => (NodeAction::Created, raw),
            AffectedNode::ModifiedNode(raw) => (NodeAction::Modified, raw),
            AffectedNode::DeletedNode(raw) => (NodeAction::Deleted, raw)
        };

        let current = match action {
            NodeAction::Created => raw.new_fields,
            NodeAction::Modified | NodeAction::Deleted => raw.final_fields
        };

        Self {
            index,
            action,
            entry_type: raw.ledger_entry_type,
            ledger_index: raw.ledger_index,
            current,
            previous: raw.previous_fields
        }
    }

    /// The snapshot after the transaction: `NewFields` for created nodes, `FinalFields` otherwise.
    pub fn fields(&self) -> Result<Option<&Map<String, Value>>, NodeError> {
        let name = match self.action {
            NodeAction::Created => "NewFields",
            NodeAction::Modified | NodeAction::Deleted => "FinalFields"
        };

        as_map(self.current.as_ref(), name)
    }

    pub fn previous_fields(&self) -> Result<Option<&Map<String, Value>>, NodeError> {
        as_map(self.previous.as_ref(), "PreviousFields")
    }

    pub fn field(&self, name: &str) -> Result<Option<&Value>, NodeError> {
        Ok(self.fields()?.and_then(|fields| fields.get(name)))
    }

    pub fn previous_field(&self, name: &str) -> Result<Option<&Value>, NodeError> {
        Ok(self.previous_fields()?.and_then(|fields| fields.get(name)))
    }

    pub fn require_str(&self, name: &'static str) -> Result<&str, NodeError> {
        let value = self.field(name)?.ok_or_else(|| NodeError::missing(name))?;
        string_value(value, name)
    }
}

fn as_map<'a>(value: Option<&'a Value>, name: &'static str) -> Result<Option<&'a Map<String, Value>>, NodeError> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Object(map)) => Ok(Some(map)),
        Some(_) => Err(NodeError::invalid(name, "Snapshot is not an object"))
    }
}

pub(crate) fn string_value<'a>(value: &'a Value, name: &'static str) -> Result<&'a str, NodeError> {
    value.as_str().ok_or_else(|| NodeError::invalid(name, "Expected a string"))
}

pub(crate) fn u32_value(value: &Value, name: &'static str) -> Result<u32, NodeError> {
    value.as_u64()
        .and_then(|number| u32::try_from(number).ok())
        .ok_or_else(|| NodeError::invalid(name, "Expected an unsigned 32-bit integer"))
}

pub(crate) fn amount_value(value: &Value, name: &'static str) -> Result<LedgerAmount, NodeError> {
    let amount = LedgerAmount::deserialize(value).map_err(|error| NodeError::invalid(name, error))?;
    amount.to_decimal().map_err(|error| NodeError::invalid(name, error))?;

    Ok(amount)
}

/// Reads the `value` of an issued-currency object such as `Balance` or `LowLimit`.
pub(crate) fn issued_value(value: &Value, name: &'static str) -> Result<BigDecimal, NodeError> {
    let raw = value.get("value").ok_or_else(|| NodeError::invalid(name, "Amount has no value"))?;
    parse_value(string_value(raw, name)?).map_err(|error| NodeError::invalid(name, error))
}

/// Reads a string member of an issued-currency object, e.g. the `issuer` of `HighLimit`.
pub(crate) fn issued_member<'a>(value: &'a Value, member: &str, name: &'static str) -> Result<&'a str, NodeError> {
    let raw = value.get(member)
        .ok_or_else(|| NodeError::invalid(name, format!("Amount has no {member}")))?;

    string_value(raw, name)
}
