use serde_json::{Map, Value};

use crate::meta::errors::NodeError;
use crate::meta::nodes::{issued_member, issued_value, u32_value, BALANCE, HIGH_LIMIT, LOW_LIMIT};
use crate::models::Trustline;
use crate::types::format_value;

const FLAGS: &str = "Flags";

const LSF_LOW_AUTH: u32 = 0x0004_0000;
const LSF_HIGH_AUTH: u32 = 0x0008_0000;
const LSF_LOW_NO_RIPPLE: u32 = 0x0010_0000;
const LSF_HIGH_NO_RIPPLE: u32 = 0x0020_0000;
const LSF_LOW_FREEZE: u32 = 0x0040_0000;
const LSF_HIGH_FREEZE: u32 = 0x0080_0000;

/// Flag bits and field names for one side of a `RippleState` entry.
struct Side {
    limit: &'static str,
    quality_in: &'static str,
    quality_out: &'static str,
    auth: u32,
    no_ripple: u32,
    freeze: u32
}

const LOW_SIDE: Side = Side {
    limit: LOW_LIMIT,
    quality_in: "LowQualityIn",
    quality_out: "LowQualityOut",
    auth: LSF_LOW_AUTH,
    no_ripple: LSF_LOW_NO_RIPPLE,
    freeze: LSF_LOW_FREEZE
};

const HIGH_SIDE: Side = Side {
    limit: HIGH_LIMIT,
    quality_in: "HighQualityIn",
    quality_out: "HighQualityOut",
    auth: LSF_HIGH_AUTH,
    no_ripple: LSF_HIGH_NO_RIPPLE,
    freeze: LSF_HIGH_FREEZE
};

impl Trustline {
    /// Builds `owner`'s view of a `RippleState` entry.
    ///
    /// # Errors
    /// Returns `NodeError` if a balance or limit is missing or malformed, or if
    /// `owner` is neither party of the line.
    pub fn from_ripple_state(owner: &str, fields: &Map<String, Value>) -> Result<Trustline, NodeError> {
        let field = |name: &'static str| fields.get(name).ok_or_else(|| NodeError::missing(name));

        let low_limit = field(LOW_LIMIT)?;
        let high_limit = field(HIGH_LIMIT)?;
        let balance = field(BALANCE)?;

        let low = issued_member(low_limit, "issuer", LOW_LIMIT)?;
        let high = issued_member(high_limit, "issuer", HIGH_LIMIT)?;

        let (own, peer, own_limit, peer_limit, peer_account, is_low) = if owner == low {
            (&LOW_SIDE, &HIGH_SIDE, low_limit, high_limit, high, true)
        } else if owner == high {
            (&HIGH_SIDE, &LOW_SIDE, high_limit, low_limit, low, false)
        } else {
            return Err(NodeError::invalid(LOW_LIMIT, format!("Account [{owner}] is not a party of this trust line")));
        };

        let low_balance = issued_value(balance, BALANCE)?;
        let own_balance = if is_low { low_balance } else { -low_balance };

        let flags = fields.get(FLAGS).map(|value| u32_value(value, FLAGS)).transpose()?.unwrap_or(0);
        let quality = |name: &'static str| -> Result<u32, NodeError> {
            fields.get(name).map(|value| u32_value(value, name)).transpose().map(|value| value.unwrap_or(0))
        };

        Ok(Trustline {
            account: peer_account.to_string(),
            balance: format_value(&own_balance),
            currency: issued_member(balance, "currency", BALANCE)?.to_string(),
            limit: format_value(&issued_value(own_limit, own.limit)?),
            limit_peer: format_value(&issued_value(peer_limit, peer.limit)?),
            quality_in: quality(own.quality_in)?,
            quality_out: quality(own.quality_out)?,
            no_ripple: flags & own.no_ripple != 0,
            no_ripple_peer: flags & peer.no_ripple != 0,
            freeze: flags & own.freeze != 0,
            freeze_peer: flags & peer.freeze != 0,
            authorized: flags & own.auth != 0,
            peer_authorized: flags & peer.auth != 0
        })
    }
}
