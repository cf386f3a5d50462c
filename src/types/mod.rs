mod amount;
mod currency;
mod errors;
#[cfg(test)]
mod tests;
mod value;

pub use amount::{drops_to_native, native_to_drops, AmountType, Issuer, LedgerAmount};
pub(crate) use amount::drops_value;
pub use value::parse_value;
pub(crate) use value::format_value;
pub use currency::normalize_currency_code;
pub use errors::AmountError;

/// Currency code of the ledger's native asset.
pub const NATIVE_CURRENCY: &str = "XRP";

/// Number of drops in one unit of the native asset.
pub const DROPS_PER_NATIVE: u32 = 1_000_000;

/// Fractional digits carried by a native display value.
pub const NATIVE_DECIMAL_PLACES: u32 = 6;
