mod account;
mod balance_change;
mod memo;
mod offer;
mod result;
mod transaction;
mod trustline;

pub use account::{Account, Destination, SignerEntry};
pub use balance_change::{BalanceAction, BalanceChange};
pub use memo::{DecodedMemo, MemoField, MemoType};
pub use offer::{OfferChange, OfferStatus};
pub use result::{ResultCategory, TransactionResult};
pub use transaction::TransactionType;
pub use trustline::Trustline;
