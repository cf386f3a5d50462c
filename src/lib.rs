//! Interprets ledger transactions and their metadata into display-ready facts:
//! balance changes, offer statuses, decoded memos and result classification.

pub mod meta;
pub mod models;
pub mod parser;
pub mod types;

pub use meta::{interpret, MetaInterpretation, TransactionContext};
pub use parser::{ParseError, TransactionFacts};
