mod envelope;
mod errors;
mod facts;
#[cfg(test)]
mod tests;

pub use errors::ParseError;
pub use facts::TransactionFacts;
