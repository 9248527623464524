//! Ledger aggregation errors.

use thiserror::Error;

/// Errors that can occur while aggregating ledger amounts.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    /// An amount or a sum of amounts does not fit in a decimal.
    #[error("Amount overflow while computing {0}")]
    Overflow(&'static str),
}
