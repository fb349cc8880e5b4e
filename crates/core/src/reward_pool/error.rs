//! Reward pool error types.

use helptoken_shared::ContractAddress;
use thiserror::Error;

/// Errors that can occur when depositing into a reward pool.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PoolError {
    /// Deposit came from a ledger other than the one the pool was deployed for.
    #[error("Pool accepts deposits from ledger {expected} only, got {actual}")]
    UnauthorizedDepositor {
        /// The ledger the pool is bound to.
        expected: ContractAddress,
        /// The ledger that attempted the deposit.
        actual: ContractAddress,
    },

    /// Deposit would overflow the pool balance.
    #[error("Pool balance overflow")]
    Overflow,
}

impl PoolError {
    /// Returns the machine-readable error code.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::UnauthorizedDepositor { .. } => "POOL_UNAUTHORIZED_DEPOSITOR",
            Self::Overflow => "POOL_OVERFLOW",
        }
    }
}
