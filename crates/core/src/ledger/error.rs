//! Ledger error types.
//!
//! Every variant is raised before any balance is touched, so a caller that
//! receives one of these can assume the ledger is exactly as it was.

use helptoken_shared::{Amount, AppError, ContractAddress};
use thiserror::Error;

use crate::reward_pool::PoolError;

/// Errors that can occur during ledger operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LedgerError {
    // ========== Validation Errors ==========
    /// Transfer amount must be greater than zero.
    #[error("Transfer amount must be greater than zero")]
    InvalidAmount,

    /// Sender does not hold enough tokens.
    #[error("Insufficient balance: available {available}, requested {requested}")]
    InsufficientBalance {
        /// Sender's balance at the time of the request.
        available: Amount,
        /// Gross amount the sender tried to move.
        requested: Amount,
    },

    /// Fee schedule rejected at construction.
    #[error("Invalid fee schedule: {0}")]
    InvalidFeeSchedule(String),

    // ========== Wiring Errors ==========
    /// The reward pool passed in was deployed for a different ledger.
    #[error("Reward pool serves ledger {actual}, expected {expected}")]
    PoolMismatch {
        /// This ledger's address.
        expected: ContractAddress,
        /// The ledger address the pool is bound to.
        actual: ContractAddress,
    },

    /// Reward pool refused a deposit.
    #[error(transparent)]
    Pool(#[from] PoolError),

    // ========== Invariant Errors ==========
    /// A credit would exceed the representable range.
    #[error("Arithmetic overflow while applying transfer")]
    ArithmeticOverflow,

    /// Balances, pool and burned tally no longer add up to the total supply.
    #[error("Conservation violated: accounted {accounted}, total supply {total_supply}")]
    ConservationViolated {
        /// Sum of balances, pool balance and burned tally.
        accounted: Amount,
        /// The fixed total supply.
        total_supply: Amount,
    },
}

impl LedgerError {
    /// Returns the machine-readable error code.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidAmount => "INVALID_AMOUNT",
            Self::InsufficientBalance { .. } => "INSUFFICIENT_BALANCE",
            Self::InvalidFeeSchedule(_) => "INVALID_FEE_SCHEDULE",
            Self::PoolMismatch { .. } => "POOL_MISMATCH",
            Self::Pool(err) => err.error_code(),
            Self::ArithmeticOverflow => "ARITHMETIC_OVERFLOW",
            Self::ConservationViolated { .. } => "CONSERVATION_VIOLATED",
        }
    }

    /// Returns true if the caller can fix the request and retry.
    ///
    /// Wiring and invariant errors indicate a broken deployment, not a bad request.
    #[must_use]
    pub fn is_caller_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidAmount | Self::InsufficientBalance { .. } | Self::InvalidFeeSchedule(_)
        )
    }
}

impl From<LedgerError> for AppError {
    fn from(err: LedgerError) -> Self {
        match err {
            LedgerError::InvalidFeeSchedule(_) => Self::Validation(err.to_string()),
            LedgerError::InvalidAmount | LedgerError::InsufficientBalance { .. } => {
                Self::BusinessRule(err.to_string())
            }
            LedgerError::PoolMismatch { .. }
            | LedgerError::Pool(_)
            | LedgerError::ArithmeticOverflow
            | LedgerError::ConservationViolated { .. } => Self::Internal(err.to_string()),
        }
    }
}
