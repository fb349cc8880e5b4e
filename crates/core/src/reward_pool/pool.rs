//! Accumulate-only reward pool.

use helptoken_shared::{Amount, ContractAddress};
use serde::Serialize;
use tracing::debug;

use super::error::PoolError;

/// A deposit that has passed every check and can no longer fail.
///
/// Produced by [`RewardPool::prepare_deposit`] and consumed by
/// [`RewardPool::commit_deposit`], letting the ledger validate the pool side
/// of a transfer before it mutates any balance.
#[derive(Debug)]
#[must_use]
pub(crate) struct PendingDeposit {
    amount: Amount,
    new_balance: Amount,
}

/// Passive accumulator for transfer fees.
///
/// The pool is bound to one ledger at deployment and only that ledger can
/// credit it. There is no withdrawal path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RewardPool {
    address: ContractAddress,
    ledger: ContractAddress,
    balance: Amount,
    deposit_count: u64,
}

impl RewardPool {
    /// Deploys a pool that serves the ledger at `ledger`.
    #[must_use]
    pub fn deploy(ledger: ContractAddress) -> Self {
        let pool = Self {
            address: ContractAddress::new(),
            ledger,
            balance: 0,
            deposit_count: 0,
        };
        debug!(pool = %pool.address, %ledger, "Reward pool created");
        pool
    }

    /// Accumulated fees.
    #[must_use]
    pub fn balance(&self) -> Amount {
        self.balance
    }

    /// The ledger this pool serves.
    #[must_use]
    pub fn ledger(&self) -> ContractAddress {
        self.ledger
    }

    /// This pool's own address.
    #[must_use]
    pub fn address(&self) -> ContractAddress {
        self.address
    }

    /// Number of fee deposits received, including zero-value ones.
    #[must_use]
    pub fn deposit_count(&self) -> u64 {
        self.deposit_count
    }

    /// Validates a deposit without applying it.
    pub(crate) fn prepare_deposit(
        &self,
        depositor: ContractAddress,
        amount: Amount,
    ) -> Result<PendingDeposit, PoolError> {
        if depositor != self.ledger {
            return Err(PoolError::UnauthorizedDepositor {
                expected: self.ledger,
                actual: depositor,
            });
        }
        let new_balance = self.balance.checked_add(amount).ok_or(PoolError::Overflow)?;
        Ok(PendingDeposit {
            amount,
            new_balance,
        })
    }

    /// Applies a previously prepared deposit.
    pub(crate) fn commit_deposit(&mut self, pending: PendingDeposit) {
        self.balance = pending.new_balance;
        self.deposit_count += 1;
        debug!(
            pool = %self.address,
            amount = %pending.amount,
            balance = %self.balance,
            "Reward pool credited"
        );
    }
}
