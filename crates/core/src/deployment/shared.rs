//! Thread-safe handle over a deployed token system.

use std::sync::Arc;

use helptoken_shared::{Amount, HolderId};
use parking_lot::Mutex;

use super::system::{SystemSnapshot, TokenSystem};
use crate::ledger::{LedgerError, TransferEvent};

/// Cloneable handle that serializes every operation on one [`TokenSystem`].
///
/// A transfer holds the lock for the sender debit, the recipient credit and
/// the pool credit together, so no reader ever observes a partial transfer.
#[derive(Debug, Clone)]
pub struct SharedTokenSystem {
    inner: Arc<Mutex<TokenSystem>>,
}

impl SharedTokenSystem {
    /// Wraps a deployed system.
    #[must_use]
    pub fn new(system: TokenSystem) -> Self {
        Self {
            inner: Arc::new(Mutex::new(system)),
        }
    }

    /// See [`TokenSystem::transfer`].
    ///
    /// # Errors
    ///
    /// See [`crate::ledger::Ledger::transfer`].
    pub fn transfer(
        &self,
        sender: HolderId,
        recipient: HolderId,
        amount: Amount,
    ) -> Result<TransferEvent, LedgerError> {
        self.inner.lock().transfer(sender, recipient, amount)
    }

    /// Current balance of `holder`.
    #[must_use]
    pub fn balance_of(&self, holder: HolderId) -> Amount {
        self.inner.lock().balance_of(holder)
    }

    /// The fixed total supply.
    #[must_use]
    pub fn total_supply(&self) -> Amount {
        self.inner.lock().total_supply()
    }

    /// Accumulated reward pool balance.
    #[must_use]
    pub fn reward_pool(&self) -> Amount {
        self.inner.lock().reward_pool()
    }

    /// The holder that received the initial supply.
    #[must_use]
    pub fn deployer(&self) -> HolderId {
        self.inner.lock().deployer()
    }

    /// Consistent snapshot taken under the lock.
    #[must_use]
    pub fn snapshot(&self) -> SystemSnapshot {
        self.inner.lock().snapshot()
    }

    /// Removes and returns the buffered transfer events under the lock.
    pub fn drain_events(&self) -> Vec<TransferEvent> {
        self.inner.lock().drain_events()
    }

    /// Checks the conservation invariant under the lock.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::ConservationViolated` if the totals disagree.
    pub fn audit(&self) -> Result<(), LedgerError> {
        self.inner.lock().audit()
    }
}
