//! Fee-deducting token ledger.
//!
//! The ledger owns every holder balance and the fixed total supply. A transfer
//! debits the sender the gross amount and splits it between the recipient,
//! the reward pool and the surplus destination in one all-or-nothing step.

use std::collections::BTreeMap;

use helptoken_shared::{Amount, ContractAddress, HolderId};
use tracing::{debug, info, warn};

use super::error::LedgerError;
use super::fee::{FeeBreakdown, FeeSchedule, SurplusPolicy};
use super::types::{TokenMetadata, TransferEvent};
use crate::reward_pool::RewardPool;

/// Fixed-supply token ledger with fee routing.
///
/// Mutation goes through `&mut self`; hosts that share a ledger across
/// threads wrap it together with its pool in one lock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ledger {
    address: ContractAddress,
    deployer: HolderId,
    metadata: TokenMetadata,
    total_supply: Amount,
    balances: BTreeMap<HolderId, Amount>,
    burned: Amount,
    fee_schedule: FeeSchedule,
    transfer_count: u64,
    events: Vec<TransferEvent>,
}

impl Ledger {
    /// Creates a ledger with `total_supply` credited to `deployer`.
    #[must_use]
    pub fn deploy(
        deployer: HolderId,
        total_supply: Amount,
        metadata: TokenMetadata,
        fee_schedule: FeeSchedule,
    ) -> Self {
        let mut balances = BTreeMap::new();
        if total_supply > 0 {
            balances.insert(deployer, total_supply);
        }

        let ledger = Self {
            address: ContractAddress::new(),
            deployer,
            metadata,
            total_supply,
            balances,
            burned: 0,
            fee_schedule,
            transfer_count: 0,
            events: Vec::new(),
        };
        info!(
            ledger = %ledger.address,
            %deployer,
            total_supply = %total_supply,
            symbol = %ledger.metadata.symbol,
            "Ledger deployed"
        );
        ledger
    }

    /// The fixed total supply.
    #[must_use]
    pub fn total_supply(&self) -> Amount {
        self.total_supply
    }

    /// Current balance of `holder`; zero if it was never credited.
    #[must_use]
    pub fn balance_of(&self, holder: HolderId) -> Amount {
        self.balances.get(&holder).copied().unwrap_or(0)
    }

    /// Units removed from circulation by the `Burn` surplus policy.
    #[must_use]
    pub fn burned(&self) -> Amount {
        self.burned
    }

    /// Total supply minus burned units.
    #[must_use]
    pub fn circulating_supply(&self) -> Amount {
        self.total_supply - self.burned
    }

    /// This ledger's address, used to bind its reward pool.
    #[must_use]
    pub fn address(&self) -> ContractAddress {
        self.address
    }

    /// The holder that received the initial supply.
    #[must_use]
    pub fn deployer(&self) -> HolderId {
        self.deployer
    }

    /// Token name, symbol and decimals.
    #[must_use]
    pub fn metadata(&self) -> &TokenMetadata {
        &self.metadata
    }

    /// Fee rates and surplus routing.
    #[must_use]
    pub fn fee_schedule(&self) -> &FeeSchedule {
        &self.fee_schedule
    }

    /// Holders with a non-zero balance, ordered by id.
    pub fn holders(&self) -> impl Iterator<Item = (HolderId, Amount)> + '_ {
        self.balances.iter().map(|(holder, balance)| (*holder, *balance))
    }

    /// Completed transfers not yet drained, oldest first.
    ///
    /// The log grows by one entry per transfer until [`Ledger::drain_events`]
    /// empties it, and every clone of the ledger copies it.
    #[must_use]
    pub fn events(&self) -> &[TransferEvent] {
        &self.events
    }

    /// Removes and returns the buffered transfer events, oldest first.
    ///
    /// Sequence numbers keep counting across drains.
    pub fn drain_events(&mut self) -> Vec<TransferEvent> {
        std::mem::take(&mut self.events)
    }

    /// Number of completed transfers since deployment, drained or not.
    #[must_use]
    pub fn transfer_count(&self) -> u64 {
        self.transfer_count
    }

    /// Previews how `amount` would be split, without touching state.
    #[must_use]
    pub fn quote(&self, amount: Amount) -> FeeBreakdown {
        self.fee_schedule.split(amount)
    }

    /// Moves `amount` from `sender` to `recipient`, withholding fees.
    ///
    /// The sender is debited `amount`; the recipient receives the net amount,
    /// `pool` receives the pool fee and the surplus fee goes wherever the
    /// fee schedule routes it. Nothing changes unless every step succeeds.
    ///
    /// # Errors
    ///
    /// - `InvalidAmount` if `amount` is zero
    /// - `PoolMismatch` if `pool` was deployed for another ledger
    /// - `InsufficientBalance` if the sender holds less than `amount`
    /// - `ArithmeticOverflow` / `Pool` if a credit would overflow
    pub fn transfer(
        &mut self,
        pool: &mut RewardPool,
        sender: HolderId,
        recipient: HolderId,
        amount: Amount,
    ) -> Result<TransferEvent, LedgerError> {
        if amount == 0 {
            warn!(%sender, %recipient, "Rejected zero-amount transfer");
            return Err(LedgerError::InvalidAmount);
        }

        if pool.ledger() != self.address {
            warn!(
                ledger = %self.address,
                pool_ledger = %pool.ledger(),
                "Rejected transfer: reward pool serves another ledger"
            );
            return Err(LedgerError::PoolMismatch {
                expected: self.address,
                actual: pool.ledger(),
            });
        }

        let available = self.balance_of(sender);
        if available < amount {
            warn!(
                %sender,
                available = %available,
                requested = %amount,
                "Rejected transfer: insufficient balance"
            );
            return Err(LedgerError::InsufficientBalance {
                available,
                requested: amount,
            });
        }

        let split = self.fee_schedule.split(amount);
        debug!(
            amount = %split.amount,
            net = %split.net_amount,
            pool_fee = %split.pool_fee,
            surplus_fee = %split.surplus_fee,
            "Computed fee split"
        );

        // Stage every balance change so aliasing holders (self-transfer,
        // recipient is the beneficiary) see each other's updates.
        let mut staged = BTreeMap::new();
        staged.insert(sender, available - amount);
        self.stage_credit(&mut staged, recipient, split.net_amount)?;

        let surplus = self.fee_schedule.surplus();
        let burned = match surplus {
            SurplusPolicy::Beneficiary(beneficiary) => {
                self.stage_credit(&mut staged, beneficiary, split.surplus_fee)?;
                self.burned
            }
            SurplusPolicy::Burn => self
                .burned
                .checked_add(split.surplus_fee)
                .ok_or(LedgerError::ArithmeticOverflow)?,
        };

        let deposit = pool.prepare_deposit(self.address, split.pool_fee)?;
        let sequence = self
            .transfer_count
            .checked_add(1)
            .ok_or(LedgerError::ArithmeticOverflow)?;

        // Commit: nothing below can fail.
        for (holder, balance) in staged {
            if balance == 0 {
                self.balances.remove(&holder);
            } else {
                self.balances.insert(holder, balance);
            }
        }
        self.burned = burned;
        pool.commit_deposit(deposit);
        self.transfer_count = sequence;

        let event = TransferEvent::new(sequence, sender, recipient, split, surplus);
        self.events.push(event.clone());

        info!(
            sequence,
            %sender,
            %recipient,
            amount = %event.amount,
            net = %event.net_amount,
            pool_fee = %event.pool_fee,
            surplus_fee = %event.surplus_fee,
            "Transfer completed"
        );

        Ok(event)
    }

    /// Adds `amount` to `holder`'s staged (or current) balance.
    fn stage_credit(
        &self,
        staged: &mut BTreeMap<HolderId, Amount>,
        holder: HolderId,
        amount: Amount,
    ) -> Result<(), LedgerError> {
        let current = staged
            .get(&holder)
            .copied()
            .unwrap_or_else(|| self.balance_of(holder));
        let updated = current
            .checked_add(amount)
            .ok_or(LedgerError::ArithmeticOverflow)?;
        staged.insert(holder, updated);
        Ok(())
    }

    /// Verifies that balances, pool and burned units add up to the supply.
    ///
    /// # Errors
    ///
    /// Returns `PoolMismatch` if `pool` serves another ledger and
    /// `ConservationViolated` if the totals disagree.
    pub fn audit(&self, pool: &RewardPool) -> Result<(), LedgerError> {
        if pool.ledger() != self.address {
            return Err(LedgerError::PoolMismatch {
                expected: self.address,
                actual: pool.ledger(),
            });
        }

        let accounted = self
            .balances
            .values()
            .try_fold(0, |acc: Amount, balance| acc.checked_add(*balance))
            .and_then(|sum| sum.checked_add(pool.balance()))
            .and_then(|sum| sum.checked_add(self.burned))
            .unwrap_or(Amount::MAX);

        if accounted != self.total_supply {
            return Err(LedgerError::ConservationViolated {
                accounted,
                total_supply: self.total_supply,
            });
        }
        Ok(())
    }

    #[cfg(test)]
    pub(crate) fn force_transfer_count(&mut self, count: u64) {
        self.transfer_count = count;
    }

    #[cfg(test)]
    pub(crate) fn force_balance(&mut self, holder: HolderId, balance: Amount) {
        self.balances.insert(holder, balance);
    }
}
