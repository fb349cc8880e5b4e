//! Two-phase deployment of a ledger and its reward pool.

use helptoken_shared::config::{ScriptedTransfer, SurplusPolicyKind};
use helptoken_shared::{Amount, AppConfig, ContractAddress, HolderId};
use serde::Serialize;
use tracing::{info, warn};

use crate::ledger::{
    FeeBreakdown, FeeSchedule, Ledger, LedgerError, SurplusPolicy, TokenMetadata, TransferEvent,
};
use crate::reward_pool::RewardPool;

/// A ledger paired with the reward pool bound to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenSystem {
    ledger: Ledger,
    pool: RewardPool,
}

/// Balance entry in a [`SystemSnapshot`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HolderBalance {
    /// The holder.
    pub holder: HolderId,
    /// Its balance.
    pub balance: Amount,
}

/// Point-in-time view of a deployed system.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SystemSnapshot {
    /// Ledger address.
    pub ledger: ContractAddress,
    /// Reward pool address.
    pub pool: ContractAddress,
    /// Token metadata.
    pub metadata: TokenMetadata,
    /// Fixed total supply.
    pub total_supply: Amount,
    /// Total supply minus burned units.
    pub circulating_supply: Amount,
    /// Units burned by the surplus policy.
    pub burned: Amount,
    /// Reward pool balance.
    pub reward_pool: Amount,
    /// Fee schedule in force.
    pub fee_schedule: FeeSchedule,
    /// Non-zero balances, ordered by holder.
    pub holders: Vec<HolderBalance>,
    /// Number of completed transfers since deployment.
    pub transfer_count: u64,
}

impl TokenSystem {
    /// Deploys the ledger, then a reward pool referencing the ledger's address.
    ///
    /// Deployer and beneficiary identities are generated when the
    /// configuration leaves them unset.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::InvalidFeeSchedule` if the configured rates exceed 100%.
    pub fn deploy(config: &AppConfig) -> Result<Self, LedgerError> {
        let deployer = config.deployment.deployer.unwrap_or_default();
        let surplus = match config.fees.surplus_policy {
            SurplusPolicyKind::Beneficiary => {
                SurplusPolicy::Beneficiary(config.fees.beneficiary.unwrap_or_default())
            }
            SurplusPolicyKind::Burn => {
                if let Some(beneficiary) = config.fees.beneficiary {
                    warn!(%beneficiary, "Beneficiary ignored under the burn surplus policy");
                }
                SurplusPolicy::Burn
            }
        };
        let fee_schedule = FeeSchedule::new(config.fees.pool_bps, config.fees.surplus_bps, surplus)?;
        let metadata = TokenMetadata {
            name: config.token.name.clone(),
            symbol: config.token.symbol.clone(),
            decimals: config.token.decimals,
        };

        info!("Deploying ledger");
        let ledger = Ledger::deploy(
            deployer,
            Amount::from(config.token.total_supply),
            metadata,
            fee_schedule,
        );

        info!(ledger = %ledger.address(), "Deploying reward pool");
        let pool = RewardPool::deploy(ledger.address());

        info!(
            ledger = %ledger.address(),
            pool = %pool.address(),
            "Deployment complete"
        );
        Ok(Self { ledger, pool })
    }

    /// Pairs an already deployed ledger and pool.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::PoolMismatch` if the pool serves another ledger.
    pub fn from_parts(ledger: Ledger, pool: RewardPool) -> Result<Self, LedgerError> {
        if pool.ledger() != ledger.address() {
            return Err(LedgerError::PoolMismatch {
                expected: ledger.address(),
                actual: pool.ledger(),
            });
        }
        Ok(Self { ledger, pool })
    }

    /// The ledger.
    #[must_use]
    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    /// The reward pool.
    #[must_use]
    pub fn pool(&self) -> &RewardPool {
        &self.pool
    }

    /// The holder that received the initial supply.
    #[must_use]
    pub fn deployer(&self) -> HolderId {
        self.ledger.deployer()
    }

    /// The fixed total supply.
    #[must_use]
    pub fn total_supply(&self) -> Amount {
        self.ledger.total_supply()
    }

    /// Current balance of `holder`.
    #[must_use]
    pub fn balance_of(&self, holder: HolderId) -> Amount {
        self.ledger.balance_of(holder)
    }

    /// Accumulated reward pool balance.
    #[must_use]
    pub fn reward_pool(&self) -> Amount {
        self.pool.balance()
    }

    /// Previews the fee split for `amount`.
    #[must_use]
    pub fn quote(&self, amount: Amount) -> FeeBreakdown {
        self.ledger.quote(amount)
    }

    /// Transfers through the ledger, crediting this system's pool.
    ///
    /// # Errors
    ///
    /// See [`Ledger::transfer`].
    pub fn transfer(
        &mut self,
        sender: HolderId,
        recipient: HolderId,
        amount: Amount,
    ) -> Result<TransferEvent, LedgerError> {
        self.ledger
            .transfer(&mut self.pool, sender, recipient, amount)
    }

    /// Replays scripted transfers from the deployer, stopping at the first failure.
    ///
    /// # Errors
    ///
    /// Returns the first transfer error; earlier transfers stay applied.
    pub fn run_script(
        &mut self,
        transfers: &[ScriptedTransfer],
    ) -> Result<Vec<TransferEvent>, LedgerError> {
        let deployer = self.deployer();
        transfers
            .iter()
            .map(|scripted| {
                self.transfer(deployer, scripted.recipient, Amount::from(scripted.amount))
            })
            .collect()
    }

    /// Removes and returns the ledger's buffered transfer events.
    pub fn drain_events(&mut self) -> Vec<TransferEvent> {
        self.ledger.drain_events()
    }

    /// Checks the conservation invariant.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::ConservationViolated` if the totals disagree.
    pub fn audit(&self) -> Result<(), LedgerError> {
        self.ledger.audit(&self.pool)
    }

    /// Captures the current state for reporting.
    #[must_use]
    pub fn snapshot(&self) -> SystemSnapshot {
        SystemSnapshot {
            ledger: self.ledger.address(),
            pool: self.pool.address(),
            metadata: self.ledger.metadata().clone(),
            total_supply: self.ledger.total_supply(),
            circulating_supply: self.ledger.circulating_supply(),
            burned: self.ledger.burned(),
            reward_pool: self.pool.balance(),
            fee_schedule: *self.ledger.fee_schedule(),
            holders: self
                .ledger
                .holders()
                .map(|(holder, balance)| HolderBalance { holder, balance })
                .collect(),
            transfer_count: self.ledger.transfer_count(),
        }
    }
}
