//! Transfer fee schedule.
//!
//! Fees are expressed in basis points and always truncate toward zero, so the
//! deduction for an amount is `amount * bps / 10_000` in integer arithmetic.
//! The total deduction is computed from the combined rate and the surplus is
//! whatever is left after the pool share, which keeps
//! `net + pool_fee + surplus_fee == amount` for every amount.

use helptoken_shared::config::MAX_BPS;
use helptoken_shared::{Amount, HolderId};
use serde::{Deserialize, Serialize};

use super::error::LedgerError;

/// Default reward pool share: 2%.
pub const DEFAULT_POOL_BPS: u16 = 200;

/// Default surplus share: 2%.
pub const DEFAULT_SURPLUS_BPS: u16 = 200;

/// Destination of the surplus share of each transfer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "holder", rename_all = "snake_case")]
pub enum SurplusPolicy {
    /// Credit the surplus to a beneficiary holder's balance.
    Beneficiary(HolderId),
    /// Take the surplus out of circulation.
    Burn,
}

/// How a single transfer amount is divided.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeBreakdown {
    /// Gross amount debited from the sender.
    pub amount: Amount,
    /// Amount credited to the recipient.
    pub net_amount: Amount,
    /// Amount credited to the reward pool.
    pub pool_fee: Amount,
    /// Amount routed by the surplus policy.
    pub surplus_fee: Amount,
}

impl FeeBreakdown {
    /// Total withheld from the recipient.
    #[must_use]
    pub fn total_fee(&self) -> Amount {
        self.pool_fee + self.surplus_fee
    }
}

/// Fee rates and surplus routing applied to every transfer.
///
/// Only constructible through [`FeeSchedule::new`] or [`FeeSchedule::standard`],
/// so the combined rate never exceeds 100%.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FeeSchedule {
    pool_bps: u16,
    surplus_bps: u16,
    surplus: SurplusPolicy,
}

impl FeeSchedule {
    /// Creates a fee schedule.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::InvalidFeeSchedule` if the combined rate exceeds 100%.
    pub fn new(
        pool_bps: u16,
        surplus_bps: u16,
        surplus: SurplusPolicy,
    ) -> Result<Self, LedgerError> {
        let total = u32::from(pool_bps) + u32::from(surplus_bps);
        if total > u32::from(MAX_BPS) {
            return Err(LedgerError::InvalidFeeSchedule(format!(
                "combined fee {total} bps exceeds {MAX_BPS} bps"
            )));
        }
        Ok(Self {
            pool_bps,
            surplus_bps,
            surplus,
        })
    }

    /// The 2% pool + 2% surplus schedule.
    #[must_use]
    pub fn standard(surplus: SurplusPolicy) -> Self {
        Self {
            pool_bps: DEFAULT_POOL_BPS,
            surplus_bps: DEFAULT_SURPLUS_BPS,
            surplus,
        }
    }

    /// Reward pool share in basis points.
    #[must_use]
    pub fn pool_bps(&self) -> u16 {
        self.pool_bps
    }

    /// Surplus share in basis points.
    #[must_use]
    pub fn surplus_bps(&self) -> u16 {
        self.surplus_bps
    }

    /// Surplus destination.
    #[must_use]
    pub fn surplus(&self) -> SurplusPolicy {
        self.surplus
    }

    /// Splits a gross transfer amount into net, pool and surplus parts.
    #[must_use]
    pub fn split(&self, amount: Amount) -> FeeBreakdown {
        let total_bps = self.pool_bps + self.surplus_bps;
        let total_fee = apply_bps(amount, total_bps);
        let pool_fee = apply_bps(amount, self.pool_bps);

        FeeBreakdown {
            amount,
            net_amount: amount - total_fee,
            pool_fee,
            surplus_fee: total_fee - pool_fee,
        }
    }
}

/// `floor(amount * bps / 10_000)` without overflowing on large amounts.
fn apply_bps(amount: Amount, bps: u16) -> Amount {
    let scale = Amount::from(MAX_BPS);
    let bps = Amount::from(bps);
    (amount / scale) * bps + (amount % scale) * bps / scale
}
