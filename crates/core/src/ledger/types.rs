//! Ledger domain types.

use helptoken_shared::{Amount, HolderId};
use serde::{Deserialize, Serialize};

use super::fee::{FeeBreakdown, SurplusPolicy};

/// Descriptive token attributes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenMetadata {
    /// Human-readable name.
    pub name: String,
    /// Ticker symbol.
    pub symbol: String,
    /// Number of decimals used for display.
    pub decimals: u8,
}

impl Default for TokenMetadata {
    fn default() -> Self {
        Self {
            name: "HelpToken".to_string(),
            symbol: "HELP".to_string(),
            decimals: 18,
        }
    }
}

/// Record of a completed transfer.
///
/// One is appended to the ledger's event log for every successful transfer
/// and returned to the caller as its receipt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferEvent {
    /// Position in the ledger's event log, starting at 1.
    pub sequence: u64,
    /// Debited holder.
    pub sender: HolderId,
    /// Credited holder.
    pub recipient: HolderId,
    /// Gross amount debited from the sender.
    pub amount: Amount,
    /// Amount credited to the recipient.
    pub net_amount: Amount,
    /// Amount credited to the reward pool.
    pub pool_fee: Amount,
    /// Amount routed by the surplus policy.
    pub surplus_fee: Amount,
    /// Where the surplus went.
    pub surplus: SurplusPolicy,
}

impl TransferEvent {
    pub(crate) fn new(
        sequence: u64,
        sender: HolderId,
        recipient: HolderId,
        split: FeeBreakdown,
        surplus: SurplusPolicy,
    ) -> Self {
        Self {
            sequence,
            sender,
            recipient,
            amount: split.amount,
            net_amount: split.net_amount,
            pool_fee: split.pool_fee,
            surplus_fee: split.surplus_fee,
            surplus,
        }
    }

    /// Fee portion of the transfer as a breakdown.
    #[must_use]
    pub fn breakdown(&self) -> FeeBreakdown {
        FeeBreakdown {
            amount: self.amount,
            net_amount: self.net_amount,
            pool_fee: self.pool_fee,
            surplus_fee: self.surplus_fee,
        }
    }
}
