//! Core business logic for HelpToken.
//!
//! This crate contains the token ledger with no I/O dependencies.
//! All domain types, validation rules, and fee calculations live here.
//!
//! # Modules
//!
//! - `ledger` - Fixed-supply balances and fee-deducting transfers
//! - `reward_pool` - Accumulator for the pool share of transfer fees
//! - `deployment` - Two-phase deployment and the thread-safe system handle

pub mod deployment;
pub mod ledger;
pub mod reward_pool;

pub use deployment::{SharedTokenSystem, SystemSnapshot, TokenSystem};
pub use ledger::{FeeSchedule, Ledger, LedgerError, SurplusPolicy, TransferEvent};
pub use reward_pool::{PoolError, RewardPool};
