//! Reward pool that collects the fee share of every ledger transfer.

pub mod error;
pub mod pool;

pub use error::PoolError;
pub use pool::RewardPool;
