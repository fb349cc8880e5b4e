//! Ordered deployment of the ledger and its reward pool.
//!
//! The ledger is created first; its address is then handed to the reward
//! pool, which only accepts deposits from that ledger.

pub mod shared;
pub mod system;

pub use shared::SharedTokenSystem;
pub use system::{HolderBalance, SystemSnapshot, TokenSystem};
