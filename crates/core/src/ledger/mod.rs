//! Fixed-supply token ledger.
//!
//! This module implements the core ledger functionality:
//! - Holder balances and the fixed total supply
//! - Fee-deducting transfers routed to a reward pool
//! - Fee schedule and surplus routing
//! - Transfer events for external audit
//! - Error types for ledger operations

pub mod error;
pub mod fee;
pub mod service;
pub mod types;

#[cfg(test)]
mod service_props;

pub use error::LedgerError;
pub use fee::{FeeBreakdown, FeeSchedule, SurplusPolicy};
pub use service::Ledger;
pub use types::{TokenMetadata, TransferEvent};
