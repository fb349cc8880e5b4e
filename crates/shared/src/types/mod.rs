//! Common types used across the workspace.

pub mod id;

pub use id::*;

/// Token quantity in the smallest indivisible unit.
///
/// Unsigned, so a negative amount cannot be expressed.
pub type Amount = u128;
