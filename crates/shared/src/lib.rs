//! Shared types, errors, and configuration for HelpToken.
//!
//! This crate provides common types used across all other crates:
//! - Typed IDs for holders and deployed components
//! - Application-wide error types
//! - Configuration management

pub mod config;
pub mod error;
pub mod types;

pub use crate::config::AppConfig;
pub use error::{AppError, AppResult};
pub use types::{Amount, ContractAddress, HolderId};
