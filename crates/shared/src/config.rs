//! Application configuration management.

use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::types::HolderId;

/// Upper bound for fee rates, in basis points (100%).
pub const MAX_BPS: u16 = 10_000;

/// Application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Token metadata and supply.
    #[serde(default)]
    pub token: TokenConfig,
    /// Fee split applied to every transfer.
    #[serde(default)]
    pub fees: FeeConfig,
    /// Deployment parameters.
    #[serde(default)]
    pub deployment: DeploymentConfig,
}

/// Token configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenConfig {
    /// Human-readable token name.
    #[serde(default = "default_name")]
    pub name: String,
    /// Ticker symbol.
    #[serde(default = "default_symbol")]
    pub symbol: String,
    /// Display decimals.
    #[serde(default = "default_decimals")]
    pub decimals: u8,
    /// Fixed total supply in the smallest unit, minted to the deployer.
    #[serde(default = "default_total_supply")]
    pub total_supply: u64,
}

fn default_name() -> String {
    "HelpToken".to_string()
}

fn default_symbol() -> String {
    "HELP".to_string()
}

fn default_decimals() -> u8 {
    18
}

fn default_total_supply() -> u64 {
    1_000_000_000
}

impl Default for TokenConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            symbol: default_symbol(),
            decimals: default_decimals(),
            total_supply: default_total_supply(),
        }
    }
}

/// Where the second fee portion of each transfer goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SurplusPolicyKind {
    /// Credit a beneficiary holder.
    #[default]
    Beneficiary,
    /// Remove from circulation.
    Burn,
}

/// Fee configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct FeeConfig {
    /// Share of each transfer credited to the reward pool, in basis points.
    #[serde(default = "default_fee_bps")]
    pub pool_bps: u16,
    /// Share of each transfer routed by the surplus policy, in basis points.
    #[serde(default = "default_fee_bps")]
    pub surplus_bps: u16,
    /// Destination of the surplus share.
    #[serde(default)]
    pub surplus_policy: SurplusPolicyKind,
    /// Beneficiary holder; a fresh one is generated at deploy time when unset.
    #[serde(default)]
    pub beneficiary: Option<HolderId>,
}

fn default_fee_bps() -> u16 {
    200 // 2%
}

impl Default for FeeConfig {
    fn default() -> Self {
        Self {
            pool_bps: default_fee_bps(),
            surplus_bps: default_fee_bps(),
            surplus_policy: SurplusPolicyKind::default(),
            beneficiary: None,
        }
    }
}

/// A transfer replayed from the deployer right after deployment.
#[derive(Debug, Clone, Deserialize)]
pub struct ScriptedTransfer {
    /// Receiving holder.
    pub recipient: HolderId,
    /// Gross amount sent.
    pub amount: u64,
}

/// Deployment configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DeploymentConfig {
    /// Deployer identity; generated when unset.
    #[serde(default)]
    pub deployer: Option<HolderId>,
    /// Transfers executed after both components are deployed.
    #[serde(default)]
    pub transfers: Vec<ScriptedTransfer>,
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded or fails validation.
    pub fn load() -> AppResult<Self> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(
                config::Environment::with_prefix("HELPTOKEN")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let config: Self = config.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Checks cross-field constraints that serde cannot express.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Validation` describing the first violated constraint.
    pub fn validate(&self) -> AppResult<()> {
        if self.token.symbol.trim().is_empty() {
            return Err(AppError::Validation("token.symbol must not be empty".into()));
        }
        // u128 holds at most 38 full decimal digits
        if self.token.decimals > 38 {
            return Err(AppError::Validation(format!(
                "token.decimals must be at most 38, got {}",
                self.token.decimals
            )));
        }
        if self.fees.surplus_policy == SurplusPolicyKind::Burn
            && self.fees.beneficiary.is_some()
        {
            return Err(AppError::Validation(
                "fees.beneficiary is only used with surplus_policy = \"beneficiary\"".into(),
            ));
        }
        let total_bps = u32::from(self.fees.pool_bps) + u32::from(self.fees.surplus_bps);
        if total_bps > u32::from(MAX_BPS) {
            return Err(AppError::Validation(format!(
                "fees.pool_bps + fees.surplus_bps must not exceed {MAX_BPS}, got {total_bps}"
            )));
        }
        Ok(())
    }
}
