//! HelpToken deployer
//!
//! Deploys the ledger and its reward pool, replays any scripted transfers
//! from the configuration, audits the result and prints a JSON snapshot.
//!
//! Exits with the `AppError` exit code of the first failure.
//!
//! Usage: cargo run --bin deployer

use anyhow::Context;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use helptoken_core::TokenSystem;
use helptoken_shared::{AppConfig, AppError};

/// EX_SOFTWARE, for failures that carry no `AppError`.
const EXIT_INTERNAL: i32 = 70;

fn main() {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "helptoken_core=debug,helptoken_deployer=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    if let Err(err) = run() {
        let (code, exit_code) = err
            .downcast_ref::<AppError>()
            .map_or(("INTERNAL_ERROR", EXIT_INTERNAL), |app| {
                (app.error_code(), app.exit_code())
            });
        error!(code, "{err:#}");
        std::process::exit(exit_code);
    }
}

fn run() -> anyhow::Result<()> {
    // Load configuration
    let config = AppConfig::load().context("Failed to load configuration")?;
    info!(
        symbol = %config.token.symbol,
        total_supply = config.token.total_supply,
        pool_bps = config.fees.pool_bps,
        surplus_bps = config.fees.surplus_bps,
        "Configuration loaded"
    );

    let mut system = TokenSystem::deploy(&config)
        .map_err(AppError::from)
        .context("Deployment failed")?;
    info!(deployer = %system.deployer(), "Deployer holds the full supply");

    if !config.deployment.transfers.is_empty() {
        let events = system
            .run_script(&config.deployment.transfers)
            .map_err(AppError::from)
            .context("Scripted transfer failed")?;
        info!(count = events.len(), "Scripted transfers applied");
    }

    system
        .audit()
        .map_err(AppError::from)
        .context("Post-deployment audit failed")?;

    let snapshot = system.snapshot();
    println!("{}", serde_json::to_string_pretty(&snapshot)?);

    Ok(())
}
