//! # SaleTrack Register Entry Point
//!
//! ## Startup Sequence
//! 1. Initialize tracing (logging)
//! 2. Load configuration (file, then environment)
//! 3. Hand over to [`saletrack_register::run`]

use anyhow::Context;
use saletrack_register::RegisterConfig;
use std::path::PathBuf;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    saletrack_register::init_tracing();

    // Optional first argument: config file path
    let config_path = std::env::args_os().nth(1).map(PathBuf::from);

    let config = RegisterConfig::load(config_path).context("Failed to load configuration")?;
    tracing::info!(
        mirror_enabled = config.mirror.is_enabled(),
        allow_decimal = config.allow_decimal_quantity,
        "Configuration loaded"
    );

    saletrack_register::run(config)
        .await
        .context("Register stopped with an error")?;

    Ok(())
}
