//! Deploy the sUSD contracts to Casper livenet/testnet using the Odra livenet environment.
//!
//! Usage:
//!   cargo run --bin deploy_livenet --release
//!
//! Requires .env file with:
//!   ODRA_CASPER_LIVENET_SECRET_KEY_PATH=/path/to/secret_key.pem
//!   ODRA_CASPER_LIVENET_NODE_ADDRESS=https://node.testnet.casper.network
//!   ODRA_CASPER_LIVENET_CHAIN_NAME=casper-test
//!   ODRA_CASPER_LIVENET_PAYMENT_AMOUNT=200000000000
//!
//! Optional:
//!   SYNTH_DEPLOY_MANIFEST=deploy.json   (defaults to mock WETH + WBTC)
//!   RUST_LOG=debug

use odra::host::{Deployer, HostRef, NoArgs};
use odra::prelude::*;
use tracing::{info, warn};
use tracing_subscriber::filter::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use synth_usd::config::{payment_amount_from_env, ConfigError, DeploymentManifest};
use synth_usd_contracts::engine::{SynthEngine, SynthEngineInitArgs};
use synth_usd_contracts::mocks::collateral_token::{MockCollateralToken, MockCollateralTokenInitArgs};
use synth_usd_contracts::mocks::price_feed::{MockPriceFeed, MockPriceFeedInitArgs};
use synth_usd_contracts::stablecoin::SynthUsd;

fn setup_logger() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let console_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_thread_ids(false);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer)
        .init();
}

fn main() -> Result<(), ConfigError> {
    // Load environment from .env file
    dotenv::dotenv().ok();
    setup_logger();

    info!("=== sUSD Livenet Deployment ===");

    // Validate everything before the first transaction goes out
    let manifest = DeploymentManifest::load_from_env()?;
    let mut collateral = manifest.existing_collateral()?;
    let payment_amount = payment_amount_from_env()?;

    let env = odra_casper_livenet_env::env();
    env.set_gas(payment_amount);

    let deployer = env.caller();
    info!(?deployer, payment_amount, "Deployer ready");

    // ==================== Phase 1: Mock Collateral ====================
    if !manifest.mock_collaterals.is_empty() {
        warn!(count = manifest.mock_collaterals.len(), "Deploying mock collateral; not for production");
    }
    for mock in &manifest.mock_collaterals {
        let token = MockCollateralToken::deploy(
            &env,
            MockCollateralTokenInitArgs {
                symbol: mock.symbol.clone(),
            },
        );
        let feed = MockPriceFeed::deploy(
            &env,
            MockPriceFeedInitArgs {
                decimals: mock.feed_decimals,
                initial_answer: mock.initial_answer,
            },
        );
        info!(
            symbol = %mock.symbol,
            token = ?token.address(),
            feed = ?feed.address(),
            "Mock collateral deployed"
        );
        collateral.push((token.address().clone(), feed.address().clone()));
    }

    // ==================== Phase 2: Token & Engine ====================
    info!("Deploying SynthUsd...");
    let mut synth = SynthUsd::deploy(&env, NoArgs);
    let synth_addr = synth.address().clone();
    info!(address = ?synth_addr, "SynthUsd deployed");

    let (collateral_assets, price_feeds): (Vec<Address>, Vec<Address>) = collateral.into_iter().unzip();
    info!(assets = collateral_assets.len(), "Deploying SynthEngine...");
    let engine = SynthEngine::deploy(
        &env,
        SynthEngineInitArgs {
            collateral_assets,
            price_feeds,
            synth_token: synth_addr,
        },
    );
    let engine_addr = engine.address().clone();
    info!(address = ?engine_addr, "SynthEngine deployed");

    // ==================== Phase 3: Hand Over Supply ====================
    // sUSD is minted only by its owner; the engine must own it before any deposit
    info!("Transferring SynthUsd ownership to SynthEngine...");
    synth.transfer_ownership(engine_addr);
    info!("Done.");

    info!("=== Deployment Complete ===");
    info!("  SynthUsd:    {:?}", synth_addr);
    info!("  SynthEngine: {:?}", engine_addr);
    for asset in engine.get_approved_assets() {
        info!("  Collateral:  {:?} (feed {:?})", asset, engine.get_collateral_price_feed(asset));
    }
    Ok(())
}
