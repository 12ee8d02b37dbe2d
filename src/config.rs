use std::collections::BTreeSet;
use std::path::Path;
use std::str::FromStr;

use odra::prelude::Address;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Env var pointing at the JSON deployment manifest
pub const MANIFEST_ENV: &str = "SYNTH_DEPLOY_MANIFEST";
/// Env var holding the gas payment per transaction (motes)
pub const PAYMENT_AMOUNT_ENV: &str = "ODRA_CASPER_LIVENET_PAYMENT_AMOUNT";
pub const DEFAULT_PAYMENT_AMOUNT: u64 = 200_000_000_000;

/// Feeds with more decimals than this are refused up front
pub const MAX_FEED_DECIMALS: u8 = 36;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read manifest {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },
    #[error("invalid manifest json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid address `{0}`")]
    InvalidAddress(String),
    #[error("{assets} collateral assets but {feeds} price feeds")]
    LengthMismatch { assets: usize, feeds: usize },
    #[error("no collateral configured")]
    NoCollateral,
    #[error("collateral asset `{0}` listed twice")]
    DuplicateCollateral(String),
    #[error("mock collateral {symbol}: {reason}")]
    InvalidMock { symbol: String, reason: String },
    #[error("invalid {name}: {value}")]
    InvalidEnv { name: String, value: String },
}

/// Collateral token and price feed deployed alongside the engine
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MockCollateral {
    pub symbol: String,
    #[serde(default = "default_feed_decimals")]
    pub feed_decimals: u8,
    /// Initial feed answer scaled by `feed_decimals`
    pub initial_answer: i64,
}

fn default_feed_decimals() -> u8 {
    8
}

/// Which collateral the engine is constructed with.
///
/// `collateral_assets[i]` is priced by `price_feeds[i]`; both are formatted
/// Casper keys of contracts already on chain. `mock_collaterals` are deployed
/// first and appended after them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeploymentManifest {
    #[serde(default)]
    pub collateral_assets: Vec<String>,
    #[serde(default)]
    pub price_feeds: Vec<String>,
    #[serde(default)]
    pub mock_collaterals: Vec<MockCollateral>,
}

impl Default for DeploymentManifest {
    /// Test network setup: mock WETH at $2000 and WBTC at $1000
    fn default() -> Self {
        Self {
            collateral_assets: Vec::new(),
            price_feeds: Vec::new(),
            mock_collaterals: vec![
                MockCollateral {
                    symbol: "WETH".to_string(),
                    feed_decimals: 8,
                    initial_answer: 2_000_0000_0000,
                },
                MockCollateral {
                    symbol: "WBTC".to_string(),
                    feed_decimals: 8,
                    initial_answer: 1_000_0000_0000,
                },
            ],
        }
    }
}

impl DeploymentManifest {
    /// Manifest named by `SYNTH_DEPLOY_MANIFEST`, or the mock default when unset
    pub fn load_from_env() -> Result<Self, ConfigError> {
        match std::env::var(MANIFEST_ENV) {
            Ok(path) => Self::from_path(path),
            Err(_) => {
                let manifest = Self::default();
                manifest.validate()?;
                Ok(manifest)
            }
        }
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&raw)
    }

    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let manifest: Self = serde_json::from_str(raw)?;
        manifest.validate()?;
        Ok(manifest)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.collateral_assets.len() != self.price_feeds.len() {
            return Err(ConfigError::LengthMismatch {
                assets: self.collateral_assets.len(),
                feeds: self.price_feeds.len(),
            });
        }
        if self.collateral_assets.is_empty() && self.mock_collaterals.is_empty() {
            return Err(ConfigError::NoCollateral);
        }

        let mut seen = BTreeSet::new();
        for asset in &self.collateral_assets {
            if !seen.insert(asset.as_str()) {
                return Err(ConfigError::DuplicateCollateral(asset.clone()));
            }
        }

        for mock in &self.mock_collaterals {
            if mock.feed_decimals > MAX_FEED_DECIMALS {
                return Err(ConfigError::InvalidMock {
                    symbol: mock.symbol.clone(),
                    reason: format!("feed decimals {} above {}", mock.feed_decimals, MAX_FEED_DECIMALS),
                });
            }
            if mock.initial_answer <= 0 {
                return Err(ConfigError::InvalidMock {
                    symbol: mock.symbol.clone(),
                    reason: "initial answer must be positive".to_string(),
                });
            }
        }
        Ok(())
    }

    /// Parsed (asset, feed) pairs for contracts that already exist
    pub fn existing_collateral(&self) -> Result<Vec<(Address, Address)>, ConfigError> {
        self.collateral_assets
            .iter()
            .zip(&self.price_feeds)
            .map(|(asset, feed)| Ok((parse_address(asset)?, parse_address(feed)?)))
            .collect()
    }
}

pub fn parse_address(raw: &str) -> Result<Address, ConfigError> {
    Address::from_str(raw.trim()).map_err(|_| ConfigError::InvalidAddress(raw.to_string()))
}

/// Gas payment per transaction, from the environment or the default
pub fn payment_amount_from_env() -> Result<u64, ConfigError> {
    match std::env::var(PAYMENT_AMOUNT_ENV) {
        Ok(value) => value.parse().map_err(|_| ConfigError::InvalidEnv {
            name: PAYMENT_AMOUNT_ENV.to_string(),
            value,
        }),
        Err(_) => Ok(DEFAULT_PAYMENT_AMOUNT),
    }
}
