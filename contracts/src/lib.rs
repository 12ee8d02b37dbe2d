//! sUSD Contracts
//!
//! Over-collateralized synthetic dollar issued against approved CEP-18
//! collateral on Casper.
//!
//! ## Architecture
//!
//! - **SynthEngine**: deposit/redeem collateral, mint/burn sUSD, liquidations
//! - **CollateralLedger**: position storage, embedded in the engine
//! - **SynthUsd**: CEP-18 stablecoin, mint/burn restricted to its owner (the engine)
//! - **PriceOracle**: feed reads with staleness and sign checks
//!
//! ## Solvency
//!
//! An account's health factor is half its collateral value divided by its
//! debt. Minting and redeeming must leave it at or above 1.0; below 1.0 the
//! position can be liquidated with a 10% collateral bonus.
//!
//! A stale (> 3 hours) or non-positive price makes every operation that needs
//! to value the affected asset revert until the feed recovers.

#![cfg_attr(target_arch = "wasm32", no_std)]

#[cfg(target_arch = "wasm32")]
extern crate alloc;

// Re-export odra for downstream usage
pub use odra;

// Core module declarations
pub mod types;
pub mod errors;
pub mod interfaces;
pub mod health;
pub mod oracle_adapter;

// Contract modules
pub mod collateral_ledger;
pub mod engine;
pub mod stablecoin;

// Test doubles for feeds and tokens
pub mod mocks;
