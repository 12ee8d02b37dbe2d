//! Common types and protocol constants.

use odra::prelude::*;
use odra::casper_types::U256;

/// Internal fixed-point precision (1e18)
pub const PRECISION: u128 = 1_000_000_000_000_000_000;

/// Decimals of every internally accounted amount
pub const PRECISION_DECIMALS: u8 = 18;

/// Decimals most USD feeds report with
pub const DEFAULT_FEED_DECIMALS: u8 = 8;

/// Share of collateral value that counts towards backing (50%)
pub const LIQUIDATION_THRESHOLD: u64 = 50;

/// Liquidator bonus on seized collateral (10%)
pub const LIQUIDATION_BONUS: u64 = 10;

/// Denominator for threshold and bonus percentages
pub const LIQUIDATION_PRECISION: u64 = 100;

/// Minimum health factor (1.0 scaled by PRECISION)
pub const MIN_HEALTH_FACTOR: u128 = PRECISION;

/// Maximum accepted price age in seconds (3 hours)
pub const STALENESS_TIMEOUT_SECONDS: u64 = 3 * 60 * 60;

/// Round data reported by a price feed.
///
/// `answer` is signed so that a misbehaving feed can report a non-positive
/// price; the oracle adapter rejects those.
#[odra::odra_type]
pub struct RoundData {
    /// Round identifier
    pub round_id: u64,
    /// Price, scaled by the feed's decimals
    pub answer: i64,
    /// Round start (Unix seconds)
    pub started_at: u64,
    /// Last update (Unix seconds)
    pub updated_at: u64,
    /// Round in which the answer was computed
    pub answered_in_round: u64,
}

/// A validated quote, normalised to 18 decimals.
#[odra::odra_type]
#[derive(Copy)]
pub struct PriceQuote {
    /// USD per whole unit of the asset, scaled by 1e18
    pub price: U256,
    /// Round the quote was taken from
    pub round_id: u64,
    /// Last update (Unix seconds)
    pub updated_at: u64,
}

/// Debt and collateral summary of one account
#[odra::odra_type]
#[derive(Copy, Default)]
pub struct AccountInformation {
    /// Outstanding sUSD debt
    pub total_minted: U256,
    /// Collateral value in USD (1e18)
    pub collateral_value_usd: U256,
}

/// The null address (all-zero account hash).
pub fn zero_address() -> Address {
    Address::Account(odra::casper_types::account::AccountHash::default())
}

pub fn is_zero_address(address: &Address) -> bool {
    *address == zero_address()
}
