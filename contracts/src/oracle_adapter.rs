//! Price Oracle Adapter
//!
//! Wraps the per-asset price feeds used to value collateral.
//! Implements:
//! - Freshness check (3 hour timeout) on every read
//! - Rejection of non-positive answers
//! - Normalisation of feed decimals to the internal 1e18 precision
//! - USD value <-> asset amount conversion
//!
//! Nothing is cached: a stale or broken feed makes every valuation of its
//! asset fail until the feed recovers.

use odra::prelude::*;
use odra::casper_types::{U256, RuntimeArgs};
use odra::{CallDef, ContractEnv};
use crate::errors::SynthError;
use crate::interfaces::entry_points;
use crate::types::{PriceQuote, RoundData, PRECISION, PRECISION_DECIMALS, STALENESS_TIMEOUT_SECONDS};

/// Helper for price feed queries
pub struct PriceOracle;

impl PriceOracle {
    /// Raw latest round from a feed
    pub fn latest_round_data(env: &ContractEnv, feed: Address) -> RoundData {
        let call_def = CallDef::new(entry_points::LATEST_ROUND_DATA, false, RuntimeArgs::new());
        env.call_contract::<RoundData>(feed, call_def)
    }

    /// Decimals the feed reports its answer with
    pub fn feed_decimals(env: &ContractEnv, feed: Address) -> u8 {
        let call_def = CallDef::new(entry_points::DECIMALS, false, RuntimeArgs::new());
        env.call_contract::<u8>(feed, call_def)
    }

    /// Latest round, validated and normalised to 1e18
    pub fn stale_checked_quote(env: &ContractEnv, feed: Address) -> Result<PriceQuote, SynthError> {
        let round = Self::latest_round_data(env, feed);
        let decimals = Self::feed_decimals(env, feed);
        validate_round(&round, decimals, block_time_secs(env))
    }

    /// USD value (1e18) of `amount` units of the asset priced by `feed`
    pub fn usd_value(env: &ContractEnv, feed: Address, amount: U256) -> Result<U256, SynthError> {
        let quote = Self::stale_checked_quote(env, feed)?;
        Ok(usd_value_at(quote.price, amount))
    }

    /// Amount of the asset priced by `feed` worth `usd_amount` (1e18)
    pub fn asset_amount_for_usd(
        env: &ContractEnv,
        feed: Address,
        usd_amount: U256,
    ) -> Result<U256, SynthError> {
        let quote = Self::stale_checked_quote(env, feed)?;
        Ok(asset_amount_at(quote.price, usd_amount))
    }
}

/// Current block time in Unix seconds.
///
/// The Casper block clock ticks in milliseconds while feeds report seconds.
pub fn block_time_secs(env: &ContractEnv) -> u64 {
    env.get_block_time() / 1000
}

/// Check freshness and sign of a round and rescale its answer to 1e18.
pub fn validate_round(round: &RoundData, feed_decimals: u8, now: u64) -> Result<PriceQuote, SynthError> {
    let age = now.saturating_sub(round.updated_at);
    if age > STALENESS_TIMEOUT_SECONDS {
        return Err(SynthError::StalePrice);
    }

    let price = normalize_price(round.answer, feed_decimals)?;

    Ok(PriceQuote {
        price,
        round_id: round.round_id,
        updated_at: round.updated_at,
    })
}

/// Largest feed precision accepted; 10^77 is the last power of ten in a U256
pub const MAX_FEED_DECIMALS: u8 = 77;

/// Rescale a raw feed answer to 18 decimals.
pub fn normalize_price(answer: i64, feed_decimals: u8) -> Result<U256, SynthError> {
    if answer <= 0 || feed_decimals > MAX_FEED_DECIMALS {
        return Err(SynthError::InvalidPrice);
    }
    let raw = U256::from(answer as u64);

    let price = if feed_decimals <= PRECISION_DECIMALS {
        raw * additional_feed_precision(feed_decimals)
    } else {
        raw / pow10(feed_decimals - PRECISION_DECIMALS)
    };

    // A feed with more decimals than we keep can round a tiny price to zero
    if price.is_zero() {
        return Err(SynthError::InvalidPrice);
    }
    Ok(price)
}

/// Factor lifting a feed answer to 18 decimals (1e10 for an 8-decimal feed)
pub fn additional_feed_precision(feed_decimals: u8) -> U256 {
    pow10(PRECISION_DECIMALS.saturating_sub(feed_decimals))
}

/// price * amount / 1e18
pub fn usd_value_at(price: U256, amount: U256) -> U256 {
    price * amount / U256::from(PRECISION)
}

/// usd * 1e18 / price
pub fn asset_amount_at(price: U256, usd_amount: U256) -> U256 {
    usd_amount * U256::from(PRECISION) / price
}

fn pow10(exponent: u8) -> U256 {
    U256::from(10u64).pow(U256::from(exponent))
}
