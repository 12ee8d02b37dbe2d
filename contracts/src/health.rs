//! Health factor and liquidation math.
//!
//! Only half of an account's collateral value backs its debt:
//! health_factor = (collateral_usd * 50 / 100) * 1e18 / debt.
//! An account is solvent while its health factor is at least 1e18.

use odra::casper_types::U256;
use crate::errors::SynthError;
use crate::types::{
    LIQUIDATION_BONUS, LIQUIDATION_PRECISION, LIQUIDATION_THRESHOLD, MIN_HEALTH_FACTOR, PRECISION,
};

/// Health factor of an account with no debt
pub fn infinite_health_factor() -> U256 {
    U256::MAX
}

/// Collateral value that counts towards backing debt
pub fn threshold_adjusted(collateral_value_usd: U256) -> U256 {
    collateral_value_usd * U256::from(LIQUIDATION_THRESHOLD) / U256::from(LIQUIDATION_PRECISION)
}

/// Health factor for a debt / collateral pair, floored
pub fn calculate_health_factor(total_minted: U256, collateral_value_usd: U256) -> U256 {
    if total_minted.is_zero() {
        return infinite_health_factor();
    }
    threshold_adjusted(collateral_value_usd) * U256::from(PRECISION) / total_minted
}

pub fn is_healthy(health_factor: U256) -> bool {
    health_factor >= U256::from(MIN_HEALTH_FACTOR)
}

/// Err with the offending factor when below the minimum
pub fn check_health_factor(health_factor: U256) -> Result<(), SynthError> {
    if is_healthy(health_factor) {
        Ok(())
    } else {
        Err(SynthError::BreaksHealthFactor(health_factor))
    }
}

/// Collateral handed to a liquidator: base amount plus the 10% bonus
pub fn seized_with_bonus(base_collateral: U256) -> U256 {
    let bonus = base_collateral * U256::from(LIQUIDATION_BONUS) / U256::from(LIQUIDATION_PRECISION);
    base_collateral + bonus
}
