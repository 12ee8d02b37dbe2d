//! Protocol error definitions.

use odra::prelude::*;
use odra::casper_types::U256;

/// sUSD protocol errors
///
/// Codes are grouped by category. `BreaksHealthFactor` carries the factor that
/// tripped the check; only the code survives once the error is raised as a
/// contract revert.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum SynthError {
    // Input validation errors (1xx)
    NeedsMoreThanZero,
    TokenNotAllowed,
    LengthMismatch,
    DuplicateCollateral,

    // Oracle errors (2xx)
    StalePrice,
    InvalidPrice,
    PriceFeedNotSet,

    // Issuance token errors (3xx)
    NonPositiveAmount,
    ZeroAddress,
    InsufficientBalance,
    InsufficientAllowance,
    Unauthorized,
    MintFailed,

    // Ledger / asset movement errors (4xx)
    Underflow,
    TransferFailed,

    // Solvency errors (5xx)
    BreaksHealthFactor(U256),
    HealthFactorOk,
    HealthFactorNotImproved,

    // Structural errors (6xx)
    Reentrancy,
    InvalidConfig,
}

impl SynthError {
    pub const fn code(&self) -> u16 {
        match self {
            SynthError::NeedsMoreThanZero => 100,
            SynthError::TokenNotAllowed => 101,
            SynthError::LengthMismatch => 102,
            SynthError::DuplicateCollateral => 103,

            SynthError::StalePrice => 200,
            SynthError::InvalidPrice => 201,
            SynthError::PriceFeedNotSet => 202,

            SynthError::NonPositiveAmount => 300,
            SynthError::ZeroAddress => 301,
            SynthError::InsufficientBalance => 302,
            SynthError::InsufficientAllowance => 303,
            SynthError::Unauthorized => 304,
            SynthError::MintFailed => 305,

            SynthError::Underflow => 400,
            SynthError::TransferFailed => 401,

            SynthError::BreaksHealthFactor(_) => 500,
            SynthError::HealthFactorOk => 501,
            SynthError::HealthFactorNotImproved => 502,

            SynthError::Reentrancy => 600,
            SynthError::InvalidConfig => 601,
        }
    }

    pub const fn message(&self) -> &'static str {
        match self {
            // Validation
            SynthError::NeedsMoreThanZero => "Amount must be more than zero",
            SynthError::TokenNotAllowed => "Collateral asset not allowed",
            SynthError::LengthMismatch => "Collateral and price feed lists differ in length",
            SynthError::DuplicateCollateral => "Collateral asset registered twice",

            // Oracle
            SynthError::StalePrice => "Oracle price stale",
            SynthError::InvalidPrice => "Oracle price must be positive",
            SynthError::PriceFeedNotSet => "No price feed bound to asset",

            // Token
            SynthError::NonPositiveAmount => "sUSD: amount must be positive",
            SynthError::ZeroAddress => "sUSD: zero address",
            SynthError::InsufficientBalance => "sUSD: burn amount exceeds balance",
            SynthError::InsufficientAllowance => "sUSD: insufficient allowance",
            SynthError::Unauthorized => "Unauthorized: caller is not owner",
            SynthError::MintFailed => "sUSD mint failed",

            // Ledger
            SynthError::Underflow => "Ledger underflow",
            SynthError::TransferFailed => "Token transfer failed",

            // Solvency
            SynthError::BreaksHealthFactor(_) => "Health factor below minimum",
            SynthError::HealthFactorOk => "Health factor is ok, cannot liquidate",
            SynthError::HealthFactorNotImproved => "Liquidation did not improve health factor",

            // Structural
            SynthError::Reentrancy => "Reentrant call",
            SynthError::InvalidConfig => "Invalid configuration parameter",
        }
    }
}

impl core::fmt::Display for SynthError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            SynthError::BreaksHealthFactor(factor) => {
                write!(f, "{} ({})", self.message(), factor)
            }
            _ => f.write_str(self.message()),
        }
    }
}

impl From<SynthError> for OdraError {
    fn from(error: SynthError) -> Self {
        #[cfg(target_arch = "wasm32")]
        {
            OdraError::user(error.code())
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            OdraError::user(error.code(), error.message())
        }
    }
}
