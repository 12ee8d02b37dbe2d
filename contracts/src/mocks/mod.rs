//! Test doubles for the contracts the engine talks to.
//!
//! Deployed by the Odra VM tests and by the deployment tool on networks
//! without real feeds or collateral tokens.

pub mod collateral_token;
pub mod issuance_token;
pub mod price_feed;
