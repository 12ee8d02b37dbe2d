//! External contract interfaces consumed by the engine.
//!
//! The engine reaches these contracts through `CallDef`s built from the entry
//! point names below; the traits document the expected signatures.

use odra::prelude::*;
use odra::casper_types::U256;
use crate::types::RoundData;

/// Entry point names shared by the call sites.
pub mod entry_points {
    pub const LATEST_ROUND_DATA: &str = "latest_round_data";
    pub const DECIMALS: &str = "decimals";
    pub const TRANSFER: &str = "transfer";
    pub const TRANSFER_FROM: &str = "transfer_from";
    pub const MINT: &str = "mint";
    pub const BURN: &str = "burn";
}

/// Price feed (aggregator-style round reporting)
#[odra::external_contract]
pub trait PriceFeed {
    fn latest_round_data(&self) -> RoundData;
    fn decimals(&self) -> u8;
}

/// CEP-18 interface for collateral assets
#[odra::external_contract]
pub trait Cep18Token {
    fn transfer(&mut self, recipient: Address, amount: U256) -> bool;
    fn transfer_from(&mut self, owner: Address, recipient: Address, amount: U256) -> bool;
    fn balance_of(&self, account: Address) -> U256;
}

/// Privileged surface of the sUSD token
#[odra::external_contract]
pub trait SynthToken {
    fn mint(&mut self, to: Address, amount: U256) -> bool;
    fn burn(&mut self, amount: U256);
    fn transfer_from(&mut self, owner: Address, recipient: Address, amount: U256) -> bool;
}
