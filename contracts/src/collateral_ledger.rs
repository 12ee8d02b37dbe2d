//! Collateral Ledger
//!
//! Storage for every position in the protocol: deposited collateral per
//! (user, asset), minted sUSD debt per user, the approved asset set and the
//! price feed bound to each asset. The ledger performs no solvency checks; it
//! only refuses to underflow. It is embedded in the engine as a sub-module so
//! nothing but the engine's entry points can write to it.

use odra::prelude::*;
use odra::casper_types::U256;
use crate::errors::SynthError;
use crate::oracle_adapter::PriceOracle;

/// Collateral Ledger module
#[odra::module]
pub struct CollateralLedger {
    /// Approved collateral assets in registration order
    approved_assets: Var<Vec<Address>>,
    /// asset -> price feed
    price_feeds: Mapping<Address, Address>,
    /// (user, asset) -> deposited amount
    deposits: Mapping<(Address, Address), U256>,
    /// user -> minted sUSD
    minted: Mapping<Address, U256>,
    /// asset -> total deposited by all users
    total_deposited: Mapping<Address, U256>,
    /// Outstanding sUSD across all users
    total_minted: Var<U256>,
}

#[odra::module]
impl CollateralLedger {
    /// Bind `asset` to `price_feed`. Only used while the engine is constructed.
    pub fn register_collateral(&mut self, asset: Address, price_feed: Address) {
        if self.price_feeds.get(&asset).is_some() {
            self.env().revert(SynthError::DuplicateCollateral);
        }
        self.price_feeds.set(&asset, price_feed);

        let mut assets = self.approved_assets.get().unwrap_or_default();
        assets.push(asset);
        self.approved_assets.set(assets);
    }

    // ========== Collateral ==========

    pub fn record_deposit(&mut self, user: Address, asset: Address, amount: U256) {
        let balance = self.collateral_of(user, asset);
        self.deposits.set(&(user, asset), balance + amount);

        let total = self.total_deposited_of(asset);
        self.total_deposited.set(&asset, total + amount);
    }

    pub fn record_withdrawal(&mut self, user: Address, asset: Address, amount: U256) {
        let balance = self.collateral_of(user, asset);
        if balance < amount {
            self.env().revert(SynthError::Underflow);
        }
        self.deposits.set(&(user, asset), balance - amount);

        let total = self.total_deposited_of(asset);
        self.total_deposited.set(&asset, total - amount);
    }

    // ========== Debt ==========

    pub fn record_mint(&mut self, user: Address, amount: U256) {
        let debt = self.debt_of(user);
        self.minted.set(&user, debt + amount);
        self.total_minted.set(self.total_debt() + amount);
    }

    pub fn record_burn(&mut self, user: Address, amount: U256) {
        let debt = self.debt_of(user);
        if debt < amount {
            self.env().revert(SynthError::Underflow);
        }
        self.minted.set(&user, debt - amount);
        self.total_minted.set(self.total_debt() - amount);
    }

    // ========== Queries ==========

    pub fn collateral_of(&self, user: Address, asset: Address) -> U256 {
        self.deposits.get(&(user, asset)).unwrap_or_default()
    }

    pub fn debt_of(&self, user: Address) -> U256 {
        self.minted.get(&user).unwrap_or_default()
    }

    pub fn total_deposited_of(&self, asset: Address) -> U256 {
        self.total_deposited.get(&asset).unwrap_or_default()
    }

    pub fn total_debt(&self) -> U256 {
        self.total_minted.get().unwrap_or_default()
    }

    pub fn approved_assets(&self) -> Vec<Address> {
        self.approved_assets.get().unwrap_or_default()
    }

    pub fn is_approved(&self, asset: Address) -> bool {
        self.price_feeds.get(&asset).is_some()
    }

    pub fn price_feed_of(&self, asset: Address) -> Option<Address> {
        self.price_feeds.get(&asset)
    }

    /// USD value (1e18) of everything `user` has deposited.
    ///
    /// Assets the user holds none of are skipped, so a broken feed only blocks
    /// accounts exposed to it.
    pub fn total_collateral_value_usd(&self, user: Address) -> U256 {
        let mut total = U256::zero();
        for asset in self.approved_assets() {
            let amount = self.collateral_of(user, asset);
            if amount.is_zero() {
                continue;
            }
            total = total + self.usd_value(asset, amount);
        }
        total
    }

    /// (minted debt, collateral value in USD)
    pub fn account_info(&self, user: Address) -> (U256, U256) {
        (self.debt_of(user), self.total_collateral_value_usd(user))
    }

    /// USD value (1e18) of all collateral held by the protocol
    pub fn protocol_collateral_value_usd(&self) -> U256 {
        let mut total = U256::zero();
        for asset in self.approved_assets() {
            let amount = self.total_deposited_of(asset);
            if amount.is_zero() {
                continue;
            }
            total = total + self.usd_value(asset, amount);
        }
        total
    }

    /// Value `amount` of `asset` via its feed, reverting on oracle failure
    pub fn usd_value(&self, asset: Address, amount: U256) -> U256 {
        let feed = self.require_feed(asset);
        match PriceOracle::usd_value(&self.env(), feed, amount) {
            Ok(value) => value,
            Err(error) => self.env().revert(error),
        }
    }

    /// Amount of `asset` worth `usd_amount`, reverting on oracle failure
    pub fn asset_amount_for_usd(&self, asset: Address, usd_amount: U256) -> U256 {
        let feed = self.require_feed(asset);
        match PriceOracle::asset_amount_for_usd(&self.env(), feed, usd_amount) {
            Ok(amount) => amount,
            Err(error) => self.env().revert(error),
        }
    }

    // ========== Internal Functions ==========

    fn require_feed(&self, asset: Address) -> Address {
        match self.price_feeds.get(&asset) {
            Some(feed) => feed,
            None => self.env().revert(SynthError::PriceFeedNotSet),
        }
    }
}
