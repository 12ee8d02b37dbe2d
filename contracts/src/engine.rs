//! Synth Engine Contract
//!
//! Issues sUSD against over-collateralized deposits and keeps every account
//! that acts at or above the minimum health factor.
//!
//! Operations:
//! - deposit / redeem collateral (approved CEP-18 assets only)
//! - mint / burn sUSD against the caller's position
//! - liquidate an account whose health factor fell below 1.0; the liquidator
//!   repays debt with their own sUSD and receives the equivalent collateral
//!   plus a 10% bonus
//!
//! Every state-changing entry point is atomic: a failed transfer, a stale
//! price or a broken health factor reverts the whole call. Entry points are
//! guarded against re-entry from the external assets they call into.

use odra::prelude::*;
use odra::casper_types::{U256, runtime_args};
use odra::CallDef;
use crate::collateral_ledger::CollateralLedger;
use crate::errors::SynthError;
use crate::health::{calculate_health_factor, check_health_factor, is_healthy, seized_with_bonus};
use crate::interfaces::entry_points;
use crate::oracle_adapter::additional_feed_precision;
use crate::types::{
    AccountInformation, DEFAULT_FEED_DECIMALS, LIQUIDATION_BONUS, LIQUIDATION_PRECISION,
    LIQUIDATION_THRESHOLD, MIN_HEALTH_FACTOR, PRECISION, STALENESS_TIMEOUT_SECONDS,
};

/// Collateral moved into the engine
#[odra::event]
pub struct CollateralDeposited {
    pub user: Address,
    pub asset: Address,
    pub amount: U256,
}

/// Collateral moved out of the engine
#[odra::event]
pub struct CollateralRedeemed {
    pub redeemed_from: Address,
    pub redeemed_to: Address,
    pub asset: Address,
    pub amount: U256,
}

/// sUSD issued against a position
#[odra::event]
pub struct SynthMinted {
    pub user: Address,
    pub amount: U256,
}

/// sUSD debt repaid; `payer` supplied the tokens
#[odra::event]
pub struct SynthBurned {
    pub on_behalf_of: Address,
    pub payer: Address,
    pub amount: U256,
}

/// An undercollateralized position was partially closed
#[odra::event]
pub struct Liquidated {
    pub liquidator: Address,
    pub user: Address,
    pub asset: Address,
    pub debt_covered: U256,
    pub collateral_seized: U256,
}

/// Synth Engine Contract
#[odra::module(events = [CollateralDeposited, CollateralRedeemed, SynthMinted, SynthBurned, Liquidated])]
pub struct SynthEngine {
    /// Positions, approved assets and price feed bindings
    ledger: SubModule<CollateralLedger>,
    /// sUSD token (this engine must be its owner)
    synth_token: Var<Address>,
    /// Set while an entry point is executing
    locked: Var<bool>,
}

#[odra::module]
impl SynthEngine {
    /// Initialize the engine with its collateral set.
    ///
    /// `collateral_assets[i]` is priced by `price_feeds[i]`.
    pub fn init(&mut self, collateral_assets: Vec<Address>, price_feeds: Vec<Address>, synth_token: Address) {
        if collateral_assets.len() != price_feeds.len() {
            self.env().revert(SynthError::LengthMismatch);
        }

        for (asset, feed) in collateral_assets.into_iter().zip(price_feeds) {
            self.ledger.register_collateral(asset, feed);
        }

        self.synth_token.set(synth_token);
        self.locked.set(false);
    }

    // ========== Collateral & Debt Operations ==========

    /// Deposit collateral and mint sUSD in one call
    pub fn deposit_collateral_and_mint(
        &mut self,
        collateral_asset: Address,
        collateral_amount: U256,
        mint_amount: U256,
    ) {
        self.enter();
        let user = self.env().caller();
        self.deposit_collateral_internal(user, collateral_asset, collateral_amount);
        self.mint_internal(user, mint_amount);
        self.exit();
    }

    /// Deposit `amount` of `collateral_asset`; the caller must have approved the engine
    pub fn deposit_collateral(&mut self, collateral_asset: Address, amount: U256) {
        self.enter();
        let user = self.env().caller();
        self.deposit_collateral_internal(user, collateral_asset, amount);
        self.exit();
    }

    /// Mint `amount` sUSD to the caller against their collateral
    pub fn mint(&mut self, amount: U256) {
        self.enter();
        let user = self.env().caller();
        self.mint_internal(user, amount);
        self.exit();
    }

    /// Repay `amount` of the caller's debt with the caller's sUSD
    pub fn burn(&mut self, amount: U256) {
        self.enter();
        let user = self.env().caller();
        self.require_more_than_zero(amount);
        self.burn_internal(user, user, amount);
        self.revert_if_health_factor_is_broken(user);
        self.exit();
    }

    /// Withdraw collateral; the caller must stay solvent afterwards
    pub fn redeem_collateral(&mut self, collateral_asset: Address, amount: U256) {
        self.enter();
        let user = self.env().caller();
        self.require_more_than_zero(amount);
        self.require_allowed_asset(collateral_asset);
        self.redeem_internal(collateral_asset, amount, user, user);
        self.revert_if_health_factor_is_broken(user);
        self.exit();
    }

    /// Burn `burn_amount` sUSD, then withdraw `collateral_amount` of `collateral_asset`
    pub fn redeem_collateral_for_synth(
        &mut self,
        collateral_asset: Address,
        collateral_amount: U256,
        burn_amount: U256,
    ) {
        self.enter();
        let user = self.env().caller();
        self.require_more_than_zero(collateral_amount);
        self.require_more_than_zero(burn_amount);
        self.require_allowed_asset(collateral_asset);
        self.burn_internal(user, user, burn_amount);
        self.redeem_internal(collateral_asset, collateral_amount, user, user);
        self.revert_if_health_factor_is_broken(user);
        self.exit();
    }

    /// Repay `debt_to_cover` of `user`'s debt and take the equivalent
    /// `collateral_asset` plus a 10% bonus.
    ///
    /// Only allowed while `user` is below the minimum health factor, and only
    /// if the repayment strictly improves it. The liquidator must remain
    /// solvent themselves.
    pub fn liquidate(&mut self, collateral_asset: Address, user: Address, debt_to_cover: U256) {
        self.enter();
        let liquidator = self.env().caller();
        self.require_more_than_zero(debt_to_cover);
        self.require_allowed_asset(collateral_asset);

        let starting_health_factor = self.health_factor_of(user);
        if is_healthy(starting_health_factor) {
            self.env().revert(SynthError::HealthFactorOk);
        }

        let debt_in_collateral = self.ledger.asset_amount_for_usd(collateral_asset, debt_to_cover);
        let collateral_seized = seized_with_bonus(debt_in_collateral);

        self.redeem_internal(collateral_asset, collateral_seized, user, liquidator);
        self.burn_internal(user, liquidator, debt_to_cover);

        let ending_health_factor = self.health_factor_of(user);
        if ending_health_factor <= starting_health_factor {
            self.env().revert(SynthError::HealthFactorNotImproved);
        }
        self.revert_if_health_factor_is_broken(liquidator);

        self.env().emit_event(Liquidated {
            liquidator,
            user,
            asset: collateral_asset,
            debt_covered: debt_to_cover,
            collateral_seized,
        });
        self.exit();
    }

    // ========== Query Functions ==========

    /// Health factor of `user` (U256::MAX when debt-free)
    pub fn get_health_factor(&self, user: Address) -> U256 {
        self.health_factor_of(user)
    }

    /// Health factor for arbitrary debt and collateral value
    pub fn calculate_health_factor(&self, total_minted: U256, collateral_value_usd: U256) -> U256 {
        calculate_health_factor(total_minted, collateral_value_usd)
    }

    /// (minted debt, collateral value in USD)
    pub fn get_account_information(&self, user: Address) -> (U256, U256) {
        self.ledger.account_info(user)
    }

    pub fn get_account_summary(&self, user: Address) -> AccountInformation {
        let (total_minted, collateral_value_usd) = self.ledger.account_info(user);
        AccountInformation {
            total_minted,
            collateral_value_usd,
        }
    }

    pub fn get_account_collateral_value(&self, user: Address) -> U256 {
        self.ledger.total_collateral_value_usd(user)
    }

    pub fn get_usd_value(&self, asset: Address, amount: U256) -> U256 {
        self.require_allowed_asset(asset);
        self.ledger.usd_value(asset, amount)
    }

    pub fn get_asset_amount_for_usd(&self, asset: Address, usd_amount: U256) -> U256 {
        self.require_allowed_asset(asset);
        self.ledger.asset_amount_for_usd(asset, usd_amount)
    }

    pub fn get_collateral_balance_of_user(&self, user: Address, asset: Address) -> U256 {
        self.ledger.collateral_of(user, asset)
    }

    pub fn get_approved_assets(&self) -> Vec<Address> {
        self.ledger.approved_assets()
    }

    pub fn get_collateral_price_feed(&self, asset: Address) -> Option<Address> {
        self.ledger.price_feed_of(asset)
    }

    pub fn get_synth_token(&self) -> Option<Address> {
        self.synth_token.get()
    }

    /// Total amount of `asset` held for all users
    pub fn get_total_collateral_deposited(&self, asset: Address) -> U256 {
        self.ledger.total_deposited_of(asset)
    }

    /// Outstanding sUSD debt across all users
    pub fn get_total_debt(&self) -> U256 {
        self.ledger.total_debt()
    }

    /// USD value of all collateral held by the engine
    pub fn get_total_collateral_value_usd(&self) -> U256 {
        self.ledger.protocol_collateral_value_usd()
    }

    // ========== Protocol Constants ==========

    pub fn get_precision(&self) -> U256 {
        U256::from(PRECISION)
    }

    pub fn get_additional_feed_precision(&self) -> U256 {
        additional_feed_precision(DEFAULT_FEED_DECIMALS)
    }

    pub fn get_liquidation_threshold(&self) -> u64 {
        LIQUIDATION_THRESHOLD
    }

    pub fn get_liquidation_bonus(&self) -> u64 {
        LIQUIDATION_BONUS
    }

    pub fn get_liquidation_precision(&self) -> u64 {
        LIQUIDATION_PRECISION
    }

    pub fn get_min_health_factor(&self) -> U256 {
        U256::from(MIN_HEALTH_FACTOR)
    }

    pub fn get_staleness_timeout(&self) -> u64 {
        STALENESS_TIMEOUT_SECONDS
    }

    // ========== Internal Functions ==========

    fn deposit_collateral_internal(&mut self, user: Address, asset: Address, amount: U256) {
        self.require_more_than_zero(amount);
        self.require_allowed_asset(asset);

        self.ledger.record_deposit(user, asset, amount);
        self.env().emit_event(CollateralDeposited { user, asset, amount });

        let engine = self.env().self_address();
        let args = runtime_args! {
            "owner" => user,
            "recipient" => engine,
            "amount" => amount
        };
        let call_def = CallDef::new(entry_points::TRANSFER_FROM, true, args);
        let success: bool = self.env().call_contract(asset, call_def);
        if !success {
            self.env().revert(SynthError::TransferFailed);
        }
    }

    fn mint_internal(&mut self, user: Address, amount: U256) {
        self.require_more_than_zero(amount);

        self.ledger.record_mint(user, amount);
        self.revert_if_health_factor_is_broken(user);

        let args = runtime_args! {
            "to" => user,
            "amount" => amount
        };
        let call_def = CallDef::new(entry_points::MINT, true, args);
        let minted: bool = self.env().call_contract(self.synth_token_address(), call_def);
        if !minted {
            self.env().revert(SynthError::MintFailed);
        }
        self.env().emit_event(SynthMinted { user, amount });
    }

    /// Reduce `on_behalf_of`'s debt by `amount`, paid with `payer`'s sUSD
    fn burn_internal(&mut self, on_behalf_of: Address, payer: Address, amount: U256) {
        self.ledger.record_burn(on_behalf_of, amount);

        let token = self.synth_token_address();
        let engine = self.env().self_address();
        let pull_args = runtime_args! {
            "owner" => payer,
            "recipient" => engine,
            "amount" => amount
        };
        let pull_call = CallDef::new(entry_points::TRANSFER_FROM, true, pull_args);
        let success: bool = self.env().call_contract(token, pull_call);
        if !success {
            self.env().revert(SynthError::TransferFailed);
        }

        let burn_args = runtime_args! {
            "amount" => amount
        };
        let burn_call = CallDef::new(entry_points::BURN, true, burn_args);
        self.env().call_contract::<()>(token, burn_call);

        self.env().emit_event(SynthBurned {
            on_behalf_of,
            payer,
            amount,
        });
    }

    /// Move `amount` of `from`'s deposit of `asset` out to `to`
    fn redeem_internal(&mut self, asset: Address, amount: U256, from: Address, to: Address) {
        self.ledger.record_withdrawal(from, asset, amount);
        self.env().emit_event(CollateralRedeemed {
            redeemed_from: from,
            redeemed_to: to,
            asset,
            amount,
        });

        let args = runtime_args! {
            "recipient" => to,
            "amount" => amount
        };
        let call_def = CallDef::new(entry_points::TRANSFER, true, args);
        let success: bool = self.env().call_contract(asset, call_def);
        if !success {
            self.env().revert(SynthError::TransferFailed);
        }
    }

    fn health_factor_of(&self, user: Address) -> U256 {
        let (total_minted, collateral_value_usd) = self.ledger.account_info(user);
        calculate_health_factor(total_minted, collateral_value_usd)
    }

    fn revert_if_health_factor_is_broken(&self, user: Address) {
        if let Err(error) = check_health_factor(self.health_factor_of(user)) {
            self.env().revert(error);
        }
    }

    fn require_more_than_zero(&self, amount: U256) {
        if amount.is_zero() {
            self.env().revert(SynthError::NeedsMoreThanZero);
        }
    }

    fn require_allowed_asset(&self, asset: Address) {
        if !self.ledger.is_approved(asset) {
            self.env().revert(SynthError::TokenNotAllowed);
        }
    }

    fn synth_token_address(&self) -> Address {
        match self.synth_token.get() {
            Some(token) => token,
            None => self.env().revert(SynthError::InvalidConfig),
        }
    }

    fn enter(&mut self) {
        if self.locked.get().unwrap_or(false) {
            self.env().revert(SynthError::Reentrancy);
        }
        self.locked.set(true);
    }

    fn exit(&mut self) {
        self.locked.set(false);
    }
}
