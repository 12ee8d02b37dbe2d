//! CEP-18 collateral token with switchable misbehaviour.

use odra::prelude::*;
use odra::casper_types::{U256, runtime_args};
use odra::CallDef;
use crate::errors::SynthError;

/// Collateral token used in tests
///
/// - `set_fail_transfers(true)` makes `transfer`/`transfer_from` report `false`
/// - `set_reentry_target(Some(engine))` makes `transfer_from` call back into
///   `engine.deposit_collateral` before moving funds
#[odra::module]
pub struct MockCollateralToken {
    symbol: Var<String>,
    total_supply: Var<U256>,
    balances: Mapping<Address, U256>,
    allowances: Mapping<(Address, Address), U256>,
    fail_transfers: Var<bool>,
    reentry_target: Var<Option<Address>>,
}

#[odra::module]
impl MockCollateralToken {
    pub fn init(&mut self, symbol: String) {
        self.symbol.set(symbol);
        self.total_supply.set(U256::zero());
        self.fail_transfers.set(false);
        self.reentry_target.set(None);
    }

    pub fn symbol(&self) -> String {
        self.symbol.get().unwrap_or_default()
    }

    pub fn decimals(&self) -> u8 {
        18
    }

    pub fn total_supply(&self) -> U256 {
        self.total_supply.get().unwrap_or_default()
    }

    pub fn balance_of(&self, account: Address) -> U256 {
        self.balances.get(&account).unwrap_or_default()
    }

    pub fn allowance(&self, owner: Address, spender: Address) -> U256 {
        self.allowances.get(&(owner, spender)).unwrap_or_default()
    }

    /// Open faucet
    pub fn mint(&mut self, to: Address, amount: U256) {
        self.balances.set(&to, self.balance_of(to) + amount);
        self.total_supply.set(self.total_supply() + amount);
    }

    pub fn approve(&mut self, spender: Address, amount: U256) -> bool {
        let owner = self.env().caller();
        self.allowances.set(&(owner, spender), amount);
        true
    }

    pub fn transfer(&mut self, recipient: Address, amount: U256) -> bool {
        if self.fail_transfers.get().unwrap_or(false) {
            return false;
        }
        let sender = self.env().caller();
        self.move_balance(sender, recipient, amount);
        true
    }

    pub fn transfer_from(&mut self, owner: Address, recipient: Address, amount: U256) -> bool {
        if let Some(target) = self.reentry_target.get().flatten() {
            let args = runtime_args! {
                "collateral_asset" => self.env().self_address(),
                "amount" => amount
            };
            let call_def = CallDef::new("deposit_collateral", true, args);
            self.env().call_contract::<()>(target, call_def);
        }
        if self.fail_transfers.get().unwrap_or(false) {
            return false;
        }

        let spender = self.env().caller();
        let allowance = self.allowance(owner, spender);
        if allowance < amount {
            self.env().revert(SynthError::InsufficientAllowance);
        }
        self.allowances.set(&(owner, spender), allowance - amount);
        self.move_balance(owner, recipient, amount);
        true
    }

    pub fn set_fail_transfers(&mut self, fail: bool) {
        self.fail_transfers.set(fail);
    }

    pub fn set_reentry_target(&mut self, target: Option<Address>) {
        self.reentry_target.set(target);
    }

    fn move_balance(&mut self, from: Address, to: Address, amount: U256) {
        let from_balance = self.balance_of(from);
        if from_balance < amount {
            self.env().revert(SynthError::InsufficientBalance);
        }
        self.balances.set(&from, from_balance - amount);
        self.balances.set(&to, self.balance_of(to) + amount);
    }
}
