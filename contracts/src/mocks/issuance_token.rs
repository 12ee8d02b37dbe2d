//! Issuance token with switchable failures.

use odra::prelude::*;
use odra::casper_types::U256;

/// Stands in for sUSD behind the engine
///
/// - `set_fail_mint(true)` makes `mint` report `false` without minting
/// - `set_fail_transfers(true)` makes `transfer_from` report `false`
///
/// Balances are not tracked; only the supply moved by `mint` and `burn` is.
#[odra::module]
pub struct MockIssuanceToken {
    total_supply: Var<U256>,
    mint_calls: Var<u32>,
    fail_mint: Var<bool>,
    fail_transfers: Var<bool>,
}

#[odra::module]
impl MockIssuanceToken {
    pub fn mint(&mut self, to: Address, amount: U256) -> bool {
        let _ = to;
        self.mint_calls.set(self.mint_calls() + 1);
        if self.fail_mint.get().unwrap_or(false) {
            return false;
        }
        self.total_supply.set(self.total_supply() + amount);
        true
    }

    pub fn burn(&mut self, amount: U256) {
        self.total_supply.set(self.total_supply() - amount);
    }

    pub fn transfer_from(&mut self, owner: Address, recipient: Address, amount: U256) -> bool {
        let _ = (owner, recipient, amount);
        !self.fail_transfers.get().unwrap_or(false)
    }

    pub fn set_fail_mint(&mut self, fail: bool) {
        self.fail_mint.set(fail);
    }

    pub fn set_fail_transfers(&mut self, fail: bool) {
        self.fail_transfers.set(fail);
    }

    pub fn total_supply(&self) -> U256 {
        self.total_supply.get().unwrap_or_default()
    }

    pub fn mint_calls(&self) -> u32 {
        self.mint_calls.get().unwrap_or(0)
    }
}
