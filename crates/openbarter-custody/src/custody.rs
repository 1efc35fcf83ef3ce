//! The asset-custody collaborator contract.
//!
//! The engine never talks to a token contract directly; it goes through
//! [`AssetCustody`]. Deposits are pulled with `transfer_in` (requires a prior
//! allowance from the payer), payouts pushed with `transfer_out`, and native
//! coin leaves through `pay_coin`. All calls are synchronous and atomic with
//! the surrounding state change — a failed call leaves custody unchanged and
//! the caller rolls nothing forward.
//!
//! Custody failures are surfaced to engine callers verbatim: the engine
//! cannot reason about a collaborator's internals.

use std::collections::{HashMap, HashSet};

use openbarter_types::{AccountId, AssetId, CustodyError};

/// Result alias for custody calls.
pub type CustodyResult<T> = Result<T, CustodyError>;

/// Holds value on the engine's behalf and moves it between parties.
pub trait AssetCustody {
    /// Pull `amount` of `token` from `from` into custody.
    ///
    /// # Errors
    /// Fails if the token is not a transferable contract, the payer's
    /// allowance is too low, or the payer's funds are too low.
    fn transfer_in(&mut self, token: AssetId, from: AccountId, amount: u128) -> CustodyResult<()>;

    /// Push `amount` of `token` out of custody to `to`.
    ///
    /// # Errors
    /// Fails if the token is unknown or custody does not hold `amount`.
    fn transfer_out(&mut self, token: AssetId, to: AccountId, amount: u128) -> CustodyResult<()>;

    /// Pay out native coin held by the engine.
    ///
    /// # Errors
    /// Fails if the transfer to the recipient cannot be completed.
    fn pay_coin(&mut self, to: AccountId, amount: u128) -> CustodyResult<()>;
}

/// Reference custody: registered tokens, per-account balances, and
/// engine-directed allowances, all in memory.
///
/// Used by the test suites and as the model integrators adapt when wiring a
/// real transfer primitive underneath the engine.
#[derive(Debug, Default)]
pub struct InMemoryCustody {
    /// Tokens that behave as transferable contracts.
    tokens: HashSet<AssetId>,
    /// Per-(token, account) balances.
    balances: HashMap<(AssetId, AccountId), u128>,
    /// Amount each account has approved the engine to pull, per token.
    allowances: HashMap<(AssetId, AccountId), u128>,
    /// Amount of each token currently held in custody.
    held: HashMap<AssetId, u128>,
    /// Completed native-coin payouts, per recipient.
    coin_payouts: HashMap<AccountId, u128>,
    /// Failure switch for exercising coin-withdrawal error paths.
    fail_coin_payouts: bool,
}

impl InMemoryCustody {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `token` behave as a transferable contract.
    pub fn register_token(&mut self, token: AssetId) {
        self.tokens.insert(token);
    }

    /// Credit `amount` of `token` to `account` out of thin air.
    pub fn mint(&mut self, token: AssetId, account: AccountId, amount: u128) {
        *self.balances.entry((token, account)).or_insert(0) += amount;
    }

    /// Set how much the engine may pull from `owner`.
    pub fn approve(&mut self, token: AssetId, owner: AccountId, amount: u128) {
        self.allowances.insert((token, owner), amount);
    }

    /// An account's token balance outside custody.
    #[must_use]
    pub fn balance_of(&self, token: AssetId, account: AccountId) -> u128 {
        self.balances.get(&(token, account)).copied().unwrap_or(0)
    }

    /// Remaining engine allowance for `owner`.
    #[must_use]
    pub fn allowance(&self, token: AssetId, owner: AccountId) -> u128 {
        self.allowances.get(&(token, owner)).copied().unwrap_or(0)
    }

    /// Amount of `token` currently held in custody.
    #[must_use]
    pub fn held(&self, token: AssetId) -> u128 {
        self.held.get(&token).copied().unwrap_or(0)
    }

    /// Total native coin paid out to `account`.
    #[must_use]
    pub fn coin_paid(&self, account: AccountId) -> u128 {
        self.coin_payouts.get(&account).copied().unwrap_or(0)
    }

    /// Make every subsequent coin payout fail.
    pub fn set_coin_payout_failure(&mut self, fail: bool) {
        self.fail_coin_payouts = fail;
    }
}

impl AssetCustody for InMemoryCustody {
    fn transfer_in(&mut self, token: AssetId, from: AccountId, amount: u128) -> CustodyResult<()> {
        if !self.tokens.contains(&token) {
            return Err(CustodyError::UnknownToken(token));
        }

        let approved = self.allowance(token, from);
        if approved < amount {
            return Err(CustodyError::InsufficientAllowance {
                needed: amount,
                approved,
            });
        }

        let available = self.balance_of(token, from);
        if available < amount {
            return Err(CustodyError::InsufficientFunds {
                needed: amount,
                available,
            });
        }

        self.allowances.insert((token, from), approved - amount);
        self.balances.insert((token, from), available - amount);
        *self.held.entry(token).or_insert(0) += amount;
        tracing::debug!(%token, %from, amount, "custody pull");
        Ok(())
    }

    fn transfer_out(&mut self, token: AssetId, to: AccountId, amount: u128) -> CustodyResult<()> {
        if !self.tokens.contains(&token) {
            return Err(CustodyError::UnknownToken(token));
        }

        let available = self.held(token);
        if available < amount {
            return Err(CustodyError::InsufficientFunds {
                needed: amount,
                available,
            });
        }

        self.held.insert(token, available - amount);
        *self.balances.entry((token, to)).or_insert(0) += amount;
        tracing::debug!(%token, %to, amount, "custody payout");
        Ok(())
    }

    fn pay_coin(&mut self, to: AccountId, amount: u128) -> CustodyResult<()> {
        if self.fail_coin_payouts {
            return Err(CustodyError::CoinTransferFailed);
        }
        *self.coin_payouts.entry(to).or_insert(0) += amount;
        tracing::debug!(%to, amount, "coin payout");
        Ok(())
    }
}
