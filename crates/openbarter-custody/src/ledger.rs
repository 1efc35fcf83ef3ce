//! Pull-payment balance ledger.
//!
//! Tracks withdrawable credit per (account, asset). The engine credits it on
//! cancellations and refunds, and debits it when an owner withdraws or opts
//! to fund a new offer/bid from balance instead of a fresh transfer.

use std::collections::HashMap;

use openbarter_types::{AccountId, AssetRef};
use thiserror::Error;

/// A ledger mutation that could not be applied. The entry is unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LedgerError {
    /// The credit balance is lower than the requested debit.
    #[error("insufficient credit: needed {needed}, available {available}")]
    Insufficient { needed: u128, available: u128 },

    /// The credit would overflow the balance representation.
    #[error("credit overflow")]
    Overflow,
}

/// Per-(account, asset) withdrawable credit. Source of truth for all refund
/// balances.
#[derive(Debug, Default)]
pub struct BalanceLedger {
    credits: HashMap<(AccountId, AssetRef), u128>,
}

impl BalanceLedger {
    /// Create an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self {
            credits: HashMap::new(),
        }
    }

    /// Current withdrawable credit for an (account, asset) pair.
    #[must_use]
    pub fn balance(&self, account: AccountId, asset: AssetRef) -> u128 {
        self.credits.get(&(account, asset)).copied().unwrap_or(0)
    }

    /// Add credit. Returns the new balance.
    ///
    /// # Errors
    /// Returns `Overflow` if the balance cannot represent the result; the
    /// entry is unchanged.
    pub fn credit(
        &mut self,
        account: AccountId,
        asset: AssetRef,
        amount: u128,
    ) -> Result<u128, LedgerError> {
        let entry = self.credits.entry((account, asset)).or_insert(0);
        let updated = entry.checked_add(amount).ok_or(LedgerError::Overflow)?;
        *entry = updated;
        tracing::debug!(%account, %asset, amount, balance = updated, "ledger credit");
        Ok(updated)
    }

    /// Remove credit. Returns the new balance.
    ///
    /// # Errors
    /// Returns `Insufficient` if the balance is lower than `amount`; the
    /// entry is unchanged.
    pub fn debit(
        &mut self,
        account: AccountId,
        asset: AssetRef,
        amount: u128,
    ) -> Result<u128, LedgerError> {
        let available = self.balance(account, asset);
        let updated = available
            .checked_sub(amount)
            .ok_or(LedgerError::Insufficient {
                needed: amount,
                available,
            })?;
        self.credits.insert((account, asset), updated);
        tracing::debug!(%account, %asset, amount, balance = updated, "ledger debit");
        Ok(updated)
    }

    /// Sum of all accounts' credit in one asset. Audit helper.
    #[must_use]
    pub fn total_credits(&self, asset: AssetRef) -> u128 {
        self.credits
            .iter()
            .filter(|((_, a), _)| *a == asset)
            .map(|(_, amount)| amount)
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn acct(byte: u8) -> AccountId {
        AccountId([byte; 32])
    }

    #[test]
    fn credit_then_balance() {
        let mut ledger = BalanceLedger::new();
        let new = ledger.credit(acct(1), AssetRef::Coin, 100).unwrap();
        assert_eq!(new, 100);
        assert_eq!(ledger.balance(acct(1), AssetRef::Coin), 100);
    }

    #[test]
    fn credit_accumulates() {
        let mut ledger = BalanceLedger::new();
        ledger.credit(acct(1), AssetRef::Coin, 100).unwrap();
        let new = ledger.credit(acct(1), AssetRef::Coin, 50).unwrap();
        assert_eq!(new, 150);
    }

    #[test]
    fn debit_reduces() {
        let mut ledger = BalanceLedger::new();
        ledger.credit(acct(1), AssetRef::Coin, 100).unwrap();
        let new = ledger.debit(acct(1), AssetRef::Coin, 40).unwrap();
        assert_eq!(new, 60);
    }

    #[test]
    fn debit_insufficient_fails_unchanged() {
        let mut ledger = BalanceLedger::new();
        ledger.credit(acct(1), AssetRef::Coin, 30).unwrap();
        let err = ledger.debit(acct(1), AssetRef::Coin, 31).unwrap_err();
        assert_eq!(
            err,
            LedgerError::Insufficient {
                needed: 31,
                available: 30
            }
        );
        assert_eq!(ledger.balance(acct(1), AssetRef::Coin), 30);
    }

    #[test]
    fn debit_unknown_entry_fails() {
        let mut ledger = BalanceLedger::new();
        let err = ledger.debit(acct(9), AssetRef::Coin, 1).unwrap_err();
        assert!(matches!(err, LedgerError::Insufficient { available: 0, .. }));
    }

    #[test]
    fn credit_overflow_fails_unchanged() {
        let mut ledger = BalanceLedger::new();
        ledger.credit(acct(1), AssetRef::Coin, u128::MAX).unwrap();
        let err = ledger.credit(acct(1), AssetRef::Coin, 1).unwrap_err();
        assert_eq!(err, LedgerError::Overflow);
        assert_eq!(ledger.balance(acct(1), AssetRef::Coin), u128::MAX);
    }

    #[test]
    fn assets_are_isolated() {
        let mut ledger = BalanceLedger::new();
        let token = AssetRef::Token(openbarter_types::AssetId([2u8; 32]));
        ledger.credit(acct(1), AssetRef::Coin, 100).unwrap();
        ledger.credit(acct(1), token, 7).unwrap();
        assert_eq!(ledger.balance(acct(1), AssetRef::Coin), 100);
        assert_eq!(ledger.balance(acct(1), token), 7);
    }

    #[test]
    fn total_credits_sums_accounts() {
        let mut ledger = BalanceLedger::new();
        ledger.credit(acct(1), AssetRef::Coin, 100).unwrap();
        ledger.credit(acct(2), AssetRef::Coin, 50).unwrap();
        assert_eq!(ledger.total_credits(AssetRef::Coin), 150);
    }
}
