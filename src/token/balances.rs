//! Per-account balances

use crate::token::error::{LedgerError, LedgerResult};
use crate::token::principal::Principal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Balances: principal -> amount
///
/// Zero balances are not stored, so absence and zero are the same thing.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BalanceLedger {
    balances: BTreeMap<Principal, u128>,
}

impl BalanceLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get balance of an address
    pub fn balance_of(&self, principal: &Principal) -> u128 {
        self.balances.get(principal).copied().unwrap_or(0)
    }

    /// Fails with `InsufficientBalance` unless `principal` holds at least `amount`
    pub fn ensure_covers(&self, principal: &Principal, amount: u128) -> LedgerResult<()> {
        if self.balance_of(principal) < amount {
            return Err(LedgerError::InsufficientBalance);
        }
        Ok(())
    }

    /// Add `amount` to a balance
    ///
    /// # Panics
    ///
    /// Panics on overflow. Balances are bounded by the supply ceiling, so an
    /// overflow means the ledger is already corrupt.
    pub fn credit(&mut self, principal: &Principal, amount: u128) {
        if amount == 0 {
            return;
        }
        let balance = self.balances.entry(principal.clone()).or_insert(0);
        *balance = balance.checked_add(amount).expect("balance overflow");
    }

    /// Subtract `amount` from a balance; leaves state untouched on failure
    pub fn debit(&mut self, principal: &Principal, amount: u128) -> LedgerResult<()> {
        self.ensure_covers(principal, amount)?;
        if amount == 0 {
            return Ok(());
        }
        let remaining = self.balance_of(principal) - amount;
        if remaining == 0 {
            self.balances.remove(principal);
        } else {
            self.balances.insert(principal.clone(), remaining);
        }
        Ok(())
    }

    /// Debit `from` and credit `to`; nothing changes if the debit fails
    pub fn move_balance(&mut self, from: &Principal, to: &Principal, amount: u128) -> LedgerResult<()> {
        self.debit(from, amount)?;
        self.credit(to, amount);
        Ok(())
    }

    /// All holders with a non-zero balance, sorted by principal
    pub fn holders(&self) -> Vec<(&Principal, u128)> {
        self.balances.iter().map(|(p, &b)| (p, b)).collect()
    }

    /// False when a zero entry is stored
    pub fn is_normalized(&self) -> bool {
        self.balances.values().all(|&amount| amount > 0)
    }

    pub fn holder_count(&self) -> usize {
        self.balances.len()
    }

    /// Sum of every balance; `None` if it does not fit in a u128
    pub fn circulating(&self) -> Option<u128> {
        self.balances
            .values()
            .try_fold(0u128, |acc, &b| acc.checked_add(b))
    }
}
