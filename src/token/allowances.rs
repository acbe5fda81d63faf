//! Delegated spending quotas

use crate::token::error::{LedgerError, LedgerResult};
use crate::token::principal::Principal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Allowances: owner -> (spender -> amount)
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AllowanceLedger {
    allowances: BTreeMap<Principal, BTreeMap<Principal, u128>>,
}

impl AllowanceLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get allowance for a spender
    pub fn allowance_of(&self, owner: &Principal, spender: &Principal) -> u128 {
        self.allowances
            .get(owner)
            .and_then(|spenders| spenders.get(spender))
            .copied()
            .unwrap_or(0)
    }

    /// Overwrite the quota (zero revokes)
    pub fn set_allowance(&mut self, owner: &Principal, spender: &Principal, amount: u128) {
        if amount == 0 {
            if let Some(spenders) = self.allowances.get_mut(owner) {
                spenders.remove(spender);
                if spenders.is_empty() {
                    self.allowances.remove(owner);
                }
            }
            return;
        }

        self.allowances
            .entry(owner.clone())
            .or_default()
            .insert(spender.clone(), amount);
    }

    pub fn ensure_covers(&self, owner: &Principal, spender: &Principal, amount: u128) -> LedgerResult<()> {
        if self.allowance_of(owner, spender) < amount {
            return Err(LedgerError::InsufficientAllowance);
        }
        Ok(())
    }

    /// Spend `amount` of the quota; leaves state untouched on failure
    pub fn consume_allowance(
        &mut self,
        owner: &Principal,
        spender: &Principal,
        amount: u128,
    ) -> LedgerResult<()> {
        self.ensure_covers(owner, spender, amount)?;
        let remaining = self.allowance_of(owner, spender) - amount;
        self.set_allowance(owner, spender, remaining);
        Ok(())
    }

    /// False when a zero quota or an empty owner entry is stored
    pub fn is_normalized(&self) -> bool {
        self.allowances
            .values()
            .all(|spenders| !spenders.is_empty() && spenders.values().all(|&amount| amount > 0))
    }

    /// Spenders approved by `owner`, sorted
    pub fn spenders_of(&self, owner: &Principal) -> Vec<(&Principal, u128)> {
        self.allowances
            .get(owner)
            .map(|spenders| spenders.iter().map(|(s, &a)| (s, a)).collect())
            .unwrap_or_default()
    }
}
