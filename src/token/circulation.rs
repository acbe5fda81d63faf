//! Supply counter, supply ceiling and the pause switch

use crate::token::error::{LedgerError, LedgerResult};
use crate::token::principal::Principal;
use crate::token::AuthorizationRegistry;
use serde::{Deserialize, Serialize};

/// Global circulation state
///
/// Invariant: `total_supply <= max_supply`, and `max_supply` never changes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CirculationState {
    total_supply: u128,
    max_supply: u128,
    paused: bool,
}

impl CirculationState {
    pub fn new(max_supply: u128) -> Self {
        Self {
            total_supply: 0,
            max_supply,
            paused: false,
        }
    }

    pub fn total_supply(&self) -> u128 {
        self.total_supply
    }

    pub fn max_supply(&self) -> u128 {
        self.max_supply
    }

    /// Units still mintable before the ceiling
    pub fn remaining_supply(&self) -> u128 {
        self.max_supply.saturating_sub(self.total_supply)
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Set the pause flag. Owner only; never itself pause-gated.
    pub fn set_paused(
        &mut self,
        authority: &AuthorizationRegistry,
        caller: &Principal,
        value: bool,
    ) -> LedgerResult<()> {
        authority.require_owner(caller)?;
        self.paused = value;
        Ok(())
    }

    pub fn check_not_paused(&self) -> LedgerResult<()> {
        if self.paused {
            Err(LedgerError::ContractPaused)
        } else {
            Ok(())
        }
    }

    /// Read-only form of [`reserve_supply`](Self::reserve_supply)
    pub fn ensure_capacity(&self, amount: u128) -> LedgerResult<()> {
        match self.total_supply.checked_add(amount) {
            Some(total) if total <= self.max_supply => Ok(()),
            _ => Err(LedgerError::ExceedsMaxSupply),
        }
    }

    /// Count `amount` new units against the ceiling
    pub fn reserve_supply(&mut self, amount: u128) -> LedgerResult<()> {
        self.ensure_capacity(amount)?;
        self.total_supply += amount;
        Ok(())
    }

    /// Remove burned units from the supply
    ///
    /// # Panics
    ///
    /// Panics if `amount` exceeds the total supply; burns are bounded by a
    /// holder balance, which the conservation invariant bounds by the supply.
    pub fn release_supply(&mut self, amount: u128) {
        self.total_supply = self
            .total_supply
            .checked_sub(amount)
            .expect("released more supply than exists");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state() {
        let state = CirculationState::new(1_000);
        assert_eq!(state.total_supply(), 0);
        assert_eq!(state.max_supply(), 1_000);
        assert_eq!(state.remaining_supply(), 1_000);
        assert!(!state.is_paused());
        assert!(state.check_not_paused().is_ok());
    }

    #[test]
    fn test_reserve_up_to_ceiling() {
        let mut state = CirculationState::new(1_000);
        state.reserve_supply(400).unwrap();
        state.reserve_supply(600).unwrap();
        assert_eq!(state.total_supply(), 1_000);
        assert_eq!(state.remaining_supply(), 0);

        assert_eq!(state.reserve_supply(1), Err(LedgerError::ExceedsMaxSupply));
        assert_eq!(state.total_supply(), 1_000);
    }

    #[test]
    fn test_reserve_overflow_is_rejected() {
        let mut state = CirculationState::new(u128::MAX);
        state.reserve_supply(10).unwrap();
        assert_eq!(
            state.reserve_supply(u128::MAX),
            Err(LedgerError::ExceedsMaxSupply)
        );
        assert_eq!(state.total_supply(), 10);
    }

    #[test]
    fn test_release_supply() {
        let mut state = CirculationState::new(1_000);
        state.reserve_supply(700).unwrap();
        state.release_supply(300);
        assert_eq!(state.total_supply(), 400);
    }

    #[test]
    fn test_pause_is_owner_only() {
        let authority = AuthorizationRegistry::new(Principal::from("deployer"));
        let mut state = CirculationState::new(1_000);

        assert_eq!(
            state.set_paused(&authority, &Principal::from("wallet_1"), true),
            Err(LedgerError::OwnerOnly)
        );
        assert!(!state.is_paused());

        let owner = Principal::from("deployer");
        state.set_paused(&authority, &owner, true).unwrap();
        state.set_paused(&authority, &owner, true).unwrap();
        assert!(state.is_paused());
        assert_eq!(state.check_not_paused(), Err(LedgerError::ContractPaused));

        state.set_paused(&authority, &owner, false).unwrap();
        assert!(state.check_not_paused().is_ok());
    }
}
