//! Owner and minter registry

use crate::token::error::{LedgerError, LedgerResult};
use crate::token::principal::Principal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Tracks the immutable owner and the explicitly authorized minters
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorizationRegistry {
    owner: Principal,
    /// Never contains the owner
    authorized_minters: BTreeSet<Principal>,
}

impl AuthorizationRegistry {
    pub fn new(owner: Principal) -> Self {
        Self {
            owner,
            authorized_minters: BTreeSet::new(),
        }
    }

    pub fn owner(&self) -> &Principal {
        &self.owner
    }

    pub fn is_owner(&self, caller: &Principal) -> bool {
        *caller == self.owner
    }

    /// Owner is always a minter, whether or not it was ever added
    pub fn is_authorized_minter(&self, principal: &Principal) -> bool {
        self.is_owner(principal) || self.authorized_minters.contains(principal)
    }

    pub(crate) fn require_owner(&self, caller: &Principal) -> LedgerResult<()> {
        if self.is_owner(caller) {
            Ok(())
        } else {
            Err(LedgerError::OwnerOnly)
        }
    }

    /// Grant minting rights. Idempotent; adding the owner is a no-op.
    pub fn add_minter(&mut self, caller: &Principal, principal: &Principal) -> LedgerResult<()> {
        self.require_owner(caller)?;
        if !self.is_owner(principal) {
            self.authorized_minters.insert(principal.clone());
        }
        Ok(())
    }

    /// Revoke minting rights. Idempotent; the owner cannot be revoked.
    pub fn remove_minter(&mut self, caller: &Principal, principal: &Principal) -> LedgerResult<()> {
        self.require_owner(caller)?;
        self.authorized_minters.remove(principal);
        Ok(())
    }

    /// Explicitly authorized minters, sorted
    pub fn minters(&self) -> impl Iterator<Item = &Principal> {
        self.authorized_minters.iter()
    }

    /// False when the owner also appears in the stored minter set
    pub fn is_normalized(&self) -> bool {
        !self.authorized_minters.contains(&self.owner)
    }

    pub fn minter_count(&self) -> usize {
        self.authorized_minters.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> AuthorizationRegistry {
        AuthorizationRegistry::new(Principal::from("deployer"))
    }

    #[test]
    fn test_owner_is_minter() {
        let reg = registry();
        let owner = Principal::from("deployer");
        assert!(reg.is_owner(&owner));
        assert!(reg.is_authorized_minter(&owner));
        assert!(!reg.is_authorized_minter(&Principal::from("wallet_1")));
        assert_eq!(reg.minter_count(), 0);
    }

    #[test]
    fn test_add_remove_minter() {
        let mut reg = registry();
        let owner = Principal::from("deployer");
        let w1 = Principal::from("wallet_1");

        reg.add_minter(&owner, &w1).unwrap();
        assert!(reg.is_authorized_minter(&w1));

        reg.remove_minter(&owner, &w1).unwrap();
        assert!(!reg.is_authorized_minter(&w1));
    }

    #[test]
    fn test_minter_changes_are_idempotent() {
        let owner = Principal::from("deployer");
        let w1 = Principal::from("wallet_1");

        let mut once = registry();
        once.add_minter(&owner, &w1).unwrap();
        let mut twice = registry();
        twice.add_minter(&owner, &w1).unwrap();
        twice.add_minter(&owner, &w1).unwrap();
        assert_eq!(once, twice);

        once.remove_minter(&owner, &w1).unwrap();
        twice.remove_minter(&owner, &w1).unwrap();
        twice.remove_minter(&owner, &w1).unwrap();
        assert_eq!(once, twice);
        assert_eq!(once, registry());
    }

    #[test]
    fn test_owner_never_stored_as_minter() {
        let mut reg = registry();
        let owner = Principal::from("deployer");

        reg.add_minter(&owner, &owner).unwrap();
        assert_eq!(reg.minter_count(), 0);

        reg.remove_minter(&owner, &owner).unwrap();
        assert!(reg.is_authorized_minter(&owner));
    }

    #[test]
    fn test_non_owner_rejected() {
        let mut reg = registry();
        let w1 = Principal::from("wallet_1");
        let w2 = Principal::from("wallet_2");

        assert_eq!(reg.add_minter(&w1, &w2), Err(LedgerError::OwnerOnly));
        assert_eq!(reg.remove_minter(&w1, &w2), Err(LedgerError::OwnerOnly));

        // Minters are not admins
        reg.add_minter(&Principal::from("deployer"), &w1).unwrap();
        assert_eq!(reg.add_minter(&w1, &w2), Err(LedgerError::OwnerOnly));
    }
}
