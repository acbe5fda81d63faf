//! The token ledger
//!
//! `TokenLedger` aggregates every piece of token state and is the only way to
//! mutate it. Each operation checks all of its preconditions before touching
//! anything, so a failed call leaves the ledger exactly as it was.

use crate::crypto::sha256_hex;
use crate::token::allowances::AllowanceLedger;
use crate::token::authority::AuthorizationRegistry;
use crate::token::balances::BalanceLedger;
use crate::token::circulation::CirculationState;
use crate::token::error::{LedgerError, LedgerResult};
use crate::token::events::{EventKind, LedgerEvent, MAX_EVENT_HISTORY};
use crate::token::metadata::TokenMetadata;
use crate::token::principal::Principal;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Snapshot of the accounting invariants
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct AuditReport {
    pub total_supply: u128,
    pub max_supply: u128,
    /// Sum of all balances, `None` on overflow
    pub circulating: Option<u128>,
    pub holder_count: usize,
    pub minter_count: usize,
    pub paused: bool,
    /// No zero entries and no owner in the minter set
    pub normalized: bool,
}

impl AuditReport {
    /// Conservation holds, the supply is within the ceiling and storage is normalized
    pub fn is_consistent(&self) -> bool {
        self.circulating == Some(self.total_supply)
            && self.total_supply <= self.max_supply
            && self.normalized
    }
}

/// The complete state of a deployed token
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TokenLedger {
    metadata: TokenMetadata,
    authority: AuthorizationRegistry,
    circulation: CirculationState,
    balances: BalanceLedger,
    allowances: AllowanceLedger,
    /// Recent events, oldest first
    #[serde(default)]
    history: VecDeque<LedgerEvent>,
}

/// The hashed part of the ledger: everything except the event log
#[derive(Serialize)]
struct StateView<'a> {
    metadata: &'a TokenMetadata,
    authority: &'a AuthorizationRegistry,
    circulation: &'a CirculationState,
    balances: &'a BalanceLedger,
    allowances: &'a AllowanceLedger,
}

impl TokenLedger {
    /// Deploy a new token owned by `deployer`
    pub fn deploy(metadata: TokenMetadata, deployer: Principal) -> Self {
        let circulation = CirculationState::new(metadata.max_supply);

        log::info!(
            "Token deployed: {} ({}) owner {}, max supply {}",
            metadata.name,
            metadata.symbol,
            deployer,
            metadata.max_supply
        );

        Self {
            metadata,
            authority: AuthorizationRegistry::new(deployer),
            circulation,
            balances: BalanceLedger::new(),
            allowances: AllowanceLedger::new(),
            history: VecDeque::new(),
        }
    }

    // =========================================================================
    // Read-only queries
    // =========================================================================

    pub fn metadata(&self) -> &TokenMetadata {
        &self.metadata
    }

    pub fn get_name(&self) -> &str {
        &self.metadata.name
    }

    pub fn get_symbol(&self) -> &str {
        &self.metadata.symbol
    }

    pub fn get_decimals(&self) -> u8 {
        self.metadata.decimals
    }

    pub fn get_max_supply(&self) -> u128 {
        self.circulation.max_supply()
    }

    pub fn get_token_uri(&self) -> Option<&str> {
        self.metadata.token_uri.as_deref()
    }

    pub fn get_owner(&self) -> &Principal {
        self.authority.owner()
    }

    pub fn get_balance(&self, principal: &Principal) -> u128 {
        self.balances.balance_of(principal)
    }

    pub fn get_allowance(&self, owner: &Principal, spender: &Principal) -> u128 {
        self.allowances.allowance_of(owner, spender)
    }

    pub fn get_total_supply(&self) -> u128 {
        self.circulation.total_supply()
    }

    pub fn is_paused(&self) -> bool {
        self.circulation.is_paused()
    }

    pub fn is_authorized_minter(&self, principal: &Principal) -> bool {
        self.authority.is_authorized_minter(principal)
    }

    pub fn authority(&self) -> &AuthorizationRegistry {
        &self.authority
    }

    pub fn circulation(&self) -> &CirculationState {
        &self.circulation
    }

    pub fn balances(&self) -> &BalanceLedger {
        &self.balances
    }

    pub fn allowances(&self) -> &AllowanceLedger {
        &self.allowances
    }

    /// Recent events, oldest first
    pub fn history(&self) -> impl Iterator<Item = &LedgerEvent> {
        self.history.iter()
    }

    /// Check the accounting invariants
    pub fn audit(&self) -> AuditReport {
        AuditReport {
            total_supply: self.circulation.total_supply(),
            max_supply: self.circulation.max_supply(),
            circulating: self.balances.circulating(),
            holder_count: self.balances.holder_count(),
            minter_count: self.authority.minter_count(),
            paused: self.circulation.is_paused(),
            normalized: self.authority.is_normalized()
                && self.balances.is_normalized()
                && self.allowances.is_normalized(),
        }
    }

    /// SHA-256 fingerprint of the ledger state, excluding the event log
    pub fn state_hash(&self) -> String {
        let view = StateView {
            metadata: &self.metadata,
            authority: &self.authority,
            circulation: &self.circulation,
            balances: &self.balances,
            allowances: &self.allowances,
        };
        // Serializing plain maps and integers into a Vec cannot fail
        let bytes = serde_json::to_vec(&view).unwrap_or_default();
        sha256_hex(&bytes)
    }

    // =========================================================================
    // Mutating operations
    // =========================================================================

    /// Create `amount` new units for `recipient`
    pub fn mint(
        &mut self,
        caller: &Principal,
        amount: u128,
        recipient: &Principal,
    ) -> LedgerResult<LedgerEvent> {
        self.guard("mint", caller, |ledger| {
            ledger.circulation.check_not_paused()?;
            if amount == 0 {
                return Err(LedgerError::InvalidAmount);
            }
            if !ledger.authority.is_authorized_minter(caller) {
                return Err(LedgerError::Unauthorized);
            }
            ledger.circulation.ensure_capacity(amount)
        })?;

        self.circulation.reserve_supply(amount)?;
        self.balances.credit(recipient, amount);

        Ok(self.record(EventKind::Mint {
            minter: caller.clone(),
            recipient: recipient.clone(),
            amount,
        }))
    }

    /// Destroy `amount` of the caller's own units
    pub fn burn(
        &mut self,
        caller: &Principal,
        amount: u128,
        holder: &Principal,
    ) -> LedgerResult<LedgerEvent> {
        self.guard("burn", caller, |ledger| {
            ledger.circulation.check_not_paused()?;
            if caller != holder {
                return Err(LedgerError::NotTokenOwner);
            }
            if amount == 0 {
                return Err(LedgerError::InvalidAmount);
            }
            ledger.balances.ensure_covers(holder, amount)
        })?;

        self.balances.debit(holder, amount)?;
        self.circulation.release_supply(amount);

        Ok(self.record(EventKind::Burn {
            holder: holder.clone(),
            amount,
        }))
    }

    /// Move the caller's own units to `recipient`
    ///
    /// The memo is opaque: it is logged and kept in the event, nothing more.
    pub fn transfer(
        &mut self,
        caller: &Principal,
        amount: u128,
        sender: &Principal,
        recipient: &Principal,
        memo: Option<String>,
    ) -> LedgerResult<LedgerEvent> {
        self.guard("transfer", caller, |ledger| {
            ledger.circulation.check_not_paused()?;
            if caller != sender {
                return Err(LedgerError::NotTokenOwner);
            }
            if amount == 0 {
                return Err(LedgerError::InvalidAmount);
            }
            ledger.balances.ensure_covers(sender, amount)
        })?;

        self.balances.move_balance(sender, recipient, amount)?;

        if let Some(memo) = &memo {
            log::info!("Transfer memo from {}: {}", sender, memo);
        }

        Ok(self.record(EventKind::Transfer {
            sender: sender.clone(),
            recipient: recipient.clone(),
            amount,
            memo,
        }))
    }

    /// Let `spender` move up to `amount` of the caller's units (overwrites)
    pub fn approve(
        &mut self,
        caller: &Principal,
        spender: &Principal,
        amount: u128,
    ) -> LedgerResult<LedgerEvent> {
        self.guard("approve", caller, |ledger| ledger.circulation.check_not_paused())?;

        self.allowances.set_allowance(caller, spender, amount);

        Ok(self.record(EventKind::Approval {
            owner: caller.clone(),
            spender: spender.clone(),
            amount,
        }))
    }

    /// Move `owner`'s units to `recipient` against the caller's allowance
    pub fn transfer_from(
        &mut self,
        caller: &Principal,
        owner: &Principal,
        recipient: &Principal,
        amount: u128,
    ) -> LedgerResult<LedgerEvent> {
        self.guard("transfer-from", caller, |ledger| {
            ledger.circulation.check_not_paused()?;
            ledger.allowances.ensure_covers(owner, caller, amount)?;
            ledger.balances.ensure_covers(owner, amount)
        })?;

        self.allowances.consume_allowance(owner, caller, amount)?;
        self.balances.move_balance(owner, recipient, amount)?;

        Ok(self.record(EventKind::TransferFrom {
            spender: caller.clone(),
            owner: owner.clone(),
            recipient: recipient.clone(),
            amount,
        }))
    }

    /// Block value-moving operations. Owner only.
    pub fn pause_contract(&mut self, caller: &Principal) -> LedgerResult<LedgerEvent> {
        self.set_paused(caller, true)
    }

    /// Lift the pause. Owner only, and allowed while paused.
    pub fn unpause_contract(&mut self, caller: &Principal) -> LedgerResult<LedgerEvent> {
        self.set_paused(caller, false)
    }

    pub fn add_authorized_minter(
        &mut self,
        caller: &Principal,
        minter: &Principal,
    ) -> LedgerResult<LedgerEvent> {
        self.guard("add-authorized-minter", caller, |ledger| {
            ledger.authority.require_owner(caller)
        })?;

        self.authority.add_minter(caller, minter)?;

        Ok(self.record(EventKind::MinterAdded {
            minter: minter.clone(),
        }))
    }

    pub fn remove_authorized_minter(
        &mut self,
        caller: &Principal,
        minter: &Principal,
    ) -> LedgerResult<LedgerEvent> {
        self.guard("remove-authorized-minter", caller, |ledger| {
            ledger.authority.require_owner(caller)
        })?;

        self.authority.remove_minter(caller, minter)?;

        Ok(self.record(EventKind::MinterRemoved {
            minter: minter.clone(),
        }))
    }

    fn set_paused(&mut self, caller: &Principal, paused: bool) -> LedgerResult<LedgerEvent> {
        let op = if paused { "pause-contract" } else { "unpause-contract" };
        self.guard(op, caller, |ledger| ledger.authority.require_owner(caller))?;

        self.circulation.set_paused(&self.authority, caller, paused)?;

        Ok(self.record(EventKind::PauseChanged { paused }))
    }

    /// Run the read-only precondition checks of an operation
    fn guard<F>(&self, op: &str, caller: &Principal, check: F) -> LedgerResult<()>
    where
        F: FnOnce(&Self) -> LedgerResult<()>,
    {
        check(self).map_err(|e| {
            log::debug!("{} by {} rejected: {} (err u{})", op, caller, e, e.code());
            e
        })
    }

    /// Append to the bounded event history
    fn record(&mut self, kind: EventKind) -> LedgerEvent {
        log::info!("{}", kind);

        let event = LedgerEvent::new(kind);
        self.history.push_back(event.clone());
        while self.history.len() > MAX_EVENT_HISTORY {
            self.history.pop_front();
        }
        event
    }
}
