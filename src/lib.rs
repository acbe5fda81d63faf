//! Bootcamp Token: a single fungible-token ledger in Rust
//!
//! This crate provides the state machine of one capped, pausable token:
//! - Balances and allowances with exact, checked accounting
//! - A fixed max supply enforced on every mint
//! - An immutable owner plus owner-managed authorized minters
//! - An emergency pause that blocks value movement but never admin calls
//! - Numerically coded errors, with no partial state on failure
//! - JSON persistence with atomic saves and backups
//!
//! # Example
//!
//! ```rust
//! use bootcamp_token::token::{LedgerError, Principal, TokenLedger, TokenMetadata};
//!
//! let owner = Principal::from("deployer");
//! let wallet = Principal::from("wallet_1");
//! let mut ledger = TokenLedger::deploy(TokenMetadata::default(), owner.clone());
//!
//! ledger.mint(&owner, 1_000, &wallet).unwrap();
//! assert_eq!(ledger.get_balance(&wallet), 1_000);
//!
//! // Only the owner and authorized minters may mint
//! let err = ledger.mint(&wallet, 1_000, &wallet).unwrap_err();
//! assert_eq!(err, LedgerError::Unauthorized);
//! assert_eq!(err.code(), 106);
//! ```

pub mod cli;
pub mod crypto;
pub mod storage;
pub mod token;

// Re-export commonly used types
pub use storage::{Storage, StorageConfig, StorageError};
pub use token::{
    Call, LedgerError, LedgerEvent, LedgerResult, Principal, Response, TokenLedger,
    TokenMetadata, Value,
};
