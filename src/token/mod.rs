//! Single fungible-token ledger
//!
//! Tracks balances, allowances, supply and the pause switch for one token
//! with a fixed supply ceiling. The owner and any authorized minters may mint;
//! holders move and burn their own units; allowances let a spender move units
//! on an owner's behalf.
//!
//! # Example
//!
//! ```rust
//! use bootcamp_token::token::{Principal, TokenLedger, TokenMetadata};
//!
//! let deployer = Principal::from("deployer");
//! let alice = Principal::from("alice");
//! let bob = Principal::from("bob");
//!
//! let mut ledger = TokenLedger::deploy(TokenMetadata::default(), deployer.clone());
//!
//! ledger.mint(&deployer, 1_000, &alice).unwrap();
//! ledger.transfer(&alice, 400, &alice, &bob, None).unwrap();
//!
//! assert_eq!(ledger.get_balance(&alice), 600);
//! assert_eq!(ledger.get_total_supply(), 1_000);
//! ```

pub mod allowances;
pub mod authority;
pub mod balances;
pub mod call;
pub mod circulation;
pub mod error;
pub mod events;
pub mod ledger;
pub mod metadata;
pub mod principal;

pub use allowances::AllowanceLedger;
pub use authority::AuthorizationRegistry;
pub use balances::BalanceLedger;
pub use call::{Call, Response, Value};
pub use circulation::CirculationState;
pub use error::{LedgerError, LedgerResult};
pub use events::{EventKind, LedgerEvent, MAX_EVENT_HISTORY};
pub use ledger::{AuditReport, TokenLedger};
pub use metadata::{MetadataError, TokenMetadata};
pub use principal::{Principal, PrincipalError};
