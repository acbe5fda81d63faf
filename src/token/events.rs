//! Events emitted by committed ledger operations

use crate::token::principal::Principal;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of events the ledger remembers
pub const MAX_EVENT_HISTORY: usize = 100;

/// What happened
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    Mint {
        minter: Principal,
        recipient: Principal,
        amount: u128,
    },
    Burn {
        holder: Principal,
        amount: u128,
    },
    Transfer {
        sender: Principal,
        recipient: Principal,
        amount: u128,
        /// Opaque memo, recorded as given
        #[serde(default, skip_serializing_if = "Option::is_none")]
        memo: Option<String>,
    },
    Approval {
        owner: Principal,
        spender: Principal,
        amount: u128,
    },
    TransferFrom {
        spender: Principal,
        owner: Principal,
        recipient: Principal,
        amount: u128,
    },
    PauseChanged {
        paused: bool,
    },
    MinterAdded {
        minter: Principal,
    },
    MinterRemoved {
        minter: Principal,
    },
}

/// A ledger event with its timestamp
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerEvent {
    pub kind: EventKind,
    pub timestamp: DateTime<Utc>,
}

impl LedgerEvent {
    pub fn new(kind: EventKind) -> Self {
        Self {
            kind,
            timestamp: Utc::now(),
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventKind::Mint {
                minter,
                recipient,
                amount,
            } => write!(f, "mint {} -> {} (by {})", amount, recipient, minter),
            EventKind::Burn { holder, amount } => write!(f, "burn {} from {}", amount, holder),
            EventKind::Transfer {
                sender,
                recipient,
                amount,
                memo,
            } => {
                write!(f, "transfer {} {} -> {}", amount, sender, recipient)?;
                if let Some(memo) = memo {
                    write!(f, " memo={:?}", memo)?;
                }
                Ok(())
            }
            EventKind::Approval {
                owner,
                spender,
                amount,
            } => write!(f, "approve {} may spend {} of {}", spender, amount, owner),
            EventKind::TransferFrom {
                spender,
                owner,
                recipient,
                amount,
            } => write!(
                f,
                "transfer-from {} {} -> {} (by {})",
                amount, owner, recipient, spender
            ),
            EventKind::PauseChanged { paused } => {
                f.write_str(if *paused { "paused" } else { "unpaused" })
            }
            EventKind::MinterAdded { minter } => write!(f, "minter added {}", minter),
            EventKind::MinterRemoved { minter } => write!(f, "minter removed {}", minter),
        }
    }
}
