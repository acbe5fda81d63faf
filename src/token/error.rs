//! Ledger error taxonomy
//!
//! Every failure carries a stable numeric code so hosts can tell causes apart
//! without parsing messages.

use thiserror::Error;

/// Result type for ledger operations
pub type LedgerResult<T> = Result<T, LedgerError>;

/// Ledger errors
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LedgerError {
    #[error("Owner only: caller is not the contract owner")]
    OwnerOnly,
    #[error("Not token owner: caller does not hold the tokens being moved")]
    NotTokenOwner,
    #[error("Insufficient balance")]
    InsufficientBalance,
    #[error("Contract paused")]
    ContractPaused,
    #[error("Exceeds max supply")]
    ExceedsMaxSupply,
    #[error("Invalid amount: amount must be greater than 0")]
    InvalidAmount,
    #[error("Unauthorized: caller is not an authorized minter")]
    Unauthorized,
    #[error("Insufficient allowance")]
    InsufficientAllowance,
}

impl LedgerError {
    /// All variants, in code order
    pub const ALL: [LedgerError; 8] = [
        LedgerError::OwnerOnly,
        LedgerError::NotTokenOwner,
        LedgerError::InsufficientBalance,
        LedgerError::ContractPaused,
        LedgerError::ExceedsMaxSupply,
        LedgerError::InvalidAmount,
        LedgerError::Unauthorized,
        LedgerError::InsufficientAllowance,
    ];

    /// Stable numeric error code
    pub fn code(&self) -> u32 {
        match self {
            LedgerError::OwnerOnly => 100,
            LedgerError::NotTokenOwner => 101,
            LedgerError::InsufficientBalance => 102,
            LedgerError::ContractPaused => 103,
            LedgerError::ExceedsMaxSupply => 104,
            LedgerError::InvalidAmount => 105,
            LedgerError::Unauthorized => 106,
            LedgerError::InsufficientAllowance => 107,
        }
    }

    /// Look up an error by its numeric code
    pub fn from_code(code: u32) -> Option<Self> {
        Self::ALL.iter().copied().find(|e| e.code() == code)
    }
}
