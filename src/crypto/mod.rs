//! Hashing utilities
//!
//! Used to fingerprint ledger state.

pub mod hash;

pub use hash::{sha256, sha256_hex};
