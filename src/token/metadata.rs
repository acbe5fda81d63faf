//! Static token metadata fixed at deployment

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_NAME: &str = "Bootcamp Token V3";
pub const DEFAULT_SYMBOL: &str = "BTCV3";
pub const DEFAULT_DECIMALS: u8 = 6;
/// One million whole tokens at six decimals
pub const DEFAULT_MAX_SUPPLY: u128 = 1_000_000_000_000;
pub const DEFAULT_TOKEN_URI: &str = "https://stacksbootcamp.dev/btcv3.json";

/// Metadata validation errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MetadataError {
    #[error("Invalid name: must be 1-50 ASCII characters")]
    InvalidName,
    #[error("Invalid symbol: must be 1-10 ASCII characters")]
    InvalidSymbol,
    #[error("Invalid decimals: must be 0-18")]
    InvalidDecimals,
    #[error("Invalid max supply: must be greater than 0")]
    InvalidMaxSupply,
}

/// Token metadata (immutable after deployment)
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct TokenMetadata {
    /// Token name (e.g., "Bootcamp Token V3")
    pub name: String,
    /// Token symbol (e.g., "BTCV3")
    pub symbol: String,
    /// Display decimals; arithmetic is always in smallest units
    pub decimals: u8,
    /// Hard supply ceiling in smallest units
    pub max_supply: u128,
    /// Off-chain metadata location
    pub token_uri: Option<String>,
}

impl Default for TokenMetadata {
    fn default() -> Self {
        Self {
            name: DEFAULT_NAME.to_string(),
            symbol: DEFAULT_SYMBOL.to_string(),
            decimals: DEFAULT_DECIMALS,
            max_supply: DEFAULT_MAX_SUPPLY,
            token_uri: Some(DEFAULT_TOKEN_URI.to_string()),
        }
    }
}

impl TokenMetadata {
    /// Create new token metadata with validation
    pub fn new(
        name: String,
        symbol: String,
        decimals: u8,
        max_supply: u128,
        token_uri: Option<String>,
    ) -> Result<Self, MetadataError> {
        let metadata = Self {
            name,
            symbol,
            decimals,
            max_supply,
            token_uri,
        };
        metadata.validate()?;
        Ok(metadata)
    }

    /// Check the metadata bounds
    pub fn validate(&self) -> Result<(), MetadataError> {
        if self.name.is_empty() || self.name.len() > 50 || !self.name.is_ascii() {
            return Err(MetadataError::InvalidName);
        }

        if self.symbol.is_empty() || self.symbol.len() > 10 || !self.symbol.is_ascii() {
            return Err(MetadataError::InvalidSymbol);
        }

        if self.decimals > 18 {
            return Err(MetadataError::InvalidDecimals);
        }

        if self.max_supply == 0 {
            return Err(MetadataError::InvalidMaxSupply);
        }

        Ok(())
    }

    /// Render a raw amount with the token's decimals, e.g. `1500000` -> `1.5`
    pub fn format_amount(&self, amount: u128) -> String {
        if self.decimals == 0 {
            return amount.to_string();
        }
        let scale = 10u128.pow(u32::from(self.decimals));
        let whole = amount / scale;
        let frac = amount % scale;
        if frac == 0 {
            return whole.to_string();
        }
        let frac = format!("{:0width$}", frac, width = usize::from(self.decimals));
        format!("{}.{}", whole, frac.trim_end_matches('0'))
    }
}
