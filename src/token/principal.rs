//! Account identities

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Principal parsing errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PrincipalError {
    #[error("Invalid principal: must not be empty")]
    Empty,
    #[error("Invalid principal: must not contain whitespace: {0:?}")]
    Whitespace(String),
}

/// An opaque account or contract identity
///
/// Only equality and ordering are meaningful; the ledger never looks inside.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Principal(String);

impl Principal {
    /// Wrap an identity string without validation
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Principal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Principal {
    type Err = PrincipalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(PrincipalError::Empty);
        }
        if s.chars().any(char::is_whitespace) {
            return Err(PrincipalError::Whitespace(s.to_string()));
        }
        Ok(Self(s.to_string()))
    }
}

impl From<&str> for Principal {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}
