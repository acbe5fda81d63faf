//! Dispatch of named calls against a ledger
//!
//! Hosts that receive calls as data (a CLI, an RPC layer) build a [`Call`]
//! and hand it to [`TokenLedger::execute`] together with the caller identity.
//! Results come back as a [`Response`], which renders in the usual
//! `(ok ...)` / `(err uNNN)` notation.

use crate::token::error::{LedgerError, LedgerResult};
use crate::token::ledger::TokenLedger;
use crate::token::principal::Principal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Every public operation and query of the ledger
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Call {
    Mint {
        amount: u128,
        recipient: Principal,
    },
    Burn {
        amount: u128,
        holder: Principal,
    },
    Transfer {
        amount: u128,
        sender: Principal,
        recipient: Principal,
        memo: Option<String>,
    },
    Approve {
        spender: Principal,
        amount: u128,
    },
    TransferFrom {
        owner: Principal,
        recipient: Principal,
        amount: u128,
    },
    PauseContract,
    UnpauseContract,
    AddAuthorizedMinter {
        minter: Principal,
    },
    RemoveAuthorizedMinter {
        minter: Principal,
    },
    GetName,
    GetSymbol,
    GetDecimals,
    GetMaxSupply,
    GetTokenUri,
    GetBalance {
        account: Principal,
    },
    GetAllowance {
        owner: Principal,
        spender: Principal,
    },
    GetTotalSupply,
    IsPaused,
    IsAuthorizedMinter {
        account: Principal,
    },
}

impl Call {
    /// Call name as exposed to hosts
    pub fn name(&self) -> &'static str {
        match self {
            Call::Mint { .. } => "mint",
            Call::Burn { .. } => "burn",
            Call::Transfer { .. } => "transfer",
            Call::Approve { .. } => "approve",
            Call::TransferFrom { .. } => "transfer-from",
            Call::PauseContract => "pause-contract",
            Call::UnpauseContract => "unpause-contract",
            Call::AddAuthorizedMinter { .. } => "add-authorized-minter",
            Call::RemoveAuthorizedMinter { .. } => "remove-authorized-minter",
            Call::GetName => "get-name",
            Call::GetSymbol => "get-symbol",
            Call::GetDecimals => "get-decimals",
            Call::GetMaxSupply => "get-max-supply",
            Call::GetTokenUri => "get-token-uri",
            Call::GetBalance { .. } => "get-balance",
            Call::GetAllowance { .. } => "get-allowance",
            Call::GetTotalSupply => "get-total-supply",
            Call::IsPaused => "is-paused",
            Call::IsAuthorizedMinter { .. } => "is-authorized-minter",
        }
    }

    /// Whether the call can change ledger state
    pub fn is_mutating(&self) -> bool {
        matches!(
            self,
            Call::Mint { .. }
                | Call::Burn { .. }
                | Call::Transfer { .. }
                | Call::Approve { .. }
                | Call::TransferFrom { .. }
                | Call::PauseContract
                | Call::UnpauseContract
                | Call::AddAuthorizedMinter { .. }
                | Call::RemoveAuthorizedMinter { .. }
        )
    }
}

/// Success payload of a call
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Value {
    Bool(bool),
    UInt(u128),
    Ascii(String),
    OptionalUtf8(Option<String>),
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Bool(b) => write!(f, "{}", b),
            Value::UInt(n) => write!(f, "u{}", n),
            Value::Ascii(s) => write!(f, "{:?}", s),
            Value::OptionalUtf8(Some(s)) => write!(f, "(some u{:?})", s),
            Value::OptionalUtf8(None) => f.write_str("none"),
        }
    }
}

/// Tagged outcome of a call
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Response(pub LedgerResult<Value>);

impl Response {
    pub fn is_ok(&self) -> bool {
        self.0.is_ok()
    }

    /// Numeric error code, if the call failed
    pub fn error_code(&self) -> Option<u32> {
        self.0.as_ref().err().map(LedgerError::code)
    }
}

impl From<LedgerResult<Value>> for Response {
    fn from(result: LedgerResult<Value>) -> Self {
        Self(result)
    }
}

impl fmt::Display for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            Ok(value) => write!(f, "(ok {})", value),
            Err(err) => write!(f, "(err u{})", err.code()),
        }
    }
}

impl TokenLedger {
    /// Execute `call` on behalf of `caller`
    ///
    /// Mutations answer `true` on success; queries answer their value.
    pub fn execute(&mut self, caller: &Principal, call: Call) -> Response {
        let done = |r: LedgerResult<_>| r.map(|_| Value::Bool(true));

        let result = match call {
            Call::Mint { amount, recipient } => done(self.mint(caller, amount, &recipient)),
            Call::Burn { amount, holder } => done(self.burn(caller, amount, &holder)),
            Call::Transfer {
                amount,
                sender,
                recipient,
                memo,
            } => done(self.transfer(caller, amount, &sender, &recipient, memo)),
            Call::Approve { spender, amount } => done(self.approve(caller, &spender, amount)),
            Call::TransferFrom {
                owner,
                recipient,
                amount,
            } => done(self.transfer_from(caller, &owner, &recipient, amount)),
            Call::PauseContract => done(self.pause_contract(caller)),
            Call::UnpauseContract => done(self.unpause_contract(caller)),
            Call::AddAuthorizedMinter { minter } => {
                done(self.add_authorized_minter(caller, &minter))
            }
            Call::RemoveAuthorizedMinter { minter } => {
                done(self.remove_authorized_minter(caller, &minter))
            }
            Call::GetName => Ok(Value::Ascii(self.get_name().to_string())),
            Call::GetSymbol => Ok(Value::Ascii(self.get_symbol().to_string())),
            Call::GetDecimals => Ok(Value::UInt(u128::from(self.get_decimals()))),
            Call::GetMaxSupply => Ok(Value::UInt(self.get_max_supply())),
            Call::GetTokenUri => Ok(Value::OptionalUtf8(
                self.get_token_uri().map(str::to_string),
            )),
            Call::GetBalance { account } => Ok(Value::UInt(self.get_balance(&account))),
            Call::GetAllowance { owner, spender } => {
                Ok(Value::UInt(self.get_allowance(&owner, &spender)))
            }
            Call::GetTotalSupply => Ok(Value::UInt(self.get_total_supply())),
            Call::IsPaused => Ok(Value::Bool(self.is_paused())),
            Call::IsAuthorizedMinter { account } => {
                Ok(Value::Bool(self.is_authorized_minter(&account)))
            }
        };

        Response(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::TokenMetadata;

    fn p(s: &str) -> Principal {
        Principal::from(s)
    }

    fn ledger() -> TokenLedger {
        TokenLedger::deploy(TokenMetadata::default(), p("deployer"))
    }

    #[test]
    fn test_metadata_responses() {
        let mut ledger = ledger();
        let caller = p("deployer");

        assert_eq!(
            ledger.execute(&caller, Call::GetName).to_string(),
            "(ok \"Bootcamp Token V3\")"
        );
        assert_eq!(
            ledger.execute(&caller, Call::GetSymbol).to_string(),
            "(ok \"BTCV3\")"
        );
        assert_eq!(
            ledger.execute(&caller, Call::GetDecimals).to_string(),
            "(ok u6)"
        );
        assert_eq!(
            ledger.execute(&caller, Call::GetMaxSupply).to_string(),
            "(ok u1000000000000)"
        );
        assert_eq!(
            ledger.execute(&caller, Call::GetTokenUri).to_string(),
            "(ok (some u\"https://stacksbootcamp.dev/btcv3.json\"))"
        );
        assert_eq!(
            ledger.execute(&caller, Call::IsPaused).to_string(),
            "(ok false)"
        );
    }

    #[test]
    fn test_mutation_responses() {
        let mut ledger = ledger();

        let ok = ledger.execute(
            &p("deployer"),
            Call::Mint {
                amount: 1000,
                recipient: p("wallet_1"),
            },
        );
        assert_eq!(ok, Response(Ok(Value::Bool(true))));
        assert_eq!(ok.to_string(), "(ok true)");

        let err = ledger.execute(
            &p("wallet_1"),
            Call::Mint {
                amount: 1000,
                recipient: p("wallet_1"),
            },
        );
        assert_eq!(err.error_code(), Some(106));
        assert_eq!(err.to_string(), "(err u106)");

        let balance = ledger.execute(
            &p("deployer"),
            Call::GetBalance {
                account: p("wallet_1"),
            },
        );
        assert_eq!(balance.to_string(), "(ok u1000)");
    }

    #[test]
    fn test_allowance_flow_through_calls() {
        let mut ledger = ledger();
        ledger.execute(
            &p("deployer"),
            Call::Mint {
                amount: 1000,
                recipient: p("wallet_1"),
            },
        );
        assert!(ledger
            .execute(
                &p("wallet_1"),
                Call::Approve {
                    spender: p("wallet_2"),
                    amount: 500,
                },
            )
            .is_ok());
        assert!(ledger
            .execute(
                &p("wallet_2"),
                Call::TransferFrom {
                    owner: p("wallet_1"),
                    recipient: p("wallet_3"),
                    amount: 300,
                },
            )
            .is_ok());

        let allowance = ledger.execute(
            &p("deployer"),
            Call::GetAllowance {
                owner: p("wallet_1"),
                spender: p("wallet_2"),
            },
        );
        assert_eq!(allowance.0, Ok(Value::UInt(200)));
    }

    #[test]
    fn test_queries_do_not_mutate() {
        let mut ledger = ledger();
        let before = ledger.state_hash();
        for call in [
            Call::GetName,
            Call::GetTotalSupply,
            Call::IsAuthorizedMinter {
                account: p("deployer"),
            },
        ] {
            assert!(!call.is_mutating());
            assert!(ledger.execute(&p("anyone"), call).is_ok());
        }
        assert_eq!(ledger.state_hash(), before);
        assert_eq!(ledger.history().count(), 0);
    }

    #[test]
    fn test_call_names() {
        assert_eq!(Call::PauseContract.name(), "pause-contract");
        assert_eq!(
            Call::TransferFrom {
                owner: p("a"),
                recipient: p("b"),
                amount: 1
            }
            .name(),
            "transfer-from"
        );
        assert!(Call::UnpauseContract.is_mutating());
    }
}
