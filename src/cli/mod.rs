//! Command-line host for the token ledger

pub mod commands;

pub use commands::{
    cmd_call, cmd_export, cmd_history, cmd_import, cmd_info, cmd_init, cmd_restore, cmd_status,
    load_metadata, or_caller, resolve_caller, AppState, CliResult,
};
