//! Bootcamp Token CLI Application
//!
//! A command-line host for deploying and operating the token ledger.

use bootcamp_token::cli::{self, AppState};
use bootcamp_token::token::{Call, Principal};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "btcv3")]
#[command(author = "Darshan")]
#[command(version = "0.1.0")]
#[command(about = "A capped, pausable fungible-token ledger", long_about = None)]
struct Cli {
    /// Data directory for ledger storage
    #[arg(short, long, default_value = ".btcv3_data")]
    data_dir: PathBuf,

    /// Identity the call is made as
    #[arg(short, long, global = true)]
    caller: Option<Principal>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Deploy a new token
    Init {
        /// Contract owner (the deployer)
        #[arg(short, long)]
        owner: Principal,

        /// JSON file with name, symbol, decimals, max_supply and token_uri
        #[arg(short, long)]
        metadata: Option<PathBuf>,

        /// Discard any existing ledger
        #[arg(long)]
        force: bool,
    },

    /// Mint new tokens (owner or authorized minter)
    Mint {
        #[arg(short, long)]
        amount: u128,

        #[arg(short, long)]
        recipient: Principal,
    },

    /// Burn the caller's tokens
    Burn {
        #[arg(short, long)]
        amount: u128,

        /// Holder of the tokens (must be the caller)
        #[arg(long)]
        holder: Option<Principal>,
    },

    /// Transfer the caller's tokens
    Transfer {
        #[arg(short, long)]
        amount: u128,

        /// Sender (must be the caller)
        #[arg(short, long)]
        sender: Option<Principal>,

        #[arg(short, long)]
        recipient: Principal,

        /// Opaque memo recorded with the transfer
        #[arg(short, long)]
        memo: Option<String>,
    },

    /// Set a spender's allowance over the caller's tokens
    Approve {
        #[arg(short, long)]
        spender: Principal,

        #[arg(short, long)]
        amount: u128,
    },

    /// Spend an allowance granted by another holder
    TransferFrom {
        #[arg(short, long)]
        owner: Principal,

        #[arg(short, long)]
        recipient: Principal,

        #[arg(short, long)]
        amount: u128,
    },

    /// Pause all value-moving operations (owner only)
    Pause,

    /// Resume operations (owner only)
    Unpause,

    /// Grant minting rights (owner only)
    AddMinter {
        #[arg(short, long)]
        minter: Principal,
    },

    /// Revoke minting rights (owner only)
    RemoveMinter {
        #[arg(short, long)]
        minter: Principal,
    },

    /// Show an account balance
    Balance {
        #[arg(short, long)]
        account: Principal,
    },

    /// Show an allowance
    Allowance {
        #[arg(short, long)]
        owner: Principal,

        #[arg(short, long)]
        spender: Principal,
    },

    /// Show the total supply
    Supply,

    /// Show whether the token is paused
    Paused,

    /// Show whether an account may mint
    Minter {
        #[arg(short, long)]
        account: Principal,
    },

    /// Show token metadata
    Info,

    /// Show supply, holders, minters and the state hash
    Status,

    /// List recent events
    History {
        /// Number of events to show
        #[arg(short = 'n', long, default_value = "10")]
        count: usize,
    },

    /// Export the ledger to a file
    Export {
        /// Output file path
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Import a ledger from a file
    Import {
        /// Input file path
        #[arg(short, long)]
        input: PathBuf,

        /// Replace an existing ledger (it is kept as a backup)
        #[arg(long)]
        force: bool,
    },

    /// Restore the ledger from a backup (0 is the newest)
    Restore {
        #[arg(short, long, default_value = "0")]
        index: usize,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logger
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    // Commands that don't need a deployed ledger
    match &cli.command {
        Commands::Init {
            owner,
            metadata,
            force,
        } => {
            return cli::cmd_init(&cli.data_dir, owner.clone(), metadata.as_deref(), *force);
        }
        Commands::Import { input, force } => return cli::cmd_import(&cli.data_dir, input, *force),
        _ => {}
    }

    let mut state = AppState::load(cli.data_dir.clone())?;

    let call = match cli.command {
        Commands::Init { .. } | Commands::Import { .. } => unreachable!(),

        Commands::Info => return cli::cmd_info(&state),
        Commands::Status => return cli::cmd_status(&state),
        Commands::History { count } => return cli::cmd_history(&state, count),
        Commands::Export { output } => return cli::cmd_export(&state, &output),
        Commands::Restore { index } => return cli::cmd_restore(&mut state, index),

        Commands::Mint { amount, recipient } => Call::Mint { amount, recipient },
        Commands::Burn { amount, holder } => Call::Burn {
            amount,
            holder: cli::or_caller(holder, cli.caller.as_ref(), "holder")?,
        },
        Commands::Transfer {
            amount,
            sender,
            recipient,
            memo,
        } => Call::Transfer {
            amount,
            sender: cli::or_caller(sender, cli.caller.as_ref(), "sender")?,
            recipient,
            memo,
        },
        Commands::Approve { spender, amount } => Call::Approve { spender, amount },
        Commands::TransferFrom {
            owner,
            recipient,
            amount,
        } => Call::TransferFrom {
            owner,
            recipient,
            amount,
        },
        Commands::Pause => Call::PauseContract,
        Commands::Unpause => Call::UnpauseContract,
        Commands::AddMinter { minter } => Call::AddAuthorizedMinter { minter },
        Commands::RemoveMinter { minter } => Call::RemoveAuthorizedMinter { minter },
        Commands::Balance { account } => Call::GetBalance { account },
        Commands::Allowance { owner, spender } => Call::GetAllowance { owner, spender },
        Commands::Supply => Call::GetTotalSupply,
        Commands::Paused => Call::IsPaused,
        Commands::Minter { account } => Call::IsAuthorizedMinter { account },
    };

    let caller = cli::resolve_caller(cli.caller.as_ref(), &call, state.ledger.get_owner())?;

    let response = cli::cmd_call(&mut state, &caller, call)?;
    if !response.is_ok() {
        std::process::exit(1);
    }

    Ok(())
}
