//! CLI commands for the token ledger
//!
//! The CLI acts as the hosting environment: it names the caller, runs one
//! call against the stored ledger and writes the ledger back only if the call
//! succeeded.

use crate::storage::{Storage, StorageConfig};
use crate::token::{Call, Principal, Response, TokenLedger, TokenMetadata};
use std::fs;
use std::path::{Path, PathBuf};

/// Result type for CLI operations
pub type CliResult<T> = Result<T, Box<dyn std::error::Error>>;

/// Application state
pub struct AppState {
    pub ledger: TokenLedger,
    pub storage: Storage,
    pub data_dir: PathBuf,
}

impl AppState {
    /// Load the deployed ledger from `data_dir`
    pub fn load(data_dir: PathBuf) -> CliResult<Self> {
        let storage = Storage::new(storage_config(&data_dir))?;

        if !storage.exists() {
            return Err(format!(
                "no token deployed in {:?}; run `btcv3 init --owner <principal>` first",
                data_dir
            )
            .into());
        }

        let ledger = storage.load()?;

        Ok(Self {
            ledger,
            storage,
            data_dir,
        })
    }

    /// Save the current state
    pub fn save(&self) -> CliResult<()> {
        self.storage.save(&self.ledger)?;
        Ok(())
    }
}

fn storage_config(data_dir: &Path) -> StorageConfig {
    StorageConfig {
        data_dir: data_dir.to_path_buf(),
        ..Default::default()
    }
}

/// Pick the identity a call runs as
///
/// Queries default to the owner since anyone may read. Mutations need an
/// explicit caller.
pub fn resolve_caller(
    explicit: Option<&Principal>,
    call: &Call,
    owner: &Principal,
) -> CliResult<Principal> {
    match explicit {
        Some(caller) => Ok(caller.clone()),
        None if !call.is_mutating() => Ok(owner.clone()),
        None => Err(format!("--caller is required for {}", call.name()).into()),
    }
}

/// Fill a holder or sender argument from `--caller` when it was left out
pub fn or_caller(
    explicit: Option<Principal>,
    caller: Option<&Principal>,
    flag: &str,
) -> CliResult<Principal> {
    explicit
        .or_else(|| caller.cloned())
        .ok_or_else(|| format!("--{} or --caller is required", flag).into())
}

/// Read deployment metadata from a JSON file
pub fn load_metadata(path: &Path) -> CliResult<TokenMetadata> {
    let data = fs::read_to_string(path)?;
    let metadata: TokenMetadata = serde_json::from_str(&data)?;
    metadata.validate()?;
    Ok(metadata)
}

/// Deploy a new token
pub fn cmd_init(
    data_dir: &Path,
    owner: Principal,
    metadata: Option<&Path>,
    force: bool,
) -> CliResult<()> {
    let storage = Storage::new(storage_config(data_dir))?;

    if storage.exists() && !force {
        println!("⚠️  A token is already deployed at {:?}", data_dir);
        println!("   Use --force to redeploy (this will discard the existing ledger)");
        return Ok(());
    }

    let metadata = match metadata {
        Some(path) => load_metadata(path)?,
        None => TokenMetadata::default(),
    };

    let ledger = TokenLedger::deploy(metadata, owner);
    storage.save(&ledger)?;

    println!("✅ Token deployed!");
    println!("   📁 Data directory: {:?}", data_dir);
    println!(
        "   🪙 {} ({}), {} decimals",
        ledger.get_name(),
        ledger.get_symbol(),
        ledger.get_decimals()
    );
    println!("   👑 Owner: {}", ledger.get_owner());
    println!("   📈 Max supply: {}", ledger.get_max_supply());

    Ok(())
}

/// Run one call as `caller`, committing only on success
pub fn cmd_call(state: &mut AppState, caller: &Principal, call: Call) -> CliResult<Response> {
    let mutating = call.is_mutating();
    let name = call.name();

    let response = state.ledger.execute(caller, call);

    if mutating {
        match &response.0 {
            Ok(_) => state.save()?,
            Err(err) => log::warn!("{} by {} failed: {}", name, caller, err),
        }
    }

    println!("{}", response);
    Ok(response)
}

/// Display token metadata
pub fn cmd_info(state: &AppState) -> CliResult<()> {
    let ledger = &state.ledger;
    let metadata = ledger.metadata();

    println!("🪙 Token Info");
    println!("   ├─ Name: {}", metadata.name);
    println!("   ├─ Symbol: {}", metadata.symbol);
    println!("   ├─ Decimals: {}", metadata.decimals);
    println!(
        "   ├─ Max supply: {} ({} {})",
        metadata.max_supply,
        metadata.format_amount(metadata.max_supply),
        metadata.symbol
    );
    println!(
        "   ├─ Token URI: {}",
        metadata.token_uri.as_deref().unwrap_or("-")
    );
    println!("   └─ Owner: {}", ledger.get_owner());

    Ok(())
}

/// Display supply, holders, minters and the state fingerprint
pub fn cmd_status(state: &AppState) -> CliResult<()> {
    let ledger = &state.ledger;
    let metadata = ledger.metadata();
    let audit = ledger.audit();

    println!("📊 Ledger Status");
    println!(
        "   ├─ Total supply: {} ({} {})",
        audit.total_supply,
        metadata.format_amount(audit.total_supply),
        metadata.symbol
    );
    println!("   ├─ Remaining mintable: {}", ledger.circulation().remaining_supply());
    println!("   ├─ Paused: {}", audit.paused);
    println!("   ├─ Holders: {}", audit.holder_count);
    println!("   ├─ Authorized minters: {}", audit.minter_count);
    println!(
        "   ├─ Accounting: {}",
        if audit.is_consistent() { "consistent" } else { "INCONSISTENT" }
    );
    println!("   └─ State hash: {}", ledger.state_hash());

    let holders = ledger.balances().holders();
    if !holders.is_empty() {
        println!("\n   Holders:");
        for (holder, balance) in holders.iter().take(20) {
            println!("   └─ {} = {}", holder, balance);
        }
        if holders.len() > 20 {
            println!("   ... and {} more", holders.len() - 20);
        }
    }

    let minters: Vec<_> = ledger.authority().minters().collect();
    if !minters.is_empty() {
        println!("\n   Minters:");
        for minter in minters {
            println!("   └─ {}", minter);
        }
    }

    let stats = state.storage.stats()?;
    println!(
        "\n   💾 {} bytes on disk, {} backup(s)",
        stats.file_size, stats.backup_count
    );

    Ok(())
}

/// List recent events
pub fn cmd_history(state: &AppState, count: usize) -> CliResult<()> {
    let events: Vec<_> = state.ledger.history().collect();

    if events.is_empty() {
        println!("📭 No events recorded yet");
        return Ok(());
    }

    println!("📜 Recent events:");
    let skip = events.len().saturating_sub(count);
    for event in events.iter().skip(skip).rev() {
        println!(
            "   {} | {}",
            event.timestamp.format("%Y-%m-%d %H:%M:%S"),
            event.kind
        );
    }

    Ok(())
}

/// Export ledger to file
pub fn cmd_export(state: &AppState, path: &Path) -> CliResult<()> {
    crate::storage::save_to_file(&state.ledger, path)?;
    println!("📦 Ledger exported to {:?}", path);
    Ok(())
}

/// Import ledger from file
pub fn cmd_import(data_dir: &Path, path: &Path, force: bool) -> CliResult<()> {
    let ledger = crate::storage::load_from_file(path)?;
    let storage = Storage::new(storage_config(data_dir))?;

    if storage.exists() && !force {
        println!("⚠️  A token is already deployed at {:?}", data_dir);
        println!("   Use --force to replace it (the current ledger is kept as a backup)");
        return Ok(());
    }

    storage.save(&ledger)?;

    println!("📥 Ledger imported from {:?}", path);
    println!("   Total supply: {}", ledger.get_total_supply());
    println!("   State hash: {}", ledger.state_hash());

    Ok(())
}

/// Replace the current ledger with one of its backups
pub fn cmd_restore(state: &mut AppState, index: usize) -> CliResult<()> {
    let available = state.storage.list_backups();
    if available.is_empty() {
        return Err(format!("no backups in {:?}", state.data_dir).into());
    }

    state.ledger = state.storage.restore_backup(index)?;
    state.save()?;

    println!("♻️  Ledger restored from backup {}", index);
    println!("   Total supply: {}", state.ledger.get_total_supply());
    println!("   State hash: {}", state.ledger.state_hash());

    Ok(())
}
