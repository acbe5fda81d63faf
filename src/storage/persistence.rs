//! Ledger persistence layer
//!
//! Provides save/load functionality for the token ledger. A save writes a
//! temporary file and renames it over the state file, so the file on disk is
//! always either the previous state or the new one.

use crate::token::TokenLedger;
use std::fs;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Storage errors
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("IO error: {0}")]
    IoError(#[from] io::Error),
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
    #[error("Invalid data: {0}")]
    InvalidData(String),
}

/// Storage configuration
#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub data_dir: PathBuf,
    pub state_file: String,
    pub backup_enabled: bool,
    pub max_backups: usize,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(".btcv3_data"),
            state_file: "ledger.json".to_string(),
            backup_enabled: true,
            max_backups: 5,
        }
    }
}

/// Ledger storage manager
pub struct Storage {
    config: StorageConfig,
}

impl Storage {
    /// Create a new storage manager
    pub fn new(config: StorageConfig) -> Result<Self, StorageError> {
        fs::create_dir_all(&config.data_dir)?;
        Ok(Self { config })
    }

    /// Get the state file path
    fn state_path(&self) -> PathBuf {
        self.config.data_dir.join(&self.config.state_file)
    }

    /// Get a backup file path
    fn backup_path(&self, index: usize) -> PathBuf {
        self.config
            .data_dir
            .join(format!("{}.backup.{}", self.config.state_file, index))
    }

    /// Save the ledger to disk
    pub fn save(&self, ledger: &TokenLedger) -> Result<(), StorageError> {
        let path = self.state_path();

        if self.config.backup_enabled && self.config.max_backups > 0 && path.exists() {
            self.rotate_backups()?;
            fs::copy(&path, self.backup_path(0))?;
        }

        // Write to temporary file first
        let temp_path = self
            .config
            .data_dir
            .join(format!("{}.tmp", self.config.state_file));
        write_json(ledger, &temp_path)?;

        // Atomic rename
        fs::rename(&temp_path, &path)?;

        log::debug!("Ledger saved to {:?}", path);
        Ok(())
    }

    /// Load the ledger from disk
    pub fn load(&self) -> Result<TokenLedger, StorageError> {
        let path = self.state_path();

        if !path.exists() {
            return Err(StorageError::InvalidData(
                "Ledger state file not found".to_string(),
            ));
        }

        load_from_file(&path)
    }

    /// Check if a saved ledger exists
    pub fn exists(&self) -> bool {
        self.state_path().exists()
    }

    /// Delete the saved ledger
    pub fn delete(&self) -> Result<(), StorageError> {
        let path = self.state_path();
        if path.exists() {
            fs::remove_file(path)?;
        }
        Ok(())
    }

    /// Rotate backup files
    fn rotate_backups(&self) -> Result<(), StorageError> {
        // Delete oldest backup
        let oldest = self.backup_path(self.config.max_backups - 1);
        if oldest.exists() {
            fs::remove_file(&oldest)?;
        }

        // Shift existing backups
        for i in (0..self.config.max_backups - 1).rev() {
            let current = self.backup_path(i);
            if current.exists() {
                fs::rename(&current, self.backup_path(i + 1))?;
            }
        }

        Ok(())
    }

    /// Restore from a backup; the current state file is left untouched
    pub fn restore_backup(&self, backup_index: usize) -> Result<TokenLedger, StorageError> {
        let backup_path = self.backup_path(backup_index);

        if !backup_path.exists() {
            return Err(StorageError::InvalidData(format!(
                "Backup {} not found",
                backup_index
            )));
        }

        log::warn!("Restoring ledger from backup {}", backup_index);
        load_from_file(&backup_path)
    }

    /// List available backups
    pub fn list_backups(&self) -> Vec<usize> {
        (0..self.config.max_backups)
            .filter(|&i| self.backup_path(i).exists())
            .collect()
    }

    /// Get storage statistics
    pub fn stats(&self) -> Result<StorageStats, StorageError> {
        let path = self.state_path();

        let file_size = if path.exists() {
            fs::metadata(&path)?.len()
        } else {
            0
        };

        Ok(StorageStats {
            file_size,
            backup_count: self.list_backups().len(),
            data_dir: self.config.data_dir.clone(),
        })
    }
}

/// Storage statistics
#[derive(Debug)]
pub struct StorageStats {
    pub file_size: u64,
    pub backup_count: usize,
    pub data_dir: PathBuf,
}

/// Save ledger to a specific file path
pub fn save_to_file(ledger: &TokenLedger, path: &Path) -> Result<(), StorageError> {
    write_json(ledger, path)
}

/// Write pretty JSON and make sure every byte reached the disk
fn write_json(ledger: &TokenLedger, path: &Path) -> Result<(), StorageError> {
    let file = fs::File::create(path)?;
    let mut writer = BufWriter::new(file);

    serde_json::to_writer_pretty(&mut writer, ledger)?;
    writer.flush()?;

    let file = writer.into_inner().map_err(|e| e.into_error())?;
    file.sync_all()?;
    Ok(())
}

/// Load ledger from a specific file path, refusing inconsistent state
pub fn load_from_file(path: &Path) -> Result<TokenLedger, StorageError> {
    let file = fs::File::open(path)?;
    let reader = BufReader::new(file);
    let ledger: TokenLedger = serde_json::from_reader(reader)?;

    ledger
        .metadata()
        .validate()
        .map_err(|e| StorageError::InvalidData(e.to_string()))?;
    if ledger.metadata().max_supply != ledger.get_max_supply() {
        return Err(StorageError::InvalidData(
            "metadata max supply does not match circulation state".to_string(),
        ));
    }

    let audit = ledger.audit();
    if !audit.normalized {
        return Err(StorageError::InvalidData(
            "ledger holds zero entries or lists the owner as a minter".to_string(),
        ));
    }
    if !audit.is_consistent() {
        return Err(StorageError::InvalidData(format!(
            "ledger accounting is inconsistent: total supply {}, balances sum {:?}, max supply {}",
            audit.total_supply, audit.circulating, audit.max_supply
        )));
    }

    Ok(ledger)
}
