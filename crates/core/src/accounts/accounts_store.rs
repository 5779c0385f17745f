//! Built-in account stores: an in-memory map and a JSON-file directory.

use std::fs::{create_dir_all, File};
use std::io::{BufReader, BufWriter};
use std::path::PathBuf;

use dashmap::DashMap;
use log::debug;

use super::accounts_model::AccountState;
use super::accounts_traits::AccountStoreTrait;
use crate::errors::{Error, Result};

/// Keyed in-memory store; the default for tests and for hosts that persist
/// elsewhere.
#[derive(Default)]
pub struct MemoryAccountStore {
    accounts: DashMap<String, AccountState>,
}

impl MemoryAccountStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl AccountStoreTrait for MemoryAccountStore {
    fn load(&self, user_id: &str) -> Result<Option<AccountState>> {
        Ok(self.accounts.get(user_id).map(|entry| entry.value().clone()))
    }

    fn save(&self, account: &AccountState) -> Result<()> {
        self.accounts
            .insert(account.user_id.clone(), account.clone());
        Ok(())
    }
}

/// File-backed store writing one JSON document per account under a root
/// directory.
pub struct JsonFileAccountStore {
    root: PathBuf,
}

impl JsonFileAccountStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn account_path(&self, user_id: &str) -> Result<PathBuf> {
        // User ids become file names; anything path-like is refused.
        if user_id.is_empty() || user_id.contains(['/', '\\']) || user_id.contains("..") {
            return Err(Error::Store(format!("invalid user id '{}'", user_id)));
        }
        Ok(self.root.join(format!("{}.json", user_id)))
    }
}

impl AccountStoreTrait for JsonFileAccountStore {
    fn load(&self, user_id: &str) -> Result<Option<AccountState>> {
        let path = self.account_path(user_id)?;
        if !path.exists() {
            return Ok(None);
        }
        let file = File::open(&path)
            .map_err(|e| Error::Store(format!("failed to open {}: {}", path.display(), e)))?;
        let account = serde_json::from_reader(BufReader::new(file))
            .map_err(|e| Error::Store(format!("failed to decode {}: {}", path.display(), e)))?;
        Ok(Some(account))
    }

    fn save(&self, account: &AccountState) -> Result<()> {
        let path = self.account_path(&account.user_id)?;
        create_dir_all(&self.root)
            .map_err(|e| Error::Store(format!("failed to create {}: {}", self.root.display(), e)))?;
        let file = File::create(&path)
            .map_err(|e| Error::Store(format!("failed to create {}: {}", path.display(), e)))?;
        serde_json::to_writer_pretty(BufWriter::new(file), account)
            .map_err(|e| Error::Store(format!("failed to encode {}: {}", path.display(), e)))?;
        debug!("Saved account '{}' to {}", account.user_id, path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn account() -> AccountState {
        let mut account = AccountState::new("demo");
        account.available_cash = dec!(81000);
        account.asset_transfers = dec!(100000);
        account
    }

    #[test]
    fn test_memory_store_round_trip() {
        let store = MemoryAccountStore::new();
        assert!(store.load("demo").unwrap().is_none());

        store.save(&account()).unwrap();
        let loaded = store.load("demo").unwrap().unwrap();
        assert_eq!(loaded, account());
    }

    #[test]
    fn test_json_file_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileAccountStore::new(dir.path());

        assert!(store.load("demo").unwrap().is_none());
        store.save(&account()).unwrap();

        assert!(dir.path().join("demo.json").exists());
        let loaded = store.load("demo").unwrap().unwrap();
        assert_eq!(loaded, account());
    }

    #[test]
    fn test_json_file_store_rejects_path_like_ids() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileAccountStore::new(dir.path());

        for bad in ["", "../escape", "a/b", "a\\b"] {
            let mut account = account();
            account.user_id = bad.to_string();
            assert!(store.save(&account).is_err());
        }
    }
}
