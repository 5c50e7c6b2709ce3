use crate::error::AddressBookError;
use dex_domain::address::{self, Address};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{debug, info};

/// Key under which deployment tooling records the pool contract.
pub const POOL_KEY: &str = "dex";
/// Key of the first pool token.
pub const TOKEN_A_KEY: &str = "weth";
/// Key of the second pool token.
pub const TOKEN_B_KEY: &str = "tokenB";

/// Contract addresses written by deployment tooling.
///
/// The on-disk form is a flat JSON object such as
/// `{"dex": "0x..", "weth": "0x..", "tokenB": "0x.."}`. Entries are kept as
/// strings and only parsed when accessed, so unrelated malformed entries do
/// not prevent loading.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AddressBook {
    entries: BTreeMap<String, String>,
}

impl AddressBook {
    /// Creates an empty record.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a record from its JSON text.
    ///
    /// # Errors
    /// Returns an error if the text is not a JSON object of strings.
    pub fn from_json(json: &str) -> Result<Self, AddressBookError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads a record from `path`.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or is not valid JSON.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self, AddressBookError> {
        let path = path.as_ref();
        let json = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| AddressBookError::Io {
                path: path.to_path_buf(),
                source,
            })?;
        let book = Self::from_json(&json)?;
        debug!(path = %path.display(), entries = book.len(), "Loaded address record");
        Ok(book)
    }

    /// Writes the record to `path` as pretty JSON.
    ///
    /// # Errors
    /// Returns an error if the file cannot be written.
    pub async fn save(&self, path: impl AsRef<Path>) -> Result<(), AddressBookError> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self)?;
        tokio::fs::write(path, json)
            .await
            .map_err(|source| AddressBookError::Io {
                path: path.to_path_buf(),
                source,
            })?;
        info!(path = %path.display(), entries = self.len(), "Saved address record");
        Ok(())
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Records `address` under `key`, replacing any previous entry.
    pub fn insert(&mut self, key: impl Into<String>, address: Address) {
        self.entries.insert(key.into(), address.to_string());
    }

    /// The address stored under `key`.
    ///
    /// # Errors
    /// Returns an error if the key is absent or its value is not an address.
    pub fn get(&self, key: &str) -> Result<Address, AddressBookError> {
        let raw = self
            .entries
            .get(key)
            .ok_or_else(|| AddressBookError::MissingKey(key.to_string()))?;
        address::parse(raw).map_err(|source| AddressBookError::InvalidAddress {
            key: key.to_string(),
            source,
        })
    }

    /// The pool contract address.
    ///
    /// # Errors
    /// See [`AddressBook::get`].
    pub fn pool(&self) -> Result<Address, AddressBookError> {
        self.get(POOL_KEY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    const DEPLOYED: &str = r#"{
        "weth": "0x5FbDB2315678afecb367f032d93F642f64180aa3",
        "tokenB": "0xe7f1725E7734CE288F8367e1Bb143E90bb3F0512",
        "dex": "0x9fE46736679d2D9a65F0992F2272dE9f3c7fa6e0"
    }"#;

    #[test]
    fn test_keys_in_any_order() {
        let book = AddressBook::from_json(DEPLOYED).unwrap();
        assert_eq!(book.len(), 3);
        assert_eq!(
            book.pool().unwrap().to_string(),
            "0x9fE46736679d2D9a65F0992F2272dE9f3c7fa6e0"
        );
        assert!(book.get(TOKEN_A_KEY).is_ok());
        assert!(book.get(TOKEN_B_KEY).is_ok());
    }

    #[test]
    fn test_missing_key() {
        let book = AddressBook::from_json(r#"{"weth": "0x5FbDB2315678afecb367f032d93F642f64180aa3"}"#)
            .unwrap();
        assert!(matches!(book.pool(), Err(AddressBookError::MissingKey(k)) if k == "dex"));
    }

    #[test]
    fn test_malformed_entry_fails_on_access_only() {
        let book = AddressBook::from_json(
            r#"{"dex": "0x1234", "weth": "0x5FbDB2315678afecb367f032d93F642f64180aa3"}"#,
        )
        .unwrap();
        assert!(book.get(TOKEN_A_KEY).is_ok());
        assert!(matches!(
            book.pool(),
            Err(AddressBookError::InvalidAddress { .. })
        ));
    }

    #[test]
    fn test_rejects_non_object() {
        assert!(matches!(
            AddressBook::from_json("[1, 2]"),
            Err(AddressBookError::Json(_))
        ));
    }

    #[tokio::test]
    async fn test_save_then_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("deployed-addresses.json");

        let mut book = AddressBook::new();
        book.insert(POOL_KEY, address::from_index(0x1003));
        book.insert(TOKEN_A_KEY, address::from_index(0x1001));
        book.save(&path).await.unwrap();

        let loaded = AddressBook::load(&path).await.unwrap();
        assert_eq!(loaded, book);
        assert_eq!(loaded.pool().unwrap(), address::from_index(0x1003));
    }

    #[tokio::test]
    async fn test_load_missing_file() {
        let dir = tempdir().unwrap();
        let result = AddressBook::load(dir.path().join("absent.json")).await;
        assert!(matches!(result, Err(AddressBookError::Io { .. })));
    }
}
