//! Implements the `Store` trait with one file per key inside a storage directory.

use crate::backup::Backup;
use crate::store::Store;
use crate::{utils, Result};
use anyhow::Context;
use std::path::{Path, PathBuf};
use tracing::debug;

/// A `Store` that keeps each value in its own file, `{storage_dir}/{encoded key}.json`.
///
/// Writes go to a temporary file which is then renamed over the old one, so a failed write leaves
/// the previous value in place. When a `Backup` is attached, the previous value is copied into the
/// backups directory before it is replaced.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
    backup: Option<Backup>,
}

impl FileStore {
    /// Creates a store rooted at `dir`. The directory must already exist.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            backup: None,
        }
    }

    pub fn with_backup(mut self, backup: Backup) -> Self {
        self.backup = Some(backup);
        self
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// The file that holds the value for `key`.
    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", encode_key(key)))
    }
}

#[async_trait::async_trait]
impl Store for FileStore {
    async fn get_item(&self, key: &str) -> Result<Option<String>> {
        utils::read_optional(&self.path_for(key)).await
    }

    async fn set_item(&self, key: &str, value: &str) -> Result<()> {
        let path = self.path_for(key);

        if let Some(backup) = &self.backup {
            if let Some(previous) = utils::read_optional(&path).await? {
                let saved = backup
                    .save(&encode_key(key), &previous)
                    .await
                    .context("Unable to back up the previous value")?;
                debug!("Saved backup to {}", saved.display());
            }
        }

        let tmp = path.with_extension("json.tmp");
        utils::write(&tmp, value).await?;
        utils::rename(&tmp, &path).await
    }
}

/// Turns a key into a file name stem. ASCII letters, digits and `-` are kept; every other byte
/// is written as `_XX` hex so that distinct keys never share a file.
fn encode_key(key: &str) -> String {
    let mut out = String::with_capacity(key.len());
    for b in key.bytes() {
        if b.is_ascii_alphanumeric() || b == b'-' {
            out.push(b as char);
        } else {
            out.push_str(&format!("_{b:02X}"));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::TRANSACTIONS_KEY;
    use tempfile::TempDir;

    #[test]
    fn test_encode_key() {
        assert_eq!(
            encode_key(TRANSACTIONS_KEY),
            "_40gofinances_3Atransactions"
        );
        assert_eq!(encode_key("a_b"), "a_5Fb");
        assert_ne!(encode_key("a:b"), encode_key("a_b"));
    }

    #[tokio::test]
    async fn test_missing_file_is_none() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::new(dir.path());
        assert!(store.get_item("anything").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_set_then_get() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::new(dir.path());
        store.set_item(TRANSACTIONS_KEY, "[]").await.unwrap();
        store.set_item(TRANSACTIONS_KEY, "[1]").await.unwrap();
        assert_eq!(
            store.get_item(TRANSACTIONS_KEY).await.unwrap().as_deref(),
            Some("[1]")
        );
        assert!(!store.path_for(TRANSACTIONS_KEY).with_extension("json.tmp").exists());
    }

    #[tokio::test]
    async fn test_set_backs_up_previous_value() {
        let dir = TempDir::new().unwrap();
        let storage = dir.path().join("storage");
        let backups = dir.path().join("backups");
        utils::make_dir(&storage).await.unwrap();
        utils::make_dir(&backups).await.unwrap();
        let store = FileStore::new(&storage).with_backup(Backup::new(&backups, 5));

        // Nothing to back up on the first write.
        store.set_item(TRANSACTIONS_KEY, "[]").await.unwrap();
        store.set_item(TRANSACTIONS_KEY, "[1]").await.unwrap();

        let mut found = Vec::new();
        let mut rd = utils::read_dir(&backups).await.unwrap();
        while let Some(entry) = rd.next_entry().await.unwrap() {
            found.push(entry.path());
        }
        assert_eq!(found.len(), 1);
        assert_eq!(utils::read(&found[0]).await.unwrap(), "[]");
    }

    #[tokio::test]
    async fn test_write_into_missing_dir_fails_without_partial_file() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::new(dir.path().join("does-not-exist"));
        assert!(store.set_item("k", "v").await.is_err());
        assert!(!store.path_for("k").exists());
    }
}
