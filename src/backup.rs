//! Rotated copies of stored blobs, taken before each overwrite.

use crate::{utils, Result};
use anyhow::Context;
use chrono::Local;
use std::path::{Path, PathBuf};

/// Manages backup file creation and rotation.
///
/// The `Backup` struct is immutable and owns copies of the paths and settings it needs.
/// Create a new instance via `Config::backup()` or `Backup::new()`.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Backup {
    backups_dir: PathBuf,
    backup_copies: u32,
}

impl Backup {
    pub fn new(backups_dir: impl Into<PathBuf>, backup_copies: u32) -> Self {
        Self {
            backups_dir: backups_dir.into(),
            backup_copies,
        }
    }

    pub fn backups_dir(&self) -> &Path {
        &self.backups_dir
    }

    /// Saves `contents` as a backup file named `{prefix}.YYYY-MM-DD-NNN.json` where NNN is a
    /// sequence number. Rotates old backups, keeping only `backup_copies` files for `prefix`.
    ///
    /// Returns the path to the created backup file.
    pub async fn save(&self, prefix: &str, contents: &str) -> Result<PathBuf> {
        let date = today();
        let seq = self.next_sequence_number(prefix, &date).await?;
        let filename = format!("{prefix}.{date}-{seq:03}.json");
        let path = self.backups_dir.join(&filename);

        utils::write(&path, contents)
            .await
            .context("Failed to write backup file")?;

        self.rotate(prefix).await?;

        Ok(path)
    }

    /// Scans the backups directory for existing files with the given prefix and date,
    /// and returns the next sequence number.
    async fn next_sequence_number(&self, prefix: &str, date: &str) -> Result<u32> {
        let mut max_seq: u32 = 0;

        let mut dir = utils::read_dir(&self.backups_dir).await?;
        while let Some(entry) = dir
            .next_entry()
            .await
            .context("Failed to read directory entry")?
        {
            let file_name = entry.file_name();
            let name = file_name.to_string_lossy();
            if let Some(seq) = parse_sequence_number(&name, prefix, date) {
                max_seq = max_seq.max(seq);
            }
        }

        Ok(max_seq + 1)
    }

    /// Deletes the oldest backups of `prefix` beyond `backup_copies`.
    async fn rotate(&self, prefix: &str) -> Result<()> {
        let mut files: Vec<(PathBuf, (String, u32))> = Vec::new();

        let mut dir = utils::read_dir(&self.backups_dir).await?;
        while let Some(entry) = dir
            .next_entry()
            .await
            .context("Failed to read directory entry")?
        {
            let name = entry.file_name().to_string_lossy().to_string();
            if let Some(key) = parse_backup_key(&name, prefix) {
                files.push((entry.path(), key));
            }
        }

        // Oldest first: by date, then by numeric sequence.
        files.sort_by(|a, b| a.1.cmp(&b.1));

        let to_delete = files.len().saturating_sub(self.backup_copies as usize);
        for (path, _) in files.into_iter().take(to_delete) {
            utils::remove(&path).await?;
        }

        Ok(())
    }
}

/// Returns today's date in YYYY-MM-DD format.
fn today() -> String {
    Local::now().format("%Y-%m-%d").to_string()
}

/// Parses the sequence number out of `{prefix}.{date}-{NNN}.json`.
fn parse_sequence_number(filename: &str, prefix: &str, date: &str) -> Option<u32> {
    let remainder = filename.strip_prefix(&format!("{prefix}.{date}-"))?;
    remainder.strip_suffix(".json")?.parse().ok()
}

/// Splits `{prefix}.{date}-{NNN}.json` into its date and sequence number.
fn parse_backup_key(filename: &str, prefix: &str) -> Option<(String, u32)> {
    let stem = filename
        .strip_prefix(&format!("{prefix}."))?
        .strip_suffix(".json")?;
    let (date, seq) = stem.rsplit_once('-')?;
    Some((date.to_string(), seq.parse().ok()?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_parse_sequence_number() {
        assert_eq!(
            parse_sequence_number("transactions.2025-12-14-001.json", "transactions", "2025-12-14"),
            Some(1)
        );
        assert_eq!(
            parse_sequence_number("transactions.2025-12-14-042.json", "transactions", "2025-12-14"),
            Some(42)
        );
        // Wrong prefix
        assert_eq!(
            parse_sequence_number("other.2025-12-14-001.json", "transactions", "2025-12-14"),
            None
        );
        // Wrong date
        assert_eq!(
            parse_sequence_number("transactions.2025-12-13-001.json", "transactions", "2025-12-14"),
            None
        );
    }

    #[test]
    fn test_parse_backup_key() {
        assert_eq!(
            parse_backup_key("transactions.2025-12-14-001.json", "transactions"),
            Some(("2025-12-14".to_string(), 1))
        );
        assert_eq!(
            parse_backup_key("transactions.2025-12-14-1000.json", "transactions"),
            Some(("2025-12-14".to_string(), 1000))
        );
        assert_eq!(
            parse_backup_key("transactions.2025-12-14-001.tmp", "transactions"),
            None
        );
        assert_eq!(
            parse_backup_key("other.2025-12-14-001.json", "transactions"),
            None
        );
    }

    #[tokio::test]
    async fn test_save_increments_sequence() {
        let dir = TempDir::new().unwrap();
        let backup = Backup::new(dir.path(), 5);
        let first = backup.save("transactions", "[]").await.unwrap();
        let second = backup.save("transactions", "[1]").await.unwrap();
        let first_name = first.file_name().unwrap().to_string_lossy().to_string();
        let second_name = second.file_name().unwrap().to_string_lossy().to_string();
        assert!(first_name.ends_with("-001.json"));
        assert!(second_name.ends_with("-002.json"));
        assert_eq!(utils::read(&second).await.unwrap(), "[1]");
    }

    #[tokio::test]
    async fn test_save_rotates() {
        let dir = TempDir::new().unwrap();
        let backup = Backup::new(dir.path(), 2);
        for i in 0..4 {
            backup.save("transactions", &i.to_string()).await.unwrap();
        }
        let mut names = Vec::new();
        let mut rd = utils::read_dir(dir.path()).await.unwrap();
        while let Some(entry) = rd.next_entry().await.unwrap() {
            names.push(entry.file_name().to_string_lossy().to_string());
        }
        names.sort();
        assert_eq!(names.len(), 2);
        assert!(names[0].ends_with("-003.json"));
        assert!(names[1].ends_with("-004.json"));
    }

    #[tokio::test]
    async fn test_rotate_orders_sequence_numerically() {
        let dir = TempDir::new().unwrap();
        let backup = Backup::new(dir.path(), 2);
        assert_eq!(backup.backups_dir(), dir.path());
        let date = today();
        let old = dir.path().join(format!("transactions.{date}-999.json"));
        let newer = dir.path().join(format!("transactions.{date}-1000.json"));
        utils::write(&old, "old").await.unwrap();
        utils::write(&newer, "newer").await.unwrap();

        let newest = backup.save("transactions", "newest").await.unwrap();
        assert!(newest.to_string_lossy().ends_with("-1001.json"));
        assert!(!old.exists());
        assert!(newer.exists());
        assert!(newest.exists());
    }
}
