//! File-per-entry durable storage under the app data directory.

use std::path::{Path, PathBuf};

use anyhow::Context;

/// Vault entry holding the serialized session record.
pub const SESSION_KEY: &str = "session.json";
/// Vault entry holding the active business id as a decimal string.
pub const ACTIVE_BUSINESS_KEY: &str = "active_business";
/// One-shot post-auth redirect target (read once and deleted).
pub const REDIRECT_KEY: &str = "redirect";
/// Stable id for this install; created on first use, survives logout.
pub const DEVICE_ID_KEY: &str = "device_id";

/// Durable client-side storage: one file per entry under a single directory.
///
/// Writes go through a temp file and a rename, so an entry is either its old
/// value or its new value — never a torn write. The session record in
/// particular is ONE entry, so identity and credential cannot diverge on
/// disk.
#[derive(Debug, Clone)]
pub struct Vault {
    dir: PathBuf,
}

impl Vault {
    /// Open (creating if needed) a vault rooted at `dir`.
    pub fn open(dir: impl Into<PathBuf>) -> anyhow::Result<Self> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)
            .with_context(|| format!("failed to create vault directory at {:?}", dir))?;
        Ok(Self { dir })
    }

    /// Default vault location: the OS data dir, falling back to
    /// `~/.local/share`, plus an app-specific segment.
    pub fn default_dir() -> PathBuf {
        dirs::data_dir()
            .unwrap_or_else(|| {
                let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
                home.join(".local").join("share")
            })
            .join("merchantdesk")
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Read an entry. Missing entries and IO failures both yield `None`;
    /// failures are logged (a vault read must never take the process down).
    pub fn read(&self, key: &str) -> Option<String> {
        let path = self.dir.join(key);
        match std::fs::read_to_string(&path) {
            Ok(value) => Some(value),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => None,
            Err(err) => {
                tracing::error!("failed to read vault entry {key}: {err}");
                None
            }
        }
    }

    /// Write an entry atomically (temp file + rename).
    pub fn write(&self, key: &str, value: &str) -> anyhow::Result<()> {
        let path = self.dir.join(key);
        let tmp = self.dir.join(format!("{key}.tmp"));
        std::fs::write(&tmp, value)
            .with_context(|| format!("failed to write vault entry {key}"))?;
        std::fs::rename(&tmp, &path)
            .with_context(|| format!("failed to commit vault entry {key}"))?;
        Ok(())
    }

    /// Delete an entry. Idempotent: deleting a missing entry succeeds.
    pub fn delete(&self, key: &str) -> anyhow::Result<()> {
        let path = self.dir.join(key);
        match std::fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => {
                Err(err).with_context(|| format!("failed to delete vault entry {key}"))
            }
        }
    }

    /// Read an entry and delete it in the same call (one-shot semantics).
    pub fn take(&self, key: &str) -> Option<String> {
        let value = self.read(key)?;
        if let Err(err) = self.delete(key) {
            tracing::warn!("failed to consume one-shot vault entry {key}: {err:#}");
        }
        Some(value)
    }
}

#[cfg(test)]
pub(crate) fn temp_vault() -> Vault {
    let dir = std::env::temp_dir().join(format!("merchantdesk-test-{}", uuid::Uuid::now_v7()));
    Vault::open(dir).expect("failed to open temp vault")
}
