//! One-shot "redirect after auth" target.

use crate::vault::{Vault, REDIRECT_KEY};

/// Stash for the path an unauthenticated visitor was trying to reach.
///
/// The guard stashes the attempted path when bouncing a deep link to login;
/// the post-auth destination decision takes it exactly once.
#[derive(Debug, Clone)]
pub struct RedirectStash {
    vault: Vault,
}

impl RedirectStash {
    pub fn new(vault: Vault) -> Self {
        Self { vault }
    }

    pub fn stash(&self, path: &str) {
        if let Err(err) = self.vault.write(REDIRECT_KEY, path) {
            tracing::warn!("failed to stash post-auth redirect target: {err:#}");
        }
    }

    /// Read and delete the stored target.
    pub fn take(&self) -> Option<String> {
        self.vault.take(REDIRECT_KEY)
    }

    pub fn clear(&self) {
        if let Err(err) = self.vault.delete(REDIRECT_KEY) {
            tracing::warn!("failed to clear post-auth redirect target: {err:#}");
        }
    }
}
