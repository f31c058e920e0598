//! The active business selection: the scoping key every domain screen reads.

use merchantdesk_core::BusinessId;

use crate::vault::{Vault, ACTIVE_BUSINESS_KEY};

/// Persisted selection of the business currently being managed.
///
/// No ownership validation happens here: the server 403/404s requests scoped
/// to a business the user does not own. The selection is cleared on logout by
/// the application context so it cannot leak into the next user's session.
#[derive(Debug, Clone)]
pub struct ActiveBusinessStore {
    vault: Vault,
}

impl ActiveBusinessStore {
    pub fn new(vault: Vault) -> Self {
        Self { vault }
    }

    /// Persist the selection as a decimal string.
    pub fn select(&self, business_id: BusinessId) {
        if let Err(err) = self
            .vault
            .write(ACTIVE_BUSINESS_KEY, &business_id.to_string())
        {
            tracing::warn!("failed to persist active business selection: {err:#}");
        }
    }

    /// The current selection, parsed. Junk in storage yields `None` (logged).
    pub fn current(&self) -> Option<BusinessId> {
        let raw = self.vault.read(ACTIVE_BUSINESS_KEY)?;
        match raw.parse::<BusinessId>() {
            Ok(id) => Some(id),
            Err(err) => {
                tracing::warn!("ignoring unparseable active business entry: {err}");
                None
            }
        }
    }

    /// The stored value verbatim, for consumers that want the raw string.
    pub fn current_raw(&self) -> Option<String> {
        self.vault.read(ACTIVE_BUSINESS_KEY)
    }

    pub fn clear(&self) {
        if let Err(err) = self.vault.delete(ACTIVE_BUSINESS_KEY) {
            tracing::warn!("failed to clear active business selection: {err:#}");
        }
    }
}
