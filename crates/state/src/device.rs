//! Stable per-install device id, used as login device metadata.

use crate::vault::{Vault, DEVICE_ID_KEY};

/// The install's device id, created on first use.
///
/// This identifies the install, not the user, so it deliberately survives
/// logout. If the vault cannot persist it, a fresh id is returned each call
/// (logged; login still works, the backend just sees a new device).
pub fn device_id(vault: &Vault) -> String {
    if let Some(existing) = vault.read(DEVICE_ID_KEY) {
        let existing = existing.trim().to_string();
        if !existing.is_empty() {
            return existing;
        }
    }

    let fresh = uuid::Uuid::now_v7().to_string();
    if let Err(err) = vault.write(DEVICE_ID_KEY, &fresh) {
        tracing::warn!("failed to persist device id: {err:#}");
    }
    fresh
}
