//! Durable client-side state for MerchantDesk.
//!
//! A small file-backed [`Vault`] holds everything the client persists across
//! restarts: the session record, the active business id, the one-shot
//! post-auth redirect target, and the install's device id. The stores in
//! this crate are thin, fail-soft layers over the vault: malformed or
//! missing entries never panic, they rehydrate to "absent" and log.

pub mod business;
pub mod device;
pub mod redirect;
pub mod session_store;
pub mod vault;

pub use business::ActiveBusinessStore;
pub use device::device_id;
pub use redirect::RedirectStash;
pub use session_store::SessionStore;
pub use vault::Vault;
