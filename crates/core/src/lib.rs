//! `merchantdesk-core` — shared domain primitives.
//!
//! This crate contains the typed identifiers used across the workspace and
//! nothing else (no IO, no HTTP, no storage).

pub mod id;

pub use id::{BusinessId, ParseIdError, UserId};
