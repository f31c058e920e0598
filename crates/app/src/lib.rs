//! Application assembly for the MerchantDesk client core.
//!
//! [`AppContext`] wires the stores, the gateway and the routing policy into
//! one explicitly constructed object with an init/shutdown lifecycle; the
//! [`flows`] module holds the single shared post-authentication procedure
//! that every entry point (password login, token login, email-verification
//! callback) goes through.

pub mod config;
pub mod context;
pub mod flows;
mod provisioning;

pub use config::AppConfig;
pub use context::{AppContext, Phase};
pub use flows::AuthFlowError;
