//! Identity, session and routing policy for the MerchantDesk client.
//!
//! Everything in this crate is pure domain logic: no IO, no HTTP, no storage.
//! The stores in `merchantdesk-state` persist these values and the guard in
//! [`guard`] decides, from a session snapshot alone, which routes exist and
//! where the user lands.

pub mod account;
pub mod guard;
pub mod role;
pub mod route;
pub mod session;

pub use account::UserAccount;
pub use guard::{default_landing, decide, nav_items, RouteDecision};
pub use role::{AccountStatus, Role};
pub use route::{DashboardSection, Route};
pub use session::{AuthToken, Session};
