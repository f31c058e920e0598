use serde::{Deserialize, Serialize};

/// Account role, as reported by the backend.
///
/// This is a closed enumeration on purpose: the route guard and navigation
/// filter match on it exhaustively, so adding a role is a compile-checked
/// decision rather than a string comparison falling into a default branch.
/// Role strings the client does not know about deserialize to [`Role::Unknown`]
/// and are handled explicitly wherever roles are consumed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    /// Marketplace business owner: full dashboard, auto-provisioned store.
    #[serde(rename = "BUSINESS_MARKET")]
    BusinessMarket,
    /// Plain business account: profile-only dashboard.
    #[serde(rename = "BUSINESS")]
    Business,
    #[serde(rename = "CUSTOMER")]
    Customer,
    #[serde(rename = "ADMIN")]
    Admin,
    /// Any role string this client build does not recognize.
    #[serde(other)]
    Unknown,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::BusinessMarket => "BUSINESS_MARKET",
            Role::Business => "BUSINESS",
            Role::Customer => "CUSTOMER",
            Role::Admin => "ADMIN",
            Role::Unknown => "UNKNOWN",
        }
    }
}

impl core::fmt::Display for Role {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Activation state of an account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum AccountStatus {
    #[default]
    Active,
    PendingVerification,
    Suspended,
}
