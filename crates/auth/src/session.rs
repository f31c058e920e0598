use serde::{Deserialize, Serialize};

use crate::account::UserAccount;
use crate::role::Role;

/// Opaque bearer credential.
///
/// Any non-empty string is accepted; the client performs no format
/// validation (the server is the only authority on token validity).
/// `Debug` redacts the credential so it never leaks into logs.
#[derive(Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct AuthToken(String);

impl AuthToken {
    /// Returns `None` for empty (or whitespace-only) input.
    pub fn new(raw: impl Into<String>) -> Option<Self> {
        let raw = raw.into();
        if raw.trim().is_empty() {
            None
        } else {
            Some(Self(raw))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("AuthToken(<redacted>)")
    }
}

impl<'de> Deserialize<'de> for AuthToken {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        AuthToken::new(raw).ok_or_else(|| serde::de::Error::custom("empty bearer token"))
    }
}

/// The authenticated session: identity plus bearer credential.
///
/// User and token are both-present-or-both-absent by construction — there is
/// no representable state with only one side set. The session is persisted as
/// one record (`merchantdesk-state`), so a stored record missing either field
/// rehydrates to no session at all.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub user: UserAccount,
    pub token: AuthToken,
}

impl Session {
    pub fn new(user: UserAccount, token: AuthToken) -> Self {
        Self { user, token }
    }

    pub fn role(&self) -> Role {
        self.user.role
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::role::AccountStatus;
    use merchantdesk_core::UserId;

    fn test_user(role: Role) -> UserAccount {
        UserAccount {
            id: UserId::new(1),
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            phone: None,
            role,
            status: AccountStatus::Active,
            profile_image: None,
            language: None,
        }
    }

    #[test]
    fn empty_tokens_are_rejected() {
        assert!(AuthToken::new("").is_none());
        assert!(AuthToken::new("   ").is_none());
        assert!(AuthToken::new("tk-1").is_some());
    }

    #[test]
    fn debug_redacts_the_credential() {
        let token = AuthToken::new("super-secret").unwrap();
        assert_eq!(format!("{token:?}"), "AuthToken(<redacted>)");
    }

    #[test]
    fn session_record_rejects_empty_token_on_deserialize() {
        let json = r#"{"user": {"id": 1, "name": "Ada", "email": "a@b.c", "role": "BUSINESS"}, "token": ""}"#;
        assert!(serde_json::from_str::<Session>(json).is_err());
    }

    #[test]
    fn session_round_trips() {
        let session = Session::new(
            test_user(Role::BusinessMarket),
            AuthToken::new("tk-9").unwrap(),
        );
        let json = serde_json::to_string(&session).unwrap();
        let back: Session = serde_json::from_str(&json).unwrap();
        assert_eq!(back, session);
        assert_eq!(back.role(), Role::BusinessMarket);
    }
}
