//! Single source of truth for "who is logged in".

use std::sync::RwLock;

use merchantdesk_auth::{AuthToken, Session, UserAccount};

use crate::vault::{Vault, SESSION_KEY};

/// In-memory session with a persisted mirror in the vault.
///
/// The session is one record (`user` + `token` together); rehydration
/// requires both fields, so a torn or hand-edited record yields an empty
/// store instead of a half-session.
#[derive(Debug)]
pub struct SessionStore {
    vault: Vault,
    inner: RwLock<Option<Session>>,
}

impl SessionStore {
    /// Rehydrate from the vault. Malformed or partial records fail soft to
    /// an empty session (logged at warn), never a panic.
    pub fn load(vault: Vault) -> Self {
        let session = match vault.read(SESSION_KEY) {
            Some(raw) => match serde_json::from_str::<Session>(&raw) {
                Ok(session) => Some(session),
                Err(err) => {
                    tracing::warn!("discarding malformed session record: {err}");
                    None
                }
            },
            None => None,
        };

        Self {
            vault,
            inner: RwLock::new(session),
        }
    }

    /// Replace the session. The in-memory state is updated first and stays
    /// valid for the process even if persistence fails (logged and
    /// swallowed).
    pub fn set_auth(&self, user: UserAccount, token: AuthToken) {
        let session = Session::new(user, token);
        let serialized = serde_json::to_string(&session);

        *self.inner.write().expect("session lock poisoned") = Some(session);

        match serialized {
            Ok(raw) => {
                if let Err(err) = self.vault.write(SESSION_KEY, &raw) {
                    tracing::warn!("failed to persist session record: {err:#}");
                }
            }
            Err(err) => tracing::warn!("failed to serialize session record: {err}"),
        }
    }

    /// Clear memory and the persisted record. Idempotent.
    pub fn logout(&self) {
        *self.inner.write().expect("session lock poisoned") = None;
        if let Err(err) = self.vault.delete(SESSION_KEY) {
            tracing::warn!("failed to delete persisted session record: {err:#}");
        }
    }

    pub fn session(&self) -> Option<Session> {
        self.inner.read().expect("session lock poisoned").clone()
    }

    pub fn token(&self) -> Option<AuthToken> {
        self.inner
            .read()
            .expect("session lock poisoned")
            .as_ref()
            .map(|s| s.token.clone())
    }

    pub fn is_authenticated(&self) -> bool {
        self.inner.read().expect("session lock poisoned").is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vault::temp_vault;
    use merchantdesk_auth::{AccountStatus, Role};
    use merchantdesk_core::UserId;

    fn test_user() -> UserAccount {
        UserAccount {
            id: UserId::new(42),
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            phone: Some("+15550100".to_string()),
            role: Role::BusinessMarket,
            status: AccountStatus::Active,
            profile_image: None,
            language: Some("en".to_string()),
        }
    }

    #[test]
    fn set_auth_exposes_both_user_and_token() {
        let store = SessionStore::load(temp_vault());
        assert!(!store.is_authenticated());

        store.set_auth(test_user(), AuthToken::new("tk-1").unwrap());

        let session = store.session().unwrap();
        assert_eq!(session.user, test_user());
        assert_eq!(session.token.as_str(), "tk-1");
        assert!(store.is_authenticated());
    }

    #[test]
    fn logout_clears_session_and_is_idempotent() {
        let store = SessionStore::load(temp_vault());
        store.set_auth(test_user(), AuthToken::new("tk-1").unwrap());

        store.logout();
        assert_eq!(store.session(), None);
        assert_eq!(store.token(), None);

        store.logout();
        assert_eq!(store.session(), None);
    }

    #[test]
    fn persist_then_rehydrate_round_trips_the_user() {
        let vault = temp_vault();
        let store = SessionStore::load(vault.clone());
        store.set_auth(test_user(), AuthToken::new("tk-2").unwrap());

        let rehydrated = SessionStore::load(vault);
        let session = rehydrated.session().unwrap();
        assert_eq!(session.user, test_user());
        assert_eq!(session.token.as_str(), "tk-2");
    }

    #[test]
    fn logout_removes_the_persisted_record() {
        let vault = temp_vault();
        let store = SessionStore::load(vault.clone());
        store.set_auth(test_user(), AuthToken::new("tk-3").unwrap());
        store.logout();

        let rehydrated = SessionStore::load(vault);
        assert!(!rehydrated.is_authenticated());
    }

    #[test]
    fn malformed_record_rehydrates_to_empty_session() {
        let vault = temp_vault();
        vault.write(SESSION_KEY, "{not json").unwrap();

        let store = SessionStore::load(vault);
        assert_eq!(store.session(), None);
    }

    #[test]
    fn record_with_empty_token_rehydrates_to_empty_session() {
        let vault = temp_vault();
        vault
            .write(
                SESSION_KEY,
                r#"{"user": {"id": 1, "name": "A", "email": "a@b.c", "role": "BUSINESS"}, "token": ""}"#,
            )
            .unwrap();

        let store = SessionStore::load(vault);
        assert_eq!(store.session(), None);
    }

    #[test]
    fn record_missing_the_user_rehydrates_to_empty_session() {
        let vault = temp_vault();
        vault.write(SESSION_KEY, r#"{"token": "tk-4"}"#).unwrap();

        let store = SessionStore::load(vault);
        assert_eq!(store.session(), None);
    }
}
