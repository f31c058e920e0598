use std::sync::Arc;

use merchantdesk_auth::{guard, AuthToken, Route, RouteDecision};
use merchantdesk_client::{Gateway, GatewayConfig, TokenProvider, UnauthorizedObserver};
use merchantdesk_state::{ActiveBusinessStore, RedirectStash, SessionStore, Vault};

use crate::config::AppConfig;

/// Coarse client state, driven by the session and active-business stores.
///
/// There is no terminal state: the machine is long-lived and only a full
/// logout resets it to `Unauthenticated`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Unauthenticated,
    AuthenticatedNoBusiness,
    AuthenticatedWithBusiness,
}

/// The explicitly constructed application context.
///
/// Everything that used to be ambient global state — session, active
/// business, pending redirect, the HTTP client — lives here and is handed to
/// the components that need it. Built once by [`AppContext::init`], torn
/// down by [`AppContext::shutdown`].
pub struct AppContext {
    vault: Vault,
    session: Arc<SessionStore>,
    active_business: ActiveBusinessStore,
    redirects: RedirectStash,
    gateway: Arc<Gateway>,
    provisioning_lock: tokio::sync::Mutex<()>,
}

/// Feeds the session's bearer credential to the gateway.
struct SessionTokens(Arc<SessionStore>);

impl TokenProvider for SessionTokens {
    fn token(&self) -> Option<AuthToken> {
        self.0.token()
    }
}

/// On an unskipped 401, clear the session so the next guard evaluation
/// lands on login.
struct ClearSessionOnUnauthorized(Arc<SessionStore>);

impl UnauthorizedObserver for ClearSessionOnUnauthorized {
    fn on_unauthorized(&self) {
        tracing::warn!("session rejected by the backend; clearing it");
        self.0.logout();
    }
}

impl AppContext {
    /// Resolve the vault, rehydrate the stores and assemble the gateway.
    pub fn init(config: AppConfig) -> anyhow::Result<Self> {
        let vault = Vault::open(config.data_dir.clone())?;
        let session = Arc::new(SessionStore::load(vault.clone()));

        let gateway = Arc::new(Gateway::new(
            GatewayConfig {
                base_url: config.api_url.clone(),
                timeout: config.http_timeout,
            },
            Arc::new(SessionTokens(session.clone())),
        )?);
        gateway.set_unauthorized_observer(Arc::new(ClearSessionOnUnauthorized(session.clone())));

        tracing::info!(
            api_url = %config.api_url,
            data_dir = %config.data_dir.display(),
            authenticated = session.is_authenticated(),
            "application context initialized"
        );

        Ok(Self {
            active_business: ActiveBusinessStore::new(vault.clone()),
            redirects: RedirectStash::new(vault.clone()),
            vault,
            session,
            gateway,
            provisioning_lock: tokio::sync::Mutex::new(()),
        })
    }

    /// End the context's lifecycle. All state is already durable, so this
    /// only marks the shutdown in the log.
    pub fn shutdown(self) {
        tracing::info!("application context shut down");
    }

    pub fn vault(&self) -> &Vault {
        &self.vault
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    pub fn active_business(&self) -> &ActiveBusinessStore {
        &self.active_business
    }

    pub fn redirects(&self) -> &RedirectStash {
        &self.redirects
    }

    pub fn gateway(&self) -> &Gateway {
        &self.gateway
    }

    pub(crate) fn provisioning_lock(&self) -> &tokio::sync::Mutex<()> {
        &self.provisioning_lock
    }

    pub fn phase(&self) -> Phase {
        if !self.session.is_authenticated() {
            Phase::Unauthenticated
        } else if self.active_business.current().is_some() {
            Phase::AuthenticatedWithBusiness
        } else {
            Phase::AuthenticatedNoBusiness
        }
    }

    /// Full logout: session, active business and any pending redirect are
    /// all cleared. The device id survives; it identifies the install, not
    /// the user.
    pub fn logout(&self) {
        self.session.logout();
        self.active_business.clear();
        self.redirects.clear();
        tracing::info!("logged out");
    }

    /// Evaluate the route guard for a path visit.
    ///
    /// When an unauthenticated deep link is bounced to login, the attempted
    /// path is stashed as the one-shot post-auth redirect target.
    pub fn route_decision(&self, path: &str) -> RouteDecision {
        let route = Route::parse(path);
        let session = self.session.session();
        let decision = guard::decide(session.as_ref(), route);

        if session.is_none()
            && !route.is_public()
            && decision == RouteDecision::Redirect(Route::Login)
        {
            self.redirects.stash(path);
        }

        decision
    }
}
