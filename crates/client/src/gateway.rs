//! The single HTTP client instance behind every dashboard call.

use std::sync::{Arc, RwLock};
use std::time::Duration;

use anyhow::Context;
use merchantdesk_auth::AuthToken;
use merchantdesk_core::{BusinessId, UserId};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::error::{ApiError, ErrorBody};
use crate::models::{AuthPayload, BusinessSummary, LoginRequest, NewBusiness, VerifyPayload};
use crate::shapes;

/// Supplies the bearer credential attached to outgoing requests.
///
/// Backed by the session store in the application context; returning `None`
/// sends the request unauthenticated (the public auth endpoints).
pub trait TokenProvider: Send + Sync {
    fn token(&self) -> Option<AuthToken>;
}

/// Notified when a response comes back 401 and the call did not opt out.
///
/// The application context installs an observer that clears the session, so
/// the next guard evaluation lands on login.
pub trait UnauthorizedObserver: Send + Sync {
    fn on_unauthorized(&self);
}

/// Per-call options.
#[derive(Debug, Clone, Copy, Default)]
pub struct RequestOptions {
    /// Suppress the central 401 observer for this call. Set by the
    /// authentication endpoints, where a 401 means bad credentials rather
    /// than an expired session.
    pub skip_auth_redirect: bool,
}

impl RequestOptions {
    pub fn skip_auth_redirect() -> Self {
        Self {
            skip_auth_redirect: true,
        }
    }
}

#[derive(Debug, Clone)]
pub struct GatewayConfig {
    pub base_url: String,
    pub timeout: Duration,
}

/// The authenticated request gateway.
///
/// Owns the one `reqwest::Client`, the base URL and the request timeout.
/// Never retries: callers surface errors (via [`crate::error_message`]) and
/// decide recovery themselves.
pub struct Gateway {
    client: reqwest::Client,
    base_url: String,
    tokens: Arc<dyn TokenProvider>,
    unauthorized: RwLock<Option<Arc<dyn UnauthorizedObserver>>>,
}

impl Gateway {
    pub fn new(config: GatewayConfig, tokens: Arc<dyn TokenProvider>) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .context("failed to build HTTP client")?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            tokens,
            unauthorized: RwLock::new(None),
        })
    }

    /// Install the central 401 observer. At most one is active; installing
    /// replaces the previous one.
    pub fn set_unauthorized_observer(&self, observer: Arc<dyn UnauthorizedObserver>) {
        *self
            .unauthorized
            .write()
            .expect("unauthorized observer lock poisoned") = Some(observer);
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // ── generic verbs ────────────────────────────────────────────────────

    pub async fn get_json(
        &self,
        path: &str,
        query: &[(&str, &str)],
        opts: RequestOptions,
    ) -> Result<Value, ApiError> {
        let req = self.client.get(self.url(path)).query(query);
        self.execute(req, opts).await
    }

    pub async fn post_json<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
        opts: RequestOptions,
    ) -> Result<Value, ApiError> {
        let req = self.client.post(self.url(path)).json(body);
        self.execute(req, opts).await
    }

    pub async fn post_multipart(
        &self,
        path: &str,
        form: reqwest::multipart::Form,
        opts: RequestOptions,
    ) -> Result<Value, ApiError> {
        let req = self.client.post(self.url(path)).multipart(form);
        self.execute(req, opts).await
    }

    // ── typed endpoint calls ─────────────────────────────────────────────

    /// `POST /auth/login`.
    pub async fn login(&self, request: &LoginRequest) -> Result<AuthPayload, ApiError> {
        let body = self
            .post_json("/auth/login", request, RequestOptions::skip_auth_redirect())
            .await?;
        decode(body, "login response")
    }

    /// `GET /auth/token-login?token=...`.
    pub async fn login_with_token(&self, token: &str) -> Result<AuthPayload, ApiError> {
        let body = self
            .get_json(
                "/auth/token-login",
                &[("token", token)],
                RequestOptions::skip_auth_redirect(),
            )
            .await?;
        decode(body, "token login response")
    }

    /// `GET /auth/verify?token=...` (email-verification callback).
    pub async fn verify_email(&self, token: &str) -> Result<VerifyPayload, ApiError> {
        let body = self
            .get_json(
                "/auth/verify",
                &[("token", token)],
                RequestOptions::skip_auth_redirect(),
            )
            .await?;
        decode(body, "email verification response")
    }

    /// `GET /businesses/owner/{userId}`, normalized across the three known
    /// list shapes.
    pub async fn owned_businesses(&self, owner: UserId) -> Result<Vec<BusinessSummary>, ApiError> {
        let body = self
            .get_json(
                &format!("/businesses/owner/{owner}"),
                &[],
                RequestOptions::default(),
            )
            .await?;
        Ok(shapes::normalize_list(&body, "owned business list")?)
    }

    /// `POST /businesses` (multipart, single `business` JSON part),
    /// returning the created id normalized across the three known shapes.
    pub async fn create_business(&self, business: &NewBusiness) -> Result<BusinessId, ApiError> {
        let json = serde_json::to_string(business)
            .map_err(|err| ApiError::Parse(format!("failed to serialize business: {err}")))?;
        let part = reqwest::multipart::Part::text(json)
            .mime_str("application/json")
            .map_err(|err| ApiError::Parse(err.to_string()))?;
        let form = reqwest::multipart::Form::new().part("business", part);

        let body = self
            .post_multipart("/businesses", form, RequestOptions::default())
            .await?;
        Ok(shapes::created_business_id(&body)?)
    }

    // ── internals ────────────────────────────────────────────────────────

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn execute(
        &self,
        req: reqwest::RequestBuilder,
        opts: RequestOptions,
    ) -> Result<Value, ApiError> {
        let req = match self.tokens.token() {
            Some(token) => req.bearer_auth(token.as_str()),
            None => req,
        };

        let resp = req
            .send()
            .await
            .map_err(|err| ApiError::Network(err.to_string()))?;

        let status = resp.status();
        let text = resp
            .text()
            .await
            .map_err(|err| ApiError::Network(err.to_string()))?;

        if status.is_success() {
            if text.trim().is_empty() {
                return Ok(Value::Null);
            }
            return serde_json::from_str(&text)
                .map_err(|err| ApiError::Parse(format!("failed to parse response body: {err}")));
        }

        if status == reqwest::StatusCode::UNAUTHORIZED && !opts.skip_auth_redirect {
            let observer = self
                .unauthorized
                .read()
                .expect("unauthorized observer lock poisoned")
                .clone();
            if let Some(observer) = observer {
                tracing::warn!("received 401; notifying unauthorized observer");
                observer.on_unauthorized();
            }
        }

        Err(ApiError::Status {
            status: status.as_u16(),
            body: ErrorBody::from_text(&text),
        })
    }
}

fn decode<T: DeserializeOwned>(body: Value, what: &str) -> Result<T, ApiError> {
    serde_json::from_value(body)
        .map_err(|err| ApiError::Parse(format!("failed to decode {what}: {err}")))
}
