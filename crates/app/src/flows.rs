//! Authentication entry points and the shared post-auth procedure.
//!
//! Password login, token login and the email-verification callback all
//! converge on [`complete_authentication`]: set the session, run
//! auto-provisioning for marketplace users, then decide where to land.

use merchantdesk_auth::{AuthToken, Role, Route, UserAccount};
use merchantdesk_client::{error_message, ApiError, DeviceMetadata, LoginRequest};
use merchantdesk_state::{device_id, Vault};
use thiserror::Error;

use crate::context::AppContext;
use crate::provisioning;

/// Failure of an authentication entry point. The session is left unset.
#[derive(Debug, Error)]
pub enum AuthFlowError {
    #[error(transparent)]
    Api(#[from] ApiError),

    /// Email verification returned no token and none is persisted.
    #[error("no verification token available")]
    MissingToken,
}

impl AuthFlowError {
    /// Short, human-readable text for a toast; never a raw payload.
    pub fn user_message(&self) -> String {
        match self {
            AuthFlowError::Api(err) => error_message(err),
            AuthFlowError::MissingToken => {
                "Your verification link has expired. Please log in again.".to_string()
            }
        }
    }
}

/// `POST /auth/login` with email, password and device metadata.
pub async fn login_with_password(
    ctx: &AppContext,
    email: &str,
    password: &str,
) -> Result<String, AuthFlowError> {
    let request = LoginRequest {
        email: email.to_string(),
        password: password.to_string(),
        device: device_metadata(ctx.vault()),
    };
    let payload = ctx.gateway().login(&request).await?;
    Ok(complete_authentication(ctx, payload.user, payload.token).await)
}

/// `GET /auth/token-login?token=...`.
pub async fn login_with_token(ctx: &AppContext, token: &str) -> Result<String, AuthFlowError> {
    let payload = ctx.gateway().login_with_token(token).await?;
    Ok(complete_authentication(ctx, payload.user, payload.token).await)
}

/// Email-verification callback (`GET /auth/verify?token=...`).
///
/// The response may omit the token; the currently persisted credential is
/// reused then. With neither, verification fails as an authentication error.
pub async fn verify_email_callback(
    ctx: &AppContext,
    verification_token: &str,
) -> Result<String, AuthFlowError> {
    let payload = ctx.gateway().verify_email(verification_token).await?;
    let token = match payload.token {
        Some(token) => token,
        None => ctx.session().token().ok_or(AuthFlowError::MissingToken)?,
    };
    Ok(complete_authentication(ctx, payload.user, token).await)
}

/// The shared post-authentication procedure. Infallible past this point:
/// provisioning failures degrade to manual business selection, never to a
/// failed login. Returns the path to land on.
pub async fn complete_authentication(
    ctx: &AppContext,
    user: UserAccount,
    token: AuthToken,
) -> String {
    let role = user.role;
    ctx.session().set_auth(user.clone(), token);
    tracing::info!(user = %user.id, %role, "authenticated");

    let selected = match role {
        Role::BusinessMarket => provisioning::ensure_business_selected(ctx, &user).await,
        Role::Business | Role::Customer | Role::Admin | Role::Unknown => false,
    };

    destination(ctx, role, selected)
}

/// Post-login destination: a stashed redirect target wins regardless of
/// role; else marketplace users with a selection land on the dashboard and
/// everyone else picks a business manually.
fn destination(ctx: &AppContext, role: Role, selected: bool) -> String {
    if let Some(target) = ctx.redirects().take() {
        return target;
    }
    if role == Role::BusinessMarket && selected {
        Route::Dashboard.path()
    } else {
        Route::BusinessSelection.path()
    }
}

fn device_metadata(vault: &Vault) -> DeviceMetadata {
    DeviceMetadata {
        device_id: device_id(vault),
        platform: std::env::consts::OS.to_string(),
        app_version: env!("CARGO_PKG_VERSION").to_string(),
    }
}
