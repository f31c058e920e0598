//! Auto-provisioning: a marketplace user always has a business selected
//! right after login, without manual setup.

use merchantdesk_auth::UserAccount;
use merchantdesk_client::{ApiError, NewBusiness};

use crate::context::AppContext;

/// Ensure an active business is selected for a marketplace user.
///
/// Runs under the context's provisioning lock, so concurrent flows in one
/// process cannot create two default businesses. Returns whether a
/// selection exists afterwards; failures are logged and swallowed — login
/// itself never fails because of provisioning.
pub(crate) async fn ensure_business_selected(ctx: &AppContext, user: &UserAccount) -> bool {
    let _guard = ctx.provisioning_lock().lock().await;

    match provision(ctx, user).await {
        Ok(()) => true,
        Err(err) => {
            tracing::warn!(user = %user.id, "auto-provisioning failed, falling back to manual selection: {err}");
            false
        }
    }
}

async fn provision(ctx: &AppContext, user: &UserAccount) -> Result<(), ApiError> {
    let owned = ctx.gateway().owned_businesses(user.id).await?;

    if let Some(first) = owned.first() {
        // An existing selection wins; auto-select only fills the gap.
        match ctx.active_business().current() {
            Some(current) => {
                tracing::debug!(business = %current, "keeping existing business selection")
            }
            None => {
                ctx.active_business().select(first.id);
                tracing::info!(business = %first.id, "auto-selected first owned business");
            }
        }
        return Ok(());
    }

    let default = NewBusiness::default_for_owner(user);
    let id = ctx.gateway().create_business(&default).await?;
    ctx.active_business().select(id);
    tracing::info!(business = %id, "auto-provisioned default business");

    // Confirmation re-fetch; failures here are logged only.
    match ctx.gateway().owned_businesses(user.id).await {
        Ok(owned) if owned.iter().any(|b| b.id == id) => {}
        Ok(_) => tracing::warn!(business = %id, "created business not yet visible in owned list"),
        Err(err) => tracing::warn!(business = %id, "failed to confirm provisioned business: {err}"),
    }

    Ok(())
}
