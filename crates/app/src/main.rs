use merchantdesk_app::{flows, AppConfig, AppContext};
use merchantdesk_auth::RouteDecision;

/// Smoke binary: build the context, optionally log in with credentials from
/// the environment, and report the phase and landing route.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    merchantdesk_observability::init();

    let config = AppConfig::from_env();
    let ctx = AppContext::init(config)?;

    if let (Ok(email), Ok(password)) = (
        std::env::var("MERCHANTDESK_EMAIL"),
        std::env::var("MERCHANTDESK_PASSWORD"),
    ) {
        match flows::login_with_password(&ctx, &email, &password).await {
            Ok(destination) => tracing::info!("logged in; landing at {destination}"),
            Err(err) => tracing::error!("login failed: {}", err.user_message()),
        }
    }

    tracing::info!("phase: {:?}", ctx.phase());
    match ctx.route_decision("/") {
        RouteDecision::Allow => tracing::info!("visit to / is allowed"),
        RouteDecision::Redirect(route) => tracing::info!("visit to / redirects to {}", route.path()),
    }

    ctx.shutdown();
    Ok(())
}
