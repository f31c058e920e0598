//! Route guard and navigation filter.
//!
//! Pure policy: decisions are a function of the session snapshot and the
//! route being visited. The guard is evaluated on every route change, so
//! rules here hold continuously, not just on initial load (a `Business`
//! user redirected off the dashboard root stays redirected).

use crate::role::Role;
use crate::route::{DashboardSection, Route};
use crate::session::Session;

/// Outcome of evaluating the guard for one route visit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteDecision {
    Allow,
    Redirect(Route),
}

/// Default landing route for an authenticated user at `/`.
pub fn default_landing(role: Role) -> Route {
    match role {
        Role::BusinessMarket => Route::Dashboard,
        Role::Business => Route::DashboardSection(DashboardSection::Profile),
        Role::Customer | Role::Admin | Role::Unknown => Route::BusinessSelection,
    }
}

/// Decide whether a route visit is allowed or redirected.
///
/// - No session: only the public auth routes are reachable; everything else
///   redirects to login.
/// - With a session, public routes stay reachable (no bounce away from
///   `/login` when already authenticated — deliberate laxness), unmatched
///   paths go to business selection, `/` goes to the role's default landing,
///   and a `Business` user is never allowed to rest on the dashboard root.
pub fn decide(session: Option<&Session>, route: Route) -> RouteDecision {
    let Some(session) = session else {
        return if route.is_public() {
            RouteDecision::Allow
        } else {
            RouteDecision::Redirect(Route::Login)
        };
    };

    if route.is_public() {
        return RouteDecision::Allow;
    }

    match route {
        Route::Unmatched => RouteDecision::Redirect(Route::BusinessSelection),
        Route::Root => RouteDecision::Redirect(default_landing(session.role())),
        Route::Dashboard => match session.role() {
            Role::Business => {
                RouteDecision::Redirect(Route::DashboardSection(DashboardSection::Profile))
            }
            Role::BusinessMarket | Role::Customer | Role::Admin | Role::Unknown => {
                RouteDecision::Allow
            }
        },
        _ => RouteDecision::Allow,
    }
}

/// Navigation items visible in the dashboard shell for a role.
///
/// Products is a marketplace-only capability; the `Business` role collapses
/// to exactly the profile item.
pub fn nav_items(role: Role) -> Vec<DashboardSection> {
    match role {
        Role::BusinessMarket => DashboardSection::ALL.to_vec(),
        Role::Business => vec![DashboardSection::Profile],
        Role::Customer | Role::Admin | Role::Unknown => DashboardSection::ALL
            .into_iter()
            .filter(|section| *section != DashboardSection::Products)
            .collect(),
    }
}
