//! Route authorization gate.
//!
//! The single decision point for protected navigation: given a snapshot of
//! the session and the roles a route requires, decide whether to render a
//! loading state, redirect, or render the view. Pure logic, no DOM access;
//! the router applies the outcome.
//!
//! Two rules are load-bearing here:
//! - the loading check runs before any role evaluation, so authorization is
//!   never computed against a half-established session;
//! - a role excluded from a route still renders when it is already sitting
//!   on its own default landing path, otherwise a misconfigured landing
//!   route would redirect to itself forever.

use atrium_shared::Role;

/// Where unauthenticated (and structurally broken) sessions are sent.
pub const LOGIN_PATH: &str = "/login";
/// Landing path for platform admins.
pub const ADMIN_LANDING_PATH: &str = "/admin/dashboard";

/// Read-only view of the session, as the gate sees it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SessionSnapshot {
    /// Session establishment still in flight.
    pub loading: bool,
    pub authenticated: bool,
    pub role: Option<Role>,
    pub account_id: Option<String>,
}

/// Render outcome for a protected route request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteDecision {
    /// Session not yet resolved; render a loading state.
    Loading,
    /// Leave silently for the given path.
    Redirect(String),
    /// The session may see the view.
    Render,
}

/// A gate decision plus whether the stored session record must be cleared.
///
/// `invalidate_session` is set when the session failed structural
/// validation; clearing the record prevents the same broken state from
/// failing validation again on the next navigation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GateOutcome {
    pub decision: RouteDecision,
    pub invalidate_session: bool,
}

impl GateOutcome {
    fn allow() -> Self {
        Self {
            decision: RouteDecision::Render,
            invalidate_session: false,
        }
    }

    fn redirect(to: impl Into<String>) -> Self {
        Self {
            decision: RouteDecision::Redirect(to.into()),
            invalidate_session: false,
        }
    }

    fn corrupt_session() -> Self {
        Self {
            decision: RouteDecision::Redirect(LOGIN_PATH.to_string()),
            invalidate_session: true,
        }
    }
}

/// Result of the exposed authorization predicate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthzCheck {
    pub authorized: bool,
    pub redirect_to: Option<String>,
}

/// Default landing path for a role.
///
/// Returns `None` for a tenant role without an account id; that session is
/// structurally invalid and has no landing page.
pub fn default_landing(role: Role, account_id: Option<&str>) -> Option<String> {
    if role.is_platform_admin() {
        return Some(ADMIN_LANDING_PATH.to_string());
    }
    match account_id {
        Some(id) if !id.is_empty() => Some(format!("/account/{}/dashboard", id)),
        _ => None,
    }
}

/// Decide the render outcome for a protected route.
///
/// `required` is the set of roles the route admits (empty = public).
/// `path` is the current navigation path, used for redirect-loop avoidance.
/// Fails closed: anything that does not positively authorize redirects away.
pub fn authorize(session: &SessionSnapshot, required: &[Role], path: &str) -> GateOutcome {
    // Never evaluate roles against a session that is still loading.
    if session.loading {
        return GateOutcome {
            decision: RouteDecision::Loading,
            invalidate_session: false,
        };
    }

    // No session at all: plain redirect, nothing to clear.
    if !session.authenticated {
        return GateOutcome::redirect(LOGIN_PATH);
    }

    // Structural validation. An authenticated session without a role, or a
    // tenant session without an account id, is a corrupt record.
    let Some(role) = session.role else {
        return GateOutcome::corrupt_session();
    };
    let Some(landing) = default_landing(role, session.account_id.as_deref()) else {
        return GateOutcome::corrupt_session();
    };

    if required.is_empty() {
        return GateOutcome::allow();
    }

    // Wrong role: send it to its own landing page, unless it is already
    // there (or below it).
    if !required.contains(&role) {
        if path == landing || path.starts_with(&format!("{}/", landing)) {
            return GateOutcome::allow();
        }
        return GateOutcome::redirect(landing);
    }

    GateOutcome::allow()
}

/// Per-navigation tenant check, layered on top of [`authorize`].
///
/// Role requirements are static per route definition, but the account id
/// changes between navigations within one authenticated session, so this
/// runs again on every account-scoped navigation. Platform admins may
/// enter any account; tenant sessions only their own. A missing or empty
/// tenant on either side denies.
pub fn tenant_access_allowed(session: &SessionSnapshot, account_id: &str) -> bool {
    match session.role {
        Some(role) if role.is_platform_admin() => true,
        Some(_) => !account_id.is_empty() && session.account_id.as_deref() == Some(account_id),
        None => false,
    }
}

/// Authorization predicate for the surrounding application (navigation
/// chrome, link filtering). Loading counts as not authorized, with no
/// redirect suggested.
pub fn is_route_authorized(
    session: &SessionSnapshot,
    required: &[Role],
    path: &str,
) -> AuthzCheck {
    match authorize(session, required, path).decision {
        RouteDecision::Render => AuthzCheck {
            authorized: true,
            redirect_to: None,
        },
        RouteDecision::Redirect(to) => AuthzCheck {
            authorized: false,
            redirect_to: Some(to),
        },
        RouteDecision::Loading => AuthzCheck {
            authorized: false,
            redirect_to: None,
        },
    }
}

#[cfg(test)]
mod tests;
