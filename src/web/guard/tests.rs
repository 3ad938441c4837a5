use super::*;
use crate::web::route::{PLATFORM_ROLES, TENANT_ROLES};

// =========================================================
// Fixtures
// =========================================================

fn loading_session() -> SessionSnapshot {
    SessionSnapshot {
        loading: true,
        ..Default::default()
    }
}

fn anonymous_session() -> SessionSnapshot {
    SessionSnapshot::default()
}

fn platform_session(role: Role) -> SessionSnapshot {
    SessionSnapshot {
        loading: false,
        authenticated: true,
        role: Some(role),
        account_id: None,
    }
}

fn tenant_session(role: Role, account_id: &str) -> SessionSnapshot {
    SessionSnapshot {
        loading: false,
        authenticated: true,
        role: Some(role),
        account_id: Some(account_id.to_string()),
    }
}

// =========================================================
// Tests
// =========================================================

#[test]
fn loading_is_observed_before_any_role_check() {
    // even a request that would be denied must wait for the session
    let outcome = authorize(&loading_session(), TENANT_ROLES, "/account/7/users");
    assert_eq!(outcome.decision, RouteDecision::Loading);
    assert!(!outcome.invalidate_session);
}

#[test]
fn anonymous_is_sent_to_login_without_invalidation() {
    let outcome = authorize(&anonymous_session(), PLATFORM_ROLES, "/admin/accounts");
    assert_eq!(
        outcome.decision,
        RouteDecision::Redirect(LOGIN_PATH.to_string())
    );
    assert!(!outcome.invalidate_session);
}

#[test]
fn authenticated_session_without_role_is_corrupt() {
    let session = SessionSnapshot {
        loading: false,
        authenticated: true,
        role: None,
        account_id: Some("7".into()),
    };
    let outcome = authorize(&session, TENANT_ROLES, "/account/7/dashboard");
    assert_eq!(
        outcome.decision,
        RouteDecision::Redirect(LOGIN_PATH.to_string())
    );
    assert!(outcome.invalidate_session);
}

#[test]
fn tenant_role_without_account_id_is_corrupt() {
    // a tenant-scoped route must never be allowed with a null tenant
    let session = SessionSnapshot {
        loading: false,
        authenticated: true,
        role: Some(Role::User),
        account_id: None,
    };
    let outcome = authorize(&session, TENANT_ROLES, "/account/7/dashboard");
    assert_eq!(
        outcome.decision,
        RouteDecision::Redirect(LOGIN_PATH.to_string())
    );
    assert!(outcome.invalidate_session);

    // same for an account admin with an empty id
    let session = SessionSnapshot {
        account_id: Some(String::new()),
        role: Some(Role::AccountAdmin),
        ..session
    };
    let outcome = authorize(&session, TENANT_ROLES, "/account/7/dashboard");
    assert_eq!(
        outcome.decision,
        RouteDecision::Redirect(LOGIN_PATH.to_string())
    );
    assert!(outcome.invalidate_session);
}

#[test]
fn platform_admin_on_tenant_route_lands_on_admin_dashboard() {
    let outcome = authorize(
        &platform_session(Role::Admin),
        TENANT_ROLES,
        "/account/7/apps",
    );
    assert_eq!(
        outcome.decision,
        RouteDecision::Redirect(ADMIN_LANDING_PATH.to_string())
    );
}

#[test]
fn tenant_user_on_admin_route_lands_on_account_dashboard() {
    let outcome = authorize(
        &tenant_session(Role::User, "7"),
        PLATFORM_ROLES,
        "/admin/accounts",
    );
    assert_eq!(
        outcome.decision,
        RouteDecision::Redirect("/account/7/dashboard".to_string())
    );
}

#[test]
fn matching_role_renders() {
    let outcome = authorize(
        &tenant_session(Role::AccountAdmin, "7"),
        TENANT_ROLES,
        "/account/7/users",
    );
    assert_eq!(outcome.decision, RouteDecision::Render);

    let outcome = authorize(
        &platform_session(Role::MasterAdmin),
        PLATFORM_ROLES,
        "/admin/apps",
    );
    assert_eq!(outcome.decision, RouteDecision::Render);
}

#[test]
fn excluded_role_already_on_its_landing_path_renders() {
    // the landing route excludes the role by (mis)configuration; rendering
    // anyway is what breaks the redirect cycle
    let outcome = authorize(
        &tenant_session(Role::User, "7"),
        &[Role::AccountAdmin],
        "/account/7/dashboard",
    );
    assert_eq!(outcome.decision, RouteDecision::Render);

    // a sub-path of the landing path counts too
    let outcome = authorize(
        &tenant_session(Role::User, "7"),
        &[Role::AccountAdmin],
        "/account/7/dashboard/widgets",
    );
    assert_eq!(outcome.decision, RouteDecision::Render);

    // but a sibling path does not
    let outcome = authorize(
        &tenant_session(Role::User, "7"),
        &[Role::AccountAdmin],
        "/account/7/users",
    );
    assert_eq!(
        outcome.decision,
        RouteDecision::Redirect("/account/7/dashboard".to_string())
    );
}

#[test]
fn decision_is_deterministic() {
    let session = tenant_session(Role::User, "7");
    let first = authorize(&session, PLATFORM_ROLES, "/admin/accounts");
    let second = authorize(&session, PLATFORM_ROLES, "/admin/accounts");
    assert_eq!(first, second);
}

#[test]
fn default_landing_per_role() {
    assert_eq!(
        default_landing(Role::MasterAdmin, None).as_deref(),
        Some(ADMIN_LANDING_PATH)
    );
    assert_eq!(
        default_landing(Role::Admin, Some("9")).as_deref(),
        Some(ADMIN_LANDING_PATH)
    );
    assert_eq!(
        default_landing(Role::AccountAdmin, Some("9")).as_deref(),
        Some("/account/9/dashboard")
    );
    assert_eq!(default_landing(Role::User, None), None);
    assert_eq!(default_landing(Role::User, Some("")), None);
}

#[test]
fn tenant_access_is_per_account() {
    let session = tenant_session(Role::User, "7");
    assert!(tenant_access_allowed(&session, "7"));
    // account 7's user does not get into account 9, whatever the roles say
    assert!(!tenant_access_allowed(&session, "9"));
    assert!(!tenant_access_allowed(&session, ""));

    // platform admins cross accounts freely
    assert!(tenant_access_allowed(&platform_session(Role::MasterAdmin), "9"));

    // no role, no access
    let broken = SessionSnapshot {
        loading: false,
        authenticated: true,
        role: None,
        account_id: Some("7".into()),
    };
    assert!(!tenant_access_allowed(&broken, "7"));
}

#[test]
fn predicate_reports_redirect_target() {
    let check = is_route_authorized(
        &tenant_session(Role::User, "7"),
        PLATFORM_ROLES,
        "/admin/accounts",
    );
    assert!(!check.authorized);
    assert_eq!(check.redirect_to.as_deref(), Some("/account/7/dashboard"));

    let check = is_route_authorized(
        &tenant_session(Role::User, "7"),
        TENANT_ROLES,
        "/account/7/apps",
    );
    assert!(check.authorized);
    assert_eq!(check.redirect_to, None);

    let check = is_route_authorized(&loading_session(), TENANT_ROLES, "/account/7/apps");
    assert!(!check.authorized);
    assert_eq!(check.redirect_to, None);
}
