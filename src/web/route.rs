//! Route definitions - domain model.
//!
//! Pure business logic with no DOM or `web_sys` dependency: the full set of
//! panel routes, their URL shapes, and the roles each one requires.
//! Parsing is most-specific-first; anything unrecognized becomes `NotFound`.

use atrium_shared::Role;
use std::fmt::Display;

/// Roles allowed on platform-admin routes.
pub const PLATFORM_ROLES: &[Role] = &[Role::MasterAdmin, Role::Admin];
/// Roles allowed on tenant routes.
pub const TENANT_ROLES: &[Role] = &[Role::AccountAdmin, Role::User];
/// Roles allowed to manage an account's users from the admin tree.
pub const USER_MANAGER_ROLES: &[Role] = &[Role::MasterAdmin, Role::Admin, Role::AccountAdmin];

/// Application routes.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AppRoute {
    /// Login page (default route).
    #[default]
    Login,
    /// Platform admin landing page.
    AdminDashboard,
    /// Account list for platform admins.
    Accounts,
    /// Account creation form.
    AccountCreate,
    /// Single account, admin view.
    AccountDetails { account_id: String },
    /// An account's users, admin tree.
    AdminUsers { account_id: String },
    /// An account's installed apps, admin tree.
    AdminApps { account_id: String },
    /// A mounted sub-application, admin tree.
    AdminAppView {
        account_id: String,
        app_id: String,
        sub_path: String,
    },
    /// Marketplace catalog of available apps.
    AppCatalog,
    /// Tenant landing page.
    AccountDashboard { account_id: String },
    /// An account's users, tenant tree.
    TenantUsers { account_id: String },
    /// An account's installed apps, tenant tree.
    TenantApps { account_id: String },
    /// A mounted sub-application, tenant tree.
    TenantAppView {
        account_id: String,
        app_id: String,
        sub_path: String,
    },
    /// Bare `/account/{id}` entry point; canonically redirects to the
    /// tenant dashboard.
    AccountHome { account_id: String },
    /// Unrecognized path.
    NotFound,
}

impl AppRoute {
    /// Parse a URL path into a route.
    ///
    /// Arms are ordered most-specific-first, mirroring the route table this
    /// panel was wired with; reordering them changes which route wins.
    pub fn from_path(path: &str) -> Self {
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

        match segments.as_slice() {
            [] | ["login"] => Self::Login,
            ["admin"] | ["admin", "dashboard"] => Self::AdminDashboard,
            ["admin", "accounts"] => Self::Accounts,
            ["admin", "accounts", "create"] => Self::AccountCreate,
            ["admin", "accounts", id] => Self::AccountDetails {
                account_id: (*id).to_string(),
            },
            ["admin", "accounts", id, "users"] => Self::AdminUsers {
                account_id: (*id).to_string(),
            },
            ["admin", "accounts", id, "apps"] => Self::AdminApps {
                account_id: (*id).to_string(),
            },
            ["admin", "accounts", id, "apps", app, rest @ ..] => Self::AdminAppView {
                account_id: (*id).to_string(),
                app_id: (*app).to_string(),
                sub_path: rest.join("/"),
            },
            ["admin", "apps"] => Self::AppCatalog,
            ["account", id, "dashboard"] => Self::AccountDashboard {
                account_id: (*id).to_string(),
            },
            ["account", id, "users"] => Self::TenantUsers {
                account_id: (*id).to_string(),
            },
            ["account", id, "apps"] => Self::TenantApps {
                account_id: (*id).to_string(),
            },
            ["account", id, "apps", app, rest @ ..] => Self::TenantAppView {
                account_id: (*id).to_string(),
                app_id: (*app).to_string(),
                sub_path: rest.join("/"),
            },
            // any other path under an account funnels to the dashboard
            ["account", id, ..] => Self::AccountHome {
                account_id: (*id).to_string(),
            },
            _ => Self::NotFound,
        }
    }

    /// The canonical URL path of this route.
    pub fn to_path(&self) -> String {
        match self {
            Self::Login => "/login".to_string(),
            Self::AdminDashboard => "/admin/dashboard".to_string(),
            Self::Accounts => "/admin/accounts".to_string(),
            Self::AccountCreate => "/admin/accounts/create".to_string(),
            Self::AccountDetails { account_id } => format!("/admin/accounts/{}", account_id),
            Self::AdminUsers { account_id } => format!("/admin/accounts/{}/users", account_id),
            Self::AdminApps { account_id } => format!("/admin/accounts/{}/apps", account_id),
            Self::AdminAppView {
                account_id,
                app_id,
                sub_path,
            } => join_app_path(
                format!("/admin/accounts/{}/apps/{}", account_id, app_id),
                sub_path,
            ),
            Self::AppCatalog => "/admin/apps".to_string(),
            Self::AccountDashboard { account_id } => format!("/account/{}/dashboard", account_id),
            Self::TenantUsers { account_id } => format!("/account/{}/users", account_id),
            Self::TenantApps { account_id } => format!("/account/{}/apps", account_id),
            Self::TenantAppView {
                account_id,
                app_id,
                sub_path,
            } => join_app_path(format!("/account/{}/apps/{}", account_id, app_id), sub_path),
            Self::AccountHome { account_id } => format!("/account/{}", account_id),
            Self::NotFound => "/404".to_string(),
        }
    }

    /// Roles permitted to view this route. Empty means public.
    pub fn required_roles(&self) -> &'static [Role] {
        match self {
            Self::Login | Self::NotFound => &[],
            Self::AdminDashboard
            | Self::Accounts
            | Self::AccountCreate
            | Self::AccountDetails { .. }
            | Self::AdminApps { .. }
            | Self::AdminAppView { .. }
            | Self::AppCatalog => PLATFORM_ROLES,
            Self::AdminUsers { .. } => USER_MANAGER_ROLES,
            Self::AccountDashboard { .. }
            | Self::TenantUsers { .. }
            | Self::TenantApps { .. }
            | Self::TenantAppView { .. }
            | Self::AccountHome { .. } => TENANT_ROLES,
        }
    }

    /// Whether the route sits behind the authorization gate.
    pub fn is_protected(&self) -> bool {
        !matches!(self, Self::Login | Self::NotFound)
    }

    /// The account this route is scoped to, if any.
    pub fn account_scope(&self) -> Option<&str> {
        match self {
            Self::AccountDetails { account_id }
            | Self::AdminUsers { account_id }
            | Self::AdminApps { account_id }
            | Self::AdminAppView { account_id, .. }
            | Self::AccountDashboard { account_id }
            | Self::TenantUsers { account_id }
            | Self::TenantApps { account_id }
            | Self::TenantAppView { account_id, .. }
            | Self::AccountHome { account_id } => Some(account_id),
            _ => None,
        }
    }

    /// Alias routes resolve to a canonical target before rendering.
    pub fn redirect_target(&self) -> Option<String> {
        match self {
            Self::AccountHome { account_id } => {
                Some(format!("/account/{}/dashboard", account_id))
            }
            Self::NotFound => Some("/login".to_string()),
            _ => None,
        }
    }
}

fn join_app_path(base: String, sub_path: &str) -> String {
    if sub_path.is_empty() {
        base
    } else {
        format!("{}/{}", base, sub_path)
    }
}

impl Display for AppRoute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_admin_tree_most_specific_first() {
        assert_eq!(AppRoute::from_path("/admin"), AppRoute::AdminDashboard);
        assert_eq!(AppRoute::from_path("/admin/dashboard"), AppRoute::AdminDashboard);
        assert_eq!(AppRoute::from_path("/admin/accounts"), AppRoute::Accounts);
        // the literal "create" wins over the `{account_id}` arm
        assert_eq!(
            AppRoute::from_path("/admin/accounts/create"),
            AppRoute::AccountCreate
        );
        assert_eq!(
            AppRoute::from_path("/admin/accounts/9"),
            AppRoute::AccountDetails {
                account_id: "9".into()
            }
        );
        assert_eq!(
            AppRoute::from_path("/admin/accounts/9/apps/task_manager/board/42"),
            AppRoute::AdminAppView {
                account_id: "9".into(),
                app_id: "task_manager".into(),
                sub_path: "board/42".into(),
            }
        );
    }

    #[test]
    fn parses_tenant_tree() {
        assert_eq!(
            AppRoute::from_path("/account/7/dashboard"),
            AppRoute::AccountDashboard {
                account_id: "7".into()
            }
        );
        assert_eq!(
            AppRoute::from_path("/account/7/apps/multi_control/equipment"),
            AppRoute::TenantAppView {
                account_id: "7".into(),
                app_id: "multi_control".into(),
                sub_path: "equipment".into(),
            }
        );
        // bare account path and unknown tenant sub-paths funnel home
        assert_eq!(
            AppRoute::from_path("/account/7"),
            AppRoute::AccountHome {
                account_id: "7".into()
            }
        );
        assert_eq!(
            AppRoute::from_path("/account/7/whatever/else"),
            AppRoute::AccountHome {
                account_id: "7".into()
            }
        );
    }

    #[test]
    fn unknown_paths_are_not_found() {
        assert_eq!(AppRoute::from_path("/nope"), AppRoute::NotFound);
        assert_eq!(AppRoute::from_path("/admin/accounts/9/nope"), AppRoute::NotFound);
        assert_eq!(
            AppRoute::from_path("/nope").redirect_target().as_deref(),
            Some("/login")
        );
    }

    #[test]
    fn path_round_trip() {
        let routes = [
            AppRoute::Login,
            AppRoute::AdminDashboard,
            AppRoute::Accounts,
            AppRoute::AccountCreate,
            AppRoute::AppCatalog,
            AppRoute::AccountDetails {
                account_id: "3".into(),
            },
            AppRoute::AdminUsers {
                account_id: "3".into(),
            },
            AppRoute::AdminAppView {
                account_id: "3".into(),
                app_id: "inventory".into(),
                sub_path: String::new(),
            },
            AppRoute::TenantAppView {
                account_id: "3".into(),
                app_id: "multi_control".into(),
                sub_path: "alerts".into(),
            },
        ];
        for route in routes {
            assert_eq!(AppRoute::from_path(&route.to_path()), route);
        }
    }

    #[test]
    fn required_roles_follow_the_route_table() {
        assert!(AppRoute::Login.required_roles().is_empty());
        assert_eq!(AppRoute::Accounts.required_roles(), PLATFORM_ROLES);
        assert_eq!(
            AppRoute::AdminUsers {
                account_id: "1".into()
            }
            .required_roles(),
            USER_MANAGER_ROLES
        );
        assert_eq!(
            AppRoute::TenantApps {
                account_id: "1".into()
            }
            .required_roles(),
            TENANT_ROLES
        );
    }
}
