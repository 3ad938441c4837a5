//! Atrium - multi-tenant admin panel frontend.
//!
//! Context-driven architecture, one concern per module:
//! - `web::route`: route definitions (domain model)
//! - `web::guard`: route authorization gate (pure decision logic)
//! - `web::router`: router service (history API engine)
//! - `auth`: session state management
//! - `apps`: installed-app registry, resolver and dynamic loader
//! - `api`: REST client with bearer injection and one-shot token refresh
//! - `components`: page and chrome components

mod api;
mod auth;

mod components {
    pub mod account_details;
    pub mod account_users;
    pub mod accounts;
    pub mod admin_dashboard;
    pub mod app_catalog;
    pub mod create_account;
    pub mod icons;
    pub mod installed_apps;
    pub mod layout;
    pub mod login;
}

// Installable sub-applications and the machinery that mounts them.
pub(crate) mod apps {
    pub mod loader;
    pub mod pattern;
    pub mod registry;
    pub mod resolver;

    mod inventory;
    mod multi_control;
    mod task_manager;
}

// Browser plumbing: routing, guarding, session storage.
pub(crate) mod web {
    pub mod guard;
    pub mod route;
    pub mod router;
    mod storage;

    pub use storage::SessionStore;
}

use leptos::prelude::*;

use crate::api::{AdminApi, DEFAULT_API_BASE};
use crate::apps::loader::{DynamicAppLoader, ModuleLoader};
use crate::apps::registry::AppRegistry;
use crate::auth::AuthContext;
use crate::components::account_details::AccountDetailsPage;
use crate::components::account_users::AccountUsersPage;
use crate::components::accounts::AccountsPage;
use crate::components::admin_dashboard::AdminDashboardPage;
use crate::components::app_catalog::AppCatalogPage;
use crate::components::create_account::CreateAccountPage;
use crate::components::installed_apps::InstalledAppsPage;
use crate::components::layout::PanelShell;
use crate::components::login::LoginPage;
use crate::web::route::AppRoute;
use crate::web::router::{Router, RouterOutlet};

fn shell(inner: AnyView) -> AnyView {
    view! { <PanelShell>{inner}</PanelShell> }.into_any()
}

/// Map an authorized route to its view.
///
/// Protected views are wrapped in the role-specific panel chrome; alias
/// routes never reach this point (the router canonicalizes them first).
fn route_matcher(route: AppRoute) -> AnyView {
    match route {
        AppRoute::Login => view! { <LoginPage /> }.into_any(),
        AppRoute::AdminDashboard => shell(view! { <AdminDashboardPage /> }.into_any()),
        AppRoute::Accounts => shell(view! { <AccountsPage /> }.into_any()),
        AppRoute::AccountCreate => shell(view! { <CreateAccountPage /> }.into_any()),
        AppRoute::AccountDetails { account_id } | AppRoute::AccountDashboard { account_id } => {
            shell(view! { <AccountDetailsPage account_id=account_id /> }.into_any())
        }
        AppRoute::AdminUsers { account_id } | AppRoute::TenantUsers { account_id } => {
            shell(view! { <AccountUsersPage account_id=account_id /> }.into_any())
        }
        AppRoute::AdminApps { account_id } | AppRoute::TenantApps { account_id } => {
            shell(view! { <InstalledAppsPage account_id=account_id /> }.into_any())
        }
        AppRoute::AppCatalog => shell(view! { <AppCatalogPage /> }.into_any()),
        AppRoute::AdminAppView {
            account_id,
            app_id,
            sub_path,
        } => {
            let base_path = format!("/admin/accounts/{}/apps/{}", account_id, app_id);
            shell(
                view! {
                    <DynamicAppLoader
                        account_id=account_id
                        app_id=app_id
                        sub_path=sub_path
                        base_path=base_path
                    />
                }
                .into_any(),
            )
        }
        AppRoute::TenantAppView {
            account_id,
            app_id,
            sub_path,
        } => {
            let base_path = format!("/account/{}/apps/{}", account_id, app_id);
            shell(
                view! {
                    <DynamicAppLoader
                        account_id=account_id
                        app_id=app_id
                        sub_path=sub_path
                        base_path=base_path
                    />
                }
                .into_any(),
            )
        }
        // alias routes are canonicalized before rendering; if one slips
        // through, show the quiet screen the redirect would
        AppRoute::AccountHome { .. } | AppRoute::NotFound => view! {
            <div class="flex items-center justify-center min-h-screen bg-base-200">
                <span class="loading loading-spinner loading-lg text-primary"></span>
            </div>
        }
        .into_any(),
    }
}

#[component]
pub fn App() -> impl IntoView {
    // 1. session context
    let auth_ctx = AuthContext::new();
    provide_context(auth_ctx);

    // 2. collaborators: REST client, app registry, module load tracker
    provide_context(AdminApi::new(DEFAULT_API_BASE));
    provide_context(AppRegistry::builtin());
    provide_context(RwSignal::new(ModuleLoader::new()));

    // 3. restore the stored session once after mount; until then the gate
    // renders its loading state rather than judging a half-built session
    Effect::new(move |_| {
        if auth_ctx.state.get_untracked().is_loading {
            auth::init_auth(&auth_ctx);
        }
    });

    // 4. the router only sees the read-only session snapshot
    let session = auth_ctx.snapshot_signal();

    view! {
        <Router session=session>
            <RouterOutlet matcher=route_matcher />
        </Router>
    }
}
