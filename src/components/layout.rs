//! Panel layout chrome.
//!
//! Two sidebar variants wrap every protected view: platform admins get the
//! admin navigation, tenant sessions the account navigation. Sidebar links
//! are filtered through the same authorization predicate the gate uses, so
//! the chrome never offers a link its session cannot visit.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::AdminApi;
use crate::auth::{self, use_auth};
use crate::components::icons::LogOut;
use crate::web::guard::is_route_authorized;
use crate::web::route::AppRoute;
use crate::web::router::use_router;

/// Role-specific shell around a protected view.
#[component]
pub fn PanelShell(children: Children) -> impl IntoView {
    let auth = use_auth();
    let is_admin = Signal::derive(move || {
        auth.state
            .get()
            .user
            .as_ref()
            .is_some_and(|u| u.role.is_platform_admin())
    });

    view! {
        <div class="flex min-h-screen bg-base-200">
            <Show when=move || is_admin.get() fallback=|| view! { <AccountSidebar /> }>
                <AdminSidebar />
            </Show>
            <main class="flex-1 p-6">{children()}</main>
        </div>
    }
}

/// One sidebar entry. Hidden entirely when the current session is not
/// authorized for the target path.
#[component]
fn NavLink(label: &'static str, path: String) -> impl IntoView {
    let router = use_router();
    let auth = use_auth();
    let session = auth.snapshot_signal();
    let current = router.current_route();

    let authorized = {
        let path = path.clone();
        Signal::derive(move || {
            let route = AppRoute::from_path(&path);
            is_route_authorized(&session.get(), route.required_roles(), &path).authorized
        })
    };
    let active = {
        let path = path.clone();
        Signal::derive(move || {
            let now = current.get().to_path();
            now == path || now.starts_with(&format!("{}/", path))
        })
    };
    let href = path.clone();
    let on_click = move |ev: web_sys::MouseEvent| {
        ev.prevent_default();
        router.navigate(&path);
    };

    view! {
        <Show when=move || authorized.get()>
            <li>
                <a
                    href=href.clone()
                    class=move || if active.get() { "active" } else { "" }
                    on:click=on_click.clone()
                >
                    {label}
                </a>
            </li>
        </Show>
    }
}

#[component]
fn LogoutButton() -> impl IntoView {
    let auth = use_auth();
    let api = use_context::<AdminApi>().expect("AdminApi not found in context");

    let on_logout = move |_| {
        let api = api.clone();
        spawn_local(async move {
            auth::logout(&auth, &api).await;
            // the router's session effect takes it to the login page
        });
    };

    view! {
        <div class="p-4 border-t border-base-300">
            <button class="btn btn-ghost text-error w-full gap-2" on:click=on_logout>
                <LogOut attr:class="h-4 w-4" />
                "Logout"
            </button>
        </div>
    }
}

/// Navigation for platform admins.
#[component]
pub fn AdminSidebar() -> impl IntoView {
    view! {
        <aside class="w-60 bg-base-100 shadow-xl flex flex-col">
            <div class="p-4 border-b border-base-300">
                <h2 class="text-lg font-semibold">"Admin Panel"</h2>
            </div>
            <ul class="menu flex-1 w-full">
                <NavLink label="Dashboard" path="/admin/dashboard".to_string() />
                <NavLink label="Accounts" path="/admin/accounts".to_string() />
                <NavLink label="Apps" path="/admin/apps".to_string() />
            </ul>
            <LogoutButton />
        </aside>
    }
}

/// Navigation for tenant sessions, scoped to their own account.
#[component]
pub fn AccountSidebar() -> impl IntoView {
    let auth = use_auth();
    let account_id = Signal::derive(move || {
        auth.state
            .get()
            .user
            .as_ref()
            .and_then(|u| u.account_id.clone())
            .unwrap_or_default()
    });

    view! {
        <aside class="w-60 bg-base-100 shadow-xl flex flex-col">
            <div class="p-4 border-b border-base-300">
                <h2 class="text-lg font-semibold">"Account"</h2>
            </div>
            {move || {
                let id = account_id.get();
                view! {
                    <ul class="menu flex-1 w-full">
                        <NavLink label="Dashboard" path=format!("/account/{}/dashboard", id) />
                        <NavLink label="Users" path=format!("/account/{}/users", id) />
                        <NavLink label="Apps" path=format!("/account/{}/apps", id) />
                    </ul>
                }
            }}
            <LogoutButton />
        </aside>
    }
}
