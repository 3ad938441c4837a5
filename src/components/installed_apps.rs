use leptos::prelude::*;
use leptos::task::spawn_local;

use atrium_shared::AppSummary;

use crate::api::AdminApi;
use crate::auth::{can_manage_apps, use_auth};
use crate::web::router::use_navigate;

/// Installed apps of one account, with the install/uninstall marketplace
/// for sessions allowed to manage apps.
#[component]
pub fn InstalledAppsPage(account_id: String) -> impl IntoView {
    let api = use_context::<AdminApi>().expect("AdminApi not found in context");
    let auth = use_auth();
    let navigate = use_navigate();

    let (installed, set_installed) = signal(Vec::<AppSummary>::new());
    let (available, set_available) = signal(Vec::<AppSummary>::new());
    let (loading, set_loading) = signal(true);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);

    let manage = Signal::derive(move || {
        auth.state
            .get()
            .user
            .as_ref()
            .is_some_and(can_manage_apps)
    });

    let is_admin = Signal::derive(move || {
        auth.state
            .get()
            .user
            .as_ref()
            .is_some_and(|u| u.role.is_platform_admin())
    });

    let reload = {
        let api = api.clone();
        let account_id = account_id.clone();
        move || {
            let api = api.clone();
            let account_id = account_id.clone();
            set_loading.set(true);
            spawn_local(async move {
                match api.list_installed_apps(&account_id).await {
                    Ok(list) => set_installed.set(list),
                    Err(e) => set_error_msg.set(Some(format!("Failed to load apps: {}", e))),
                }
                match api.list_available_apps().await {
                    Ok(list) => set_available.set(list),
                    Err(e) => set_error_msg.set(Some(format!("Failed to load catalog: {}", e))),
                }
                set_loading.set(false);
            });
        }
    };

    Effect::new({
        let reload = reload.clone();
        move |_| reload()
    });

    // apps in the catalog that are not installed yet
    let installable = move || {
        let installed_ids: Vec<String> = installed.get().iter().map(|a| a.id.clone()).collect();
        available
            .get()
            .into_iter()
            .filter(|app| !installed_ids.contains(&app.id))
            .collect::<Vec<_>>()
    };

    let open_app = {
        let account_id = account_id.clone();
        let navigate = navigate.clone();
        move |app_id: String| {
            let base = if is_admin.get_untracked() {
                format!("/admin/accounts/{}/apps/{}", account_id, app_id)
            } else {
                format!("/account/{}/apps/{}", account_id, app_id)
            };
            navigate(&base);
        }
    };

    let install = {
        let api = api.clone();
        let account_id = account_id.clone();
        let reload = reload.clone();
        move |app_id: String| {
            let api = api.clone();
            let account_id = account_id.clone();
            let reload = reload.clone();
            spawn_local(async move {
                match api.install_app(&account_id, &app_id).await {
                    Ok(()) => reload(),
                    Err(e) => set_error_msg.set(Some(format!("Failed to install app: {}", e))),
                }
            });
        }
    };

    let uninstall = {
        let api = api.clone();
        let account_id = account_id.clone();
        move |app_id: String| {
            let api = api.clone();
            let account_id = account_id.clone();
            spawn_local(async move {
                match api.uninstall_app(&account_id, &app_id).await {
                    Ok(()) => set_installed.update(|list| list.retain(|a| a.id != app_id)),
                    Err(e) => set_error_msg.set(Some(format!("Failed to uninstall app: {}", e))),
                }
            });
        }
    };

    view! {
        <div class="space-y-6">
            <h1 class="text-2xl font-bold">"Apps"</h1>

            <Show when=move || error_msg.get().is_some()>
                <div role="alert" class="alert alert-error">
                    <span>{move || error_msg.get().unwrap_or_default()}</span>
                </div>
            </Show>

            <Show
                when=move || !loading.get()
                fallback=|| view! {
                    <div class="flex justify-center py-12">
                        <span class="loading loading-spinner loading-lg"></span>
                    </div>
                }
            >
                <div class="grid gap-4 md:grid-cols-2 lg:grid-cols-3">
                    {
                        let open_app = open_app.clone();
                        let uninstall = uninstall.clone();
                        move || installed.get().into_iter().map(|app| {
                        let open_id = app.id.clone();
                        let remove_id = app.id.clone();
                        let open_app = open_app.clone();
                        let uninstall = uninstall.clone();
                        view! {
                            <div class="card bg-base-100 shadow-xl">
                                <div class="card-body">
                                    <h2 class="card-title">{app.name.clone()}</h2>
                                    <p class="text-sm text-base-content/70">{app.description.clone()}</p>
                                    <div class="card-actions justify-end">
                                        <button
                                            class="btn btn-primary btn-sm"
                                            on:click=move |_| open_app(open_id.clone())
                                        >
                                            "Open"
                                        </button>
                                        <Show when=move || manage.get()>
                                            {
                                                let remove_id = remove_id.clone();
                                                let uninstall = uninstall.clone();
                                                view! {
                                                    <button
                                                        class="btn btn-ghost btn-sm text-error"
                                                        on:click=move |_| uninstall(remove_id.clone())
                                                    >
                                                        "Uninstall"
                                                    </button>
                                                }
                                            }
                                        </Show>
                                    </div>
                                </div>
                            </div>
                        }
                    }).collect_view()
                    }
                </div>

                <Show when=move || installed.get().is_empty()>
                    <p class="text-base-content/60">"No apps installed for this account."</p>
                </Show>
            </Show>

            <Show when=move || manage.get() && !installable().is_empty()>
                <div class="space-y-4">
                    <h2 class="text-lg font-semibold">"Install from catalog"</h2>
                    <div class="grid gap-4 md:grid-cols-2 lg:grid-cols-3">
                        {
                            let install = install.clone();
                            move || installable().into_iter().map(|app| {
                            let install_id = app.id.clone();
                            let install = install.clone();
                            view! {
                                <div class="card bg-base-100 shadow">
                                    <div class="card-body">
                                        <h2 class="card-title text-base">{app.name.clone()}</h2>
                                        <p class="text-sm text-base-content/70">{app.description.clone()}</p>
                                        <div class="card-actions justify-end">
                                            <button
                                                class="btn btn-outline btn-sm"
                                                on:click=move |_| install(install_id.clone())
                                            >
                                                "Install"
                                            </button>
                                        </div>
                                    </div>
                                </div>
                            }
                        }).collect_view()
                        }
                    </div>
                </div>
            </Show>
        </div>
    }
}
