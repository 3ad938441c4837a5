use leptos::prelude::*;
use leptos::task::spawn_local;

use atrium_shared::Account;

use crate::api::AdminApi;
use crate::web::router::use_navigate;

/// Account list for platform admins.
#[component]
pub fn AccountsPage() -> impl IntoView {
    let api = use_context::<AdminApi>().expect("AdminApi not found in context");
    let navigate = use_navigate();

    let (accounts, set_accounts) = signal(Vec::<Account>::new());
    let (loading, set_loading) = signal(true);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);

    let load_accounts = {
        let api = api.clone();
        move || {
            let api = api.clone();
            set_loading.set(true);
            spawn_local(async move {
                match api.get_accounts().await {
                    Ok(list) => set_accounts.set(list),
                    Err(e) => set_error_msg.set(Some(format!("Failed to load accounts: {}", e))),
                }
                set_loading.set(false);
            });
        }
    };

    Effect::new({
        let load_accounts = load_accounts.clone();
        move |_| load_accounts()
    });

    let handle_delete = {
        let api = api.clone();
        move |id: String| {
            let api = api.clone();
            spawn_local(async move {
                match api.delete_account(&id).await {
                    Ok(()) => set_accounts.update(|list| list.retain(|a| a.id != id)),
                    Err(e) => set_error_msg.set(Some(format!("Failed to delete account: {}", e))),
                }
            });
        }
    };

    view! {
        <div class="space-y-6">
            <div class="flex items-center justify-between">
                <h1 class="text-2xl font-bold">"Accounts"</h1>
                <button
                    class="btn btn-primary"
                    on:click={
                        let navigate = navigate.clone();
                        move |_| navigate("/admin/accounts/create")
                    }
                >
                    "New account"
                </button>
            </div>

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
                <div class="card bg-base-100 shadow-xl">
                    <div class="card-body p-0">
                        <table class="table">
                            <thead>
                                <tr>
                                    <th>"Name"</th>
                                    <th>"Created"</th>
                                    <th></th>
                                </tr>
                            </thead>
                            <tbody>
                                {
                                    let navigate = navigate.clone();
                                    let handle_delete = handle_delete.clone();
                                    move || accounts.get().into_iter().map(|account| {
                                    let open_id = account.id.clone();
                                    let delete_id = account.id.clone();
                                    let navigate = navigate.clone();
                                    let handle_delete = handle_delete.clone();
                                    view! {
                                        <tr>
                                            <td>{account.name.clone()}</td>
                                            <td>{account.created_at.format("%Y-%m-%d").to_string()}</td>
                                            <td class="text-right">
                                                <button
                                                    class="btn btn-sm btn-ghost"
                                                    on:click=move |_| navigate(&format!("/admin/accounts/{}", open_id))
                                                >
                                                    "Open"
                                                </button>
                                                <button
                                                    class="btn btn-sm btn-ghost text-error"
                                                    on:click=move |_| handle_delete(delete_id.clone())
                                                >
                                                    "Delete"
                                                </button>
                                            </td>
                                        </tr>
                                    }
                                }).collect_view()
                                }
                            </tbody>
                        </table>
                        <Show when=move || accounts.get().is_empty()>
                            <p class="p-6 text-base-content/60">"No accounts yet."</p>
                        </Show>
                    </div>
                </div>
            </Show>
        </div>
    }
}
