use leptos::prelude::*;
use leptos::task::spawn_local;

use atrium_shared::{Account, Role, UpdateAccountRequest};

use crate::api::AdminApi;
use crate::auth::use_auth;
use crate::web::router::use_navigate;

/// Account overview. Serves both the admin detail route and the tenant
/// dashboard route; the chrome around it already differs by role.
#[component]
pub fn AccountDetailsPage(account_id: String) -> impl IntoView {
    let api = use_context::<AdminApi>().expect("AdminApi not found in context");
    let auth = use_auth();
    let navigate = use_navigate();

    let (account, set_account) = signal(Option::<Account>::None);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);
    let (new_name, set_new_name) = signal(String::new());

    Effect::new({
        let api = api.clone();
        let account_id = account_id.clone();
        move |_| {
            let api = api.clone();
            let account_id = account_id.clone();
            spawn_local(async move {
                match api.get_account(&account_id).await {
                    Ok(details) => {
                        set_new_name.set(details.name.clone());
                        set_account.set(Some(details));
                    }
                    Err(e) => set_error_msg.set(Some(format!("Failed to load account: {}", e))),
                }
            });
        }
    });

    // Settings are editable for platform admins and for this account's own
    // account admin.
    let can_manage = {
        let account_id = account_id.clone();
        Signal::derive(move || {
            auth.state.get().user.as_ref().is_some_and(|user| {
                user.role.is_platform_admin()
                    || (user.role == Role::AccountAdmin
                        && user.account_id.as_deref() == Some(account_id.as_str()))
            })
        })
    };

    let on_rename = {
        let api = api.clone();
        let account_id = account_id.clone();
        move |ev: web_sys::SubmitEvent| {
            ev.prevent_default();
            let name = new_name.get_untracked();
            if name.is_empty() {
                return;
            }
            let api = api.clone();
            let account_id = account_id.clone();
            spawn_local(async move {
                match api
                    .update_account(&account_id, &UpdateAccountRequest { name })
                    .await
                {
                    Ok(updated) => set_account.set(Some(updated)),
                    Err(e) => set_error_msg.set(Some(format!("Failed to rename account: {}", e))),
                }
            });
        }
    };

    // Link bases differ between the admin and tenant route trees.
    let links_base = {
        let account_id = account_id.clone();
        Signal::derive(move || {
            let is_admin = auth
                .state
                .get()
                .user
                .as_ref()
                .is_some_and(|u| u.role.is_platform_admin());
            if is_admin {
                format!("/admin/accounts/{}", account_id)
            } else {
                format!("/account/{}", account_id)
            }
        })
    };

    view! {
        <div class="space-y-6">
            <Show when=move || error_msg.get().is_some()>
                <div role="alert" class="alert alert-error">
                    <span>{move || error_msg.get().unwrap_or_default()}</span>
                </div>
            </Show>

            {move || match account.get() {
                None => view! {
                    <div class="flex justify-center py-12">
                        <span class="loading loading-spinner loading-lg"></span>
                    </div>
                }
                .into_any(),
                Some(details) => {
                    let on_rename = on_rename.clone();
                    view! {
                    <div class="space-y-6">
                        <div>
                            <h1 class="text-2xl font-bold">{details.name.clone()}</h1>
                            <p class="text-base-content/60">
                                "Customer since " {details.created_at.format("%B %Y").to_string()}
                            </p>
                        </div>

                        <div class="flex gap-2">
                            <button
                                class="btn btn-outline"
                                on:click={
                                    let navigate = navigate.clone();
                                    move |_| navigate(&format!("{}/users", links_base.get_untracked()))
                                }
                            >
                                "Users"
                            </button>
                            <button
                                class="btn btn-outline"
                                on:click={
                                    let navigate = navigate.clone();
                                    move |_| navigate(&format!("{}/apps", links_base.get_untracked()))
                                }
                            >
                                "Apps"
                            </button>
                        </div>

                        <Show when=move || can_manage.get()>
                            <div class="card bg-base-100 shadow-xl max-w-lg">
                                <form class="card-body" on:submit=on_rename.clone()>
                                    <h2 class="card-title text-base">"Account settings"</h2>
                                    <div class="form-control">
                                        <label class="label" for="rename">
                                            <span class="label-text">"Account name"</span>
                                        </label>
                                        <div class="join">
                                            <input
                                                id="rename"
                                                type="text"
                                                class="input input-bordered join-item flex-1"
                                                on:input=move |ev| set_new_name.set(event_target_value(&ev))
                                                prop:value=new_name
                                            />
                                            <button class="btn btn-primary join-item">"Save"</button>
                                        </div>
                                    </div>
                                </form>
                            </div>
                        </Show>
                    </div>
                    }
                    .into_any()
                }
            }}
        </div>
    }
}
