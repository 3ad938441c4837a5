use leptos::prelude::*;
use leptos::task::spawn_local;

use atrium_shared::{AccountUser, CreateUserRequest, Role};

use crate::api::AdminApi;
use crate::auth::{can_manage_users, use_auth};

/// Users of one account. Members see the list; platform admins and the
/// account's admin can also create and remove users.
#[component]
pub fn AccountUsersPage(account_id: String) -> impl IntoView {
    let api = use_context::<AdminApi>().expect("AdminApi not found in context");
    let auth = use_auth();

    let (users, set_users) = signal(Vec::<AccountUser>::new());
    let (loading, set_loading) = signal(true);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);

    let (new_email, set_new_email) = signal(String::new());
    let (new_name, set_new_name) = signal(String::new());
    let (new_role, set_new_role) = signal("user".to_string());
    let (new_password, set_new_password) = signal(String::new());

    let manage = Signal::derive(move || {
        auth.state
            .get()
            .user
            .as_ref()
            .is_some_and(can_manage_users)
    });

    Effect::new({
        let api = api.clone();
        let account_id = account_id.clone();
        move |_| {
            let api = api.clone();
            let account_id = account_id.clone();
            spawn_local(async move {
                match api.get_account_users(&account_id).await {
                    Ok(list) => set_users.set(list),
                    Err(e) => set_error_msg.set(Some(format!("Failed to load users: {}", e))),
                }
                set_loading.set(false);
            });
        }
    });

    let on_create = {
        let api = api.clone();
        let account_id = account_id.clone();
        move |ev: web_sys::SubmitEvent| {
            ev.prevent_default();
            let email = new_email.get_untracked();
            let name = new_name.get_untracked();
            let password = new_password.get_untracked();
            if email.is_empty() || name.is_empty() || password.is_empty() {
                set_error_msg.set(Some("Please fill in all fields".to_string()));
                return;
            }
            let role = if new_role.get_untracked() == "account_admin" {
                Role::AccountAdmin
            } else {
                Role::User
            };

            let api = api.clone();
            let account_id = account_id.clone();
            spawn_local(async move {
                let request = CreateUserRequest {
                    email,
                    name,
                    role,
                    password,
                };
                match api.create_account_user(&account_id, &request).await {
                    Ok(user) => {
                        set_users.update(|list| list.push(user));
                        set_new_email.set(String::new());
                        set_new_name.set(String::new());
                        set_new_password.set(String::new());
                        set_error_msg.set(None);
                    }
                    Err(e) => set_error_msg.set(Some(format!("Failed to create user: {}", e))),
                }
            });
        }
    };

    let handle_delete = {
        let api = api.clone();
        let account_id = account_id.clone();
        move |user_id: String| {
            let api = api.clone();
            let account_id = account_id.clone();
            spawn_local(async move {
                match api.delete_account_user(&account_id, &user_id).await {
                    Ok(()) => set_users.update(|list| list.retain(|u| u.id != user_id)),
                    Err(e) => set_error_msg.set(Some(format!("Failed to delete user: {}", e))),
                }
            });
        }
    };

    view! {
        <div class="space-y-6">
            <h1 class="text-2xl font-bold">"Users"</h1>

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
                                    <th>"Email"</th>
                                    <th>"Role"</th>
                                    <th></th>
                                </tr>
                            </thead>
                            <tbody>
                                {
                                    let handle_delete = handle_delete.clone();
                                    move || users.get().into_iter().map(|user| {
                                    let delete_id = user.id.clone();
                                    let handle_delete = handle_delete.clone();
                                    view! {
                                        <tr>
                                            <td>{user.name.clone()}</td>
                                            <td>{user.email.clone()}</td>
                                            <td><span class="badge badge-ghost">{user.role.as_str()}</span></td>
                                            <td class="text-right">
                                                <Show when=move || manage.get()>
                                                    {
                                                        let delete_id = delete_id.clone();
                                                        let handle_delete = handle_delete.clone();
                                                        view! {
                                                            <button
                                                                class="btn btn-sm btn-ghost text-error"
                                                                on:click=move |_| handle_delete(delete_id.clone())
                                                            >
                                                                "Remove"
                                                            </button>
                                                        }
                                                    }
                                                </Show>
                                            </td>
                                        </tr>
                                    }
                                }).collect_view()
                                }
                            </tbody>
                        </table>
                        <Show when=move || users.get().is_empty()>
                            <p class="p-6 text-base-content/60">"No users in this account."</p>
                        </Show>
                    </div>
                </div>
            </Show>

            <Show when=move || manage.get()>
                <div class="card bg-base-100 shadow-xl max-w-lg">
                    <form class="card-body" on:submit=on_create.clone()>
                        <h2 class="card-title text-base">"Add user"</h2>
                        <div class="form-control">
                            <input
                                type="text"
                                placeholder="Full name"
                                class="input input-bordered"
                                on:input=move |ev| set_new_name.set(event_target_value(&ev))
                                prop:value=new_name
                            />
                        </div>
                        <div class="form-control">
                            <input
                                type="email"
                                placeholder="Email"
                                class="input input-bordered"
                                on:input=move |ev| set_new_email.set(event_target_value(&ev))
                                prop:value=new_email
                            />
                        </div>
                        <div class="form-control">
                            <select
                                class="select select-bordered"
                                on:change=move |ev| set_new_role.set(event_target_value(&ev))
                                prop:value=new_role
                            >
                                <option value="user">"Member"</option>
                                <option value="account_admin">"Account admin"</option>
                            </select>
                        </div>
                        <div class="form-control">
                            <input
                                type="password"
                                placeholder="Initial password"
                                class="input input-bordered"
                                on:input=move |ev| set_new_password.set(event_target_value(&ev))
                                prop:value=new_password
                            />
                        </div>
                        <div class="form-control mt-4">
                            <button class="btn btn-primary">"Add user"</button>
                        </div>
                    </form>
                </div>
            </Show>
        </div>
    }
}
