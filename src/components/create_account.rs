use leptos::prelude::*;
use leptos::task::spawn_local;

use atrium_shared::CreateAccountRequest;

use crate::api::AdminApi;
use crate::web::router::use_navigate;

/// Account creation form. The new account's first admin is invited by
/// email; password setup happens out of band.
#[component]
pub fn CreateAccountPage() -> impl IntoView {
    let api = use_context::<AdminApi>().expect("AdminApi not found in context");
    let navigate = use_navigate();

    let (name, set_name) = signal(String::new());
    let (admin_email, set_admin_email) = signal(String::new());
    let (is_submitting, set_is_submitting) = signal(false);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);

    let on_submit = {
        let api = api.clone();
        let navigate = navigate.clone();
        move |ev: web_sys::SubmitEvent| {
            ev.prevent_default();
            if name.get_untracked().is_empty() || admin_email.get_untracked().is_empty() {
                set_error_msg.set(Some("Please fill in all fields".to_string()));
                return;
            }

            set_is_submitting.set(true);
            set_error_msg.set(None);

            let api = api.clone();
            let navigate = navigate.clone();
            spawn_local(async move {
                let request = CreateAccountRequest {
                    name: name.get_untracked(),
                    admin_email: admin_email.get_untracked(),
                };
                match api.create_account(&request).await {
                    Ok(account) => {
                        navigate(&format!("/admin/accounts/{}", account.id));
                    }
                    Err(e) => {
                        set_error_msg.set(Some(format!("Failed to create account: {}", e)));
                        set_is_submitting.set(false);
                    }
                }
            });
        }
    };

    view! {
        <div class="max-w-lg space-y-6">
            <h1 class="text-2xl font-bold">"New account"</h1>

            <div class="card bg-base-100 shadow-xl">
                <form class="card-body" on:submit=on_submit>
                    <Show when=move || error_msg.get().is_some()>
                        <div role="alert" class="alert alert-error text-sm py-2">
                            <span>{move || error_msg.get().unwrap_or_default()}</span>
                        </div>
                    </Show>

                    <div class="form-control">
                        <label class="label" for="account-name">
                            <span class="label-text">"Account name"</span>
                        </label>
                        <input
                            id="account-name"
                            type="text"
                            placeholder="Acme Corp"
                            on:input=move |ev| set_name.set(event_target_value(&ev))
                            prop:value=name
                            class="input input-bordered"
                            required
                        />
                    </div>
                    <div class="form-control">
                        <label class="label" for="admin-email">
                            <span class="label-text">"Account admin email"</span>
                        </label>
                        <input
                            id="admin-email"
                            type="email"
                            placeholder="admin@acme.com"
                            on:input=move |ev| set_admin_email.set(event_target_value(&ev))
                            prop:value=admin_email
                            class="input input-bordered"
                            required
                        />
                    </div>
                    <div class="form-control mt-6">
                        <button class="btn btn-primary" disabled=move || is_submitting.get()>
                            {move || if is_submitting.get() {
                                view! { <span class="loading loading-spinner"></span> "Creating..." }.into_any()
                            } else {
                                "Create account".into_any()
                            }}
                        </button>
                    </div>
                </form>
            </div>
        </div>
    }
}
