use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::AdminApi;
use crate::web::router::use_navigate;

/// Landing page for platform admins: a couple of headline numbers and
/// shortcuts into the admin tree.
#[component]
pub fn AdminDashboardPage() -> impl IntoView {
    let api = use_context::<AdminApi>().expect("AdminApi not found in context");
    let navigate = use_navigate();

    let (account_count, set_account_count) = signal(Option::<usize>::None);
    let (app_count, set_app_count) = signal(Option::<usize>::None);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);

    Effect::new({
        let api = api.clone();
        move |_| {
            let api = api.clone();
            spawn_local(async move {
                match api.get_accounts().await {
                    Ok(list) => set_account_count.set(Some(list.len())),
                    Err(e) => set_error_msg.set(Some(format!("Failed to load accounts: {}", e))),
                }
                match api.list_available_apps().await {
                    Ok(list) => set_app_count.set(Some(list.len())),
                    Err(e) => set_error_msg.set(Some(format!("Failed to load apps: {}", e))),
                }
            });
        }
    });

    let count_text = |count: Option<usize>| count.map_or("—".to_string(), |n| n.to_string());

    view! {
        <div class="space-y-6">
            <h1 class="text-2xl font-bold">"Dashboard"</h1>

            <Show when=move || error_msg.get().is_some()>
                <div role="alert" class="alert alert-error">
                    <span>{move || error_msg.get().unwrap_or_default()}</span>
                </div>
            </Show>

            <div class="stats shadow bg-base-100 stats-vertical md:stats-horizontal w-full">
                <div class="stat">
                    <div class="stat-title">"Customer accounts"</div>
                    <div class="stat-value text-primary">
                        {move || count_text(account_count.get())}
                    </div>
                </div>
                <div class="stat">
                    <div class="stat-title">"Apps in catalog"</div>
                    <div class="stat-value text-secondary">
                        {move || count_text(app_count.get())}
                    </div>
                </div>
            </div>

            <div class="flex gap-2">
                <button
                    class="btn btn-primary"
                    on:click={
                        let navigate = navigate.clone();
                        move |_| navigate("/admin/accounts")
                    }
                >
                    "Manage accounts"
                </button>
                <button
                    class="btn btn-ghost"
                    on:click={
                        let navigate = navigate.clone();
                        move |_| navigate("/admin/apps")
                    }
                >
                    "Browse apps"
                </button>
            </div>
        </div>
    }
}
