use leptos::prelude::*;
use leptos::task::spawn_local;

use atrium_shared::AppSummary;

use crate::api::AdminApi;

/// Read-only catalog of every installable app on the platform.
#[component]
pub fn AppCatalogPage() -> impl IntoView {
    let api = use_context::<AdminApi>().expect("AdminApi not found in context");

    let (apps, set_apps) = signal(Vec::<AppSummary>::new());
    let (loading, set_loading) = signal(true);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);

    Effect::new({
        let api = api.clone();
        move |_| {
            let api = api.clone();
            spawn_local(async move {
                match api.list_available_apps().await {
                    Ok(list) => set_apps.set(list),
                    Err(e) => set_error_msg.set(Some(format!("Failed to load catalog: {}", e))),
                }
                set_loading.set(false);
            });
        }
    });

    view! {
        <div class="space-y-6">
            <h1 class="text-2xl font-bold">"App catalog"</h1>

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
                    {move || apps.get().into_iter().map(|app| view! {
                        <div class="card bg-base-100 shadow-xl">
                            <div class="card-body">
                                <h2 class="card-title">{app.name.clone()}</h2>
                                <p class="text-sm text-base-content/70">{app.description.clone()}</p>
                                <div class="card-actions justify-end">
                                    <span class="badge badge-ghost">{app.id.clone()}</span>
                                </div>
                            </div>
                        </div>
                    }).collect_view()}
                </div>
                <Show when=move || apps.get().is_empty()>
                    <p class="text-base-content/60">"The catalog is empty."</p>
                </Show>
            </Show>
        </div>
    }
}
