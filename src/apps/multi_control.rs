//! Multi-control sub-app: field, equipment and alert views.
//!
//! The richest installable module, and the one exercising sub-routes: the
//! registry maps "equipment" and "alerts" to their panels and ":field_id"
//! to the per-field dashboard. Each view carries the in-app tab bar and
//! builds its links from the mount path handed down by the loader.

use leptos::prelude::*;

use crate::web::router::use_navigate;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum McTab {
    Fields,
    Equipment,
    Alerts,
}

/// In-app navigation shared by every multi-control view.
#[component]
fn McNav(base_path: String, active: McTab) -> impl IntoView {
    let navigate = use_navigate();

    let tab = |label: &'static str, suffix: &'static str, target: McTab| {
        let navigate = navigate.clone();
        let base = base_path.clone();
        let class = if active == target { "tab tab-active" } else { "tab" };
        let target = if suffix.is_empty() {
            base
        } else {
            format!("{}/{}", base, suffix)
        };
        view! {
            <a class=class on:click=move |_| navigate(&target)>
                {label}
            </a>
        }
    };

    view! {
        <div class="tabs tabs-boxed w-fit">
            {tab("Fields", "", McTab::Fields)}
            {tab("Equipment", "equipment", McTab::Equipment)}
            {tab("Alerts", "alerts", McTab::Alerts)}
        </div>
    }
}

/// Landing view: the account's fields, each linking into its dashboard.
#[component]
pub fn McFields(base_path: String) -> impl IntoView {
    let navigate = use_navigate();
    let fields = ["field-12", "field-27", "field-42"];

    view! {
        <div class="space-y-6">
            <h1 class="text-2xl font-bold">"Multi Control"</h1>
            <McNav base_path=base_path.clone() active=McTab::Fields />

            <div class="grid gap-4 md:grid-cols-3">
                {fields.iter().map(|field_id| {
                    let navigate = navigate.clone();
                    let target = format!("{}/{}", base_path, field_id);
                    view! {
                        <div class="card bg-base-100 shadow-xl">
                            <div class="card-body">
                                <h2 class="card-title text-base">{*field_id}</h2>
                                <div class="card-actions justify-end">
                                    <button
                                        class="btn btn-sm btn-outline"
                                        on:click=move |_| navigate(&target)
                                    >
                                        "Dashboard"
                                    </button>
                                </div>
                            </div>
                        </div>
                    }
                }).collect_view()}
            </div>
        </div>
    }
}

#[component]
pub fn McEquipment(base_path: String) -> impl IntoView {
    view! {
        <div class="space-y-6">
            <h1 class="text-2xl font-bold">"Equipment"</h1>
            <McNav base_path=base_path active=McTab::Equipment />
            <div class="card bg-base-100 shadow-xl">
                <div class="card-body">
                    <p class="text-base-content/70">
                        "Pumps, valves and sensors registered for this account appear here."
                    </p>
                </div>
            </div>
        </div>
    }
}

#[component]
pub fn McAlerts(base_path: String) -> impl IntoView {
    view! {
        <div class="space-y-6">
            <h1 class="text-2xl font-bold">"Alerts"</h1>
            <McNav base_path=base_path active=McTab::Alerts />
            <div class="card bg-base-100 shadow-xl">
                <div class="card-body">
                    <p class="text-base-content/70">"No active alerts."</p>
                </div>
            </div>
        </div>
    }
}

/// Per-field dashboard, selected by the ":field_id" sub-route.
#[component]
pub fn McFieldDashboard(base_path: String, field_id: String) -> impl IntoView {
    view! {
        <div class="space-y-6">
            <h1 class="text-2xl font-bold">"Field " {field_id}</h1>
            <McNav base_path=base_path active=McTab::Fields />
            <div class="stats shadow bg-base-100">
                <div class="stat">
                    <div class="stat-title">"Moisture"</div>
                    <div class="stat-value text-primary">"41%"</div>
                </div>
                <div class="stat">
                    <div class="stat-title">"Flow"</div>
                    <div class="stat-value text-secondary">"12 L/s"</div>
                </div>
            </div>
        </div>
    }
}
