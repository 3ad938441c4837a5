//! Dynamic app loader - composition root.
//!
//! Orchestrates a single app-route render: re-checks tenant access for the
//! navigation, resolves the module through the registry, initializes it
//! lazily, and renders the result inside the role chrome the caller wraps
//! around it.
//!
//! Tenant access is re-checked here on every navigation, on top of the
//! route gate: role requirements are static per route definition, but the
//! account id changes between navigations within one authenticated session.
//!
//! Module initialization is modeled as a generation-stamped task. When a
//! later navigation starts a new load, completions of older generations are
//! discarded instead of cancelled; the last completed navigation owns the
//! rendered view.

use leptos::prelude::*;
use leptos::task::spawn_local;
use std::collections::HashSet;

use super::inventory::InventoryPage;
use super::multi_control::{McAlerts, McEquipment, McFieldDashboard, McFields};
use super::pattern::PathParams;
use super::registry::{AppModule, AppRegistry};
use super::resolver::{Resolution, resolve};
use super::task_manager::TaskManagerPage;
use crate::api::AdminApi;
use crate::auth::use_auth;
use crate::web::guard::{LOGIN_PATH, SessionSnapshot, tenant_access_allowed};
use crate::web::router::use_router;

// =========================================================
// Pure decision logic
// =========================================================

/// Final render decision for an app route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderDecision {
    /// Session still being established.
    Loading,
    /// Access denied for this navigation; leave silently.
    Redirect(String),
    /// The app id is not registered; show a diagnostic view.
    Unknown {
        requested: String,
        known: Vec<&'static str>,
    },
    /// Mount the resolved module.
    Mount {
        module: AppModule,
        params: PathParams,
    },
}

/// Decide what to render for `(account_id, app_id, sub_path)`.
///
/// Composition of the session gate, the per-navigation tenant check, and
/// the resolver. Pure and deterministic: identical inputs always produce
/// the identical decision.
pub fn resolve_app_route(
    session: &SessionSnapshot,
    registry: &AppRegistry,
    account_id: &str,
    app_id: &str,
    sub_path: &str,
) -> RenderDecision {
    if session.loading {
        return RenderDecision::Loading;
    }
    if !session.authenticated {
        return RenderDecision::Redirect(LOGIN_PATH.to_string());
    }

    if !tenant_access_allowed(session, account_id) {
        return RenderDecision::Redirect(LOGIN_PATH.to_string());
    }

    match resolve(registry, app_id, sub_path) {
        Resolution::UnknownApp { requested, known } => {
            RenderDecision::Unknown { requested, known }
        }
        Resolution::Module { module, params } => RenderDecision::Mount { module, params },
    }
}

// =========================================================
// Lazy module initialization
// =========================================================

/// Observable state of a module initialization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState {
    Pending,
    Ready,
    Failed(String),
}

/// Handle for one initialization attempt. Completions are only honored
/// while their ticket is still the newest one issued.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadTicket {
    generation: u64,
    key: String,
}

/// Tracks in-flight and completed module initializations across
/// navigations.
///
/// Lives for the whole application so that revisiting an app does not
/// re-initialize it (`warm`), while each new navigation supersedes any
/// still-running load (`generation`).
#[derive(Debug, Default)]
pub struct ModuleLoader {
    generation: u64,
    warm: HashSet<String>,
}

impl ModuleLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether this module was already initialized in this session.
    pub fn is_warm(&self, key: &str) -> bool {
        self.warm.contains(key)
    }

    /// Start a new initialization, superseding any earlier one.
    pub fn begin(&mut self, key: &str) -> LoadTicket {
        self.generation += 1;
        LoadTicket {
            generation: self.generation,
            key: key.to_string(),
        }
    }

    /// Record the result of an initialization attempt.
    ///
    /// Returns `None` when the ticket has been superseded by a newer
    /// navigation; the caller must then discard the result entirely.
    pub fn finish(&mut self, ticket: &LoadTicket, result: Result<(), String>) -> Option<LoadState> {
        if ticket.generation != self.generation {
            return None;
        }
        match result {
            Ok(()) => {
                self.warm.insert(ticket.key.clone());
                Some(LoadState::Ready)
            }
            Err(reason) => Some(LoadState::Failed(reason)),
        }
    }
}

// =========================================================
// Loader component
// =========================================================

/// Renders one app route: gate, resolver, lazy init, module view.
#[component]
pub fn DynamicAppLoader(
    account_id: String,
    app_id: String,
    sub_path: String,
    /// Mount path of the app, used by modules to build their own nav links.
    base_path: String,
) -> impl IntoView {
    let auth = use_auth();
    let router = use_router();
    let api = use_context::<AdminApi>().expect("AdminApi not found in context");
    let registry = use_context::<AppRegistry>().expect("AppRegistry not found in context");
    let modules =
        use_context::<RwSignal<ModuleLoader>>().expect("ModuleLoader not found in context");

    let session = auth.snapshot_signal();

    let decision = Memo::new({
        let account_id = account_id.clone();
        let app_id = app_id.clone();
        let sub_path = sub_path.clone();
        move |_| {
            let snapshot = session.get();
            resolve_app_route(&snapshot, &registry, &account_id, &app_id, &sub_path)
        }
    });

    // Apply denied-navigation redirects outside of rendering.
    Effect::new(move |_| {
        if let RenderDecision::Redirect(to) = decision.get() {
            web_sys::console::log_1(
                &format!("[Loader] access check failed, redirecting to {}", to).into(),
            );
            router.replace(&to);
        }
    });

    let (load, set_load) = signal(LoadState::Pending);
    let (attempt, set_attempt) = signal(0u32);

    // Kick off (or skip) module initialization when this app is mounted and
    // whenever a retry is requested.
    Effect::new({
        let account_id = account_id.clone();
        let app_id = app_id.clone();
        let api = api.clone();
        move |_| {
            attempt.get();
            if !matches!(decision.get(), RenderDecision::Mount { .. }) {
                return;
            }
            let warm_key = format!("{}/{}", account_id, app_id);
            if modules.with_untracked(|m| m.is_warm(&warm_key)) {
                set_load.set(LoadState::Ready);
                return;
            }

            set_load.set(LoadState::Pending);
            let Some(ticket) = modules.try_update(|m| m.begin(&warm_key)) else {
                return;
            };
            let api = api.clone();
            let account_id = account_id.clone();
            let app_id = app_id.clone();
            spawn_local(async move {
                let result = api
                    .get_app_status(&account_id, &app_id)
                    .await
                    .map(|_| ())
                    .map_err(|e| e.to_string());
                // a superseded ticket means the user already navigated away;
                // its result must not touch the UI
                let applied = modules.try_update(|m| m.finish(&ticket, result)).flatten();
                if let Some(state) = applied {
                    let _ = set_load.try_set(state);
                }
            });
        }
    });

    let mount_ctx = (account_id, base_path);
    view! {
        {move || {
            let (account_id, base_path) = mount_ctx.clone();
            match decision.get() {
                // redirects render nothing: no flash of denied content
                RenderDecision::Loading | RenderDecision::Redirect(_) => pending_view(),
                RenderDecision::Unknown { requested, known } => unknown_app_view(requested, known),
                RenderDecision::Mount { module, params } => match load.get() {
                    LoadState::Pending => pending_view(),
                    LoadState::Failed(reason) => load_failed_view(reason, set_attempt),
                    LoadState::Ready => module_view(module, &account_id, &base_path, &params),
                },
            }
        }}
    }
}

fn pending_view() -> AnyView {
    view! {
        <div class="flex items-center justify-center py-24">
            <span class="loading loading-spinner loading-lg text-primary"></span>
        </div>
    }
    .into_any()
}

/// Soft failure: a stale or mistyped app id from a direct URL must not take
/// the whole shell down.
fn unknown_app_view(requested: String, known: Vec<&'static str>) -> AnyView {
    view! {
        <div class="card bg-base-100 shadow-xl max-w-xl">
            <div class="card-body">
                <h2 class="card-title text-warning">"App not found: " {requested}</h2>
                <p>"Available apps: " {known.join(", ")}</p>
            </div>
        </div>
    }
    .into_any()
}

fn load_failed_view(reason: String, set_attempt: WriteSignal<u32>) -> AnyView {
    view! {
        <div role="alert" class="alert alert-error max-w-xl">
            <span>"Failed to load the app module: " {reason}</span>
            <button class="btn btn-sm" on:click=move |_| set_attempt.update(|n| *n += 1)>
                "Retry"
            </button>
        </div>
    }
    .into_any()
}

fn module_view(
    module: AppModule,
    account_id: &str,
    base_path: &str,
    params: &PathParams,
) -> AnyView {
    match module {
        AppModule::TaskManager => view! {
            <TaskManagerPage account_id=account_id.to_string() />
        }
        .into_any(),
        AppModule::MultiControlFields => view! {
            <McFields base_path=base_path.to_string() />
        }
        .into_any(),
        AppModule::MultiControlEquipment => view! {
            <McEquipment base_path=base_path.to_string() />
        }
        .into_any(),
        AppModule::MultiControlAlerts => view! {
            <McAlerts base_path=base_path.to_string() />
        }
        .into_any(),
        AppModule::MultiControlFieldDashboard => {
            let field_id = params.get("field_id").unwrap_or("unknown").to_string();
            view! {
                <McFieldDashboard base_path=base_path.to_string() field_id=field_id />
            }
            .into_any()
        }
        AppModule::Inventory => view! {
            <InventoryPage account_id=account_id.to_string() />
        }
        .into_any(),
    }
}

#[cfg(test)]
mod tests;
