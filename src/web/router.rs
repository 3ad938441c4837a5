//! Router service - core engine.
//!
//! Wraps the `web_sys` History API so every `window.history` touch lives in
//! this module, and drives rendering through signals. The navigation flow
//! is: request -> canonicalize -> authorize (gate) -> load.
//!
//! The authorization gate itself is pure (`web::guard`); this module only
//! feeds it the injected session signal and applies its outcome, which
//! keeps the router decoupled from how sessions are established.

use leptos::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

use super::guard::{self, GateOutcome, RouteDecision, SessionSnapshot};
use super::route::AppRoute;
use crate::auth::{self, use_auth};

/// Current browser path.
fn current_path() -> String {
    web_sys::window()
        .and_then(|w| w.location().pathname().ok())
        .unwrap_or_else(|| "/".to_string())
}

fn push_history_state(path: &str) {
    if let Some(window) = web_sys::window() {
        if let Ok(history) = window.history() {
            let _ = history.push_state_with_url(&JsValue::NULL, "", Some(path));
        }
    }
}

/// Replace the current History entry; used for redirects so the denied URL
/// does not stay reachable via the back button.
fn replace_history_state(path: &str) {
    if let Some(window) = web_sys::window() {
        if let Ok(history) = window.history() {
            let _ = history.replace_state_with_url(&JsValue::NULL, "", Some(path));
        }
    }
}

/// Resolve alias routes (bare account home, unknown paths) to their
/// canonical target before anything renders.
fn canonicalize(route: AppRoute) -> (AppRoute, bool) {
    match route.redirect_target() {
        Some(target) => (AppRoute::from_path(&target), true),
        None => (route, false),
    }
}

// =========================================================
// Router service
// =========================================================

#[derive(Clone, Copy)]
pub struct RouterService {
    /// Current route (read side).
    current_route: ReadSignal<AppRoute>,
    set_route: WriteSignal<AppRoute>,
    /// Injected session view; the router never owns session state.
    session: Signal<SessionSnapshot>,
}

impl RouterService {
    fn new(session: Signal<SessionSnapshot>) -> Self {
        let (initial_route, replaced) = canonicalize(AppRoute::from_path(&current_path()));
        if replaced {
            replace_history_state(&initial_route.to_path());
        }
        let (current_route, set_route) = signal(initial_route);

        Self {
            current_route,
            set_route,
            session,
        }
    }

    pub fn current_route(&self) -> ReadSignal<AppRoute> {
        self.current_route
    }

    pub fn session(&self) -> Signal<SessionSnapshot> {
        self.session
    }

    /// Navigate, adding a History entry.
    pub fn navigate(&self, path: &str) {
        self.apply(AppRoute::from_path(path), true);
    }

    /// Navigate, replacing the current History entry.
    pub fn replace(&self, path: &str) {
        self.apply(AppRoute::from_path(path), false);
    }

    fn apply(&self, route: AppRoute, use_push: bool) {
        let (mut route, _) = canonicalize(route);

        // An established session never navigates onto the login page; send
        // it to its role's landing page instead.
        if route == AppRoute::Login {
            let snapshot = self.session.get_untracked();
            if !snapshot.loading && snapshot.authenticated {
                let landing = snapshot
                    .role
                    .and_then(|r| guard::default_landing(r, snapshot.account_id.as_deref()));
                if let Some(landing) = landing {
                    web_sys::console::log_1(
                        &"[Router] already authenticated, redirecting to dashboard".into(),
                    );
                    route = AppRoute::from_path(&landing);
                }
            }
        }

        if use_push {
            push_history_state(&route.to_path());
        } else {
            replace_history_state(&route.to_path());
        }
        self.set_route.set(route);
    }

    /// Keep the route signal in sync with the back/forward buttons.
    fn init_popstate_listener(&self) {
        let set_route = self.set_route;

        let closure = Closure::<dyn Fn()>::new(move || {
            let (route, replaced) = canonicalize(AppRoute::from_path(&current_path()));
            if replaced {
                replace_history_state(&route.to_path());
            }
            // authorization is re-evaluated by the outlet on every route
            // change, popstate included
            set_route.set(route);
        });

        if let Some(window) = web_sys::window() {
            let _ = window
                .add_event_listener_with_callback("popstate", closure.as_ref().unchecked_ref());
        }

        // leak the closure to keep the listener alive
        closure.forget();
    }

    /// React to session transitions: logging out on a protected route sends
    /// the user to login, logging in on the login page leaves it.
    fn setup_auth_redirect(&self) {
        let current_route = self.current_route;
        let set_route = self.set_route;
        let session = self.session;

        Effect::new(move |_| {
            let snapshot = session.get();
            if snapshot.loading {
                return;
            }
            let route = current_route.get_untracked();

            if snapshot.authenticated {
                if route == AppRoute::Login {
                    let landing = snapshot
                        .role
                        .and_then(|r| guard::default_landing(r, snapshot.account_id.as_deref()));
                    if let Some(landing) = landing {
                        web_sys::console::log_1(
                            &"[Router] session established, leaving login page".into(),
                        );
                        push_history_state(&landing);
                        set_route.set(AppRoute::from_path(&landing));
                    }
                }
            } else if route.is_protected() {
                web_sys::console::log_1(
                    &"[Router] session gone, redirecting to login".into(),
                );
                push_history_state(guard::LOGIN_PATH);
                set_route.set(AppRoute::Login);
            }
        });
    }
}

fn provide_router(session: Signal<SessionSnapshot>) -> RouterService {
    let router = RouterService::new(session);

    router.init_popstate_listener();
    router.setup_auth_redirect();

    provide_context(router);
    router
}

pub fn use_router() -> RouterService {
    use_context::<RouterService>()
        .expect("RouterService not found in context. Ensure Router is provided.")
}

/// Navigation as a plain callable, for event handlers.
pub fn use_navigate() -> impl Fn(&str) + Clone {
    let router = use_router();
    move |to: &str| {
        router.navigate(to);
    }
}

// =========================================================
// UI components
// =========================================================

/// Router root; provides the routing context. Use once at the top of the
/// app.
#[component]
pub fn Router(
    /// Session snapshot signal, injected by the auth layer.
    session: Signal<SessionSnapshot>,
    children: Children,
) -> impl IntoView {
    provide_router(session);

    children()
}

/// Gate decision for one route render: role authorization first, then the
/// per-navigation tenant check for account-scoped routes.
fn outlet_decision(route: &AppRoute, snapshot: &SessionSnapshot) -> GateOutcome {
    let outcome = guard::authorize(snapshot, route.required_roles(), &route.to_path());
    if outcome.decision != RouteDecision::Render {
        return outcome;
    }
    if let Some(account_id) = route.account_scope() {
        if !guard::tenant_access_allowed(snapshot, account_id) {
            return GateOutcome {
                decision: RouteDecision::Redirect(guard::LOGIN_PATH.to_string()),
                invalidate_session: false,
            };
        }
    }
    outcome
}

/// Route outlet with the authorization gate applied.
///
/// For every (route, session) combination the gate decides: render the
/// matched view, show the quiet loading screen, or redirect. Redirects are
/// silent; denied content is never flashed first.
#[component]
pub fn RouterOutlet(
    /// Maps an authorized route to its view.
    matcher: fn(AppRoute) -> AnyView,
) -> impl IntoView {
    let router = use_router();
    let auth = use_auth();
    let session = router.session();

    // Apply gate outcomes (redirects, session invalidation) outside of
    // rendering.
    Effect::new(move |_| {
        let route = router.current_route().get();
        if !route.is_protected() {
            return;
        }
        let snapshot = session.get();
        let outcome = outlet_decision(&route, &snapshot);

        if outcome.invalidate_session {
            web_sys::console::warn_1(&"[Router] corrupt session detected, invalidating".into());
            auth::invalidate(&auth);
        }
        if let RouteDecision::Redirect(to) = outcome.decision {
            web_sys::console::log_1(
                &format!("[Router] access denied, redirecting to {}", to).into(),
            );
            router.replace(&to);
        }
    });

    move || {
        let route = router.current_route().get();
        if !route.is_protected() {
            return matcher(route);
        }

        let snapshot = session.get();
        match outlet_decision(&route, &snapshot).decision {
            RouteDecision::Render => matcher(route),
            // loading, and the brief window while a redirect is applied
            _ => view! {
                <div class="flex items-center justify-center min-h-screen bg-base-200">
                    <span class="loading loading-spinner loading-lg text-primary"></span>
                </div>
            }
            .into_any(),
        }
    }
}
