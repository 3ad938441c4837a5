use super::*;
use atrium_shared::Role;

// =========================================================
// Fixtures
// =========================================================

fn registry() -> AppRegistry {
    AppRegistry::builtin()
}

fn tenant_session(role: Role, account_id: &str) -> SessionSnapshot {
    SessionSnapshot {
        loading: false,
        authenticated: true,
        role: Some(role),
        account_id: Some(account_id.to_string()),
    }
}

fn platform_session() -> SessionSnapshot {
    SessionSnapshot {
        loading: false,
        authenticated: true,
        role: Some(Role::Admin),
        account_id: None,
    }
}

// =========================================================
// resolve_app_route
// =========================================================

#[test]
fn loading_session_defers_every_check() {
    let session = SessionSnapshot {
        loading: true,
        ..Default::default()
    };
    let decision = resolve_app_route(&session, &registry(), "7", "task_manager", "");
    assert_eq!(decision, RenderDecision::Loading);
}

#[test]
fn anonymous_navigation_redirects_to_login() {
    let decision = resolve_app_route(
        &SessionSnapshot::default(),
        &registry(),
        "7",
        "task_manager",
        "",
    );
    assert_eq!(decision, RenderDecision::Redirect(LOGIN_PATH.to_string()));
}

#[test]
fn tenant_mismatch_is_denied_even_with_a_matching_role() {
    // session belongs to account 7, navigation targets account 9
    let decision = resolve_app_route(
        &tenant_session(Role::User, "7"),
        &registry(),
        "9",
        "task_manager",
        "",
    );
    assert_eq!(decision, RenderDecision::Redirect(LOGIN_PATH.to_string()));
}

#[test]
fn empty_route_tenant_is_denied() {
    let decision = resolve_app_route(
        &tenant_session(Role::AccountAdmin, "7"),
        &registry(),
        "",
        "task_manager",
        "",
    );
    assert_eq!(decision, RenderDecision::Redirect(LOGIN_PATH.to_string()));
}

#[test]
fn matching_tenant_mounts_the_module() {
    let decision = resolve_app_route(
        &tenant_session(Role::User, "7"),
        &registry(),
        "7",
        "multi_control",
        "equipment",
    );
    match decision {
        RenderDecision::Mount { module, .. } => {
            assert_eq!(module, AppModule::MultiControlEquipment)
        }
        other => panic!("unexpected decision: {:?}", other),
    }
}

#[test]
fn platform_admin_may_enter_any_account() {
    let decision = resolve_app_route(
        &platform_session(),
        &registry(),
        "9",
        "multi_control",
        "field-42",
    );
    match decision {
        RenderDecision::Mount { module, params } => {
            assert_eq!(module, AppModule::MultiControlFieldDashboard);
            assert_eq!(params.get("field_id"), Some("field-42"));
        }
        other => panic!("unexpected decision: {:?}", other),
    }
}

#[test]
fn unknown_app_produces_a_diagnostic_decision() {
    let decision = resolve_app_route(
        &platform_session(),
        &registry(),
        "9",
        "unknown_app",
        "",
    );
    match decision {
        RenderDecision::Unknown { requested, known } => {
            assert_eq!(requested, "unknown_app");
            assert!(known.contains(&"task_manager"));
            assert!(known.contains(&"multi_control"));
            assert!(known.contains(&"inventory"));
        }
        other => panic!("unexpected decision: {:?}", other),
    }
}

#[test]
fn identical_inputs_yield_identical_decisions() {
    let session = tenant_session(Role::User, "7");
    let registry = registry();
    let first = resolve_app_route(&session, &registry, "7", "multi_control", "alerts");
    let second = resolve_app_route(&session, &registry, "7", "multi_control", "alerts");
    assert_eq!(first, second);
}

// =========================================================
// ModuleLoader
// =========================================================

#[test]
fn successful_load_marks_the_module_warm() {
    let mut loader = ModuleLoader::new();
    assert!(!loader.is_warm("7/task_manager"));

    let ticket = loader.begin("7/task_manager");
    assert_eq!(loader.finish(&ticket, Ok(())), Some(LoadState::Ready));
    assert!(loader.is_warm("7/task_manager"));
}

#[test]
fn superseded_completion_is_discarded() {
    let mut loader = ModuleLoader::new();
    let first = loader.begin("7/task_manager");
    // the user navigated on before the first load finished
    let second = loader.begin("7/inventory");

    assert_eq!(loader.finish(&first, Ok(())), None);
    // the stale completion must not have warmed anything either
    assert!(!loader.is_warm("7/task_manager"));

    assert_eq!(loader.finish(&second, Ok(())), Some(LoadState::Ready));
    assert!(loader.is_warm("7/inventory"));
}

#[test]
fn failed_load_reports_failure_and_stays_cold() {
    let mut loader = ModuleLoader::new();
    let ticket = loader.begin("7/inventory");
    assert_eq!(
        loader.finish(&ticket, Err("network down".into())),
        Some(LoadState::Failed("network down".into()))
    );
    assert!(!loader.is_warm("7/inventory"));

    // a retry is a fresh attempt and can still succeed
    let retry = loader.begin("7/inventory");
    assert_eq!(loader.finish(&retry, Ok(())), Some(LoadState::Ready));
    assert!(loader.is_warm("7/inventory"));
}

#[test]
fn stale_ticket_cannot_resurrect_after_retry() {
    let mut loader = ModuleLoader::new();
    let stale = loader.begin("7/inventory");
    let fresh = loader.begin("7/inventory");

    // late failure from the superseded attempt is ignored
    assert_eq!(loader.finish(&stale, Err("timeout".into())), None);
    assert_eq!(loader.finish(&fresh, Ok(())), Some(LoadState::Ready));
}
