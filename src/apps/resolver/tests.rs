use super::*;
use crate::apps::pattern::PathPattern;
use crate::apps::registry::AppEntry;

fn registry() -> AppRegistry {
    AppRegistry::builtin()
}

#[test]
fn empty_sub_path_selects_the_landing_module() {
    let resolution = resolve(&registry(), "multi_control", "");
    assert_eq!(
        resolution,
        Resolution::Module {
            module: AppModule::MultiControlFields,
            params: PathParams::default(),
        }
    );
}

#[test]
fn literal_sub_routes_select_their_modules() {
    match resolve(&registry(), "multi_control", "equipment") {
        Resolution::Module { module, .. } => assert_eq!(module, AppModule::MultiControlEquipment),
        other => panic!("unexpected resolution: {:?}", other),
    }
    match resolve(&registry(), "multi_control", "alerts") {
        Resolution::Module { module, .. } => assert_eq!(module, AppModule::MultiControlAlerts),
        other => panic!("unexpected resolution: {:?}", other),
    }
}

#[test]
fn param_route_captures_the_field_id() {
    match resolve(&registry(), "multi_control", "field-42") {
        Resolution::Module { module, params } => {
            assert_eq!(module, AppModule::MultiControlFieldDashboard);
            assert_eq!(params.get("field_id"), Some("field-42"));
        }
        other => panic!("unexpected resolution: {:?}", other),
    }
}

#[test]
fn first_match_wins_over_a_later_param_route() {
    // "equipment" is registered before ":field_id", which would also match
    match resolve(&registry(), "multi_control", "equipment") {
        Resolution::Module { module, params } => {
            assert_eq!(module, AppModule::MultiControlEquipment);
            assert!(params.is_empty());
        }
        other => panic!("unexpected resolution: {:?}", other),
    }

    // a registry with the opposite order must give the opposite answer:
    // ordering is a contract, not an accident of iteration
    let reversed = AppRegistry::with_entries(vec![AppEntry {
        id: "multi_control",
        main: AppModule::MultiControlFields,
        routes: vec![
            (
                PathPattern::compile(":field_id"),
                AppModule::MultiControlFieldDashboard,
            ),
            (
                PathPattern::compile("equipment"),
                AppModule::MultiControlEquipment,
            ),
        ],
    }]);
    match resolve(&reversed, "multi_control", "equipment") {
        Resolution::Module { module, params } => {
            assert_eq!(module, AppModule::MultiControlFieldDashboard);
            assert_eq!(params.get("field_id"), Some("equipment"));
        }
        other => panic!("unexpected resolution: {:?}", other),
    }
}

#[test]
fn unmatched_sub_path_falls_back_to_the_landing_module() {
    match resolve(&registry(), "multi_control", "no/such/view") {
        Resolution::Module { module, params } => {
            assert_eq!(module, AppModule::MultiControlFields);
            assert!(params.is_empty());
        }
        other => panic!("unexpected resolution: {:?}", other),
    }
    // apps without sub-routes always land on main
    match resolve(&registry(), "task_manager", "anything") {
        Resolution::Module { module, .. } => assert_eq!(module, AppModule::TaskManager),
        other => panic!("unexpected resolution: {:?}", other),
    }
}

#[test]
fn unknown_app_reports_the_known_ids() {
    match resolve(&registry(), "unknown_app", "") {
        Resolution::UnknownApp { requested, known } => {
            assert_eq!(requested, "unknown_app");
            assert_eq!(known, vec!["task_manager", "multi_control", "inventory"]);
        }
        other => panic!("unexpected resolution: {:?}", other),
    }
}

#[test]
fn resolution_is_deterministic_and_idempotent() {
    let registry = registry();
    let first = resolve(&registry, "multi_control", "field-42");
    let second = resolve(&registry, "multi_control", "field-42");
    assert_eq!(first, second);
}
