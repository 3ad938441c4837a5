//! Installed-app registry.
//!
//! Static table mapping stable app ids to UI modules and their sub-routes.
//! Built once at startup and never mutated; lookup of an unknown id is a
//! definitive `None`, distinct from any loading state, so the caller can
//! render a real "unknown app" view instead of a spinner.

use super::pattern::PathPattern;

/// The closed set of UI modules the registry can point at.
///
/// Dispatch always goes through this enum; there is no string-keyed dynamic
/// import anywhere, so a typo in an app id can only ever produce `None` at
/// lookup, never an arbitrary module.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AppModule {
    TaskManager,
    MultiControlFields,
    MultiControlEquipment,
    MultiControlAlerts,
    MultiControlFieldDashboard,
    Inventory,
}

impl AppModule {
    pub fn name(&self) -> &'static str {
        match self {
            AppModule::TaskManager => "task_manager",
            AppModule::MultiControlFields => "multi_control/fields",
            AppModule::MultiControlEquipment => "multi_control/equipment",
            AppModule::MultiControlAlerts => "multi_control/alerts",
            AppModule::MultiControlFieldDashboard => "multi_control/field_dashboard",
            AppModule::Inventory => "inventory",
        }
    }
}

/// One installable app: its landing module and ordered sub-routes.
#[derive(Debug, Clone)]
pub struct AppEntry {
    pub id: &'static str,
    pub main: AppModule,
    /// Registration order is match order; register more specific patterns
    /// before the general ones that would also match.
    pub routes: Vec<(PathPattern, AppModule)>,
}

/// The static app table.
#[derive(Debug, Clone)]
pub struct AppRegistry {
    entries: Vec<AppEntry>,
}

impl AppRegistry {
    /// Build a registry from explicit entries.
    pub fn with_entries(entries: Vec<AppEntry>) -> Self {
        Self { entries }
    }

    /// The apps this build of the panel knows how to mount.
    pub fn builtin() -> Self {
        Self {
            entries: vec![
                AppEntry {
                    id: "task_manager",
                    main: AppModule::TaskManager,
                    routes: Vec::new(),
                },
                AppEntry {
                    id: "multi_control",
                    main: AppModule::MultiControlFields,
                    routes: vec![
                        (
                            PathPattern::compile("equipment"),
                            AppModule::MultiControlEquipment,
                        ),
                        (
                            PathPattern::compile("alerts"),
                            AppModule::MultiControlAlerts,
                        ),
                        // the parameter route must stay last: it would
                        // otherwise swallow the literal routes above
                        (
                            PathPattern::compile(":field_id"),
                            AppModule::MultiControlFieldDashboard,
                        ),
                    ],
                },
                AppEntry {
                    id: "inventory",
                    main: AppModule::Inventory,
                    routes: Vec::new(),
                },
            ],
        }
    }

    /// Look up an app by id. `None` is a definitive not-found.
    pub fn lookup(&self, app_id: &str) -> Option<&AppEntry> {
        self.entries.iter().find(|entry| entry.id == app_id)
    }

    /// All registered ids, for diagnostics.
    pub fn known_ids(&self) -> Vec<&'static str> {
        self.entries.iter().map(|entry| entry.id).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_ids_are_unique() {
        let registry = AppRegistry::builtin();
        let mut ids = registry.known_ids();
        ids.sort_unstable();
        let before = ids.len();
        ids.dedup();
        assert_eq!(ids.len(), before);
    }

    #[test]
    fn lookup_finds_registered_apps() {
        let registry = AppRegistry::builtin();
        let entry = registry.lookup("multi_control").unwrap();
        assert_eq!(entry.main, AppModule::MultiControlFields);
        assert_eq!(entry.routes.len(), 3);
        assert!(registry.lookup("task_manager").is_some());
        assert!(registry.lookup("inventory").is_some());
    }

    #[test]
    fn lookup_of_unknown_id_is_none() {
        let registry = AppRegistry::builtin();
        assert!(registry.lookup("unknown_app").is_none());
        assert!(registry.lookup("").is_none());
    }
}
