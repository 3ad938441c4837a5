//! Dynamic app resolver.
//!
//! Given an app id and the trailing sub-path of the navigation, pick the UI
//! module to mount. Selection is strictly first-match-wins in registration
//! order; an unmatched sub-path degrades to the app's landing module rather
//! than erroring, so stale deep links stay usable.

use super::pattern::PathParams;
use super::registry::{AppModule, AppRegistry};

/// Outcome of resolving `(app_id, sub_path)` against the registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// A module was selected, with any captured route parameters.
    Module {
        module: AppModule,
        params: PathParams,
    },
    /// The app id is not in the registry.
    UnknownApp {
        requested: String,
        known: Vec<&'static str>,
    },
}

/// Select the module to render for an app navigation.
pub fn resolve(registry: &AppRegistry, app_id: &str, sub_path: &str) -> Resolution {
    let Some(entry) = registry.lookup(app_id) else {
        return Resolution::UnknownApp {
            requested: app_id.to_string(),
            known: registry.known_ids(),
        };
    };

    if sub_path.is_empty() {
        return Resolution::Module {
            module: entry.main,
            params: PathParams::default(),
        };
    }

    for (pattern, module) in &entry.routes {
        if let Some(params) = pattern.matches(sub_path) {
            return Resolution::Module {
                module: *module,
                params,
            };
        }
    }

    // no sub-route matched: fall back to the landing module
    Resolution::Module {
        module: entry.main,
        params: PathParams::default(),
    }
}

#[cfg(test)]
mod tests;
