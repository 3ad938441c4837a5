//! Authentication and session state.
//!
//! Holds the one authoritative copy of "who is signed in" and exposes it to
//! the rest of the app as signals. Views never mutate session fields; they
//! go through `login`/`logout`/`invalidate` here.
//!
//! The stored record is re-validated structurally whenever it is read back:
//! a session with no role, or a tenant session with no account id, is
//! treated as corrupt and cleared so it cannot fail validation again on the
//! next navigation.

use leptos::prelude::*;

use atrium_shared::{LoginRequest, Role, UserInfo};

use crate::api::{AdminApi, ApiError};
use crate::web::SessionStore;
use crate::web::guard::SessionSnapshot;

pub const STORAGE_TOKEN_KEY: &str = "atrium_access_token";
pub const STORAGE_USER_KEY: &str = "atrium_user_info";

// =========================================================
// State & context
// =========================================================

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AuthState {
    pub is_authenticated: bool,
    /// True until the stored session has been checked once.
    pub is_loading: bool,
    pub user: Option<UserInfo>,
}

/// Shared auth context: read and write signals over [`AuthState`].
#[derive(Clone, Copy)]
pub struct AuthContext {
    pub state: ReadSignal<AuthState>,
    pub set_state: WriteSignal<AuthState>,
}

impl AuthContext {
    pub fn new() -> Self {
        let (state, set_state) = signal(AuthState {
            is_loading: true,
            ..Default::default()
        });
        Self { state, set_state }
    }

    /// The read-only session view consumed by the route gate and loader.
    pub fn snapshot_signal(&self) -> Signal<SessionSnapshot> {
        let state = self.state;
        Signal::derive(move || {
            let s = state.get();
            SessionSnapshot {
                loading: s.is_loading,
                authenticated: s.is_authenticated,
                role: s.user.as_ref().map(|u| u.role),
                account_id: s.user.as_ref().and_then(|u| u.account_id.clone()),
            }
        })
    }
}

pub fn use_auth() -> AuthContext {
    use_context::<AuthContext>().expect("AuthContext not found in context")
}

// =========================================================
// Session restore
// =========================================================

/// Outcome of reading the stored session back.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionRestore {
    Authenticated(UserInfo),
    /// Nothing stored; a normal signed-out state.
    Anonymous,
    /// A record exists but fails structural validation; it must be cleared.
    Corrupt,
}

/// Decide what a stored `(token, user record)` pair amounts to.
///
/// Fails closed: any parse error counts as a corrupt session, never as an
/// authenticated one.
pub fn restore_from(token: Option<String>, raw_user: Option<String>) -> SessionRestore {
    let Some(token) = token else {
        return SessionRestore::Anonymous;
    };
    if token.is_empty() {
        return SessionRestore::Anonymous;
    }
    // a token without a user record is half a session
    let Some(raw) = raw_user else {
        return SessionRestore::Corrupt;
    };
    match serde_json_wasm::from_str::<UserInfo>(&raw) {
        Ok(user) if user_is_structurally_valid(&user) => SessionRestore::Authenticated(user),
        _ => SessionRestore::Corrupt,
    }
}

/// Invariant: tenant roles must carry a non-empty account id.
pub fn user_is_structurally_valid(user: &UserInfo) -> bool {
    user.role.is_platform_admin()
        || user
            .account_id
            .as_deref()
            .is_some_and(|id| !id.is_empty())
}

/// Check the stored session once at startup and leave the loading state.
pub fn init_auth(ctx: &AuthContext) {
    match restore_from(
        SessionStore::get(STORAGE_TOKEN_KEY),
        SessionStore::get(STORAGE_USER_KEY),
    ) {
        SessionRestore::Authenticated(user) => {
            ctx.set_state.update(|state| {
                state.is_authenticated = true;
                state.is_loading = false;
                state.user = Some(user);
            });
        }
        SessionRestore::Anonymous => {
            ctx.set_state.update(|state| {
                *state = AuthState::default();
            });
        }
        SessionRestore::Corrupt => {
            web_sys::console::warn_1(&"[Auth] stored session failed validation, clearing".into());
            clear_session_storage();
            ctx.set_state.update(|state| {
                *state = AuthState::default();
            });
        }
    }
}

// =========================================================
// Operations
// =========================================================

/// Sign in and persist the session for this tab.
pub async fn login(
    ctx: &AuthContext,
    api: &AdminApi,
    email: String,
    password: String,
) -> Result<UserInfo, ApiError> {
    let response = api.login(&LoginRequest { email, password }).await?;

    SessionStore::set(STORAGE_TOKEN_KEY, &response.access_token);
    match serde_json_wasm::to_string(&response.user) {
        Ok(raw) => {
            SessionStore::set(STORAGE_USER_KEY, &raw);
        }
        Err(e) => {
            // the in-memory session still works; only the reload path is lost
            web_sys::console::warn_1(&format!("[Auth] could not persist user info: {}", e).into());
        }
    }

    let user = response.user;
    ctx.set_state.update(|state| {
        state.is_authenticated = true;
        state.is_loading = false;
        state.user = Some(user.clone());
    });
    Ok(user)
}

/// Sign out. The backend call is best effort; the local session dies either
/// way, and the router's auth effect handles the redirect.
pub async fn logout(ctx: &AuthContext, api: &AdminApi) {
    if let Err(e) = api.logout().await {
        web_sys::console::warn_1(&format!("[Auth] logout request failed: {}", e).into());
    }
    invalidate(ctx);
}

/// Clear the stored session record and drop to anonymous.
///
/// Also the gate's escape hatch for corrupt sessions discovered mid-flight.
pub fn invalidate(ctx: &AuthContext) {
    clear_session_storage();
    ctx.set_state.update(|state| {
        *state = AuthState::default();
    });
}

fn clear_session_storage() {
    SessionStore::delete(STORAGE_TOKEN_KEY);
    SessionStore::delete(STORAGE_USER_KEY);
}

// =========================================================
// Permission helpers
// =========================================================

pub fn can_manage_users(user: &UserInfo) -> bool {
    user.role.is_platform_admin() || user.role == Role::AccountAdmin
}

pub fn can_manage_apps(user: &UserInfo) -> bool {
    user.role.is_platform_admin() || user.role == Role::AccountAdmin
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw_user(role: &str, account_id: Option<&str>) -> String {
        match account_id {
            Some(id) => format!(
                r#"{{"id":"u-1","email":"a@b.c","name":"A","role":"{}","account_id":"{}"}}"#,
                role, id
            ),
            None => format!(
                r#"{{"id":"u-1","email":"a@b.c","name":"A","role":"{}"}}"#,
                role
            ),
        }
    }

    #[test]
    fn missing_token_is_anonymous_even_with_a_user_record() {
        let restore = restore_from(None, Some(raw_user("admin", None)));
        assert_eq!(restore, SessionRestore::Anonymous);
        assert_eq!(restore_from(Some(String::new()), None), SessionRestore::Anonymous);
    }

    #[test]
    fn valid_sessions_restore() {
        match restore_from(Some("tok".into()), Some(raw_user("master_admin", None))) {
            SessionRestore::Authenticated(user) => {
                assert_eq!(user.role, Role::MasterAdmin);
                assert_eq!(user.account_id, None);
            }
            other => panic!("unexpected restore: {:?}", other),
        }
        match restore_from(Some("tok".into()), Some(raw_user("user", Some("7")))) {
            SessionRestore::Authenticated(user) => {
                assert_eq!(user.role, Role::User);
                assert_eq!(user.account_id.as_deref(), Some("7"));
            }
            other => panic!("unexpected restore: {:?}", other),
        }
    }

    #[test]
    fn tenant_session_without_account_is_corrupt() {
        let restore = restore_from(Some("tok".into()), Some(raw_user("account_admin", None)));
        assert_eq!(restore, SessionRestore::Corrupt);
        let restore = restore_from(Some("tok".into()), Some(raw_user("user", Some(""))));
        assert_eq!(restore, SessionRestore::Corrupt);
    }

    #[test]
    fn malformed_records_are_corrupt() {
        assert_eq!(
            restore_from(Some("tok".into()), Some("{not json".into())),
            SessionRestore::Corrupt
        );
        assert_eq!(
            restore_from(Some("tok".into()), Some(raw_user("superuser", None))),
            SessionRestore::Corrupt
        );
        // token with no record at all
        assert_eq!(restore_from(Some("tok".into()), None), SessionRestore::Corrupt);
    }

    #[test]
    fn permission_helpers_follow_roles() {
        let admin = UserInfo {
            id: "1".into(),
            email: "a@b.c".into(),
            name: "A".into(),
            role: Role::Admin,
            account_id: None,
        };
        let member = UserInfo {
            role: Role::User,
            account_id: Some("7".into()),
            ..admin.clone()
        };
        let account_admin = UserInfo {
            role: Role::AccountAdmin,
            ..member.clone()
        };

        assert!(can_manage_users(&admin));
        assert!(can_manage_users(&account_admin));
        assert!(!can_manage_users(&member));
        assert!(can_manage_apps(&account_admin));
        assert!(!can_manage_apps(&member));
    }
}
