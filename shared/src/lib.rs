use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

// =========================================================
// Constants
// =========================================================

pub const HEADER_AUTHORIZATION: &str = "Authorization";
pub const BEARER_PREFIX: &str = "Bearer ";

// =========================================================
// Roles
// =========================================================

/// User roles, ordered from widest to narrowest authority.
///
/// `MasterAdmin` and `Admin` are platform-level operators and are not bound
/// to a single account. `AccountAdmin` and `User` always belong to exactly
/// one account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    MasterAdmin,
    Admin,
    AccountAdmin,
    User,
}

impl Role {
    /// Platform admins operate across all accounts.
    pub fn is_platform_admin(&self) -> bool {
        matches!(self, Role::MasterAdmin | Role::Admin)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::MasterAdmin => "master_admin",
            Role::Admin => "admin",
            Role::AccountAdmin => "account_admin",
            Role::User => "user",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// =========================================================
// Session / auth payloads
// =========================================================

/// The user record carried by a session.
///
/// `account_id` is `None` for platform admins. Tenant roles must carry one;
/// the frontend treats a tenant session without an account id as corrupt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserInfo {
    #[serde(deserialize_with = "de_id")]
    pub id: String,
    pub email: String,
    pub name: String,
    pub role: Role,
    #[serde(default, deserialize_with = "de_opt_id")]
    pub account_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub user: UserInfo,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshResponse {
    pub access_token: String,
}

/// Error body shape returned by the backend on non-2xx responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorBody {
    pub error: String,
}

// =========================================================
// Accounts & users
// =========================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    #[serde(deserialize_with = "de_id")]
    pub id: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateAccountRequest {
    pub name: String,
    pub admin_email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateAccountRequest {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountUser {
    #[serde(deserialize_with = "de_id")]
    pub id: String,
    pub email: String,
    pub name: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUserRequest {
    pub email: String,
    pub name: String,
    pub role: Role,
    pub password: String,
}

// =========================================================
// Installable apps
// =========================================================

/// A sub-application as listed by the marketplace endpoints.
///
/// Only `id` and `name` matter for routing; the rest is presentational.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppSummary {
    #[serde(deserialize_with = "de_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub icon_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstallAppRequest {
    pub app_id: String,
}

/// Per-account status of an installed app, fetched when the app is mounted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppStatus {
    pub app_id: String,
    pub installed: bool,
}

// =========================================================
// Serde helpers
// =========================================================

// Some backends serialize ids as JSON numbers, others as strings. Accept
// both and normalize to `String` so id comparisons stay uniform.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Number(i64),
}

impl RawId {
    fn into_string(self) -> String {
        match self {
            RawId::Text(s) => s,
            RawId::Number(n) => n.to_string(),
        }
    }
}

fn de_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    RawId::deserialize(deserializer).map(RawId::into_string)
}

fn de_opt_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<RawId>::deserialize(deserializer).map(|raw| raw.map(RawId::into_string))
}

// =========================================================
// Tests
// =========================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_serde_round_trip() {
        for role in [Role::MasterAdmin, Role::Admin, Role::AccountAdmin, Role::User] {
            let json = serde_json::to_string(&role).unwrap();
            assert_eq!(json, format!("\"{}\"", role.as_str()));
            let back: Role = serde_json::from_str(&json).unwrap();
            assert_eq!(back, role);
        }
    }

    #[test]
    fn platform_admin_classification() {
        assert!(Role::MasterAdmin.is_platform_admin());
        assert!(Role::Admin.is_platform_admin());
        assert!(!Role::AccountAdmin.is_platform_admin());
        assert!(!Role::User.is_platform_admin());
    }

    #[test]
    fn user_info_accepts_numeric_ids() {
        let raw = r#"{"id": 42, "email": "a@b.c", "name": "A", "role": "user", "account_id": 7}"#;
        let user: UserInfo = serde_json::from_str(raw).unwrap();
        assert_eq!(user.id, "42");
        assert_eq!(user.account_id.as_deref(), Some("7"));
    }

    #[test]
    fn user_info_accepts_string_ids_and_missing_account() {
        let raw = r#"{"id": "u-1", "email": "a@b.c", "name": "A", "role": "admin"}"#;
        let user: UserInfo = serde_json::from_str(raw).unwrap();
        assert_eq!(user.id, "u-1");
        assert_eq!(user.account_id, None);
        assert!(user.role.is_platform_admin());
    }

    #[test]
    fn unknown_role_is_rejected() {
        let raw = r#"{"id": "u-1", "email": "a@b.c", "name": "A", "role": "superuser"}"#;
        assert!(serde_json::from_str::<UserInfo>(raw).is_err());
    }
}
