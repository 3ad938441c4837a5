//! REST client for the panel backend.
//!
//! Wraps `gloo-net` with the two behaviors every caller relies on:
//! - the bearer credential from session storage is attached automatically;
//! - a 401 triggers exactly one transparent token refresh followed by one
//!   retry of the original request, after which the error surfaces.

use gloo_net::http::{Request, RequestBuilder, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;

use atrium_shared::{
    Account, AccountUser, ApiErrorBody, AppStatus, AppSummary, BEARER_PREFIX,
    CreateAccountRequest, CreateUserRequest, HEADER_AUTHORIZATION, InstallAppRequest,
    LoginRequest, LoginResponse, RefreshResponse, UpdateAccountRequest,
};

use crate::auth::STORAGE_TOKEN_KEY;
use crate::web::SessionStore;

/// Same-origin API mount point.
pub const DEFAULT_API_BASE: &str = "/api/v1";

// =========================================================
// Error type
// =========================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// The request could not be built or sent.
    Network(String),
    /// Non-2xx response, with the backend's message where available.
    Http { status: u16, message: String },
    /// JSON encode/decode failure on an otherwise successful exchange.
    Decode(String),
    /// Still unauthorized after the single refresh attempt.
    Unauthorized,
}

impl ApiError {
    fn network(source: impl ToString) -> Self {
        ApiError::Network(source.to_string())
    }

    fn decode(source: impl ToString) -> Self {
        ApiError::Decode(source.to_string())
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized)
    }
}

impl core::fmt::Display for ApiError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ApiError::Network(msg) => write!(f, "network error: {}", msg),
            ApiError::Http { status, message } => {
                write!(f, "request failed ({}): {}", status, message)
            }
            ApiError::Decode(msg) => write!(f, "invalid response payload: {}", msg),
            ApiError::Unauthorized => write!(f, "session expired, please sign in again"),
        }
    }
}

impl std::error::Error for ApiError {}

// =========================================================
// Request plumbing
// =========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Verb {
    Get,
    Post,
    Put,
    Delete,
}

impl Verb {
    fn builder(self, url: &str) -> RequestBuilder {
        match self {
            Verb::Get => Request::get(url),
            Verb::Post => Request::post(url),
            Verb::Put => Request::put(url),
            Verb::Delete => Request::delete(url),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AdminApi {
    base_url: String,
}

impl AdminApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { base_url }
    }

    fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    fn authorized(builder: RequestBuilder) -> RequestBuilder {
        match SessionStore::get(STORAGE_TOKEN_KEY) {
            Some(token) if !token.is_empty() => builder.header(
                HEADER_AUTHORIZATION,
                &format!("{}{}", BEARER_PREFIX, token),
            ),
            _ => builder,
        }
    }

    async fn send_once(
        &self,
        verb: Verb,
        path: &str,
        body: Option<&str>,
    ) -> Result<Response, ApiError> {
        let url = self.url(path);
        let builder = Self::authorized(
            verb.builder(&url)
                .credentials(web_sys::RequestCredentials::Include),
        );

        let result = match body {
            Some(json) => builder
                .header("Content-Type", "application/json")
                .body(json.to_string())
                .map_err(ApiError::network)?
                .send()
                .await,
            None => builder.send().await,
        };
        result.map_err(ApiError::network)
    }

    /// Send a request, refreshing the access token at most once on a 401.
    ///
    /// Auth endpoints are exempt: a rejected login or refresh must not
    /// trigger another refresh.
    async fn request(
        &self,
        verb: Verb,
        path: &str,
        body: Option<String>,
    ) -> Result<Response, ApiError> {
        let response = self.send_once(verb, path, body.as_deref()).await?;
        if response.status() != 401 || path.starts_with("/auth/") {
            return Ok(response);
        }

        web_sys::console::log_1(&"[Api] access token rejected, attempting one refresh".into());
        self.refresh().await?;
        self.send_once(verb, path, body.as_deref()).await
    }

    async fn refresh(&self) -> Result<(), ApiError> {
        let response = self.send_once(Verb::Post, "/auth/refresh", None).await?;
        if !response.ok() {
            return Err(ApiError::Unauthorized);
        }
        let payload: RefreshResponse = response.json().await.map_err(ApiError::decode)?;
        SessionStore::set(STORAGE_TOKEN_KEY, &payload.access_token);
        Ok(())
    }

    async fn error_from(response: Response) -> ApiError {
        let status = response.status();
        let message = match response.json::<ApiErrorBody>().await {
            Ok(body) => body.error,
            Err(_) => response.status_text(),
        };
        if status == 401 {
            ApiError::Unauthorized
        } else {
            ApiError::Http { status, message }
        }
    }

    async fn expect_json<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
        if !response.ok() {
            return Err(Self::error_from(response).await);
        }
        response.json::<T>().await.map_err(ApiError::decode)
    }

    async fn expect_ok(response: Response) -> Result<(), ApiError> {
        if !response.ok() {
            return Err(Self::error_from(response).await);
        }
        Ok(())
    }

    fn encode<B: Serialize>(body: &B) -> Result<String, ApiError> {
        serde_json_wasm::to_string(body).map_err(ApiError::decode)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let response = self.request(Verb::Get, path, None).await?;
        Self::expect_json(response).await
    }

    async fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let response = self
            .request(Verb::Post, path, Some(Self::encode(body)?))
            .await?;
        Self::expect_json(response).await
    }

    async fn post_unit<B: Serialize>(&self, path: &str, body: &B) -> Result<(), ApiError> {
        let response = self
            .request(Verb::Post, path, Some(Self::encode(body)?))
            .await?;
        Self::expect_ok(response).await
    }

    async fn put_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let response = self
            .request(Verb::Put, path, Some(Self::encode(body)?))
            .await?;
        Self::expect_json(response).await
    }

    async fn delete_unit(&self, path: &str) -> Result<(), ApiError> {
        let response = self.request(Verb::Delete, path, None).await?;
        Self::expect_ok(response).await
    }

    // =========================================================
    // Auth
    // =========================================================

    pub async fn login(&self, request: &LoginRequest) -> Result<LoginResponse, ApiError> {
        self.post_json("/auth/login", request).await
    }

    pub async fn logout(&self) -> Result<(), ApiError> {
        let response = self.request(Verb::Post, "/auth/logout", None).await?;
        Self::expect_ok(response).await
    }

    // =========================================================
    // Accounts
    // =========================================================

    pub async fn get_accounts(&self) -> Result<Vec<Account>, ApiError> {
        self.get_json("/accounts").await
    }

    pub async fn get_account(&self, account_id: &str) -> Result<Account, ApiError> {
        self.get_json(&format!("/admin/accounts/{}", account_id)).await
    }

    pub async fn create_account(
        &self,
        request: &CreateAccountRequest,
    ) -> Result<Account, ApiError> {
        self.post_json("/accounts", request).await
    }

    pub async fn update_account(
        &self,
        account_id: &str,
        request: &UpdateAccountRequest,
    ) -> Result<Account, ApiError> {
        self.put_json(&format!("/accounts/{}", account_id), request).await
    }

    pub async fn delete_account(&self, account_id: &str) -> Result<(), ApiError> {
        self.delete_unit(&format!("/accounts/{}", account_id)).await
    }

    // =========================================================
    // Account users
    // =========================================================

    pub async fn get_account_users(&self, account_id: &str) -> Result<Vec<AccountUser>, ApiError> {
        self.get_json(&format!("/accounts/{}/users", account_id)).await
    }

    pub async fn create_account_user(
        &self,
        account_id: &str,
        request: &CreateUserRequest,
    ) -> Result<AccountUser, ApiError> {
        self.post_json(&format!("/accounts/{}/users", account_id), request)
            .await
    }

    pub async fn delete_account_user(
        &self,
        account_id: &str,
        user_id: &str,
    ) -> Result<(), ApiError> {
        self.delete_unit(&format!("/accounts/{}/users/{}", account_id, user_id))
            .await
    }

    // =========================================================
    // App marketplace
    // =========================================================

    pub async fn list_available_apps(&self) -> Result<Vec<AppSummary>, ApiError> {
        self.get_json("/admin/apps").await
    }

    pub async fn list_installed_apps(
        &self,
        account_id: &str,
    ) -> Result<Vec<AppSummary>, ApiError> {
        self.get_json(&format!("/admin/accounts/{}/apps/installed", account_id))
            .await
    }

    pub async fn install_app(&self, account_id: &str, app_id: &str) -> Result<(), ApiError> {
        let body = InstallAppRequest {
            app_id: app_id.to_string(),
        };
        self.post_unit(&format!("/admin/accounts/{}/apps/install", account_id), &body)
            .await
    }

    pub async fn uninstall_app(&self, account_id: &str, app_id: &str) -> Result<(), ApiError> {
        let body = InstallAppRequest {
            app_id: app_id.to_string(),
        };
        self.post_unit(
            &format!("/admin/accounts/{}/apps/uninstall", account_id),
            &body,
        )
        .await
    }

    /// Per-account bootstrap of a mounted app; the loader calls this once
    /// per app and account before first render.
    pub async fn get_app_status(
        &self,
        account_id: &str,
        app_id: &str,
    ) -> Result<AppStatus, ApiError> {
        self.get_json(&format!(
            "/admin/accounts/{}/apps/{}/status",
            account_id, app_id
        ))
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_is_normalized() {
        let api = AdminApi::new("https://panel.example.com/api/");
        assert_eq!(api.url("/accounts"), "https://panel.example.com/api/accounts");
        assert_eq!(api.url("accounts"), "https://panel.example.com/api/accounts");

        let relative = AdminApi::new(DEFAULT_API_BASE);
        assert_eq!(relative.url("/auth/login"), "/api/v1/auth/login");
    }

    #[test]
    fn error_display_keeps_backend_message() {
        let error = ApiError::Http {
            status: 403,
            message: "You do not have permission to install apps.".into(),
        };
        assert_eq!(
            error.to_string(),
            "request failed (403): You do not have permission to install apps."
        );
        assert!(!error.is_unauthorized());
        assert!(ApiError::Unauthorized.is_unauthorized());
    }
}
