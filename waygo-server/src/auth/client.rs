//! DummyJSON auth client.

use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use super::error::{AuthError, GENERIC_FAILURE};
use super::session::{CreatedUser, LoginResponse, NewUser};
use super::validate::Credentials;

/// Default base URL for the mock user API.
const DEFAULT_BASE_URL: &str = "https://dummyjson.com";

/// Remote account service.
#[async_trait]
pub trait AuthApi: Send + Sync {
    /// `POST /auth/login`.
    async fn login(&self, credentials: &Credentials) -> Result<LoginResponse, AuthError>;

    /// `POST /users/add`.
    async fn add_user(&self, user: &NewUser) -> Result<CreatedUser, AuthError>;
}

/// Configuration for the auth client.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Base URL for the API
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 30,
        }
    }
}

impl AuthConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// HTTP client for the account service.
#[derive(Debug, Clone)]
pub struct AuthClient {
    http: reqwest::Client,
    base_url: String,
}

impl AuthClient {
    pub fn new(config: AuthConfig) -> Result<Self, AuthError> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// POST a JSON body to `{base_url}/{path}` and decode the reply.
    async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, AuthError>
    where
        B: Serialize + Sync,
        T: DeserializeOwned,
    {
        let url = format!("{}/{}", self.base_url, path);
        debug!(%url, "auth request");

        let response = self.http.post(&url).json(body).send().await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            return Err(AuthError::Rejected {
                status: status.as_u16(),
                message: rejection_message(&text),
            });
        }

        serde_json::from_str(&text).map_err(|e| AuthError::Json {
            message: e.to_string(),
        })
    }
}

/// The `message` field of an error body, or a generic message.
fn rejection_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| {
            v.get("message")
                .and_then(|m| m.as_str())
                .filter(|m| !m.is_empty())
                .map(String::from)
        })
        .unwrap_or_else(|| GENERIC_FAILURE.to_string())
}

#[async_trait]
impl AuthApi for AuthClient {
    async fn login(&self, credentials: &Credentials) -> Result<LoginResponse, AuthError> {
        let body = Credentials {
            username: credentials.username.trim().to_string(),
            password: credentials.password.clone(),
        };
        self.post_json("auth/login", &body).await
    }

    async fn add_user(&self, user: &NewUser) -> Result<CreatedUser, AuthError> {
        self.post_json("users/add", user).await
    }
}
