//! External Auth Service contract and its HTTP client.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use societyhub_core::{Role, SocietyId, UserId, UserProfile};

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: Role,
    pub society_id: SocietyId,
}

/// Successful login response from the Auth Service.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub token: String,
    pub token_type: String,
    pub expires_in: i64,
    pub user_id: UserId,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub society_id: SocietyId,
    pub society_name: String,
}

impl LoginResponse {
    /// The profile the session will hold for this login.
    pub fn profile(&self) -> UserProfile {
        UserProfile {
            id: self.user_id,
            name: self.name.clone(),
            email: self.email.clone(),
            role: self.role.clone(),
            society_id: self.society_id,
            society_name: self.society_name.clone(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct RegisterResponse {
    pub message: String,
}

#[derive(Debug, Error)]
pub enum AuthApiError {
    #[error("network error: {0}")]
    Network(String),

    #[error("{message}")]
    Rejected { status: u16, message: String },
}

impl AuthApiError {
    /// Server-supplied message when there is one, otherwise `fallback`.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            AuthApiError::Rejected { message, .. } if !message.is_empty() => message.clone(),
            _ => fallback.to_string(),
        }
    }
}

/// The external authentication collaborator.
///
/// Opaque async calls; this layer never retries, the form layer decides
/// whether the user gets to try again.
#[async_trait]
pub trait AuthApi: Send + Sync {
    async fn login(&self, credentials: &LoginRequest) -> Result<LoginResponse, AuthApiError>;

    async fn register(&self, user: &RegisterRequest) -> Result<RegisterResponse, AuthApiError>;
}

/// HTTP implementation against the society management REST API.
pub struct HttpAuthApi {
    base_url: String,
    client: reqwest::Client,
}

impl HttpAuthApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            client: reqwest::Client::new(),
        }
    }

    async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, AuthApiError>
    where
        B: Serialize + Sync,
        T: serde::de::DeserializeOwned,
    {
        let url = format!("{}{path}", self.base_url);
        let resp = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| AuthApiError::Network(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            // The API reports failures as {"message": "..."}.
            let message = resp
                .json::<ErrorBody>()
                .await
                .map(|b| b.message)
                .unwrap_or_default();
            return Err(AuthApiError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        resp.json::<T>()
            .await
            .map_err(|e| AuthApiError::Network(e.to_string()))
    }
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: String,
}

#[async_trait]
impl AuthApi for HttpAuthApi {
    async fn login(&self, credentials: &LoginRequest) -> Result<LoginResponse, AuthApiError> {
        self.post_json("/api/auth/login", credentials).await
    }

    async fn register(&self, user: &RegisterRequest) -> Result<RegisterResponse, AuthApiError> {
        self.post_json("/api/auth/register", user).await
    }
}
