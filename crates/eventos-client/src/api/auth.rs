//! Unauthenticated auth endpoints (login, register).
//!
//! These calls never carry a bearer header, and a 401/403 here means bad
//! credentials, not session expiry; it must not touch session state.

use reqwest::Client;
use tracing::debug;

use super::models::{ApiErrorBody, LoginRequest, LoginResponse, RegisterRequest};
use crate::config::ClientConfig;
use crate::credentials::AdminProfile;
use crate::error::{ClientError, Result};

/// Extract the backend's error message from a failed response body.
pub(crate) async fn error_message(response: reqwest::Response) -> String {
    let status = response.status();
    response
        .json::<ApiErrorBody>()
        .await
        .ok()
        .and_then(ApiErrorBody::into_message)
        .unwrap_or_else(|| status.to_string())
}

/// HTTP gateway for the `/auth` surface.
#[derive(Clone)]
pub struct AuthApi {
    http: Client,
    config: ClientConfig,
}

impl AuthApi {
    pub fn new(http: Client, config: ClientConfig) -> Self {
        Self { http, config }
    }

    /// `POST /auth/login`. Rejections surface as `InvalidCredentials`.
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResponse> {
        let url = self.config.join("/auth/login")?;
        let body = LoginRequest {
            email: email.to_owned(),
            password: password.to_owned(),
        };

        debug!(%url, email, "Dispatching login");
        let response = self.http.post(url).json(&body).send().await?;
        let status = response.status();

        if status.is_success() {
            return Ok(response.json().await?);
        }

        let message = error_message(response).await;
        if ClientError::is_auth_rejection(status) {
            Err(ClientError::InvalidCredentials(message))
        } else {
            Err(ClientError::Api { status, message })
        }
    }

    /// `POST /auth/register`. Returns the created administrator profile.
    pub async fn register(&self, name: &str, email: &str, password: &str) -> Result<AdminProfile> {
        let url = self.config.join("/auth/register")?;
        let body = RegisterRequest {
            name: name.to_owned(),
            email: email.to_owned(),
            password: password.to_owned(),
        };

        let response = self.http.post(url).json(&body).send().await?;
        let status = response.status();

        if status.is_success() {
            return Ok(response.json().await?);
        }

        let message = error_message(response).await;
        Err(ClientError::Api { status, message })
    }
}
