//! Wire types for the eventos backend REST surface.
//!
//! Field names on the wire are the backend's Portuguese ones; the serde
//! renames keep the Rust side idiomatic.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::credentials::AdminProfile;

/// `POST /auth/login` request body.
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    #[serde(rename = "senha")]
    pub password: String,
}

/// `POST /auth/login` response body.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    #[serde(rename = "administrador")]
    pub profile: AdminProfile,
}

/// `POST /auth/register` request body.
#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    #[serde(rename = "nome")]
    pub name: String,
    pub email: String,
    #[serde(rename = "senha")]
    pub password: String,
}

/// An event owned by the authenticated administrator.
///
/// `image_ref` is either an absolute external URL or a backend-relative
/// protected path; resolution is the resource fetcher's job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: i64,
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "data")]
    pub date: NaiveDateTime,
    #[serde(rename = "localizacao")]
    pub location: String,
    #[serde(rename = "imagemUrl", default)]
    pub image_ref: Option<String>,
}

/// Body for `POST /eventos/url` (image supplied as a URL or stored path).
#[derive(Debug, Clone, Serialize)]
pub struct EventCreateRequest {
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "data")]
    pub date: NaiveDateTime,
    #[serde(rename = "localizacao")]
    pub location: String,
    #[serde(rename = "imagem", skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

/// Body for `PUT /eventos/{id}`. Only date and location are editable.
#[derive(Debug, Clone, Serialize)]
pub struct EventUpdateRequest {
    #[serde(rename = "data")]
    pub date: NaiveDateTime,
    #[serde(rename = "localizacao")]
    pub location: String,
}

/// Best-effort shape of backend error bodies.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl ApiErrorBody {
    /// Pick the most descriptive message available.
    pub fn into_message(self) -> Option<String> {
        self.message.or(self.error)
    }
}
