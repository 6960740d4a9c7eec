//! In-process mock backend for integration tests.
//!
//! Serves just enough of the eventos REST surface: login with fixed
//! credentials, a protected event list, protected image bytes, and a
//! slow image route for cancellation tests. Tokens can be revoked at
//! runtime to simulate session expiry.

// Each integration binary uses a different subset of this module.
#![allow(dead_code)]

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use axum::Json;
use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use serde_json::{Value, json};

use eventos_client::credentials::{Credential, CredentialStore, MemoryCredentialStore};
use eventos_client::error::Result;

pub const ADMIN_EMAIL: &str = "ana@example.com";
pub const ADMIN_PASSWORD: &str = "segredo";
pub const VALID_TOKEN: &str = "token-abc-123";
pub const IMAGE_BYTES: &[u8] = b"\x89PNG-fake-image-bytes";

#[derive(Clone, Default)]
pub struct BackendState {
    /// Number of protected image fetches that reached the backend.
    pub image_requests: Arc<AtomicUsize>,
    /// Number of login attempts.
    pub login_requests: Arc<AtomicUsize>,
    /// When set, every protected route rejects the token with 401.
    pub revoked: Arc<AtomicBool>,
}

impl BackendState {
    pub fn revoke_tokens(&self) {
        self.revoked.store(true, Ordering::SeqCst);
    }

    pub fn image_request_count(&self) -> usize {
        self.image_requests.load(Ordering::SeqCst)
    }
}

fn authorized(state: &BackendState, headers: &HeaderMap) -> bool {
    if state.revoked.load(Ordering::SeqCst) {
        return false;
    }
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(|v| v == format!("Bearer {VALID_TOKEN}"))
        .unwrap_or(false)
}

fn unauthorized() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({"message": "Token inválido ou expirado"})),
    )
        .into_response()
}

async fn login(State(state): State<BackendState>, Json(body): Json<Value>) -> Response {
    state.login_requests.fetch_add(1, Ordering::SeqCst);

    if body["email"] == ADMIN_EMAIL && body["senha"] == ADMIN_PASSWORD {
        Json(json!({
            "token": VALID_TOKEN,
            "administrador": {"id": 1, "nome": "Ana", "email": ADMIN_EMAIL}
        }))
        .into_response()
    } else {
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({"message": "Credenciais inválidas"})),
        )
            .into_response()
    }
}

async fn list_events(
    State(state): State<BackendState>,
    Path(admin_id): Path<i64>,
    headers: HeaderMap,
) -> Response {
    if !authorized(&state, &headers) {
        return unauthorized();
    }

    Json(json!([
        {
            "id": 1,
            "nome": "Conferência",
            "data": "2026-09-01T19:30:00",
            "localizacao": "Rio de Janeiro",
            "imagemUrl": "https://cdn.example.com/a.jpg"
        },
        {
            "id": 2,
            "nome": format!("Meetup do admin {admin_id}"),
            "data": "2026-10-10T18:00:00",
            "localizacao": "São Paulo",
            "imagemUrl": "/eventos/2/imagem"
        }
    ]))
    .into_response()
}

async fn image(
    State(state): State<BackendState>,
    Path(id): Path<i64>,
    headers: HeaderMap,
) -> Response {
    state.image_requests.fetch_add(1, Ordering::SeqCst);

    if !authorized(&state, &headers) {
        return unauthorized();
    }
    // Id 500 simulates a backend-side failure.
    if id == 500 {
        return StatusCode::INTERNAL_SERVER_ERROR.into_response();
    }

    ([(header::CONTENT_TYPE, "image/png")], IMAGE_BYTES).into_response()
}

/// Reports the authorization header exactly as received, for asserting
/// what the client put on the wire.
async fn auth_echo(headers: HeaderMap) -> Response {
    let authorization = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok());
    Json(json!({"authorization": authorization})).into_response()
}

async fn slow_image(State(state): State<BackendState>, headers: HeaderMap) -> Response {
    state.image_requests.fetch_add(1, Ordering::SeqCst);

    if !authorized(&state, &headers) {
        return unauthorized();
    }

    tokio::time::sleep(std::time::Duration::from_secs(2)).await;
    ([(header::CONTENT_TYPE, "image/png")], IMAGE_BYTES).into_response()
}

/// Spawn the mock backend on an ephemeral port; returns its base URL.
pub async fn spawn_backend() -> (String, BackendState) {
    let state = BackendState::default();

    let app = axum::Router::new()
        .route("/auth/login", post(login))
        .route("/eventos/admin/{admin_id}", get(list_events))
        .route("/eventos/{id}/imagem", get(image))
        .route("/eventos/slow/imagem-lenta", get(slow_image))
        .route("/debug/auth", get(auth_echo))
        .with_state(state.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind mock backend");
    let addr = listener.local_addr().expect("local addr");

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("serve mock backend");
    });

    (format!("http://{addr}"), state)
}

/// Store wrapper counting `clear` calls, for burst sign-out assertions.
#[derive(Default)]
pub struct CountingStore {
    inner: MemoryCredentialStore,
    pub clear_calls: AtomicUsize,
}

impl CountingStore {
    pub fn clear_count(&self) -> usize {
        self.clear_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CredentialStore for CountingStore {
    async fn save(&self, credential: &Credential) -> Result<()> {
        self.inner.save(credential).await
    }

    async fn load(&self) -> Result<Option<Credential>> {
        self.inner.load().await
    }

    async fn clear(&self) -> Result<()> {
        self.clear_calls.fetch_add(1, Ordering::SeqCst);
        self.inner.clear().await
    }

    async fn save_remembered_email(&self, email: &str) -> Result<()> {
        self.inner.save_remembered_email(email).await
    }

    async fn load_remembered_email(&self) -> Result<Option<String>> {
        self.inner.load_remembered_email().await
    }

    async fn clear_remembered_email(&self) -> Result<()> {
        self.inner.clear_remembered_email().await
    }
}
