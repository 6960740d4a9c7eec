//! Client core for the eventos admin backend.
//!
//! The library owns the cross-platform session lifecycle (credential
//! persistence, restore, login/logout, forced sign-out on token
//! rejection), the authorized request pipeline, and protected event
//! image retrieval with local caching and placeholder fallback.
//! Presentation layers (CLI, browser, mobile shells) sit on top of
//! [`EventosClient`] and the session subscription it exposes.

pub mod api;
pub mod config;
pub mod credentials;
pub mod error;
pub mod resource;
pub mod session;

use std::sync::Arc;

use api::{ApiClient, AuthApi};
use config::ClientConfig;
use credentials::CredentialStore;
use resource::ResourceFetcher;
use session::SessionService;

pub use error::{ClientError, Result};

/// Wired-up client: one session, one HTTP pipeline, one image fetcher,
/// all sharing the same configuration and connection pool.
pub struct EventosClient {
    session: Arc<SessionService>,
    api: Arc<ApiClient>,
    images: ResourceFetcher,
}

impl EventosClient {
    /// Build the client against the given store and configuration.
    pub fn new(config: ClientConfig, store: Arc<dyn CredentialStore>) -> Result<Self> {
        let http = config.build_http_client()?;

        let auth = AuthApi::new(http.clone(), config.clone());
        let session = Arc::new(SessionService::new(store, auth));
        let api = Arc::new(ApiClient::new(http, config, session.clone()));
        let images = ResourceFetcher::new(api.clone());

        Ok(Self {
            session,
            api,
            images,
        })
    }

    /// The process-wide session.
    pub fn session(&self) -> &Arc<SessionService> {
        &self.session
    }

    /// The authenticated API surface.
    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    /// The image fetcher.
    pub fn images(&self) -> &ResourceFetcher {
        &self.images
    }
}
