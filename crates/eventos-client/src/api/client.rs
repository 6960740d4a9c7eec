//! Authorized request pipeline.
//!
//! Every authenticated call goes through [`ApiClient::execute`], which
//! injects the bearer header at dispatch time and classifies the
//! response afterwards. The auth surface (`/auth/*`) never passes
//! through here; it has its own unauthenticated gateway, so a rejected
//! login can never look like session expiry.

use std::sync::Arc;

use reqwest::{Client, Method, RequestBuilder};
use tracing::{debug, warn};
use url::Url;

use super::auth::error_message;
use crate::config::ClientConfig;
use crate::error::{ClientError, Result};
use crate::session::SessionService;

/// Why a request is being made, tagged at dispatch time.
///
/// The guard keys its 401/403 handling off this tag rather than off URL
/// patterns: an image fetch that fails must stay a broken image, not a
/// global sign-out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestPurpose {
    /// Regular API traffic. An authorization failure here means the
    /// token is no longer valid and ends the session.
    Api,
    /// A protected resource (image) fetch. Authorization failures are
    /// contained at the call site.
    ResourceFetch,
}

/// Shared HTTP pipeline for the authenticated backend surface.
pub struct ApiClient {
    http: Client,
    config: ClientConfig,
    session: Arc<SessionService>,
}

impl ApiClient {
    pub fn new(http: Client, config: ClientConfig, session: Arc<SessionService>) -> Self {
        Self {
            http,
            config,
            session,
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn session(&self) -> &Arc<SessionService> {
        &self.session
    }

    /// Start a request against a backend-relative path.
    pub fn request(&self, method: Method, path: &str) -> Result<RequestBuilder> {
        let url = self.config.join(path)?;
        Ok(self.http.request(method, url))
    }

    /// Start a request against an already resolved URL.
    pub fn request_url(&self, method: Method, url: Url) -> RequestBuilder {
        self.http.request(method, url)
    }

    /// Attach the current bearer token, read from the session at this
    /// moment. Builders start without an authorization header, so when
    /// no token exists none is sent.
    fn authorize(&self, builder: RequestBuilder) -> RequestBuilder {
        match self.session.bearer_token() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Authorize, send, and guard a request.
    pub async fn execute(
        &self,
        builder: RequestBuilder,
        purpose: RequestPurpose,
    ) -> Result<reqwest::Response> {
        let response = self.authorize(builder).send().await?;
        self.guard(response, purpose).await
    }

    /// Classify a response. Success passes through unchanged; an
    /// authorization failure on regular API traffic invalidates the
    /// session exactly once per burst (the sign-out itself is
    /// idempotent).
    async fn guard(
        &self,
        response: reqwest::Response,
        purpose: RequestPurpose,
    ) -> Result<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        if ClientError::is_auth_rejection(status) {
            match purpose {
                RequestPurpose::ResourceFetch => {
                    debug!(%status, "Protected resource fetch rejected, containing");
                    let message = error_message(response).await;
                    return Err(ClientError::Api { status, message });
                }
                RequestPurpose::Api => {
                    warn!(%status, "Token rejected by backend, forcing sign-out");
                    self.session.force_sign_out().await;
                    return Err(ClientError::SessionExpired);
                }
            }
        }

        let message = error_message(response).await;
        Err(ClientError::Api { status, message })
    }
}
