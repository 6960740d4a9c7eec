//! Client configuration.
//!
//! One `ClientConfig` is built at startup and shared for the process
//! lifetime; every component that reaches the backend goes through the
//! single base address it carries.

use std::path::PathBuf;
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue};
use url::Url;

use crate::error::Result;

pub const DEFAULT_USER_AGENT: &str = concat!("eventos-client/", env!("CARGO_PKG_VERSION"));

/// Backend base address when running against a local backend.
pub const LOCAL_BASE_URL: &str = "http://localhost:8080";

/// Backend base address as seen from inside the Android emulator,
/// where the host loopback is exposed as 10.0.2.2.
pub const ANDROID_EMULATOR_BASE_URL: &str = "http://10.0.2.2:8080";

/// Environment variable overriding the backend base address.
pub const BASE_URL_ENV: &str = "EVENTOS_API_BASE";

/// Configurable options for the client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Backend base address (host + port). All relative paths resolve
    /// against this.
    pub base_url: Url,

    /// Connection timeout (time to establish the initial connection).
    pub connect_timeout: Duration,

    /// Overall timeout for a single request.
    pub request_timeout: Duration,

    /// User agent string.
    pub user_agent: String,

    /// Directory for file-backed image caching. `None` keeps fetched
    /// images in memory only.
    pub image_cache_dir: Option<PathBuf>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            // LOCAL_BASE_URL is a compile-time constant known to parse.
            base_url: Url::parse(LOCAL_BASE_URL).expect("default base URL is valid"),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
            user_agent: DEFAULT_USER_AGENT.to_owned(),
            image_cache_dir: None,
        }
    }
}

impl ClientConfig {
    /// Create a config pointed at the given base address.
    pub fn new(base_url: &str) -> Result<Self> {
        Ok(Self {
            base_url: Url::parse(base_url)?,
            ..Self::default()
        })
    }

    /// Config for a client running inside the Android emulator.
    pub fn android_emulator() -> Self {
        Self {
            base_url: Url::parse(ANDROID_EMULATOR_BASE_URL).expect("emulator base URL is valid"),
            ..Self::default()
        }
    }

    /// Build a config from the environment, falling back to the local
    /// default when `EVENTOS_API_BASE` is unset.
    pub fn from_env() -> Result<Self> {
        match std::env::var(BASE_URL_ENV) {
            Ok(base) => Self::new(&base),
            Err(_) => Ok(Self::default()),
        }
    }

    /// Set the image cache directory.
    pub fn with_image_cache_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.image_cache_dir = Some(dir.into());
        self
    }

    /// Resolve a backend-relative path against the configured base.
    ///
    /// Leading slashes are normalized so `/eventos/1/imagem` and
    /// `eventos/1/imagem` resolve identically.
    pub fn join(&self, path: &str) -> Result<Url> {
        let base = self.base_url.as_str().trim_end_matches('/');
        let path = path.trim_start_matches('/');
        Ok(Url::parse(&format!("{base}/{path}"))?)
    }

    /// Build the shared HTTP client from this configuration.
    pub fn build_http_client(&self) -> Result<reqwest::Client> {
        let mut default_headers = HeaderMap::new();
        default_headers.insert(
            reqwest::header::ACCEPT,
            HeaderValue::from_static("application/json, */*;q=0.8"),
        );

        let client = reqwest::Client::builder()
            .user_agent(self.user_agent.clone())
            .default_headers(default_headers)
            .connect_timeout(self.connect_timeout)
            .timeout(self.request_timeout)
            .build()?;
        Ok(client)
    }
}
