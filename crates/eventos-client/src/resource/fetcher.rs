//! Protected image resolution.
//!
//! An event's image reference is either an absolute external URL (used
//! verbatim, no network call here) or a backend-relative protected path
//! that needs the current bearer token. Fetches are cancellable: a
//! superseded fetch discards its result instead of updating a torn-down
//! element, and every failure path collapses to the placeholder without
//! ever touching session state.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use bytes::Bytes;
use reqwest::Method;
use sha2::{Digest, Sha256};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use super::asset::{CachedImage, ImageAsset, ImageData, TempImageFile};
use crate::api::{ApiClient, RequestPurpose};
use crate::config::LOCAL_BASE_URL;
use crate::error::{ClientError, Result};

/// Uniquifies cache file names across concurrent fetches of the same ref.
static FETCH_SEQ: AtomicU64 = AtomicU64::new(0);

/// Resolves event image references into displayable assets.
pub struct ResourceFetcher {
    api: Arc<ApiClient>,
}

impl ResourceFetcher {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }

    /// Resolve `source_ref` into something a UI element can display.
    ///
    /// Never returns an error: absent references, rejected fetches,
    /// transport failures and cancellation all yield the placeholder.
    pub async fn resolve(
        &self,
        source_ref: Option<&str>,
        cancel: &CancellationToken,
    ) -> ImageAsset {
        let Some(raw) = source_ref.filter(|r| !r.trim().is_empty()) else {
            return ImageAsset::Placeholder;
        };

        // References minted against a developer backend embed the local
        // base; re-base them instead of trusting the absolute form.
        let rebased = raw.strip_prefix(LOCAL_BASE_URL).filter(|r| !r.is_empty());

        let path = match rebased {
            Some(path) => path,
            None if raw.starts_with("http://") || raw.starts_with("https://") => {
                return ImageAsset::Remote(raw.to_owned());
            }
            None => raw,
        };

        match self.fetch_protected(raw, path, cancel).await {
            Ok(asset) => asset,
            Err(ClientError::Cancelled) => {
                debug!(source_ref = raw, "Image fetch superseded, discarding");
                ImageAsset::Placeholder
            }
            Err(e) => {
                warn!(source_ref = raw, error = %e, "Image fetch failed, using placeholder");
                ImageAsset::Placeholder
            }
        }
    }

    /// Fetch a backend-relative protected image.
    async fn fetch_protected(
        &self,
        source_ref: &str,
        path: &str,
        cancel: &CancellationToken,
    ) -> Result<ImageAsset> {
        let url = self.api.config().join(path)?;
        debug!(%url, "Fetching protected image");

        let builder = self.api.request_url(Method::GET, url);
        let response = tokio::select! {
            _ = cancel.cancelled() => return Err(ClientError::Cancelled),
            response = self.api.execute(builder, RequestPurpose::ResourceFetch) => response?,
        };

        let bytes = tokio::select! {
            _ = cancel.cancelled() => return Err(ClientError::Cancelled),
            bytes = response.bytes() => bytes?,
        };

        // The element may have gone away while the body streamed in.
        if cancel.is_cancelled() {
            return Err(ClientError::Cancelled);
        }

        let data = match &self.api.config().image_cache_dir {
            Some(dir) => {
                let file = self.materialize_file(dir, source_ref, &bytes).await?;
                ImageData::File(file)
            }
            None => ImageData::Bytes(bytes),
        };
        Ok(ImageAsset::Cached(CachedImage::new(
            source_ref.to_owned(),
            data,
        )))
    }

    /// Write the fetched bytes to a per-fetch cache file.
    async fn materialize_file(
        &self,
        dir: &std::path::Path,
        source_ref: &str,
        bytes: &Bytes,
    ) -> Result<TempImageFile> {
        tokio::fs::create_dir_all(dir).await?;

        let digest = Sha256::digest(source_ref.as_bytes());
        let seq = FETCH_SEQ.fetch_add(1, Ordering::Relaxed);
        let path = dir.join(format!("evento_{}_{seq}.img", &hex::encode(digest)[..16]));

        tokio::fs::write(&path, bytes).await?;
        Ok(TempImageFile::new(path))
    }
}
