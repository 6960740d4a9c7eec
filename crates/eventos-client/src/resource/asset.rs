//! Displayable image assets.

use std::path::{Path, PathBuf};

use bytes::Bytes;
use chrono::{DateTime, Utc};
use tracing::trace;

/// A cache-directory file that is deleted when its owner goes away.
///
/// Fetched images are scoped to the element that requested them;
/// releasing the handle on teardown keeps cache growth bounded.
#[derive(Debug)]
pub struct TempImageFile {
    path: PathBuf,
}

impl TempImageFile {
    pub(crate) fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for TempImageFile {
    fn drop(&mut self) {
        // Best-effort: a leftover file is reclaimed by the OS cache dir
        // eventually anyway.
        if let Err(e) = std::fs::remove_file(&self.path) {
            trace!(path = %self.path.display(), error = %e, "Cached image file not removed");
        }
    }
}

/// Where a fetched image's bytes live.
#[derive(Debug)]
pub enum ImageData {
    /// In-memory bytes (browser-style object reference).
    Bytes(Bytes),
    /// Cache-directory file (mobile-style), removed on drop.
    File(TempImageFile),
}

/// A protected image materialized locally.
#[derive(Debug)]
pub struct CachedImage {
    /// The event's image reference exactly as received from the backend.
    pub source_ref: String,
    pub fetched_at: DateTime<Utc>,
    data: ImageData,
}

impl CachedImage {
    pub(crate) fn new(source_ref: String, data: ImageData) -> Self {
        Self {
            source_ref,
            fetched_at: Utc::now(),
            data,
        }
    }

    /// In-memory bytes, when not file-backed.
    pub fn bytes(&self) -> Option<&Bytes> {
        match &self.data {
            ImageData::Bytes(bytes) => Some(bytes),
            ImageData::File(_) => None,
        }
    }

    /// Local file path, when file-backed.
    pub fn path(&self) -> Option<&Path> {
        match &self.data {
            ImageData::Bytes(_) => None,
            ImageData::File(file) => Some(file.path()),
        }
    }

    /// Read the image contents regardless of backing.
    pub async fn read(&self) -> std::io::Result<Bytes> {
        match &self.data {
            ImageData::Bytes(bytes) => Ok(bytes.clone()),
            ImageData::File(file) => Ok(Bytes::from(tokio::fs::read(file.path()).await?)),
        }
    }
}

/// What a UI element may display for an event image.
#[derive(Debug)]
pub enum ImageAsset {
    /// An absolute external URL, used verbatim; the UI layer loads it.
    Remote(String),
    /// A protected image fetched through the backend and cached locally.
    Cached(CachedImage),
    /// Fallback state for an absent or unresolvable reference.
    Placeholder,
}

impl ImageAsset {
    #[inline]
    pub fn is_placeholder(&self) -> bool {
        matches!(self, Self::Placeholder)
    }
}
