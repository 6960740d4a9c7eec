//! File-backed credential store.
//!
//! The mobile-style backend: the credential survives process restarts as
//! a single JSON document under the client's storage directory. Writes go
//! through a temp file plus rename so the token/profile pair is replaced
//! atomically.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::{debug, warn};

use super::store::CredentialStore;
use super::types::Credential;
use crate::error::Result;

const CREDENTIAL_FILE: &str = "credential.json";
const REMEMBERED_EMAIL_FILE: &str = "remembered_email";

/// Credential store persisting to a directory on disk.
pub struct FileCredentialStore {
    dir: PathBuf,
}

impl FileCredentialStore {
    /// Create a store rooted at `dir`. The directory is created lazily on
    /// the first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn credential_path(&self) -> PathBuf {
        self.dir.join(CREDENTIAL_FILE)
    }

    fn remembered_path(&self) -> PathBuf {
        self.dir.join(REMEMBERED_EMAIL_FILE)
    }

    /// Write `contents` to `path` atomically (temp file + rename).
    async fn write_atomic(&self, path: &Path, contents: &[u8]) -> Result<()> {
        tokio::fs::create_dir_all(&self.dir).await?;

        let tmp = path.with_extension("tmp");
        tokio::fs::write(&tmp, contents).await?;
        tokio::fs::rename(&tmp, path).await?;
        Ok(())
    }

    /// Remove `path` if present; absence is not an error.
    async fn remove_if_present(path: &Path) -> Result<()> {
        match tokio::fs::remove_file(path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[async_trait]
impl CredentialStore for FileCredentialStore {
    async fn save(&self, credential: &Credential) -> Result<()> {
        let json = serde_json::to_vec_pretty(credential)?;
        self.write_atomic(&self.credential_path(), &json).await?;
        debug!(path = %self.credential_path().display(), "Credential persisted");
        Ok(())
    }

    async fn load(&self) -> Result<Option<Credential>> {
        let path = self.credential_path();
        let bytes = match tokio::fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        // A record that fails to parse is treated as no session.
        match serde_json::from_slice::<Credential>(&bytes) {
            Ok(credential) => Ok(Some(credential)),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Malformed credential record, treating as absent");
                Ok(None)
            }
        }
    }

    async fn clear(&self) -> Result<()> {
        Self::remove_if_present(&self.credential_path()).await
    }

    async fn save_remembered_email(&self, email: &str) -> Result<()> {
        self.write_atomic(&self.remembered_path(), email.as_bytes())
            .await
    }

    async fn load_remembered_email(&self) -> Result<Option<String>> {
        match tokio::fs::read_to_string(self.remembered_path()).await {
            Ok(email) if !email.trim().is_empty() => Ok(Some(email.trim().to_owned())),
            Ok(_) => Ok(None),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn clear_remembered_email(&self) -> Result<()> {
        Self::remove_if_present(&self.remembered_path()).await
    }
}
