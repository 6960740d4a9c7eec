//! In-memory credential store.
//!
//! The browser-style backend: session state lives for the process only.
//! Also the default store for tests.

use async_trait::async_trait;
use parking_lot::RwLock;

use super::store::CredentialStore;
use super::types::Credential;
use crate::error::Result;

/// Process-lifetime credential store.
///
/// The whole credential is swapped under one lock, so the pair invariant
/// holds trivially.
#[derive(Debug, Default)]
pub struct MemoryCredentialStore {
    credential: RwLock<Option<Credential>>,
    remembered_email: RwLock<Option<String>>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CredentialStore for MemoryCredentialStore {
    async fn save(&self, credential: &Credential) -> Result<()> {
        *self.credential.write() = Some(credential.clone());
        Ok(())
    }

    async fn load(&self) -> Result<Option<Credential>> {
        Ok(self.credential.read().clone())
    }

    async fn clear(&self) -> Result<()> {
        *self.credential.write() = None;
        Ok(())
    }

    async fn save_remembered_email(&self, email: &str) -> Result<()> {
        *self.remembered_email.write() = Some(email.to_owned());
        Ok(())
    }

    async fn load_remembered_email(&self) -> Result<Option<String>> {
        Ok(self.remembered_email.read().clone())
    }

    async fn clear_remembered_email(&self) -> Result<()> {
        *self.remembered_email.write() = None;
        Ok(())
    }
}
