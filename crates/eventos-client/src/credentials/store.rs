//! Credential persistence abstraction.
//!
//! Each client platform persists the session with a different primitive
//! (browser storage, mobile async storage). The session layer depends
//! only on this trait; the concrete backends live alongside it.

use async_trait::async_trait;

use super::types::Credential;
use crate::error::Result;

/// Platform storage for the current credential.
///
/// `save` and `clear` are atomic with respect to the token/profile pair:
/// a concurrent `load` observes either the whole previous record or the
/// whole new one, never a token without its profile.
///
/// A persisted record that is missing or fails to parse loads as `None`.
/// Malformed state is treated as "no session", not as an error.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Persist the credential, replacing any previous record.
    async fn save(&self, credential: &Credential) -> Result<()>;

    /// Load the persisted credential, if any.
    async fn load(&self) -> Result<Option<Credential>>;

    /// Remove the persisted credential. A no-op when nothing is stored.
    async fn clear(&self) -> Result<()>;

    /// Remember the last sign-in email for form pre-fill.
    async fn save_remembered_email(&self, email: &str) -> Result<()>;

    /// Load the remembered sign-in email, if any.
    async fn load_remembered_email(&self) -> Result<Option<String>>;

    /// Forget the remembered sign-in email.
    async fn clear_remembered_email(&self) -> Result<()>;
}
