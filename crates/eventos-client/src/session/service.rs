//! Session lifecycle service.
//!
//! Exactly one `SessionService` exists per running client. It is the
//! single source of truth for `{token, profile, status}`: the UI tree
//! subscribes to it, and the request pipeline reads the bearer token
//! from it at dispatch time.
//!
//! All mutations (`initialize`, `login`, `logout`, `force_sign_out`)
//! serialize on one mutex, so two of them can never interleave into an
//! inconsistent token/profile pair and a login resolving after a logout
//! cannot resurrect the old credential.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::{Mutex, watch};
use tracing::{debug, info, warn};

use super::snapshot::{SessionSnapshot, SessionStatus};
use crate::api::AuthApi;
use crate::credentials::{AdminProfile, Credential, CredentialStore};
use crate::error::Result;

/// Who asked for the session to end. Same resulting state either way.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SignOutTrigger {
    User,
    Backend,
}

/// Process-wide reactive session holder.
pub struct SessionService {
    store: Arc<dyn CredentialStore>,
    auth: AuthApi,
    tx: watch::Sender<SessionSnapshot>,
    /// Serializes every session mutation.
    op_lock: Mutex<()>,
    initialized: AtomicBool,
}

impl SessionService {
    pub fn new(store: Arc<dyn CredentialStore>, auth: AuthApi) -> Self {
        let (tx, _) = watch::channel(SessionSnapshot::uninitialized());
        Self {
            store,
            auth,
            tx,
            op_lock: Mutex::new(()),
            initialized: AtomicBool::new(false),
        }
    }

    // ========== Observation ==========

    /// Subscribe to session snapshots. The receiver immediately holds
    /// the current one.
    pub fn subscribe(&self) -> watch::Receiver<SessionSnapshot> {
        self.tx.subscribe()
    }

    /// The current snapshot.
    pub fn snapshot(&self) -> SessionSnapshot {
        self.tx.borrow().clone()
    }

    /// Current lifecycle status.
    pub fn status(&self) -> SessionStatus {
        self.tx.borrow().status
    }

    /// Synchronous send-time read of the bearer token.
    ///
    /// The request pipeline calls this at dispatch, never from an
    /// earlier snapshot, so a request issued right after logout cannot
    /// carry the old token.
    pub fn bearer_token(&self) -> Option<String> {
        self.tx.borrow().token().map(str::to_owned)
    }

    /// The signed-in administrator, when authenticated.
    pub fn profile(&self) -> Option<AdminProfile> {
        self.tx.borrow().profile().cloned()
    }

    // ========== Mutations ==========

    /// Restore a persisted session. Runs the restore at most once; later
    /// calls are no-ops.
    ///
    /// Publishes `Restoring` while the store is consulted, then resolves
    /// to `Authenticated` or `Anonymous` without any network call.
    pub async fn initialize(&self) -> Result<()> {
        if self.initialized.swap(true, Ordering::SeqCst) {
            return Ok(());
        }

        let _guard = self.op_lock.lock().await;
        self.tx.send_replace(SessionSnapshot::restoring());

        // A store that cannot be read means no session, not a startup
        // failure.
        let restored = match self.store.load().await {
            Ok(credential) => credential,
            Err(e) => {
                warn!(error = %e, "Credential restore failed, starting anonymous");
                None
            }
        };

        match restored {
            Some(credential) => {
                info!(admin = %credential.profile.email, "Session restored from storage");
                self.tx.send_replace(SessionSnapshot::authenticated(credential));
            }
            None => {
                debug!("No persisted session");
                self.tx.send_replace(SessionSnapshot::anonymous());
            }
        }
        Ok(())
    }

    /// Authenticate against the backend.
    ///
    /// On success the credential is persisted and published in one
    /// mutation. On rejection the session stays anonymous, the store is
    /// untouched and the error goes back to the caller; nothing retries.
    pub async fn login(&self, email: &str, password: &str) -> Result<AdminProfile> {
        let _guard = self.op_lock.lock().await;

        let response = self.auth.login(email, password).await?;
        let credential = Credential::new(response.token, response.profile);

        // Persistence is best-effort: a full session exists in memory
        // even if the platform store is unwritable.
        if let Err(e) = self.store.save(&credential).await {
            warn!(error = %e, "Failed to persist credential");
        }

        let profile = credential.profile.clone();
        info!(admin = %profile.email, "Signed in");
        self.tx.send_replace(SessionSnapshot::authenticated(credential));
        Ok(profile)
    }

    /// Create a new administrator account. Does not sign the account
    /// in; the caller follows up with `login`.
    pub async fn register(&self, name: &str, email: &str, password: &str) -> Result<AdminProfile> {
        self.auth.register(name, email, password).await
    }

    /// User-initiated sign-out. Idempotent.
    pub async fn logout(&self) {
        let _guard = self.op_lock.lock().await;
        self.sign_out_locked(SignOutTrigger::User).await;
    }

    /// Backend-initiated sign-out, invoked by the response guard when a
    /// previously valid token is rejected.
    ///
    /// Returns `true` if this call performed the transition. Under a
    /// burst of concurrently failing requests only the first caller
    /// transitions; the rest observe `Anonymous` and do nothing.
    pub async fn force_sign_out(&self) -> bool {
        let _guard = self.op_lock.lock().await;
        self.sign_out_locked(SignOutTrigger::Backend).await
    }

    /// Must hold `op_lock`.
    async fn sign_out_locked(&self, trigger: SignOutTrigger) -> bool {
        if self.status() != SessionStatus::Authenticated {
            return false;
        }

        self.tx.send_replace(SessionSnapshot::anonymous());
        if let Err(e) = self.store.clear().await {
            warn!(error = %e, "Failed to clear persisted credential");
        }

        match trigger {
            SignOutTrigger::User => info!("Signed out"),
            SignOutTrigger::Backend => info!("Session invalidated by backend, signed out"),
        }
        true
    }

    // ========== Remembered sign-in ==========

    /// Remember the sign-in email for form pre-fill.
    pub async fn remember_email(&self, email: &str) -> Result<()> {
        self.store.save_remembered_email(email).await
    }

    /// The remembered sign-in email, if any.
    pub async fn remembered_email(&self) -> Result<Option<String>> {
        self.store.load_remembered_email().await
    }

    /// Forget the remembered sign-in email.
    pub async fn forget_email(&self) -> Result<()> {
        self.store.clear_remembered_email().await
    }
}
