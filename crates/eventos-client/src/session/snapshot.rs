//! Observable session state.

use crate::credentials::{AdminProfile, Credential};

/// Lifecycle phase of the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    /// `initialize` has not been called yet.
    Uninitialized,
    /// The credential store is being consulted at startup.
    Restoring,
    /// A credential is present.
    Authenticated,
    /// No credential; the user must sign in.
    Anonymous,
}

/// One consistent view of the session, published over the watch channel.
///
/// Status and credential always agree: `Authenticated` iff a credential
/// is present. Observers never see a token without its profile because
/// the whole snapshot is replaced in one step.
#[derive(Debug, Clone)]
pub struct SessionSnapshot {
    pub status: SessionStatus,
    pub credential: Option<Credential>,
}

impl SessionSnapshot {
    pub(crate) fn uninitialized() -> Self {
        Self {
            status: SessionStatus::Uninitialized,
            credential: None,
        }
    }

    pub(crate) fn restoring() -> Self {
        Self {
            status: SessionStatus::Restoring,
            credential: None,
        }
    }

    pub(crate) fn authenticated(credential: Credential) -> Self {
        Self {
            status: SessionStatus::Authenticated,
            credential: Some(credential),
        }
    }

    pub(crate) fn anonymous() -> Self {
        Self {
            status: SessionStatus::Anonymous,
            credential: None,
        }
    }

    /// The bearer token, when authenticated.
    pub fn token(&self) -> Option<&str> {
        self.credential.as_ref().map(|c| c.token.as_str())
    }

    /// The signed-in administrator's profile, when authenticated.
    pub fn profile(&self) -> Option<&AdminProfile> {
        self.credential.as_ref().map(|c| &c.profile)
    }

    /// Collapse the lifecycle into what the presentation layer may show.
    pub fn view(&self) -> SessionView {
        match self.status {
            SessionStatus::Uninitialized | SessionStatus::Restoring => SessionView::Pending,
            SessionStatus::Anonymous => SessionView::SignedOut,
            SessionStatus::Authenticated => match &self.credential {
                Some(credential) => SessionView::SignedIn(credential.profile.clone()),
                // Unreachable by construction; fail closed.
                None => SessionView::SignedOut,
            },
        }
    }
}

/// What the UI tree is allowed to render.
///
/// `Pending` renders nothing conclusive; once resolved there are exactly
/// two reachable states.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionView {
    Pending,
    SignedOut,
    SignedIn(AdminProfile),
}
