//! Core credential types.

use serde::{Deserialize, Serialize};

/// The authenticated administrator's profile, as returned by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminProfile {
    pub id: i64,
    #[serde(rename = "nome")]
    pub name: String,
    pub email: String,
}

/// The pairing of a bearer token and the administrator it belongs to.
///
/// The two fields are set and cleared together. A credential is never
/// mutated in place; a new login replaces it wholesale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credential {
    pub token: String,
    #[serde(rename = "admin")]
    pub profile: AdminProfile,
}

impl Credential {
    pub fn new(token: impl Into<String>, profile: AdminProfile) -> Self {
        Self {
            token: token.into(),
            profile,
        }
    }
}
