//! Credential types and platform persistence.

mod file;
mod memory;
mod store;
mod types;

pub use file::FileCredentialStore;
pub use memory::MemoryCredentialStore;
pub use store::CredentialStore;
pub use types::{AdminProfile, Credential};
