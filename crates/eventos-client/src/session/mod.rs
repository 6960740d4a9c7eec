//! Process-wide session state and lifecycle.

mod service;
mod snapshot;

pub use service::SessionService;
pub use snapshot::{SessionSnapshot, SessionStatus, SessionView};
