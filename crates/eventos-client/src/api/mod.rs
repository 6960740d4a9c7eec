//! Backend REST surface: auth gateway, authorized pipeline, event CRUD.

mod auth;
mod client;
mod events;
pub mod models;

pub use auth::AuthApi;
pub use client::{ApiClient, RequestPurpose};
