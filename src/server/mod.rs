//! Server-side modules for the Gatherly REST server.

pub mod api;

pub use api::{router, AppState};
