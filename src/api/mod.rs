//! HTTP client for the Gatherly REST API.

mod client;

use uuid::Uuid;

use crate::models::Activity;

pub use client::{ApiClient, HealthStatus};

/// Errors that can occur while talking to the server.
#[derive(Debug)]
pub enum ApiError {
    /// Failed to reach the server
    ConnectionError(String),
    /// Server responded with an unexpected status code
    UnexpectedStatus(u16),
    /// Failed to decode a response body
    DecodeError(String),
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::ConnectionError(e) => write!(f, "Connection error: {}", e),
            ApiError::UnexpectedStatus(code) => {
                write!(f, "Server returned status {}", code)
            }
            ApiError::DecodeError(e) => write!(f, "Failed to decode response: {}", e),
        }
    }
}

impl std::error::Error for ApiError {}

/// Remote operations on the activities resource.
///
/// The activity store is generic over this trait so tests can substitute an
/// in-memory fake for the network.
pub trait ActivityApi {
    fn list(&self) -> impl std::future::Future<Output = Result<Vec<Activity>, ApiError>>;

    fn details(&self, id: Uuid)
        -> impl std::future::Future<Output = Result<Activity, ApiError>>;

    fn create(&self, activity: &Activity)
        -> impl std::future::Future<Output = Result<(), ApiError>>;

    fn update(&self, activity: &Activity)
        -> impl std::future::Future<Output = Result<(), ApiError>>;

    fn delete(&self, id: Uuid) -> impl std::future::Future<Output = Result<(), ApiError>>;
}
