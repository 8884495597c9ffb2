use serde::Deserialize;
use uuid::Uuid;

use super::{ActivityApi, ApiError};
use crate::models::{Activity, Value};

/// Health check response from the server.
#[derive(Debug, Clone, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    pub version: String,
}

/// HTTP client for the Gatherly REST API.
///
/// A thin wrapper around reqwest; every method is one request/response
/// round-trip with no retry logic.
#[derive(Debug, Clone)]
pub struct ApiClient {
    server_url: String,
    client: reqwest::Client,
}

impl ApiClient {
    pub fn new(server_url: impl Into<String>) -> Self {
        Self {
            server_url: server_url.into(),
            client: reqwest::Client::new(),
        }
    }

    /// Returns the server URL.
    pub fn server_url(&self) -> &str {
        &self.server_url
    }

    /// Builds a full URL for an API path.
    fn build_url(&self, path: &str) -> String {
        let base = self.server_url.trim_end_matches('/');
        if base.starts_with("http://") || base.starts_with("https://") {
            format!("{}{}", base, path)
        } else {
            format!("http://{}{}", base, path)
        }
    }

    fn check_status(response: &reqwest::Response) -> Result<(), ApiError> {
        if response.status().is_success() {
            Ok(())
        } else {
            Err(ApiError::UnexpectedStatus(response.status().as_u16()))
        }
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let response = self
            .client
            .get(self.build_url(path))
            .send()
            .await
            .map_err(|e| ApiError::ConnectionError(e.to_string()))?;

        Self::check_status(&response)?;

        response
            .json()
            .await
            .map_err(|e| ApiError::DecodeError(e.to_string()))
    }

    /// Fetches the seeded values resource.
    pub async fn values(&self) -> Result<Vec<Value>, ApiError> {
        self.get_json("/api/values").await
    }

    /// Fetches a single value by id. The server stubs this endpoint.
    pub async fn value(&self, id: i64) -> Result<String, ApiError> {
        let response = self
            .client
            .get(self.build_url(&format!("/api/values/{}", id)))
            .send()
            .await
            .map_err(|e| ApiError::ConnectionError(e.to_string()))?;

        Self::check_status(&response)?;

        response
            .text()
            .await
            .map_err(|e| ApiError::DecodeError(e.to_string()))
    }

    /// Checks server health.
    pub async fn health(&self) -> Result<HealthStatus, ApiError> {
        self.get_json("/health").await
    }
}

impl ActivityApi for ApiClient {
    async fn list(&self) -> Result<Vec<Activity>, ApiError> {
        self.get_json("/api/activities").await
    }

    async fn details(&self, id: Uuid) -> Result<Activity, ApiError> {
        self.get_json(&format!("/api/activities/{}", id)).await
    }

    async fn create(&self, activity: &Activity) -> Result<(), ApiError> {
        let response = self
            .client
            .post(self.build_url("/api/activities"))
            .json(activity)
            .send()
            .await
            .map_err(|e| ApiError::ConnectionError(e.to_string()))?;

        Self::check_status(&response)
    }

    async fn update(&self, activity: &Activity) -> Result<(), ApiError> {
        let response = self
            .client
            .put(self.build_url(&format!("/api/activities/{}", activity.id)))
            .json(activity)
            .send()
            .await
            .map_err(|e| ApiError::ConnectionError(e.to_string()))?;

        Self::check_status(&response)
    }

    async fn delete(&self, id: Uuid) -> Result<(), ApiError> {
        let response = self
            .client
            .delete(self.build_url(&format!("/api/activities/{}", id)))
            .send()
            .await
            .map_err(|e| ApiError::ConnectionError(e.to_string()))?;

        Self::check_status(&response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_url_with_http() {
        let client = ApiClient::new("http://localhost:5000");
        assert_eq!(
            client.build_url("/api/activities"),
            "http://localhost:5000/api/activities"
        );
    }

    #[test]
    fn test_build_url_with_https() {
        let client = ApiClient::new("https://gatherly.example.com");
        assert_eq!(
            client.build_url("/api/values"),
            "https://gatherly.example.com/api/values"
        );
    }

    #[test]
    fn test_build_url_bare_host() {
        let client = ApiClient::new("localhost:5000");
        assert_eq!(client.build_url("/health"), "http://localhost:5000/health");
    }

    #[test]
    fn test_build_url_trailing_slash() {
        let client = ApiClient::new("http://localhost:5000/");
        assert_eq!(
            client.build_url("/api/activities"),
            "http://localhost:5000/api/activities"
        );
    }
}
