//! API client for the proposals REST API.
//!
//! This module provides the `ApiClient` struct which maps each endpoint under
//! `/api/proposals` to a typed method returning `Result<T, ApiError>`.

use std::sync::Arc;

use reqwest::Method;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::models::{Activity, NewProposal, Proposal};

use super::transport::{ApiRequest, ApiResponse, Transport};
use super::ApiError;

// ============================================================================
// Constants
// ============================================================================

/// Base URL of the proposals collection.
pub const DEFAULT_BASE_URL: &str = "http://localhost:3000/api/proposals";

/// API client for the proposals service.
/// Every method issues exactly one request; nothing is retried.
/// Clone is cheap - the transport is shared behind an Arc.
#[derive(Clone)]
pub struct ApiClient {
    transport: Arc<dyn Transport>,
    base_url: String,
}

impl ApiClient {
    pub fn with_transport(transport: Arc<dyn Transport>, base_url: &str) -> Self {
        Self {
            transport,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn proposal_url(&self, id: &str) -> String {
        format!("{}/{}", self.base_url, id)
    }

    fn activities_url(&self, proposal_id: &str) -> String {
        format!("{}/{}/activities", self.base_url, proposal_id)
    }

    /// Check if response is successful, returning an error with body if not.
    fn check_response(response: ApiResponse) -> Result<ApiResponse, ApiError> {
        if response.status.is_success() {
            Ok(response)
        } else {
            Err(ApiError::from_status(response.status, &response.body))
        }
    }

    fn parse<T: DeserializeOwned>(response: &ApiResponse, url: &str) -> Result<T, ApiError> {
        serde_json::from_str(&response.body).map_err(|e| {
            ApiError::InvalidResponse(format!("Failed to parse JSON response from {}: {}", url, e))
        })
    }

    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ApiError> {
        let response = self.transport.execute(request).await?;
        Self::check_response(response)
    }

    async fn get<T: DeserializeOwned>(&self, url: &str) -> Result<T, ApiError> {
        let response = self.send(ApiRequest::new(Method::GET, url)).await?;
        Self::parse(&response, url)
    }

    async fn post<T: DeserializeOwned>(
        &self,
        url: &str,
        body: serde_json::Value,
    ) -> Result<T, ApiError> {
        let response = self
            .send(ApiRequest::new(Method::POST, url).with_body(body))
            .await?;
        Self::parse(&response, url)
    }

    // ===== Proposals =====

    /// Fetch every proposal
    pub async fn fetch_proposals(&self) -> Result<Vec<Proposal>, ApiError> {
        let proposals: Vec<Proposal> = self.get(&self.base_url).await?;
        debug!(count = proposals.len(), "Fetched proposals");
        Ok(proposals)
    }

    /// Fetch one proposal by id. 404 surfaces as `ApiError::NotFound`.
    pub async fn fetch_proposal(&self, id: &str) -> Result<Proposal, ApiError> {
        self.get(&self.proposal_url(id)).await
    }

    pub async fn create_proposal(&self, proposal: &NewProposal) -> Result<Proposal, ApiError> {
        let body = serde_json::to_value(proposal)
            .map_err(|e| ApiError::InvalidRequest(format!("Failed to encode proposal: {}", e)))?;
        self.post(&self.base_url, body).await
    }

    /// Delete a proposal. The response body is ignored; success is the status.
    pub async fn delete_proposal(&self, id: &str) -> Result<(), ApiError> {
        let url = self.proposal_url(id);
        self.send(ApiRequest::new(Method::DELETE, url)).await?;
        Ok(())
    }

    // ===== Activities =====

    pub async fn fetch_activity(
        &self,
        proposal_id: &str,
        activity_id: i64,
    ) -> Result<Activity, ApiError> {
        let url = format!("{}/{}", self.activities_url(proposal_id), activity_id);
        self.get(&url).await
    }

    /// Attach an activity to a proposal. The body is the bare activity id.
    pub async fn create_activity(
        &self,
        proposal_id: &str,
        activity_id: i64,
    ) -> Result<Activity, ApiError> {
        let url = self.activities_url(proposal_id);
        self.post(&url, serde_json::json!(activity_id)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::transport::testing::ScriptedTransport;

    const BASE: &str = "http://api.test/api/proposals";

    fn client(transport: &Arc<ScriptedTransport>) -> ApiClient {
        ApiClient::with_transport(transport.clone(), BASE)
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let transport = Arc::new(ScriptedTransport::new());
        let client = ApiClient::with_transport(transport, "http://api.test/api/proposals/");
        assert_eq!(client.base_url(), BASE);
        assert_eq!(client.proposal_url("7"), format!("{}/7", BASE));
    }

    #[tokio::test]
    async fn test_fetch_proposals() {
        let transport = Arc::new(ScriptedTransport::new());
        transport.respond_json(
            Method::GET,
            BASE,
            serde_json::json!([{"id": "1", "name": "Trip"}]),
        );

        let proposals = client(&transport).fetch_proposals().await.unwrap();
        assert_eq!(proposals.len(), 1);
        assert_eq!(proposals[0].name, "Trip");
    }

    #[tokio::test]
    async fn test_create_proposal_posts_name_and_activities() {
        let transport = Arc::new(ScriptedTransport::new());
        transport.respond_json(
            Method::POST,
            BASE,
            serde_json::json!({"id": "abc", "name": "Trip", "activities": [{"id": 1}]}),
        );

        let created = client(&transport)
            .create_proposal(&NewProposal::new("Trip", vec![Activity::new(1)]))
            .await
            .unwrap();
        assert_eq!(created.id, "abc");

        let requests = transport.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(
            requests[0].body,
            Some(serde_json::json!({"name": "Trip", "activities": [{"id": 1}]}))
        );
    }

    #[tokio::test]
    async fn test_create_activity_posts_bare_id() {
        let transport = Arc::new(ScriptedTransport::new());
        let url = format!("{}/1/activities", BASE);
        transport.respond_json(Method::POST, &url, serde_json::json!({"id": 42}));

        let activity = client(&transport).create_activity("1", 42).await.unwrap();
        assert_eq!(activity.id, 42);
        assert_eq!(transport.requests()[0].body, Some(serde_json::json!(42)));
    }

    #[tokio::test]
    async fn test_fetch_activity_url() {
        let transport = Arc::new(ScriptedTransport::new());
        let url = format!("{}/1/activities/5", BASE);
        transport.respond_json(Method::GET, &url, serde_json::json!({"id": 5, "name": "Swim"}));

        let activity = client(&transport).fetch_activity("1", 5).await.unwrap();
        assert_eq!(activity.name.as_deref(), Some("Swim"));
        assert_eq!(transport.count(Method::GET, &url), 1);
    }

    #[tokio::test]
    async fn test_delete_ignores_empty_body() {
        let transport = Arc::new(ScriptedTransport::new());
        let url = format!("{}/1", BASE);
        transport.respond(Method::DELETE, &url, 204, "");

        assert!(client(&transport).delete_proposal("1").await.is_ok());
    }

    #[tokio::test]
    async fn test_missing_proposal_is_not_found() {
        let transport = Arc::new(ScriptedTransport::new());
        let err = client(&transport).fetch_proposal("missing").await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_malformed_body_is_invalid_response() {
        let transport = Arc::new(ScriptedTransport::new());
        transport.respond(Method::GET, BASE, 200, "<html>oops</html>");

        let err = client(&transport).fetch_proposals().await.unwrap_err();
        assert!(matches!(err, ApiError::InvalidResponse(_)));
    }

    #[tokio::test]
    async fn test_rate_limit_is_not_retried() {
        let transport = Arc::new(ScriptedTransport::new());
        transport.respond(Method::GET, BASE, 429, "");

        let started = std::time::Instant::now();
        let err = client(&transport).fetch_proposals().await.unwrap_err();
        assert!(matches!(err, ApiError::RateLimited));
        assert_eq!(transport.count(Method::GET, BASE), 1);
        assert!(started.elapsed() < std::time::Duration::from_millis(500));
    }

    #[tokio::test]
    async fn test_server_error_is_single_request() {
        let transport = Arc::new(ScriptedTransport::new());
        let url = format!("{}/1", BASE);
        transport.respond(Method::GET, &url, 503, "maintenance");

        let err = client(&transport).fetch_proposal("1").await.unwrap_err();
        assert!(matches!(err, ApiError::ServerError(ref body) if body == "maintenance"));
        assert_eq!(transport.count(Method::GET, &url), 1);
    }

    #[tokio::test]
    async fn test_connection_failure_propagates() {
        let transport = Arc::new(ScriptedTransport::new());
        transport.fail(Method::GET, BASE, "connection refused");

        let err = client(&transport).fetch_proposals().await.unwrap_err();
        assert!(matches!(err, ApiError::ConnectionFailed(_)));
    }
}
