//! HTTP implementation of the advisory client
//!
//! One POST per submission, no retries. Non-2xx responses surface their body
//! text as the error message so the server's own wording reaches the user.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use super::{AdvisoryApi, AdvisoryPlan, AdvisoryRequest, HealthStatus, RequestError};
use crate::config::ApiConfig;

/// Advisory service HTTP client
pub struct AdvisorClient {
    base_url: String,
    http: Client,
}

impl AdvisorClient {
    /// Create a client from configuration
    pub fn from_config(config: &ApiConfig) -> Result<Self, RequestError> {
        let timeout = Duration::from_millis(config.timeout_ms);
        let http = Client::builder().timeout(timeout).build().map_err(RequestError::Network)?;

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            http,
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }
}

#[async_trait]
impl AdvisoryApi for AdvisorClient {
    async fn advise(&self, request: AdvisoryRequest) -> Result<AdvisoryPlan, RequestError> {
        let url = self.endpoint("advise");
        debug!(%url, sector = %request.sector, "advise: sending request");

        let response = self
            .http
            .post(&url)
            .header("content-type", "application/json")
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            debug!(status = status.as_u16(), "advise: non-success response");
            return Err(RequestError::from_status(status.as_u16(), body));
        }

        // No schema validation beyond serde defaults: any JSON-shaped plan
        // passes through and the renderer tolerates missing fields.
        let plan: AdvisoryPlan = response.json().await?;
        debug!(phases = plan.phases.len(), "advise: plan received");
        Ok(plan)
    }

    async fn health(&self) -> Result<HealthStatus, RequestError> {
        let url = self.endpoint("health");
        debug!(%url, "health: probing");

        let response = self.http.get(&url).send().await?;

        let status = response.status();
        if !status.is_success() {
            debug!(status = status.as_u16(), "health: non-success response");
            return Err(RequestError::HealthCheck { status: status.as_u16() });
        }

        Ok(response.json().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_config_builds_endpoints() {
        let config = ApiConfig {
            base_url: "http://127.0.0.1:8008".to_string(),
            timeout_ms: 1_000,
        };
        let client = AdvisorClient::from_config(&config).unwrap();

        assert_eq!(client.endpoint("advise"), "http://127.0.0.1:8008/advise");
        assert_eq!(client.endpoint("health"), "http://127.0.0.1:8008/health");
    }

    #[test]
    fn test_trailing_slash_is_trimmed() {
        let config = ApiConfig {
            base_url: "http://advisor.internal/".to_string(),
            timeout_ms: 1_000,
        };
        let client = AdvisorClient::from_config(&config).unwrap();

        assert_eq!(client.endpoint("advise"), "http://advisor.internal/advise");
    }
}
