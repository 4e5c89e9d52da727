//! AdvisoryApi trait definition

use async_trait::async_trait;

use super::{AdvisoryPlan, AdvisoryRequest, HealthStatus, RequestError};

/// Stateless advisory service client - each call is one independent request
///
/// This is the seam between the form flow and the network: the TUI and CLI
/// hold `Arc<dyn AdvisoryApi>`, so a canned fake can stand in for the real
/// HTTP client in tests. No retries, no caching; one call, one request.
#[async_trait]
pub trait AdvisoryApi: Send + Sync {
    /// Submit a questionnaire and receive the generated plan
    async fn advise(&self, request: AdvisoryRequest) -> Result<AdvisoryPlan, RequestError>;

    /// Probe the service; any 2xx counts as healthy
    async fn health(&self) -> Result<HealthStatus, RequestError>;
}
