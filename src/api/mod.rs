//! Advisory service client
//!
//! The request/response contract with the remote advisory endpoint: typed
//! wire shapes, the `AdvisoryApi` port, and the reqwest implementation.

pub mod client;
mod error;
mod http;
mod types;

pub use client::AdvisoryApi;
pub use error::RequestError;
pub use http::AdvisorClient;
pub use types::{
    AdvisoryPlan, AdvisoryRequest, Citation, CorrectOption, HealthStatus, OPTION_LABELS, PlanPhase, QuestionCard,
    QuestionSet,
};
