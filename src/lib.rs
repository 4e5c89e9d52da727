//! GRC Advisor - questionnaire client for the advisory service
//!
//! A terminal client for a governance, risk, and compliance advisory service.
//! It collects an organization profile through a ten-field questionnaire,
//! submits it to the service, and renders the returned implementation plan.
//! A second view reviews generated exam questions with their rejection log.
//!
//! # Core Concepts
//!
//! - **Explicit session state**: form, in-flight flag, error, and plan live
//!   in one snapshot transitioned by a pure reducer
//! - **One submission at a time**: a new submit is a no-op while one is
//!   in flight
//! - **Tolerant rendering**: every plan section is optional; missing or
//!   empty sections are silently omitted
//!
//! # Modules
//!
//! - [`api`] - Advisory service client trait, HTTP implementation, wire types
//! - [`form`] - Questionnaire fields, defaults, and request building
//! - [`session`] - Submission lifecycle reducer
//! - [`tui`] - Terminal user interface
//! - [`config`] - Configuration types and loading
//! - [`cli`] - Command-line interface

pub mod api;
pub mod cli;
pub mod config;
pub mod form;
pub mod session;
pub mod tui;

// Re-export commonly used types
pub use api::{
    AdvisorClient, AdvisoryApi, AdvisoryPlan, AdvisoryRequest, Citation, CorrectOption, HealthStatus, PlanPhase,
    QuestionCard, QuestionSet, RequestError,
};
pub use config::{ApiConfig, Config};
pub use form::{Field, FormState};
pub use session::{DisplayState, SessionEvent, SessionState, reduce};
