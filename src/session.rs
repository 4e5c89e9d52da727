//! Submission lifecycle as an explicit state machine
//!
//! The form, the in-flight flag, the last error, and the last plan live in
//! one snapshot struct transitioned by a pure reducer. The TUI runner feeds
//! it events; nothing here touches the network or the terminal, so the whole
//! lifecycle is testable without a rendering harness.

use crate::api::AdvisoryPlan;
use crate::form::{Field, FormState};

/// One snapshot of the questionnaire session
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionState {
    pub form: FormState,
    pub loading: bool,
    pub error: Option<String>,
    pub plan: Option<AdvisoryPlan>,
}

/// Events that transition the session
#[derive(Debug, Clone)]
pub enum SessionEvent {
    /// A single field changed; all others keep their values
    FieldChanged(Field, String),
    /// Submission began: clear prior error and plan, enter loading
    SubmitStarted,
    /// The service returned a plan
    SubmitSucceeded(AdvisoryPlan),
    /// The request failed; the message is stored verbatim for display
    SubmitFailed(String),
}

/// The four-valued display state the renderer maps over
#[derive(Debug, Clone, PartialEq)]
pub enum DisplayState<'a> {
    Empty,
    Loading,
    Error(&'a str),
    Plan(&'a AdvisoryPlan),
}

impl SessionState {
    /// Project the snapshot onto what should be displayed
    pub fn display(&self) -> DisplayState<'_> {
        if self.loading {
            return DisplayState::Loading;
        }
        if let Some(error) = &self.error
            && !error.is_empty()
        {
            return DisplayState::Error(error);
        }
        if let Some(plan) = &self.plan {
            return DisplayState::Plan(plan);
        }
        DisplayState::Empty
    }
}

/// Pure transition function
pub fn reduce(mut state: SessionState, event: SessionEvent) -> SessionState {
    match event {
        SessionEvent::FieldChanged(field, value) => {
            state.form.set(field, value);
        }
        SessionEvent::SubmitStarted => {
            state.loading = true;
            state.error = None;
            state.plan = None;
        }
        SessionEvent::SubmitSucceeded(plan) => {
            state.plan = Some(plan);
            state.loading = false;
        }
        SessionEvent::SubmitFailed(message) => {
            state.error = Some(message);
            state.loading = false;
        }
    }
    state
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plan(summary: &str) -> AdvisoryPlan {
        AdvisoryPlan {
            executive_summary: summary.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_initial_state_is_empty() {
        let state = SessionState::default();
        assert!(!state.loading);
        assert_eq!(state.display(), DisplayState::Empty);
    }

    #[test]
    fn test_field_change_touches_only_the_form() {
        let state = SessionState::default();
        let state = reduce(state, SessionEvent::FieldChanged(Field::Goals, "automate controls".to_string()));

        assert_eq!(state.form.goals, "automate controls");
        assert_eq!(state.form.sector, "finance");
        assert!(!state.loading);
        assert!(state.error.is_none());
        assert!(state.plan.is_none());
    }

    #[test]
    fn test_submit_lifecycle_success() {
        let state = reduce(SessionState::default(), SessionEvent::SubmitStarted);
        assert!(state.loading);
        assert_eq!(state.display(), DisplayState::Loading);

        let state = reduce(state, SessionEvent::SubmitSucceeded(plan("Start here")));
        assert!(!state.loading);
        assert!(state.error.is_none());
        assert_eq!(state.plan.as_ref().unwrap().executive_summary, "Start here");
        assert!(matches!(state.display(), DisplayState::Plan(_)));
    }

    #[test]
    fn test_submit_lifecycle_failure_leaves_no_plan() {
        let state = reduce(SessionState::default(), SessionEvent::SubmitStarted);
        let state = reduce(state, SessionEvent::SubmitFailed("rate limited".to_string()));

        assert!(!state.loading);
        assert!(state.plan.is_none());
        assert_eq!(state.error.as_deref(), Some("rate limited"));
        assert_eq!(state.display(), DisplayState::Error("rate limited"));
    }

    #[test]
    fn test_resubmit_clears_prior_plan_and_error() {
        let state = reduce(SessionState::default(), SessionEvent::SubmitStarted);
        let state = reduce(state, SessionEvent::SubmitSucceeded(plan("v1")));

        let state = reduce(state, SessionEvent::SubmitStarted);
        assert!(state.loading);
        assert!(state.plan.is_none());
        assert!(state.error.is_none());

        let state = reduce(state, SessionEvent::SubmitFailed("HTTP 500".to_string()));
        let state = reduce(state, SessionEvent::SubmitStarted);
        assert!(state.error.is_none());
    }

    #[test]
    fn test_empty_error_string_displays_as_empty() {
        let state = SessionState {
            error: Some(String::new()),
            ..Default::default()
        };
        assert_eq!(state.display(), DisplayState::Empty);
    }

    #[test]
    fn test_form_edits_survive_submission() {
        let state = reduce(
            SessionState::default(),
            SessionEvent::FieldChanged(Field::Compliance, "GDPR".to_string()),
        );
        let state = reduce(state, SessionEvent::SubmitStarted);
        let state = reduce(state, SessionEvent::SubmitSucceeded(plan("done")));

        assert_eq!(state.form.compliance, "GDPR");
    }
}
