//! TUI application state
//!
//! Pure data structures for the TUI. No rendering logic here.

use chrono::{DateTime, Local};

use crate::api::QuestionSet;
use crate::form::Field;
use crate::session::{SessionEvent, SessionState, reduce};

/// Which view is currently displayed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    /// Questionnaire form with the plan pane (default view)
    #[default]
    Form,
    /// Quiz question cards with the rejection list
    Quiz,
}

impl View {
    /// Display name for the header
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Form => "Form",
            Self::Quiz => "Quiz",
        }
    }

    pub fn toggled(&self) -> Self {
        match self {
            Self::Form => Self::Quiz,
            Self::Quiz => Self::Form,
        }
    }
}

/// Interaction mode (modal)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InteractionMode {
    /// Normal navigation mode
    #[default]
    Normal,
    /// Editing the selected text field in place
    Editing,
    /// Help overlay
    Help,
}

/// Main TUI application state
#[derive(Debug, Default)]
pub struct AppState {
    /// Current view
    pub view: View,
    /// Current interaction mode
    pub mode: InteractionMode,
    /// Questionnaire session (form, loading, error, plan)
    pub session: SessionState,
    /// Index into [`Field::ALL`] of the highlighted field
    pub selected_field: usize,
    /// Submit requested; picked up by the runner on the next tick
    pub pending_submit: bool,
    /// Loaded question set for the quiz view, if any
    pub quiz: Option<QuestionSet>,
    /// Scroll offset of the plan pane
    pub plan_scroll: u16,
    /// Scroll offset of the quiz view
    pub quiz_scroll: u16,
    /// Should the app quit
    pub should_quit: bool,
    /// When the last submission was sent (shown in the header)
    pub last_submitted: Option<DateTime<Local>>,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// The currently highlighted field
    pub fn selected(&self) -> Field {
        Field::ALL[self.selected_field]
    }

    pub fn select_next(&mut self) {
        if self.selected_field + 1 < Field::ALL.len() {
            self.selected_field += 1;
        }
    }

    pub fn select_prev(&mut self) {
        self.selected_field = self.selected_field.saturating_sub(1);
    }

    pub fn select_first(&mut self) {
        self.selected_field = 0;
    }

    pub fn select_last(&mut self) {
        self.selected_field = Field::ALL.len() - 1;
    }

    /// Run the session reducer over one event
    pub fn apply(&mut self, event: SessionEvent) {
        self.session = reduce(std::mem::take(&mut self.session), event);
    }

    /// Request a submission; a no-op while one is already in flight
    pub fn request_submit(&mut self) {
        if !self.session.loading {
            self.pending_submit = true;
        }
    }

    /// Append one character to the selected field
    pub fn push_char(&mut self, c: char) {
        let field = self.selected();
        let mut value = self.session.form.get(field).to_string();
        value.push(c);
        self.apply(SessionEvent::FieldChanged(field, value));
    }

    /// Remove the last character of the selected field
    pub fn pop_char(&mut self) {
        let field = self.selected();
        let mut value = self.session.form.get(field).to_string();
        value.pop();
        self.apply(SessionEvent::FieldChanged(field, value));
    }

    /// Advance a choice field to its next option
    pub fn cycle_selected(&mut self) {
        let field = self.selected();
        if let Some(next) = self.session.form.next_choice(field) {
            self.apply(SessionEvent::FieldChanged(field, next.to_string()));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::Field;

    #[test]
    fn test_selection_stays_in_bounds() {
        let mut state = AppState::new();
        assert_eq!(state.selected(), Field::ALL[0]);

        state.select_prev();
        assert_eq!(state.selected_field, 0);

        state.select_last();
        assert_eq!(state.selected_field, Field::ALL.len() - 1);

        state.select_next();
        assert_eq!(state.selected_field, Field::ALL.len() - 1);

        state.select_first();
        assert_eq!(state.selected_field, 0);
    }

    #[test]
    fn test_push_and_pop_edit_selected_field() {
        let mut state = AppState::new();
        // Geography is a free-text field
        state.selected_field = Field::ALL.iter().position(|f| *f == Field::Geography).unwrap();

        state.push_char('!');
        assert_eq!(state.session.form.geography, "US!");

        state.pop_char();
        state.pop_char();
        assert_eq!(state.session.form.geography, "U");
    }

    #[test]
    fn test_cycle_selected_only_touches_choice_fields() {
        let mut state = AppState::new();

        state.selected_field = Field::ALL.iter().position(|f| *f == Field::BudgetLevel).unwrap();
        state.cycle_selected();
        assert_eq!(state.session.form.budget_level, "high");

        state.selected_field = Field::ALL.iter().position(|f| *f == Field::Goals).unwrap();
        state.cycle_selected();
        assert_eq!(state.session.form.goals, "");
    }

    #[test]
    fn test_request_submit_guarded_while_loading() {
        let mut state = AppState::new();

        state.request_submit();
        assert!(state.pending_submit);

        state.pending_submit = false;
        state.session.loading = true;
        state.request_submit();
        assert!(!state.pending_submit);
    }
}
