//! TUI application - event handling and state management
//!
//! The App struct owns the AppState and handles all keyboard events.
//! It does not do any rendering - that's delegated to the views module.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::state::{AppState, InteractionMode, View};

/// TUI application
#[derive(Debug, Default)]
pub struct App {
    state: AppState,
}

impl App {
    /// Create a new application instance
    pub fn new() -> Self {
        Self { state: AppState::new() }
    }

    /// Get reference to state
    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Get mutable reference to state
    pub fn state_mut(&mut self) -> &mut AppState {
        &mut self.state
    }

    /// Handle a key event
    ///
    /// Returns true if the application should exit immediately.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        match self.state.mode {
            InteractionMode::Normal => self.handle_normal_key(key),
            InteractionMode::Editing => self.handle_editing_key(key),
            InteractionMode::Help => self.handle_help_key(key),
        }
    }

    fn handle_normal_key(&mut self, key: KeyEvent) -> bool {
        match (key.code, key.modifiers) {
            // === Quit ===
            (KeyCode::Char('c'), KeyModifiers::CONTROL) => {
                return true; // Force quit
            }
            (KeyCode::Char('q'), _) | (KeyCode::Esc, _) => {
                self.state.should_quit = true;
            }

            // === Help ===
            (KeyCode::Char('?'), _) | (KeyCode::F(1), _) => {
                self.state.mode = InteractionMode::Help;
            }

            // === View toggle ===
            (KeyCode::Tab, _) => {
                self.state.view = self.state.view.toggled();
            }

            // === Submit (guarded while a submission is in flight) ===
            (KeyCode::Char('s'), _) if self.state.view == View::Form => {
                self.state.request_submit();
            }

            // === Field navigation (form view) ===
            (KeyCode::Up, _) | (KeyCode::Char('k'), _) if self.state.view == View::Form => {
                self.state.select_prev();
            }
            (KeyCode::Down, _) | (KeyCode::Char('j'), _) if self.state.view == View::Form => {
                self.state.select_next();
            }
            (KeyCode::Char('g'), _) if self.state.view == View::Form => {
                self.state.select_first();
            }
            (KeyCode::Char('G'), _) if self.state.view == View::Form => {
                self.state.select_last();
            }

            // === Edit or cycle the selected field ===
            (KeyCode::Enter, _) if self.state.view == View::Form => {
                if self.state.selected().choices().is_some() {
                    self.state.cycle_selected();
                } else {
                    self.state.mode = InteractionMode::Editing;
                }
            }

            // === Plan pane scrolling ===
            (KeyCode::PageUp, _) if self.state.view == View::Form => {
                self.state.plan_scroll = self.state.plan_scroll.saturating_sub(5);
            }
            (KeyCode::PageDown, _) if self.state.view == View::Form => {
                self.state.plan_scroll = self.state.plan_scroll.saturating_add(5);
            }

            // === Quiz view scrolling ===
            (KeyCode::Up, _) | (KeyCode::Char('k'), _) if self.state.view == View::Quiz => {
                self.state.quiz_scroll = self.state.quiz_scroll.saturating_sub(1);
            }
            (KeyCode::Down, _) | (KeyCode::Char('j'), _) if self.state.view == View::Quiz => {
                self.state.quiz_scroll = self.state.quiz_scroll.saturating_add(1);
            }

            _ => {}
        }

        false
    }

    fn handle_editing_key(&mut self, key: KeyEvent) -> bool {
        match (key.code, key.modifiers) {
            (KeyCode::Char('c'), KeyModifiers::CONTROL) => {
                return true;
            }
            (KeyCode::Esc, _) | (KeyCode::Enter, _) => {
                self.state.mode = InteractionMode::Normal;
            }
            // Field navigation commits the edit and moves on
            (KeyCode::Up, _) => {
                self.state.mode = InteractionMode::Normal;
                self.state.select_prev();
            }
            (KeyCode::Down, _) => {
                self.state.mode = InteractionMode::Normal;
                self.state.select_next();
            }
            (KeyCode::Backspace, _) => {
                self.state.pop_char();
            }
            (KeyCode::Char(c), KeyModifiers::NONE | KeyModifiers::SHIFT) => {
                self.state.push_char(c);
            }
            _ => {}
        }

        false
    }

    fn handle_help_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q') => {
                self.state.mode = InteractionMode::Normal;
            }
            _ => {}
        }

        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::Field;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::from(code)
    }

    #[test]
    fn test_app_new() {
        let app = App::new();
        assert_eq!(app.state().view, View::Form);
        assert_eq!(app.state().mode, InteractionMode::Normal);
    }

    #[test]
    fn test_ctrl_c_force_quits() {
        let mut app = App::new();
        let quit = app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(quit);
    }

    #[test]
    fn test_q_requests_quit() {
        let mut app = App::new();
        assert!(!app.handle_key(key(KeyCode::Char('q'))));
        assert!(app.state().should_quit);
    }

    #[test]
    fn test_tab_toggles_view() {
        let mut app = App::new();
        app.handle_key(key(KeyCode::Tab));
        assert_eq!(app.state().view, View::Quiz);
        app.handle_key(key(KeyCode::Tab));
        assert_eq!(app.state().view, View::Form);
    }

    #[test]
    fn test_help_toggle() {
        let mut app = App::new();
        app.handle_key(key(KeyCode::Char('?')));
        assert_eq!(app.state().mode, InteractionMode::Help);
        app.handle_key(key(KeyCode::Char('?')));
        assert_eq!(app.state().mode, InteractionMode::Normal);
    }

    #[test]
    fn test_enter_on_text_field_enters_editing() {
        let mut app = App::new();
        let idx = Field::ALL.iter().position(|f| *f == Field::Goals).unwrap();
        app.state_mut().selected_field = idx;

        app.handle_key(key(KeyCode::Enter));
        assert_eq!(app.state().mode, InteractionMode::Editing);

        for c in "audit".chars() {
            app.handle_key(key(KeyCode::Char(c)));
        }
        assert_eq!(app.state().session.form.goals, "audit");

        app.handle_key(key(KeyCode::Backspace));
        assert_eq!(app.state().session.form.goals, "audi");

        app.handle_key(key(KeyCode::Esc));
        assert_eq!(app.state().mode, InteractionMode::Normal);
    }

    #[test]
    fn test_enter_on_choice_field_cycles() {
        let mut app = App::new();
        let idx = Field::ALL.iter().position(|f| *f == Field::OrgSize).unwrap();
        app.state_mut().selected_field = idx;

        // Default "mid" advances to "enterprise"
        app.handle_key(key(KeyCode::Enter));
        assert_eq!(app.state().mode, InteractionMode::Normal);
        assert_eq!(app.state().session.form.org_size, "enterprise");

        app.handle_key(key(KeyCode::Enter));
        assert_eq!(app.state().session.form.org_size, "micro");
    }

    #[test]
    fn test_s_requests_submit_once_while_loading() {
        let mut app = App::new();

        app.handle_key(key(KeyCode::Char('s')));
        assert!(app.state().pending_submit);

        app.state_mut().pending_submit = false;
        app.state_mut().session.loading = true;
        app.handle_key(key(KeyCode::Char('s')));
        assert!(!app.state().pending_submit, "submit must be a no-op while loading");
    }

    #[test]
    fn test_navigation_commits_edit() {
        let mut app = App::new();
        let idx = Field::ALL.iter().position(|f| *f == Field::Geography).unwrap();
        app.state_mut().selected_field = idx;

        app.handle_key(key(KeyCode::Enter));
        app.handle_key(key(KeyCode::Char('A')));
        app.handle_key(key(KeyCode::Down));

        assert_eq!(app.state().mode, InteractionMode::Normal);
        assert_eq!(app.state().session.form.geography, "USA");
        assert_eq!(app.state().selected_field, idx + 1);
    }
}
