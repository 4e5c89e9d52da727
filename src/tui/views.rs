//! TUI views and rendering
//!
//! Rendering is a pure function of state: [`plan_lines`] and the quiz line
//! builders take data in and hand lines back, so the display policy is unit
//! testable without a terminal. Widget placement happens only in `render`.

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Wrap};

use super::state::{AppState, InteractionMode, View};
use crate::api::{OPTION_LABELS, PlanPhase, QuestionCard};
use crate::form::Field;
use crate::session::{DisplayState, SessionState};

/// Main render function
pub fn render(state: &AppState, frame: &mut Frame) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Main content
            Constraint::Length(3), // Footer
        ])
        .split(frame.area());

    render_header(state, frame, chunks[0]);

    match state.view {
        View::Form => render_form_view(state, frame, chunks[1]),
        View::Quiz => render_quiz_view(state, frame, chunks[1]),
    }

    if state.mode == InteractionMode::Help {
        render_help_overlay(frame, chunks[1]);
    }

    render_footer(state, frame, chunks[2]);
}

/// Render the header bar
fn render_header(state: &AppState, frame: &mut Frame, area: Rect) {
    let status = match state.session.display() {
        DisplayState::Loading => Span::styled("generating…", Style::default().fg(Color::Yellow)),
        DisplayState::Error(_) => Span::styled("error", Style::default().fg(Color::Red)),
        DisplayState::Plan(_) => Span::styled("plan ready", Style::default().fg(Color::Green)),
        DisplayState::Empty => Span::styled("idle", Style::default().fg(Color::DarkGray)),
    };

    let mut spans = vec![
        Span::styled(
            "GRC Advisor ",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
        Span::raw("│ "),
        Span::styled(state.view.display_name(), Style::default().fg(Color::Yellow)),
        Span::raw(" │ "),
        status,
    ];

    if let Some(at) = state.last_submitted {
        spans.push(Span::raw(" │ "));
        spans.push(Span::styled(
            format!("submitted {}", at.format("%H:%M:%S")),
            Style::default().fg(Color::DarkGray),
        ));
    }

    let header = Paragraph::new(vec![Line::from(spans)]).block(Block::default().borders(Borders::ALL).title(" Status "));
    frame.render_widget(header, area);
}

/// Render the form view: questionnaire on the left, plan on the right
fn render_form_view(state: &AppState, frame: &mut Frame, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    render_form_pane(state, frame, chunks[0]);
    render_plan_pane(state, frame, chunks[1]);
}

/// Render the questionnaire fields
fn render_form_pane(state: &AppState, frame: &mut Frame, area: Rect) {
    let editing = state.mode == InteractionMode::Editing;

    let items: Vec<ListItem> = Field::ALL
        .iter()
        .enumerate()
        .map(|(i, field)| {
            let selected = i == state.selected_field;
            let value = state.session.form.get(*field);

            let value_span = if value.is_empty() && !(selected && editing) {
                Span::styled(field.placeholder().to_string(), Style::default().fg(Color::DarkGray))
            } else {
                Span::raw(value.to_string())
            };

            let mut spans = vec![
                Span::styled(
                    format!("{:<20}", field.label()),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
                value_span,
            ];

            if selected && editing {
                spans.push(Span::styled("▏", Style::default().fg(Color::Yellow)));
            }
            if field.choices().is_some() && selected && !editing {
                spans.push(Span::styled(" ⏎ next", Style::default().fg(Color::DarkGray)));
            }

            let content = Line::from(spans);
            if selected {
                ListItem::new(content).style(Style::default().bg(Color::DarkGray).fg(Color::White))
            } else {
                ListItem::new(content)
            }
        })
        .collect();

    let title = if state.session.loading { " Questionnaire (generating…) " } else { " Questionnaire " };

    let list = List::new(items).block(Block::default().borders(Borders::ALL).title(title));
    frame.render_widget(list, area);
}

/// Render the plan pane
fn render_plan_pane(state: &AppState, frame: &mut Frame, area: Rect) {
    let paragraph = Paragraph::new(plan_lines(&state.session))
        .block(Block::default().borders(Borders::ALL).title(" Plan "))
        .wrap(Wrap { trim: false })
        .scroll((state.plan_scroll, 0));

    frame.render_widget(paragraph, area);
}

/// Build the plan pane content from the display state
///
/// Pure and deterministic: the same (loading, error, plan) triple always
/// yields the same lines. Sections and phase sub-lists are omitted entirely
/// when absent or empty; only the executive summary always renders.
pub fn plan_lines(session: &SessionState) -> Vec<Line<'static>> {
    match session.display() {
        DisplayState::Empty => vec![Line::from(Span::styled(
            "Submit the form to generate a tailored plan.",
            Style::default().fg(Color::DarkGray),
        ))],
        DisplayState::Loading => vec![Line::from(Span::styled(
            "Generating…",
            Style::default().fg(Color::Yellow),
        ))],
        DisplayState::Error(message) => vec![Line::from(vec![
            Span::styled("Error: ", Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)),
            Span::styled(message.to_string(), Style::default().fg(Color::Red)),
        ])],
        DisplayState::Plan(plan) => {
            let mut lines = Vec::new();

            lines.push(section_title("Executive summary"));
            lines.push(Line::from(plan.executive_summary.clone()));

            push_bullet_section(&mut lines, "Quick wins (2–4 weeks)", &plan.quick_wins);

            if !plan.phases.is_empty() {
                lines.push(Line::from(""));
                lines.push(section_title("Phases"));
                for phase in &plan.phases {
                    lines.extend(phase_lines(phase));
                }
            }

            push_bullet_section(&mut lines, "Recommended stack", &plan.recommended_stack);
            push_bullet_section(&mut lines, "Compliance mapping", &plan.compliance_mapping);
            push_bullet_section(&mut lines, "Assumptions", &plan.assumptions);

            lines
        }
    }
}

/// Lines for one phase block: name, duration, and the non-empty sub-lists
fn phase_lines(phase: &PlanPhase) -> Vec<Line<'static>> {
    let mut lines = vec![Line::from(vec![
        Span::styled(phase.name.clone(), Style::default().add_modifier(Modifier::BOLD)),
        Span::styled(
            format!(" · {} wks", fmt_weeks(phase.duration_weeks)),
            Style::default().fg(Color::DarkGray),
        ),
    ])];

    push_sub_list(&mut lines, "Objectives", &phase.objectives);
    push_sub_list(&mut lines, "Tasks", &phase.tasks);
    push_sub_list(&mut lines, "Deliverables", &phase.deliverables);
    push_sub_list(&mut lines, "Owners", &phase.owners);
    push_sub_list(&mut lines, "Risks", &phase.risks);
    push_sub_list(&mut lines, "Mitigations", &phase.mitigations);
    push_sub_list(&mut lines, "KPIs", &phase.kpis);

    lines.push(Line::from(""));
    lines
}

/// Append a titled bullet section, or nothing when the list is empty
fn push_bullet_section(lines: &mut Vec<Line<'static>>, title: &str, items: &[String]) {
    if items.is_empty() {
        return;
    }
    lines.push(Line::from(""));
    lines.push(section_title(title));
    for item in items {
        lines.push(Line::from(format!("• {}", item)));
    }
}

/// Append a labeled sub-list inside a phase block, or nothing when empty
fn push_sub_list(lines: &mut Vec<Line<'static>>, label: &str, items: &[String]) {
    if items.is_empty() {
        return;
    }
    lines.push(Line::from(Span::styled(
        format!("  {}", label),
        Style::default().fg(Color::Cyan),
    )));
    for item in items {
        lines.push(Line::from(format!("    • {}", item)));
    }
}

fn section_title(title: &str) -> Line<'static> {
    Line::from(Span::styled(
        title.to_string(),
        Style::default().add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
    ))
}

/// Format a duration, dropping a trailing ".0"
fn fmt_weeks(weeks: f64) -> String {
    if weeks.fract() == 0.0 { format!("{}", weeks as i64) } else { format!("{}", weeks) }
}

/// Render the quiz view: kept question cards followed by the rejection list
fn render_quiz_view(state: &AppState, frame: &mut Frame, area: Rect) {
    let lines = match &state.quiz {
        Some(set) => {
            let mut lines = Vec::new();
            for (idx, card) in set.kept.iter().enumerate() {
                lines.extend(question_card_lines(idx, card));
                lines.push(Line::from(""));
            }
            lines.extend(rejected_lines(&set.rejected));
            lines
        }
        None => vec![Line::from(Span::styled(
            "No question set loaded. Start with: grca quiz <file>",
            Style::default().fg(Color::DarkGray),
        ))],
    };

    let paragraph = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(" Questions "))
        .wrap(Wrap { trim: false })
        .scroll((state.quiz_scroll, 0));

    frame.render_widget(paragraph, area);
}

/// Lines for one question card
///
/// Each present option A-D renders with its label; correct options are
/// marked whether `correct_option` came as a single label or a set. The
/// explanation line always renders, the citation block only when present.
pub fn question_card_lines(idx: usize, card: &QuestionCard) -> Vec<Line<'static>> {
    let mut lines = vec![
        Line::from(Span::styled(
            format!("Q{} · {}", idx + 1, card.difficulty.as_deref().unwrap_or("")),
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(Span::styled(
            card.stem.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
    ];

    for label in OPTION_LABELS {
        let Some(text) = card.options.get(label) else {
            continue;
        };
        let correct = card.is_correct(label);
        let style = if correct {
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        let marker = if correct { " ✓" } else { "" };
        lines.push(Line::from(Span::styled(
            format!("  {}. {}{}", label, text, marker),
            style,
        )));
    }

    lines.push(Line::from(vec![
        Span::styled("Explanation: ", Style::default().add_modifier(Modifier::BOLD)),
        Span::raw(card.explanation.clone()),
    ]));

    if let Some(citation) = &card.citation {
        let page = match citation.page {
            Some(p) => format!(" · p.{}", p),
            None => String::new(),
        };
        lines.push(Line::from(Span::styled(
            format!("Source: {}{}", citation.file, page),
            Style::default().fg(Color::DarkGray),
        )));
        if let Some(quote) = &citation.quote {
            lines.push(Line::from(Span::styled(
                format!("  ❝{}❞", quote),
                Style::default().fg(Color::Yellow),
            )));
        }
    }

    lines
}

/// Lines for the rejection list
///
/// Unlike plan sections, an empty list shows a placeholder: a reviewer
/// needs to see that nothing was rejected.
pub fn rejected_lines(items: &[String]) -> Vec<Line<'static>> {
    if items.is_empty() {
        return vec![Line::from(Span::styled(
            "No rejections.",
            Style::default().fg(Color::DarkGray),
        ))];
    }

    let mut lines = vec![Line::from(Span::styled(
        format!("Rejected ({}):", items.len()),
        Style::default().add_modifier(Modifier::BOLD),
    ))];
    for item in items {
        lines.push(Line::from(format!("• {}", item)));
    }
    lines
}

/// Render help overlay
fn render_help_overlay(frame: &mut Frame, area: Rect) {
    let popup_area = centered_rect(60, 60, area);
    frame.render_widget(Clear, popup_area);

    let help_text = vec![
        Line::from(Span::styled(
            "Keyboard Shortcuts",
            Style::default().add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("q, Ctrl+c  ", Style::default().fg(Color::Cyan)),
            Span::raw("Quit"),
        ]),
        Line::from(vec![
            Span::styled("?, F1      ", Style::default().fg(Color::Cyan)),
            Span::raw("Toggle help"),
        ]),
        Line::from(vec![
            Span::styled("Tab        ", Style::default().fg(Color::Cyan)),
            Span::raw("Switch Form / Quiz view"),
        ]),
        Line::from(""),
        Line::from(Span::styled("Form", Style::default().add_modifier(Modifier::BOLD))),
        Line::from(vec![
            Span::styled("↑/↓, j/k   ", Style::default().fg(Color::Cyan)),
            Span::raw("Select field"),
        ]),
        Line::from(vec![
            Span::styled("Enter      ", Style::default().fg(Color::Cyan)),
            Span::raw("Edit field / next option"),
        ]),
        Line::from(vec![
            Span::styled("s          ", Style::default().fg(Color::Cyan)),
            Span::raw("Submit the questionnaire"),
        ]),
        Line::from(vec![
            Span::styled("PgUp/PgDn  ", Style::default().fg(Color::Cyan)),
            Span::raw("Scroll the plan"),
        ]),
        Line::from(""),
        Line::from(Span::styled("Quiz", Style::default().add_modifier(Modifier::BOLD))),
        Line::from(vec![
            Span::styled("↑/↓, j/k   ", Style::default().fg(Color::Cyan)),
            Span::raw("Scroll the cards"),
        ]),
    ];

    let help = Paragraph::new(help_text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Help ")
                .style(Style::default().bg(Color::DarkGray)),
        )
        .wrap(Wrap { trim: true });

    frame.render_widget(help, popup_area);
}

/// Render the footer bar
fn render_footer(state: &AppState, frame: &mut Frame, area: Rect) {
    let hints: &[(&str, &str)] = match (state.view, state.mode) {
        (_, InteractionMode::Editing) => &[("Esc/Enter", "Done"), ("↑↓", "Next field")],
        (View::Form, _) => &[
            ("s", "Submit"),
            ("↑↓", "Select"),
            ("Enter", "Edit"),
            ("Tab", "Quiz"),
            ("?", "Help"),
            ("q", "Quit"),
        ],
        (View::Quiz, _) => &[("↑↓", "Scroll"), ("Tab", "Form"), ("?", "Help"), ("q", "Quit")],
    };

    let mut spans = Vec::new();
    for (keys, action) in hints {
        spans.push(Span::styled(
            format!(" {}", keys),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::raw(format!(" {} ", action)));
    }

    let footer = Paragraph::new(Line::from(spans)).block(Block::default().borders(Borders::ALL));
    frame.render_widget(footer, area);
}

/// Helper to create a centered rect
fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

/// Flatten a line to its plain text (used by the batch printer and tests)
pub fn line_text(line: &Line) -> String {
    line.spans.iter().map(|s| s.content.as_ref()).collect()
}
