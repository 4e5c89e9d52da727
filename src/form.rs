//! Questionnaire form state
//!
//! A flat keyed mapping of field name to string value. Every field has a
//! value at all times; defaults are supplied at construction. Numeric
//! coercion happens once, at request-build time, never while typing.

use crate::api::AdvisoryRequest;

/// Fallback when timeline input cannot be parsed (or is zero)
const DEFAULT_TIMELINE_MONTHS: u32 = 6;

/// Sector choices, as offered by the questionnaire
pub const SECTORS: &[&str] = &[
    "finance",
    "healthcare",
    "manufacturing",
    "retail",
    "technology",
    "public sector",
];

/// Organization size choices
pub const ORG_SIZES: &[&str] = &["micro", "smb", "mid", "enterprise"];

/// Budget level choices
pub const BUDGET_LEVELS: &[&str] = &["low", "medium", "high"];

/// A questionnaire field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Sector,
    OrgSize,
    Geography,
    Goals,
    PainPoints,
    Constraints,
    CurrentTools,
    Compliance,
    TimelineMonths,
    BudgetLevel,
}

impl Field {
    /// All fields, in display order
    pub const ALL: [Field; 10] = [
        Field::Sector,
        Field::OrgSize,
        Field::Geography,
        Field::Compliance,
        Field::Goals,
        Field::PainPoints,
        Field::Constraints,
        Field::CurrentTools,
        Field::TimelineMonths,
        Field::BudgetLevel,
    ];

    /// Label shown next to the input
    pub fn label(&self) -> &'static str {
        match self {
            Field::Sector => "Sector",
            Field::OrgSize => "Org size",
            Field::Geography => "Geography",
            Field::Goals => "Goals",
            Field::PainPoints => "Pain points",
            Field::Constraints => "Constraints",
            Field::CurrentTools => "Current tools",
            Field::Compliance => "Compliance targets",
            Field::TimelineMonths => "Timeline (months)",
            Field::BudgetLevel => "Budget level",
        }
    }

    /// Fixed option list for choice fields, None for free text
    pub fn choices(&self) -> Option<&'static [&'static str]> {
        match self {
            Field::Sector => Some(SECTORS),
            Field::OrgSize => Some(ORG_SIZES),
            Field::BudgetLevel => Some(BUDGET_LEVELS),
            _ => None,
        }
    }

    /// Hint shown while the field is empty
    pub fn placeholder(&self) -> &'static str {
        match self {
            Field::Geography => "US/EU/APAC",
            Field::Goals => "What outcomes do you want?",
            Field::PainPoints => "Where are the bottlenecks today?",
            Field::Constraints => "Budget/time/skills/tooling constraints",
            Field::CurrentTools => "GRC platform, SIEM, ticketing, data warehouse, etc.",
            Field::Compliance => "SOX, ISO 27001, SOC2, GDPR",
            _ => "",
        }
    }
}

/// The questionnaire input state
///
/// One string value per [`Field`]. Updates go through [`FormState::set`],
/// which replaces exactly one key and leaves the rest untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormState {
    pub sector: String,
    pub org_size: String,
    pub geography: String,
    pub goals: String,
    pub pain_points: String,
    pub constraints: String,
    pub current_tools: String,
    pub compliance: String,
    pub timeline_months: String,
    pub budget_level: String,
}

impl Default for FormState {
    fn default() -> Self {
        Self {
            sector: "finance".to_string(),
            org_size: "mid".to_string(),
            geography: "US".to_string(),
            goals: String::new(),
            pain_points: String::new(),
            constraints: String::new(),
            current_tools: String::new(),
            compliance: "SOX, ISO 27001".to_string(),
            timeline_months: "6".to_string(),
            budget_level: "medium".to_string(),
        }
    }
}

impl FormState {
    /// Get the current value of a field
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Sector => &self.sector,
            Field::OrgSize => &self.org_size,
            Field::Geography => &self.geography,
            Field::Goals => &self.goals,
            Field::PainPoints => &self.pain_points,
            Field::Constraints => &self.constraints,
            Field::CurrentTools => &self.current_tools,
            Field::Compliance => &self.compliance,
            Field::TimelineMonths => &self.timeline_months,
            Field::BudgetLevel => &self.budget_level,
        }
    }

    /// Replace the value of exactly one field
    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        let value = value.into();
        match field {
            Field::Sector => self.sector = value,
            Field::OrgSize => self.org_size = value,
            Field::Geography => self.geography = value,
            Field::Goals => self.goals = value,
            Field::PainPoints => self.pain_points = value,
            Field::Constraints => self.constraints = value,
            Field::CurrentTools => self.current_tools = value,
            Field::Compliance => self.compliance = value,
            Field::TimelineMonths => self.timeline_months = value,
            Field::BudgetLevel => self.budget_level = value,
        }
    }

    /// Next option for a choice field, wrapping at the end
    ///
    /// Returns None for free-text fields. An unrecognized current value
    /// (e.g. from a hand-edited config) restarts at the first option.
    pub fn next_choice(&self, field: Field) -> Option<&'static str> {
        let choices = field.choices()?;
        let current = self.get(field);
        let idx = choices.iter().position(|c| *c == current);
        let next = match idx {
            Some(i) => choices[(i + 1) % choices.len()],
            None => choices[0],
        };
        Some(next)
    }

    /// Build the request body for submission
    ///
    /// Fields are copied verbatim except timeline_months, which is coerced
    /// to an integer with silent fallback - bad input never fails a
    /// submission.
    pub fn to_request(&self) -> AdvisoryRequest {
        AdvisoryRequest {
            sector: self.sector.clone(),
            org_size: self.org_size.clone(),
            geography: self.geography.clone(),
            goals: self.goals.clone(),
            pain_points: self.pain_points.clone(),
            constraints: self.constraints.clone(),
            current_tools: self.current_tools.clone(),
            compliance: self.compliance.clone(),
            timeline_months: coerce_timeline(&self.timeline_months),
            budget_level: self.budget_level.clone(),
        }
    }
}

/// Parse the timeline input, falling back to the default
///
/// Zero falls back too; a zero-month timeline is never sent.
fn coerce_timeline(value: &str) -> u32 {
    match value.trim().parse::<u32>() {
        Ok(0) | Err(_) => DEFAULT_TIMELINE_MONTHS,
        Ok(n) => n,
    }
}
