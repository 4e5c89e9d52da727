//! Request/response types for the advisory service
//!
//! These model the advisory endpoint's wire shapes. The response side is
//! deliberately permissive: every plan field may be absent or empty, and the
//! renderer is expected to degrade rather than reject.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Option labels for multiple-choice question cards
pub const OPTION_LABELS: [&str; 4] = ["A", "B", "C", "D"];

/// The questionnaire snapshot sent to `/advise`
///
/// Sent verbatim as the request body; timeline_months is already integral
/// by the time this exists (see `FormState::to_request`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdvisoryRequest {
    pub sector: String,
    pub org_size: String,
    pub geography: String,
    pub goals: String,
    pub pain_points: String,
    pub constraints: String,
    pub current_tools: String,
    pub compliance: String,
    pub timeline_months: u32,
    pub budget_level: String,
}

/// The staged plan returned by `/advise`
///
/// All fields optional on the wire; absent ones deserialize to empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdvisoryPlan {
    pub executive_summary: String,
    pub quick_wins: Vec<String>,
    pub phases: Vec<PlanPhase>,
    pub recommended_stack: Vec<String>,
    pub compliance_mapping: Vec<String>,
    pub assumptions: Vec<String>,
}

impl AdvisoryPlan {
    /// True when nothing at all came back
    pub fn is_empty(&self) -> bool {
        self.executive_summary.is_empty()
            && self.quick_wins.is_empty()
            && self.phases.is_empty()
            && self.recommended_stack.is_empty()
            && self.compliance_mapping.is_empty()
            && self.assumptions.is_empty()
    }
}

/// One stage of the plan
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlanPhase {
    pub name: String,
    pub duration_weeks: f64,
    pub objectives: Vec<String>,
    pub tasks: Vec<String>,
    pub deliverables: Vec<String>,
    pub owners: Vec<String>,
    pub risks: Vec<String>,
    pub mitigations: Vec<String>,
    pub kpis: Vec<String>,
}

/// Arbitrary JSON from `GET /health`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HealthStatus(pub serde_json::Value);

/// A quiz question card with citation, as produced by the generator endpoint
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuestionCard {
    pub stem: String,
    /// Sparse mapping over labels A-D; any subset may be present
    pub options: BTreeMap<String, String>,
    pub correct_option: Option<CorrectOption>,
    pub explanation: String,
    pub citation: Option<Citation>,
    pub difficulty: Option<String>,
}

impl QuestionCard {
    /// Whether the given option label is (one of) the correct answer(s)
    pub fn is_correct(&self, label: &str) -> bool {
        self.correct_option.as_ref().is_some_and(|c| c.is_correct(label))
    }
}

/// The correct answer for a card: a single label or a set of labels
///
/// The generator emits either a bare string ("B") or an array (["B","D"]);
/// both wire forms are equivalent statements of correctness.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CorrectOption {
    Single(String),
    Multiple(Vec<String>),
}

impl CorrectOption {
    /// Membership check covering both representations
    pub fn is_correct(&self, label: &str) -> bool {
        match self {
            CorrectOption::Single(l) => l == label,
            CorrectOption::Multiple(labels) => labels.iter().any(|l| l == label),
        }
    }
}

/// Source citation for a question card
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Citation {
    pub file: String,
    pub page: Option<i64>,
    pub quote: Option<String>,
}

/// The generator endpoint's response: kept cards plus rejection reasons
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuestionSet {
    pub kept: Vec<QuestionCard>,
    pub rejected: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plan_deserializes_with_all_fields_absent() {
        let plan: AdvisoryPlan = serde_json::from_str("{}").unwrap();
        assert!(plan.is_empty());
    }

    #[test]
    fn test_plan_deserializes_partial() {
        let plan: AdvisoryPlan = serde_json::from_str(r#"{"executive_summary": "Start here"}"#).unwrap();
        assert_eq!(plan.executive_summary, "Start here");
        assert!(plan.quick_wins.is_empty());
        assert!(plan.phases.is_empty());
        assert!(!plan.is_empty());
    }

    #[test]
    fn test_phase_sublists_independently_optional() {
        let plan: AdvisoryPlan = serde_json::from_str(
            r#"{"phases": [{"name": "Discovery", "duration_weeks": 4, "tasks": ["Inventory systems"]}]}"#,
        )
        .unwrap();

        assert_eq!(plan.phases.len(), 1);
        let phase = &plan.phases[0];
        assert_eq!(phase.name, "Discovery");
        assert_eq!(phase.duration_weeks, 4.0);
        assert_eq!(phase.tasks, vec!["Inventory systems"]);
        assert!(phase.objectives.is_empty());
        assert!(phase.deliverables.is_empty());
        assert!(phase.kpis.is_empty());
    }

    #[test]
    fn test_unknown_response_fields_pass_through() {
        // No schema validation: extra fields are simply ignored
        let plan: AdvisoryPlan =
            serde_json::from_str(r#"{"executive_summary": "ok", "confidence": 0.9, "extra": [1, 2]}"#).unwrap();
        assert_eq!(plan.executive_summary, "ok");
    }

    #[test]
    fn test_correct_option_both_wire_forms() {
        let single: CorrectOption = serde_json::from_str(r#""B""#).unwrap();
        assert!(matches!(single, CorrectOption::Single(_)));
        assert!(single.is_correct("B"));
        assert!(!single.is_correct("A"));

        let multi: CorrectOption = serde_json::from_str(r#"["B", "D"]"#).unwrap();
        assert!(matches!(multi, CorrectOption::Multiple(_)));
        assert!(multi.is_correct("B"));
        assert!(multi.is_correct("D"));
        assert!(!multi.is_correct("C"));
    }

    #[test]
    fn test_question_card_sparse_options() {
        let card: QuestionCard = serde_json::from_str(
            r#"{
                "stem": "Which control family covers access reviews?",
                "options": {"A": "AC", "C": "IR"},
                "correct_option": "A",
                "explanation": "Access control.",
                "difficulty": "easy"
            }"#,
        )
        .unwrap();

        assert_eq!(card.options.len(), 2);
        assert!(card.options.contains_key("A"));
        assert!(!card.options.contains_key("B"));
        assert!(card.is_correct("A"));
        assert!(!card.is_correct("C"));
        assert!(card.citation.is_none());
    }

    #[test]
    fn test_card_without_correct_option_marks_nothing() {
        let card = QuestionCard::default();
        for label in OPTION_LABELS {
            assert!(!card.is_correct(label));
        }
    }

    #[test]
    fn test_citation_optional_fields() {
        let citation: Citation = serde_json::from_str(r#"{"file": "iso27001.pdf"}"#).unwrap();
        assert_eq!(citation.file, "iso27001.pdf");
        assert!(citation.page.is_none());
        assert!(citation.quote.is_none());
    }

    #[test]
    fn test_question_set_defaults() {
        let set: QuestionSet = serde_json::from_str("{}").unwrap();
        assert!(set.kept.is_empty());
        assert!(set.rejected.is_empty());
    }

    #[test]
    fn test_request_serializes_timeline_as_integer() {
        let request = AdvisoryRequest {
            sector: "finance".into(),
            org_size: "mid".into(),
            geography: "US".into(),
            goals: String::new(),
            pain_points: String::new(),
            constraints: String::new(),
            current_tools: String::new(),
            compliance: "SOX".into(),
            timeline_months: 12,
            budget_level: "medium".into(),
        };

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["timeline_months"], 12);
        assert_eq!(value["sector"], "finance");
    }
}
