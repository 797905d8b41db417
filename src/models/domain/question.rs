use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A survey question in canonical in-memory form: `options` and
/// `correct_indices` are native collections regardless of how persistence
/// encoded them (see `CatalogService::normalize`).
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct Question {
    pub id: i64,
    pub prompt: String,
    pub kind: QuestionKind,
    /// Empty for `FreeText`.
    pub options: Vec<String>,
    /// 1-based references into `options`: index `i` means `options[i - 1]`.
    /// Legacy stored data keeps this off-by-one convention and it is
    /// preserved for compatibility. Out-of-range values are tolerated; they
    /// simply never match a response.
    pub correct_indices: BTreeSet<usize>,
    pub points: f64,
    /// Display-only hint shown alongside the prompt; never affects scoring.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub answer_template: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modified_at: Option<DateTime<Utc>>,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize, Copy)]
pub enum QuestionKind {
    /// Exactly one option should be chosen (legacy: Combobox).
    #[serde(alias = "Combobox")]
    SingleSelect,
    /// Any subset of options may be chosen (legacy: Checkbox).
    #[serde(alias = "Checkbox")]
    MultiSelect,
    /// Open-ended written answer, manually graded (legacy: Essay).
    #[serde(alias = "Essay")]
    FreeText,
}

impl Question {
    /// Highest score this question can contribute.
    pub fn max_points(&self) -> f64 {
        self.points
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn question_kind_round_trip_serialization() {
        let variants = [
            QuestionKind::SingleSelect,
            QuestionKind::MultiSelect,
            QuestionKind::FreeText,
        ];

        for variant in variants {
            let json = serde_json::to_string(&variant).expect("variant should serialize");
            let parsed: QuestionKind =
                serde_json::from_str(&json).expect("variant should deserialize");
            assert_eq!(variant, parsed);
        }
    }

    #[test]
    fn question_kind_accepts_legacy_names() {
        let combo: QuestionKind = serde_json::from_str("\"Combobox\"").unwrap();
        let check: QuestionKind = serde_json::from_str("\"Checkbox\"").unwrap();
        let essay: QuestionKind = serde_json::from_str("\"Essay\"").unwrap();

        assert_eq!(combo, QuestionKind::SingleSelect);
        assert_eq!(check, QuestionKind::MultiSelect);
        assert_eq!(essay, QuestionKind::FreeText);
    }

    #[test]
    fn question_kind_rejects_unknown_variant() {
        let parsed = serde_json::from_str::<QuestionKind>("\"Dropdown\"");

        assert!(parsed.is_err());
    }

    #[test]
    fn question_round_trip_preserves_correct_indices() {
        let question = Question {
            id: 7,
            prompt: "Pick the even numbers".to_string(),
            kind: QuestionKind::MultiSelect,
            options: vec!["1".to_string(), "2".to_string(), "4".to_string()],
            correct_indices: BTreeSet::from([2, 3]),
            points: 2.0,
            answer_template: None,
            created_at: Some(Utc::now()),
            modified_at: Some(Utc::now()),
        };

        let json = serde_json::to_string(&question).expect("question should serialize");
        let parsed: Question = serde_json::from_str(&json).expect("question should deserialize");

        assert_eq!(parsed.correct_indices, BTreeSet::from([2, 3]));
        assert_eq!(parsed.kind, QuestionKind::MultiSelect);
        assert_eq!(parsed.max_points(), 2.0);
    }
}
