#[cfg(test)]
pub mod fixtures {
    use std::collections::BTreeSet;

    use serde_json::json;

    use crate::models::domain::{Question, QuestionKind};
    use crate::models::dto::RawQuestionRecord;

    /// Canonical-shape raw record for a single-select question.
    pub fn single_select_record() -> RawQuestionRecord {
        RawQuestionRecord {
            id: 1,
            prompt: "Pick the correct option".to_string(),
            kind: QuestionKind::SingleSelect,
            options: json!(["A", "B", "C"]),
            correct_indices: json!([2]),
            points: 1.0,
            answer_template: None,
            created_at: None,
            modified_at: None,
        }
    }

    pub fn free_text_record() -> RawQuestionRecord {
        RawQuestionRecord {
            id: 2,
            prompt: "Explain your reasoning".to_string(),
            kind: QuestionKind::FreeText,
            options: serde_json::Value::Null,
            correct_indices: serde_json::Value::Null,
            points: 2.0,
            answer_template: Some("Mention at least one trade-off".to_string()),
            created_at: None,
            modified_at: None,
        }
    }

    pub fn single_select_question(
        id: i64,
        options: &[&str],
        correct: &[usize],
        points: f64,
    ) -> Question {
        select_question(id, QuestionKind::SingleSelect, options, correct, points)
    }

    pub fn multi_select_question(
        id: i64,
        options: &[&str],
        correct: &[usize],
        points: f64,
    ) -> Question {
        select_question(id, QuestionKind::MultiSelect, options, correct, points)
    }

    pub fn free_text_question(id: i64, points: f64) -> Question {
        Question {
            id,
            prompt: format!("Essay question {}", id),
            kind: QuestionKind::FreeText,
            options: Vec::new(),
            correct_indices: BTreeSet::new(),
            points,
            answer_template: None,
            created_at: None,
            modified_at: None,
        }
    }

    fn select_question(
        id: i64,
        kind: QuestionKind,
        options: &[&str],
        correct: &[usize],
        points: f64,
    ) -> Question {
        Question {
            id,
            prompt: format!("Question {}", id),
            kind,
            options: options.iter().map(|o| o.to_string()).collect(),
            correct_indices: correct.iter().copied().collect(),
            points,
            answer_template: None,
            created_at: None,
            modified_at: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use crate::models::domain::QuestionKind;

    #[test]
    fn test_fixtures_records() {
        let record = single_select_record();
        assert_eq!(record.kind, QuestionKind::SingleSelect);

        let essay = free_text_record();
        assert_eq!(essay.kind, QuestionKind::FreeText);
        assert!(essay.answer_template.is_some());
    }

    #[test]
    fn test_fixtures_questions() {
        let q = multi_select_question(3, &["A", "B", "C"], &[1, 3], 2.0);
        assert_eq!(q.options.len(), 3);
        assert_eq!(q.correct_indices.len(), 2);

        let essay = free_text_question(2, 2.0);
        assert!(essay.options.is_empty());
    }
}
