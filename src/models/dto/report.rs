use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::domain::{Question, QuestionKind, Submission};

/// Per-submission view consumed by report and export collaborators
/// (review screens, DOCX/PDF/Excel writers). Purely presentational; the
/// writers impose no contract back on the scoring core.
#[derive(Debug, Clone, Serialize)]
pub struct SubmissionReport {
    pub submission_id: String,
    pub learner_id: String,
    pub submitted_at: DateTime<Utc>,
    pub total_score: f64,
    pub max_score: f64,
    pub questions: Vec<QuestionReport>,
}

#[derive(Debug, Clone, Serialize)]
pub struct QuestionReport {
    pub question_id: i64,
    pub prompt: String,
    pub kind: QuestionKind,
    pub response: Vec<String>,
    /// Canonical text of the expected answers, resolved from the question's
    /// 1-based correct indices. Indices pointing outside the option list are
    /// dropped rather than rendered.
    pub expected_answers: Vec<String>,
    pub is_correct: bool,
    pub points_awarded: f64,
    pub points_possible: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub essay_comment: Option<String>,
}

impl QuestionReport {
    pub fn build(
        question: &Question,
        submission: &Submission,
        is_correct: bool,
        points_awarded: f64,
    ) -> Self {
        let expected_answers = question
            .correct_indices
            .iter()
            .filter_map(|&i| i.checked_sub(1).and_then(|i| question.options.get(i)))
            .cloned()
            .collect();

        QuestionReport {
            question_id: question.id,
            prompt: question.prompt.clone(),
            kind: question.kind,
            response: submission.response_for(question.id).to_vec(),
            expected_answers,
            is_correct,
            points_awarded,
            points_possible: question.points,
            essay_comment: submission
                .essay_comments
                .get(&question.id.to_string())
                .cloned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::{BTreeSet, HashMap};

    use super::*;

    #[test]
    fn test_expected_answers_resolve_one_based_indices() {
        let question = Question {
            id: 1,
            prompt: "Pick one".to_string(),
            kind: QuestionKind::SingleSelect,
            options: vec!["A".to_string(), "B".to_string(), "C".to_string()],
            correct_indices: BTreeSet::from([2, 99]),
            points: 1.0,
            answer_template: None,
            created_at: None,
            modified_at: None,
        };
        let submission = Submission::new(
            "learner-1",
            HashMap::from([("1".to_string(), vec!["B".to_string()])]),
            1.0,
        );

        let report = QuestionReport::build(&question, &submission, true, 1.0);

        // index 2 resolves to "B", the out-of-range 99 is dropped
        assert_eq!(report.expected_answers, vec!["B".to_string()]);
        assert_eq!(report.response, vec!["B".to_string()]);
        assert!(report.is_correct);
    }
}
