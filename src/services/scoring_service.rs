use std::collections::{BTreeSet, HashMap};

use chrono::Utc;

use crate::errors::{AppError, AppResult};
use crate::models::domain::{Question, QuestionKind, Submission};
use crate::models::dto::ManualGradeRequest;

/// The single home of answer-correctness evaluation. Every caller that needs
/// to judge a response (submission flow, regrading, reports) goes through
/// here; there are deliberately no per-screen reimplementations of these
/// rules.
///
/// All functions are pure: they read immutable inputs and produce new
/// outputs, so independent submissions can be scored concurrently without
/// coordination.
pub struct ScoringService;

impl ScoringService {
    /// Judge a single response against a canonical question.
    ///
    /// An empty response is never correct, regardless of kind. Questions
    /// reference their options by 1-based index, so a match at position
    /// `pos` counts when `pos + 1` is among `correct_indices`; an index
    /// outside the option list simply never matches.
    pub fn is_correct(response: &[String], question: &Question) -> bool {
        if response.is_empty() {
            return false;
        }

        match question.kind {
            // Answered at all means automatically correct; qualitative
            // judgment is deferred to manual grading.
            QuestionKind::FreeText => !response[0].trim().is_empty(),

            // Exactly one selection, present in the option list, at a
            // correct position. More than one selection is always wrong
            // even when one of them is correct; long-standing behavior,
            // kept as-is.
            QuestionKind::SingleSelect => {
                if response.len() != 1 {
                    return false;
                }
                match question.options.iter().position(|opt| *opt == response[0]) {
                    Some(pos) => question.correct_indices.contains(&(pos + 1)),
                    None => false,
                }
            }

            // The set of matched option positions must equal the correct
            // set exactly. Selections not found in the option list are
            // dropped; order and duplicates are irrelevant.
            QuestionKind::MultiSelect => {
                let selected: BTreeSet<usize> = response
                    .iter()
                    .filter_map(|value| {
                        question.options.iter().position(|opt| opt == value)
                    })
                    .map(|pos| pos + 1)
                    .collect();
                selected == question.correct_indices
            }
        }
    }

    /// Score one submission's responses against the question list.
    ///
    /// Returns the total plus the per-question award map for downstream
    /// display and export. A question with no entry in `responses` is
    /// scored as unanswered, never as an error. Iteration order does not
    /// affect the total.
    pub fn score_submission(
        responses: &HashMap<String, Vec<String>>,
        questions: &[Question],
    ) -> (f64, HashMap<i64, f64>) {
        let mut awards = HashMap::with_capacity(questions.len());
        let mut total = 0.0;

        for question in questions {
            let response = responses
                .get(&question.id.to_string())
                .map(Vec::as_slice)
                .unwrap_or(&[]);
            let award = if Self::is_correct(response, question) {
                question.points
            } else {
                0.0
            };
            total += award;
            awards.insert(question.id, award);
        }

        (total, awards)
    }

    /// Recompute a total from scratch, substituting the manual override for
    /// every question that has one. Always a full recompute rather than a
    /// delta on the stored total, which keeps repeated grading idempotent.
    pub fn recompute_total(
        responses: &HashMap<String, Vec<String>>,
        questions: &[Question],
        essay_grades: &HashMap<String, f64>,
    ) -> f64 {
        let (_, awards) = Self::score_submission(responses, questions);

        questions
            .iter()
            .map(|question| {
                essay_grades
                    .get(&question.id.to_string())
                    .copied()
                    .unwrap_or_else(|| awards.get(&question.id).copied().unwrap_or(0.0))
            })
            .sum()
    }

    /// Record an administrator's grade for a free-text question and return
    /// the updated submission with its total recomputed. The input
    /// submission is left untouched on failure; no partial update occurs.
    pub fn apply_manual_grade(
        submission: &Submission,
        questions: &[Question],
        request: &ManualGradeRequest,
    ) -> AppResult<Submission> {
        let question = questions
            .iter()
            .find(|q| q.id == request.question_id)
            .ok_or_else(|| {
                AppError::InvalidGrade(format!(
                    "question '{}' does not exist",
                    request.question_id
                ))
            })?;

        if question.kind != QuestionKind::FreeText {
            return Err(AppError::InvalidGrade(format!(
                "question '{}' is not a free-text question",
                request.question_id
            )));
        }

        if request.award < 0.0 || request.award > question.points {
            return Err(AppError::InvalidGrade(format!(
                "award {} is outside [0, {}] for question '{}'",
                request.award, question.points, request.question_id
            )));
        }

        let mut updated = submission.clone();
        let key = request.question_id.to_string();
        updated.essay_grades.insert(key.clone(), request.award);
        updated.essay_comments.insert(key, request.comment.clone());
        updated.total_score =
            Self::recompute_total(&updated.responses, questions, &updated.essay_grades);
        updated.modified_at = Some(Utc::now());

        Ok(updated)
    }
}
