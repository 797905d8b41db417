use std::collections::HashMap;
use std::sync::Arc;

use serde_json::Value;
use validator::Validate;

use crate::{
    errors::{AppError, AppResult},
    models::domain::{Question, Submission},
    models::dto::{ManualGradeRequest, QuestionReport, SubmissionReport},
    repositories::{QuestionRepository, SubmissionRepository},
    services::{CatalogService, ScoringService},
};

/// Wires the catalog and scoring services to the persistence collaborators:
/// questions in, scored submissions out, manual essay grades folded back in.
pub struct SubmissionService {
    questions: Arc<dyn QuestionRepository>,
    submissions: Arc<dyn SubmissionRepository>,
}

impl SubmissionService {
    pub fn new(
        questions: Arc<dyn QuestionRepository>,
        submissions: Arc<dyn SubmissionRepository>,
    ) -> Self {
        Self {
            questions,
            submissions,
        }
    }

    /// Score a learner's raw responses against the current question catalog
    /// and persist the attempt. Response values arrive in whatever encoding
    /// the client or an older writer produced and go through the same
    /// permissive decode chain as stored questions.
    pub async fn submit(
        &self,
        learner_id: &str,
        raw_responses: HashMap<String, Value>,
    ) -> AppResult<Submission> {
        let questions = self.load_catalog().await?;

        let responses: HashMap<String, Vec<String>> = raw_responses
            .iter()
            .map(|(id, value)| (id.clone(), CatalogService::decode_response(value)))
            .collect();

        let (total_score, _) = ScoringService::score_submission(&responses, &questions);
        let submission = Submission::new(learner_id, responses, total_score);

        log::info!(
            "scored submission {} for learner {}: {} points over {} questions",
            submission.id,
            learner_id,
            total_score,
            questions.len()
        );

        self.submissions.create(submission).await
    }

    /// Apply an administrator's grade to a free-text answer and write the
    /// recomputed submission back. Callers racing to grade the same
    /// submission rely on the repository's per-submission update
    /// serialization; this service adds none of its own.
    pub async fn grade_essay(
        &self,
        submission_id: &str,
        request: ManualGradeRequest,
    ) -> AppResult<Submission> {
        request.validate()?;

        let submission = self
            .submissions
            .find_by_id(submission_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("Submission with id '{}' not found", submission_id))
            })?;

        let questions = self.load_catalog().await?;
        let updated = ScoringService::apply_manual_grade(&submission, &questions, &request)?;

        log::info!(
            "graded question {} on submission {}: award {}, new total {}",
            request.question_id,
            submission_id,
            request.award,
            updated.total_score
        );

        self.submissions.update_grades(&updated).await?;
        Ok(updated)
    }

    /// Assemble the per-question view a reviewer or document exporter needs:
    /// correctness, awarded points (manual override included), expected
    /// answers, and the learner's own response.
    pub async fn review(&self, submission_id: &str) -> AppResult<SubmissionReport> {
        let submission = self
            .submissions
            .find_by_id(submission_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("Submission with id '{}' not found", submission_id))
            })?;

        let questions = self.load_catalog().await?;
        let (_, awards) = ScoringService::score_submission(&submission.responses, &questions);

        let question_reports: Vec<QuestionReport> = questions
            .iter()
            .map(|question| {
                let is_correct =
                    ScoringService::is_correct(submission.response_for(question.id), question);
                let awarded = submission
                    .essay_grades
                    .get(&question.id.to_string())
                    .copied()
                    .unwrap_or_else(|| awards.get(&question.id).copied().unwrap_or(0.0));
                QuestionReport::build(question, &submission, is_correct, awarded)
            })
            .collect();

        Ok(SubmissionReport {
            submission_id: submission.id.clone(),
            learner_id: submission.learner_id.clone(),
            submitted_at: submission.submitted_at,
            total_score: submission.total_score,
            max_score: questions.iter().map(|q| q.points).sum(),
            questions: question_reports,
        })
    }

    async fn load_catalog(&self) -> AppResult<Vec<Question>> {
        let records = self.questions.find_all().await?;
        Ok(records.iter().map(CatalogService::normalize).collect())
    }
}
