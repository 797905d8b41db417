use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One scored attempt by one learner.
///
/// `responses`, `essay_grades` and `essay_comments` are keyed by question id
/// rendered as a string, matching how the persistence layer stores map fields.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct Submission {
    pub id: String,
    pub learner_id: String,
    pub responses: HashMap<String, Vec<String>>,
    pub submitted_at: DateTime<Utc>,
    /// Invariant: equals the sum over all questions of the manual override
    /// where one exists, else the automatic award. Maintained by full
    /// recomputation, never by incremental adjustment.
    pub total_score: f64,
    /// Administrator-assigned scores for free-text questions. An entry here
    /// supersedes the automatic award for that question.
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub essay_grades: HashMap<String, f64>,
    /// Display-only administrator feedback per question.
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub essay_comments: HashMap<String, String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modified_at: Option<DateTime<Utc>>,
}

impl Submission {
    pub fn new(
        learner_id: &str,
        responses: HashMap<String, Vec<String>>,
        total_score: f64,
    ) -> Self {
        Submission {
            id: Uuid::new_v4().to_string(),
            learner_id: learner_id.to_string(),
            responses,
            submitted_at: Utc::now(),
            total_score,
            essay_grades: HashMap::new(),
            essay_comments: HashMap::new(),
            created_at: Some(Utc::now()),
            modified_at: Some(Utc::now()),
        }
    }

    /// The response recorded for a question, or the empty response when the
    /// learner never answered it. Missing entries are not an error.
    pub fn response_for(&self, question_id: i64) -> &[String] {
        self.responses
            .get(&question_id.to_string())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}
